//! Rating aggregation over an append-only log of point-tagged ratings.
//!
//! Records are never grouped on write. Radius queries and proximity groups
//! are computed from the full log each time they are asked for.

use crate::compute::clustering::first_fit_groups;
use crate::compute::distance::{DistanceMetric, within_radius};
use crate::compute::validation::{validate_geographic_point, validate_rating};
use crate::config::RatingConfig;
use crate::error::Result;
use parking_lot::RwLock;
use std::time::SystemTime;
use tourwatch_types::point::GeoPoint;
use tourwatch_types::rating::{
    RadiusSummary, RatingGroup, RatingRecord, SafetySummary, round_to_tenth,
};

fn mean(ratings: impl Iterator<Item = i32>) -> Option<f64> {
    let (sum, count) = ratings.fold((0i64, 0usize), |(sum, count), r| {
        (sum + i64::from(r), count + 1)
    });
    (count > 0).then(|| sum as f64 / count as f64)
}

/// Append-only store of safety ratings with proximity aggregation.
pub struct RatingAggregator {
    records: RwLock<Vec<RatingRecord>>,
    config: RatingConfig,
    metric: DistanceMetric,
}

impl RatingAggregator {
    pub fn new(config: RatingConfig, metric: DistanceMetric) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            config,
            metric,
        }
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    /// Append a rating.
    ///
    /// With validation off (the default) every rating is accepted as given.
    /// With `RatingConfig::validate` on, ratings outside 1..=5 and
    /// out-of-range coordinates fail with `InvalidInput`.
    pub fn add_rating(&self, position: GeoPoint, rating: i32, now: SystemTime) -> Result<()> {
        if self.config.validate
            && let Err(e) = validate_geographic_point(&position).and(validate_rating(rating))
        {
            log::warn!("Rejected rating {}: {}", rating, e);
            return Err(e);
        }

        let mut records = self.records.write();
        records.push(RatingRecord::new(position, rating, now));

        if let Some(max) = self.config.max_records
            && records.len() > max
        {
            let excess = records.len() - max;
            records.drain(..excess);
            log::warn!(
                "Rating log at capacity ({}); dropped {} oldest record(s)",
                max,
                excess
            );
        }

        Ok(())
    }

    /// Average rating of every record within `radius_km` of `center`.
    ///
    /// The boundary is inclusive. The average is rounded to one decimal;
    /// with no records in range it is `None` and the summary carries a
    /// "no ratings" message.
    pub fn query_radius(&self, center: GeoPoint, radius_km: f64) -> RadiusSummary {
        let records = self.records.read();
        let nearby: Vec<i32> = records
            .iter()
            .filter(|r| within_radius(&center, &r.position, radius_km, self.metric))
            .map(|r| r.rating)
            .collect();

        match mean(nearby.iter().copied()) {
            Some(avg) => RadiusSummary {
                average_rating: Some(round_to_tenth(avg)),
                total_ratings: nearby.len(),
                location: center,
                radius_km,
                message: None,
            },
            None => RadiusSummary::empty(center, radius_km),
        }
    }

    /// `query_radius` with the configured default radius.
    pub fn query_default_radius(&self, center: GeoPoint) -> RadiusSummary {
        self.query_radius(center, self.config.default_query_radius_km)
    }

    /// Group every record by proximity to a group anchor.
    ///
    /// Records are visited in insertion order and join the first group whose
    /// anchor is within the group radius; otherwise they anchor a new group.
    /// Rebuilt from scratch on every call.
    pub fn group_all(&self) -> Vec<RatingGroup> {
        let records = self.records.read();
        first_fit_groups(records.as_slice(), self.config.group_radius_km, self.metric)
            .into_iter()
            .map(|indices| {
                let anchor = &records[indices[0]];
                let mut group = RatingGroup::anchored_at(anchor.position, anchor.rating);
                for &idx in &indices[1..] {
                    group.push(records[idx].rating);
                }
                group
            })
            .collect()
    }

    /// Overall safety picture across every stored rating.
    pub fn summary(&self) -> SafetySummary {
        let records = self.records.read();
        let average = mean(records.iter().map(|r| r.rating)).unwrap_or(0.0);

        SafetySummary {
            average_rating: round_to_tenth(average),
            low_safety_zones: records.iter().filter(|r| r.rating < 3).count(),
            high_safety_zones: records.iter().filter(|r| r.rating >= 4).count(),
            total_rated: records.len(),
        }
    }

    /// Snapshot of the log in insertion order.
    pub fn records(&self) -> Vec<RatingRecord> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    pub fn clear(&self) {
        self.records.write().clear();
    }
}

impl Default for RatingAggregator {
    fn default() -> Self {
        Self::new(RatingConfig::default(), DistanceMetric::default())
    }
}
