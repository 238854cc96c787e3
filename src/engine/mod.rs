//! The Tourwatch engine.
//!
//! `Engine` owns one instance of each stateful component and is cheap to
//! clone; every clone shares the same state. Construct it once per process
//! and hand clones to request handlers.

use crate::config::Config;
use crate::error::{Result, TourwatchError};
use std::sync::Arc;
use std::time::SystemTime;
use tourwatch_types::hotspot::{Hotspot, TouristPosition};
use tourwatch_types::movement::{MovementSummary, TrailPoint};
use tourwatch_types::point::GeoPoint;
use tourwatch_types::rating::{RadiusSummary, RatingGroup, SafetySummary};

mod hotspots;
mod movement;
mod ratings;

pub use hotspots::{HotspotDetector, JoinOutcome};
pub use movement::MovementLog;
pub use ratings::RatingAggregator;

/// Point-in-time counters across all components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct EngineStats {
    /// Stored positions, stale ones included.
    pub tracked_positions: usize,
    pub hotspots: usize,
    pub ratings: usize,
    pub tracked_users: usize,
}

/// Proximity clustering and rating aggregation for tourist-safety maps.
///
/// Thread-safe; each component guards its own state with a single lock.
/// Operations on different components do not order against each other.
#[derive(Clone)]
pub struct Engine {
    pub(crate) hotspots: Arc<HotspotDetector>,
    pub(crate) ratings: Arc<RatingAggregator>,
    pub(crate) movement: Arc<MovementLog>,
    pub(crate) config: Arc<Config>,
}

impl Engine {
    /// Engine with default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(Config::default())
    }

    pub fn builder() -> crate::builder::EngineBuilder {
        crate::builder::EngineBuilder::new()
    }

    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().map_err(TourwatchError::InvalidConfig)?;
        Ok(Self::from_valid_config(config))
    }

    pub(crate) fn from_valid_config(config: Config) -> Self {
        log::info!(
            "Starting engine: hotspots within {} km (min {}, fresh for {}s), rating groups within {} km, {:?} distance",
            config.hotspots.radius_km,
            config.hotspots.min_members,
            config.hotspots.freshness_secs,
            config.ratings.group_radius_km,
            config.distance_metric
        );

        Self {
            hotspots: Arc::new(HotspotDetector::new(
                config.hotspots.clone(),
                config.distance_metric,
            )),
            ratings: Arc::new(RatingAggregator::new(
                config.ratings.clone(),
                config.distance_metric,
            )),
            movement: Arc::new(MovementLog::new(&config.movement)),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn hotspot_detector(&self) -> &HotspotDetector {
        &self.hotspots
    }

    pub fn rating_aggregator(&self) -> &RatingAggregator {
        &self.ratings
    }

    pub fn movement_log(&self) -> &MovementLog {
        &self.movement
    }

    // ===== Hotspots =====

    /// Record where a user is, extend their movement trail, and re-detect
    /// hotspots. Returns the position it replaced, if any.
    pub fn record_position(
        &self,
        user_id: &str,
        position: GeoPoint,
        display_name: &str,
        now: SystemTime,
    ) -> Option<TouristPosition> {
        self.movement.record(user_id, position, now);
        self.hotspots
            .record_position(user_id, position, display_name, now)
    }

    pub fn hotspots(&self) -> Vec<Hotspot> {
        self.hotspots.hotspots()
    }

    pub fn hotspot(&self, id: &str) -> Result<Hotspot> {
        self.hotspots
            .hotspot(id)
            .ok_or_else(|| TourwatchError::HotspotNotFound(id.to_string()))
    }

    pub fn join_hotspot(&self, id: &str, user_id: &str, display_name: &str) -> Result<JoinOutcome> {
        self.hotspots.join_hotspot(id, user_id, display_name)
    }

    pub fn recompute_hotspots(&self, now: SystemTime) {
        self.hotspots.recompute(now);
    }

    /// Evict positions outside the freshness window. Returns how many went.
    pub fn cleanup_stale(&self, now: SystemTime) -> usize {
        self.hotspots.cleanup_stale(now)
    }

    // ===== Ratings =====

    pub fn add_rating(&self, position: GeoPoint, rating: i32, now: SystemTime) -> Result<()> {
        self.ratings.add_rating(position, rating, now)
    }

    /// Average rating near `center`; `radius_km` falls back to the
    /// configured default when `None`.
    pub fn query_radius(&self, center: GeoPoint, radius_km: Option<f64>) -> RadiusSummary {
        match radius_km {
            Some(radius) => self.ratings.query_radius(center, radius),
            None => self.ratings.query_default_radius(center),
        }
    }

    pub fn group_ratings(&self) -> Vec<RatingGroup> {
        self.ratings.group_all()
    }

    pub fn safety_summary(&self) -> SafetySummary {
        self.ratings.summary()
    }

    // ===== Movement =====

    pub fn movement_trail(&self, user_id: &str) -> Vec<TrailPoint> {
        self.movement.trail(user_id)
    }

    pub fn movement_summary(&self) -> MovementSummary {
        self.movement.summary()
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            tracked_positions: self.hotspots.tracked_positions(),
            hotspots: self.hotspots.hotspot_count(),
            ratings: self.ratings.len(),
            tracked_users: self.movement.tracked_users(),
        }
    }

    /// Drop all positions, hotspots, ratings, and trails.
    pub fn clear(&self) {
        self.hotspots.clear();
        self.ratings.clear();
        self.movement.clear();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
