use crate::point::{GeoPoint, Located};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Round to one decimal place.
///
/// Rounding looks at the exact decimal expansion of `value`, so 1.05
/// (stored as 1.0500000000000000444) rounds up, and only true halves such
/// as 4.25 go to the even digit.
///
/// ```
/// use tourwatch_types::rating::round_to_tenth;
///
/// assert_eq!(round_to_tenth(3.6666), 3.7);
/// assert_eq!(round_to_tenth(4.25), 4.2);
/// assert_eq!(round_to_tenth(21.0 / 20.0), 1.1);
/// ```
pub fn round_to_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// A single safety rating tagged with where it was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub position: GeoPoint,
    pub rating: i32,
    #[serde(rename = "timestamp")]
    pub recorded_at: SystemTime,
}

impl RatingRecord {
    pub fn new(position: GeoPoint, rating: i32, recorded_at: SystemTime) -> Self {
        Self {
            position,
            rating,
            recorded_at,
        }
    }
}

impl Located for RatingRecord {
    fn location(&self) -> GeoPoint {
        self.position
    }
}

/// Ratings grouped around an anchor point.
///
/// The anchor is the location of the first rating added to the group; it is
/// never re-centered. `rating` is the running mean rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingGroup {
    #[serde(rename = "lat")]
    pub center_lat: f64,
    #[serde(rename = "lng")]
    pub center_lng: f64,
    #[serde(rename = "rating")]
    pub average: f64,
    pub count: usize,
    pub ratings: Vec<i32>,
}

impl RatingGroup {
    /// Start a group anchored at `anchor` with its first rating.
    pub fn anchored_at(anchor: GeoPoint, rating: i32) -> Self {
        Self {
            center_lat: anchor.lat(),
            center_lng: anchor.lng(),
            average: f64::from(rating),
            count: 1,
            ratings: vec![rating],
        }
    }

    pub fn anchor(&self) -> GeoPoint {
        GeoPoint::new(self.center_lat, self.center_lng)
    }

    /// Add a rating and refresh the running average.
    pub fn push(&mut self, rating: i32) {
        self.ratings.push(rating);
        self.count = self.ratings.len();
        let sum: i64 = self.ratings.iter().map(|r| i64::from(*r)).sum();
        self.average = round_to_tenth(sum as f64 / self.count as f64);
    }
}

impl Located for RatingGroup {
    fn location(&self) -> GeoPoint {
        self.anchor()
    }
}

/// Result of an "average rating near a point" query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiusSummary {
    /// Mean rating rounded to one decimal, `None` when nothing is in range.
    pub average_rating: Option<f64>,
    pub total_ratings: usize,
    pub location: GeoPoint,
    pub radius_km: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RadiusSummary {
    pub const NO_RATINGS_MESSAGE: &'static str = "No ratings found in this area";

    pub fn empty(location: GeoPoint, radius_km: f64) -> Self {
        Self {
            average_rating: None,
            total_ratings: 0,
            location,
            radius_km,
            message: Some(Self::NO_RATINGS_MESSAGE.to_string()),
        }
    }

    /// `true` when no rating fell inside the radius.
    pub fn is_empty(&self) -> bool {
        self.total_ratings == 0
    }
}

/// Aggregate safety picture over every rating ever recorded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SafetySummary {
    /// Mean of all ratings rounded to one decimal; 0.0 with no ratings.
    pub average_rating: f64,
    /// Ratings below 3.
    pub low_safety_zones: usize,
    /// Ratings of 4 and above.
    pub high_safety_zones: usize,
    pub total_rated: usize,
}
