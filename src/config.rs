//! Engine configuration.
//!
//! Every field has a default matching the behavior tourist-safety clients
//! expect (500 m hotspots of at least 3 people seen in the last 30 minutes,
//! 5 km rating groups), so `Config::default()` is the normal starting point.

use crate::compute::distance::DistanceMetric;
use serde::de::Error;
use std::time::Duration;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub distance_metric: DistanceMetric,

    #[serde(default)]
    pub hotspots: HotspotConfig,

    #[serde(default)]
    pub ratings: RatingConfig,

    #[serde(default)]
    pub movement: MovementConfig,
}

/// Hotspot detection thresholds
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HotspotConfig {
    /// Maximum distance from a cluster's seed for a position to join it
    #[serde(default = "HotspotConfig::default_radius_km")]
    pub radius_km: f64,

    /// Smallest cluster published as a hotspot
    #[serde(default = "HotspotConfig::default_min_members")]
    pub min_members: usize,

    /// Positions older than this take no part in clustering
    #[serde(default = "HotspotConfig::default_freshness_secs")]
    pub freshness_secs: u64,
}

impl HotspotConfig {
    const fn default_radius_km() -> f64 {
        0.5
    }

    const fn default_min_members() -> usize {
        3
    }

    const fn default_freshness_secs() -> u64 {
        30 * 60
    }

    pub fn freshness_window(&self) -> Duration {
        Duration::from_secs(self.freshness_secs)
    }

    /// Clustering radius as published on each hotspot, in whole meters.
    pub fn radius_meters(&self) -> u32 {
        (self.radius_km * 1000.0).round() as u32
    }
}

impl Default for HotspotConfig {
    fn default() -> Self {
        Self {
            radius_km: Self::default_radius_km(),
            min_members: Self::default_min_members(),
            freshness_secs: Self::default_freshness_secs(),
        }
    }
}

/// Rating aggregation settings
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RatingConfig {
    /// Distance from a group's anchor within which a rating joins it
    #[serde(default = "RatingConfig::default_group_radius_km")]
    pub group_radius_km: f64,

    /// Radius used when a query does not name one
    #[serde(default = "RatingConfig::default_query_radius_km")]
    pub default_query_radius_km: f64,

    /// Reject ratings outside 1..=5 and out-of-range coordinates
    #[serde(default)]
    pub validate: bool,

    /// Cap on retained ratings; the oldest are dropped first. `None` keeps all.
    #[serde(default)]
    pub max_records: Option<usize>,
}

impl RatingConfig {
    const fn default_group_radius_km() -> f64 {
        5.0
    }

    const fn default_query_radius_km() -> f64 {
        5.0
    }
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            group_radius_km: Self::default_group_radius_km(),
            default_query_radius_km: Self::default_query_radius_km(),
            validate: false,
            max_records: None,
        }
    }
}

/// Per-user movement trail settings
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MovementConfig {
    #[serde(default = "MovementConfig::default_trail_capacity")]
    pub trail_capacity: usize,
}

impl MovementConfig {
    const fn default_trail_capacity() -> usize {
        50
    }
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            trail_capacity: Self::default_trail_capacity(),
        }
    }
}

impl Config {
    pub fn with_distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.distance_metric = metric;
        self
    }

    pub fn with_hotspots(mut self, hotspots: HotspotConfig) -> Self {
        self.hotspots = hotspots;
        self
    }

    pub fn with_ratings(mut self, ratings: RatingConfig) -> Self {
        self.ratings = ratings;
        self
    }

    pub fn with_freshness_window(mut self, window: Duration) -> Self {
        self.hotspots.freshness_secs = window.as_secs();
        self
    }

    pub fn with_rating_validation(mut self, enabled: bool) -> Self {
        self.ratings.validate = enabled;
        self
    }

    pub fn with_max_ratings(mut self, max_records: usize) -> Self {
        assert!(max_records > 0, "Rating capacity must be greater than zero");

        if max_records > 1_000_000 {
            log::warn!(
                "Rating capacity of {} is very large; every grouping pass scans the whole log.",
                max_records
            );
        }

        self.ratings.max_records = Some(max_records);
        self
    }

    pub fn with_trail_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Trail capacity must be greater than zero");
        self.movement.trail_capacity = capacity;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        let h = &self.hotspots;
        if !h.radius_km.is_finite() || h.radius_km < 0.0 {
            return Err(format!(
                "Hotspot radius must be a finite, non-negative distance, got: {}",
                h.radius_km
            ));
        }
        if h.min_members == 0 {
            return Err("Hotspot minimum membership must be greater than zero".to_string());
        }
        if h.freshness_secs == 0 {
            return Err("Freshness window must be greater than zero".to_string());
        }

        let r = &self.ratings;
        if !r.group_radius_km.is_finite() || r.group_radius_km < 0.0 {
            return Err(format!(
                "Rating group radius must be a finite, non-negative distance, got: {}",
                r.group_radius_km
            ));
        }
        if !r.default_query_radius_km.is_finite() || r.default_query_radius_km < 0.0 {
            return Err(format!(
                "Default query radius must be a finite, non-negative distance, got: {}",
                r.default_query_radius_km
            ));
        }
        if r.max_records == Some(0) {
            return Err("Rating capacity must be greater than zero".to_string());
        }

        if self.movement.trail_capacity == 0 {
            return Err("Trail capacity must be greater than zero".to_string());
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            distance_metric: DistanceMetric::default(),
            hotspots: HotspotConfig::default(),
            ratings: RatingConfig::default(),
            movement: MovementConfig::default(),
        }
    }
}
