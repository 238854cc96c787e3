//! Engine builder for fluent configuration.

use crate::compute::distance::DistanceMetric;
use crate::config::Config;
use crate::engine::Engine;
use crate::error::{Result, TourwatchError};
use std::time::Duration;

/// Builder for an [`Engine`]; all settings start at `Config::default()`.
///
/// ```
/// use tourwatch::{DistanceMetric, Engine};
/// use std::time::Duration;
///
/// let engine = Engine::builder()
///     .freshness_window(Duration::from_secs(15 * 60))
///     .rating_validation(true)
///     .distance_metric(DistanceMetric::Haversine)
///     .build()?;
/// assert_eq!(engine.config().hotspots.freshness_secs, 900);
/// # Ok::<(), tourwatch::TourwatchError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    config: Config,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.config = self.config.with_distance_metric(metric);
        self
    }

    pub fn hotspot_radius_km(mut self, radius_km: f64) -> Self {
        self.config.hotspots.radius_km = radius_km;
        self
    }

    pub fn min_hotspot_members(mut self, min_members: usize) -> Self {
        self.config.hotspots.min_members = min_members;
        self
    }

    pub fn freshness_window(mut self, window: Duration) -> Self {
        self.config = self.config.with_freshness_window(window);
        self
    }

    pub fn rating_group_radius_km(mut self, radius_km: f64) -> Self {
        self.config.ratings.group_radius_km = radius_km;
        self
    }

    pub fn rating_validation(mut self, enabled: bool) -> Self {
        self.config = self.config.with_rating_validation(enabled);
        self
    }

    pub fn max_ratings(mut self, max_records: usize) -> Self {
        self.config = self.config.with_max_ratings(max_records);
        self
    }

    pub fn trail_capacity(mut self, capacity: usize) -> Self {
        self.config = self.config.with_trail_capacity(capacity);
        self
    }

    /// Validate the configuration and build the engine.
    pub fn build(self) -> Result<Engine> {
        self.config
            .validate()
            .map_err(TourwatchError::InvalidConfig)?;
        Ok(Engine::from_valid_config(self.config))
    }
}
