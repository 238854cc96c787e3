//! In-memory proximity clustering and rating aggregation for tourist-safety maps.
//!
//! ## Features
//! - **Hotspots**: latest position per user, re-clustered on every report into
//!   groups of nearby tourists (seed-only, 500 m, at least 3 people seen in the
//!   last 30 minutes)
//! - **Ratings**: append-only safety ratings with radius averages and 5 km
//!   first-fit proximity groups
//! - **Movement trails**: bounded recent history per user
//!
//! ## Staleness
//! Staleness is **passive**:
//! - Positions older than the freshness window are skipped by clustering
//! - They stay stored until the user reports again or `cleanup_stale()` runs
//! - Ratings are kept forever unless `RatingConfig::max_records` is set
//!
//! The caller supplies `now` on every write, so the engine never reads the
//! clock itself.
//!
//! ```rust
//! use tourwatch::{Engine, GeoPoint, JoinOutcome};
//! use std::time::SystemTime;
//!
//! let engine = Engine::new();
//! let now = SystemTime::now();
//!
//! engine.record_position("u1", GeoPoint::new(27.1751, 78.0421), "Asha", now);
//! engine.record_position("u2", GeoPoint::new(27.1755, 78.0424), "Ben", now);
//! engine.record_position("u3", GeoPoint::new(27.1749, 78.0418), "Chen", now);
//!
//! let hotspots = engine.hotspots();
//! assert_eq!(hotspots.len(), 1);
//! assert_eq!(hotspots[0].member_count, 3);
//!
//! let outcome = engine.join_hotspot(&hotspots[0].id, "u4", "Dara")?;
//! assert_eq!(outcome, JoinOutcome::Joined { tourist_count: 4 });
//!
//! engine.add_rating(GeoPoint::new(27.1751, 78.0421), 5, now)?;
//! let nearby = engine.query_radius(GeoPoint::new(27.1751, 78.0421), Some(1.0));
//! assert_eq!(nearby.average_rating, Some(5.0));
//! # Ok::<(), tourwatch::TourwatchError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod engine;
pub mod error;

pub use builder::EngineBuilder;
pub use engine::{
    Engine, EngineStats, HotspotDetector, JoinOutcome, MovementLog, RatingAggregator,
};
pub use error::{Result, TourwatchError};

pub type Tourwatch = Engine;

pub use compute::distance::{DistanceMetric, distance_between, distance_km};
pub use config::{Config, HotspotConfig, MovementConfig, RatingConfig};

pub use tourwatch_types::hotspot::{Hotspot, HotspotMember, TouristPosition};
pub use tourwatch_types::movement::{MonitoringStatus, MovementSummary, TrailPoint};
pub use tourwatch_types::point::{GeoPoint, Located};
pub use tourwatch_types::rating::{RadiusSummary, RatingGroup, RatingRecord, SafetySummary};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Engine, EngineBuilder, Result, TourwatchError};

    pub use crate::{GeoPoint, Hotspot, JoinOutcome, RadiusSummary, RatingGroup};

    pub use crate::{Config, DistanceMetric};

    pub use std::time::{Duration, SystemTime};
}
