//! Pure computation: distances, proximity grouping, and input validation.
//!
//! Nothing in here holds state or locks; the engine components call into it
//! while holding their own guards.

pub mod clustering;
pub mod distance;
pub mod validation;

pub use clustering::{first_fit_groups, seed_clusters};
pub use distance::{DistanceMetric, distance_between, distance_km, within_radius};
pub use tourwatch_types::rating::round_to_tenth;
