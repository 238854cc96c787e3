//! # tourwatch-types
//!
//! Core geographic and safety data types for the Tourwatch engine.
//!
//! - **Point types**: `GeoPoint`
//! - **Hotspot types**: `TouristPosition`, `Hotspot`, `HotspotMember`
//! - **Rating types**: `RatingRecord`, `RatingGroup`, `RadiusSummary`, `SafetySummary`
//! - **Movement types**: `TrailPoint`, `MovementSummary`
//!
//! All types are serializable with Serde. Coordinates are stored in a
//! `geo::Point` (x = longitude, y = latitude) but travel on the wire as
//! `{"lat": .., "lng": ..}`.
//!
//! ```rust
//! use tourwatch_types::point::GeoPoint;
//!
//! let taj_mahal = GeoPoint::new(27.1751, 78.0421);
//! let agra_fort = GeoPoint::new(27.1795, 78.0211);
//! assert!(taj_mahal.haversine_km(&agra_fort) < 3.0);
//! ```

pub mod hotspot;
pub mod movement;
pub mod point;
pub mod rating;
