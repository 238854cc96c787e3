//! Great-circle distance between geographic points.

use geo::{Distance, Geodesic, Rhumb};
use serde::{Deserialize, Serialize};
use tourwatch_types::point::GeoPoint;

/// Distance metric used for proximity decisions.
///
/// - **Haversine**: spherical Earth of radius 6371 km; the default and the
///   metric every threshold in `Config::default()` was tuned for
/// - **Geodesic**: ellipsoidal distance (Karney 2013), slower
/// - **Rhumb**: constant-bearing distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceMetric {
    #[default]
    Haversine,
    Geodesic,
    Rhumb,
}

/// Haversine distance in kilometers.
///
/// ```
/// use tourwatch::compute::distance_km;
/// use tourwatch::GeoPoint;
///
/// let a = GeoPoint::new(48.8584, 2.2945);
/// assert_eq!(distance_km(&a, &a), 0.0);
/// ```
#[inline]
pub fn distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    a.haversine_km(b)
}

/// Distance in kilometers under `metric`.
pub fn distance_between(a: &GeoPoint, b: &GeoPoint, metric: DistanceMetric) -> f64 {
    match metric {
        DistanceMetric::Haversine => distance_km(a, b),
        DistanceMetric::Geodesic => Geodesic.distance(*a.inner(), *b.inner()) / 1000.0,
        DistanceMetric::Rhumb => Rhumb.distance(*a.inner(), *b.inner()) / 1000.0,
    }
}

/// Inclusive radius test. NaN distances are never within range.
#[inline]
pub fn within_radius(a: &GeoPoint, b: &GeoPoint, radius_km: f64, metric: DistanceMetric) -> bool {
    distance_between(a, b, metric) <= radius_km
}
