use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula, in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic point in degrees.
///
/// Latitude is expected in [-90, 90] and longitude in [-180, 180]; nothing
/// here enforces that. Callers that need enforcement go through
/// `tourwatch::compute::validation`.
///
/// # Examples
///
/// ```
/// use tourwatch_types::point::GeoPoint;
///
/// let delhi = GeoPoint::new(28.6139, 77.2090);
/// assert_eq!(delhi.lat(), 28.6139);
/// assert_eq!(delhi.lng(), 77.2090);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "LatLng", into = "LatLng")]
pub struct GeoPoint {
    inner: geo::Point<f64>,
}

/// Wire shape of a `GeoPoint`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl From<LatLng> for GeoPoint {
    fn from(value: LatLng) -> Self {
        GeoPoint::new(value.lat, value.lng)
    }
}

impl From<GeoPoint> for LatLng {
    fn from(value: GeoPoint) -> Self {
        LatLng {
            lat: value.lat(),
            lng: value.lng(),
        }
    }
}

impl GeoPoint {
    /// Create a point from latitude and longitude in degrees.
    #[inline]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            inner: geo::Point::new(lng, lat),
        }
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.inner.y()
    }

    #[inline]
    pub fn lng(&self) -> f64 {
        self.inner.x()
    }

    /// Access the inner `geo::Point` (x = longitude, y = latitude).
    #[inline]
    pub fn inner(&self) -> &geo::Point<f64> {
        &self.inner
    }

    #[inline]
    pub fn into_inner(self) -> geo::Point<f64> {
        self.inner
    }

    /// Great-circle distance to `other` in kilometers.
    ///
    /// Haversine on a sphere of radius [`EARTH_RADIUS_KM`]. Symmetric,
    /// non-negative, and zero for identical points. NaN coordinates
    /// produce a NaN distance.
    ///
    /// # Examples
    ///
    /// ```
    /// use tourwatch_types::point::GeoPoint;
    ///
    /// let a = GeoPoint::new(0.0, 0.0);
    /// let b = GeoPoint::new(1.0, 0.0);
    /// let d = a.haversine_km(&b);
    /// assert!((d - 111.19).abs() < 0.01);
    /// assert_eq!(d, b.haversine_km(&a));
    /// ```
    pub fn haversine_km(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.lat().to_radians();
        let lat2 = other.lat().to_radians();
        let delta_lat = (other.lat() - self.lat()).to_radians();
        let delta_lng = (other.lng() - self.lng()).to_radians();

        let h = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

        EARTH_RADIUS_KM * c
    }
}

impl From<geo::Point<f64>> for GeoPoint {
    fn from(inner: geo::Point<f64>) -> Self {
        Self { inner }
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        point.inner
    }
}

/// Anything that sits at a single geographic location.
pub trait Located {
    fn location(&self) -> GeoPoint;
}

impl Located for GeoPoint {
    fn location(&self) -> GeoPoint {
        *self
    }
}

impl<T: Located + ?Sized> Located for &T {
    fn location(&self) -> GeoPoint {
        (**self).location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_mapping() {
        let p = GeoPoint::new(40.7128, -74.0060);
        assert_eq!(p.inner().x(), -74.0060);
        assert_eq!(p.inner().y(), 40.7128);
    }

    #[test]
    fn test_haversine_zero_for_same_point() {
        let p = GeoPoint::new(27.1751, 78.0421);
        assert_eq!(p.haversine_km(&p), 0.0);
    }

    #[test]
    fn test_haversine_symmetric() {
        let nyc = GeoPoint::new(40.7128, -74.0060);
        let la = GeoPoint::new(34.0522, -118.2437);
        let d1 = nyc.haversine_km(&la);
        let d2 = la.haversine_km(&nyc);
        assert_eq!(d1, d2);
        // ~3936 km on a 6371 km sphere
        assert!(d1 > 3900.0 && d1 < 3970.0);
    }

    #[test]
    fn test_haversine_nan_propagates() {
        let a = GeoPoint::new(f64::NAN, 0.0);
        let b = GeoPoint::new(0.0, 0.0);
        assert!(a.haversine_km(&b).is_nan());
    }

    #[test]
    fn test_serde_uses_lat_lng() {
        let p = GeoPoint::new(12.5, -3.25);
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json, serde_json::json!({"lat": 12.5, "lng": -3.25}));

        let back: GeoPoint = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);
    }
}
