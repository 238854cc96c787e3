//! Validation for coordinates and ratings.
//!
//! The engine stores whatever it is given unless `RatingConfig::validate` is
//! switched on; these checks back that switch.

use crate::error::{Result, TourwatchError};
use std::ops::RangeInclusive;
use tourwatch_types::point::GeoPoint;

/// Accepted rating values when validation is enabled.
pub const RATING_RANGE: RangeInclusive<i32> = 1..=5;

/// Validates latitude in [-90, 90] and longitude in [-180, 180].
///
/// # Examples
///
/// ```
/// use tourwatch::compute::validation::validate_geographic_point;
/// use tourwatch::GeoPoint;
///
/// assert!(validate_geographic_point(&GeoPoint::new(27.17, 78.04)).is_ok());
/// assert!(validate_geographic_point(&GeoPoint::new(95.0, 78.04)).is_err());
/// assert!(validate_geographic_point(&GeoPoint::new(27.17, 200.0)).is_err());
/// ```
pub fn validate_geographic_point(point: &GeoPoint) -> Result<()> {
    let (lat, lng) = (point.lat(), point.lng());

    if !lat.is_finite() {
        return Err(TourwatchError::InvalidInput(format!(
            "Latitude must be finite, got: {}",
            lat
        )));
    }

    if !lng.is_finite() {
        return Err(TourwatchError::InvalidInput(format!(
            "Longitude must be finite, got: {}",
            lng
        )));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(TourwatchError::InvalidInput(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            lat
        )));
    }

    if !(-180.0..=180.0).contains(&lng) {
        return Err(TourwatchError::InvalidInput(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            lng
        )));
    }

    Ok(())
}

pub fn validate_rating(rating: i32) -> Result<()> {
    if !RATING_RANGE.contains(&rating) {
        return Err(TourwatchError::InvalidInput(format!(
            "Rating out of range [{}, {}]: {}",
            RATING_RANGE.start(),
            RATING_RANGE.end(),
            rating
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_geographic_point() {
        assert!(validate_geographic_point(&GeoPoint::new(40.7128, -74.0060)).is_ok());
        assert!(validate_geographic_point(&GeoPoint::new(-33.8568, 151.2153)).is_ok());

        // Edge cases
        assert!(validate_geographic_point(&GeoPoint::new(90.0, 0.0)).is_ok());
        assert!(validate_geographic_point(&GeoPoint::new(-90.0, 0.0)).is_ok());
        assert!(validate_geographic_point(&GeoPoint::new(0.0, 180.0)).is_ok());
        assert!(validate_geographic_point(&GeoPoint::new(0.0, -180.0)).is_ok());
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(validate_geographic_point(&GeoPoint::new(90.1, 0.0)).is_err());
        assert!(validate_geographic_point(&GeoPoint::new(-95.0, 0.0)).is_err());
        assert!(validate_geographic_point(&GeoPoint::new(0.0, 180.1)).is_err());
        assert!(validate_geographic_point(&GeoPoint::new(0.0, -200.0)).is_err());
    }

    #[test]
    fn test_non_finite_coordinates() {
        assert!(validate_geographic_point(&GeoPoint::new(f64::NAN, 0.0)).is_err());
        assert!(validate_geographic_point(&GeoPoint::new(0.0, f64::INFINITY)).is_err());
    }

    #[test]
    fn test_rating_range() {
        for r in 1..=5 {
            assert!(validate_rating(r).is_ok());
        }
        assert!(matches!(
            validate_rating(0),
            Err(TourwatchError::InvalidInput(_))
        ));
        assert!(validate_rating(6).is_err());
        assert!(validate_rating(-3).is_err());
    }
}
