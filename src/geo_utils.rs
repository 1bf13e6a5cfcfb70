//! Spherical geometry helpers shared by the bounding box and search code.
//!
//! All angles here are radians. Degree conversion happens once, at the
//! [`GeoPoint`] boundary, so these helpers never see mixed units.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{Result, SupplyMatchError};
use crate::GeoPoint;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.01;

/// Southernmost latitude (-90°).
pub const MIN_LAT: f64 = -FRAC_PI_2;
/// Northernmost latitude (90°).
pub const MAX_LAT: f64 = FRAC_PI_2;
/// Western longitude limit (-180°).
pub const MIN_LON: f64 = -PI;
/// Eastern longitude limit (180°).
pub const MAX_LON: f64 = PI;

/// Reject radii that cannot describe a sphere.
pub fn validate_sphere_radius(radius: f64) -> Result<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(SupplyMatchError::InvalidSphereRadius { radius })
    }
}

/// Reject negative or non-finite search distances. Zero is allowed.
pub fn validate_distance(distance: f64) -> Result<()> {
    if distance.is_finite() && distance >= 0.0 {
        Ok(())
    } else {
        Err(SupplyMatchError::InvalidDistance { distance })
    }
}

/// Central angle between two points given in radians, via the haversine formula.
///
/// Stays accurate for very small separations where the spherical law of
/// cosines loses precision to `acos` near 1.0.
#[inline]
pub fn central_angle(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let half_dlat = ((lat2 - lat1) / 2.0).sin();
    let half_dlon = ((lon2 - lon1) / 2.0).sin();

    let a = half_dlat * half_dlat + lat1.cos() * lat2.cos() * half_dlon * half_dlon;
    // Rounding can push `a` marginally past 1.0 for antipodal points.
    let a = a.clamp(0.0, 1.0);

    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Great-circle distance between two points on a sphere of `radius`.
///
/// The result is in the same unit as `radius`.
///
/// # Example
/// ```
/// use supplymatch::GeoPoint;
/// use supplymatch::geo_utils::{EARTH_RADIUS_KM, haversine_distance};
///
/// let london = GeoPoint::from_degrees(51.5074, -0.1278);
/// let paris = GeoPoint::from_degrees(48.8566, 2.3522);
/// let km = haversine_distance(&london, &paris, EARTH_RADIUS_KM).unwrap();
/// assert!((km - 343.5).abs() < 5.0);
/// ```
pub fn haversine_distance(a: &GeoPoint, b: &GeoPoint, radius: f64) -> Result<f64> {
    validate_sphere_radius(radius)?;
    Ok(a.central_angle(b) * radius)
}

/// Whether a latitude in radians lies within [-90°, 90°].
#[inline]
pub fn is_valid_latitude(lat: f64) -> bool {
    lat.is_finite() && (MIN_LAT..=MAX_LAT).contains(&lat)
}

/// Whether a longitude in radians lies within (-180°, 180°].
#[inline]
pub fn is_valid_longitude(lon: f64) -> bool {
    lon.is_finite() && lon > MIN_LON && lon <= MAX_LON
}
