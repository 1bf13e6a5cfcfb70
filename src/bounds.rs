//! Latitude/longitude bounding boxes around a search centre.
//!
//! A [`BoundingBox`] is the smallest lat/lon rectangle guaranteed to contain
//! every point within a given great-circle distance of a centre. It is a cheap
//! pre-filter only; the exact distance check still decides acceptance.
//!
//! Two boundary cases need care:
//! - **Poles**: if a pole lies within the distance, longitudes are unbounded
//!   and the box spans the full (-180°, 180°] range.
//! - **Antimeridian**: if the box crosses ±180°, the longitude bounds are
//!   wrapped back into range and `min_lon > max_lon`. Containment then uses
//!   OR instead of AND on longitude.

use std::f64::consts::PI;

use crate::error::Result;
use crate::geo_utils::{
    MAX_LAT, MAX_LON, MIN_LAT, MIN_LON, validate_distance, validate_sphere_radius,
};
use crate::GeoPoint;

/// Bounding box in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Compute the box enclosing every point within `distance` of `center`
    /// on a sphere of `sphere_radius`.
    ///
    /// `distance` and `sphere_radius` share a unit. Fails before any
    /// computation if `distance < 0` or `sphere_radius <= 0`.
    ///
    /// # Example
    /// ```
    /// use supplymatch::{BoundingBox, GeoPoint};
    /// use supplymatch::geo_utils::EARTH_RADIUS_KM;
    ///
    /// let center = GeoPoint::from_degrees(0.0, 179.9);
    /// let bbox = BoundingBox::around(&center, 50.0, EARTH_RADIUS_KM).unwrap();
    /// assert!(bbox.wraps_antimeridian());
    /// ```
    pub fn around(center: &GeoPoint, distance: f64, sphere_radius: f64) -> Result<Self> {
        validate_distance(distance)?;
        validate_sphere_radius(sphere_radius)?;

        // Angular distance on a great circle.
        let angular = distance / sphere_radius;

        let lat = center.lat_radians();
        let lon = center.lon_radians();
        let min_lat = lat - angular;
        let max_lat = lat + angular;

        if min_lat > MIN_LAT && max_lat < MAX_LAT {
            // Clamped: rounding near a pole can push the ratio just past 1.0.
            let delta_lon = (angular.sin() / lat.cos()).min(1.0).asin();

            let mut min_lon = lon - delta_lon;
            if min_lon < MIN_LON {
                min_lon += 2.0 * PI;
            }
            let mut max_lon = lon + delta_lon;
            if max_lon > MAX_LON {
                max_lon -= 2.0 * PI;
            }

            Ok(Self {
                min_lat,
                max_lat,
                min_lon,
                max_lon,
            })
        } else {
            // A pole is within the distance: no longitude pruning possible.
            Ok(Self {
                min_lat: min_lat.max(MIN_LAT),
                max_lat: max_lat.min(MAX_LAT),
                min_lon: MIN_LON,
                max_lon: MAX_LON,
            })
        }
    }

    /// True when the box straddles the ±180° meridian.
    #[inline]
    pub fn wraps_antimeridian(&self) -> bool {
        self.min_lon > self.max_lon
    }

    /// True when the box spans every longitude (a pole is inside the radius).
    pub fn spans_all_longitudes(&self) -> bool {
        self.min_lon <= MIN_LON && self.max_lon >= MAX_LON
    }

    /// Cheap containment test. Boundaries are inclusive.
    #[inline]
    pub fn contains(&self, point: &GeoPoint) -> bool {
        let lat = point.lat_radians();
        if lat < self.min_lat || lat > self.max_lat {
            return false;
        }

        let lon = point.lon_radians();
        let east_of_min = lon >= self.min_lon;
        let west_of_max = lon <= self.max_lon;
        if self.wraps_antimeridian() {
            east_of_min || west_of_max
        } else {
            east_of_min && west_of_max
        }
    }

    /// South-west corner.
    pub fn min_point(&self) -> GeoPoint {
        GeoPoint::from_radians(self.min_lat, self.min_lon)
    }

    /// North-east corner.
    pub fn max_point(&self) -> GeoPoint {
        GeoPoint::from_radians(self.max_lat, self.max_lon)
    }
}
