//! # Supply Match
//!
//! Proximity search for live supply (drivers, couriers, vehicles) held in an
//! in-memory registry.
//!
//! This library provides:
//! - Great-circle distances on a sphere of caller-supplied radius
//! - Latitude/longitude bounding boxes with pole and antimeridian handling
//! - Nearest-neighbour and radius-filter scans over the registry
//! - Expanding radius search that widens until something is found
//! - A concurrent, injectable supply registry and a facade engine on top of it
//!
//! ## Features
//!
//! - **`parallel`** - Parallel scans over entity slices with rayon
//! - **`synthetic`** - Seeded synthetic fleets for benchmarking
//! - **`cli`** - The `supplymatch-cli` debug tool
//!
//! ## Quick Start
//!
//! ```rust
//! use supplymatch::{GeoPoint, SearchConfig, SupplyLocationEngine};
//!
//! let engine = SupplyLocationEngine::new(SearchConfig::default()).unwrap();
//! engine
//!     .update_entity("driver-1", GeoPoint::from_degrees(51.5074, -0.1278), None)
//!     .unwrap();
//!
//! let closest = engine
//!     .find_closest(GeoPoint::from_degrees(51.5080, -0.1290))
//!     .unwrap();
//! assert_eq!(closest.unwrap().entity.id, "driver-1");
//! ```
//!
//! Distances come back in the unit of [`SearchConfig::sphere_radius`]
//! (kilometres with the default Earth radius).

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{OptionExt, Result, SupplyMatchError};

// Spherical geometry (haversine, range constants, argument checks)
pub mod geo_utils;

// Bounding box pre-filter
pub mod bounds;
pub use bounds::BoundingBox;

// Nearest-neighbour and radius-filter scans
pub mod search;
#[cfg(feature = "parallel")]
pub use search::{find_closest_parallel, find_within_distance_parallel};
pub use search::{evaluate_candidate, find_closest, find_within_distance};

// Expanding radius controller
pub mod expanding;
pub use expanding::{ExpandingSearchOutcome, find_within_expanding_radius};

// Registry and facade engine
pub mod engine;
pub use engine::{SupplyLocationEngine, SupplyRegistry};

// Synthetic fleets for benches and the CLI
#[cfg(feature = "synthetic")]
pub mod synthetic;

// ============================================================================
// Core Types
// ============================================================================

/// A point on a sphere.
///
/// Both degree and radian representations are kept so neither has to be
/// recomputed on the hot path. Trigonometry only ever reads the radian pair;
/// input validation and serialization only ever read the degree pair.
///
/// # Example
/// ```
/// use supplymatch::GeoPoint;
/// let point = GeoPoint::from_degrees(51.5074, -0.1278); // London
/// assert!(point.is_valid());
/// assert!((point.lat_radians() - 51.5074_f64.to_radians()).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "DegreesRepr", into = "DegreesRepr")]
pub struct GeoPoint {
    lat_deg: f64,
    lon_deg: f64,
    lat_rad: f64,
    lon_rad: f64,
}

impl GeoPoint {
    /// Create a point from latitude/longitude in degrees.
    pub fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self {
            lat_deg: latitude,
            lon_deg: longitude,
            lat_rad: latitude.to_radians(),
            lon_rad: longitude.to_radians(),
        }
    }

    /// Create a point from latitude/longitude in radians.
    pub fn from_radians(latitude: f64, longitude: f64) -> Self {
        Self {
            lat_deg: latitude.to_degrees(),
            lon_deg: longitude.to_degrees(),
            lat_rad: latitude,
            lon_rad: longitude,
        }
    }

    pub fn lat_degrees(&self) -> f64 {
        self.lat_deg
    }

    pub fn lon_degrees(&self) -> f64 {
        self.lon_deg
    }

    pub fn lat_radians(&self) -> f64 {
        self.lat_rad
    }

    pub fn lon_radians(&self) -> f64 {
        self.lon_rad
    }

    /// Check that latitude is within [-90, 90] and longitude within (-180, 180].
    pub fn is_valid(&self) -> bool {
        self.lat_deg.is_finite()
            && self.lon_deg.is_finite()
            && (-90.0..=90.0).contains(&self.lat_deg)
            && self.lon_deg > -180.0
            && self.lon_deg <= 180.0
    }

    /// Return `self` or an [`SupplyMatchError::InvalidCoordinate`].
    pub fn validated(self) -> Result<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(SupplyMatchError::InvalidCoordinate {
                latitude: self.lat_deg,
                longitude: self.lon_deg,
            })
        }
    }

    /// Central angle to `other` in radians (unit sphere distance).
    #[inline]
    pub fn central_angle(&self, other: &GeoPoint) -> f64 {
        geo_utils::central_angle(self.lat_rad, self.lon_rad, other.lat_rad, other.lon_rad)
    }

    /// Great-circle distance to `other` along a sphere of `sphere_radius`.
    ///
    /// Fails if the radius is not a positive finite number.
    pub fn distance_to(&self, other: &GeoPoint, sphere_radius: f64) -> Result<f64> {
        geo_utils::haversine_distance(self, other, sphere_radius)
    }
}

/// Wire form of a [`GeoPoint`]: always degrees.
#[derive(Serialize, Deserialize)]
struct DegreesRepr {
    latitude: f64,
    longitude: f64,
}

impl From<DegreesRepr> for GeoPoint {
    fn from(repr: DegreesRepr) -> Self {
        GeoPoint::from_degrees(repr.latitude, repr.longitude)
    }
}

impl From<GeoPoint> for DegreesRepr {
    fn from(point: GeoPoint) -> Self {
        DegreesRepr {
            latitude: point.lat_deg,
            longitude: point.lon_deg,
        }
    }
}

/// Availability flags gating whether an entity may be matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    /// Entity is willing to take new work.
    pub accepts_work: bool,
    /// Entity is currently serving a job.
    pub busy: bool,
}

impl Availability {
    /// Available for matching right now.
    pub fn available() -> Self {
        Self {
            accepts_work: true,
            busy: false,
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.accepts_work && !self.busy
    }
}

/// One locatable unit of supply.
///
/// Entities are replaced wholesale on every location update; there is no
/// partial mutation, so a reader never sees a half-written position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyEntity {
    /// Opaque unique identifier.
    pub id: String,
    /// Current position.
    pub location: GeoPoint,
    /// Optional availability flags. Entities without flags are always eligible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<Availability>,
}

impl SupplyEntity {
    /// Create an entity with no availability flags.
    pub fn new(id: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id: id.into(),
            location,
            availability: None,
        }
    }

    /// Create an entity with explicit availability flags.
    pub fn with_availability(
        id: impl Into<String>,
        location: GeoPoint,
        availability: Availability,
    ) -> Self {
        Self {
            id: id.into(),
            location,
            availability: Some(availability),
        }
    }

    /// Whether this entity may take part in matching.
    #[inline]
    pub fn is_eligible(&self) -> bool {
        self.availability.map_or(true, |a| a.is_eligible())
    }
}

/// An entity together with its distance from the query centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub entity: SupplyEntity,
    /// Great-circle distance, in the unit of the sphere radius used.
    pub distance: f64,
}

/// Configuration for proximity queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// Radius of the sphere. Sets the distance unit for everything else.
    /// Default: 6371.01 (Earth, kilometres)
    pub sphere_radius: f64,

    /// First radius tried by the expanding search.
    /// Default: 10.0
    pub min_search_distance: f64,

    /// Upper bound for the expanding search; radii above it are never tried.
    /// Default: 15000.0
    pub max_search_distance: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            sphere_radius: geo_utils::EARTH_RADIUS_KM,
            min_search_distance: 10.0,
            max_search_distance: 15_000.0,
        }
    }
}

impl SearchConfig {
    pub fn with_sphere_radius(mut self, radius: f64) -> Self {
        self.sphere_radius = radius;
        self
    }

    pub fn with_search_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_search_distance = min;
        self.max_search_distance = max;
        self
    }

    /// Parse a config from JSON; missing fields fall back to defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SupplyMatchError::InvalidConfig {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the config can drive a terminating expanding search.
    pub fn validate(&self) -> Result<()> {
        geo_utils::validate_sphere_radius(self.sphere_radius)?;

        if !(self.min_search_distance.is_finite() && self.min_search_distance > 0.0) {
            return Err(SupplyMatchError::InvalidConfig {
                reason: format!(
                    "min search distance must be finite and > 0, got {}",
                    self.min_search_distance
                ),
            });
        }
        if !self.max_search_distance.is_finite()
            || self.max_search_distance < self.min_search_distance
        {
            return Err(SupplyMatchError::InvalidConfig {
                reason: format!(
                    "max search distance {} must be finite and >= min search distance {}",
                    self.max_search_distance, self.min_search_distance
                ),
            });
        }
        Ok(())
    }
}
