//! Synthetic supply fleets for benchmarking and the debug CLI.
//!
//! Generates a seeded, reproducible fleet scattered around an origin, with a
//! configurable share of entities that are busy or not accepting work.
//!
//! Feature-gated behind `synthetic`; not included in production builds.
//!
//! # Example
//!
//! ```rust
//! use supplymatch::GeoPoint;
//! use supplymatch::synthetic::FleetScenario;
//!
//! let scenario = FleetScenario {
//!     origin: GeoPoint::from_degrees(47.37, 8.55),
//!     entity_count: 500,
//!     spread: 25.0,
//!     unavailable_fraction: 0.2,
//!     sphere_radius: supplymatch::geo_utils::EARTH_RADIUS_KM,
//!     seed: 42,
//! };
//!
//! let fleet = scenario.generate();
//! assert_eq!(fleet.len(), 500);
//! ```

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geo_utils::EARTH_RADIUS_KM;
use crate::{Availability, GeoPoint, SupplyEntity};

// ============================================================================
// Types
// ============================================================================

/// Scenario configuration for generating a synthetic fleet.
#[derive(Debug, Clone)]
pub struct FleetScenario {
    /// Centre of the generated fleet.
    pub origin: GeoPoint,
    /// Number of entities to generate.
    pub entity_count: usize,
    /// Maximum great-circle distance from the origin, in sphere radius units.
    pub spread: f64,
    /// Fraction of entities flagged busy or not accepting work (0.0-1.0).
    pub unavailable_fraction: f64,
    /// Radius of the sphere the fleet lives on.
    pub sphere_radius: f64,
    /// RNG seed for deterministic reproduction.
    pub seed: u64,
}

impl Default for FleetScenario {
    fn default() -> Self {
        Self {
            origin: GeoPoint::from_degrees(51.5074, -0.1278),
            entity_count: 1_000,
            spread: 30.0,
            unavailable_fraction: 0.0,
            sphere_radius: EARTH_RADIUS_KM,
            seed: 42,
        }
    }
}

// ============================================================================
// Coordinate Helpers
// ============================================================================

/// Point reached by travelling `angular` radians from `start` on `bearing`.
fn destination(start: &GeoPoint, bearing: f64, angular: f64) -> GeoPoint {
    let lat1 = start.lat_radians();
    let lon1 = start.lon_radians();

    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * angular.sin() * lat1.cos()).atan2(angular.cos() - lat1.sin() * lat2.sin());

    GeoPoint::from_radians(lat2, normalize_longitude(lon2))
}

/// Wrap a longitude in radians into (-PI, PI].
fn normalize_longitude(lon: f64) -> f64 {
    let wrapped = (lon + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}

// ============================================================================
// Generation
// ============================================================================

impl FleetScenario {
    /// Generate the fleet. Ids are `supply-0000`, `supply-0001`, ...
    pub fn generate(&self) -> Vec<SupplyEntity> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let max_angular = (self.spread / self.sphere_radius).min(PI);

        (0..self.entity_count)
            .map(|i| {
                let bearing = rng.gen_range(0.0..2.0 * PI);
                // sqrt keeps density uniform over the disc rather than the radius.
                let angular = max_angular * rng.r#gen::<f64>().sqrt();
                let location = destination(&self.origin, bearing, angular);

                let availability = if rng.r#gen::<f64>() < self.unavailable_fraction {
                    if rng.gen_bool(0.5) {
                        Availability {
                            accepts_work: true,
                            busy: true,
                        }
                    } else {
                        Availability {
                            accepts_work: false,
                            busy: false,
                        }
                    }
                } else {
                    Availability::available()
                };

                SupplyEntity::with_availability(format!("supply-{:04}", i), location, availability)
            })
            .collect()
    }
}
