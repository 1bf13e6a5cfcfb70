//! # Supply Location Engine
//!
//! The four operations a transport layer needs, on top of a shared
//! [`SupplyRegistry`]:
//! - `update_entity` - insert or replace an entity's position
//! - `get_entity_location` - point lookup
//! - `find_closest` - nearest eligible entity
//! - `find_within_radius` - expanding radius search with configured bounds
//!
//! All coordinates crossing this boundary are [`GeoPoint`]s validated in
//! degrees; distances are in the unit of [`SearchConfig::sphere_radius`].
//! Every call is synchronous and runs a full scan; any number of calls may
//! run concurrently from different threads.

pub mod supply_store;

pub use supply_store::SupplyRegistry;

use std::sync::Arc;

use log::{debug, warn};

use crate::error::Result;
use crate::expanding::{ExpandingSearchOutcome, find_within_expanding_radius};
use crate::search;
use crate::{Availability, GeoPoint, SearchConfig, SearchResult, SupplyEntity};

/// Facade over a supply registry and a fixed search configuration.
///
/// The registry is injected rather than global, so several engines can share
/// one registry and tests can build isolated ones.
#[derive(Debug, Clone)]
pub struct SupplyLocationEngine {
    registry: Arc<SupplyRegistry>,
    config: SearchConfig,
}

impl SupplyLocationEngine {
    /// Create an engine with a fresh, empty registry.
    pub fn new(config: SearchConfig) -> Result<Self> {
        Self::with_registry(Arc::new(SupplyRegistry::new()), config)
    }

    /// Create an engine over an existing registry.
    pub fn with_registry(registry: Arc<SupplyRegistry>, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    pub fn registry(&self) -> &Arc<SupplyRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Get the number of registered entities.
    pub fn entity_count(&self) -> usize {
        self.registry.len()
    }

    // ========================================================================
    // Updates and lookups
    // ========================================================================

    /// Insert or overwrite the entity `id` at `location`.
    ///
    /// The previous entity, flags included, is replaced wholesale.
    pub fn update_entity(
        &self,
        id: impl Into<String>,
        location: GeoPoint,
        availability: Option<Availability>,
    ) -> Result<()> {
        let id = id.into();
        let location = location.validated().inspect_err(|e| {
            warn!("rejected update for {}: {}", id, e);
        })?;

        self.registry.upsert(SupplyEntity {
            id,
            location,
            availability,
        });
        Ok(())
    }

    /// Insert or overwrite a fully built entity.
    pub fn upsert_entity(&self, entity: SupplyEntity) -> Result<()> {
        self.update_entity(entity.id, entity.location, entity.availability)
    }

    /// Current location of `id`, or `None` if it was never registered.
    pub fn get_entity_location(&self, id: &str) -> Option<GeoPoint> {
        self.registry.get(id).map(|entity| entity.location)
    }

    /// Current entity registered under `id`.
    pub fn get_entity(&self, id: &str) -> Option<Arc<SupplyEntity>> {
        self.registry.get(id)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Nearest eligible entity to `center`, or `None` if there is none.
    pub fn find_closest(&self, center: GeoPoint) -> Result<Option<SearchResult>> {
        let center = center.validated()?;
        search::find_closest(self.registry.scan(), &center, self.config.sphere_radius)
    }

    /// All eligible entities within `distance` of `center`, no expansion.
    pub fn find_within_distance(
        &self,
        center: GeoPoint,
        distance: f64,
    ) -> Result<Vec<SearchResult>> {
        let center = center.validated()?;
        search::find_within_distance(
            self.registry.scan(),
            &center,
            distance,
            self.config.sphere_radius,
        )
    }

    /// Entities found by the expanding radius search around `center`.
    ///
    /// Empty when nothing lies within the configured maximum distance.
    pub fn find_within_radius(&self, center: GeoPoint) -> Result<Vec<SearchResult>> {
        Ok(self.find_within_radius_detailed(center)?.results)
    }

    /// Like [`find_within_radius`](Self::find_within_radius), also reporting
    /// the radius reached and the number of scans.
    pub fn find_within_radius_detailed(&self, center: GeoPoint) -> Result<ExpandingSearchOutcome> {
        let center = center.validated()?;
        let outcome =
            find_within_expanding_radius(|| self.registry.scan(), &center, &self.config)?;
        debug!(
            "find_within_radius ({}, {}): {} results over {} registered",
            center.lat_degrees(),
            center.lon_degrees(),
            outcome.results.len(),
            self.registry.len()
        );
        Ok(outcome)
    }

    /// Nearest eligible entity, scanning a snapshot in parallel.
    #[cfg(feature = "parallel")]
    pub fn find_closest_parallel(&self, center: GeoPoint) -> Result<Option<SearchResult>> {
        let center = center.validated()?;
        let snapshot = self.registry.snapshot();
        search::find_closest_parallel(&snapshot, &center, self.config.sphere_radius)
    }
}
