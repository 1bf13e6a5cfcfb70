//! Proximity search over a full scan of supply entities.
//!
//! Two queries are provided:
//! - [`find_closest`]: nearest eligible entity to a centre
//! - [`find_within_distance`]: every eligible entity within a distance
//!
//! Both consume any finite sequence of entities (owned, borrowed or `Arc`),
//! typically a fresh [`SupplyRegistry::scan`](crate::SupplyRegistry::scan).
//! The work is O(N) per query; the radius filter prunes with a
//! [`BoundingBox`] before paying for the exact great-circle distance.
//!
//! Ordering: results follow scan order. Ties on equal minimum distance go to
//! the first entity seen, so which one wins can change as the registry is
//! mutated.

use std::borrow::Borrow;

use log::debug;

use crate::bounds::BoundingBox;
use crate::error::Result;
use crate::geo_utils::validate_sphere_radius;
use crate::{GeoPoint, SearchResult, SupplyEntity};

/// Box test followed by exact distance test for a single entity.
///
/// Returns the exact distance when `entity` lies within `distance` of
/// `center`, `None` otherwise. Eligibility is not considered here.
///
/// `sphere_radius` must already be validated; this runs once per entity.
#[inline]
pub fn evaluate_candidate(
    bbox: &BoundingBox,
    center: &GeoPoint,
    entity: &SupplyEntity,
    distance: f64,
    sphere_radius: f64,
) -> Option<f64> {
    if !bbox.contains(&entity.location) {
        return None;
    }
    let exact = center.central_angle(&entity.location) * sphere_radius;
    (exact <= distance).then_some(exact)
}

/// Find the eligible entity nearest to `center`.
///
/// Returns `Ok(None)` when there is no eligible entity at all. An
/// out-of-range `center` is rejected before the scan starts.
///
/// # Example
/// ```
/// use supplymatch::{GeoPoint, SupplyEntity, find_closest};
/// use supplymatch::geo_utils::EARTH_RADIUS_KM;
///
/// let fleet = vec![
///     SupplyEntity::new("a", GeoPoint::from_degrees(0.0, 0.0)),
///     SupplyEntity::new("b", GeoPoint::from_degrees(0.0, 1.0)),
/// ];
/// let hit = find_closest(&fleet, &GeoPoint::from_degrees(0.0, 0.9), EARTH_RADIUS_KM)
///     .unwrap()
///     .unwrap();
/// assert_eq!(hit.entity.id, "b");
/// ```
pub fn find_closest<I, E>(
    entities: I,
    center: &GeoPoint,
    sphere_radius: f64,
) -> Result<Option<SearchResult>>
where
    I: IntoIterator<Item = E>,
    E: Borrow<SupplyEntity>,
{
    let center = center.validated()?;
    validate_sphere_radius(sphere_radius)?;

    let mut best: Option<(E, f64)> = None;
    let mut scanned = 0usize;

    for item in entities {
        scanned += 1;
        let entity: &SupplyEntity = item.borrow();
        if !entity.is_eligible() {
            continue;
        }

        // Central angle is monotonic in distance, so compare before scaling.
        let angle = center.central_angle(&entity.location);
        if best.as_ref().map_or(true, |(_, best_angle)| angle < *best_angle) {
            best = Some((item, angle));
        }
    }

    let result = best.map(|(item, angle)| SearchResult {
        entity: Borrow::<SupplyEntity>::borrow(&item).clone(),
        distance: angle * sphere_radius,
    });

    debug!(
        "find_closest: scanned {} entities, found {:?}",
        scanned,
        result.as_ref().map(|r| (&r.entity.id, r.distance))
    );

    Ok(result)
}

/// Find every eligible entity within `distance` of `center`.
///
/// Results are in scan order. An empty vector means nothing matched, not an
/// error. An out-of-range `center` is rejected before the scan starts.
pub fn find_within_distance<I, E>(
    entities: I,
    center: &GeoPoint,
    distance: f64,
    sphere_radius: f64,
) -> Result<Vec<SearchResult>>
where
    I: IntoIterator<Item = E>,
    E: Borrow<SupplyEntity>,
{
    let center = &center.validated()?;
    let bbox = BoundingBox::around(center, distance, sphere_radius)?;

    let mut results = Vec::new();
    let mut scanned = 0usize;

    for item in entities {
        scanned += 1;
        let entity: &SupplyEntity = item.borrow();
        if !entity.is_eligible() {
            continue;
        }
        if let Some(exact) = evaluate_candidate(&bbox, center, entity, distance, sphere_radius) {
            results.push(SearchResult {
                entity: entity.clone(),
                distance: exact,
            });
        }
    }

    debug!(
        "find_within_distance: radius {}, scanned {}, accepted {} (wraps antimeridian: {})",
        distance,
        scanned,
        results.len(),
        bbox.wraps_antimeridian()
    );

    Ok(results)
}

/// Parallel [`find_closest`] over a slice.
///
/// Tie-breaking between equally distant entities is unspecified.
#[cfg(feature = "parallel")]
pub fn find_closest_parallel<E>(
    entities: &[E],
    center: &GeoPoint,
    sphere_radius: f64,
) -> Result<Option<SearchResult>>
where
    E: Borrow<SupplyEntity> + Sync,
{
    use rayon::prelude::*;

    let center = center.validated()?;
    validate_sphere_radius(sphere_radius)?;

    let best = entities
        .par_iter()
        .map(Borrow::<SupplyEntity>::borrow)
        .filter(|entity| entity.is_eligible())
        .map(|entity| (entity, center.central_angle(&entity.location)))
        .min_by(|a, b| a.1.total_cmp(&b.1));

    Ok(best.map(|(entity, angle)| SearchResult {
        entity: entity.clone(),
        distance: angle * sphere_radius,
    }))
}

/// Parallel [`find_within_distance`] over a slice. Results keep slice order.
#[cfg(feature = "parallel")]
pub fn find_within_distance_parallel<E>(
    entities: &[E],
    center: &GeoPoint,
    distance: f64,
    sphere_radius: f64,
) -> Result<Vec<SearchResult>>
where
    E: Borrow<SupplyEntity> + Sync,
{
    use rayon::prelude::*;

    let center = &center.validated()?;
    let bbox = BoundingBox::around(center, distance, sphere_radius)?;

    Ok(entities
        .par_iter()
        .map(Borrow::<SupplyEntity>::borrow)
        .filter(|entity| entity.is_eligible())
        .filter_map(|entity| {
            evaluate_candidate(&bbox, center, entity, distance, sphere_radius).map(|exact| {
                SearchResult {
                    entity: entity.clone(),
                    distance: exact,
                }
            })
        })
        .collect())
}
