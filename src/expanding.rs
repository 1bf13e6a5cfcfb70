//! Expanding radius search.
//!
//! Runs [`find_within_distance`] with a geometrically growing radius: start at
//! [`SearchConfig::min_search_distance`] and double until something is found or
//! the radius exceeds [`SearchConfig::max_search_distance`]. Dense areas answer
//! from a small radius; sparse areas widen without ever scanning past the cap.

use std::borrow::Borrow;

use log::debug;

use crate::error::Result;
use crate::search::find_within_distance;
use crate::{GeoPoint, SearchConfig, SearchResult, SupplyEntity};

/// Outcome of an expanding radius search.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandingSearchOutcome {
    /// Matches at the first radius that produced any. Empty if none did.
    pub results: Vec<SearchResult>,
    /// The radius that produced `results`, or `None` if the cap was exceeded.
    pub search_distance: Option<f64>,
    /// Number of radii tried (number of full scans performed).
    pub steps: u32,
}

impl ExpandingSearchOutcome {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Search outward from `center` until a non-empty result set is found.
///
/// Scans are not restartable, so `scan` is called once per radius to obtain a
/// fresh sequence of entities. Radii tried are `min, 2*min, 4*min, ...` while
/// they stay `<= max_search_distance`.
///
/// # Example
/// ```
/// use supplymatch::{GeoPoint, SearchConfig, SupplyEntity, find_within_expanding_radius};
///
/// let fleet = vec![SupplyEntity::new("a", GeoPoint::from_degrees(0.0, 0.3))];
/// let outcome = find_within_expanding_radius(
///     || fleet.iter(),
///     &GeoPoint::from_degrees(0.0, 0.0),
///     &SearchConfig::default(),
/// )
/// .unwrap();
/// // ~33 km away: found at the 40 km step.
/// assert_eq!(outcome.search_distance, Some(40.0));
/// assert_eq!(outcome.steps, 3);
/// ```
pub fn find_within_expanding_radius<F, I, E>(
    mut scan: F,
    center: &GeoPoint,
    config: &SearchConfig,
) -> Result<ExpandingSearchOutcome>
where
    F: FnMut() -> I,
    I: IntoIterator<Item = E>,
    E: Borrow<SupplyEntity>,
{
    config.validate()?;

    let mut current = config.min_search_distance;
    let mut steps = 0u32;

    while current <= config.max_search_distance {
        steps += 1;
        let results = find_within_distance(scan(), center, current, config.sphere_radius)?;
        if !results.is_empty() {
            debug!(
                "expanding search: {} matches at radius {} after {} steps",
                results.len(),
                current,
                steps
            );
            return Ok(ExpandingSearchOutcome {
                results,
                search_distance: Some(current),
                steps,
            });
        }
        current *= 2.0;
    }

    debug!(
        "expanding search: nothing within {} after {} steps",
        config.max_search_distance, steps
    );

    Ok(ExpandingSearchOutcome {
        results: Vec::new(),
        search_distance: None,
        steps,
    })
}
