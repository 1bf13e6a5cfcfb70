//! Unified error handling for proximity search.
//!
//! Every fallible operation in the crate returns [`Result`], so callers can
//! propagate with `?` and match on a single [`SupplyMatchError`] type.

use thiserror::Error;

/// Errors produced by the proximity search core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SupplyMatchError {
    /// A search distance was negative or not a finite number.
    #[error("invalid search distance {distance}: must be finite and >= 0")]
    InvalidDistance { distance: f64 },

    /// A sphere radius was zero, negative or not a finite number.
    #[error("invalid sphere radius {radius}: must be finite and > 0")]
    InvalidSphereRadius { radius: f64 },

    /// A coordinate fell outside latitude [-90, 90] / longitude (-180, 180].
    #[error("invalid coordinate ({latitude}, {longitude}) in degrees")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// A search configuration could not drive a search.
    #[error("invalid search config: {reason}")]
    InvalidConfig { reason: String },

    /// No supply entity is registered under the identifier.
    #[error("supply entity {id} not found")]
    NotFound { id: String },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SupplyMatchError>;

/// Converts absent lookups into [`SupplyMatchError::NotFound`].
///
/// Registry lookups return `Option` so an unknown id is never confused with a
/// real entity; this is for callers that would rather bail with `?`.
pub trait OptionExt<T> {
    fn ok_or_not_found(self, id: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, id: &str) -> Result<T> {
        self.ok_or_else(|| SupplyMatchError::NotFound { id: id.to_string() })
    }
}
