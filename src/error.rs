//! Error type for the few table operations that can fail.

use thiserror::Error;

/// Failures surfaced by [`HashTbl`](crate::HashTbl).
///
/// Missing keys on `retrieve`, `count` or `erase` are ordinary outcomes
/// reported through their return values; only the checked accessors
/// (`at`, `at_ref`) turn a miss into an error.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TableError {
    #[error("key not found")]
    KeyNotFound,
    #[error("invalid max load factor {0}: must be finite and at least 0.01")]
    InvalidLoadFactor(f32),
}

/// Smallest accepted growth threshold: at most 100 buckets per entry.
pub const MIN_MAX_LOAD_FACTOR: f32 = 0.01;

/// Validates a load-factor threshold.
pub(crate) fn check_load_factor(mlf: f32) -> Result<f32, TableError> {
    if mlf.is_finite() && mlf >= MIN_MAX_LOAD_FACTOR {
        Ok(mlf)
    } else {
        Err(TableError::InvalidLoadFactor(mlf))
    }
}
