//! Engine error type.
//!
//! Only construction bugs surface here.  Offers escaping the unit interval
//! and negotiations that never converge are ordinary outcomes and are
//! reported by `tom-negotiate` as such.

use thiserror::Error;

/// The top-level error type for `tom-core` and a common base for sub-crates.
#[derive(Debug, Error, PartialEq)]
pub enum TomError {
    #[error("dimension mismatch: expected {expected} entries, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `tom-*` crates.
pub type TomResult<T> = Result<T, TomError>;
