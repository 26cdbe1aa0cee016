// =============================================================================
// Error types
// =============================================================================

use thiserror::Error;

/// Result alias used by every library operation.
pub type Result<T> = std::result::Result<T, SignalError>;

/// Deterministic failures of the signal computations.
///
/// Nothing here is retryable: the same input always fails the same way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    /// Not enough observations for the requested computation.
    #[error("insufficient data: need at least {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// The series has no observations at all.
    #[error("empty price series")]
    EmptySeries,

    /// Index and values have different lengths.
    #[error("index has {index} labels but {values} values were supplied")]
    LengthMismatch { index: usize, values: usize },

    /// The index is not strictly increasing at `position`.
    #[error("index is not strictly increasing at position {position}")]
    NonIncreasingIndex { position: usize },

    /// A window parameter is zero or inconsistent with its sibling.
    #[error("invalid window `{name}` = {value}")]
    InvalidWindow { name: &'static str, value: usize },

    /// Blend weight outside [0, 1].
    #[error("blend weight {0} is outside [0, 1]")]
    InvalidBlendWeight(f64),

    /// A price that cannot be log-transformed (strict mode only).
    #[error("non-positive or non-finite price {value} at position {position}")]
    NonPositivePrice { position: usize, value: f64 },
}
