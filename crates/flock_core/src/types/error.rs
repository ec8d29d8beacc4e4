//! Error types for structured error handling.
//!
//! This module provides:
//! - `SamplingError`: Errors from parameter derivation and sampling

use thiserror::Error;

/// Sampling errors.
///
/// Every sample is all-or-nothing: an error is returned to the caller
/// immediately and no partial or degraded value is produced.
///
/// # Variants
///
/// - `InvalidBounds`: `(min, nominal, max)` triple cannot describe a distribution
/// - `InvalidShapeParameters`: non-positive or non-finite shape passed to the sampler
/// - `InvalidAttemptLimit`: rejection loop configured with no attempts
/// - `SamplingExhausted`: rejection loop hit its attempt limit
///
/// # Examples
///
/// ```
/// use flock_core::types::SamplingError;
///
/// let err = SamplingError::InvalidShapeParameters { mean: 0.0, sd: -1.0, skew: 0.0 };
/// assert!(format!("{}", err).contains("sd = -1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SamplingError {
    /// Bounds triple is unusable (reversed, zero-width, nominal outside range
    /// or non-finite).
    #[error("Invalid bounds [{min}, {nominal}, {max}]: {reason}")]
    InvalidBounds {
        /// Lower limit
        min: f64,
        /// Typical value
        nominal: f64,
        /// Upper limit
        max: f64,
        /// What is wrong with the triple
        reason: &'static str,
    },

    /// Shape parameters passed directly to the skewed normal sampler are invalid.
    #[error("Invalid shape parameters: mean = {mean}, sd = {sd}, skew = {skew}")]
    InvalidShapeParameters {
        /// Requested mean
        mean: f64,
        /// Requested standard deviation
        sd: f64,
        /// Requested skew
        skew: f64,
    },

    /// Rejection loop configured with a zero attempt limit.
    #[error("Invalid attempt limit: {max_attempts}. Must be at least 1")]
    InvalidAttemptLimit {
        /// Requested limit
        max_attempts: usize,
    },

    /// No draw landed in range within the configured attempt limit.
    #[error("Sampling exhausted after {attempts} attempts without a value in [{min}, {max}]")]
    SamplingExhausted {
        /// Number of draws made
        attempts: usize,
        /// Lower limit
        min: f64,
        /// Upper limit
        max: f64,
    },
}

impl SamplingError {
    /// Whether the error reflects bad configuration rather than bad luck.
    ///
    /// Only [`SamplingError::SamplingExhausted`] can succeed on a retry with a
    /// different source.
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, SamplingError::SamplingExhausted { .. })
    }
}
