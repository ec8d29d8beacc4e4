//! Rejection sampling into a closed range.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use super::bounds::{derive_params, Bounds};
use super::skew::SkewParams;
use crate::rng::UniformSource;
use crate::types::SamplingError;

/// Default cap on draws per bounded sample.
pub const DEFAULT_MAX_ATTEMPTS: usize = 256;

/// What to do when no draw lands in range within the attempt limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExhaustionPolicy {
    /// Return [`SamplingError::SamplingExhausted`].
    #[default]
    Fail,
    /// Clamp the last draw into range and log a warning.
    Clamp,
}

impl FromStr for ExhaustionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail" | "error" => Ok(ExhaustionPolicy::Fail),
            "clamp" => Ok(ExhaustionPolicy::Clamp),
            _ => Err(format!(
                "Invalid exhaustion policy: {}. Must be one of: fail, clamp",
                s
            )),
        }
    }
}

impl fmt::Display for ExhaustionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExhaustionPolicy::Fail => write!(f, "fail"),
            ExhaustionPolicy::Clamp => write!(f, "clamp"),
        }
    }
}

/// Configuration for the bounded rejection loop.
///
/// # Example
///
/// ```
/// use flock_core::sampling::{ExhaustionPolicy, SamplerConfig};
///
/// let config = SamplerConfig::default();
/// assert_eq!(config.max_attempts(), 256);
/// assert_eq!(config.on_exhaustion(), ExhaustionPolicy::Fail);
///
/// let lenient = SamplerConfig::new(64, ExhaustionPolicy::Clamp).unwrap();
/// assert_eq!(lenient.max_attempts(), 64);
///
/// assert!(SamplerConfig::new(0, ExhaustionPolicy::Clamp).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SamplerConfigRepr")]
pub struct SamplerConfig {
    // Always >= 1: every constructor goes through `new`.
    max_attempts: usize,
    on_exhaustion: ExhaustionPolicy,
}

/// Unchecked wire form of [`SamplerConfig`].
#[derive(Deserialize)]
#[serde(default)]
struct SamplerConfigRepr {
    max_attempts: usize,
    on_exhaustion: ExhaustionPolicy,
}

impl Default for SamplerConfigRepr {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            on_exhaustion: ExhaustionPolicy::Fail,
        }
    }
}

impl TryFrom<SamplerConfigRepr> for SamplerConfig {
    type Error = SamplingError;

    fn try_from(repr: SamplerConfigRepr) -> Result<Self, Self::Error> {
        Self::new(repr.max_attempts, repr.on_exhaustion)
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            on_exhaustion: ExhaustionPolicy::Fail,
        }
    }
}

impl SamplerConfig {
    /// Creates a configuration.
    ///
    /// # Errors
    ///
    /// [`SamplingError::InvalidAttemptLimit`] if `max_attempts == 0`.
    pub fn new(
        max_attempts: usize,
        on_exhaustion: ExhaustionPolicy,
    ) -> Result<Self, SamplingError> {
        if max_attempts == 0 {
            return Err(SamplingError::InvalidAttemptLimit { max_attempts });
        }
        Ok(Self {
            max_attempts,
            on_exhaustion,
        })
    }

    /// Maximum number of draws before giving up (at least 1).
    #[inline]
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Behaviour once `max_attempts` draws have all been rejected.
    #[inline]
    pub fn on_exhaustion(&self) -> ExhaustionPolicy {
        self.on_exhaustion
    }
}

/// Draws skewed normal values until one lands inside a range.
///
/// The loop is explicit and capped by [`SamplerConfig::max_attempts`], so a
/// pathological range (tiny, or far from the distribution's effective support)
/// cannot hang the caller. Accepted values have exactly the distribution of
/// the uncapped loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundedSampler {
    config: SamplerConfig,
}

impl BoundedSampler {
    /// Creates a sampler with the given configuration.
    #[inline]
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    /// The sampler's configuration.
    #[inline]
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Samples a value in `[bounds.min, bounds.max]`.
    ///
    /// Parameters are derived once via [`derive_params`], then the skewed
    /// normal is drawn repeatedly until a value falls in range.
    ///
    /// # Errors
    ///
    /// - [`SamplingError::InvalidBounds`] for an unusable triple
    /// - [`SamplingError::SamplingExhausted`] if every attempt was rejected and
    ///   the policy is [`ExhaustionPolicy::Fail`]
    pub fn sample_bounded<S: UniformSource + ?Sized>(
        &self,
        source: &mut S,
        bounds: &Bounds,
    ) -> Result<f64, SamplingError> {
        let params = derive_params(bounds)?;
        self.sample_within(source, &params, bounds.min, bounds.max)
    }

    /// Samples from caller-supplied shape parameters, truncated to `[min, max]`.
    ///
    /// Unlike [`sample_bounded`](Self::sample_bounded) the mean need not lie in
    /// the range and nothing is derived.
    ///
    /// # Errors
    ///
    /// - [`SamplingError::InvalidBounds`] if `min > max` or either limit is not finite
    /// - [`SamplingError::SamplingExhausted`] as for `sample_bounded`
    pub fn sample_truncated<S: UniformSource + ?Sized>(
        &self,
        source: &mut S,
        params: &SkewParams,
        min: f64,
        max: f64,
    ) -> Result<f64, SamplingError> {
        if !(min.is_finite() && max.is_finite()) || min > max {
            return Err(Bounds::new(min, params.mean(), max)
                .invalid("limits must be finite with min <= max"));
        }
        self.sample_within(source, params, min, max)
    }

    fn sample_within<S: UniformSource + ?Sized>(
        &self,
        source: &mut S,
        params: &SkewParams,
        min: f64,
        max: f64,
    ) -> Result<f64, SamplingError> {
        let mut attempt = 0;
        let last = loop {
            let value = params.sample_with(source);
            if min <= value && value <= max {
                return Ok(value);
            }
            attempt += 1;
            trace!(attempt, value, min, max, "rejected out-of-range draw");
            if attempt >= self.config.max_attempts {
                break value;
            }
        };

        match self.config.on_exhaustion {
            ExhaustionPolicy::Fail => Err(SamplingError::SamplingExhausted {
                attempts: self.config.max_attempts,
                min,
                max,
            }),
            ExhaustionPolicy::Clamp => {
                let clamped = last.clamp(min, max);
                warn!(
                    attempts = self.config.max_attempts,
                    last,
                    clamped,
                    min,
                    max,
                    "bounded sampling exhausted, clamping last draw"
                );
                Ok(clamped)
            }
        }
    }
}

/// Samples a value in `[bounds.min, bounds.max]` with the default configuration.
///
/// # Examples
///
/// ```rust
/// use flock_core::rng::FlockRng;
/// use flock_core::sampling::{sample_bounded, Bounds};
///
/// let mut rng = FlockRng::from_seed(10);
/// let bounds = Bounds::new(0.0, 0.8, 1.0);
/// for _ in 0..1000 {
///     let v = sample_bounded(&mut rng, &bounds).unwrap();
///     assert!(bounds.contains(v));
/// }
/// ```
pub fn sample_bounded<S: UniformSource + ?Sized>(
    source: &mut S,
    bounds: &Bounds,
) -> Result<f64, SamplingError> {
    BoundedSampler::default().sample_bounded(source, bounds)
}

/// Samples from explicit shape parameters truncated to `[min, max]` with the
/// default configuration.
pub fn sample_truncated<S: UniformSource + ?Sized>(
    source: &mut S,
    params: &SkewParams,
    min: f64,
    max: f64,
) -> Result<f64, SamplingError> {
    BoundedSampler::default().sample_truncated(source, params, min, max)
}

/// A bounds triple with its parameters derived up front.
///
/// Use this when one trait is sampled many times; derivation and validation
/// happen once in [`BoundedTrait::new`].
///
/// # Examples
///
/// ```rust
/// use flock_core::rng::FlockRng;
/// use flock_core::sampling::{BoundedTrait, Bounds, SamplerConfig};
///
/// let speed = BoundedTrait::new(Bounds::new(0.1, 1.0, 100.0), SamplerConfig::default()).unwrap();
/// let mut rng = FlockRng::from_seed(8);
/// let v = speed.try_sample(&mut rng).unwrap();
/// assert!((0.1..=100.0).contains(&v));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedTrait {
    bounds: Bounds,
    params: SkewParams,
    sampler: BoundedSampler,
}

impl BoundedTrait {
    /// Validates `bounds` and derives its parameters.
    pub fn new(bounds: Bounds, config: SamplerConfig) -> Result<Self, SamplingError> {
        let params = derive_params(&bounds)?;
        Ok(Self {
            bounds,
            params,
            sampler: BoundedSampler::new(config),
        })
    }

    /// The original triple.
    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// The derived parameters.
    #[inline]
    pub fn params(&self) -> &SkewParams {
        &self.params
    }

    /// Draws one in-range value.
    pub fn try_sample<S: UniformSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<f64, SamplingError> {
        self.sampler
            .sample_within(source, &self.params, self.bounds.min, self.bounds.max)
    }
}
