//! # Bounded Non-Uniform Sampling
//!
//! The sampling pipeline, leaf first:
//!
//! 1. [`standard_normal_pair`]: Box-Muller transform, two standard normal
//!    deviates from two uniform draws
//! 2. [`sample_skewed_normal`]: one deviate shaped by mean, standard deviation
//!    and skew
//! 3. [`derive_params`]: `(min, nominal, max)` to `(mean, sd, skew)`
//! 4. [`sample_bounded`]: rejection sampling guaranteeing `min <= v <= max`
//!
//! Callers normally only touch [`Bounds`] and [`sample_bounded`] (or the
//! pre-derived [`BoundedTrait`]); the lower stages are public for testing and
//! for callers that want to supply shape parameters directly.
//!
//! ## Usage Example
//!
//! ```rust
//! use flock_core::rng::FlockRng;
//! use flock_core::sampling::{derive_params, sample_bounded, Bounds};
//!
//! let mut rng = FlockRng::from_seed(1);
//! let fov = Bounds::new(0.0, 80.0, 180.0);
//!
//! let params = derive_params(&fov).unwrap();
//! assert_eq!(params.mean(), 80.0);
//!
//! let value = sample_bounded(&mut rng, &fov).unwrap();
//! assert!(fov.contains(value));
//! ```

mod bounded;
mod bounds;
mod normal;
mod skew;

pub use bounded::{
    sample_bounded, sample_truncated, BoundedSampler, BoundedTrait, ExhaustionPolicy,
    SamplerConfig, DEFAULT_MAX_ATTEMPTS,
};
pub use bounds::{derive_params, Bounds, SPREAD_DIVISOR};
pub use normal::{standard_normal_pair, NormalPair};
pub use skew::{sample_skewed_normal, SkewNormal, SkewParams};
