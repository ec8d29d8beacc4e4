//! Uniform source abstraction and adapters.

use rand::{Rng, RngCore};

/// A source of uniform random values in the half-open interval `[0, 1)`.
///
/// Samplers never reach for an ambient generator; they receive a
/// `&mut impl UniformSource`. A single source is not synchronised, so callers
/// that sample from several threads must give each thread its own instance
/// (see [`FlockRng::derive_stream`](super::FlockRng::derive_stream)).
pub trait UniformSource {
    /// Returns the next uniform value in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

impl<S: UniformSource + ?Sized> UniformSource for Box<S> {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

/// Adapter exposing any [`rand::RngCore`] as a [`UniformSource`].
///
/// # Examples
///
/// ```rust
/// use flock_core::rng::{RandSource, UniformSource};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut source = RandSource::new(StdRng::seed_from_u64(9));
/// let u = source.next_uniform();
/// assert!((0.0..1.0).contains(&u));
/// ```
#[derive(Debug, Clone)]
pub struct RandSource<R> {
    inner: R,
}

impl<R: RngCore> RandSource<R> {
    /// Wraps a `rand` generator.
    #[inline]
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Returns the wrapped generator.
    #[inline]
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: RngCore> UniformSource for RandSource<R> {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.inner.gen()
    }
}

/// Replays a fixed sequence of uniform values, cycling when exhausted.
///
/// Intended for golden-value regression tests where the exact output of a
/// sampler must be reproduced from known draws.
///
/// # Panics
///
/// [`ScriptedUniforms::new`] panics if the script is empty or contains a value
/// outside `[0, 1)`.
///
/// # Examples
///
/// ```rust
/// use flock_core::rng::{ScriptedUniforms, UniformSource};
///
/// let mut source = ScriptedUniforms::new(vec![0.1, 0.9]);
/// assert_eq!(source.next_uniform(), 0.1);
/// assert_eq!(source.next_uniform(), 0.9);
/// assert_eq!(source.next_uniform(), 0.1);
/// assert_eq!(source.draws(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedUniforms {
    values: Vec<f64>,
    cursor: usize,
    draws: usize,
}

impl ScriptedUniforms {
    /// Creates a source replaying `values` in order.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values.into();
        assert!(!values.is_empty(), "scripted sequence must not be empty");
        assert!(
            values.iter().all(|v| (0.0..1.0).contains(v)),
            "scripted values must lie in [0, 1)"
        );
        Self {
            values,
            cursor: 0,
            draws: 0,
        }
    }

    /// Total number of values handed out so far.
    #[inline]
    pub fn draws(&self) -> usize {
        self.draws
    }

    /// Rewinds to the start of the script and clears the draw counter.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.draws = 0;
    }
}

impl UniformSource for ScriptedUniforms {
    fn next_uniform(&mut self) -> f64 {
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        self.draws += 1;
        value
    }
}
