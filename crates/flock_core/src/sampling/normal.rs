//! Standard normal pairs via the Box-Muller transform.

use std::f64::consts::TAU;

use crate::rng::UniformSource;

/// Two independent standard normal deviates (mean 0, sd 1).
///
/// Either value may be used on its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalPair {
    /// Cosine branch of the transform.
    pub first: f64,
    /// Sine branch of the transform.
    pub second: f64,
}

impl NormalPair {
    /// Returns the pair as `[first, second]`.
    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.first, self.second]
    }
}

/// Draws two independent standard normal deviates.
///
/// Box-Muller transform: with `u0`, `u1` uniform on `(0, 1)`,
/// `r = sqrt(-2 ln u0)` and `theta = 2 pi u1`, the pair
/// `(r cos theta, r sin theta)` is standard normal.
///
/// A uniform draw of exactly `0` is redrawn, as `ln 0` is undefined. Barring
/// such retries exactly two uniforms are consumed per call.
///
/// # Examples
///
/// ```rust
/// use flock_core::rng::ScriptedUniforms;
/// use flock_core::sampling::standard_normal_pair;
///
/// let mut source = ScriptedUniforms::new(vec![0.5, 0.25]);
/// let pair = standard_normal_pair(&mut source);
///
/// // theta = pi/2: all of the magnitude lands on the sine branch
/// assert!(pair.first.abs() < 1e-12);
/// assert!((pair.second - (2.0 * 2f64.ln()).sqrt()).abs() < 1e-12);
/// ```
pub fn standard_normal_pair<S: UniformSource + ?Sized>(source: &mut S) -> NormalPair {
    let u0 = open_unit(source);
    let u1 = open_unit(source);

    let magnitude = (-2.0 * u0.ln()).sqrt();
    let theta = TAU * u1;

    NormalPair {
        first: magnitude * theta.cos(),
        second: magnitude * theta.sin(),
    }
}

/// Draws from `(0, 1)` by rejecting exact zeros.
#[inline]
fn open_unit<S: UniformSource + ?Sized>(source: &mut S) -> f64 {
    loop {
        let u = source.next_uniform();
        if u != 0.0 {
            return u;
        }
    }
}
