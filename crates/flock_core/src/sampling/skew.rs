//! Skew-adjustable normal sampling.

use rand::Rng;
use rand_distr::Distribution;

use super::normal::standard_normal_pair;
use crate::rng::{RandSource, UniformSource};
use crate::types::SamplingError;

/// Shape of one skewed normal distribution.
///
/// Immutable once constructed; [`SkewParams::new`] guarantees `sd > 0` and
/// that all three values are finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkewParams {
    mean: f64,
    sd: f64,
    skew: f64,
}

impl SkewParams {
    /// Validates and builds a parameter set.
    ///
    /// # Errors
    ///
    /// [`SamplingError::InvalidShapeParameters`] if `sd <= 0` or any value is
    /// NaN or infinite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flock_core::sampling::SkewParams;
    ///
    /// assert!(SkewParams::new(0.0, 1.0, 0.5).is_ok());
    /// assert!(SkewParams::new(0.0, 0.0, 0.5).is_err());
    /// ```
    pub fn new(mean: f64, sd: f64, skew: f64) -> Result<Self, SamplingError> {
        let finite = mean.is_finite() && sd.is_finite() && skew.is_finite();
        if !finite || sd <= 0.0 {
            return Err(SamplingError::InvalidShapeParameters { mean, sd, skew });
        }
        Ok(Self { mean, sd, skew })
    }

    /// Location of the distribution.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Scale of the distribution.
    #[inline]
    pub fn sd(&self) -> f64 {
        self.sd
    }

    /// Skew parameter; `0` gives a plain normal.
    #[inline]
    pub fn skew(&self) -> f64 {
        self.skew
    }

    /// Correlation coefficient `skew / sqrt(1 + skew^2)`, always in `(-1, 1)`.
    #[inline]
    pub fn correlation(&self) -> f64 {
        self.skew / (1.0 + self.skew * self.skew).sqrt()
    }

    /// Draws one value from the distribution.
    ///
    /// With zero skew this is `mean + sd * z0` and the second deviate of the
    /// pair is discarded. Otherwise the pair is correlated with
    /// [`correlation`](Self::correlation) and the result is mirrored about the
    /// mean whenever `z0 < 0`, which stretches the density towards one side.
    pub fn sample_with<S: UniformSource + ?Sized>(&self, source: &mut S) -> f64 {
        let pair = standard_normal_pair(source);
        let (z0, z1) = (pair.first, pair.second);

        if self.skew == 0.0 {
            return self.mean + self.sd * z0;
        }

        let coeff = self.correlation();
        let correlated = coeff * z0 + (1.0 - coeff * coeff).sqrt() * z1;

        if z0 >= 0.0 {
            self.mean + self.sd * correlated
        } else {
            self.mean - self.sd * correlated
        }
    }
}

/// Draws one skewed normal deviate.
///
/// # Errors
///
/// [`SamplingError::InvalidShapeParameters`] if `sd <= 0` or any argument is
/// not finite.
///
/// # Examples
///
/// ```rust
/// use flock_core::rng::FlockRng;
/// use flock_core::sampling::sample_skewed_normal;
///
/// let mut rng = FlockRng::from_seed(3);
/// let x = sample_skewed_normal(&mut rng, 10.0, 2.0, 1.5).unwrap();
/// assert!(x.is_finite());
///
/// assert!(sample_skewed_normal(&mut rng, 10.0, -2.0, 0.0).is_err());
/// ```
pub fn sample_skewed_normal<S: UniformSource + ?Sized>(
    source: &mut S,
    mean: f64,
    sd: f64,
    skew: f64,
) -> Result<f64, SamplingError> {
    let params = SkewParams::new(mean, sd, skew)?;
    Ok(params.sample_with(source))
}

/// Skewed normal distribution usable with any `rand` generator.
///
/// # Examples
///
/// ```rust
/// use flock_core::sampling::SkewNormal;
/// use rand::rngs::StdRng;
/// use rand::{Rng, SeedableRng};
///
/// let dist = SkewNormal::new(5.0, 0.5, -1.0).unwrap();
/// let mut rng = StdRng::seed_from_u64(11);
/// let x: f64 = rng.sample(&dist);
/// assert!(x.is_finite());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkewNormal {
    params: SkewParams,
}

impl SkewNormal {
    /// Builds the distribution, validating the shape.
    pub fn new(mean: f64, sd: f64, skew: f64) -> Result<Self, SamplingError> {
        Ok(Self::from_params(SkewParams::new(mean, sd, skew)?))
    }

    /// Wraps already validated parameters.
    #[inline]
    pub fn from_params(params: SkewParams) -> Self {
        Self { params }
    }

    /// The distribution's parameters.
    #[inline]
    pub fn params(&self) -> &SkewParams {
        &self.params
    }
}

impl Distribution<f64> for SkewNormal {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.params.sample_with(&mut RandSource::new(rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{FlockRng, ScriptedUniforms};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::TAU;

    fn moments(values: &[f64]) -> (f64, f64) {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / n;
        (mean, variance)
    }

    #[test]
    fn test_rejects_non_positive_sd() {
        let mut rng = FlockRng::from_seed(1);
        for sd in [0.0, -1.0, -f64::MIN_POSITIVE] {
            let err = sample_skewed_normal(&mut rng, 0.0, sd, 0.0).unwrap_err();
            assert!(matches!(err, SamplingError::InvalidShapeParameters { .. }));
        }
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(SkewParams::new(f64::NAN, 1.0, 0.0).is_err());
        assert!(SkewParams::new(0.0, f64::INFINITY, 0.0).is_err());
        assert!(SkewParams::new(0.0, 1.0, f64::NEG_INFINITY).is_err());
        assert!(SkewParams::new(0.0, f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_correlation_stays_inside_unit_interval() {
        for skew in [-1e6, -31.0, -1.0, 0.0, 0.25, 1.0, 31.0, 1e6] {
            let params = SkewParams::new(0.0, 1.0, skew).unwrap();
            let coeff = params.correlation();
            assert!(coeff > -1.0 && coeff < 1.0, "coeff {} for skew {}", coeff, skew);
        }
        let unit = SkewParams::new(0.0, 1.0, 1.0).unwrap();
        assert_relative_eq!(unit.correlation(), std::f64::consts::FRAC_1_SQRT_2);
    }

    #[test]
    fn test_golden_zero_skew() {
        let mut source = ScriptedUniforms::new(vec![0.5, 0.25]);
        let x = sample_skewed_normal(&mut source, 10.0, 2.0, 0.0).unwrap();

        let z0 = (2.0 * 2f64.ln()).sqrt() * (TAU * 0.25).cos();
        assert_eq!(x, 10.0 + 2.0 * z0);
        assert_eq!(source.draws(), 2);
    }

    #[test]
    fn test_golden_skewed_positive_branch() {
        // u1 = 0.125 puts theta at pi/4, so z0 = z1 > 0
        let mut source = ScriptedUniforms::new(vec![0.5, 0.125]);
        let x = sample_skewed_normal(&mut source, 1.0, 0.5, 1.0).unwrap();

        let r = (2.0 * 2f64.ln()).sqrt();
        let theta = TAU * 0.125;
        let (z0, z1) = (r * theta.cos(), r * theta.sin());
        let coeff = 1.0 / 2f64.sqrt();
        let correlated = coeff * z0 + (1.0 - coeff * coeff).sqrt() * z1;
        assert_relative_eq!(x, 1.0 + 0.5 * correlated, epsilon = 1e-12);
    }

    #[test]
    fn test_golden_skewed_negative_branch_mirrors() {
        // u1 = 0.625 puts theta at 5pi/4, so z0 < 0
        let mut source = ScriptedUniforms::new(vec![0.5, 0.625]);
        let x = sample_skewed_normal(&mut source, 1.0, 0.5, 2.0).unwrap();

        let r = (2.0 * 2f64.ln()).sqrt();
        let theta = TAU * 0.625;
        let (z0, z1) = (r * theta.cos(), r * theta.sin());
        assert!(z0 < 0.0);
        let coeff = 2.0 / 5f64.sqrt();
        let correlated = coeff * z0 + (1.0 - coeff * coeff).sqrt() * z1;
        assert_relative_eq!(x, 1.0 - 0.5 * correlated, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_skew_matches_normal_moments() {
        let mut rng = FlockRng::from_seed(2024);
        let values: Vec<f64> = (0..100_000)
            .map(|_| sample_skewed_normal(&mut rng, 3.0, 0.5, 0.0).unwrap())
            .collect();

        let (mean, variance) = moments(&values);
        assert!((mean - 3.0).abs() < 0.01, "mean {}", mean);
        assert!((variance.sqrt() - 0.5).abs() < 0.01, "sd {}", variance.sqrt());
    }

    #[test]
    fn test_skew_sign_sets_direction() {
        let mut rng = FlockRng::from_seed(99);
        let right: Vec<f64> = (0..50_000)
            .map(|_| sample_skewed_normal(&mut rng, 0.0, 1.0, 4.0).unwrap())
            .collect();
        let left: Vec<f64> = (0..50_000)
            .map(|_| sample_skewed_normal(&mut rng, 0.0, 1.0, -4.0).unwrap())
            .collect();

        // E[X] = sd * coeff * sqrt(2 / pi) for this construction
        let expected = (4.0 / 17f64.sqrt()) * (2.0 / std::f64::consts::PI).sqrt();
        let (right_mean, _) = moments(&right);
        let (left_mean, _) = moments(&left);
        assert!((right_mean - expected).abs() < 0.02, "right mean {}", right_mean);
        assert!((left_mean + expected).abs() < 0.02, "left mean {}", left_mean);
    }

    #[test]
    fn test_distribution_impl_matches_source_path() {
        let dist = SkewNormal::new(2.0, 0.3, 0.7).unwrap();
        let mut via_rand = StdRng::seed_from_u64(5);
        let mut via_source = RandSource::new(StdRng::seed_from_u64(5));

        for _ in 0..100 {
            let a: f64 = via_rand.sample(&dist);
            let b = dist.params().sample_with(&mut via_source);
            assert_eq!(a, b);
        }
    }
}
