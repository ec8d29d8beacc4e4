//! Bounds triples and derivation of skewed normal parameters from them.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::skew::SkewParams;
use crate::types::SamplingError;

/// Divisor applied to the range width to obtain the standard deviation.
///
/// `sd = (max - min) / 2pi` keeps most of the unbounded distribution's mass
/// inside `[min, max]` while leaving some density beyond the edges for the
/// rejection step to trim. It is an empirically tuned heuristic and carries no
/// formal coverage guarantee.
pub const SPREAD_DIVISOR: f64 = TAU;

/// A `(min, nominal, max)` specification for one trait.
///
/// `nominal` is the intended typical value. A valid triple satisfies
/// `min <= nominal <= max` and `min < max`; validity is checked by
/// [`Bounds::validate`] and by every operation that consumes the triple.
///
/// In configuration files a triple may be written either as a table
/// (`{ min = 1.0, nominal = 1.2, max = 1.5 }`) or as a three-element array
/// (`[1.0, 1.2, 1.5]`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "BoundsRepr")]
pub struct Bounds {
    /// Smallest value a sample may take.
    pub min: f64,
    /// Typical value the samples cluster around.
    pub nominal: f64,
    /// Largest value a sample may take.
    pub max: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoundsRepr {
    Table { min: f64, nominal: f64, max: f64 },
    Triple([f64; 3]),
}

impl From<BoundsRepr> for Bounds {
    fn from(repr: BoundsRepr) -> Self {
        match repr {
            BoundsRepr::Table { min, nominal, max } => Bounds::new(min, nominal, max),
            BoundsRepr::Triple([min, nominal, max]) => Bounds::new(min, nominal, max),
        }
    }
}

impl Bounds {
    /// Creates a triple without validating it.
    #[inline]
    pub const fn new(min: f64, nominal: f64, max: f64) -> Self {
        Self { min, nominal, max }
    }

    /// Checks the triple describes a usable range.
    ///
    /// # Errors
    ///
    /// [`SamplingError::InvalidBounds`] when any value is not finite, when
    /// `min >= max`, when the width overflows or is too small to give a
    /// non-zero spread, or when `nominal` lies outside the range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flock_core::sampling::Bounds;
    ///
    /// assert!(Bounds::new(0.0, 0.8, 1.0).validate().is_ok());
    /// assert!(Bounds::new(5.0, 3.0, 10.0).validate().is_err());
    /// assert!(Bounds::new(3.0, 3.0, 3.0).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), SamplingError> {
        let reason = if !(self.min.is_finite() && self.nominal.is_finite() && self.max.is_finite())
        {
            Some("values must be finite")
        } else if self.min > self.max {
            Some("min exceeds max")
        } else if self.min == self.max {
            Some("zero-width range")
        } else if !self.width().is_finite() {
            Some("range width overflows")
        } else if self.width() / SPREAD_DIVISOR == 0.0 {
            Some("range too narrow to sample")
        } else if self.nominal < self.min || self.nominal > self.max {
            Some("nominal lies outside [min, max]")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(self.invalid(reason)),
            None => Ok(()),
        }
    }

    /// Whether `value` lies in the closed range `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Midpoint of the range (the median of a symmetric distribution over it).
    #[inline]
    pub fn midpoint(&self) -> f64 {
        // halves first so that min + max cannot overflow
        self.min / 2.0 + self.max / 2.0
    }

    /// Width of the range.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Shorthand for [`derive_params`].
    #[inline]
    pub fn derive(&self) -> Result<SkewParams, SamplingError> {
        derive_params(self)
    }

    pub(crate) fn invalid(&self, reason: &'static str) -> SamplingError {
        SamplingError::InvalidBounds {
            min: self.min,
            nominal: self.nominal,
            max: self.max,
            reason,
        }
    }
}

/// Derives `(mean, sd, skew)` from a bounds triple.
///
/// - `mean = nominal`
/// - `offset = (min + max) / 2 - mean`
/// - `sd = (max - min) / 2pi` (see [`SPREAD_DIVISOR`])
/// - `skew = offset^3 / sd^3`
///
/// The skew is a Fisher-Pearson-inspired heuristic rather than a sample
/// skewness statistic. Since `|offset| <= (max - min) / 2`, it is bounded by
/// `pi^3` in magnitude.
///
/// # Errors
///
/// [`SamplingError::InvalidBounds`] for any triple rejected by
/// [`Bounds::validate`]; in particular a zero-width range is reported here
/// rather than passing `sd = 0` on to the sampler.
///
/// # Examples
///
/// ```rust
/// use flock_core::sampling::{derive_params, Bounds};
/// use std::f64::consts::TAU;
///
/// let params = derive_params(&Bounds::new(2.0, 2.0 + TAU / 2.0, 2.0 + TAU)).unwrap();
/// assert!((params.sd() - 1.0).abs() < 1e-12);
/// assert_eq!(params.skew(), 0.0);
/// ```
pub fn derive_params(bounds: &Bounds) -> Result<SkewParams, SamplingError> {
    bounds.validate()?;

    let mean = bounds.nominal;
    let offset = bounds.midpoint() - mean;
    let sd = bounds.width() / SPREAD_DIVISOR;
    let skew = (offset / sd).powi(3);

    debug!(
        min = bounds.min,
        nominal = bounds.nominal,
        max = bounds.max,
        sd,
        skew,
        "derived sampling parameters"
    );

    SkewParams::new(mean, sd, skew)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_unit_sd_for_two_pi_range() {
        let a = 3.5;
        let params = derive_params(&Bounds::new(a, a, a + TAU)).unwrap();
        assert_relative_eq!(params.sd(), 1.0, epsilon = 1e-12);
        assert_eq!(params.mean(), a);
    }

    #[test]
    fn test_nominal_at_edge_gives_maximal_skew() {
        // offset = pi * sd, so skew = pi^3
        let params = derive_params(&Bounds::new(0.0, 0.0, TAU)).unwrap();
        assert_relative_eq!(params.skew(), PI.powi(3), epsilon = 1e-9);

        let params = derive_params(&Bounds::new(0.0, TAU, TAU)).unwrap();
        assert_relative_eq!(params.skew(), -PI.powi(3), epsilon = 1e-9);
    }

    #[test]
    fn test_midpoint_nominal_gives_zero_skew() {
        for (min, max) in [(0.0, 1.0), (-3.0, 7.0), (0.1, 100.0), (1e-3, 2e-3)] {
            let bounds = Bounds::new(min, (min + max) / 2.0, max);
            let params = derive_params(&bounds).unwrap();
            assert_eq!(params.skew(), 0.0, "bounds {:?}", bounds);
        }
    }

    #[test]
    fn test_radius_like_parameters() {
        let params = derive_params(&Bounds::new(1.0, 1.2, 1.5)).unwrap();
        let sd = 0.5 / TAU;
        assert_relative_eq!(params.mean(), 1.2);
        assert_relative_eq!(params.sd(), sd, epsilon = 1e-15);
        assert_relative_eq!(params.skew(), (0.05 / sd).powi(3), epsilon = 1e-9);
        assert!(params.skew() > 0.0);
    }

    #[test]
    fn test_nominal_below_min_rejected() {
        let err = derive_params(&Bounds::new(5.0, 3.0, 10.0)).unwrap_err();
        assert_eq!(
            err,
            SamplingError::InvalidBounds {
                min: 5.0,
                nominal: 3.0,
                max: 10.0,
                reason: "nominal lies outside [min, max]",
            }
        );
    }

    #[test]
    fn test_zero_width_rejected() {
        let err = derive_params(&Bounds::new(3.0, 3.0, 3.0)).unwrap_err();
        assert!(matches!(
            err,
            SamplingError::InvalidBounds {
                reason: "zero-width range",
                ..
            }
        ));
    }

    #[test]
    fn test_reversed_and_non_finite_rejected() {
        assert!(Bounds::new(10.0, 5.0, 1.0).validate().is_err());
        assert!(Bounds::new(0.0, 12.0, 10.0).validate().is_err());
        assert!(Bounds::new(f64::NAN, 0.5, 1.0).validate().is_err());
        assert!(Bounds::new(0.0, 0.5, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_extreme_scales_derive_finite_skew() {
        for bounds in [
            Bounds::new(0.0, 0.0, 1e-110),
            Bounds::new(0.0, 0.0, 1e110),
            Bounds::new(-1e-300, -1e-300, 1e-300),
            Bounds::new(1e308, 1.5e308, 1.7e308),
        ] {
            let params = derive_params(&bounds).unwrap();
            assert!(params.skew().is_finite(), "{:?}", bounds);
            assert!(params.skew().abs() <= PI.powi(3) * (1.0 + 1e-12), "{:?}", bounds);
        }

        let tiny = derive_params(&Bounds::new(0.0, 0.0, 1e-110)).unwrap();
        let huge = derive_params(&Bounds::new(0.0, 0.0, 1e110)).unwrap();
        assert_relative_eq!(tiny.skew(), PI.powi(3), epsilon = 1e-9);
        assert_relative_eq!(huge.skew(), PI.powi(3), epsilon = 1e-9);
    }

    #[test]
    fn test_unrepresentable_width_rejected() {
        let overflow = Bounds::new(-1e308, 0.0, 1e308);
        assert!(matches!(
            overflow.validate(),
            Err(SamplingError::InvalidBounds { reason: "range width overflows", .. })
        ));
        assert!(derive_params(&overflow).is_err());

        let subnormal = Bounds::new(0.0, 0.0, 5e-324);
        assert!(matches!(
            derive_params(&subnormal),
            Err(SamplingError::InvalidBounds { reason: "range too narrow to sample", .. })
        ));
    }

    #[test]
    fn test_helpers() {
        let bounds = Bounds::new(0.1, 1.0, 10.0);
        assert!(bounds.contains(0.1));
        assert!(bounds.contains(10.0));
        assert!(!bounds.contains(10.000_001));
        assert_relative_eq!(bounds.midpoint(), 5.05);
        assert_relative_eq!(bounds.width(), 9.9);
        assert_eq!(bounds.derive(), derive_params(&bounds));
    }

    #[test]
    fn test_deserialise_table_and_array_forms() {
        #[derive(Deserialize)]
        struct Doc {
            a: Bounds,
            b: Bounds,
        }

        let doc: Doc = toml::from_str(
            r#"
            a = { min = 1.0, nominal = 1.2, max = 1.5 }
            b = [0, 80, 180]
            "#,
        )
        .unwrap();
        assert_eq!(doc.a, Bounds::new(1.0, 1.2, 1.5));
        assert_eq!(doc.b, Bounds::new(0.0, 80.0, 180.0));
    }

    #[test]
    fn test_serialise_as_table() {
        let json = serde_json::to_string(&Bounds::new(0.0, 0.8, 1.0)).unwrap();
        assert_eq!(json, r#"{"min":0.0,"nominal":0.8,"max":1.0}"#);
    }
}
