//! End-to-end and property tests for bounded trait sampling.

use flock_core::agent::AgentFactory;
use flock_core::rng::{FlockRng, ScriptedUniforms};
use flock_core::sampling::{
    derive_params, sample_bounded, sample_skewed_normal, standard_normal_pair, Bounds,
    SamplerConfig,
};
use flock_core::settings::{TraitKind, TraitSettingsTable};
use flock_core::stats::SampleSummary;
use flock_core::types::SamplingError;
use proptest::prelude::*;
use std::f64::consts::TAU;

/// Radius-like trait: 10,000 draws, all in range, mode near the nominal value.
#[test]
fn test_radius_scenario() {
    let bounds = Bounds::new(1.0, 1.2, 1.5);
    let mut rng = FlockRng::from_seed(20240601);

    let samples: Vec<f64> = (0..10_000)
        .map(|_| sample_bounded(&mut rng, &bounds).unwrap())
        .collect();

    for &v in &samples {
        assert!((1.0..=1.5).contains(&v), "sample {} escaped [1, 1.5]", v);
    }

    let summary = SampleSummary::from_samples(&samples, 25).unwrap();
    assert!(
        (summary.mode - 1.2).abs() < 0.06,
        "mode {} not near 1.2 (histogram {:?})",
        summary.mode,
        summary.histogram
    );
    assert!(
        (summary.mean - 1.2).abs() < 0.05,
        "mean {} not near 1.2",
        summary.mean
    );
}

#[test]
fn test_pair_moments_over_100k_draws() {
    let mut rng = FlockRng::from_seed(1);
    let mut values = Vec::with_capacity(200_000);
    for _ in 0..100_000 {
        values.extend(standard_normal_pair(&mut rng).to_array());
    }
    let summary = SampleSummary::from_samples(&values, 1).unwrap();
    assert!(summary.mean.abs() < 0.02, "mean {}", summary.mean);
    assert!((summary.variance - 1.0).abs() < 0.03, "variance {}", summary.variance);
}

#[test]
fn test_zero_skew_sampler_moments() {
    let mut rng = FlockRng::from_seed(2);
    let values: Vec<f64> = (0..100_000)
        .map(|_| sample_skewed_normal(&mut rng, -4.0, 2.5, 0.0).unwrap())
        .collect();
    let summary = SampleSummary::from_samples(&values, 1).unwrap();
    assert!((summary.mean + 4.0).abs() < 0.03, "mean {}", summary.mean);
    assert!((summary.std_dev() - 2.5).abs() < 0.03, "sd {}", summary.std_dev());
}

#[test]
fn test_derivation_examples() {
    let params = derive_params(&Bounds::new(-1.0, -1.0, -1.0 + TAU)).unwrap();
    assert!((params.sd() - 1.0).abs() < 1e-12);

    let centred = derive_params(&Bounds::new(2.0, 6.0, 10.0)).unwrap();
    assert_eq!(centred.skew(), 0.0);

    assert!(matches!(
        derive_params(&Bounds::new(5.0, 3.0, 10.0)),
        Err(SamplingError::InvalidBounds { .. })
    ));
    assert!(matches!(
        derive_params(&Bounds::new(3.0, 3.0, 3.0)),
        Err(SamplingError::InvalidBounds { .. })
    ));
}

#[test]
fn test_golden_replay_is_exact() {
    let run = || {
        let mut source = ScriptedUniforms::new(vec![0.5, 0.25, 0.3, 0.9, 0.7, 0.1]);
        let pair = standard_normal_pair(&mut source);
        let skewed = sample_skewed_normal(&mut source, 1.0, 0.2, 0.8).unwrap();
        let bounded = sample_bounded(&mut source, &Bounds::new(0.0, 0.8, 1.0)).unwrap();
        (pair, skewed, bounded)
    };

    let first = run();
    for _ in 0..5 {
        assert_eq!(run(), first);
    }
}

#[test]
fn test_default_flock_stays_in_bounds() {
    let factory =
        AgentFactory::new(TraitSettingsTable::default(), SamplerConfig::default()).unwrap();
    let flock = factory.par_spawn_streams(123, 2_000).unwrap();

    for agent in &flock {
        for (kind, bounds) in factory.table().iter() {
            let v = agent.get(kind);
            assert!(bounds.contains(v), "{} = {} outside {:?}", kind, v, bounds);
        }
    }

    // independent sampling per trait: agents are not clones of each other
    let radii: Vec<f64> = flock.iter().map(|a| a.get(TraitKind::Radius)).collect();
    let summary = SampleSummary::from_samples(&radii, 10).unwrap();
    assert!(summary.std_dev() > 0.01);
}

/// Ranges far from unit scale still sample without NaN and stay in range.
#[test]
fn test_extreme_scale_ranges_sample_in_range() {
    let mut rng = FlockRng::from_seed(110);
    for bounds in [
        Bounds::new(0.0, 0.0, 1e-110),
        Bounds::new(0.0, 0.0, 1e110),
        Bounds::new(-1e110, 1e110, 1e110),
        Bounds::new(1e308, 1.5e308, 1.7e308),
    ] {
        for _ in 0..500 {
            let v = sample_bounded(&mut rng, &bounds).unwrap();
            assert!(bounds.contains(v), "{} outside {:?}", v, bounds);
        }
    }

    let overflow = Bounds::new(-1e308, 0.0, 1e308);
    assert!(matches!(
        sample_bounded(&mut rng, &overflow),
        Err(SamplingError::InvalidBounds { .. })
    ));
}

fn valid_bounds() -> impl Strategy<Value = Bounds> {
    (-1_000.0f64..1_000.0, 1e-3f64..500.0, 0.0f64..=1.0)
        .prop_map(|(min, width, t)| Bounds::new(min, min + t * width, min + width))
        .prop_filter("representable range", |b| b.min < b.max && b.validate().is_ok())
}

/// Widths spanning 1e-300..1e301, with `min` on the same scale as the width.
fn wide_bounds() -> impl Strategy<Value = Bounds> {
    (1.0f64..10.0, -300i32..=300, -10.0f64..10.0, 0.0f64..=1.0)
        .prop_map(|(mantissa, exp, shift, t)| {
            let width = mantissa * 10f64.powi(exp);
            let min = shift * width;
            Bounds::new(min, min + t * width, min + width)
        })
        .prop_filter("representable range", |b| b.min < b.max)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Derivation stays finite and bounded across extreme scales.
    #[test]
    fn prop_wide_scale_derivation(bounds in wide_bounds(), seed in any::<u64>()) {
        let params = derive_params(&bounds).unwrap();
        prop_assert!(params.sd().is_finite() && params.sd() > 0.0);
        prop_assert!(params.skew().is_finite());
        prop_assert!(params.skew().abs() <= std::f64::consts::PI.powi(3) + 1e-9);

        let mut rng = FlockRng::from_seed(seed);
        for _ in 0..20 {
            let v = sample_bounded(&mut rng, &bounds).unwrap();
            prop_assert!(bounds.contains(v), "{} outside {:?}", v, bounds);
        }
    }

    /// Every accepted sample lies in [min, max] for any valid triple.
    #[test]
    fn prop_bounded_always_in_range(bounds in valid_bounds(), seed in any::<u64>()) {
        let mut rng = FlockRng::from_seed(seed);
        for _ in 0..200 {
            let v = sample_bounded(&mut rng, &bounds).unwrap();
            prop_assert!(
                bounds.min <= v && v <= bounds.max,
                "{} outside {:?} (seed={})", v, bounds, seed
            );
        }
    }

    /// Derived sd is always the range over 2 pi and the skew sign follows the offset.
    #[test]
    fn prop_derivation_shape(bounds in valid_bounds()) {
        let params = derive_params(&bounds).unwrap();
        prop_assert!(params.sd() > 0.0);
        let expected_sd = (bounds.max - bounds.min) / TAU;
        prop_assert!((params.sd() - expected_sd).abs() <= 1e-12 * expected_sd.max(1.0));
        let offset = bounds.midpoint() - bounds.nominal;
        prop_assert_eq!(params.skew() > 0.0, offset > 0.0);
        prop_assert!(params.skew().abs() <= std::f64::consts::PI.powi(3) + 1e-9);
    }
}
