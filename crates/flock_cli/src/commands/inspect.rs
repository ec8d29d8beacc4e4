//! Inspect command implementation
//!
//! Samples a single trait repeatedly and prints a summary with a text
//! histogram, to show how the bounds shape the distribution.

use flock_core::agent::AgentFactory;
use flock_core::rng::FlockRng;
use flock_core::settings::TraitKind;
use flock_core::stats::SampleSummary;
use tracing::info;

use super::resolve_seed;
use crate::config::CliConfig;
use crate::{CliError, Result};

const BAR_WIDTH: usize = 50;

/// Run the inspect command
pub fn run(config: &CliConfig, trait_name: &str, samples: usize, bins: usize) -> Result<()> {
    let kind: TraitKind = trait_name.parse()?;
    let seed = resolve_seed(config);

    info!(%kind, samples, bins, "Inspecting trait");
    let summary = summarise(config, kind, samples, seed, bins)?;

    let bounds = config.traits.get(kind);
    println!(
        "{}: min = {}, nominal = {}, max = {}",
        kind, bounds.min, bounds.nominal, bounds.max
    );
    print!("{}", render(&summary));
    Ok(())
}

/// Draws `samples` values of `kind` from `seed` and summarises them.
pub(crate) fn summarise(
    config: &CliConfig,
    kind: TraitKind,
    samples: usize,
    seed: u64,
    bins: usize,
) -> Result<SampleSummary> {
    if samples == 0 {
        return Err(CliError::InvalidArgument(
            "samples must be at least 1".to_string(),
        ));
    }

    let factory = AgentFactory::new(config.traits.clone(), config.sampler_config()?)?;
    let mut rng = FlockRng::from_seed(seed);
    let values = (0..samples)
        .map(|_| factory.sample_trait(&mut rng, kind))
        .collect::<std::result::Result<Vec<f64>, _>>()?;

    SampleSummary::from_samples(&values, bins)
        .ok_or_else(|| CliError::InvalidArgument("no samples drawn".to_string()))
}

pub(crate) fn render(summary: &SampleSummary) -> String {
    let mut out = format!(
        "samples = {}, mean = {:.4}, sd = {:.4}, mode = {:.4}, range = [{:.4}, {:.4}]\n",
        summary.count,
        summary.mean,
        summary.std_dev(),
        summary.mode,
        summary.min,
        summary.max
    );

    let peak = summary.histogram.iter().copied().max().unwrap_or(0).max(1);
    let width = (summary.max - summary.min) / summary.histogram.len() as f64;
    for (i, &count) in summary.histogram.iter().enumerate() {
        let lower = summary.min + width * i as f64;
        let bar = "#".repeat(count * BAR_WIDTH / peak);
        out.push_str(&format!("{:>12.4} | {:<w$} {}\n", lower, bar, count, w = BAR_WIDTH));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use flock_core::sampling::Bounds;

    #[test]
    fn test_summarise_stays_in_bounds() {
        let config = CliConfig::default();
        let summary = summarise(&config, TraitKind::Certainty, 2_000, 4, 10).unwrap();
        assert_eq!(summary.count, 2_000);
        assert!(summary.min >= 0.0 && summary.max <= 1.0);
        assert_eq!(summary.histogram.len(), 10);
    }

    #[test]
    fn test_summarise_is_seeded() {
        let config = CliConfig::default();
        let a = summarise(&config, TraitKind::Speed, 500, 8, 5).unwrap();
        let b = summarise(&config, TraitKind::Speed, 500, 8, 5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_summarise_uses_configured_table() {
        let mut config = CliConfig::default();
        config.traits = config
            .traits
            .with_bounds(TraitKind::Radius, Bounds::new(3.0, 3.5, 4.0))
            .unwrap();
        let summary = summarise(&config, TraitKind::Radius, 1_000, 1, 4).unwrap();
        assert!(summary.min >= 3.0 && summary.max <= 4.0);
        assert!((summary.mean - 3.5).abs() < 0.05);
    }

    #[test]
    fn test_zero_samples_rejected() {
        let config = CliConfig::default();
        assert!(matches!(
            summarise(&config, TraitKind::Radius, 0, 1, 4),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_unknown_trait_rejected() {
        let err = run(&CliConfig::default(), "wingspan", 10, 2).unwrap_err();
        assert!(matches!(err, CliError::Settings(_)));
    }

    #[test]
    fn test_render_has_one_line_per_bin() {
        let summary = SampleSummary::from_samples(&[1.0, 2.0, 2.0, 3.0], 3).unwrap();
        let text = render(&summary);
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with("samples = 4"));
    }
}
