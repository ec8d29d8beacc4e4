//! Check command implementation
//!
//! Validates the resolved configuration and prints, per trait, the bounds and
//! the skewed normal parameters derived from them.

use flock_core::sampling::{Bounds, SkewParams};
use flock_core::settings::{SettingsError, TraitKind, TraitSettingsTable};
use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    info!("Checking configuration...");
    config.validate()?;

    println!(
        "population = {}, max_attempts = {}, on_exhaustion = {}, parallel = {}, seed = {}",
        config.population,
        config.max_attempts,
        config.on_exhaustion,
        config.parallel,
        config
            .seed
            .map_or_else(|| "entropy".to_string(), |s| s.to_string())
    );
    println!();
    print!("{}", render(&derived(&config.traits)?));

    info!("Configuration OK");
    Ok(())
}

/// Bounds and derived parameters for every trait, in table order.
pub(crate) fn derived(
    table: &TraitSettingsTable,
) -> std::result::Result<Vec<(TraitKind, Bounds, SkewParams)>, SettingsError> {
    table
        .iter()
        .map(|(kind, bounds)| {
            bounds
                .derive()
                .map(|params| (kind, *bounds, params))
                .map_err(|source| SettingsError::Invalid {
                    trait_name: kind.name(),
                    source,
                })
        })
        .collect()
}

fn render(rows: &[(TraitKind, Bounds, SkewParams)]) -> String {
    let mut out = format!(
        "{:<18} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}\n",
        "trait", "min", "nominal", "max", "mean", "sd", "skew"
    );
    for (kind, bounds, params) in rows {
        out.push_str(&format!(
            "{:<18} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10.4}\n",
            kind.name(),
            bounds.min,
            bounds.nominal,
            bounds.max,
            params.mean(),
            params.sd(),
            params.skew()
        ));
    }
    out
}
