//! Spawn command implementation
//!
//! Builds a population from the configured trait table and prints it.

use flock_core::agent::{AgentFactory, AgentTraits};
use flock_core::settings::TraitKind;
use serde::Serialize;
use tracing::info;

use super::resolve_seed;
use crate::config::CliConfig;
use crate::{CliError, Result};

/// JSON document written by `spawn --format json`.
#[derive(Debug, Serialize)]
struct SpawnReport<'a> {
    seed: u64,
    count: usize,
    agents: &'a [AgentTraits],
}

/// Run the spawn command
pub fn run(config: &CliConfig, format: &str) -> Result<()> {
    // Reject the format before doing any work
    if !matches!(format, "table" | "json") {
        return Err(CliError::InvalidArgument(format!(
            "Unknown format: {}. Supported: table, json",
            format
        )));
    }

    let seed = resolve_seed(config);
    let agents = spawn(config, seed)?;

    match format {
        "json" => println!("{}", render_json(seed, &agents)?),
        _ => print!("{}", render_table(&agents)),
    }

    info!(count = agents.len(), "Spawn complete");
    Ok(())
}

/// Spawns `config.population` agents from stream `i` of `seed`.
pub(crate) fn spawn(config: &CliConfig, seed: u64) -> Result<Vec<AgentTraits>> {
    let factory = AgentFactory::new(config.traits.clone(), config.sampler_config()?)?;

    let agents = if config.parallel {
        factory.par_spawn_streams(seed, config.population)?
    } else {
        factory.spawn_streams(seed, config.population)?
    };
    Ok(agents)
}

pub(crate) fn render_json(seed: u64, agents: &[AgentTraits]) -> Result<String> {
    let report = SpawnReport {
        seed,
        count: agents.len(),
        agents,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// One row per agent, one column per trait.
pub(crate) fn render_table(agents: &[AgentTraits]) -> String {
    let widths: Vec<usize> = TraitKind::ALL.iter().map(|k| k.name().len().max(9)).collect();

    let mut out = String::new();
    out.push_str(&format!("{:>6}", "agent"));
    for (kind, width) in TraitKind::ALL.iter().zip(&widths) {
        out.push_str(&format!("  {:>w$}", kind.name(), w = width));
    }
    out.push('\n');

    for (i, agent) in agents.iter().enumerate() {
        out.push_str(&format!("{:>6}", i));
        for (kind, width) in TraitKind::ALL.iter().zip(&widths) {
            out.push_str(&format!("  {:>w$.4}", agent.get(*kind), w = width));
        }
        out.push('\n');
    }
    out
}
