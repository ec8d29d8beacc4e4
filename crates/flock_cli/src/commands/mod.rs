//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

use flock_core::rng::FlockRng;
use tracing::info;

use crate::config::CliConfig;

pub mod check;
pub mod inspect;
pub mod spawn;

/// The configured root seed, or a fresh one from entropy.
///
/// The chosen seed is logged so any run can be replayed with `--seed`.
pub(crate) fn resolve_seed(config: &CliConfig) -> u64 {
    let seed = config
        .seed
        .unwrap_or_else(|| FlockRng::from_entropy().seed());
    info!(seed, "using root seed");
    seed
}
