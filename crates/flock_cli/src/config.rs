//! CLI configuration management
//!
//! Handles loading configuration from TOML files, environment variables, and
//! CLI arguments.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use flock_core::sampling::{ExhaustionPolicy, SamplerConfig, DEFAULT_MAX_ATTEMPTS};
use flock_core::settings::{SettingsError, TraitSettingsTable};
use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding the root seed.
pub const ENV_SEED: &str = "FLOCKGEN_SEED";
/// Environment variable overriding the population size.
pub const ENV_POPULATION: &str = "FLOCKGEN_POPULATION";
/// Environment variable overriding the attempt limit.
pub const ENV_MAX_ATTEMPTS: &str = "FLOCKGEN_MAX_ATTEMPTS";
/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "FLOCKGEN_LOG_LEVEL";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid population: {0}. Must be at least 1")]
    InvalidPopulation(usize),

    #[error("Invalid max_attempts: {0}. Must be at least 1")]
    InvalidMaxAttempts(usize),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Trait table error: {0}")]
    Settings(#[from] SettingsError),
}

/// Log levels accepted by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// flockgen configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Root seed; `None` draws one from entropy
    pub seed: Option<u64>,
    /// Number of agents to spawn
    pub population: usize,
    /// Draw limit per bounded sample
    pub max_attempts: usize,
    /// Behaviour when the draw limit is hit
    pub on_exhaustion: ExhaustionPolicy,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Spawn on the rayon pool
    pub parallel: bool,
    /// Trait table; entries given in the file override the defaults
    pub traits: TraitSettingsTable,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            seed: None,
            population: 100,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            on_exhaustion: ExhaustionPolicy::Fail,
            log_level: LogLevel::Info,
            parallel: false,
            traits: TraitSettingsTable::default(),
        }
    }
}

impl CliConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CliConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Overrides fields from variables present in `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup(ENV_SEED) {
            self.seed = Some(parse_var(ENV_SEED, &seed)?);
        }
        if let Some(population) = lookup(ENV_POPULATION) {
            self.population = parse_var(ENV_POPULATION, &population)?;
        }
        if let Some(attempts) = lookup(ENV_MAX_ATTEMPTS) {
            self.max_attempts = parse_var(ENV_MAX_ATTEMPTS, &attempts)?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population == 0 {
            return Err(ConfigError::InvalidPopulation(self.population));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::InvalidMaxAttempts(self.max_attempts));
        }
        self.traits.validate()?;
        Ok(())
    }

    /// Sampler settings for the core library
    pub fn sampler_config(&self) -> Result<SamplerConfig, ConfigError> {
        SamplerConfig::new(self.max_attempts, self.on_exhaustion)
            .map_err(|_| ConfigError::InvalidMaxAttempts(self.max_attempts))
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if let Some(population) = cli.population {
            self.population = population;
        }
        if cli.parallel {
            self.parallel = true;
        }
        if cli.verbose && !matches!(self.log_level, LogLevel::Trace | LogLevel::Debug) {
            self.log_level = LogLevel::Debug;
        }
    }
}

fn parse_var<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Seed override
    pub seed: Option<u64>,
    /// Population override
    pub population: Option<usize>,
    /// Force parallel spawning
    pub parallel: bool,
    /// Raise the log level to debug
    pub verbose: bool,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    build_config_with(cli, |name| std::env::var(name).ok())
}

/// [`build_config`] with an explicit environment lookup
pub fn build_config_with<F>(cli: &CliArgs, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = if let Some(config_path) = &cli.config_file {
        CliConfig::from_file(config_path)?
    } else {
        CliConfig::default()
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli);

    config.validate()?;

    Ok(config)
}
