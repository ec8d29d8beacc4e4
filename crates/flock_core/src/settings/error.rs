//! Settings error types.

use thiserror::Error;

use crate::types::SamplingError;

/// Trait settings table errors.
///
/// # Examples
///
/// ```
/// use flock_core::settings::SettingsError;
///
/// let err = SettingsError::UnknownTrait("wingspan".to_string());
/// assert_eq!(format!("{}", err), "Unknown trait: wingspan");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// Settings document could not be parsed.
    #[error("Failed to parse trait settings: {0}")]
    Parse(String),

    /// A trait name does not match any [`TraitKind`](super::TraitKind).
    #[error("Unknown trait: {0}")]
    UnknownTrait(String),

    /// A trait's bounds are unusable.
    #[error("Invalid settings for trait '{trait_name}': {source}")]
    Invalid {
        /// Name of the offending trait
        trait_name: &'static str,
        /// Underlying validation failure
        source: SamplingError,
    },

    /// Table could not be written out.
    #[error("Failed to serialise trait settings: {0}")]
    Serialise(String),
}
