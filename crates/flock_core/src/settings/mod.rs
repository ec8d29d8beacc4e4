//! # Trait Settings
//!
//! Every trait of an agent is described by one [`Bounds`](crate::sampling::Bounds)
//! entry in a [`TraitSettingsTable`]. The table is an explicitly constructed,
//! immutable value handed to whoever creates agents; there is no process-wide
//! settings object.
//!
//! ## Module Structure
//!
//! - [`TraitKind`]: the closed set of agent traits
//! - [`TraitSettingsTable`]: trait to bounds mapping with TOML support
//! - [`SettingsError`]: parse and validation failures

mod error;
mod kind;
mod table;

pub use error::SettingsError;
pub use kind::TraitKind;
pub use table::TraitSettingsTable;
