//! Shared types.
//!
//! - [`error`]: `SamplingError`

pub mod error;

pub use error::SamplingError;
