//! # flock_core: Bounded Trait Sampling for Flocking Agents
//!
//! ## Role
//!
//! flock_core draws the individual, bounded, non-uniform values used to
//! instantiate heterogeneous agents. Every trait of an agent (radius, field of
//! view, speed, ...) is described by a `(min, nominal, max)` triple; values
//! cluster around the nominal value and never leave `[min, max]`.
//!
//! ## Layers
//!
//! - [`rng`]: injectable uniform sources (`UniformSource`, `FlockRng`)
//! - [`sampling`]: Box-Muller pairs, skewed normal, parameter derivation,
//!   bounded rejection sampling
//! - [`settings`]: the immutable trait settings table
//! - [`agent`]: per-agent record assembly and population spawning
//! - [`stats`]: descriptive statistics over sampled batches
//! - [`types`]: error types
//!
//! ## Usage Examples
//!
//! ```rust
//! use flock_core::rng::FlockRng;
//! use flock_core::sampling::{sample_bounded, Bounds};
//!
//! let mut rng = FlockRng::from_seed(7);
//! let radius = Bounds::new(1.0, 1.2, 1.5);
//!
//! let value = sample_bounded(&mut rng, &radius).unwrap();
//! assert!((1.0..=1.5).contains(&value));
//! ```
//!
//! Whole agents are built from a [`settings::TraitSettingsTable`]:
//!
//! ```rust
//! use flock_core::agent::AgentFactory;
//! use flock_core::rng::FlockRng;
//! use flock_core::sampling::SamplerConfig;
//! use flock_core::settings::TraitSettingsTable;
//!
//! let factory = AgentFactory::new(TraitSettingsTable::default(), SamplerConfig::default()).unwrap();
//! let mut rng = FlockRng::from_seed(42);
//! let agent = factory.spawn(&mut rng).unwrap();
//! assert!(agent.radius >= 1.0 && agent.radius <= 1.5);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod agent;
pub mod rng;
pub mod sampling;
pub mod settings;
pub mod stats;
pub mod types;
