//! Agent trait records and population spawning.
//!
//! An agent is created by sampling every [`TraitKind`] once, independently,
//! from its entry in a [`TraitSettingsTable`]. No cross-trait correlation is
//! modelled.
//!
//! Populations can be spawned from a single caller-owned source, or from a
//! root seed where agent `i` draws from stream `i` of that seed. The stream
//! form gives identical output whether it runs sequentially or on the rayon
//! pool, since no source is ever shared between threads.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::rng::{FlockRng, UniformSource};
use crate::sampling::{BoundedTrait, SamplerConfig};
use crate::settings::{SettingsError, TraitKind, TraitSettingsTable};
use crate::types::SamplingError;

/// Sampled traits of one agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentTraits {
    /// Visual radius.
    pub radius: f64,
    /// Field of view in degrees.
    pub field_of_view: f64,
    /// Perception distance.
    pub viewing_distance: f64,
    /// Tendency to follow visible neighbours.
    pub certainty: f64,
    /// Cruising speed.
    pub speed: f64,
    /// Personal-space radius.
    pub inner_bubble: f64,
    /// Attraction radius.
    pub outer_bubble: f64,
    /// Heading noise factor.
    pub randomness: f64,
    /// Maximum turning rate.
    pub turning_speed: f64,
}

impl AgentTraits {
    /// Builds a record from values in [`TraitKind::ALL`] order.
    pub fn from_values(values: [f64; TraitKind::COUNT]) -> Self {
        let [
            radius,
            field_of_view,
            viewing_distance,
            certainty,
            speed,
            inner_bubble,
            outer_bubble,
            randomness,
            turning_speed,
        ] = values;
        Self {
            radius,
            field_of_view,
            viewing_distance,
            certainty,
            speed,
            inner_bubble,
            outer_bubble,
            randomness,
            turning_speed,
        }
    }

    /// Value of one trait.
    pub fn get(&self, kind: TraitKind) -> f64 {
        match kind {
            TraitKind::Radius => self.radius,
            TraitKind::FieldOfView => self.field_of_view,
            TraitKind::ViewingDistance => self.viewing_distance,
            TraitKind::Certainty => self.certainty,
            TraitKind::Speed => self.speed,
            TraitKind::InnerBubble => self.inner_bubble,
            TraitKind::OuterBubble => self.outer_bubble,
            TraitKind::Randomness => self.randomness,
            TraitKind::TurningSpeed => self.turning_speed,
        }
    }
}

/// Creates agents from a settings table.
///
/// Every trait's parameters are derived once at construction.
///
/// # Examples
///
/// ```rust
/// use flock_core::agent::AgentFactory;
/// use flock_core::sampling::SamplerConfig;
/// use flock_core::settings::TraitSettingsTable;
///
/// let factory = AgentFactory::new(TraitSettingsTable::default(), SamplerConfig::default()).unwrap();
///
/// let flock = factory.par_spawn_streams(42, 100).unwrap();
/// assert_eq!(flock.len(), 100);
/// assert_eq!(flock, factory.spawn_streams(42, 100).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct AgentFactory {
    table: TraitSettingsTable,
    traits: Vec<BoundedTrait>,
}

impl AgentFactory {
    /// Validates `table` and pre-derives every trait.
    pub fn new(table: TraitSettingsTable, config: SamplerConfig) -> Result<Self, SettingsError> {
        let traits = table
            .iter()
            .map(|(kind, bounds)| {
                BoundedTrait::new(*bounds, config).map_err(|source| SettingsError::Invalid {
                    trait_name: kind.name(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { table, traits })
    }

    /// The table this factory samples from.
    #[inline]
    pub fn table(&self) -> &TraitSettingsTable {
        &self.table
    }

    /// The pre-derived sampler for one trait.
    #[inline]
    pub fn bounded_trait(&self, kind: TraitKind) -> &BoundedTrait {
        &self.traits[kind as usize]
    }

    /// Samples one value of `kind`.
    pub fn sample_trait<S: UniformSource + ?Sized>(
        &self,
        source: &mut S,
        kind: TraitKind,
    ) -> Result<f64, SamplingError> {
        self.bounded_trait(kind).try_sample(source)
    }

    /// Creates one agent, sampling traits in [`TraitKind::ALL`] order.
    pub fn spawn<S: UniformSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<AgentTraits, SamplingError> {
        let mut values = [0.0; TraitKind::COUNT];
        for (slot, bounded) in values.iter_mut().zip(&self.traits) {
            *slot = bounded.try_sample(source)?;
        }

        let agent = AgentTraits::from_values(values);
        debug!(
            radius = agent.radius,
            speed = agent.speed,
            field_of_view = agent.field_of_view,
            "spawned agent"
        );
        Ok(agent)
    }

    /// Creates `count` agents drawing from one caller-owned source.
    pub fn spawn_population<S: UniformSource + ?Sized>(
        &self,
        source: &mut S,
        count: usize,
    ) -> Result<Vec<AgentTraits>, SamplingError> {
        (0..count).map(|_| self.spawn(&mut *source)).collect()
    }

    /// Creates `count` agents where agent `i` draws from stream `i` of `seed`.
    pub fn spawn_streams(
        &self,
        seed: u64,
        count: usize,
    ) -> Result<Vec<AgentTraits>, SamplingError> {
        let root = FlockRng::from_seed(seed);
        info!(seed, count, "spawning population");
        (0..count)
            .map(|i| self.spawn(&mut root.derive_stream(i as u64)))
            .collect()
    }

    /// Parallel form of [`spawn_streams`](Self::spawn_streams) on the rayon pool.
    ///
    /// Output is identical to the sequential form for the same `seed`.
    pub fn par_spawn_streams(
        &self,
        seed: u64,
        count: usize,
    ) -> Result<Vec<AgentTraits>, SamplingError> {
        let root = FlockRng::from_seed(seed);
        info!(
            seed,
            count,
            threads = rayon::current_num_threads(),
            "spawning population in parallel"
        );
        (0..count)
            .into_par_iter()
            .map(|i| self.spawn(&mut root.derive_stream(i as u64)))
            .collect()
    }
}
