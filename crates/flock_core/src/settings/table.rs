//! The trait settings table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{SettingsError, TraitKind};
use crate::rng::UniformSource;
use crate::sampling::{BoundedSampler, Bounds};
use crate::types::SamplingError;

/// Immutable mapping from every [`TraitKind`] to its [`Bounds`].
///
/// Built once (from [`Default`] or a configuration document) and then only
/// read. Every kind always has an entry. Adjusting an entry with
/// [`with_bounds`](Self::with_bounds) yields a new table.
///
/// Serialised as a map of trait name to bounds. Deserialising a partial map
/// overrides the defaults for the named traits only.
///
/// # Examples
///
/// ```rust
/// use flock_core::sampling::Bounds;
/// use flock_core::settings::{TraitKind, TraitSettingsTable};
///
/// let table = TraitSettingsTable::from_toml_str(
///     r#"
///     speed = [0.5, 2.0, 4.0]
///     radius = { min = 1.0, nominal = 1.1, max = 2.0 }
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(table.get(TraitKind::Speed), &Bounds::new(0.5, 2.0, 4.0));
/// assert_eq!(table.get(TraitKind::Certainty), &Bounds::new(0.0, 0.8, 1.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, Bounds>",
    into = "BTreeMap<String, Bounds>"
)]
pub struct TraitSettingsTable {
    // Indexed by `TraitKind as usize`.
    entries: [Bounds; TraitKind::COUNT],
}

/// The designed population profile, in [`TraitKind::ALL`] order.
const DEFAULT_BOUNDS: [Bounds; TraitKind::COUNT] = [
    Bounds::new(1.0, 1.2, 1.5),
    Bounds::new(0.0, 80.0, 180.0),
    Bounds::new(0.0, 5.0, 100.0),
    Bounds::new(0.0, 0.8, 1.0),
    Bounds::new(0.1, 1.0, 100.0),
    Bounds::new(0.1, 1.0, 10.0),
    Bounds::new(1.0, 5.0, 20.0),
    Bounds::new(0.0, 0.1, 1.0),
    Bounds::new(0.0, 0.2, 1.0),
];

impl Default for TraitSettingsTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_BOUNDS,
        }
    }
}

impl TraitSettingsTable {
    /// Builds a table from `(name, bounds)` overrides on top of the defaults.
    ///
    /// # Errors
    ///
    /// - [`SettingsError::UnknownTrait`] for an unrecognised name
    /// - [`SettingsError::Invalid`] if any resulting entry fails validation
    pub fn from_overrides<I, K>(overrides: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = (K, Bounds)>,
        K: AsRef<str>,
    {
        let mut table = Self::default();
        for (name, bounds) in overrides {
            let kind: TraitKind = name.as_ref().parse()?;
            table.entries[kind as usize] = bounds;
        }
        table.validate()?;
        Ok(table)
    }

    /// Parses a TOML document of `trait_name = bounds` pairs.
    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        let overrides: BTreeMap<String, Bounds> =
            toml::from_str(s).map_err(|e| SettingsError::Parse(e.to_string()))?;
        Self::from_overrides(overrides)
    }

    /// Renders the full table as TOML.
    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        toml::to_string(self).map_err(|e| SettingsError::Serialise(e.to_string()))
    }

    /// Bounds for `kind`.
    #[inline]
    pub fn get(&self, kind: TraitKind) -> &Bounds {
        &self.entries[kind as usize]
    }

    /// Bounds for the trait called `name`.
    pub fn get_by_name(&self, name: &str) -> Result<&Bounds, SettingsError> {
        let kind: TraitKind = name.parse()?;
        Ok(self.get(kind))
    }

    /// Iterates over `(kind, bounds)` in [`TraitKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (TraitKind, &Bounds)> + '_ {
        TraitKind::ALL
            .iter()
            .map(move |&kind| (kind, &self.entries[kind as usize]))
    }

    /// Returns a copy of this table with `kind` set to `bounds`.
    ///
    /// # Errors
    ///
    /// [`SettingsError::Invalid`] if `bounds` fails validation.
    pub fn with_bounds(&self, kind: TraitKind, bounds: Bounds) -> Result<Self, SettingsError> {
        bounds.validate().map_err(|source| SettingsError::Invalid {
            trait_name: kind.name(),
            source,
        })?;
        let mut next = self.clone();
        next.entries[kind as usize] = bounds;
        Ok(next)
    }

    /// Checks every entry.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (kind, bounds) in self.iter() {
            bounds.validate().map_err(|source| SettingsError::Invalid {
                trait_name: kind.name(),
                source,
            })?;
        }
        Ok(())
    }

    /// Samples one value for `kind` with the default sampler configuration.
    pub fn sample_trait<S: UniformSource + ?Sized>(
        &self,
        source: &mut S,
        kind: TraitKind,
    ) -> Result<f64, SamplingError> {
        self.sample_with(&BoundedSampler::default(), source, kind)
    }

    /// Samples one value for `kind` with an explicit sampler.
    pub fn sample_with<S: UniformSource + ?Sized>(
        &self,
        sampler: &BoundedSampler,
        source: &mut S,
        kind: TraitKind,
    ) -> Result<f64, SamplingError> {
        sampler.sample_bounded(source, self.get(kind))
    }
}

impl TryFrom<BTreeMap<String, Bounds>> for TraitSettingsTable {
    type Error = SettingsError;

    fn try_from(map: BTreeMap<String, Bounds>) -> Result<Self, Self::Error> {
        Self::from_overrides(map)
    }
}

impl From<TraitSettingsTable> for BTreeMap<String, Bounds> {
    fn from(table: TraitSettingsTable) -> Self {
        table
            .iter()
            .map(|(kind, bounds)| (kind.name().to_string(), *bounds))
            .collect()
    }
}
