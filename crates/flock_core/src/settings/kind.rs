//! Trait identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::SettingsError;

/// One scalar characteristic of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitKind {
    /// Visual radius of the agent.
    Radius,
    /// Field of view in degrees.
    FieldOfView,
    /// How far ahead the agent can see.
    ViewingDistance,
    /// How closely the agent follows those it can see (gregariousness).
    Certainty,
    /// Cruising speed.
    Speed,
    /// Radius of the personal-space bubble.
    InnerBubble,
    /// Radius within which neighbours are attracted.
    OuterBubble,
    /// Random perturbation applied to heading.
    Randomness,
    /// Maximum turning rate.
    TurningSpeed,
}

impl TraitKind {
    /// Number of traits.
    pub const COUNT: usize = 9;

    /// Every trait, in agent-record order.
    pub const ALL: [TraitKind; Self::COUNT] = [
        TraitKind::Radius,
        TraitKind::FieldOfView,
        TraitKind::ViewingDistance,
        TraitKind::Certainty,
        TraitKind::Speed,
        TraitKind::InnerBubble,
        TraitKind::OuterBubble,
        TraitKind::Randomness,
        TraitKind::TurningSpeed,
    ];

    /// Stable snake_case name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            TraitKind::Radius => "radius",
            TraitKind::FieldOfView => "field_of_view",
            TraitKind::ViewingDistance => "viewing_distance",
            TraitKind::Certainty => "certainty",
            TraitKind::Speed => "speed",
            TraitKind::InnerBubble => "inner_bubble",
            TraitKind::OuterBubble => "outer_bubble",
            TraitKind::Randomness => "randomness",
            TraitKind::TurningSpeed => "turning_speed",
        }
    }
}

impl FromStr for TraitKind {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase().replace('-', "_");
        TraitKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == normalised)
            .ok_or_else(|| SettingsError::UnknownTrait(s.to_string()))
    }
}

impl fmt::Display for TraitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for kind in TraitKind::ALL {
            assert_eq!(kind.name().parse::<TraitKind>().unwrap(), kind);
            assert_eq!(format!("{}", kind), kind.name());
        }
    }

    #[test]
    fn test_parse_is_lenient_about_case_and_dashes() {
        assert_eq!("Field-Of-View".parse::<TraitKind>().unwrap(), TraitKind::FieldOfView);
        assert_eq!(" speed ".parse::<TraitKind>().unwrap(), TraitKind::Speed);
    }

    #[test]
    fn test_unknown_trait() {
        let err = "wingspan".parse::<TraitKind>().unwrap_err();
        assert_eq!(err, SettingsError::UnknownTrait("wingspan".to_string()));
    }

    #[test]
    fn test_serde_matches_name() {
        for kind in TraitKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
    }
}
