//! AI personality
//!
//! A personality is a named preset for the three traits that bias action
//! weighting. The traits are fixed when the combatant is created.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::rng::GameRng;

/// Named personality presets
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[repr(u8)]
pub enum Personality {
    /// Charges in, prefers heavy hits
    #[default]
    Aggressive = 0,

    /// Guards often, retreats early
    Defensive = 1,

    /// Balanced, quick to change approach
    Tactical = 2,

    /// Survival first
    Coward = 3,

    /// Fights to the last hit point
    Berserker = 4,

    /// Careful and adaptive
    Cautious = 5,
}

impl Personality {
    /// Pick a personality uniformly
    pub fn roll(rng: &mut GameRng) -> Self {
        let all: Vec<Personality> = Personality::iter().collect();
        rng.choose(&all).copied().unwrap_or_default()
    }

    /// Trait values for this preset
    pub fn profile(self) -> AIProfile {
        match self {
            Personality::Aggressive => AIProfile::new(0.8, 0.2, 0.3),
            Personality::Defensive => AIProfile::new(0.3, 0.7, 0.4),
            Personality::Tactical => AIProfile::new(0.5, 0.5, 0.9),
            Personality::Coward => AIProfile::new(0.1, 0.9, 0.5),
            Personality::Berserker => AIProfile::new(1.0, 0.0, 0.1),
            Personality::Cautious => AIProfile::new(0.4, 0.8, 0.7),
        }
    }
}

/// Trait weights, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AIProfile {
    pub aggression: f64,
    pub self_preservation: f64,
    pub adaptability: f64,
}

impl Default for AIProfile {
    fn default() -> Self {
        Self::new(0.5, 0.5, 0.5)
    }
}

impl AIProfile {
    /// Build a profile, clamping each trait into `[0, 1]`
    pub fn new(aggression: f64, self_preservation: f64, adaptability: f64) -> Self {
        Self {
            aggression: aggression.clamp(0.0, 1.0),
            self_preservation: self_preservation.clamp(0.0, 1.0),
            adaptability: adaptability.clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_in_range() {
        for personality in Personality::iter() {
            let p = personality.profile();
            for value in [p.aggression, p.self_preservation, p.adaptability] {
                assert!((0.0..=1.0).contains(&value));
            }
        }
    }

    #[test]
    fn test_personality_traits() {
        let berserker = Personality::Berserker.profile();
        let coward = Personality::Coward.profile();
        assert!(berserker.aggression > coward.aggression);
        assert!(coward.self_preservation > berserker.self_preservation);
    }

    #[test]
    fn test_new_clamps() {
        let p = AIProfile::new(2.0, -1.0, 0.5);
        assert_eq!(p.aggression, 1.0);
        assert_eq!(p.self_preservation, 0.0);
    }

    #[test]
    fn test_roll_is_seeded() {
        let a = Personality::roll(&mut GameRng::new(17));
        let b = Personality::roll(&mut GameRng::new(17));
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_name() {
        assert_eq!("Berserker".parse::<Personality>(), Ok(Personality::Berserker));
        assert_eq!(Personality::Cautious.to_string(), "cautious");
        assert!("brave".parse::<Personality>().is_err());
    }
}
