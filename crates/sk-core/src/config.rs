//! Engine configuration
//!
//! Tunables the host may override, typically from a JSON file. Every field
//! falls back to its default when omitted.

use serde::{Deserialize, Serialize};

use crate::consts::CRIT_MULTIPLIER;
use crate::error::ConfigError;

/// Tunable parameters for [`crate::engine::TurnEngine`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rounds played before the battle is declared a draw
    pub max_turns: u32,

    /// Flee success chance in a normal battle
    pub flee_chance: f64,

    /// Flee success chance against a boss
    pub boss_flee_chance: f64,

    /// Flee success chance against a boss the player out-levels (level > phase + 2)
    pub boss_flee_chance_outleveled: f64,

    /// Damage multiplier for critical hits
    pub crit_multiplier: f64,

    /// Chance a damaging skill applies its status effect
    pub skill_effect_chance: f64,

    /// Duration of a skill-applied status effect
    pub skill_effect_duration: u32,

    /// Same as `skill_effect_chance`, against bosses
    pub boss_skill_effect_chance: f64,

    /// Same as `skill_effect_duration`, against bosses
    pub boss_skill_effect_duration: u32,

    /// Skill damage multiplier against a boss in phase 2 or later
    pub boss_phase_skill_bonus: f64,

    /// How many times a rejected player action is re-requested before the turn is lost
    pub max_action_retries: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_turns: 200,
            flee_chance: 0.7,
            boss_flee_chance: 0.3,
            boss_flee_chance_outleveled: 0.5,
            crit_multiplier: CRIT_MULTIPLIER,
            skill_effect_chance: 0.6,
            skill_effect_duration: 3,
            boss_skill_effect_chance: 0.7,
            boss_skill_effect_duration: 2,
            boss_phase_skill_bonus: 1.1,
            max_action_retries: 3,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every field is within its domain
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_turns == 0 {
            return Err(ConfigError::Invalid {
                field: "max_turns",
                reason: "must be greater than zero".to_string(),
            });
        }

        let probabilities = [
            ("flee_chance", self.flee_chance),
            ("boss_flee_chance", self.boss_flee_chance),
            ("boss_flee_chance_outleveled", self.boss_flee_chance_outleveled),
            ("skill_effect_chance", self.skill_effect_chance),
            ("boss_skill_effect_chance", self.boss_skill_effect_chance),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("probability {value} is outside [0, 1]"),
                });
            }
        }

        let multipliers = [
            ("crit_multiplier", self.crit_multiplier),
            ("boss_phase_skill_bonus", self.boss_phase_skill_bonus),
        ];
        for (field, value) in multipliers {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("multiplier {value} must be positive"),
                });
            }
        }

        Ok(())
    }
}
