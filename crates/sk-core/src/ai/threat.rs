//! Threat analysis
//!
//! Condenses an opponent snapshot into the handful of facts the AI weighs:
//! how healthy it is, what it carries, whether it can cast, and an overall
//! threat level.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::combat::cheapest_cost;
use crate::combatant::Combatant;
use crate::status::EffectKind;

/// Weapon bonus counted as a strong weapon
const STRONG_WEAPON_ATTACK: i32 = 20;

/// Armor bonus counted as heavy armor
const HEAVY_ARMOR_DEFENSE: i32 = 10;

/// Overall danger posed by an opponent
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[repr(u8)]
pub enum ThreatLevel {
    #[default]
    Minimal = 0,
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

impl ThreatLevel {
    /// Map a threat score through the fixed cutoffs (7, 5, 3, 1)
    pub const fn from_score(score: i32) -> Self {
        if score >= 7 {
            ThreatLevel::Critical
        } else if score >= 5 {
            ThreatLevel::High
        } else if score >= 3 {
            ThreatLevel::Medium
        } else if score >= 1 {
            ThreatLevel::Low
        } else {
            ThreatLevel::Minimal
        }
    }

    pub const fn is_dangerous(self) -> bool {
        matches!(self, ThreatLevel::High | ThreatLevel::Critical)
    }
}

bitflags! {
    /// What the opponent brings to the fight
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GearFlags: u8 {
        const WEAPON = 1 << 0;
        const STRONG_WEAPON = 1 << 1;
        const ARMOR = 1 << 2;
        const HEAVY_ARMOR = 1 << 3;
        const COMPANION = 1 << 4;
    }
}

/// Assessment of an opponent
#[derive(Debug, Clone, PartialEq)]
pub struct ThreatAnalysis {
    pub health_ratio: f64,
    pub resource_ratio: f64,
    pub debuffs: Vec<EffectKind>,
    pub buffs: Vec<EffectKind>,
    pub gear: GearFlags,
    pub level: u32,
    /// Enough mana for at least one known skill
    pub can_use_skills: bool,
    pub is_stunned: bool,
    pub is_frozen: bool,
    pub threat_score: i32,
    pub threat_level: ThreatLevel,
}

impl ThreatAnalysis {
    /// Analyze `opponent`
    pub fn of(opponent: &Combatant) -> Self {
        let mut gear = GearFlags::empty();
        if opponent.equipment.attack >= STRONG_WEAPON_ATTACK {
            gear |= GearFlags::WEAPON | GearFlags::STRONG_WEAPON;
        } else if opponent.equipment.attack > 0 {
            gear |= GearFlags::WEAPON;
        }
        if opponent.equipment.defense >= HEAVY_ARMOR_DEFENSE {
            gear |= GearFlags::ARMOR | GearFlags::HEAVY_ARMOR;
        } else if opponent.equipment.defense > 0 {
            gear |= GearFlags::ARMOR;
        }
        if opponent.companion.is_some() {
            gear |= GearFlags::COMPANION;
        }

        let can_use_skills = cheapest_cost(&opponent.skills)
            .is_some_and(|cost| opponent.mana.current >= cost);

        let mut analysis = Self {
            health_ratio: opponent.health_ratio(),
            resource_ratio: opponent.mana.ratio(),
            debuffs: opponent.status.debuffs(),
            buffs: opponent.status.buffs(),
            gear,
            level: opponent.level,
            can_use_skills,
            is_stunned: opponent.is_stunned(),
            is_frozen: opponent.is_frozen(),
            threat_score: 0,
            threat_level: ThreatLevel::Minimal,
        };
        analysis.threat_score = analysis.score();
        analysis.threat_level = ThreatLevel::from_score(analysis.threat_score);
        analysis
    }

    /// Weighted sum of health band, gear, level and resources
    fn score(&self) -> i32 {
        let mut score = 0;

        score += if self.health_ratio >= 0.8 {
            2
        } else if self.health_ratio >= 0.5 {
            1
        } else if self.health_ratio < 0.25 {
            -1
        } else {
            0
        };

        score += if self.gear.contains(GearFlags::STRONG_WEAPON) {
            2
        } else if self.gear.contains(GearFlags::WEAPON) {
            1
        } else {
            0
        };
        score += if self.gear.contains(GearFlags::HEAVY_ARMOR) {
            2
        } else if self.gear.contains(GearFlags::ARMOR) {
            1
        } else {
            0
        };
        if self.gear.contains(GearFlags::COMPANION) {
            score += 1;
        }

        score += if self.level >= 8 {
            3
        } else if self.level >= 5 {
            2
        } else if self.level >= 3 {
            1
        } else {
            0
        };

        if self.can_use_skills {
            score += 1;
        }
        if self.resource_ratio >= 0.7 {
            score += 1;
        }

        score.max(0)
    }

    /// Stunned or frozen
    pub fn is_vulnerable(&self) -> bool {
        self.debuffs.iter().any(|k| k.is_disabling())
    }

    /// Already burning or poisoned
    pub fn has_damage_over_time(&self) -> bool {
        self.debuffs.iter().any(|k| k.is_damage_over_time())
    }
}
