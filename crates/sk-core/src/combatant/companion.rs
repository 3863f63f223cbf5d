//! Companion (pet) support for a combatant

use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::consts::COMPANION_LOYALTY_GATE;

/// Additive combat bonuses computed by the host (equipment sets, pets, buffs)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CombatBonus {
    pub attack: i32,
    pub defense: i32,
    pub crit: f64,
    pub dodge: f64,
}

impl Add for CombatBonus {
    type Output = CombatBonus;

    fn add(self, other: CombatBonus) -> CombatBonus {
        CombatBonus {
            attack: self.attack + other.attack,
            defense: self.defense + other.defense,
            crit: self.crit + other.crit,
            dodge: self.dodge + other.dodge,
        }
    }
}

/// An ally fighting alongside the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Companion {
    pub name: String,
    pub level: u32,
    /// 0..=100
    pub loyalty: u8,
    /// Bonus the companion grants its owner
    pub bonus: CombatBonus,
}

impl Companion {
    pub fn new(name: impl Into<String>, level: u32, loyalty: u8, bonus: CombatBonus) -> Self {
        Self {
            name: name.into(),
            level,
            loyalty: loyalty.min(100),
            bonus,
        }
    }

    /// Bonus actually granted; the attack part needs enough loyalty
    pub fn effective_bonus(&self) -> CombatBonus {
        let mut bonus = self.bonus;
        if self.loyalty <= COMPANION_LOYALTY_GATE {
            bonus.attack = 0;
        }
        bonus
    }
}
