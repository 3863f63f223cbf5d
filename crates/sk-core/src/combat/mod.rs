//! Combat arithmetic
//!
//! The damage rule, actions, player skills and victory rewards.

mod action;
mod rewards;
mod skill;

use serde::{Deserialize, Serialize};

pub use action::{Action, ActionKind, ObservedAction, PlayerAction};
pub use rewards::{ItemId, Rewards, boss_rewards, enemy_rewards};
pub use skill::{SkillId, SkillKind, SkillSpec, cheapest_cost};

/// How much of the defender's defense an attack respects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DefenseMode {
    #[default]
    Full,
    Half,
    Ignore,
}

impl DefenseMode {
    /// Defense that actually applies under this mode
    pub const fn effective(self, defense: i32) -> i32 {
        let defense = if defense < 0 { 0 } else { defense };
        match self {
            DefenseMode::Full => defense,
            DefenseMode::Half => defense / 2,
            DefenseMode::Ignore => 0,
        }
    }
}

/// Damage after multiplier and defense: `max(1, floor(base * mult) - defense)`
///
/// Every landed hit does at least 1 damage so a battle always progresses.
pub fn final_damage(base_damage: i32, multiplier: f64, defense: i32) -> i32 {
    final_damage_with(base_damage, multiplier, defense, DefenseMode::Full)
}

/// [`final_damage`] with a defense mode for abilities that bypass armor
pub fn final_damage_with(base_damage: i32, multiplier: f64, defense: i32, mode: DefenseMode) -> i32 {
    let raw = (base_damage.max(0) as f64 * multiplier.max(0.0)).floor() as i32;
    (raw - mode.effective(defense)).max(1)
}
