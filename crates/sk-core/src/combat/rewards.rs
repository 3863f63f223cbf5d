//! Victory rewards

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::boss::BossKind;
use crate::combatant::Combatant;
use crate::rng::GameRng;

/// Trophy items handed out by bosses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum ItemId {
    DragonScaleArmor,
    NecromancerStaff,
    GiantHammer,
    ChampionInsignia,
}

/// What the host credits to the player after a victory
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rewards {
    pub gold: i32,
    pub exp: i32,
    pub items: Vec<ItemId>,
}

/// Rewards for beating an ordinary enemy
///
/// Scales with the enemy's toughness, plus a little noise.
pub fn enemy_rewards(enemy: &Combatant, rng: &mut GameRng) -> Rewards {
    let health_mult = (enemy.health.max() as f64 / 50.0).max(1.0);
    let attack_mult = (enemy.attack_stat as f64 / 20.0).max(1.0);

    let mut gold = (15.0 * health_mult * attack_mult) as i32;
    let mut exp = (25.0 * health_mult * attack_mult * 0.8) as i32;
    gold += rng.range_inclusive(-5, 10);
    exp += rng.range_inclusive(-5, 15);

    Rewards {
        gold: gold.max(10),
        exp: exp.max(15),
        items: Vec::new(),
    }
}

/// Rewards for beating a boss; faster kills pay more gold
pub fn boss_rewards(kind: BossKind, phase: u8, boss_turns: u32) -> Rewards {
    let phase = phase as i32;
    let speed_bonus = (100 - boss_turns.min(50) as i32 * 2).max(0);
    Rewards {
        gold: 100 + phase * 50 + speed_bonus,
        exp: 50 + phase * 25,
        items: vec![kind.trophy()],
    }
}
