//! Game constants shared by the combat modules

/// Damage multiplier applied on a critical hit
pub const CRIT_MULTIPLIER: f64 = 1.5;

/// Base critical hit chance for the player
pub const PLAYER_CRIT_CHANCE: f64 = 0.15;

/// Base dodge chance for the player
pub const PLAYER_DODGE_CHANCE: f64 = 0.10;

/// Player base attack roll (inclusive)
pub const PLAYER_ATTACK_MIN: i32 = 15;
pub const PLAYER_ATTACK_MAX: i32 = 25;

/// Player starting health and mana
pub const PLAYER_MAX_HEALTH: i32 = 100;
pub const PLAYER_MAX_MANA: i32 = 50;

/// Enemy attack rolls span this fraction of the nominal attack stat
pub const ENEMY_ATTACK_LOW: f64 = 0.8;
pub const ENEMY_ATTACK_HIGH: f64 = 1.2;

/// Boss scaling applied to base stats
pub const BOSS_HEALTH_SCALE: f64 = 1.5;
pub const BOSS_ATTACK_SCALE: f64 = 1.2;

/// Health ratio thresholds for boss phases 2 and 3 (the last entry ends the fight)
pub const BOSS_PHASE_THRESHOLDS: [f64; 3] = [0.66, 0.33, 0.0];

/// Highest boss phase
pub const BOSS_MAX_PHASE: u8 = 3;

/// Attack multiplier relative to base on entering phase 2 / phase 3
pub const PHASE_2_ATTACK: f64 = 1.4;
pub const PHASE_3_ATTACK: f64 = 1.6;

/// Fraction of max health restored on entering phase 3
pub const PHASE_3_HEAL: f64 = 0.1;

/// Healing from a ration
pub const RATION_HEAL: i32 = 30;

/// Shield turns granted by the defend action
pub const DEFEND_SHIELD_TURNS: u32 = 2;

/// Chance that defending also restores a little health
pub const DEFEND_HEAL_CHANCE: f64 = 0.3;
pub const DEFEND_HEAL_MIN: i32 = 5;
pub const DEFEND_HEAL_MAX: i32 = 10;

/// Companion strike damage roll (before companion level is added)
pub const COMPANION_STRIKE_MIN: i32 = 5;
pub const COMPANION_STRIKE_MAX: i32 = 15;

/// Companion attack bonus is only granted above this loyalty
pub const COMPANION_LOYALTY_GATE: u8 = 50;

/// Regenerate turns an enemy grants itself when it falls back
pub const RETREAT_REGEN_TURNS: u32 = 2;

/// Poison or Burn turns from a status-focused enemy attack
pub const STATUS_FOCUS_TURNS: u32 = 3;
