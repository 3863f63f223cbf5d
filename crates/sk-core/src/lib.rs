//! sk-core: turn-based combat resolution
//!
//! Status effects, combatant stats, an adaptive enemy AI and multi-phase boss
//! battles, driven by a single turn engine. The host supplies two combatant
//! snapshots, a seeded [`GameRng`] and a [`PlayerActionSource`]; it gets a
//! [`CombatResult`] back. No I/O happens in here.
//!
//! Every random draw goes through the injected [`GameRng`], so a battle is
//! fully reproducible from its seed and inputs.

pub mod ai;
pub mod boss;
pub mod combat;
pub mod combatant;
pub mod engine;
pub mod status;

mod config;
mod consts;
mod error;
mod rng;

pub use config::EngineConfig;
pub use consts::*;
pub use error::{CombatError, ConfigError};
pub use rng::GameRng;

pub use ai::{AIDecisionEngine, AIMemory, AIProfile, Personality, ThreatAnalysis, ThreatLevel};
pub use boss::{AbilityId, BossKind, BossPhaseController};
pub use combat::{Action, ActionKind, PlayerAction, Rewards, SkillId, final_damage};
pub use combatant::{Combatant, CombatantKind, Companion};
pub use engine::{
    Battle, CombatEvent, CombatResult, Opponent, Outcome, PlayerActionSource, ScriptedActions,
    TurnEngine,
};
pub use status::{EffectKind, StatusEffect, StatusEffectTable};
