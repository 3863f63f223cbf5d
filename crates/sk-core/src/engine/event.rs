//! Battle log entries

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::boss::{AbilityId, DecisionSource, PhaseTransition};
use crate::combat::{ActionKind, PlayerAction};
use crate::status::{EffectKind, TickEvent};

/// One side of the fight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Side {
    Player,
    Opponent,
}

/// Something that happened during a battle, in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CombatEvent {
    RoundStarted {
        round: u32,
    },
    EffectTicked {
        target: Side,
        kind: EffectKind,
        health_delta: i32,
        expired: bool,
    },
    /// A stunned combatant lost its action
    Stunned {
        target: Side,
    },
    PlayerActed {
        action: PlayerAction,
    },
    ActionRejected {
        action: PlayerAction,
        reason: String,
    },
    /// Every retry was rejected; the player's action is lost
    TurnForfeited,
    OpponentActed {
        action: ActionKind,
        source: Option<DecisionSource>,
    },
    Damaged {
        target: Side,
        amount: i32,
        critical: bool,
    },
    Dodged {
        target: Side,
    },
    Healed {
        target: Side,
        amount: i32,
    },
    EffectApplied {
        target: Side,
        kind: EffectKind,
        turns: u32,
    },
    ShieldBroken {
        target: Side,
        by: AbilityId,
    },
    PhaseChanged {
        phase: u8,
        attack_multiplier: f64,
        attack: i32,
        healed: i32,
    },
    FleeFailed,
    Fled,
}

impl CombatEvent {
    pub fn tick(target: Side, event: &TickEvent) -> Self {
        CombatEvent::EffectTicked {
            target,
            kind: event.kind,
            health_delta: event.health_delta,
            expired: event.expired,
        }
    }

    pub fn phase(transition: &PhaseTransition) -> Self {
        CombatEvent::PhaseChanged {
            phase: transition.phase,
            attack_multiplier: transition.attack_multiplier,
            attack: transition.attack,
            healed: transition.healed,
        }
    }
}
