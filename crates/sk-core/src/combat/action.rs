//! Actions a combatant can take on its turn

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::boss::AbilityId;
use crate::combatant::Combatant;
use crate::error::CombatError;

use super::SkillId;

/// Action chosen by the AI (or a boss pattern) for a non-player combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum ActionKind {
    NormalAttack,
    HeavyAttack,
    Defend,
    /// All-in swing when badly hurt
    DesperateAttack,
    /// Glancing blow while falling back to recover
    TacticalRetreat,
    /// Weak hit that poisons or burns
    StatusFocus,
    /// Punish a stunned or frozen opponent
    OpportunisticStrike,
    SpecialAbility(AbilityId),
}

impl ActionKind {
    /// Candidate set the AI weighs every turn, in sampling order
    pub const CANDIDATES: [ActionKind; 7] = [
        ActionKind::NormalAttack,
        ActionKind::HeavyAttack,
        ActionKind::Defend,
        ActionKind::DesperateAttack,
        ActionKind::TacticalRetreat,
        ActionKind::StatusFocus,
        ActionKind::OpportunisticStrike,
    ];

    /// Damage multiplier for the ordinary actions
    ///
    /// Special abilities carry their own multiplier in their spec.
    pub fn default_multiplier(&self) -> f64 {
        match self {
            ActionKind::NormalAttack => 1.0,
            ActionKind::HeavyAttack => 1.5,
            ActionKind::Defend => 0.0,
            ActionKind::DesperateAttack => 1.8,
            ActionKind::TacticalRetreat => 0.5,
            ActionKind::StatusFocus => 0.7,
            ActionKind::OpportunisticStrike => 2.0,
            ActionKind::SpecialAbility(id) => id.spec().damage_multiplier,
        }
    }
}

/// A chosen action with its damage multiplier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub damage_multiplier: f64,
}

impl Action {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            damage_multiplier: kind.default_multiplier(),
        }
    }

    pub fn special(ability: AbilityId) -> Self {
        Self::new(ActionKind::SpecialAbility(ability))
    }
}

impl Default for Action {
    fn default() -> Self {
        Self::new(ActionKind::NormalAttack)
    }
}

/// Action supplied by the player collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum PlayerAction {
    Attack,
    Defend,
    CastSkill(SkillId),
    EatRation,
    CompanionStrike,
    Flee,
}

impl PlayerAction {
    /// Menu entries available to `player`, in display order
    pub fn menu_for(player: &Combatant) -> Vec<PlayerAction> {
        let mut options = vec![PlayerAction::Attack, PlayerAction::Defend];
        options.extend(player.skills.iter().map(|&s| PlayerAction::CastSkill(s)));
        if player.rations > 0 {
            options.push(PlayerAction::EatRation);
        }
        if player.companion.is_some() {
            options.push(PlayerAction::CompanionStrike);
        }
        options.push(PlayerAction::Flee);
        options
    }

    /// Pick a menu entry by its 1-based index
    pub fn from_menu(options: &[PlayerAction], index: usize) -> Result<PlayerAction, CombatError> {
        index
            .checked_sub(1)
            .and_then(|i| options.get(i))
            .copied()
            .ok_or(CombatError::InvalidActionIndex {
                index,
                options: options.len(),
            })
    }

    /// How the opponent's memory records this action
    pub const fn observed(&self) -> ObservedAction {
        match self {
            PlayerAction::Attack => ObservedAction::Attack,
            PlayerAction::Defend => ObservedAction::Defend,
            PlayerAction::CastSkill(_) => ObservedAction::Skill,
            PlayerAction::EatRation => ObservedAction::Item,
            PlayerAction::CompanionStrike => ObservedAction::Companion,
            PlayerAction::Flee => ObservedAction::Flee,
        }
    }
}

/// Player behavior as remembered by the AI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum ObservedAction {
    Attack,
    Skill,
    Defend,
    Item,
    Companion,
    Flee,
}
