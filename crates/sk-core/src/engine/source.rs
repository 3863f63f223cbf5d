//! Where player actions come from

use std::collections::VecDeque;

use crate::combat::PlayerAction;
use crate::combatant::Combatant;
use crate::error::CombatError;

/// Supplies the player's action each turn (normally a prompt)
///
/// May block. The engine re-asks after a rejected action, up to the
/// configured retry limit.
pub trait PlayerActionSource {
    fn next_action(&mut self, player: &Combatant, opponent: &Combatant) -> PlayerAction;

    /// Called when the engine refuses an action, before asking again
    fn action_rejected(&mut self, _action: PlayerAction, _error: &CombatError) {}
}

impl<F> PlayerActionSource for F
where
    F: FnMut(&Combatant, &Combatant) -> PlayerAction,
{
    fn next_action(&mut self, player: &Combatant, opponent: &Combatant) -> PlayerAction {
        self(player, opponent)
    }
}

/// Plays a fixed list of actions, then repeats a fallback
#[derive(Debug, Clone)]
pub struct ScriptedActions {
    actions: VecDeque<PlayerAction>,
    fallback: PlayerAction,
    rejected: Vec<CombatError>,
}

impl ScriptedActions {
    pub fn new(actions: impl IntoIterator<Item = PlayerAction>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            fallback: PlayerAction::Attack,
            rejected: Vec::new(),
        }
    }

    /// The same action every turn
    pub fn repeat(action: PlayerAction) -> Self {
        Self::new([]).with_fallback(action)
    }

    pub fn with_fallback(mut self, action: PlayerAction) -> Self {
        self.fallback = action;
        self
    }

    /// Errors reported back by the engine, oldest first
    pub fn rejected(&self) -> &[CombatError] {
        &self.rejected
    }
}

impl PlayerActionSource for ScriptedActions {
    fn next_action(&mut self, _player: &Combatant, _opponent: &Combatant) -> PlayerAction {
        self.actions.pop_front().unwrap_or(self.fallback)
    }

    fn action_rejected(&mut self, _action: PlayerAction, error: &CombatError) {
        self.rejected.push(error.clone());
    }
}
