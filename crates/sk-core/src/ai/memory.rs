//! Short-term combat memory
//!
//! The turn engine feeds the opponent's observed actions in here; the AI
//! only reads it.

use serde::{Deserialize, Serialize};

use crate::combat::ObservedAction;

/// What a combatant remembers about its opponent's recent behavior
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AIMemory {
    /// Attacks in a row by the opponent
    pub consecutive_attacks: u32,

    /// Skills in a row by the opponent
    pub consecutive_skills: u32,

    /// Most recent observed action
    pub last_action: Option<ObservedAction>,

    /// Number of actions observed this battle
    pub observed_turns: u32,
}

impl AIMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the opponent's latest action
    pub fn update(&mut self, action: ObservedAction) {
        match action {
            ObservedAction::Attack | ObservedAction::Companion => {
                self.consecutive_attacks += 1;
                self.consecutive_skills = 0;
            }
            ObservedAction::Skill => {
                self.consecutive_skills += 1;
                self.consecutive_attacks = 0;
            }
            ObservedAction::Defend | ObservedAction::Item | ObservedAction::Flee => {
                self.consecutive_attacks = 0;
                self.consecutive_skills = 0;
            }
        }
        self.last_action = Some(action);
        self.observed_turns += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attack_streak() {
        let mut memory = AIMemory::new();
        memory.update(ObservedAction::Attack);
        memory.update(ObservedAction::Attack);
        memory.update(ObservedAction::Companion);
        assert_eq!(memory.consecutive_attacks, 3);
        memory.update(ObservedAction::Defend);
        assert_eq!(memory.consecutive_attacks, 0);
        assert_eq!(memory.last_action, Some(ObservedAction::Defend));
        assert_eq!(memory.observed_turns, 4);
    }

    #[test]
    fn test_skill_streak_resets_attacks() {
        let mut memory = AIMemory::new();
        memory.update(ObservedAction::Attack);
        memory.update(ObservedAction::Skill);
        memory.update(ObservedAction::Skill);
        assert_eq!(memory.consecutive_attacks, 0);
        assert_eq!(memory.consecutive_skills, 2);
    }
}
