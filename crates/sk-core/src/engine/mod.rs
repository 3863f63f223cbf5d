//! Turn engine
//!
//! Alternates player and opponent turns until one side falls, the player
//! flees, or the turn cap is reached. Each turn ticks the acting side's
//! status effects first; a side stunned at the start of its turn loses the
//! action.

mod battle;
mod event;
mod source;

pub use battle::{Battle, CombatResult, Opponent, Outcome, TurnEngine};
pub use event::{CombatEvent, Side};
pub use source::{PlayerActionSource, ScriptedActions};
