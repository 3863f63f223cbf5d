//! Boss battles
//!
//! Special abilities, scripted attack patterns and the phase controller that
//! ties them to the base AI.

mod ability;
mod controller;
mod pattern;

pub use ability::{AbilityEffect, AbilityId, AbilityOutcome, AbilitySpec, BossKind};
pub use controller::{BossDecision, BossPhaseController, DecisionSource, PhaseTransition, phase_for_ratio};
pub use pattern::{AttackPattern, PatternQueue};
