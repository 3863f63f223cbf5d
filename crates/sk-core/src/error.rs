//! Error types for the combat core
//!
//! No error in here ends a battle. They describe rejected requests at the
//! seams: menu input, resource checks and weighted sampling.

use thiserror::Error;

use crate::combat::SkillId;

/// Recoverable combat errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CombatError {
    #[error("invalid action index {index}: expected 1..={options}")]
    InvalidActionIndex { index: usize, options: usize },

    #[error("not enough {resource} for {action}: need {required}, have {available}")]
    InsufficientResource {
        action: String,
        resource: &'static str,
        required: i32,
        available: i32,
    },

    #[error("skill {0} has not been learned")]
    SkillNotLearned(SkillId),

    #[error("no eligible action: every candidate weight is zero")]
    NoEligibleAction,
}

/// Errors raised while loading an engine configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not parse engine config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid engine config field '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}
