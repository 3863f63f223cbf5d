//! Enemy decision making
//!
//! Threat analysis of the opponent, personality traits and short-term memory
//! feed a weighted roulette over candidate actions.

mod decision;
mod memory;
mod profile;
mod threat;
mod weights;

pub use decision::AIDecisionEngine;
pub use memory::AIMemory;
pub use profile::{AIProfile, Personality};
pub use threat::{GearFlags, ThreatAnalysis, ThreatLevel};
pub use weights::WeightedChoices;
