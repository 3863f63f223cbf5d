//! Action selection for non-player combatants
//!
//! Seeds every candidate action with a base weight, scales the weights by a
//! fixed sequence of rules, then samples one. The only randomness is the final
//! roulette draw.

use tracing::{debug, trace};

use crate::combat::{Action, ActionKind};
use crate::combatant::Combatant;
use crate::rng::GameRng;

use super::{AIMemory, AIProfile, ThreatAnalysis, ThreatLevel, WeightedChoices};

/// Starting weights, in sampling order
const BASE_WEIGHTS: [(ActionKind, f64); 7] = [
    (ActionKind::NormalAttack, 1.0),
    (ActionKind::HeavyAttack, 0.3),
    (ActionKind::Defend, 0.2),
    (ActionKind::DesperateAttack, 0.05),
    (ActionKind::TacticalRetreat, 0.1),
    (ActionKind::StatusFocus, 0.2),
    (ActionKind::OpportunisticStrike, 0.05),
];

/// Memory streak that makes an adaptable AI turn defensive
const ATTACK_STREAK_PIVOT: u32 = 3;

/// Skill streak that makes an adaptable AI press the caster
const SKILL_STREAK_PIVOT: u32 = 2;

/// Trait threshold for memory-driven pivots
const ADAPTIVE_THRESHOLD: f64 = 0.5;

/// Weighted, personality-driven action chooser
#[derive(Debug, Clone, Copy, Default)]
pub struct AIDecisionEngine;

impl AIDecisionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Analyze the opponent and pick an action
    pub fn choose_action(
        &self,
        me: &Combatant,
        opponent: &Combatant,
        profile: &AIProfile,
        memory: &AIMemory,
        rng: &mut GameRng,
    ) -> Action {
        let analysis = ThreatAnalysis::of(opponent);
        self.choose_with_analysis(me, &analysis, profile, memory, rng)
    }

    /// Pick an action from an existing analysis
    pub fn choose_with_analysis(
        &self,
        me: &Combatant,
        analysis: &ThreatAnalysis,
        profile: &AIProfile,
        memory: &AIMemory,
        rng: &mut GameRng,
    ) -> Action {
        let weights = self.weigh(me, analysis, profile, memory);
        trace!(name = %me.name, ?weights, "action weights");
        Self::pick(&weights, rng)
    }

    /// Sample from weights, falling back to a normal attack when nothing is eligible
    pub fn pick(weights: &WeightedChoices<ActionKind>, rng: &mut GameRng) -> Action {
        match weights.sample(rng) {
            Ok(kind) => Action::new(kind),
            Err(err) => {
                debug!(%err, "falling back to normal attack");
                Action::default()
            }
        }
    }

    /// Build the adjusted weight table
    pub fn weigh(
        &self,
        me: &Combatant,
        analysis: &ThreatAnalysis,
        profile: &AIProfile,
        memory: &AIMemory,
    ) -> WeightedChoices<ActionKind> {
        let mut w: WeightedChoices<ActionKind> = BASE_WEIGHTS.into_iter().collect();
        let my_health = me.health_ratio();

        // Threat level
        match analysis.threat_level {
            ThreatLevel::Critical => {
                w.scale(ActionKind::Defend, 2.0);
                w.scale(ActionKind::TacticalRetreat, 2.0);
                w.scale(ActionKind::HeavyAttack, 1.5);
            }
            ThreatLevel::High => {
                w.scale(ActionKind::Defend, 1.5);
                w.scale(ActionKind::HeavyAttack, 1.3);
            }
            ThreatLevel::Medium => {}
            ThreatLevel::Low | ThreatLevel::Minimal => {
                w.scale(ActionKind::NormalAttack, 1.3);
                w.scale(ActionKind::HeavyAttack, 1.2);
                w.scale(ActionKind::Defend, 0.5);
                w.scale(ActionKind::TacticalRetreat, 0.5);
            }
        }

        // Opponent vulnerability
        if analysis.is_vulnerable() {
            w.scale(ActionKind::OpportunisticStrike, 20.0);
            w.scale(ActionKind::HeavyAttack, 3.0);
            w.scale(ActionKind::Defend, 0.05);
            w.scale(ActionKind::TacticalRetreat, 0.05);
            w.scale(ActionKind::StatusFocus, 0.5);
        }
        if analysis.has_damage_over_time() {
            w.scale(ActionKind::StatusFocus, 0.2);
        }

        // Own health
        if my_health < 0.25 {
            w.scale(ActionKind::DesperateAttack, 12.0);
            w.scale(ActionKind::HeavyAttack, 1.5);
            w.scale(ActionKind::Defend, 0.8);
        } else if my_health < 0.5 {
            w.scale(ActionKind::DesperateAttack, 4.0);
            w.scale(ActionKind::Defend, 1.3);
            w.scale(ActionKind::TacticalRetreat, 1.5);
        }

        // Opponent near death
        if analysis.health_ratio < 0.3 {
            w.scale(ActionKind::HeavyAttack, 2.5);
            w.scale(ActionKind::OpportunisticStrike, 4.0);
            w.scale(ActionKind::DesperateAttack, 2.0);
            w.scale(ActionKind::Defend, 0.5);
            w.scale(ActionKind::TacticalRetreat, 0.3);
        }

        // Personality
        let aggression = profile.aggression;
        let caution = profile.self_preservation;
        w.scale(ActionKind::NormalAttack, 1.0 + 0.5 * aggression);
        w.scale(ActionKind::HeavyAttack, 1.0 + aggression);
        w.scale(ActionKind::DesperateAttack, 1.0 + aggression);
        w.scale(ActionKind::Defend, 1.0 + caution);
        let retreat_bias = if my_health < 0.5 { 3.0 } else { 1.0 };
        w.scale(ActionKind::TacticalRetreat, 1.0 + caution * retreat_bias);
        w.add(ActionKind::Defend, (caution - aggression) * 0.2);
        w.add(ActionKind::HeavyAttack, (aggression - caution) * 0.1);

        // Short-term memory
        let adaptability = profile.adaptability;
        if adaptability >= ADAPTIVE_THRESHOLD {
            if memory.consecutive_attacks >= ATTACK_STREAK_PIVOT {
                w.scale(ActionKind::Defend, 1.0 + 2.0 * adaptability);
                w.scale(ActionKind::TacticalRetreat, 1.0 + adaptability);
            }
            if memory.consecutive_skills >= SKILL_STREAK_PIVOT {
                w.scale(ActionKind::HeavyAttack, 1.0 + adaptability);
                w.scale(ActionKind::StatusFocus, 1.0 + adaptability);
            }
        }

        w
    }
}
