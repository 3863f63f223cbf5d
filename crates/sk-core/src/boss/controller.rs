//! Boss phase controller
//!
//! Layers boss behavior over the ordinary AI: health-threshold phases with
//! one-shot transition effects, cooldown-gated special abilities and scripted
//! attack patterns. When it neither improvises a special nor follows a
//! pattern, the boss acts like any other enemy.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, info};

use crate::ai::{AIDecisionEngine, AIMemory, AIProfile, ThreatAnalysis, ThreatLevel, WeightedChoices};
use crate::combat::{Action, ActionKind};
use crate::combatant::Combatant;
use crate::config::EngineConfig;
use crate::consts::*;
use crate::rng::GameRng;

use super::{AbilityId, BossKind, PatternQueue};

/// Base chance of improvising a special ability in phase 1
const SPECIAL_BASE_CHANCE: f64 = 0.3;
const SPECIAL_PHASE_STEP: f64 = 0.2;
const SPECIAL_HURT_BONUS: f64 = 0.3;
const SPECIAL_THREAT_BONUS: f64 = 0.2;

/// Chance of following the pattern queue in phase 1
const PATTERN_BASE_CHANCE: f64 = 0.8;
const PATTERN_PHASE_STEP: f64 = 0.2;
const PATTERN_CRITICAL_PENALTY: f64 = 0.3;

/// Abilities excluded from improvisation because they were used last
const RECENT_ABILITY_WINDOW: usize = 2;

/// A one-time phase change
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseTransition {
    pub phase: u8,
    /// Bonus over the boss's unscaled base attack
    pub attack_multiplier: f64,
    /// Attack stat after the transition
    pub attack: i32,
    pub healed: i32,
}

/// Where a boss action came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum DecisionSource {
    Special,
    Pattern,
    Improvised,
}

/// A boss turn's choice plus any phase change it triggered
#[derive(Debug, Clone, PartialEq)]
pub struct BossDecision {
    pub action: Action,
    pub source: DecisionSource,
    pub transitions: Vec<PhaseTransition>,
}

/// Phase index for a health ratio
///
/// Counts the thresholds (all but the last) the ratio is at or below.
pub fn phase_for_ratio(ratio: f64) -> u8 {
    let crossed = BOSS_PHASE_THRESHOLDS[..BOSS_PHASE_THRESHOLDS.len() - 1]
        .iter()
        .filter(|&&t| ratio <= t)
        .count() as u8;
    (1 + crossed).min(BOSS_MAX_PHASE)
}

/// Boss-only battle state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossPhaseController {
    kind: BossKind,
    phase: u8,
    turn_count: u32,
    /// Gate on improvised specials
    special_cooldown: u32,
    cooldowns: HashMap<AbilityId, u32>,
    abilities_used: Vec<AbilityId>,
    patterns: PatternQueue,
}

impl BossPhaseController {
    pub fn new(kind: BossKind, rng: &mut GameRng) -> Self {
        Self {
            kind,
            phase: 1,
            turn_count: 0,
            special_cooldown: 0,
            cooldowns: HashMap::new(),
            abilities_used: Vec::new(),
            patterns: PatternQueue::new(rng),
        }
    }

    pub fn kind(&self) -> BossKind {
        self.kind
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Boss turns taken so far
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn special_cooldown(&self) -> u32 {
        self.special_cooldown
    }

    /// Turns until `ability` may be used again
    pub fn cooldown(&self, ability: AbilityId) -> u32 {
        self.cooldowns.get(&ability).copied().unwrap_or(0)
    }

    pub fn abilities_used(&self) -> &[AbilityId] {
        &self.abilities_used
    }

    /// Flee success chance for a player of `player_level`
    pub fn flee_chance(&self, player_level: u32, config: &EngineConfig) -> f64 {
        if player_level > self.phase as u32 + 2 {
            config.boss_flee_chance_outleveled
        } else {
            config.boss_flee_chance
        }
    }

    /// Advance the phase if the boss's health warrants it
    ///
    /// The phase never goes back down. Each crossed phase fires its effects
    /// once, in order.
    pub fn check_phase(&mut self, boss: &mut Combatant) -> Vec<PhaseTransition> {
        let target = phase_for_ratio(boss.health_ratio());
        let mut transitions = Vec::new();

        while self.phase < target {
            self.phase += 1;
            let mut healed = 0;
            let attack_multiplier = match self.phase {
                2 => {
                    self.special_cooldown = self.special_cooldown.saturating_sub(1);
                    PHASE_2_ATTACK
                }
                _ => {
                    self.special_cooldown = 0;
                    self.cooldowns.clear();
                    healed = boss.heal((boss.health.max() as f64 * PHASE_3_HEAL) as i32);
                    PHASE_3_ATTACK
                }
            };
            boss.set_attack((boss.base_attack as f64 * attack_multiplier) as i32);

            info!(name = %boss.name, phase = self.phase, attack = boss.attack_stat, healed, "boss phase change");
            transitions.push(PhaseTransition {
                phase: self.phase,
                attack_multiplier,
                attack: boss.attack_stat,
                healed,
            });
        }

        transitions
    }

    /// Pick the boss's action for this turn
    pub fn choose_action(
        &mut self,
        boss: &mut Combatant,
        opponent: &Combatant,
        profile: &AIProfile,
        memory: &AIMemory,
        rng: &mut GameRng,
    ) -> BossDecision {
        self.turn_count += 1;
        let analysis = ThreatAnalysis::of(opponent);
        let transitions = self.check_phase(boss);
        self.tick_cooldowns();

        if self.special_cooldown == 0 && rng.chance(self.special_chance(boss, &analysis)) {
            if let Some(ability) = self.choose_special(boss, opponent, rng) {
                debug!(name = %boss.name, %ability, "boss improvises");
                return BossDecision {
                    action: Action::special(ability),
                    source: DecisionSource::Special,
                    transitions,
                };
            }
        }

        if rng.chance(self.pattern_chance(&analysis)) {
            let step = self.patterns.next_step(rng);
            let action = self.pattern_action(step);
            debug!(name = %boss.name, kind = %action.kind, "boss follows pattern");
            return BossDecision {
                action,
                source: DecisionSource::Pattern,
                transitions,
            };
        }

        let action = AIDecisionEngine::new().choose_with_analysis(boss, &analysis, profile, memory, rng);
        BossDecision {
            action,
            source: DecisionSource::Improvised,
            transitions,
        }
    }

    fn tick_cooldowns(&mut self) {
        self.special_cooldown = self.special_cooldown.saturating_sub(1);
        for turns in self.cooldowns.values_mut() {
            *turns = turns.saturating_sub(1);
        }
    }

    /// Chance of trying a special: rises with phase, low boss health and a dangerous opponent
    pub fn special_chance(&self, boss: &Combatant, analysis: &ThreatAnalysis) -> f64 {
        let mut chance = SPECIAL_BASE_CHANCE + SPECIAL_PHASE_STEP * (self.phase - 1) as f64;
        if boss.health_ratio() < 0.5 {
            chance += SPECIAL_HURT_BONUS;
        }
        if analysis.threat_level.is_dangerous() {
            chance += SPECIAL_THREAT_BONUS;
        }
        chance
    }

    /// Chance of following the pattern queue
    pub fn pattern_chance(&self, analysis: &ThreatAnalysis) -> f64 {
        let mut chance = PATTERN_BASE_CHANCE - PATTERN_PHASE_STEP * (self.phase - 1) as f64;
        if analysis.threat_level == ThreatLevel::Critical {
            chance -= PATTERN_CRITICAL_PENALTY;
        }
        chance
    }

    fn ability_weight(&self, ability: AbilityId, boss: &Combatant, opponent: &Combatant) -> f64 {
        let spec = ability.spec();
        let mut weight = 1.0;
        if spec.is_heal() && boss.health_ratio() < 0.4 {
            weight *= 3.0;
        }
        if opponent.health_ratio() < 0.3 && spec.damage_multiplier > 1.0 {
            weight *= 2.0;
        }
        if opponent.level >= 4 && spec.is_debuff() {
            weight *= 1.5;
        }
        weight
    }

    /// Weight-sample a ready ability, skipping the last two used when possible
    fn choose_special(&mut self, boss: &Combatant, opponent: &Combatant, rng: &mut GameRng) -> Option<AbilityId> {
        let ready: Vec<AbilityId> = self
            .kind
            .abilities()
            .into_iter()
            .filter(|&a| self.cooldown(a) == 0)
            .collect();
        if ready.is_empty() {
            return None;
        }

        let recent_from = self.abilities_used.len().saturating_sub(RECENT_ABILITY_WINDOW);
        let recent = &self.abilities_used[recent_from..];
        let fresh: Vec<AbilityId> = ready.iter().copied().filter(|a| !recent.contains(a)).collect();
        let pool = if fresh.is_empty() { ready } else { fresh };

        let weights: WeightedChoices<AbilityId> = pool
            .iter()
            .map(|&a| (a, self.ability_weight(a, boss, opponent)))
            .collect();
        let ability = weights.sample(rng).ok().or_else(|| pool.first().copied())?;

        self.mark_used(ability);
        self.special_cooldown = ability.spec().cooldown;
        Some(ability)
    }

    /// Turn a pattern step into an action; unusable abilities become a normal attack
    fn pattern_action(&mut self, step: ActionKind) -> Action {
        match step {
            ActionKind::SpecialAbility(ability) if self.kind.knows(ability) && self.cooldown(ability) == 0 => {
                self.mark_used(ability);
                Action::special(ability)
            }
            ActionKind::SpecialAbility(_) => Action::default(),
            other => Action::new(other),
        }
    }

    fn mark_used(&mut self, ability: AbilityId) {
        self.abilities_used.push(ability);
        self.cooldowns.insert(ability, ability.spec().cooldown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boss(kind: BossKind) -> Combatant {
        Combatant::boss("Warden", 200, 20, kind)
    }

    #[test]
    fn test_phase_for_ratio() {
        assert_eq!(phase_for_ratio(1.0), 1);
        assert_eq!(phase_for_ratio(0.67), 1);
        assert_eq!(phase_for_ratio(0.66), 2);
        assert_eq!(phase_for_ratio(0.34), 2);
        assert_eq!(phase_for_ratio(0.33), 3);
        assert_eq!(phase_for_ratio(0.0), 3);
    }

    #[test]
    fn test_phase_two_effects() {
        let mut rng = GameRng::new(1);
        let mut ctl = BossPhaseController::new(BossKind::Standard, &mut rng);
        ctl.special_cooldown = 3;
        let mut b = boss(BossKind::Standard).with_health(120, 200);

        let transitions = ctl.check_phase(&mut b);
        assert_eq!(transitions.len(), 1);
        assert_eq!(ctl.phase(), 2);
        assert_eq!(transitions[0].attack_multiplier, PHASE_2_ATTACK);
        assert_eq!(b.attack_stat, 28);
        assert_eq!(ctl.special_cooldown(), 2);
        assert_eq!(b.health.current(), 120);
    }

    #[test]
    fn test_phase_three_once_and_never_regresses() {
        let mut rng = GameRng::new(2);
        let mut ctl = BossPhaseController::new(BossKind::Lich, &mut rng);
        let mut b = boss(BossKind::Lich).with_health(120, 200);
        ctl.check_phase(&mut b);
        ctl.cooldowns.insert(AbilityId::LifeDrain, 4);

        b.health.set_current(65);
        let transitions = ctl.check_phase(&mut b);
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].phase, 3);
        assert_eq!(transitions[0].healed, 20);
        assert_eq!(b.health.current(), 85);
        assert_eq!(b.attack_stat, 32);
        assert_eq!(ctl.cooldown(AbilityId::LifeDrain), 0);

        assert!(ctl.check_phase(&mut b).is_empty());
        assert_eq!(ctl.phase(), 3);
    }

    #[test]
    fn test_skipped_phase_fires_both_transitions() {
        let mut rng = GameRng::new(3);
        let mut ctl = BossPhaseController::new(BossKind::Giant, &mut rng);
        let mut b = boss(BossKind::Giant).with_health(10, 200);
        let phases: Vec<u8> = ctl.check_phase(&mut b).iter().map(|t| t.phase).collect();
        assert_eq!(phases, vec![2, 3]);
    }

    #[test]
    fn test_phase_attack_relative_to_unscaled_base() {
        let mut rng = GameRng::new(10);
        let mut ctl = BossPhaseController::new(BossKind::Standard, &mut rng);
        let mut b = Combatant::boss_from_base("Warlord", 100, 20, BossKind::Standard);
        assert_eq!(b.attack_stat, 24);

        b.health.set_current(90);
        let transitions = ctl.check_phase(&mut b);
        assert_eq!(transitions[0].attack, 28);
        assert_eq!(b.attack_stat, 28);

        b.health.set_current(45);
        ctl.check_phase(&mut b);
        assert_eq!(b.attack_stat, 32);
    }

    #[test]
    fn test_hurt_boss_favors_healing() {
        let mut rng = GameRng::new(11);
        let ctl = BossPhaseController::new(BossKind::Lich, &mut rng);
        let player = Combatant::player("Hero");
        let healthy = boss(BossKind::Lich);
        let hurt = boss(BossKind::Lich).with_health(70, 200);

        assert_eq!(ctl.ability_weight(AbilityId::Regenerate, &healthy, &player), 1.0);
        assert_eq!(ctl.ability_weight(AbilityId::Regenerate, &hurt, &player), 3.0);
        assert_eq!(ctl.ability_weight(AbilityId::LifeDrain, &hurt, &player), 1.0);
    }

    #[test]
    fn test_near_dead_opponent_favors_burst() {
        let mut rng = GameRng::new(12);
        let ctl = BossPhaseController::new(BossKind::Lich, &mut rng);
        let b = boss(BossKind::Lich);
        let dying = Combatant::player("Hero").with_health(20, 100);

        assert_eq!(ctl.ability_weight(AbilityId::LifeDrain, &b, &dying), 2.0);
        assert_eq!(ctl.ability_weight(AbilityId::AreaAttack, &b, &dying), 2.0);
        assert_eq!(ctl.ability_weight(AbilityId::SummonMinions, &b, &dying), 1.0);
    }

    #[test]
    fn test_veteran_opponent_favors_debuffs() {
        let mut rng = GameRng::new(13);
        let ctl = BossPhaseController::new(BossKind::Giant, &mut rng);
        let b = boss(BossKind::Giant);
        let novice = Combatant::player("Hero").with_level(3);
        let veteran = Combatant::player("Hero").with_level(4);

        assert_eq!(ctl.ability_weight(AbilityId::Intimidate, &b, &novice), 1.0);
        assert_eq!(ctl.ability_weight(AbilityId::Intimidate, &b, &veteran), 1.5);
        assert_eq!(ctl.ability_weight(AbilityId::Cleave, &b, &veteran), 1.0);
    }

    #[test]
    fn test_flee_chance() {
        let mut rng = GameRng::new(4);
        let ctl = BossPhaseController::new(BossKind::Dragon, &mut rng);
        let config = EngineConfig::default();
        assert_eq!(ctl.flee_chance(3, &config), 0.3);
        assert_eq!(ctl.flee_chance(4, &config), 0.5);
    }

    #[test]
    fn test_special_avoids_recent_abilities() {
        let mut rng = GameRng::new(5);
        let mut ctl = BossPhaseController::new(BossKind::Standard, &mut rng);
        let b = boss(BossKind::Standard);
        let player = Combatant::player("Hero");
        ctl.abilities_used = vec![AbilityId::Cleave, AbilityId::Intimidate];

        for _ in 0..20 {
            let mut attempt = ctl.clone();
            let ability = attempt.choose_special(&b, &player, &mut rng);
            assert!(matches!(
                ability,
                Some(AbilityId::BerserkerRage | AbilityId::Regenerate)
            ));
            assert!(attempt.special_cooldown() > 0);
        }
    }

    #[test]
    fn test_special_skips_abilities_on_cooldown() {
        let mut rng = GameRng::new(6);
        let mut ctl = BossPhaseController::new(BossKind::Standard, &mut rng);
        let b = boss(BossKind::Standard);
        let player = Combatant::player("Hero");
        for ability in BossKind::Standard.abilities() {
            ctl.cooldowns.insert(ability, 2);
        }
        assert_eq!(ctl.choose_special(&b, &player, &mut rng), None);

        ctl.cooldowns.insert(AbilityId::Cleave, 0);
        ctl.abilities_used = vec![AbilityId::Cleave];
        assert_eq!(ctl.choose_special(&b, &player, &mut rng), Some(AbilityId::Cleave));
    }

    #[test]
    fn test_pattern_step_degrades_when_unusable() {
        let mut rng = GameRng::new(7);
        let mut ctl = BossPhaseController::new(BossKind::Dragon, &mut rng);

        let lacks = ctl.pattern_action(ActionKind::SpecialAbility(AbilityId::Regenerate));
        assert_eq!(lacks.kind, ActionKind::NormalAttack);

        let cleave = ctl.pattern_action(ActionKind::SpecialAbility(AbilityId::Cleave));
        assert_eq!(cleave.kind, ActionKind::SpecialAbility(AbilityId::Cleave));
        assert_eq!(ctl.cooldown(AbilityId::Cleave), 3);
        assert_eq!(ctl.special_cooldown(), 0);

        let again = ctl.pattern_action(ActionKind::SpecialAbility(AbilityId::Cleave));
        assert_eq!(again.kind, ActionKind::NormalAttack);

        let heavy = ctl.pattern_action(ActionKind::HeavyAttack);
        assert_eq!(heavy.damage_multiplier, 1.5);
    }

    #[test]
    fn test_chances_scale_with_phase() {
        let mut rng = GameRng::new(8);
        let mut ctl = BossPhaseController::new(BossKind::Standard, &mut rng);
        let b = boss(BossKind::Standard);
        let calm = ThreatAnalysis::of(&Combatant::player("Hero"));
        assert!((ctl.special_chance(&b, &calm) - 0.3).abs() < 1e-9);
        assert!((ctl.pattern_chance(&calm) - 0.8).abs() < 1e-9);

        ctl.phase = 3;
        let hurt = b.clone().with_health(40, 200);
        assert!((ctl.special_chance(&hurt, &calm) - 1.0).abs() < 1e-9);
        assert!((ctl.pattern_chance(&calm) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_choose_action_counts_turns() {
        let mut rng = GameRng::new(9);
        let mut ctl = BossPhaseController::new(BossKind::Giant, &mut rng);
        let mut b = boss(BossKind::Giant);
        let player = Combatant::player("Hero");
        let profile = AIProfile::default();
        let memory = AIMemory::new();
        for _ in 0..5 {
            ctl.choose_action(&mut b, &player, &profile, &memory, &mut rng);
        }
        assert_eq!(ctl.turn_count(), 5);
    }
}
