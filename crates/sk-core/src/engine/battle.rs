//! One battle, round by round

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, info};

use crate::ai::{AIDecisionEngine, AIMemory, AIProfile};
use crate::boss::{AbilityOutcome, BossKind, BossPhaseController};
use crate::combat::{
    Action, ActionKind, PlayerAction, Rewards, SkillKind, boss_rewards, enemy_rewards, final_damage,
};
use crate::combatant::{Combatant, CombatantKind};
use crate::config::EngineConfig;
use crate::consts::*;
use crate::error::CombatError;
use crate::rng::GameRng;
use crate::status::EffectKind;

use super::{CombatEvent, PlayerActionSource, Side};

/// How a battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Outcome {
    Victory,
    Defeat,
    Fled,
    /// Turn cap reached with both sides standing
    Draw,
}

/// What the host gets back when a battle ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatResult {
    pub outcome: Outcome,
    pub turns: u32,
    /// Present only on victory
    pub rewards: Option<Rewards>,
    pub player_health: i32,
    pub opponent_health: i32,
    /// Final phase when the opponent was a boss
    pub boss_phase: Option<u8>,
    pub log: Vec<CombatEvent>,
}

/// The non-player side: its stats, mind, and boss state if any
#[derive(Debug, Clone)]
pub struct Opponent {
    pub combatant: Combatant,
    pub profile: AIProfile,
    pub memory: AIMemory,
    pub boss: Option<BossPhaseController>,
}

impl Opponent {
    /// Wrap a combatant; boss kinds get a phase controller
    pub fn new(combatant: Combatant, profile: AIProfile, rng: &mut GameRng) -> Self {
        let boss = match combatant.kind {
            CombatantKind::Boss(kind) => Some(BossPhaseController::new(kind, rng)),
            CombatantKind::Enemy | CombatantKind::Player => None,
        };
        Self {
            combatant,
            profile,
            memory: AIMemory::new(),
            boss,
        }
    }

    pub fn boss_kind(&self) -> Option<BossKind> {
        self.boss.as_ref().map(BossPhaseController::kind)
    }

    pub fn boss_phase(&self) -> Option<u8> {
        self.boss.as_ref().map(BossPhaseController::phase)
    }
}

/// Battle state owned for the length of one fight
#[derive(Debug, Clone)]
pub struct Battle {
    pub player: Combatant,
    pub opponent: Opponent,
    config: EngineConfig,
    round: u32,
    outcome: Option<Outcome>,
    log: Vec<CombatEvent>,
}

impl Battle {
    pub fn new(player: Combatant, opponent: Opponent, config: EngineConfig) -> Self {
        Self {
            player,
            opponent,
            config,
            round: 0,
            outcome: None,
            log: Vec::new(),
        }
    }

    /// Rounds started so far
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn log(&self) -> &[CombatEvent] {
        &self.log
    }

    /// Play one full round: player turn, then opponent turn
    ///
    /// Returns the outcome once the battle has ended; further calls are no-ops.
    pub fn play_round(&mut self, source: &mut dyn PlayerActionSource, rng: &mut GameRng) -> Option<Outcome> {
        if self.outcome.is_some() {
            return self.outcome;
        }

        self.round += 1;
        self.log.push(CombatEvent::RoundStarted { round: self.round });

        if let Some(outcome) = self.player_turn(source, rng) {
            return self.end(outcome);
        }
        if !self.opponent.combatant.is_alive() {
            return self.end(Outcome::Victory);
        }

        if let Some(outcome) = self.opponent_turn(rng) {
            return self.end(outcome);
        }
        if !self.player.is_alive() {
            return self.end(Outcome::Defeat);
        }

        if self.round >= self.config.max_turns {
            return self.end(Outcome::Draw);
        }
        None
    }

    fn end(&mut self, outcome: Outcome) -> Option<Outcome> {
        info!(%outcome, round = self.round, "battle over");
        self.outcome = Some(outcome);
        self.outcome
    }

    fn player_turn(&mut self, source: &mut dyn PlayerActionSource, rng: &mut GameRng) -> Option<Outcome> {
        let stunned = self.player.is_stunned();
        for tick in self.player.tick_status() {
            self.log.push(CombatEvent::tick(Side::Player, &tick));
        }
        if !self.player.is_alive() {
            return Some(Outcome::Defeat);
        }
        if stunned {
            debug!(name = %self.player.name, "stunned, skipping turn");
            self.log.push(CombatEvent::Stunned { target: Side::Player });
            return None;
        }

        for _ in 0..=self.config.max_action_retries {
            let action = source.next_action(&self.player, &self.opponent.combatant);
            match self.apply_player_action(action, rng) {
                Ok(outcome) => return outcome,
                Err(err) => {
                    debug!(%action, %err, "player action rejected");
                    self.log.push(CombatEvent::ActionRejected {
                        action,
                        reason: err.to_string(),
                    });
                    source.action_rejected(action, &err);
                }
            }
        }

        self.log.push(CombatEvent::TurnForfeited);
        None
    }

    /// Check a player action without changing anything
    pub fn validate_player_action(&self, action: PlayerAction) -> Result<(), CombatError> {
        let player = &self.player;
        match action {
            PlayerAction::CastSkill(skill) => {
                if !player.knows_skill(skill) {
                    return Err(CombatError::SkillNotLearned(skill));
                }
                let cost = skill.spec().cost;
                if player.mana.current < cost {
                    return Err(CombatError::InsufficientResource {
                        action: skill.to_string(),
                        resource: "mana",
                        required: cost,
                        available: player.mana.current,
                    });
                }
            }
            PlayerAction::EatRation if player.rations == 0 => {
                return Err(CombatError::InsufficientResource {
                    action: action.to_string(),
                    resource: "rations",
                    required: 1,
                    available: 0,
                });
            }
            PlayerAction::CompanionStrike if player.companion.is_none() => {
                return Err(CombatError::InsufficientResource {
                    action: action.to_string(),
                    resource: "companion",
                    required: 1,
                    available: 0,
                });
            }
            _ => {}
        }
        Ok(())
    }

    /// Resolve a player action against the opponent
    ///
    /// A rejected action changes nothing. An accepted one is recorded in the
    /// opponent's memory and followed by a boss phase check.
    pub fn apply_player_action(
        &mut self,
        action: PlayerAction,
        rng: &mut GameRng,
    ) -> Result<Option<Outcome>, CombatError> {
        self.validate_player_action(action)?;
        debug!(name = %self.player.name, %action, "player acts");
        self.log.push(CombatEvent::PlayerActed { action });
        self.opponent.memory.update(action.observed());

        match action {
            PlayerAction::Attack => {
                if self.opponent.combatant.try_dodge(rng) {
                    self.log.push(CombatEvent::Dodged { target: Side::Opponent });
                } else {
                    let roll = self.player.roll_attack(rng, self.config.crit_multiplier);
                    let damage = final_damage(roll.damage, 1.0, self.opponent.combatant.defense_value());
                    self.hit(Side::Opponent, damage, roll.critical);
                }
            }
            PlayerAction::Defend => {
                self.player.apply_effect(EffectKind::Shield, DEFEND_SHIELD_TURNS);
                self.log.push(CombatEvent::EffectApplied {
                    target: Side::Player,
                    kind: EffectKind::Shield,
                    turns: DEFEND_SHIELD_TURNS,
                });
                if rng.chance(DEFEND_HEAL_CHANCE) {
                    let amount = rng.range_inclusive(DEFEND_HEAL_MIN, DEFEND_HEAL_MAX);
                    self.heal(Side::Player, amount);
                }
            }
            PlayerAction::CastSkill(skill) => {
                let spec = skill.spec();
                self.player.mana.try_spend(spec.cost);
                match spec.kind {
                    SkillKind::Strike { damage, inflicts } => {
                        let multiplier = match self.opponent.boss_phase() {
                            Some(phase) if phase >= 2 => self.config.boss_phase_skill_bonus,
                            _ => 1.0,
                        };
                        let damage = final_damage(damage, multiplier, self.opponent.combatant.defense_value());
                        self.hit(Side::Opponent, damage, false);

                        let (chance, turns) = if self.opponent.boss.is_some() {
                            (self.config.boss_skill_effect_chance, self.config.boss_skill_effect_duration)
                        } else {
                            (self.config.skill_effect_chance, self.config.skill_effect_duration)
                        };
                        if self.opponent.combatant.is_alive() && rng.chance(chance) {
                            self.inflict(Side::Opponent, inflicts, turns);
                        }
                    }
                    SkillKind::Restore { heal } => self.heal(Side::Player, heal),
                    SkillKind::Ward { effect, turns } => self.inflict(Side::Player, effect, turns),
                }
            }
            PlayerAction::EatRation => {
                self.player.rations -= 1;
                self.heal(Side::Player, RATION_HEAL);
            }
            PlayerAction::CompanionStrike => {
                let level = self.player.companion.as_ref().map_or(0, |c| c.level as i32);
                let roll = rng.range_inclusive(COMPANION_STRIKE_MIN, COMPANION_STRIKE_MAX) + level;
                let damage = final_damage(roll, 1.0, self.opponent.combatant.defense_value());
                self.hit(Side::Opponent, damage, false);
            }
            PlayerAction::Flee => {
                let chance = match &self.opponent.boss {
                    Some(boss) => boss.flee_chance(self.player.level, &self.config),
                    None => self.config.flee_chance,
                };
                if rng.chance(chance) {
                    self.log.push(CombatEvent::Fled);
                    return Ok(Some(Outcome::Fled));
                }
                self.log.push(CombatEvent::FleeFailed);
            }
        }

        self.check_boss_phase();
        Ok(None)
    }

    fn check_boss_phase(&mut self) {
        let Opponent { combatant, boss, .. } = &mut self.opponent;
        let Some(boss) = boss else { return };
        if !combatant.is_alive() {
            return;
        }
        for transition in boss.check_phase(combatant) {
            self.log.push(CombatEvent::phase(&transition));
        }
    }

    fn opponent_turn(&mut self, rng: &mut GameRng) -> Option<Outcome> {
        let stunned = self.opponent.combatant.is_stunned();
        for tick in self.opponent.combatant.tick_status() {
            self.log.push(CombatEvent::tick(Side::Opponent, &tick));
        }
        if !self.opponent.combatant.is_alive() {
            return Some(Outcome::Victory);
        }
        if stunned {
            debug!(name = %self.opponent.combatant.name, "stunned, skipping turn");
            self.log.push(CombatEvent::Stunned { target: Side::Opponent });
            return None;
        }

        let Opponent {
            combatant,
            profile,
            memory,
            boss,
        } = &mut self.opponent;

        let (action, source) = match boss {
            Some(boss) => {
                let decision = boss.choose_action(combatant, &self.player, profile, memory, rng);
                for transition in &decision.transitions {
                    self.log.push(CombatEvent::phase(transition));
                }
                (decision.action, Some(decision.source))
            }
            None => (
                AIDecisionEngine::new().choose_action(combatant, &self.player, profile, memory, rng),
                None,
            ),
        };

        self.log.push(CombatEvent::OpponentActed {
            action: action.kind,
            source,
        });
        self.apply_opponent_action(action, rng);
        None
    }

    /// Resolve an opponent action against the player
    pub fn apply_opponent_action(&mut self, action: Action, rng: &mut GameRng) {
        debug!(name = %self.opponent.combatant.name, kind = %action.kind, "opponent acts");

        match action.kind {
            ActionKind::SpecialAbility(ability) => {
                let outcome = ability.execute(
                    &mut self.opponent.combatant,
                    &mut self.player,
                    rng,
                    self.config.crit_multiplier,
                );
                self.log_ability(&outcome);
            }
            ActionKind::Defend => {
                self.inflict(Side::Opponent, EffectKind::Shield, DEFEND_SHIELD_TURNS);
            }
            kind => {
                if kind == ActionKind::TacticalRetreat {
                    self.inflict(Side::Opponent, EffectKind::Regenerate, RETREAT_REGEN_TURNS);
                }

                if self.player.try_dodge(rng) {
                    self.log.push(CombatEvent::Dodged { target: Side::Player });
                    return;
                }
                let roll = self.opponent.combatant.roll_attack(rng, self.config.crit_multiplier);
                let damage = final_damage(roll.damage, action.damage_multiplier, self.player.defense_value());
                self.hit(Side::Player, damage, roll.critical);

                if kind == ActionKind::StatusFocus && self.player.is_alive() {
                    let effect = if self.player.status.is_active(EffectKind::Poison) {
                        EffectKind::Burn
                    } else {
                        EffectKind::Poison
                    };
                    self.inflict(Side::Player, effect, STATUS_FOCUS_TURNS);
                }
            }
        }
    }

    fn log_ability(&mut self, outcome: &AbilityOutcome) {
        if outcome.stunned {
            self.log.push(CombatEvent::EffectApplied {
                target: Side::Player,
                kind: EffectKind::Stun,
                turns: 1,
            });
        }
        if outcome.shield_broken {
            self.log.push(CombatEvent::ShieldBroken {
                target: Side::Player,
                by: outcome.ability,
            });
        }
        if outcome.dodged {
            self.log.push(CombatEvent::Dodged { target: Side::Player });
        } else if outcome.ability.spec().deals_damage() {
            self.log.push(CombatEvent::Damaged {
                target: Side::Player,
                amount: outcome.damage,
                critical: outcome.critical,
            });
        }
        if outcome.healed > 0 {
            self.log.push(CombatEvent::Healed {
                target: Side::Opponent,
                amount: outcome.healed,
            });
        }
    }

    fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent.combatant,
        }
    }

    fn hit(&mut self, target: Side, damage: i32, critical: bool) {
        let amount = self.combatant_mut(target).apply_damage(damage);
        self.log.push(CombatEvent::Damaged {
            target,
            amount,
            critical,
        });
    }

    fn heal(&mut self, target: Side, amount: i32) {
        let amount = self.combatant_mut(target).heal(amount);
        self.log.push(CombatEvent::Healed { target, amount });
    }

    fn inflict(&mut self, target: Side, kind: EffectKind, turns: u32) {
        self.combatant_mut(target).apply_effect(kind, turns);
        self.log.push(CombatEvent::EffectApplied { target, kind, turns });
    }

    /// Close the battle and compute rewards
    pub fn finish(self, rng: &mut GameRng) -> CombatResult {
        let outcome = self.outcome.unwrap_or(Outcome::Draw);
        let rewards = (outcome == Outcome::Victory).then(|| match &self.opponent.boss {
            Some(boss) => boss_rewards(boss.kind(), boss.phase(), boss.turn_count()),
            None => enemy_rewards(&self.opponent.combatant, rng),
        });

        CombatResult {
            outcome,
            turns: self.round,
            rewards,
            player_health: self.player.health.current(),
            opponent_health: self.opponent.combatant.health.current(),
            boss_phase: self.opponent.boss_phase(),
            log: self.log,
        }
    }
}

/// Runs whole battles with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct TurnEngine {
    config: EngineConfig,
}

impl TurnEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Fight until one side falls, the player flees or the turn cap is hit
    pub fn run<S: PlayerActionSource>(
        &self,
        player: Combatant,
        opponent: Opponent,
        source: &mut S,
        rng: &mut GameRng,
    ) -> CombatResult {
        info!(
            player = %player.name,
            opponent = %opponent.combatant.name,
            boss = ?opponent.boss_kind(),
            seed = rng.seed(),
            "battle start"
        );
        let mut battle = Battle::new(player, opponent, self.config.clone());
        while battle.play_round(source, rng).is_none() {}
        battle.finish(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Personality;
    use crate::combat::SkillId;
    use crate::combatant::{AttackProfile, Equipment};
    use crate::engine::ScriptedActions;

    fn battle(enemy: Combatant) -> Battle {
        let mut rng = GameRng::new(0);
        let opponent = Opponent::new(enemy, AIProfile::default(), &mut rng);
        Battle::new(Combatant::player("Hero"), opponent, EngineConfig::default())
    }

    #[test]
    fn test_unknown_skill_rejected_without_cost() {
        let mut b = battle(Combatant::enemy("Imp", 30, 5));
        let mut rng = GameRng::new(1);
        let err = b
            .apply_player_action(PlayerAction::CastSkill(SkillId::Lightning), &mut rng)
            .unwrap_err();
        assert_eq!(err, CombatError::SkillNotLearned(SkillId::Lightning));
        assert_eq!(b.player.mana.current, 50);
        assert!(b.log().is_empty());
        assert_eq!(b.opponent.memory.observed_turns, 0);
    }

    #[test]
    fn test_insufficient_mana_rejected() {
        let mut b = battle(Combatant::enemy("Imp", 30, 5));
        b.player.mana.current = 4;
        let mut rng = GameRng::new(1);
        let err = b
            .apply_player_action(PlayerAction::CastSkill(SkillId::Fireball), &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            CombatError::InsufficientResource {
                resource: "mana",
                required: 10,
                available: 4,
                ..
            }
        ));
    }

    #[test]
    fn test_fireball_spends_mana_and_damages() {
        let mut b = battle(Combatant::enemy("Imp", 100, 5));
        let mut rng = GameRng::new(2);
        b.apply_player_action(PlayerAction::CastSkill(SkillId::Fireball), &mut rng)
            .unwrap();
        assert_eq!(b.player.mana.current, 40);
        assert_eq!(b.opponent.combatant.health.current(), 70);
        assert_eq!(b.opponent.memory.consecutive_skills, 1);
    }

    #[test]
    fn test_rejected_actions_forfeit_turn() {
        let mut b = battle(Combatant::enemy("Imp", 100, 0));
        b.player.rations = 0;
        let mut source = ScriptedActions::repeat(PlayerAction::EatRation);
        let mut rng = GameRng::new(3);
        b.play_round(&mut source, &mut rng);
        assert_eq!(source.rejected().len(), 4);
        assert!(b.log().contains(&CombatEvent::TurnForfeited));
    }

    #[test]
    fn test_ration_heals_and_is_consumed() {
        let mut b = battle(Combatant::enemy("Imp", 100, 0));
        b.player.health.set_current(50);
        let mut rng = GameRng::new(4);
        b.apply_player_action(PlayerAction::EatRation, &mut rng).unwrap();
        assert_eq!(b.player.health.current(), 80);
        assert_eq!(b.player.rations, 0);
    }

    #[test]
    fn test_companion_strike_requires_companion() {
        let mut b = battle(Combatant::enemy("Imp", 100, 0));
        let mut rng = GameRng::new(5);
        assert!(b.apply_player_action(PlayerAction::CompanionStrike, &mut rng).is_err());
    }

    #[test]
    fn test_defend_grants_shield() {
        let mut b = battle(Combatant::enemy("Imp", 100, 0));
        let mut rng = GameRng::new(6);
        b.apply_player_action(PlayerAction::Defend, &mut rng).unwrap();
        assert_eq!(b.player.status.duration(EffectKind::Shield), DEFEND_SHIELD_TURNS);
        assert_eq!(b.player.defense_value(), 10);
    }

    #[test]
    fn test_status_focus_poisons_then_burns() {
        let enemy = Combatant::enemy("Asp", 50, 10).with_attack(AttackProfile::new(10, 10));
        let mut b = battle(enemy);
        b.player = b.player.clone().with_chances(0.0, 0.0);
        let mut rng = GameRng::new(7);

        b.apply_opponent_action(Action::new(ActionKind::StatusFocus), &mut rng);
        assert!(b.player.status.is_active(EffectKind::Poison));
        assert_eq!(b.player.health.current(), 93);

        b.apply_opponent_action(Action::new(ActionKind::StatusFocus), &mut rng);
        assert!(b.player.status.is_active(EffectKind::Burn));
    }

    #[test]
    fn test_retreat_regenerates_self() {
        let mut b = battle(Combatant::enemy("Fox", 50, 10));
        let mut rng = GameRng::new(8);
        b.apply_opponent_action(Action::new(ActionKind::TacticalRetreat), &mut rng);
        assert_eq!(
            b.opponent.combatant.status.duration(EffectKind::Regenerate),
            RETREAT_REGEN_TURNS
        );
    }

    #[test]
    fn test_heavy_armor_still_takes_one() {
        let enemy = Combatant::enemy("Gnat", 50, 5).with_attack(AttackProfile::new(5, 5));
        let mut b = battle(enemy);
        b.player = b
            .player
            .clone()
            .with_chances(0.0, 0.0)
            .with_equipment(Equipment { attack: 0, defense: 999 });
        let mut rng = GameRng::new(9);
        b.apply_opponent_action(Action::default(), &mut rng);
        assert_eq!(b.player.health.current(), 99);
    }

    #[test]
    fn test_turn_cap_draws() {
        let config = EngineConfig {
            max_turns: 5,
            ..EngineConfig::default()
        };
        let mut rng = GameRng::new(10);
        let enemy = Combatant::enemy("Wall", 10_000, 0);
        let opponent = Opponent::new(enemy, Personality::Defensive.profile(), &mut rng);
        let player = Combatant::player("Hero").with_health(100_000, 100_000);
        let mut source = ScriptedActions::repeat(PlayerAction::Defend);

        let result = TurnEngine::new(config).run(player, opponent, &mut source, &mut rng);
        assert_eq!(result.outcome, Outcome::Draw);
        assert_eq!(result.turns, 5);
        assert!(result.rewards.is_none());
    }

    #[test]
    fn test_victory_pays_rewards() {
        let mut rng = GameRng::new(11);
        let enemy = Combatant::enemy("Rat", 5, 1);
        let opponent = Opponent::new(enemy, AIProfile::default(), &mut rng);
        let player = Combatant::player("Hero").with_chances(0.0, 0.0);
        let mut source = ScriptedActions::repeat(PlayerAction::Attack);

        let result = TurnEngine::default().run(player, opponent, &mut source, &mut rng);
        assert_eq!(result.outcome, Outcome::Victory);
        assert_eq!(result.turns, 1);
        assert!(result.rewards.is_some_and(|r| r.gold >= 10 && r.exp >= 15));
    }

    #[test]
    fn test_closure_source() {
        let mut rng = GameRng::new(12);
        let enemy = Combatant::enemy("Rat", 5, 1);
        let opponent = Opponent::new(enemy, AIProfile::default(), &mut rng);
        let mut source = |_: &Combatant, _: &Combatant| PlayerAction::Attack;
        let result = TurnEngine::default().run(Combatant::player("Hero"), opponent, &mut source, &mut rng);
        assert_eq!(result.outcome, Outcome::Victory);
    }
}
