use sk_core::boss::phase_for_ratio;
use sk_core::combatant::{AttackProfile, Equipment};
use sk_core::{
    AIProfile, AbilityId, Battle, BossKind, BossPhaseController, CombatEvent, Combatant,
    EffectKind, EngineConfig, GameRng, Opponent, Outcome, Personality, PlayerAction,
    ScriptedActions, SkillId, StatusEffectTable, TurnEngine, final_damage,
};

fn phase_changes(log: &[CombatEvent], phase: u8) -> usize {
    log.iter()
        .filter(|e| matches!(e, CombatEvent::PhaseChanged { phase: p, .. } if *p == phase))
        .count()
}

#[test]
fn test_stunned_opponent_never_hurts_player() {
    let mut rng = GameRng::new(100);
    let enemy = Combatant::enemy("Statue", 10_000, 0);
    let opponent = Opponent::new(enemy, Personality::Berserker.profile(), &mut rng);
    let mut battle = Battle::new(Combatant::player("Hero"), opponent, EngineConfig::default());
    let mut source = ScriptedActions::repeat(PlayerAction::Attack);

    for _ in 0..10 {
        battle.opponent.combatant.apply_effect(EffectKind::Stun, 1);
        assert_eq!(battle.play_round(&mut source, &mut rng), None);
        assert_eq!(battle.player.health.current(), 100);
    }
    assert_eq!(battle.round(), 10);
}

#[test]
fn test_burn_runs_for_exactly_three_ticks() {
    let mut target = Combatant::enemy("Dummy", 100, 0);
    target.status.apply_with_magnitude(EffectKind::Burn, 3, 5);

    for _ in 0..3 {
        target.tick_status();
    }
    assert_eq!(target.health.current(), 85);

    let events = target.tick_status();
    assert!(events.is_empty());
    assert_eq!(target.health.current(), 85);
}

#[test]
fn test_boss_phase_three_heal_does_not_regress_phase() {
    let mut rng = GameRng::new(7);
    let mut controller = BossPhaseController::new(BossKind::Standard, &mut rng);
    let mut boss = Combatant::boss("Warlord", 200, 20, BossKind::Standard).with_health(65, 200);
    assert_eq!(phase_for_ratio(boss.health_ratio()), 3);

    let transitions = controller.check_phase(&mut boss);
    let entered_three: Vec<_> = transitions.iter().filter(|t| t.phase == 3).collect();
    assert_eq!(entered_three.len(), 1);
    assert_eq!(entered_three[0].healed, 20);
    assert_eq!(boss.health.current(), 85);
    assert_eq!(controller.phase(), 3);

    // Healing well above the phase-2 line keeps the boss in phase 3
    boss.heal(80);
    assert!(boss.health_ratio() > 0.66);
    assert!(controller.check_phase(&mut boss).is_empty());
    assert_eq!(controller.phase(), 3);
}

#[test]
fn test_boss_battle_enters_phase_three_once() {
    let mut rng = GameRng::new(31);
    let boss = Combatant::boss("Warlord", 200, 8, BossKind::Lich).with_health(70, 200);
    let opponent = Opponent::new(boss, AIProfile::default(), &mut rng);
    let player = Combatant::player("Hero").with_health(500, 500);
    let mut source = ScriptedActions::repeat(PlayerAction::Attack);

    let result = TurnEngine::default().run(player, opponent, &mut source, &mut rng);
    assert_eq!(result.outcome, Outcome::Victory);
    assert_eq!(phase_changes(&result.log, 3), 1);
    assert_eq!(result.boss_phase, Some(3));

    let rewards = result.rewards.expect("victory pays out");
    assert_eq!(rewards.items.len(), 1);
    assert_eq!(rewards.exp, 50 + 3 * 25);
}

#[test]
fn test_impenetrable_defense_still_takes_one() {
    assert_eq!(final_damage(5, 1.0, 999), 1);

    let mut rng = GameRng::new(3);
    let enemy = Combatant::enemy("Gnat", 50, 5).with_attack(AttackProfile::new(5, 5));
    let opponent = Opponent::new(enemy, AIProfile::default(), &mut rng);
    let player = Combatant::player("Hero")
        .with_chances(0.0, 0.0)
        .with_equipment(Equipment { attack: 0, defense: 999 });
    let mut battle = Battle::new(player, opponent, EngineConfig::default());

    battle.apply_opponent_action(sk_core::Action::default(), &mut rng);
    assert_eq!(battle.player.health.current(), 99);
}

#[test]
fn test_same_seed_same_battle() {
    let run = |seed: u64| {
        let mut rng = GameRng::new(seed);
        let enemy = Combatant::enemy("Orc", 120, 14);
        let opponent = Opponent::new(enemy, Personality::Tactical.profile(), &mut rng);
        let mut source = ScriptedActions::new([
            PlayerAction::CastSkill(SkillId::Fireball),
            PlayerAction::Defend,
            PlayerAction::Attack,
            PlayerAction::CastSkill(SkillId::Heal),
        ]);
        let result = TurnEngine::default().run(Combatant::player("Hero"), opponent, &mut source, &mut rng);
        serde_json::to_string(&result).expect("result serializes")
    };

    assert_eq!(run(2024), run(2024));
}

#[test]
fn test_same_seed_same_boss_battle() {
    let run = |seed: u64| {
        let mut rng = GameRng::new(seed);
        let boss = Combatant::boss_from_base("Wyrm", 150, 15, BossKind::Dragon);
        let opponent = Opponent::new(boss, Personality::Aggressive.profile(), &mut rng);
        let player = Combatant::player("Hero").with_level(4);
        let mut source = ScriptedActions::repeat(PlayerAction::Attack);
        let result = TurnEngine::default().run(player, opponent, &mut source, &mut rng);
        serde_json::to_string(&result).expect("result serializes")
    };

    assert_eq!(run(77), run(77));
}

#[test]
fn test_boss_only_uses_its_own_abilities() {
    let mut rng = GameRng::new(55);
    let boss = Combatant::boss_from_base("Colossus", 200, 10, BossKind::Giant);
    let opponent = Opponent::new(boss, AIProfile::default(), &mut rng);
    let player = Combatant::player("Hero").with_health(2_000, 2_000);
    let mut source = ScriptedActions::repeat(PlayerAction::Defend);
    let config = EngineConfig {
        max_turns: 40,
        ..EngineConfig::default()
    };

    let result = TurnEngine::new(config).run(player, opponent, &mut source, &mut rng);
    for event in &result.log {
        if let CombatEvent::OpponentActed {
            action: sk_core::ActionKind::SpecialAbility(ability),
            ..
        } = event
        {
            assert!(BossKind::Giant.knows(*ability), "{ability} is not a giant ability");
            assert_ne!(*ability, AbilityId::Regenerate);
        }
    }
}

#[test]
fn test_flee_ends_battle_without_rewards() {
    let mut rng = GameRng::new(9);
    let enemy = Combatant::enemy("Wolf", 300, 5);
    let opponent = Opponent::new(enemy, AIProfile::default(), &mut rng);
    let config = EngineConfig {
        flee_chance: 1.0,
        ..EngineConfig::default()
    };
    let mut source = ScriptedActions::repeat(PlayerAction::Flee);

    let result = TurnEngine::new(config).run(Combatant::player("Hero"), opponent, &mut source, &mut rng);
    assert_eq!(result.outcome, Outcome::Fled);
    assert_eq!(result.turns, 1);
    assert!(result.rewards.is_none());
}

#[test]
fn test_reapplying_effect_replaces_duration() {
    let mut table = StatusEffectTable::new();
    table.apply(EffectKind::Burn, 3);
    table.apply(EffectKind::Burn, 5);
    assert_eq!(table.duration(EffectKind::Burn), 5);
    table.apply(EffectKind::Burn, 2);
    assert_eq!(table.duration(EffectKind::Burn), 2);
}

#[test]
fn test_result_round_trips_through_json() {
    let mut rng = GameRng::new(12);
    let enemy = Combatant::enemy("Rat", 20, 3);
    let opponent = Opponent::new(enemy, AIProfile::default(), &mut rng);
    let mut source = ScriptedActions::repeat(PlayerAction::Attack);
    let result = TurnEngine::default().run(Combatant::player("Hero"), opponent, &mut source, &mut rng);

    let json = serde_json::to_string(&result).expect("serializes");
    let back: sk_core::CombatResult = serde_json::from_str(&json).expect("deserializes");
    assert_eq!(back, result);
}
