//! Combatants
//!
//! One struct serves the player, ordinary enemies and bosses. The kind tag
//! says which; boss-only state lives in [`crate::boss::BossPhaseController`]
//! rather than in a subtype.

mod companion;
mod health;

use serde::{Deserialize, Serialize};

use crate::boss::BossKind;
use crate::combat::SkillId;
use crate::consts::*;
use crate::rng::GameRng;
use crate::status::{EffectKind, StatusEffectTable, TickEvent};

pub use companion::{CombatBonus, Companion};
pub use health::{Health, Pool};

/// Which side of the fight a combatant plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatantKind {
    Player,
    Enemy,
    Boss(BossKind),
}

impl CombatantKind {
    pub const fn is_boss(&self) -> bool {
        matches!(self, CombatantKind::Boss(_))
    }
}

/// Inclusive base damage roll before multipliers and bonuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackProfile {
    pub min: i32,
    pub max: i32,
}

impl AttackProfile {
    pub fn new(min: i32, max: i32) -> Self {
        let min = min.max(0);
        Self {
            min,
            max: max.max(min),
        }
    }

    /// Roll spread around a nominal attack stat (80%..120%)
    pub fn around(attack: i32) -> Self {
        let attack = attack.max(0) as f64;
        Self::new(
            (attack * ENEMY_ATTACK_LOW) as i32,
            (attack * ENEMY_ATTACK_HIGH) as i32,
        )
    }

    /// Midpoint of the roll
    pub fn nominal(&self) -> i32 {
        (self.min + self.max) / 2
    }
}

/// Flat bonuses from worn equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Equipment {
    pub attack: i32,
    pub defense: i32,
}

/// Result of an attack roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackRoll {
    pub damage: i32,
    pub critical: bool,
}

/// A participant in a battle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub kind: CombatantKind,
    pub level: u32,
    pub health: Health,
    pub mana: Pool,
    /// Nominal attack stat the roll is spread around
    pub attack_stat: i32,
    pub attack: AttackProfile,
    /// Attack stat before boss scaling; boss phase bonuses are relative to it
    pub base_attack: i32,
    pub equipment: Equipment,
    /// Host-computed additive bonuses, not counting the companion
    pub bonus: CombatBonus,
    pub companion: Option<Companion>,
    pub status: StatusEffectTable,
    pub dodge_chance_base: f64,
    pub crit_chance_base: f64,
    pub skills: Vec<SkillId>,
    pub rations: u32,
}

impl Combatant {
    fn base(name: impl Into<String>, kind: CombatantKind, max_health: i32, attack: AttackProfile) -> Self {
        Self {
            name: name.into(),
            kind,
            level: 1,
            health: Health::new(max_health),
            mana: Pool::default(),
            attack_stat: attack.nominal(),
            attack,
            base_attack: attack.nominal(),
            equipment: Equipment::default(),
            bonus: CombatBonus::default(),
            companion: None,
            status: StatusEffectTable::new(),
            dodge_chance_base: 0.0,
            crit_chance_base: 0.0,
            skills: Vec::new(),
            rations: 0,
        }
    }

    /// A fresh level-1 player with the starting kit
    pub fn player(name: impl Into<String>) -> Self {
        let mut player = Self::base(
            name,
            CombatantKind::Player,
            PLAYER_MAX_HEALTH,
            AttackProfile::new(PLAYER_ATTACK_MIN, PLAYER_ATTACK_MAX),
        );
        player.mana = Pool::new(PLAYER_MAX_MANA);
        player.dodge_chance_base = PLAYER_DODGE_CHANCE;
        player.crit_chance_base = PLAYER_CRIT_CHANCE;
        player.skills = vec![SkillId::Fireball, SkillId::Heal];
        player.rations = 1;
        player
    }

    /// An ordinary enemy from its health and nominal attack
    pub fn enemy(name: impl Into<String>, health: i32, attack: i32) -> Self {
        let mut enemy = Self::base(name, CombatantKind::Enemy, health, AttackProfile::around(attack));
        enemy.attack_stat = attack.max(0);
        enemy.base_attack = enemy.attack_stat;
        enemy
    }

    /// A boss with final stats; `attack` also serves as the phase base
    pub fn boss(name: impl Into<String>, max_health: i32, attack: i32, kind: BossKind) -> Self {
        let mut boss = Self::enemy(name, max_health, attack);
        boss.kind = CombatantKind::Boss(kind);
        boss
    }

    /// A boss from base stats, applying the boss health and attack scaling
    pub fn boss_from_base(name: impl Into<String>, health: i32, attack: i32, kind: BossKind) -> Self {
        let mut boss = Self::boss(name, (health as f64 * BOSS_HEALTH_SCALE) as i32, attack, kind);
        boss.set_attack((attack as f64 * BOSS_ATTACK_SCALE) as i32);
        boss
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.max(1);
        self
    }

    pub fn with_health(mut self, current: i32, max: i32) -> Self {
        self.health = Health::with_current(current, max);
        self
    }

    pub fn with_mana(mut self, current: i32, max: i32) -> Self {
        self.mana = Pool {
            current: current.clamp(0, max.max(0)),
            max: max.max(0),
        };
        self
    }

    /// Use an explicit roll range; the nominal stat follows its midpoint
    pub fn with_attack(mut self, attack: AttackProfile) -> Self {
        self.attack_stat = attack.nominal();
        self.attack = attack;
        self
    }

    /// Replace the nominal attack stat and respread the roll around it
    pub fn set_attack(&mut self, attack: i32) {
        self.attack_stat = attack.max(0);
        self.attack = AttackProfile::around(self.attack_stat);
    }

    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = equipment;
        self
    }

    pub fn with_bonus(mut self, bonus: CombatBonus) -> Self {
        self.bonus = bonus;
        self
    }

    pub fn with_companion(mut self, companion: Companion) -> Self {
        self.companion = Some(companion);
        self
    }

    pub fn with_skills(mut self, skills: Vec<SkillId>) -> Self {
        self.skills = skills;
        self
    }

    pub fn with_rations(mut self, rations: u32) -> Self {
        self.rations = rations;
        self
    }

    pub fn with_chances(mut self, dodge: f64, crit: f64) -> Self {
        self.dodge_chance_base = dodge;
        self.crit_chance_base = crit;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    pub fn is_boss(&self) -> bool {
        self.kind.is_boss()
    }

    pub fn health_ratio(&self) -> f64 {
        self.health.ratio()
    }

    pub fn is_stunned(&self) -> bool {
        self.status.is_stunned()
    }

    pub fn is_frozen(&self) -> bool {
        self.status.is_frozen()
    }

    /// Host bonus plus whatever the companion grants
    pub fn external_bonus(&self) -> CombatBonus {
        match &self.companion {
            Some(companion) => self.bonus + companion.effective_bonus(),
            None => self.bonus,
        }
    }

    /// Roll outgoing damage with the default crit multiplier
    pub fn attack_damage(&self, rng: &mut GameRng) -> i32 {
        self.roll_attack(rng, CRIT_MULTIPLIER).damage
    }

    /// Roll outgoing damage: base range plus equipment and external
    /// bonuses, times `crit_multiplier` on a crit.
    pub fn roll_attack(&self, rng: &mut GameRng, crit_multiplier: f64) -> AttackRoll {
        let external = self.external_bonus();
        let roll = rng.range_inclusive(self.attack.min, self.attack.max);
        let total = roll + self.equipment.attack + external.attack;

        let critical = rng.chance(self.crit_chance_base + external.crit);
        let damage = if critical {
            (total as f64 * crit_multiplier) as i32
        } else {
            total
        };

        AttackRoll {
            damage: damage.max(0),
            critical,
        }
    }

    /// Equipment defense, active shield and external defense
    pub fn defense_value(&self) -> i32 {
        let total = self.equipment.defense
            + self.status.active_magnitude(EffectKind::Shield)
            + self.external_bonus().defense;
        total.max(0)
    }

    /// Try to dodge an incoming hit; frozen combatants cannot dodge
    pub fn try_dodge(&self, rng: &mut GameRng) -> bool {
        if self.is_frozen() {
            return false;
        }
        rng.chance(self.dodge_chance_base + self.external_bonus().dodge)
    }

    /// Lose health, flooring at 0. Returns the health actually lost.
    pub fn apply_damage(&mut self, amount: i32) -> i32 {
        self.health.damage(amount)
    }

    /// Gain health, capped at max. Returns the health actually gained.
    pub fn heal(&mut self, amount: i32) -> i32 {
        self.health.heal(amount)
    }

    pub fn apply_effect(&mut self, kind: EffectKind, duration: u32) {
        self.status.apply(kind, duration);
    }

    /// Run one turn of status effects
    pub fn tick_status(&mut self) -> Vec<TickEvent> {
        self.status.tick(&mut self.health)
    }

    pub fn knows_skill(&self, skill: SkillId) -> bool {
        self.skills.contains(&skill)
    }

    /// Learned skills the current mana can pay for
    pub fn castable_skills(&self) -> Vec<SkillId> {
        self.skills
            .iter()
            .copied()
            .filter(|s| s.spec().cost <= self.mana.current)
            .collect()
    }
}
