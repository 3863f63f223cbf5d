//! Boss special abilities

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::combat::{DefenseMode, ItemId, final_damage_with};
use crate::combatant::Combatant;
use crate::rng::GameRng;
use crate::status::EffectKind;

/// Special ability a boss may know
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
pub enum AbilityId {
    Cleave,
    Intimidate,
    Regenerate,
    BerserkerRage,
    AreaAttack,
    SummonMinions,
    LifeDrain,
    ShieldBreak,
}

/// Side effect attached to an ability
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbilityEffect {
    /// Only half the target's defense applies
    HalfDefense,
    /// Stun the target
    Stun { turns: u32 },
    /// Heal a fraction of max health instead of attacking
    Heal { fraction: f64 },
    /// Multiply the user's attack multiplier
    Rage { factor: f64 },
    /// Cannot be dodged and ignores defense
    Unavoidable,
    /// Minions patch the user up
    Summon { heal: i32 },
    /// Heal a fraction of the damage dealt
    Drain { fraction: f64 },
    /// Ignores defense and strips the target's Shield
    ShieldBreak,
}

/// Static ability data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbilitySpec {
    pub cooldown: u32,
    pub damage_multiplier: f64,
    pub effect: AbilityEffect,
}

impl AbilitySpec {
    pub fn defense_mode(&self) -> DefenseMode {
        match self.effect {
            AbilityEffect::HalfDefense => DefenseMode::Half,
            AbilityEffect::Unavoidable | AbilityEffect::ShieldBreak => DefenseMode::Ignore,
            _ => DefenseMode::Full,
        }
    }

    pub fn dodgeable(&self) -> bool {
        !matches!(self.effect, AbilityEffect::Unavoidable)
    }

    pub fn deals_damage(&self) -> bool {
        self.damage_multiplier > 0.0
    }

    pub fn is_heal(&self) -> bool {
        matches!(self.effect, AbilityEffect::Heal { .. })
    }

    pub fn is_debuff(&self) -> bool {
        matches!(self.effect, AbilityEffect::Stun { .. })
    }
}

impl AbilityId {
    pub const fn spec(self) -> AbilitySpec {
        match self {
            AbilityId::Cleave => AbilitySpec {
                cooldown: 3,
                damage_multiplier: 1.5,
                effect: AbilityEffect::HalfDefense,
            },
            AbilityId::Intimidate => AbilitySpec {
                cooldown: 4,
                damage_multiplier: 0.8,
                effect: AbilityEffect::Stun { turns: 1 },
            },
            AbilityId::Regenerate => AbilitySpec {
                cooldown: 5,
                damage_multiplier: 0.0,
                effect: AbilityEffect::Heal { fraction: 0.15 },
            },
            AbilityId::BerserkerRage => AbilitySpec {
                cooldown: 6,
                damage_multiplier: 0.5,
                effect: AbilityEffect::Rage { factor: 1.3 },
            },
            AbilityId::AreaAttack => AbilitySpec {
                cooldown: 4,
                damage_multiplier: 1.8,
                effect: AbilityEffect::Unavoidable,
            },
            AbilityId::SummonMinions => AbilitySpec {
                cooldown: 7,
                damage_multiplier: 0.3,
                effect: AbilityEffect::Summon { heal: 10 },
            },
            AbilityId::LifeDrain => AbilitySpec {
                cooldown: 5,
                damage_multiplier: 1.2,
                effect: AbilityEffect::Drain { fraction: 0.5 },
            },
            AbilityId::ShieldBreak => AbilitySpec {
                cooldown: 4,
                damage_multiplier: 2.0,
                effect: AbilityEffect::ShieldBreak,
            },
        }
    }

    /// Resolve this ability from `user` against `target`
    ///
    /// Self-targeted parts (heals, rage) always happen; damage is subject to
    /// the ability's dodge and defense rules.
    pub fn execute(
        self,
        user: &mut Combatant,
        target: &mut Combatant,
        rng: &mut GameRng,
        crit_multiplier: f64,
    ) -> AbilityOutcome {
        let spec = self.spec();
        let mut outcome = AbilityOutcome {
            ability: self,
            ..Default::default()
        };

        match spec.effect {
            AbilityEffect::Heal { fraction } => {
                let amount = (user.health.max() as f64 * fraction) as i32;
                outcome.healed = user.heal(amount);
            }
            AbilityEffect::Summon { heal } => outcome.healed = user.heal(heal),
            AbilityEffect::Stun { turns } => {
                target.apply_effect(EffectKind::Stun, turns);
                outcome.stunned = true;
            }
            AbilityEffect::ShieldBreak => {
                outcome.shield_broken = target.status.is_active(EffectKind::Shield);
                target.status.clear(EffectKind::Shield);
            }
            AbilityEffect::HalfDefense
            | AbilityEffect::Unavoidable
            | AbilityEffect::Drain { .. }
            | AbilityEffect::Rage { .. } => {}
        }

        if spec.deals_damage() {
            Self::strike(&spec, user, target, rng, crit_multiplier, &mut outcome);
        }

        // The boost only counts from the next attack on
        if let AbilityEffect::Rage { factor } = spec.effect {
            user.set_attack((user.attack_stat as f64 * factor) as i32);
        }

        outcome
    }

    fn strike(
        spec: &AbilitySpec,
        user: &mut Combatant,
        target: &mut Combatant,
        rng: &mut GameRng,
        crit_multiplier: f64,
        outcome: &mut AbilityOutcome,
    ) {
        if spec.dodgeable() && target.try_dodge(rng) {
            outcome.dodged = true;
            return;
        }

        let roll = user.roll_attack(rng, crit_multiplier);
        let damage = final_damage_with(
            roll.damage,
            spec.damage_multiplier,
            target.defense_value(),
            spec.defense_mode(),
        );
        outcome.critical = roll.critical;
        outcome.damage = target.apply_damage(damage);

        if let AbilityEffect::Drain { fraction } = spec.effect {
            outcome.healed = user.heal((outcome.damage as f64 * fraction) as i32);
        }
    }
}

/// What an ability did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityOutcome {
    pub ability: AbilityId,
    pub damage: i32,
    pub critical: bool,
    pub dodged: bool,
    pub healed: i32,
    pub stunned: bool,
    pub shield_broken: bool,
}

impl Default for AbilityOutcome {
    fn default() -> Self {
        Self {
            ability: AbilityId::Cleave,
            damage: 0,
            critical: false,
            dodged: false,
            healed: 0,
            stunned: false,
            shield_broken: false,
        }
    }
}

/// Boss archetype; picks the ability set and the trophy
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BossKind {
    #[default]
    Standard,
    Dragon,
    Lich,
    Giant,
}

impl BossKind {
    /// Known abilities, in a fixed order
    pub const fn abilities(self) -> [AbilityId; 4] {
        match self {
            BossKind::Dragon => [
                AbilityId::Cleave,
                AbilityId::BerserkerRage,
                AbilityId::AreaAttack,
                AbilityId::Intimidate,
            ],
            BossKind::Lich => [
                AbilityId::LifeDrain,
                AbilityId::SummonMinions,
                AbilityId::AreaAttack,
                AbilityId::Regenerate,
            ],
            BossKind::Giant => [
                AbilityId::Cleave,
                AbilityId::ShieldBreak,
                AbilityId::Intimidate,
                AbilityId::AreaAttack,
            ],
            BossKind::Standard => [
                AbilityId::Cleave,
                AbilityId::Intimidate,
                AbilityId::BerserkerRage,
                AbilityId::Regenerate,
            ],
        }
    }

    pub fn knows(self, ability: AbilityId) -> bool {
        self.abilities().contains(&ability)
    }

    /// Item dropped on defeat
    pub const fn trophy(self) -> ItemId {
        match self {
            BossKind::Dragon => ItemId::DragonScaleArmor,
            BossKind::Lich => ItemId::NecromancerStaff,
            BossKind::Giant => ItemId::GiantHammer,
            BossKind::Standard => ItemId::ChampionInsignia,
        }
    }
}
