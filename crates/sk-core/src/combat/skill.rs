//! Player skills

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::status::EffectKind;

/// Learnable skill
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum SkillId {
    Fireball,
    FrostBolt,
    Lightning,
    Heal,
    Barrier,
}

/// What casting a skill does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillKind {
    /// Damage the opponent and maybe inflict an effect
    Strike { damage: i32, inflicts: EffectKind },
    /// Heal the caster
    Restore { heal: i32 },
    /// Put a beneficial effect on the caster
    Ward { effect: EffectKind, turns: u32 },
}

/// Static skill data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillSpec {
    pub cost: i32,
    pub kind: SkillKind,
}

impl SkillId {
    pub const fn spec(self) -> SkillSpec {
        match self {
            SkillId::Fireball => SkillSpec {
                cost: 10,
                kind: SkillKind::Strike {
                    damage: 30,
                    inflicts: EffectKind::Burn,
                },
            },
            SkillId::FrostBolt => SkillSpec {
                cost: 15,
                kind: SkillKind::Strike {
                    damage: 25,
                    inflicts: EffectKind::Freeze,
                },
            },
            SkillId::Lightning => SkillSpec {
                cost: 20,
                kind: SkillKind::Strike {
                    damage: 40,
                    inflicts: EffectKind::Stun,
                },
            },
            SkillId::Heal => SkillSpec {
                cost: 8,
                kind: SkillKind::Restore { heal: 25 },
            },
            SkillId::Barrier => SkillSpec {
                cost: 12,
                kind: SkillKind::Ward {
                    effect: EffectKind::Shield,
                    turns: 5,
                },
            },
        }
    }

    pub const fn is_offensive(self) -> bool {
        matches!(self.spec().kind, SkillKind::Strike { .. })
    }
}

/// Cheapest cost among the given skills
pub fn cheapest_cost(skills: &[SkillId]) -> Option<i32> {
    skills.iter().map(|s| s.spec().cost).min()
}
