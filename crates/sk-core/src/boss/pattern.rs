//! Scripted attack patterns

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::combat::ActionKind;
use crate::rng::GameRng;

use super::AbilityId;

/// Named three-step sequences a boss may follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum AttackPattern {
    OpeningProbe,
    RelentlessAssault,
    TacticalRegroup,
    Finisher,
}

impl AttackPattern {
    pub const ALL: [AttackPattern; 4] = [
        AttackPattern::OpeningProbe,
        AttackPattern::RelentlessAssault,
        AttackPattern::TacticalRegroup,
        AttackPattern::Finisher,
    ];

    pub const fn steps(self) -> [ActionKind; 3] {
        use ActionKind::*;
        match self {
            AttackPattern::OpeningProbe => [
                NormalAttack,
                SpecialAbility(AbilityId::Intimidate),
                NormalAttack,
            ],
            AttackPattern::RelentlessAssault => [
                HeavyAttack,
                SpecialAbility(AbilityId::Cleave),
                NormalAttack,
            ],
            AttackPattern::TacticalRegroup => [
                Defend,
                SpecialAbility(AbilityId::Regenerate),
                SpecialAbility(AbilityId::BerserkerRage),
            ],
            AttackPattern::Finisher => [
                SpecialAbility(AbilityId::AreaAttack),
                SpecialAbility(AbilityId::ShieldBreak),
                SpecialAbility(AbilityId::Cleave),
            ],
        }
    }
}

/// Shuffled queue of patterns, walked one step per boss turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternQueue {
    patterns: Vec<AttackPattern>,
    current: usize,
    progress: usize,
}

impl PatternQueue {
    pub fn new(rng: &mut GameRng) -> Self {
        let mut patterns = AttackPattern::ALL.to_vec();
        rng.shuffle(&mut patterns);
        Self {
            patterns,
            current: 0,
            progress: 0,
        }
    }

    pub fn patterns(&self) -> &[AttackPattern] {
        &self.patterns
    }

    /// Pattern the next step comes from
    pub fn current(&self) -> AttackPattern {
        self.patterns[self.current]
    }

    /// Take the next step, moving to the next pattern at the end of a
    /// sequence and reshuffling once every pattern has been played
    pub fn next_step(&mut self, rng: &mut GameRng) -> ActionKind {
        let steps = self.current().steps();
        let step = steps[self.progress];

        self.progress += 1;
        if self.progress == steps.len() {
            self.progress = 0;
            self.current += 1;
            if self.current == self.patterns.len() {
                self.current = 0;
                rng.shuffle(&mut self.patterns);
            }
        }

        step
    }
}
