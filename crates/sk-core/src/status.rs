//! Status effects
//!
//! Timed modifiers (burn, freeze, stun, poison, shield, regenerate) held in a
//! per-combatant table. Each kind has exactly one slot; re-applying a kind
//! replaces its duration instead of stacking.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

use crate::combatant::Health;

/// Kind of status effect
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
    EnumCount,
)]
#[repr(u8)]
pub enum EffectKind {
    /// Damage over time
    Burn = 0,
    /// Slowed: cannot dodge
    Freeze = 1,
    /// Skips its next action
    Stun = 2,
    /// Damage over time
    Poison = 3,
    /// Adds magnitude to defense
    Shield = 4,
    /// Heal over time
    Regenerate = 5,
}

impl EffectKind {
    /// Magnitude used when an effect is applied without an explicit one
    pub const fn default_magnitude(self) -> i32 {
        match self {
            EffectKind::Burn => 5,
            EffectKind::Poison => 3,
            EffectKind::Shield => 10,
            EffectKind::Regenerate => 5,
            EffectKind::Freeze | EffectKind::Stun => 0,
        }
    }

    /// Harmful to the bearer
    pub const fn is_debuff(self) -> bool {
        matches!(
            self,
            EffectKind::Burn | EffectKind::Freeze | EffectKind::Stun | EffectKind::Poison
        )
    }

    /// Deals damage every tick
    pub const fn is_damage_over_time(self) -> bool {
        matches!(self, EffectKind::Burn | EffectKind::Poison)
    }

    /// Prevents acting or moving freely
    pub const fn is_disabling(self) -> bool {
        matches!(self, EffectKind::Freeze | EffectKind::Stun)
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

/// One effect slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: EffectKind,
    /// Remaining turns; 0 means inactive
    pub duration: u32,
    pub magnitude: i32,
}

impl StatusEffect {
    pub const fn is_active(&self) -> bool {
        self.duration > 0
    }
}

/// What an effect did during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickEvent {
    pub kind: EffectKind,
    /// Health change caused by the effect (negative for damage)
    pub health_delta: i32,
    /// The effect ran out with this tick
    pub expired: bool,
}

/// Status effects for one combatant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffectTable {
    slots: [StatusEffect; EffectKind::COUNT],
}

impl Default for StatusEffectTable {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusEffectTable {
    /// Create a table with every effect inactive
    pub fn new() -> Self {
        let mut slots = [StatusEffect {
            kind: EffectKind::Burn,
            duration: 0,
            magnitude: 0,
        }; EffectKind::COUNT];
        for kind in EffectKind::iter() {
            slots[kind.slot()] = StatusEffect {
                kind,
                duration: 0,
                magnitude: kind.default_magnitude(),
            };
        }
        Self { slots }
    }

    /// Set or refresh an effect's duration, keeping its magnitude
    pub fn apply(&mut self, kind: EffectKind, duration: u32) {
        self.slots[kind.slot()].duration = duration;
    }

    /// Set or refresh an effect with an explicit magnitude
    pub fn apply_with_magnitude(&mut self, kind: EffectKind, duration: u32, magnitude: i32) {
        let slot = &mut self.slots[kind.slot()];
        slot.duration = duration;
        slot.magnitude = magnitude;
    }

    /// End an effect immediately
    pub fn clear(&mut self, kind: EffectKind) {
        self.slots[kind.slot()].duration = 0;
    }

    /// Run one turn of every active effect against `health`
    ///
    /// Burn and poison subtract their magnitude (health floors at 0),
    /// regenerate adds its magnitude (capped at max health). Shield, freeze
    /// and stun only count down; they are read by defense and eligibility
    /// checks instead.
    pub fn tick(&mut self, health: &mut Health) -> Vec<TickEvent> {
        let mut events = Vec::new();

        for slot in self.slots.iter_mut().filter(|s| s.is_active()) {
            let health_delta = match slot.kind {
                EffectKind::Burn | EffectKind::Poison => -health.damage(slot.magnitude),
                EffectKind::Regenerate => health.heal(slot.magnitude),
                EffectKind::Shield | EffectKind::Freeze | EffectKind::Stun => 0,
            };

            slot.duration -= 1;
            events.push(TickEvent {
                kind: slot.kind,
                health_delta,
                expired: slot.duration == 0,
            });
        }

        events
    }

    /// Current slot for an effect kind
    pub fn get(&self, kind: EffectKind) -> &StatusEffect {
        &self.slots[kind.slot()]
    }

    /// Remaining turns of an effect (0 when inactive)
    pub fn duration(&self, kind: EffectKind) -> u32 {
        self.slots[kind.slot()].duration
    }

    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.duration(kind) > 0
    }

    /// Magnitude of an effect, or 0 when inactive
    pub fn active_magnitude(&self, kind: EffectKind) -> i32 {
        let slot = self.get(kind);
        if slot.is_active() { slot.magnitude } else { 0 }
    }

    pub fn is_stunned(&self) -> bool {
        self.is_active(EffectKind::Stun)
    }

    pub fn is_frozen(&self) -> bool {
        self.is_active(EffectKind::Freeze)
    }

    /// Iterate over active effects
    pub fn active(&self) -> impl Iterator<Item = &StatusEffect> {
        self.slots.iter().filter(|s| s.is_active())
    }

    /// Active harmful effects
    pub fn debuffs(&self) -> Vec<EffectKind> {
        self.active()
            .map(|s| s.kind)
            .filter(|k| k.is_debuff())
            .collect()
    }

    /// Active beneficial effects
    pub fn buffs(&self) -> Vec<EffectKind> {
        self.active()
            .map(|s| s.kind)
            .filter(|k| !k.is_debuff())
            .collect()
    }
}
