//! Clamped health and resource pools

use serde::{Deserialize, Serialize};

/// Hit points, always within `[0, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    current: i32,
    max: i32,
}

impl Health {
    /// Full health; `max` is raised to at least 1
    pub fn new(max: i32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    /// Health with an explicit current value, clamped into range
    pub fn with_current(current: i32, max: i32) -> Self {
        let max = max.max(1);
        Self {
            current: current.clamp(0, max),
            max,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn set_current(&mut self, value: i32) {
        self.current = value.clamp(0, self.max);
    }

    /// Subtract damage, flooring at 0. Returns the health actually lost.
    pub fn damage(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.current = (self.current - amount.max(0)).max(0);
        before - self.current
    }

    /// Add health, capped at max. Returns the health actually gained.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.current = (self.current + amount.max(0)).min(self.max);
        self.current - before
    }

    pub fn ratio(&self) -> f64 {
        self.current as f64 / self.max as f64
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }
}

/// Spendable resource such as mana
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pool {
    pub current: i32,
    pub max: i32,
}

impl Pool {
    pub fn new(max: i32) -> Self {
        let max = max.max(0);
        Self { current: max, max }
    }

    /// Fraction remaining; an empty pool reads as 0
    pub fn ratio(&self) -> f64 {
        if self.max <= 0 {
            0.0
        } else {
            self.current as f64 / self.max as f64
        }
    }

    /// Spend `amount` if available
    pub fn try_spend(&mut self, amount: i32) -> bool {
        if self.current < amount {
            return false;
        }
        self.current -= amount;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_floors_at_zero() {
        let mut hp = Health::new(20);
        assert_eq!(hp.damage(50), 20);
        assert_eq!(hp.current(), 0);
        assert!(!hp.is_alive());
    }

    #[test]
    fn test_negative_damage_ignored() {
        let mut hp = Health::with_current(10, 20);
        assert_eq!(hp.damage(-5), 0);
        assert_eq!(hp.current(), 10);
    }

    #[test]
    fn test_heal_caps() {
        let mut hp = Health::with_current(90, 100);
        assert_eq!(hp.heal(25), 10);
        assert_eq!(hp.current(), 100);
    }

    #[test]
    fn test_with_current_clamps() {
        assert_eq!(Health::with_current(150, 100).current(), 100);
        assert_eq!(Health::with_current(-3, 100).current(), 0);
        assert_eq!(Health::new(0).max(), 1);
    }

    #[test]
    fn test_pool_spend() {
        let mut mana = Pool::new(20);
        assert!(mana.try_spend(15));
        assert!(!mana.try_spend(10));
        assert_eq!(mana.current, 5);
        assert_eq!(Pool::default().ratio(), 0.0);
    }
}
