//! Weighted roulette selection
//!
//! Candidates keep insertion order so that, for a given seed, the same
//! weights always pick the same entry.

use crate::error::CombatError;
use crate::rng::GameRng;

/// Ordered list of candidates with non-negative weights
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedChoices<T> {
    entries: Vec<(T, f64)>,
}

impl<T: Copy + PartialEq> WeightedChoices<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a candidate (negative or NaN weights count as 0)
    pub fn push(&mut self, item: T, weight: f64) {
        self.entries.push((item, sanitize(weight)));
    }

    /// Multiply a candidate's weight
    pub fn scale(&mut self, item: T, factor: f64) {
        if let Some(entry) = self.entries.iter_mut().find(|(i, _)| *i == item) {
            entry.1 = sanitize(entry.1 * factor);
        }
    }

    /// Shift a candidate's weight, clamping at 0
    pub fn add(&mut self, item: T, delta: f64) {
        if let Some(entry) = self.entries.iter_mut().find(|(i, _)| *i == item) {
            entry.1 = sanitize(entry.1 + delta);
        }
    }

    pub fn weight(&self, item: T) -> f64 {
        self.entries
            .iter()
            .find(|(i, _)| *i == item)
            .map_or(0.0, |(_, w)| *w)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    pub fn entries(&self) -> &[(T, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Roulette selection: draw `r` in `[0, total)` and walk the list
    /// subtracting weights until `r <= 0`.
    pub fn sample(&self, rng: &mut GameRng) -> Result<T, CombatError> {
        let total = self.total();
        if !(total > 0.0) {
            return Err(CombatError::NoEligibleAction);
        }

        let mut r = rng.uniform(0.0, total);
        for &(item, weight) in &self.entries {
            r -= weight;
            if r <= 0.0 && weight > 0.0 {
                return Ok(item);
            }
        }

        // Rounding left a sliver; settle on the last candidate that can win
        self.entries
            .iter()
            .rev()
            .find(|(_, w)| *w > 0.0)
            .map(|(item, _)| *item)
            .ok_or(CombatError::NoEligibleAction)
    }
}

impl<T: Copy + PartialEq> Default for WeightedChoices<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + PartialEq> FromIterator<(T, f64)> for WeightedChoices<T> {
    fn from_iter<I: IntoIterator<Item = (T, f64)>>(iter: I) -> Self {
        let mut choices = Self::new();
        for (item, weight) in iter {
            choices.push(item, weight);
        }
        choices
    }
}

fn sanitize(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_zero_is_error() {
        let choices: WeightedChoices<u8> = [(1, 0.0), (2, 0.0)].into_iter().collect();
        let mut rng = GameRng::new(1);
        assert_eq!(choices.sample(&mut rng), Err(CombatError::NoEligibleAction));
        assert_eq!(
            WeightedChoices::<u8>::new().sample(&mut rng),
            Err(CombatError::NoEligibleAction)
        );
    }

    #[test]
    fn test_single_positive_always_wins() {
        let choices: WeightedChoices<u8> = [(1, 0.0), (2, 3.0), (3, 0.0)].into_iter().collect();
        let mut rng = GameRng::new(2);
        for _ in 0..100 {
            assert_eq!(choices.sample(&mut rng), Ok(2));
        }
    }

    #[test]
    fn test_negative_clamped() {
        let mut choices: WeightedChoices<u8> = [(1, 1.0)].into_iter().collect();
        choices.add(1, -5.0);
        assert_eq!(choices.weight(1), 0.0);
        choices.push(2, -1.0);
        assert_eq!(choices.weight(2), 0.0);
        choices.scale(1, f64::NAN);
        assert_eq!(choices.total(), 0.0);
    }

    #[test]
    fn test_distribution_roughly_follows_weights() {
        let choices: WeightedChoices<u8> = [(1, 1.0), (2, 3.0)].into_iter().collect();
        let mut rng = GameRng::new(3);
        let heavy = (0..4000)
            .filter(|_| choices.sample(&mut rng) == Ok(2))
            .count();
        assert!((2700..3300).contains(&heavy), "got {heavy}");
    }
}
