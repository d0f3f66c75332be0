//! The session score.
//!
//! A single non-negative integer moved by fixed deltas. Additions saturate at
//! `u32::MAX`; subtractions clamp at zero, so the score can never go
//! negative.

/// Mutable score owned by one game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreTracker {
    value: u32,
}

impl ScoreTracker {
    /// Start a score at `initial`.
    pub const fn new(initial: u32) -> Self {
        Self { value: initial }
    }

    /// Current score.
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Add `delta`. Returns the new score.
    pub const fn add(&mut self, delta: u32) -> u32 {
        self.value = self.value.saturating_add(delta);
        self.value
    }

    /// Subtract `delta`, flooring at zero. Returns the new score.
    pub const fn subtract_clamped(&mut self, delta: u32) -> u32 {
        self.value = self.value.saturating_sub(delta);
        self.value
    }

    /// Reset to `initial` (on entering a new level).
    pub const fn reset(&mut self, initial: u32) {
        self.value = initial;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_increases() {
        let mut score = ScoreTracker::new(1250);
        assert_eq!(score.add(50), 1300);
        assert_eq!(score.value(), 1300);
    }

    #[test]
    fn subtract_clamps_at_zero() {
        let mut score = ScoreTracker::new(150);
        assert_eq!(score.subtract_clamped(100), 50);
        assert_eq!(score.subtract_clamped(100), 0);
        assert_eq!(score.subtract_clamped(100), 0);
    }

    #[test]
    fn add_saturates() {
        let mut score = ScoreTracker::new(u32::MAX);
        assert_eq!(score.add(1), u32::MAX);
    }

    #[test]
    fn reset_restores_initial() {
        let mut score = ScoreTracker::new(1250);
        score.add(400);
        score.reset(1250);
        assert_eq!(score.value(), 1250);
    }
}
