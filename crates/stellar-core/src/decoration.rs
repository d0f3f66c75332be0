//! Cosmetic randomness: starfields, sparkles, falling coins, node colors.
//!
//! Nothing generated here feeds back into gameplay. The only value the
//! engines consume is a node's color, which is display-only as well.
//!
//! # Determinism
//!
//! The generator wraps a [`StdRng`]. With `decoration.seed` configured, the
//! same seed produces the same screens, which keeps tests and screenshots
//! stable. Without a seed the generator draws from OS entropy.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use stellar_types::{ErrorSpark, FallingToken, NodeColor, Sparkle, Star};

use crate::config::DecorationConfig;

/// Random source for every decorative value.
#[derive(Debug, Clone)]
pub struct Decorator {
    rng: StdRng,
    counts: DecorationConfig,
}

impl Decorator {
    /// Create a generator from configuration.
    pub fn new(config: &DecorationConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self {
            rng,
            counts: config.clone(),
        }
    }

    /// Create a generator with a fixed seed and default counts.
    pub fn seeded(seed: u64) -> Self {
        Self::new(&DecorationConfig {
            seed: Some(seed),
            ..DecorationConfig::default()
        })
    }

    /// Pick a node color uniformly from the palette.
    pub fn node_color(&mut self) -> NodeColor {
        NodeColor::PALETTE
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(NodeColor::Gold)
    }

    /// Home screen starfield.
    pub fn stars(&mut self) -> Vec<Star> {
        (0..self.counts.star_count)
            .map(|_| Star {
                x: self.rng.random_range(0.0..100.0),
                y: self.rng.random_range(0.0..100.0),
                size: self.rng.random_range(1.0..3.0),
                opacity: self.rng.random_range(0.2..1.0),
            })
            .collect()
    }

    /// Home screen floating particles.
    pub fn home_sparkles(&mut self) -> Vec<Sparkle> {
        self.sparkles(self.counts.home_sparkle_count, 5.0, 3.0, 4.0)
    }

    /// Reward screen background particles.
    pub fn reward_sparkles(&mut self) -> Vec<Sparkle> {
        self.sparkles(self.counts.reward_sparkle_count, 3.0, 2.0, 3.0)
    }

    /// Falling XLM coins on the reward screen.
    pub fn falling_tokens(&mut self) -> Vec<FallingToken> {
        (0..self.counts.reward_token_count)
            .map(|id| FallingToken {
                id,
                x: self.rng.random_range(0.0..100.0),
                y: -10.0,
                delay_s: self.rng.random_range(0.0..2.0),
            })
            .collect()
    }

    /// Sparks around the central server during the critical-error beat.
    pub fn error_sparks(&mut self) -> Vec<ErrorSpark> {
        (0..self.counts.error_spark_count)
            .map(|_| ErrorSpark {
                dx: self.rng.random_range(-20.0..20.0),
                dy: self.rng.random_range(-20.0..20.0),
                delay_s: self.rng.random_range(0.0..1.0),
            })
            .collect()
    }

    /// Sparkles at random percentages with delay in `[0, max_delay)` and
    /// duration in `[base, base + span)`.
    fn sparkles(&mut self, count: u32, max_delay: f64, base: f64, span: f64) -> Vec<Sparkle> {
        (0..count)
            .map(|_| Sparkle {
                x: self.rng.random_range(0.0..100.0),
                y: self.rng.random_range(0.0..100.0),
                delay_s: self.rng.random_range(0.0..max_delay),
                duration_s: base + self.rng.random_range(0.0..span),
            })
            .collect()
    }
}
