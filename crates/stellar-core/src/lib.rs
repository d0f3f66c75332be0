//! Screen navigation, minigame engines, and timers for Stellar Blocks.
//!
//! This crate owns every gameplay rule. It never draws: each screen projects
//! its state into a [`ScreenView`](stellar_types::ScreenView) and the host
//! hands that to a renderer.
//!
//! # Modules
//!
//! - [`navigator`] -- [`ScreenNavigator`], the one owner of the active screen.
//! - [`session`] -- [`GameSession`], one level play-through with its timers.
//! - [`node_connection`] -- The connect-every-node minigame.
//! - [`wallet_quiz`] -- The three-round wallet quiz.
//! - [`score`] -- Saturating, non-negative session score.
//! - [`reward`] -- Static reward payout and the reward screen.
//! - [`levels`] -- The world catalog shown on the map.
//! - [`scheduler`] -- Cancellable one-shot timers on a virtual clock.
//! - [`decoration`] -- Seeded randomness for cosmetic particles.
//! - [`config`] -- Configuration loading from `stellar-config.yaml`.
//! - [`runner`] -- Async host loop wiring input, frames and rendering.
//!
//! [`ScreenNavigator`]: navigator::ScreenNavigator
//! [`GameSession`]: session::GameSession

pub mod assets;
pub mod config;
pub mod decoration;
pub mod levels;
pub mod navigator;
pub mod node_connection;
pub mod reward;
pub mod runner;
pub mod scheduler;
pub mod score;
pub mod session;
pub mod wallet_quiz;
