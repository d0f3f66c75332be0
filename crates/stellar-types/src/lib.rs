//! Shared type definitions for the Stellar Blocks minigame.
//!
//! This crate is the single source of truth for every type that crosses the
//! boundary between the game core and the browser renderer. Types flow
//! downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for session identifiers
//! - [`enums`] -- Closed sets (screens, levels, colors, wallet kinds, phases)
//! - [`structs`] -- Gameplay and decorative entities
//! - [`input`] -- Player input events
//! - [`view`] -- Read-only view snapshots for the renderer

pub mod enums;
pub mod ids;
pub mod input;
pub mod structs;
pub mod view;

// Re-export all public types at crate root for convenience.
pub use enums::{Feedback, LevelId, NodeColor, NodeGamePhase, QuizPhase, Screen, WalletKind};
pub use ids::SessionId;
pub use input::InputEvent;
pub use structs::{
    ErrorSpark, FallingToken, LevelInfo, Node, Particle, Position, RewardItem, Sparkle, Star,
    WalletOption, WalletQuestion,
};
pub use view::{
    BoardView, GameView, HomeView, LevelSelectView, NodeBoardView, QuizBoardView, RewardView,
    ScreenView,
};
