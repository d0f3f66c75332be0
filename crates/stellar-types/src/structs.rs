//! Entity structs shared between the core and the renderer.
//!
//! Gameplay entities ([`Node`], [`WalletQuestion`], [`LevelInfo`],
//! [`RewardItem`]) carry state the engines mutate or read. Decorative
//! entities ([`Star`], [`Sparkle`], [`FallingToken`], [`ErrorSpark`],
//! [`Particle`]) are presentational only and never feed back into gameplay.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{LevelId, NodeColor, WalletKind};

// ---------------------------------------------------------------------------
// Gameplay entities
// ---------------------------------------------------------------------------

/// A point on the game board, in board pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Position {
    /// Horizontal offset from the board origin.
    pub x: f64,
    /// Vertical offset from the board origin.
    pub y: f64,
}

/// A clickable peer in the node-connection minigame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Node {
    /// Index of the node around the ring (0-based).
    pub id: u32,
    /// Board position of the node.
    pub position: Position,
    /// Whether the player has connected this node. Never reverts to false.
    pub connected: bool,
    /// Display color while unconnected.
    pub color: NodeColor,
    /// CSS hex string for `color`.
    pub color_hex: String,
}

/// One answer button in a wallet quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WalletOption {
    /// Wallet category this option names.
    pub id: WalletKind,
    /// Emoji icon for the button.
    pub icon: String,
    /// Whether picking this option answers the question correctly.
    pub correct: bool,
}

/// A multiple-choice question from the wallet quiz bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WalletQuestion {
    /// Question text (Spanish).
    pub prompt: String,
    /// Answer options in display order.
    pub options: Vec<WalletOption>,
}

impl WalletQuestion {
    /// Look up an option by wallet kind.
    pub fn option(&self, id: WalletKind) -> Option<&WalletOption> {
        self.options.iter().find(|o| o.id == id)
    }
}

/// Static description of a world on the level-select map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LevelInfo {
    /// Level identifier.
    pub id: LevelId,
    /// Display name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Emoji icon for the world card.
    pub icon: String,
    /// Decorative character glyphs shown on the card.
    pub characters: Vec<String>,
    /// Whether the level is unlocked and playable.
    pub completed: bool,
}

/// A line item on the reward screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RewardItem {
    /// Emoji icon.
    pub icon: String,
    /// Reward title.
    pub name: String,
    /// What the reward is for.
    pub description: String,
    /// In-fiction XLM awarded (0 for unlock notices).
    pub xlm: u32,
}

// ---------------------------------------------------------------------------
// Decorative entities
// ---------------------------------------------------------------------------

/// Transient burst drawn where a node was just connected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Particle {
    /// Unique within one game session.
    pub id: u32,
    /// Where the burst is drawn.
    pub position: Position,
}

/// A background star on the home screen. Coordinates are percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Star {
    /// Horizontal position in percent of the viewport, in `[0, 100)`.
    pub x: f64,
    /// Vertical position in percent of the viewport, in `[0, 100)`.
    pub y: f64,
    /// Diameter in pixels, in `[1, 3)`.
    pub size: f64,
    /// Opacity in `[0.2, 1.0)`.
    pub opacity: f64,
}

/// A floating ambient particle. Coordinates are percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Sparkle {
    /// Horizontal position in percent.
    pub x: f64,
    /// Vertical position in percent.
    pub y: f64,
    /// Animation delay in seconds.
    pub delay_s: f64,
    /// Animation duration in seconds.
    pub duration_s: f64,
}

/// An XLM coin falling across the reward screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FallingToken {
    /// Index of the token.
    pub id: u32,
    /// Horizontal position in percent.
    pub x: f64,
    /// Starting vertical position in percent (above the viewport).
    pub y: f64,
    /// Animation delay in seconds.
    pub delay_s: f64,
}

/// A spark around the central server once the critical-error banner is up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ErrorSpark {
    /// Horizontal offset from the server in pixels.
    pub dx: f64,
    /// Vertical offset from the server in pixels.
    pub dy: f64,
    /// Animation delay in seconds.
    pub delay_s: f64,
}
