//! Enumeration types for the Stellar Blocks minigame.
//!
//! Every closed set in the game (screens, levels, colors, wallet kinds,
//! engine phases) is a plain enum here so the browser renderer receives the
//! same variants through the generated `TypeScript` bindings.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

/// The screen currently shown to the player. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Screen {
    /// Title screen with the play button.
    Home,
    /// World map listing every level.
    LevelSelect,
    /// An active minigame session.
    Game,
    /// Post-level celebration and reward list.
    Reward,
}

impl Screen {
    /// Stable lowercase name used in log fields.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::LevelSelect => "level_select",
            Self::Game => "game",
            Self::Reward => "reward",
        }
    }
}

impl core::fmt::Display for Screen {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a selectable world. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum LevelId {
    /// "Mundo Decentralizado": the node-connection minigame.
    Decentralized,
    /// "Ciudad de la Cartera": the wallet quiz.
    Wallet,
    /// "Ciudad de Tokens" (locked).
    Token,
    /// "Laboratorio Soroban" (locked).
    Soroban,
    /// "Camino del Tesoro" (locked).
    Treasure,
}

impl LevelId {
    /// Every level in world-map order.
    pub const ALL: [Self; 5] = [
        Self::Decentralized,
        Self::Wallet,
        Self::Token,
        Self::Soroban,
        Self::Treasure,
    ];

    /// The wire identifier (`"decentralized"`, `"wallet"`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Decentralized => "decentralized",
            Self::Wallet => "wallet",
            Self::Token => "token",
            Self::Soroban => "soroban",
            Self::Treasure => "treasure",
        }
    }
}

impl core::fmt::Display for LevelId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Node connection minigame
// ---------------------------------------------------------------------------

/// Color of an unconnected network node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum NodeColor {
    /// `#FFD700`
    Gold,
    /// `#00BFFF`
    DeepSkyBlue,
    /// `#32CD32`
    LimeGreen,
    /// `#FF6347`
    Tomato,
}

impl NodeColor {
    /// The palette nodes are sampled from, uniformly.
    pub const PALETTE: [Self; 4] = [Self::Gold, Self::DeepSkyBlue, Self::LimeGreen, Self::Tomato];

    /// CSS hex string for the renderer.
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Gold => "#FFD700",
            Self::DeepSkyBlue => "#00BFFF",
            Self::LimeGreen => "#32CD32",
            Self::Tomato => "#FF6347",
        }
    }
}

/// Lifecycle of the node-connection minigame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum NodeGamePhase {
    /// Board not yet laid out.
    Initializing,
    /// At least one node is still unconnected.
    InProgress,
    /// Every node is connected.
    Complete,
}

// ---------------------------------------------------------------------------
// Wallet quiz minigame
// ---------------------------------------------------------------------------

/// A wallet category offered as a quiz answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum WalletKind {
    /// Always-online software wallet.
    Hot,
    /// Offline storage.
    Cold,
    /// Smartphone app.
    Mobile,
    /// Desktop application.
    Desktop,
    /// Dedicated signing device.
    Hardware,
    /// Browser-hosted wallet.
    Web,
    /// Keys printed on paper.
    Paper,
}

impl WalletKind {
    /// Lowercase label shown under the icon.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::Cold => "cold",
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
            Self::Hardware => "hardware",
            Self::Web => "web",
            Self::Paper => "paper",
        }
    }

    /// Emoji icon drawn on the answer button.
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Hot => "\u{1F525}",
            Self::Cold => "\u{2744}\u{FE0F}",
            Self::Mobile => "\u{1F4F1}",
            Self::Desktop => "\u{1F4BB}",
            Self::Hardware => "\u{1F511}",
            Self::Web => "\u{1F310}",
            Self::Paper => "\u{1F4C4}",
        }
    }
}

impl core::fmt::Display for WalletKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result shown after a quiz selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Feedback {
    /// "¡CORRECTO!"
    Correct,
    /// "INCORRECTO"
    Incorrect,
}

impl Feedback {
    /// Banner text displayed under the options.
    pub const fn banner(self) -> &'static str {
        match self {
            Self::Correct => "\u{a1}CORRECTO!",
            Self::Incorrect => "INCORRECTO",
        }
    }
}

/// Lifecycle of the wallet quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum QuizPhase {
    /// A question is shown and no option has been picked.
    RoundActive,
    /// An option was picked; feedback is shown.
    RoundResolved,
    /// The last question was answered correctly and the quiz is over.
    AllRoundsComplete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_ids_serialize_to_wire_names() {
        for level in LevelId::ALL {
            let json = serde_json::to_string(&level).ok();
            assert_eq!(json, Some(format!("\"{}\"", level.as_str())));
        }
    }

    #[test]
    fn level_id_parses_from_wire_name() {
        let parsed: Result<LevelId, _> = serde_json::from_str("\"soroban\"");
        assert_eq!(parsed.ok(), Some(LevelId::Soroban));
        let unknown: Result<LevelId, _> = serde_json::from_str("\"moon\"");
        assert!(unknown.is_err());
    }

    #[test]
    fn palette_has_four_distinct_colors() {
        let palette = NodeColor::PALETTE;
        for (i, a) in palette.iter().enumerate() {
            for b in palette.iter().skip(i.saturating_add(1)) {
                assert_ne!(a.hex(), b.hex());
            }
        }
    }

    #[test]
    fn screen_names_are_snake_case() {
        let json = serde_json::to_string(&Screen::LevelSelect).ok();
        assert_eq!(json.as_deref(), Some("\"level_select\""));
        assert_eq!(Screen::LevelSelect.to_string(), "level_select");
    }

    #[test]
    fn wallet_kind_labels_match_wire_names() {
        let json = serde_json::to_string(&WalletKind::Hardware).ok();
        assert_eq!(json, Some(format!("\"{}\"", WalletKind::Hardware.as_str())));
    }
}
