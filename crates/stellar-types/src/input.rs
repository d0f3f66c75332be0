//! Player input events delivered by the renderer.
//!
//! Each event maps 1:1 to a transition of the screen navigator or the active
//! minigame. Events that make no sense on the current screen are ignored by
//! the core rather than rejected.
//!
//! Wire format (one JSON object per event):
//!
//! ```text
//! {"kind":"start"}
//! {"kind":"select_level","target":"wallet"}
//! {"kind":"click_node","target":3}
//! {"kind":"select_wallet_option","target":"cold"}
//! {"kind":"continue"}
//! {"kind":"back"}
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{LevelId, WalletKind};

/// A discrete player interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum InputEvent {
    /// The "JUGAR" button on the home screen.
    Start,
    /// A "VOLVER" button.
    Back,
    /// A world card on the level-select map.
    SelectLevel(LevelId),
    /// A node button in the connection minigame.
    ClickNode(u32),
    /// An answer button in the wallet quiz.
    SelectWalletOption(WalletKind),
    /// The bottom action button ("CONTINUAR", "CONECTAR NODO",
    /// "CONTINUAR AVENTURA").
    Continue,
}
