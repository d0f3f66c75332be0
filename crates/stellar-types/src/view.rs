//! Read-only view snapshots handed to the renderer.
//!
//! The core never draws anything. After every state change it projects its
//! state into a [`ScreenView`] and the renderer re-renders from that value
//! alone. Views are plain data: cloning or serializing one never touches the
//! engines that produced it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Feedback, LevelId, NodeGamePhase, QuizPhase, Screen, WalletKind};
use crate::ids::SessionId;
use crate::structs::{
    ErrorSpark, FallingToken, LevelInfo, Node, Particle, RewardItem, Sparkle, Star, WalletQuestion,
};

/// Snapshot of whichever screen is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "screen", content = "state", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ScreenView {
    /// Title screen.
    Home(HomeView),
    /// World map.
    LevelSelect(LevelSelectView),
    /// Active minigame.
    Game(GameView),
    /// Reward screen.
    Reward(RewardView),
}

impl ScreenView {
    /// The screen this view belongs to.
    pub const fn screen(&self) -> Screen {
        match self {
            Self::Home(_) => Screen::Home,
            Self::LevelSelect(_) => Screen::LevelSelect,
            Self::Game(_) => Screen::Game,
            Self::Reward(_) => Screen::Reward,
        }
    }
}

/// Home screen state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HomeView {
    /// Logo asset path.
    pub logo: String,
    /// Subtitle under the logo.
    pub subtitle: String,
    /// Background starfield.
    pub stars: Vec<Star>,
    /// Floating particles.
    pub sparkles: Vec<Sparkle>,
}

/// Level-select screen state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LevelSelectView {
    /// Every world in map order.
    pub levels: Vec<LevelInfo>,
    /// Number of completed worlds.
    pub completed: u32,
    /// Total number of worlds.
    pub total: u32,
    /// `completed / total * 100`.
    pub completion_percent: f64,
    /// Map title.
    pub title: String,
    /// XLM balance shown in the HUD.
    pub balance_xlm: u32,
    /// Coin asset path next to the balance.
    pub balance_icon: String,
    /// Background asset path.
    pub background: String,
}

/// Game screen state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameView {
    /// Session this snapshot belongs to.
    pub session_id: SessionId,
    /// When the session started.
    pub started_at: DateTime<Utc>,
    /// Level being played.
    pub level: LevelId,
    /// Level title banner.
    pub title: String,
    /// Background asset path.
    pub background: String,
    /// Current score.
    pub score: u32,
    /// Derived progress in `[0, 100]`.
    pub progress: f64,
    /// Whether the bottom action button is enabled.
    pub continue_enabled: bool,
    /// Minigame-specific board.
    pub board: BoardView,
}

/// Minigame board, one variant per playable level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "board", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum BoardView {
    /// Node-connection board.
    Nodes(NodeBoardView),
    /// Wallet quiz board.
    Quiz(QuizBoardView),
}

/// Node-connection board state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NodeBoardView {
    /// Engine phase.
    pub phase: NodeGamePhase,
    /// All nodes, in ring order.
    pub nodes: Vec<Node>,
    /// Live click bursts.
    pub particles: Vec<Particle>,
    /// Whether the scripted "ERROR CRÍTICO" banner is up.
    pub critical_error: bool,
    /// Sparks around the server while the banner is up.
    pub error_sparks: Vec<ErrorSpark>,
    /// Nodes connected so far.
    pub connected: u32,
    /// Total nodes on the board.
    pub total: u32,
}

/// Wallet quiz board state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct QuizBoardView {
    /// Engine phase.
    pub phase: QuizPhase,
    /// The active question, if a round has started.
    pub question: Option<WalletQuestion>,
    /// The option picked this round.
    pub selected: Option<WalletKind>,
    /// Feedback for the picked option.
    pub feedback: Option<Feedback>,
    /// Banner text for `feedback`.
    pub feedback_banner: Option<String>,
    /// Round counter (1-based once a round has started).
    pub round: u32,
    /// Number of rounds in the quiz.
    pub max_rounds: u32,
}

/// Reward screen state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RewardView {
    /// Headline banner.
    pub headline: String,
    /// Sum of every item's XLM.
    pub total_xlm: u32,
    /// Reward line items.
    pub items: Vec<RewardItem>,
    /// Whether the reward panel (and its continue button) is shown yet.
    pub rewards_visible: bool,
    /// Static "progress to Stellar master" figure.
    pub mastery_percent: u32,
    /// Falling XLM coins.
    pub tokens: Vec<FallingToken>,
    /// Background particles.
    pub sparkles: Vec<Sparkle>,
    /// Coin asset path.
    pub token_asset: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_view_is_adjacently_tagged() {
        let view = ScreenView::LevelSelect(LevelSelectView {
            levels: Vec::new(),
            completed: 0,
            total: 0,
            completion_percent: 0.0,
            title: String::new(),
            balance_xlm: 0,
            balance_icon: String::new(),
            background: String::new(),
        });
        let json = serde_json::to_value(&view).ok();
        let tag = json
            .as_ref()
            .and_then(|v| v.get("screen"))
            .and_then(serde_json::Value::as_str);
        assert_eq!(tag, Some("level_select"));
        assert_eq!(view.screen(), Screen::LevelSelect);
    }
}
