//! The "MISIÓN ¡COMPLETADA!" reward screen.
//!
//! The reward list is static: every completed level pays out the same four
//! items regardless of score or time taken.

use stellar_types::{FallingToken, RewardItem, RewardView, Sparkle};
use tracing::debug;

use crate::assets;
use crate::config::TimingConfig;
use crate::decoration::Decorator;
use crate::scheduler::Scheduler;

/// Static "progress to Stellar master" figure shown under the rewards.
pub const MASTERY_PERCENT: u32 = 40;

/// Headline shown on the reward screen.
pub const HEADLINE: &str = "MISI\u{00D3}N \u{00A1}COMPLETADA!";

/// The fixed payout for a completed level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardSummary {
    items: Vec<RewardItem>,
    total_xlm: u32,
}

impl Default for RewardSummary {
    fn default() -> Self {
        Self::standard()
    }
}

impl RewardSummary {
    /// The four standard reward items.
    pub fn standard() -> Self {
        Self::from_items(vec![
            item(
                "\u{1F3C6}",
                "Maestro de Redes",
                "Conectaste todos los nodos exitosamente",
                100,
            ),
            item(
                "\u{26A1}",
                "Bono de Velocidad",
                "Completado en menos de 2 minutos",
                50,
            ),
            item(
                "\u{1F3AF}",
                "Precisi\u{00F3}n Perfecta",
                "Sin conexiones fallidas",
                75,
            ),
            item(
                "\u{1F513}",
                "Nuevo Mundo Desbloqueado",
                "Token Town ya est\u{00E1} disponible",
                0,
            ),
        ])
    }

    /// Build a summary, totalling the items once.
    pub fn from_items(items: Vec<RewardItem>) -> Self {
        let total_xlm = items
            .iter()
            .fold(0_u32, |sum, item| sum.saturating_add(item.xlm));
        Self { items, total_xlm }
    }

    /// Reward line items.
    pub fn items(&self) -> &[RewardItem] {
        &self.items
    }

    /// Sum of every item's XLM.
    pub const fn total_xlm(&self) -> u32 {
        self.total_xlm
    }
}

fn item(icon: &str, name: &str, description: &str, xlm: u32) -> RewardItem {
    RewardItem {
        icon: icon.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        xlm,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RewardTimer {
    Reveal,
}

/// State of a mounted reward screen.
#[derive(Debug, Clone)]
pub struct RewardScreen {
    summary: RewardSummary,
    tokens: Vec<FallingToken>,
    sparkles: Vec<Sparkle>,
    rewards_visible: bool,
    scheduler: Scheduler<RewardTimer>,
}

impl RewardScreen {
    /// Mount the screen: generate decoration and arm the reveal timer.
    pub fn mount(timing: &TimingConfig, decorator: &mut Decorator) -> Self {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(timing.reward_reveal_delay_ms, RewardTimer::Reveal);
        Self {
            summary: RewardSummary::standard(),
            tokens: decorator.falling_tokens(),
            sparkles: decorator.reward_sparkles(),
            rewards_visible: false,
            scheduler,
        }
    }

    /// The payout shown.
    pub const fn summary(&self) -> &RewardSummary {
        &self.summary
    }

    /// Whether the reward panel has been revealed.
    pub const fn rewards_visible(&self) -> bool {
        self.rewards_visible
    }

    /// `continue` is only offered once the panel is visible.
    pub const fn can_continue(&self) -> bool {
        self.rewards_visible
    }

    /// Advance the screen clock. Returns whether anything changed.
    pub fn advance(&mut self, elapsed_ms: u64) -> bool {
        let mut changed = false;
        for timer in self.scheduler.advance(elapsed_ms) {
            match timer.payload {
                RewardTimer::Reveal => {
                    debug!(due_ms = timer.due_ms, "Reward panel revealed");
                    self.rewards_visible = true;
                    changed = true;
                }
            }
        }
        changed
    }

    /// Cancel pending timers. Called when the screen is torn down.
    pub fn teardown(&mut self) -> usize {
        self.scheduler.cancel_all()
    }

    /// Project the screen into a view snapshot.
    pub fn view(&self) -> RewardView {
        RewardView {
            headline: HEADLINE.to_owned(),
            total_xlm: self.summary.total_xlm(),
            items: self.summary.items().to_vec(),
            rewards_visible: self.rewards_visible,
            mastery_percent: MASTERY_PERCENT,
            tokens: self.tokens.clone(),
            sparkles: self.sparkles.clone(),
            token_asset: assets::XLM_TOKEN.to_owned(),
        }
    }
}
