//! Screen navigation.
//!
//! The [`ScreenNavigator`] owns the one active screen and every piece of
//! state that screen needs. Leaving a screen drops its state and cancels its
//! timers, so nothing armed on one screen can fire against another.
//!
//! ```text
//! Home --start--> LevelSelect --select_level--> Game --completion--> Reward
//!   ^                |   ^                        |                    |
//!   +------back------+   +---------back-----------+                    |
//!                        +--------------------continue-----------------+
//! ```
//!
//! Input that does not apply to the current screen is ignored and logged at
//! debug level. Navigation never fails.

use stellar_types::{
    HomeView, InputEvent, LevelId, LevelSelectView, Screen, ScreenView, Sparkle, Star, WalletKind,
};
use tracing::{debug, info};

use crate::assets;
use crate::config::GameConfig;
use crate::decoration::Decorator;
use crate::levels::LevelCatalog;
use crate::node_connection::NodeClick;
use crate::reward::RewardScreen;
use crate::session::{GameSession, LevelCompletion};
use crate::wallet_quiz::QuizSelection;

/// Subtitle under the home screen logo.
pub const HOME_SUBTITLE: &str = "APRENDE BLOCKCHAIN JUGANDO";

/// Level-select map title.
pub const LEVEL_SELECT_TITLE: &str = "BLOQUES ESTELARES";

/// Display-only XLM balance in the level-select HUD.
pub const LEVEL_SELECT_BALANCE_XLM: u32 = 500;

/// What an input or frame did to the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A different screen is now active.
    Changed(Screen),
    /// The active screen's state changed.
    Updated,
    /// Nothing changed.
    Ignored,
}

impl Transition {
    /// Whether the renderer needs a fresh view.
    pub const fn needs_render(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Decoration generated when the home screen mounts.
#[derive(Debug, Clone)]
pub struct HomeScreen {
    stars: Vec<Star>,
    sparkles: Vec<Sparkle>,
}

impl HomeScreen {
    /// Mount the home screen with a fresh starfield.
    pub fn mount(decorator: &mut Decorator) -> Self {
        Self {
            stars: decorator.stars(),
            sparkles: decorator.home_sparkles(),
        }
    }

    /// Project into a view snapshot.
    pub fn view(&self) -> HomeView {
        HomeView {
            logo: assets::LOGO.to_owned(),
            subtitle: HOME_SUBTITLE.to_owned(),
            stars: self.stars.clone(),
            sparkles: self.sparkles.clone(),
        }
    }
}

/// The active screen and the state it owns.
#[derive(Debug)]
enum ScreenState {
    Home(HomeScreen),
    LevelSelect,
    Game(Box<GameSession>),
    Reward(RewardScreen),
}

impl ScreenState {
    const fn screen(&self) -> Screen {
        match self {
            Self::Home(_) => Screen::Home,
            Self::LevelSelect => Screen::LevelSelect,
            Self::Game(_) => Screen::Game,
            Self::Reward(_) => Screen::Reward,
        }
    }
}

/// Owner of the active screen.
#[derive(Debug)]
pub struct ScreenNavigator {
    state: ScreenState,
    catalog: LevelCatalog,
    config: GameConfig,
    decorator: Decorator,
    selected_level: Option<LevelId>,
    last_completion: Option<LevelCompletion>,
}

impl ScreenNavigator {
    /// Start on the home screen.
    pub fn new(config: GameConfig) -> Self {
        let mut decorator = Decorator::new(&config.decoration);
        let home = HomeScreen::mount(&mut decorator);
        Self {
            state: ScreenState::Home(home),
            catalog: LevelCatalog::standard(),
            config,
            decorator,
            selected_level: None,
            last_completion: None,
        }
    }

    /// The active screen.
    pub const fn screen(&self) -> Screen {
        self.state.screen()
    }

    /// The level picked on the map, while in a game.
    pub const fn selected_level(&self) -> Option<LevelId> {
        self.selected_level
    }

    /// The world catalog.
    pub const fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    /// The running session, when the game screen is active.
    pub fn session(&self) -> Option<&GameSession> {
        match &self.state {
            ScreenState::Game(session) => Some(session.as_ref()),
            _ => None,
        }
    }

    /// The mounted reward screen, when active.
    pub const fn reward(&self) -> Option<&RewardScreen> {
        match &self.state {
            ScreenState::Reward(reward) => Some(reward),
            _ => None,
        }
    }

    /// The most recent level completion.
    pub const fn last_completion(&self) -> Option<LevelCompletion> {
        self.last_completion
    }

    /// Home -> LevelSelect.
    pub fn go_to_level_select(&mut self) -> Transition {
        if !matches!(self.state, ScreenState::Home(_)) {
            return Transition::Ignored;
        }
        self.enter(ScreenState::LevelSelect)
    }

    /// LevelSelect -> Game with a fresh session. Locked levels are ignored.
    pub fn go_to_game(&mut self, level: LevelId) -> Transition {
        if !matches!(self.state, ScreenState::LevelSelect) {
            return Transition::Ignored;
        }
        if !self.catalog.is_playable(level) {
            debug!(level = %level, "Locked level ignored");
            return Transition::Ignored;
        }
        let Some(session) = GameSession::begin(level, &self.config, &mut self.decorator) else {
            return Transition::Ignored;
        };
        self.selected_level = Some(level);
        self.enter(ScreenState::Game(Box::new(session)))
    }

    /// Game -> Reward, once the session has reported completion.
    pub fn go_to_reward(&mut self) -> Transition {
        let ScreenState::Game(session) = &self.state else {
            return Transition::Ignored;
        };
        if !session.completion_reported() {
            return Transition::Ignored;
        }
        let reward = RewardScreen::mount(&self.config.timing, &mut self.decorator);
        self.enter(ScreenState::Reward(reward))
    }

    /// Any screen -> Home.
    pub fn go_to_home(&mut self) -> Transition {
        if matches!(self.state, ScreenState::Home(_)) {
            return Transition::Ignored;
        }
        let home = HomeScreen::mount(&mut self.decorator);
        self.enter(ScreenState::Home(home))
    }

    /// Game -> LevelSelect, abandoning the session.
    pub fn go_to_level_select_from_game(&mut self) -> Transition {
        if !matches!(self.state, ScreenState::Game(_)) {
            return Transition::Ignored;
        }
        self.enter(ScreenState::LevelSelect)
    }

    /// Reward -> LevelSelect, once the reward panel is visible.
    pub fn continue_from_reward(&mut self) -> Transition {
        let ScreenState::Reward(reward) = &self.state else {
            return Transition::Ignored;
        };
        if !reward.can_continue() {
            return Transition::Ignored;
        }
        self.enter(ScreenState::LevelSelect)
    }

    /// Dispatch one input event.
    pub fn handle(&mut self, input: InputEvent) -> Transition {
        let transition = match input {
            InputEvent::Start => self.go_to_level_select(),
            InputEvent::Back => match self.screen() {
                Screen::LevelSelect => self.go_to_home(),
                Screen::Game => self.go_to_level_select_from_game(),
                Screen::Home | Screen::Reward => Transition::Ignored,
            },
            InputEvent::SelectLevel(level) => self.go_to_game(level),
            InputEvent::ClickNode(node_id) => self.click_node(node_id),
            InputEvent::SelectWalletOption(kind) => self.select_wallet_option(kind),
            InputEvent::Continue => match self.screen() {
                Screen::Game => self.continue_game(),
                Screen::Reward => self.continue_from_reward(),
                Screen::Home | Screen::LevelSelect => Transition::Ignored,
            },
        };
        if transition == Transition::Ignored {
            debug!(input = ?input, screen = %self.screen(), "Input ignored");
        }
        transition
    }

    /// Advance the active screen's timers by `elapsed_ms`.
    pub fn advance(&mut self, elapsed_ms: u64) -> Transition {
        match &mut self.state {
            ScreenState::Game(session) => {
                let before = session.timers_fired();
                if let Some(completion) = session.advance(elapsed_ms) {
                    self.last_completion = Some(completion);
                    return self.go_to_reward();
                }
                if session.timers_fired() == before {
                    Transition::Ignored
                } else {
                    Transition::Updated
                }
            }
            ScreenState::Reward(reward) => {
                if reward.advance(elapsed_ms) {
                    Transition::Updated
                } else {
                    Transition::Ignored
                }
            }
            ScreenState::Home(_) | ScreenState::LevelSelect => Transition::Ignored,
        }
    }

    /// Project the active screen into a view snapshot.
    pub fn view(&self) -> ScreenView {
        match &self.state {
            ScreenState::Home(home) => ScreenView::Home(home.view()),
            ScreenState::LevelSelect => ScreenView::LevelSelect(LevelSelectView {
                levels: self.catalog.levels().to_vec(),
                completed: self.catalog.completed_count(),
                total: self.catalog.total(),
                completion_percent: self.catalog.completion_percent(),
                title: LEVEL_SELECT_TITLE.to_owned(),
                balance_xlm: LEVEL_SELECT_BALANCE_XLM,
                balance_icon: assets::XLM_TOKEN.to_owned(),
                background: assets::LEVEL_SELECT_BACKGROUND.to_owned(),
            }),
            ScreenState::Game(session) => ScreenView::Game(session.view()),
            ScreenState::Reward(reward) => ScreenView::Reward(reward.view()),
        }
    }

    fn click_node(&mut self, node_id: u32) -> Transition {
        let ScreenState::Game(session) = &mut self.state else {
            return Transition::Ignored;
        };
        match session.click_node(node_id) {
            NodeClick::Connected { .. } => Transition::Updated,
            NodeClick::AlreadyConnected | NodeClick::UnknownNode | NodeClick::NotInProgress => {
                Transition::Ignored
            }
        }
    }

    fn select_wallet_option(&mut self, kind: WalletKind) -> Transition {
        let ScreenState::Game(session) = &mut self.state else {
            return Transition::Ignored;
        };
        match session.select_wallet_option(kind) {
            QuizSelection::Correct { .. } | QuizSelection::Incorrect => Transition::Updated,
            QuizSelection::Locked | QuizSelection::UnknownOption | QuizSelection::NotActive => {
                Transition::Ignored
            }
        }
    }

    fn continue_game(&mut self) -> Transition {
        let ScreenState::Game(session) = &mut self.state else {
            return Transition::Ignored;
        };
        match session.continue_pressed() {
            Some(completion) => {
                self.last_completion = Some(completion);
                self.go_to_reward()
            }
            None => Transition::Ignored,
        }
    }

    /// Replace the active screen, tearing down the old one.
    fn enter(&mut self, next: ScreenState) -> Transition {
        let to = next.screen();
        let previous = std::mem::replace(&mut self.state, next);
        let from = previous.screen();
        match previous {
            ScreenState::Game(mut session) => {
                session.teardown();
            }
            ScreenState::Reward(mut reward) => {
                reward.teardown();
            }
            ScreenState::Home(_) | ScreenState::LevelSelect => {}
        }
        if to != Screen::Game {
            self.selected_level = None;
        }
        info!(from = %from, to = %to, "Screen changed");
        Transition::Changed(to)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::unreachable)]
mod tests {
    use super::*;

    fn navigator() -> ScreenNavigator {
        let mut config = GameConfig::default();
        config.decoration.seed = Some(21);
        ScreenNavigator::new(config)
    }

    fn in_level(level: LevelId) -> ScreenNavigator {
        let mut nav = navigator();
        nav.handle(InputEvent::Start);
        nav.handle(InputEvent::SelectLevel(level));
        nav
    }

    #[test]
    fn starts_on_home_with_decoration() {
        let nav = navigator();
        assert_eq!(nav.screen(), Screen::Home);
        let ScreenView::Home(home) = nav.view() else {
            unreachable!("home screen expected");
        };
        assert_eq!(home.stars.len(), 100);
        assert_eq!(home.sparkles.len(), 15);
        assert_eq!(home.subtitle, HOME_SUBTITLE);
    }

    #[test]
    fn start_opens_level_select() {
        let mut nav = navigator();
        assert_eq!(
            nav.handle(InputEvent::Start),
            Transition::Changed(Screen::LevelSelect)
        );
        let ScreenView::LevelSelect(view) = nav.view() else {
            unreachable!("level select expected");
        };
        assert_eq!(view.levels.len(), 5);
        assert!((view.completion_percent - 40.0).abs() < 1e-9);
        assert_eq!(view.title, "BLOQUES ESTELARES");
        assert_eq!(view.balance_xlm, 500);
        assert_eq!(view.balance_icon, "/images/stellar-xlm-logo.jpeg");
        assert_eq!(view.background, "/images/game-interface.png");
    }

    #[test]
    fn locked_level_is_ignored() {
        let mut nav = navigator();
        nav.handle(InputEvent::Start);
        for level in [LevelId::Token, LevelId::Soroban, LevelId::Treasure] {
            assert_eq!(nav.handle(InputEvent::SelectLevel(level)), Transition::Ignored);
            assert_eq!(nav.screen(), Screen::LevelSelect);
        }
    }

    #[test]
    fn select_level_starts_fresh_session() {
        let nav = in_level(LevelId::Decentralized);
        assert_eq!(nav.screen(), Screen::Game);
        assert_eq!(nav.selected_level(), Some(LevelId::Decentralized));
        assert_eq!(nav.session().unwrap().score(), 1250);
    }

    #[test]
    fn back_walks_up_the_screen_stack() {
        let mut nav = in_level(LevelId::Wallet);
        assert_eq!(
            nav.handle(InputEvent::Back),
            Transition::Changed(Screen::LevelSelect)
        );
        assert!(nav.selected_level().is_none());
        assert_eq!(nav.handle(InputEvent::Back), Transition::Changed(Screen::Home));
        assert_eq!(nav.handle(InputEvent::Back), Transition::Ignored);
    }

    #[test]
    fn reentering_a_level_resets_score() {
        let mut nav = in_level(LevelId::Decentralized);
        nav.handle(InputEvent::ClickNode(0));
        assert_eq!(nav.session().unwrap().score(), 1300);
        nav.handle(InputEvent::Back);
        nav.handle(InputEvent::SelectLevel(LevelId::Decentralized));
        assert_eq!(nav.session().unwrap().score(), 1250);
    }

    #[test]
    fn input_for_other_screens_is_ignored() {
        let mut nav = navigator();
        assert_eq!(nav.handle(InputEvent::ClickNode(0)), Transition::Ignored);
        assert_eq!(nav.handle(InputEvent::Continue), Transition::Ignored);
        assert_eq!(
            nav.handle(InputEvent::SelectLevel(LevelId::Wallet)),
            Transition::Ignored
        );
        assert_eq!(nav.screen(), Screen::Home);
        assert_eq!(nav.go_to_reward(), Transition::Ignored);
    }

    #[test]
    fn completion_moves_to_reward_after_delay() {
        let mut nav = in_level(LevelId::Decentralized);
        for id in 0..8 {
            assert_eq!(nav.handle(InputEvent::ClickNode(id)), Transition::Updated);
        }
        assert_eq!(nav.advance(999), Transition::Ignored);
        assert_eq!(nav.screen(), Screen::Game);
        assert_eq!(nav.advance(1), Transition::Changed(Screen::Reward));
        assert_eq!(nav.last_completion().unwrap().score, 1650);
    }

    #[test]
    fn continue_button_skips_the_delay() {
        let mut nav = in_level(LevelId::Decentralized);
        assert_eq!(nav.handle(InputEvent::Continue), Transition::Ignored);
        for id in 0..8 {
            nav.handle(InputEvent::ClickNode(id));
        }
        assert_eq!(
            nav.handle(InputEvent::Continue),
            Transition::Changed(Screen::Reward)
        );
    }

    #[test]
    fn reward_continue_waits_for_reveal() {
        let mut nav = in_level(LevelId::Wallet);
        for answer in [WalletKind::Cold, WalletKind::Mobile, WalletKind::Desktop] {
            nav.handle(InputEvent::SelectWalletOption(answer));
            nav.advance(1000);
        }
        assert_eq!(nav.screen(), Screen::Reward);
        assert_eq!(nav.last_completion().unwrap().score, 1850);

        assert_eq!(nav.handle(InputEvent::Continue), Transition::Ignored);
        assert_eq!(nav.advance(1500), Transition::Updated);
        assert!(nav.reward().unwrap().can_continue());
        assert_eq!(
            nav.handle(InputEvent::Continue),
            Transition::Changed(Screen::LevelSelect)
        );
    }

    #[test]
    fn leaving_the_game_cancels_its_timers() {
        let mut nav = in_level(LevelId::Decentralized);
        for id in 0..8 {
            nav.handle(InputEvent::ClickNode(id));
        }
        nav.handle(InputEvent::Back);
        assert_eq!(nav.advance(10_000), Transition::Ignored);
        assert_eq!(nav.screen(), Screen::LevelSelect);
        assert!(nav.last_completion().is_none());
    }

    #[test]
    fn go_to_home_works_from_anywhere() {
        let mut nav = in_level(LevelId::Wallet);
        assert_eq!(nav.go_to_home(), Transition::Changed(Screen::Home));
        assert_eq!(nav.go_to_home(), Transition::Ignored);
    }

    #[test]
    fn needs_render_only_when_something_changed() {
        assert!(Transition::Changed(Screen::Home).needs_render());
        assert!(Transition::Updated.needs_render());
        assert!(!Transition::Ignored.needs_render());
    }
}
