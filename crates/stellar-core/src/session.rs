//! One play-through of one level.
//!
//! A [`GameSession`] is created when the player enters a level and dropped
//! when they leave. It owns the score, the minigame engine and every timer
//! the level arms, so leaving the game screen cancels all of them at once.
//!
//! # Design Principles
//!
//! - Engines decide; the session schedules. Engines report outcomes
//!   ([`NodeClick`], [`QuizSelection`]) and the session turns them into
//!   timers (particle expiry, next round, delayed completion).
//! - Completion is latched. [`LevelCompletion`] is handed out at most once
//!   per session, whether it comes from the delayed timer or from the
//!   player pressing `continue` first.

use chrono::{DateTime, Utc};
use stellar_types::{
    BoardView, ErrorSpark, GameView, LevelId, NodeBoardView, QuizBoardView, SessionId, WalletKind,
};
use tracing::{debug, info};

use crate::assets;
use crate::config::{GameConfig, ScoringConfig, TimingConfig};
use crate::decoration::Decorator;
use crate::node_connection::{NodeClick, NodeConnectionEngine};
use crate::scheduler::{Scheduler, TimerId};
use crate::score::ScoreTracker;
use crate::wallet_quiz::{MAX_WALLET_ROUNDS, QuizSelection, RoundAdvance, WalletQuizEngine};

/// The minigame a session is running.
#[derive(Debug, Clone)]
pub enum LevelGame {
    /// "decentralized": connect every node.
    Nodes(NodeConnectionEngine),
    /// "wallet": answer every question.
    Quiz(WalletQuizEngine),
}

/// Timers a session can arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionTimer {
    CriticalError,
    ExpireParticle(u32),
    NextRound(u32),
    CompleteLevel,
}

/// Reported once when a session's objective is met.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelCompletion {
    /// The session that finished.
    pub session_id: SessionId,
    /// The level that finished.
    pub level: LevelId,
    /// Final score.
    pub score: u32,
    /// Virtual milliseconds since the session began.
    pub elapsed_ms: u64,
}

/// State of one level play-through.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: SessionId,
    level: LevelId,
    started_at: DateTime<Utc>,
    score: ScoreTracker,
    game: LevelGame,
    scheduler: Scheduler<SessionTimer>,
    completion_timer: Option<TimerId>,
    completion_reported: bool,
    timers_fired: u64,
    error_sparks: Vec<ErrorSpark>,
    timing: TimingConfig,
    scoring: ScoringConfig,
}

impl GameSession {
    /// Start a fresh session for `level`.
    ///
    /// Returns `None` for levels that have no minigame.
    pub fn begin(level: LevelId, config: &GameConfig, decorator: &mut Decorator) -> Option<Self> {
        let mut scheduler = Scheduler::new();
        let (game, error_sparks) = match level {
            LevelId::Decentralized => {
                let mut engine = NodeConnectionEngine::new();
                engine.start(&config.board, decorator);
                scheduler.schedule(config.timing.critical_error_delay_ms, SessionTimer::CriticalError);
                (LevelGame::Nodes(engine), decorator.error_sparks())
            }
            LevelId::Wallet => {
                let mut engine = WalletQuizEngine::new();
                engine.start_round(0);
                (LevelGame::Quiz(engine), Vec::new())
            }
            LevelId::Token | LevelId::Soroban | LevelId::Treasure => return None,
        };

        let session = Self {
            id: SessionId::new(),
            level,
            started_at: Utc::now(),
            score: ScoreTracker::new(config.scoring.initial_score),
            game,
            scheduler,
            completion_timer: None,
            completion_reported: false,
            timers_fired: 0,
            error_sparks,
            timing: config.timing.clone(),
            scoring: config.scoring.clone(),
        };
        info!(
            session_id = %session.id,
            level = %level,
            score = session.score.value(),
            "Game session started"
        );
        Some(session)
    }

    /// Session identifier.
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Level being played.
    pub const fn level(&self) -> LevelId {
        self.level
    }

    /// Current score.
    pub const fn score(&self) -> u32 {
        self.score.value()
    }

    /// The running minigame.
    pub const fn game(&self) -> &LevelGame {
        &self.game
    }

    /// Virtual time since the session began.
    pub const fn elapsed_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Number of armed timers.
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// Number of timers fired so far. Changes whenever a frame changed the
    /// board.
    pub const fn timers_fired(&self) -> u64 {
        self.timers_fired
    }

    /// Whether completion has been handed out.
    pub const fn completion_reported(&self) -> bool {
        self.completion_reported
    }

    /// Derived progress of the running minigame.
    pub fn progress(&self) -> f64 {
        match &self.game {
            LevelGame::Nodes(engine) => engine.progress(),
            LevelGame::Quiz(engine) => engine.progress(),
        }
    }

    /// Whether the minigame's objective is met (every node connected, or
    /// the final question answered correctly).
    pub fn objective_met(&self) -> bool {
        match &self.game {
            LevelGame::Nodes(engine) => engine.is_complete(),
            LevelGame::Quiz(engine) => {
                engine.is_complete()
                    || matches!(
                        self.completion_timer,
                        Some(id) if self.scheduler.is_pending(id)
                    )
            }
        }
    }

    /// Click a node on the board.
    pub fn click_node(&mut self, node_id: u32) -> NodeClick {
        let LevelGame::Nodes(engine) = &mut self.game else {
            return NodeClick::NotInProgress;
        };
        let outcome = engine.click_node(node_id, &mut self.score, self.scoring.node_connect_bonus);
        if let NodeClick::Connected {
            particle,
            completed,
            ..
        } = outcome
        {
            self.scheduler
                .schedule(self.timing.particle_lifetime_ms, SessionTimer::ExpireParticle(particle.id));
            debug!(
                session_id = %self.id,
                node_id,
                score = self.score.value(),
                "Node connected"
            );
            if completed {
                info!(session_id = %self.id, "All nodes connected");
                self.arm_completion();
            }
        }
        outcome
    }

    /// Answer the open quiz question.
    pub fn select_wallet_option(&mut self, kind: WalletKind) -> QuizSelection {
        let LevelGame::Quiz(engine) = &mut self.game else {
            return QuizSelection::NotActive;
        };
        let outcome = engine.select_option(kind, &mut self.score, &self.scoring);
        match outcome {
            QuizSelection::Correct {
                advance: RoundAdvance::NextRound { next },
            } => {
                self.scheduler
                    .schedule(self.timing.next_round_delay_ms, SessionTimer::NextRound(next));
            }
            QuizSelection::Correct {
                advance: RoundAdvance::Finish,
            } => {
                info!(session_id = %self.id, "Final question answered");
                self.arm_completion();
            }
            QuizSelection::Incorrect => {
                debug!(
                    session_id = %self.id,
                    option = %kind,
                    score = self.score.value(),
                    "Incorrect answer"
                );
            }
            QuizSelection::Locked | QuizSelection::UnknownOption | QuizSelection::NotActive => {}
        }
        outcome
    }

    /// Player pressed `continue`.
    ///
    /// Accepted only once the objective is met. Reports completion now and
    /// cancels the pending delayed completion.
    pub fn continue_pressed(&mut self) -> Option<LevelCompletion> {
        if self.completion_reported || !self.objective_met() {
            return None;
        }
        if let Some(id) = self.completion_timer.take() {
            self.scheduler.cancel(id);
        }
        self.complete()
    }

    /// Advance the session clock, firing due timers in order.
    ///
    /// Returns the completion if it fired during this window.
    pub fn advance(&mut self, elapsed_ms: u64) -> Option<LevelCompletion> {
        let until = self.scheduler.horizon(elapsed_ms);
        let mut completion = None;
        while let Some(timer) = self.scheduler.pop_due(until) {
            self.timers_fired = self.timers_fired.saturating_add(1);
            debug!(session_id = %self.id, due_ms = timer.due_ms, timer = ?timer.payload, "Timer fired");
            match timer.payload {
                SessionTimer::CriticalError => {
                    if let LevelGame::Nodes(engine) = &mut self.game {
                        if engine.raise_critical_error() {
                            info!(session_id = %self.id, "Critical error banner raised");
                        }
                    }
                }
                SessionTimer::ExpireParticle(particle_id) => {
                    if let LevelGame::Nodes(engine) = &mut self.game {
                        engine.expire_particle(particle_id);
                    }
                }
                SessionTimer::NextRound(index) => {
                    if let LevelGame::Quiz(engine) = &mut self.game {
                        engine.start_round(index);
                    }
                }
                SessionTimer::CompleteLevel => {
                    self.completion_timer = None;
                    completion = completion.or_else(|| self.complete());
                }
            }
        }
        self.scheduler.settle(until);
        completion
    }

    /// Cancel every armed timer. Called when the game screen is torn down.
    pub fn teardown(&mut self) -> usize {
        let cancelled = self.scheduler.cancel_all();
        self.completion_timer = None;
        debug!(session_id = %self.id, cancelled, "Session timers cancelled");
        cancelled
    }

    /// Project the session into a view snapshot.
    pub fn view(&self) -> GameView {
        let board = match &self.game {
            LevelGame::Nodes(engine) => BoardView::Nodes(NodeBoardView {
                phase: engine.phase(),
                nodes: engine.nodes().to_vec(),
                particles: engine.particles().to_vec(),
                critical_error: engine.critical_error(),
                error_sparks: if engine.critical_error() {
                    self.error_sparks.clone()
                } else {
                    Vec::new()
                },
                connected: engine.connected_count(),
                total: engine.total(),
            }),
            LevelGame::Quiz(engine) => BoardView::Quiz(QuizBoardView {
                phase: engine.phase(),
                question: engine.question().cloned(),
                selected: engine.selected(),
                feedback: engine.feedback(),
                feedback_banner: engine.feedback().map(|f| f.banner().to_owned()),
                round: engine.round(),
                max_rounds: MAX_WALLET_ROUNDS,
            }),
        };
        GameView {
            session_id: self.id,
            started_at: self.started_at,
            level: self.level,
            title: level_title(self.level).to_owned(),
            background: assets::GAME_BACKGROUND.to_owned(),
            score: self.score.value(),
            progress: self.progress(),
            continue_enabled: !self.completion_reported && self.objective_met(),
            board,
        }
    }

    fn arm_completion(&mut self) {
        if self.completion_reported || self.completion_timer.is_some() {
            return;
        }
        self.completion_timer = Some(
            self.scheduler
                .schedule(self.timing.completion_delay_ms, SessionTimer::CompleteLevel),
        );
    }

    fn complete(&mut self) -> Option<LevelCompletion> {
        if self.completion_reported {
            return None;
        }
        if let LevelGame::Quiz(engine) = &mut self.game {
            engine.finish();
        }
        self.completion_reported = true;
        let completion = LevelCompletion {
            session_id: self.id,
            level: self.level,
            score: self.score.value(),
            elapsed_ms: self.scheduler.now_ms(),
        };
        info!(
            session_id = %self.id,
            level = %self.level,
            score = completion.score,
            elapsed_ms = completion.elapsed_ms,
            "Level complete"
        );
        Some(completion)
    }
}

/// Banner shown above a level's board.
pub const fn level_title(level: LevelId) -> &'static str {
    match level {
        LevelId::Decentralized => "MUNDO DECENTRALIZADO",
        LevelId::Wallet => "CIUDAD DE LA CARTERA",
        LevelId::Token => "CIUDAD DE TOKENS",
        LevelId::Soroban => "LABORATORIO SOROBAN",
        LevelId::Treasure => "CAMINO DEL TESORO",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use stellar_types::{Feedback, NodeGamePhase, QuizPhase};

    use super::*;

    fn begin(level: LevelId) -> GameSession {
        GameSession::begin(level, &GameConfig::default(), &mut Decorator::seeded(7)).unwrap()
    }

    fn node_board(session: &GameSession) -> NodeBoardView {
        match session.view().board {
            BoardView::Nodes(board) => board,
            BoardView::Quiz(_) => panic!("expected node board"),
        }
    }

    fn quiz_board(session: &GameSession) -> QuizBoardView {
        match session.view().board {
            BoardView::Quiz(board) => board,
            BoardView::Nodes(_) => panic!("expected quiz board"),
        }
    }

    #[test]
    fn locked_levels_have_no_session() {
        let config = GameConfig::default();
        let mut decorator = Decorator::seeded(1);
        for level in [LevelId::Token, LevelId::Soroban, LevelId::Treasure] {
            assert!(GameSession::begin(level, &config, &mut decorator).is_none());
        }
    }

    #[test]
    fn sessions_start_at_initial_score() {
        assert_eq!(begin(LevelId::Decentralized).score(), 1250);
        assert_eq!(begin(LevelId::Wallet).score(), 1250);
    }

    #[test]
    fn critical_error_raises_after_three_seconds() {
        let mut session = begin(LevelId::Decentralized);
        session.advance(2999);
        assert!(!node_board(&session).critical_error);
        assert!(node_board(&session).error_sparks.is_empty());

        session.advance(1);
        let board = node_board(&session);
        assert!(board.critical_error);
        assert_eq!(board.error_sparks.len(), 10);
        assert_eq!(session.score(), 1250);
        assert!((session.progress() - 0.0).abs() < 1e-9);
    }

    #[test]
    fn only_the_node_game_draws_error_sparks() {
        let config = GameConfig::default();
        let mut decorator = Decorator::seeded(7);
        GameSession::begin(LevelId::Wallet, &config, &mut decorator).unwrap();

        // The quiz leaves the rng untouched.
        let mut fresh = Decorator::seeded(7);
        assert_eq!(decorator.error_sparks(), fresh.error_sparks());

        let mut session = GameSession::begin(LevelId::Decentralized, &config, &mut fresh).unwrap();
        session.advance(3000);
        assert_eq!(node_board(&session).error_sparks.len(), 10);
    }

    #[test]
    fn particles_expire_after_their_lifetime() {
        let mut session = begin(LevelId::Decentralized);
        session.click_node(0);
        assert_eq!(node_board(&session).particles.len(), 1);
        session.advance(999);
        assert_eq!(node_board(&session).particles.len(), 1);
        session.advance(1);
        assert!(node_board(&session).particles.is_empty());
    }

    #[test]
    fn node_completion_fires_once_after_delay() {
        let mut session = begin(LevelId::Decentralized);
        for id in 0..8 {
            session.click_node(id);
        }
        assert_eq!(node_board(&session).phase, NodeGamePhase::Complete);
        assert!(session.view().continue_enabled);

        assert!(session.advance(999).is_none());
        let done = session.advance(1).unwrap();
        assert_eq!(done.score, 1650);
        assert_eq!(done.level, LevelId::Decentralized);
        assert!(session.advance(10_000).is_none());
        assert!(session.continue_pressed().is_none());
        assert!(!session.view().continue_enabled);
    }

    #[test]
    fn continue_reports_early_and_cancels_delayed_completion() {
        let mut session = begin(LevelId::Decentralized);
        for id in 0..8 {
            session.click_node(id);
        }
        let done = session.continue_pressed().unwrap();
        assert_eq!(done.score, 1650);
        assert!(session.advance(5000).is_none());
    }

    #[test]
    fn continue_is_ignored_before_objective() {
        let mut session = begin(LevelId::Decentralized);
        session.click_node(0);
        assert!(!session.view().continue_enabled);
        assert!(session.continue_pressed().is_none());
    }

    #[test]
    fn quiz_opens_first_round_on_entry() {
        let session = begin(LevelId::Wallet);
        let board = quiz_board(&session);
        assert_eq!(board.round, 1);
        assert_eq!(board.max_rounds, 3);
        assert!(board.question.is_some());
        assert!((session.progress() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn correct_answer_advances_after_delay() {
        let mut session = begin(LevelId::Wallet);
        assert!(quiz_board(&session).feedback_banner.is_none());
        session.select_wallet_option(WalletKind::Cold);
        let board = quiz_board(&session);
        assert_eq!(board.feedback, Some(Feedback::Correct));
        assert_eq!(board.feedback_banner.as_deref(), Some("¡CORRECTO!"));

        session.advance(999);
        assert_eq!(quiz_board(&session).round, 1);
        session.advance(1);
        let board = quiz_board(&session);
        assert_eq!(board.round, 2);
        assert!(board.selected.is_none());
        assert_eq!(board.phase, QuizPhase::RoundActive);
    }

    #[test]
    fn final_answer_enables_continue_before_completion() {
        let mut session = begin(LevelId::Wallet);
        for answer in [WalletKind::Cold, WalletKind::Mobile, WalletKind::Desktop] {
            assert!(matches!(
                session.select_wallet_option(answer),
                QuizSelection::Correct { .. }
            ));
            if answer != WalletKind::Desktop {
                assert!(!session.view().continue_enabled);
                session.advance(1000);
            }
        }
        assert!(session.view().continue_enabled);
        assert_eq!(quiz_board(&session).phase, QuizPhase::RoundResolved);

        let done = session.advance(1000).unwrap();
        assert_eq!(done.score, 1850);
        assert_eq!(quiz_board(&session).phase, QuizPhase::AllRoundsComplete);
        assert!((session.progress() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn final_answer_waits_for_completion_delay() {
        let mut config = GameConfig::default();
        config.timing.completion_delay_ms = 500;
        config.timing.next_round_delay_ms = 250;
        let mut session =
            GameSession::begin(LevelId::Wallet, &config, &mut Decorator::seeded(7)).unwrap();

        for answer in [WalletKind::Cold, WalletKind::Mobile] {
            session.select_wallet_option(answer);
            assert!(session.advance(250).is_none());
        }
        session.select_wallet_option(WalletKind::Desktop);
        assert!(session.advance(250).is_none());
        assert!(session.advance(249).is_none());
        let done = session.advance(1).unwrap();
        assert_eq!(done.elapsed_ms, 1000);
    }

    #[test]
    fn incorrect_answer_never_advances() {
        let mut session = begin(LevelId::Wallet);
        session.select_wallet_option(WalletKind::Hot);
        assert_eq!(session.score(), 1150);
        assert!(session.advance(60_000).is_none());
        let board = quiz_board(&session);
        assert_eq!(board.feedback_banner.as_deref(), Some("INCORRECTO"));
        assert_eq!(board.round, 1);
        assert_eq!(board.phase, QuizPhase::RoundResolved);
        assert!(!session.view().continue_enabled);
    }

    #[test]
    fn wrong_board_input_is_ignored() {
        let mut nodes = begin(LevelId::Decentralized);
        assert_eq!(
            nodes.select_wallet_option(WalletKind::Cold),
            QuizSelection::NotActive
        );
        let mut quiz = begin(LevelId::Wallet);
        assert_eq!(quiz.click_node(0), NodeClick::NotInProgress);
        assert_eq!(quiz.score(), 1250);
    }

    #[test]
    fn teardown_cancels_everything() {
        let mut session = begin(LevelId::Decentralized);
        session.click_node(0);
        assert_eq!(session.pending_timers(), 2);
        assert_eq!(session.teardown(), 2);
        session.advance(10_000);
        assert!(!node_board(&session).critical_error);
        assert_eq!(node_board(&session).particles.len(), 1);
    }

    #[test]
    fn view_carries_title_and_background() {
        let view = begin(LevelId::Wallet).view();
        assert_eq!(view.title, "CIUDAD DE LA CARTERA");
        assert_eq!(view.background, assets::GAME_BACKGROUND);
        assert_eq!(view.level, LevelId::Wallet);
    }
}
