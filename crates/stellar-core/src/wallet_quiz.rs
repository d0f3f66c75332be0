//! The wallet quiz minigame ("Ciudad de la Cartera").
//!
//! Three multiple-choice rounds, asked in a fixed order. The first answer in
//! a round locks it: a correct answer schedules the next round (or the
//! finish), an incorrect one leaves the round resolved with the wrong answer
//! on screen. There is no retry path; the player leaves with `back`.
//!
//! # Invariants
//!
//! - The round counter only increases, from 0 to [`MAX_WALLET_ROUNDS`].
//! - At most one question is active.
//! - Progress is `round / MAX_WALLET_ROUNDS * 100`, derived on read. It
//!   jumps on round start, so it already reads 100 while the last question
//!   is open; completion is signalled separately by the phase.

use stellar_types::{Feedback, QuizPhase, WalletKind, WalletOption, WalletQuestion};
use tracing::debug;

use crate::config::ScoringConfig;
use crate::score::ScoreTracker;

/// Number of rounds in a quiz.
pub const MAX_WALLET_ROUNDS: u32 = 3;

/// What the session should arm after a correct answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundAdvance {
    /// Start round `next` after the round delay.
    NextRound {
        /// Zero-based index of the round to start.
        next: u32,
    },
    /// Finish the quiz after the round delay.
    Finish,
}

/// Outcome of selecting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizSelection {
    /// Correct answer; score increased.
    Correct {
        /// Follow-up the owner should schedule.
        advance: RoundAdvance,
    },
    /// Incorrect answer; score decreased, clamped at zero.
    Incorrect,
    /// The round already has an answer. Nothing changed.
    Locked,
    /// The option is not part of the current question. Nothing changed.
    UnknownOption,
    /// No round is open. Nothing changed.
    NotActive,
}

/// The fixed question bank, in asking order.
pub fn question_bank() -> Vec<WalletQuestion> {
    vec![
        question(
            "\u{00BF}Qu\u{00E9} tipo de cartera es ideal para almacenar grandes cantidades de \
             criptomonedas de forma segura sin conexi\u{00F3}n a internet?",
            [
                (WalletKind::Hot, false),
                (WalletKind::Cold, true),
                (WalletKind::Mobile, false),
            ],
        ),
        question(
            "\u{00BF}Qu\u{00E9} tipo de cartera es una aplicaci\u{00F3}n en tu smartphone que te permite \
             enviar y recibir criptomonedas f\u{00E1}cilmente?",
            [
                (WalletKind::Desktop, false),
                (WalletKind::Hardware, false),
                (WalletKind::Mobile, true),
            ],
        ),
        question(
            "\u{00BF}Qu\u{00E9} tipo de cartera se ejecuta en tu computadora y te da control total \
             sobre tus claves privadas?",
            [
                (WalletKind::Web, false),
                (WalletKind::Desktop, true),
                (WalletKind::Paper, false),
            ],
        ),
    ]
}

fn question(prompt: &str, options: [(WalletKind, bool); 3]) -> WalletQuestion {
    WalletQuestion {
        prompt: prompt.to_owned(),
        options: options
            .into_iter()
            .map(|(id, correct)| WalletOption {
                id,
                icon: id.icon().to_owned(),
                correct,
            })
            .collect(),
    }
}

/// State of the wallet quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletQuizEngine {
    bank: Vec<WalletQuestion>,
    phase: QuizPhase,
    round: u32,
    question: Option<WalletQuestion>,
    selected: Option<WalletKind>,
    feedback: Option<Feedback>,
}

impl Default for WalletQuizEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletQuizEngine {
    /// A quiz over the standard bank, before its first round.
    pub fn new() -> Self {
        Self {
            bank: question_bank(),
            phase: QuizPhase::RoundActive,
            round: 0,
            question: None,
            selected: None,
            feedback: None,
        }
    }

    /// Open round `index` (zero-based).
    ///
    /// Returns `false` without changing anything when `index` is out of
    /// range, would move the counter backwards, or the quiz is finished.
    pub fn start_round(&mut self, index: u32) -> bool {
        if index >= MAX_WALLET_ROUNDS
            || index < self.round
            || self.phase == QuizPhase::AllRoundsComplete
        {
            return false;
        }
        let Some(question) = usize::try_from(index)
            .ok()
            .and_then(|i| self.bank.get(i))
            .cloned()
        else {
            return false;
        };

        self.question = Some(question);
        self.selected = None;
        self.feedback = None;
        self.round = index.saturating_add(1);
        self.phase = QuizPhase::RoundActive;
        debug!(round = self.round, "Quiz round started");
        true
    }

    /// Answer the open question. The first answer locks the round.
    pub fn select_option(
        &mut self,
        kind: WalletKind,
        score: &mut ScoreTracker,
        scoring: &ScoringConfig,
    ) -> QuizSelection {
        if self.phase != QuizPhase::RoundActive {
            return if self.selected.is_some() {
                QuizSelection::Locked
            } else {
                QuizSelection::NotActive
            };
        }
        let Some(question) = &self.question else {
            return QuizSelection::NotActive;
        };
        let Some(option) = question.option(kind) else {
            return QuizSelection::UnknownOption;
        };
        let correct = option.correct;

        self.selected = Some(kind);
        self.phase = QuizPhase::RoundResolved;

        if correct {
            self.feedback = Some(Feedback::Correct);
            score.add(scoring.correct_answer_bonus);
            let advance = if self.round < MAX_WALLET_ROUNDS {
                RoundAdvance::NextRound { next: self.round }
            } else {
                RoundAdvance::Finish
            };
            QuizSelection::Correct { advance }
        } else {
            self.feedback = Some(Feedback::Incorrect);
            score.subtract_clamped(scoring.incorrect_answer_penalty);
            QuizSelection::Incorrect
        }
    }

    /// Close the quiz after the final correct answer.
    ///
    /// Returns `true` the first time only, and only once the last round was
    /// answered correctly.
    pub fn finish(&mut self) -> bool {
        let ready = self.phase == QuizPhase::RoundResolved
            && self.round == MAX_WALLET_ROUNDS
            && self.feedback == Some(Feedback::Correct);
        if ready {
            self.phase = QuizPhase::AllRoundsComplete;
        }
        ready
    }

    /// Current phase.
    pub const fn phase(&self) -> QuizPhase {
        self.phase
    }

    /// Whether every round was answered correctly and the quiz closed.
    pub fn is_complete(&self) -> bool {
        self.phase == QuizPhase::AllRoundsComplete
    }

    /// One-based number of the current round; 0 before the first.
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// The open question, if any.
    pub const fn question(&self) -> Option<&WalletQuestion> {
        self.question.as_ref()
    }

    /// The answer chosen this round.
    pub const fn selected(&self) -> Option<WalletKind> {
        self.selected
    }

    /// Feedback for this round's answer.
    pub const fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    /// `round / MAX_WALLET_ROUNDS * 100`, or 100 once complete.
    pub fn progress(&self) -> f64 {
        if self.is_complete() {
            return 100.0;
        }
        f64::from(self.round.min(MAX_WALLET_ROUNDS)) / f64::from(MAX_WALLET_ROUNDS) * 100.0
    }
}
