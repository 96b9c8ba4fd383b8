use std::fmt;

use civics_core::QuestionCatalog;
use civics_core::model::{DynamicAnswers, Question, QuestionId};
use civics_core::resolver;
use rand::Rng;
use tracing::debug;

use super::config::SessionConfig;
use super::progress::SessionProgress;
use super::view::SessionResults;
use crate::error::SessionError;
use crate::progress_store::ProgressStore;
use crate::selection;

//
// ─── PHASE & OUTCOME ───────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    Setup,
    Active,
    Results,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionPhase::Setup => "setup",
            SessionPhase::Active => "active",
            SessionPhase::Results => "results",
        })
    }
}

/// One self-graded answer within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    pub question_id: QuestionId,
    pub was_correct: bool,
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Setup → Active → Results state machine shared by practice and exam runs.
///
/// The engine owns only the transient run state. The catalog, the random
/// source, the learner's dynamic answers and the progress store are passed
/// in by the caller on each transition, so nothing is persisted here.
pub struct SessionEngine {
    config: SessionConfig,
    phase: SessionPhase,
    questions: Vec<Question>,
    current: usize,
    outcomes: Vec<SessionOutcome>,
    revealed: bool,
}

impl SessionEngine {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            phase: SessionPhase::Setup,
            questions: Vec::new(),
            current: 0,
            outcomes: Vec::new(),
            revealed: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Replace the configuration. Only allowed during Setup.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` outside Setup.
    pub fn configure(&mut self, config: SessionConfig) -> Result<(), SessionError> {
        self.expect_phase(SessionPhase::Setup)?;
        self.config = config;
        Ok(())
    }

    /// Sample questions and enter Active.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` outside Setup, and
    /// `SessionError::Empty` if sampling produced no questions; the engine
    /// then stays in Setup.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        catalog: &QuestionCatalog,
        rng: &mut R,
    ) -> Result<(), SessionError> {
        self.expect_phase(SessionPhase::Setup)?;

        let questions = selection::sample(
            catalog.questions(),
            self.config.question_count(),
            self.config.restrict_to_flagged(),
            rng,
        );
        if questions.is_empty() {
            debug!(
                requested = self.config.question_count(),
                flagged_only = self.config.restrict_to_flagged(),
                "refusing to start an empty session"
            );
            return Err(SessionError::Empty);
        }

        debug!(
            mode = ?self.config.mode(),
            questions = questions.len(),
            "session started"
        );
        self.questions = questions;
        self.current = 0;
        self.outcomes.clear();
        self.revealed = false;
        self.phase = SessionPhase::Active;
        Ok(())
    }

    /// Discard a finished run and start a fresh one with a new sample.
    ///
    /// Only what was already written to the progress store survives.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhase` unless in Results, and
    /// `SessionError::Empty` if the new sample is empty (the engine is then
    /// back in Setup).
    pub fn restart<R: Rng + ?Sized>(
        &mut self,
        catalog: &QuestionCatalog,
        rng: &mut R,
    ) -> Result<(), SessionError> {
        self.expect_phase(SessionPhase::Results)?;
        self.questions.clear();
        self.current = 0;
        self.outcomes.clear();
        self.revealed = false;
        self.phase = SessionPhase::Setup;
        self.start(catalog, rng)
    }

    /// The question on screen; `None` outside Active.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase == SessionPhase::Active {
            self.questions.get(self.current)
        } else {
            None
        }
    }

    /// Answers to display for the current question.
    #[must_use]
    pub fn current_answers(&self, dynamic_answers: &DynamicAnswers) -> Option<Vec<String>> {
        self.current_question()
            .map(|question| resolver::resolve(question, dynamic_answers))
    }

    /// Show the answer. Display-only; no transition.
    pub fn reveal(&mut self) {
        if self.phase == SessionPhase::Active {
            self.revealed = true;
        }
    }

    pub fn hide(&mut self) {
        self.revealed = false;
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Record the learner's self-grade for the current question and advance.
    ///
    /// The outcome is written to `progress` before the engine moves on; the
    /// last answer moves the session to Results.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` in Results and
    /// `SessionError::InvalidPhase` in Setup.
    pub fn submit(
        &mut self,
        was_correct: bool,
        progress: &mut ProgressStore,
    ) -> Result<SessionOutcome, SessionError> {
        if self.phase == SessionPhase::Results {
            return Err(SessionError::Completed);
        }
        self.expect_phase(SessionPhase::Active)?;
        let question_id = self
            .questions
            .get(self.current)
            .map(Question::id)
            .ok_or(SessionError::Completed)?;

        let outcome = SessionOutcome {
            question_id,
            was_correct,
        };
        self.outcomes.push(outcome);
        progress.record_answer(question_id, was_correct);

        if self.current + 1 >= self.questions.len() {
            self.phase = SessionPhase::Results;
            debug!(
                correct = self.correct_count(),
                total = self.questions.len(),
                "session finished"
            );
        } else {
            self.current += 1;
            self.revealed = false;
        }
        Ok(outcome)
    }

    /// Zero-based index of the current question.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn outcomes(&self) -> &[SessionOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.was_correct).count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Results
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            position: if self.phase == SessionPhase::Active {
                self.current + 1
            } else {
                0
            },
            total: self.questions.len(),
            answered: self.outcomes.len(),
            correct: self.correct_count(),
            is_complete: self.is_complete(),
        }
    }

    /// An exam that already has enough correct answers to pass.
    #[must_use]
    pub fn has_secured_pass(&self) -> bool {
        self.config
            .passing_score()
            .is_some_and(|score| self.correct_count() >= score)
    }

    /// `passed` verdict; `None` before Results or in practice mode.
    #[must_use]
    pub fn passed(&self) -> Option<bool> {
        self.results().and_then(|results| results.passed)
    }

    /// Final tally; `None` until the session reaches Results.
    #[must_use]
    pub fn results(&self) -> Option<SessionResults> {
        if self.phase != SessionPhase::Results {
            return None;
        }
        Some(SessionResults::from_outcomes(
            self.config.mode(),
            self.config.passing_score(),
            &self.outcomes,
        ))
    }

    fn expect_phase(&self, expected: SessionPhase) -> Result<(), SessionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidPhase {
                expected,
                actual: self.phase,
            })
        }
    }
}

impl fmt::Debug for SessionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionEngine")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("outcomes_len", &self.outcomes.len())
            .field("revealed", &self.revealed)
            .finish()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
