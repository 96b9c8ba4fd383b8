/// Question counts offered for practice runs.
pub const PRACTICE_QUESTION_COUNTS: [usize; 4] = [5, 10, 15, 20];
pub const DEFAULT_PRACTICE_COUNT: usize = 10;

/// The exam mirrors the interview: up to 10 questions, 6 correct to pass.
pub const EXAM_QUESTION_COUNT: usize = 10;
pub const EXAM_PASSING_SCORE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionMode {
    /// No pass/fail verdict.
    Practice,
    /// Pass/fail against [`EXAM_PASSING_SCORE`].
    Exam,
}

/// Parameters fixed while a session is in Setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    mode: SessionMode,
    question_count: usize,
    restrict_to_flagged: bool,
}

impl SessionConfig {
    #[must_use]
    pub fn practice(question_count: usize, restrict_to_flagged: bool) -> Self {
        Self {
            mode: SessionMode::Practice,
            question_count,
            restrict_to_flagged,
        }
    }

    #[must_use]
    pub fn exam(restrict_to_flagged: bool) -> Self {
        Self {
            mode: SessionMode::Exam,
            question_count: EXAM_QUESTION_COUNT,
            restrict_to_flagged,
        }
    }

    #[must_use]
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    #[must_use]
    pub fn restrict_to_flagged(&self) -> bool {
        self.restrict_to_flagged
    }

    /// Correct answers needed to pass; `None` in practice mode.
    #[must_use]
    pub fn passing_score(&self) -> Option<usize> {
        match self.mode {
            SessionMode::Practice => None,
            SessionMode::Exam => Some(EXAM_PASSING_SCORE),
        }
    }

    #[must_use]
    pub fn with_question_count(mut self, question_count: usize) -> Self {
        self.question_count = question_count;
        self
    }

    #[must_use]
    pub fn with_restrict_to_flagged(mut self, restrict_to_flagged: bool) -> Self {
        self.restrict_to_flagged = restrict_to_flagged;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::practice(DEFAULT_PRACTICE_COUNT, false)
    }
}
