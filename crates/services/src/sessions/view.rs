use civics_core::model::QuestionId;
use civics_core::stats::rounded_percentage;

use super::config::SessionMode;
use super::engine::SessionOutcome;

/// Final tally of a finished session.
///
/// Presentation-agnostic: counts and ids only, no pre-formatted strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResults {
    pub mode: SessionMode,
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// `round(100 * correct / total)`, halves up.
    pub percentage: u32,
    pub passing_score: Option<usize>,
    /// `Some` in exam mode only.
    pub passed: Option<bool>,
    /// Questions answered incorrectly, in the order they were asked.
    pub missed: Vec<QuestionId>,
}

impl SessionResults {
    pub(crate) fn from_outcomes(
        mode: SessionMode,
        passing_score: Option<usize>,
        outcomes: &[SessionOutcome],
    ) -> Self {
        let total = outcomes.len();
        let correct = outcomes.iter().filter(|o| o.was_correct).count();
        let missed = outcomes
            .iter()
            .filter(|o| !o.was_correct)
            .map(|o| o.question_id)
            .collect();

        Self {
            mode,
            total,
            correct,
            incorrect: total - correct,
            percentage: rounded_percentage(correct, total),
            passing_score,
            passed: passing_score.map(|score| correct >= score),
            missed,
        }
    }
}
