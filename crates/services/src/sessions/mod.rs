mod config;
mod engine;
mod progress;
mod view;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use config::{
    DEFAULT_PRACTICE_COUNT, EXAM_PASSING_SCORE, EXAM_QUESTION_COUNT, PRACTICE_QUESTION_COUNTS,
    SessionConfig, SessionMode,
};
pub use engine::{SessionEngine, SessionOutcome, SessionPhase};
pub use progress::SessionProgress;
pub use view::SessionResults;
