mod app_settings;
mod dynamic_answers;
mod ids;
mod progress;
mod question;

pub use app_settings::AppSettings;
pub use dynamic_answers::{DynamicAnswers, DynamicField};
pub use ids::{ParseIdError, QuestionId};
pub use progress::{Difficulty, ProgressLedger, ProgressRecord, ProgressRecordError};
pub use question::{Category, Question, QuestionDraft, QuestionError};
