use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::dynamic_answers::DynamicField;
use crate::model::ids::QuestionId;

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

/// Top-level grouping of the civics catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "American Government")]
    AmericanGovernment,
    #[serde(rename = "American History")]
    AmericanHistory,
    #[serde(rename = "Integrated Civics")]
    IntegratedCivics,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::AmericanGovernment,
        Category::AmericanHistory,
        Category::IntegratedCivics,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::AmericanGovernment => "American Government",
            Category::AmericanHistory => "American History",
            Category::IntegratedCivics => "Integrated Civics",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id must be > 0")]
    InvalidId,

    #[error("question {id} has an empty prompt")]
    EmptyPrompt { id: u32 },

    #[error("question {id} has no static answers")]
    NoAnswers { id: u32 },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Unvalidated question data, as authored in a catalog source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub id: u32,
    pub prompt: String,
    pub answers: Vec<String>,
    pub category: Category,
    pub subcategory: String,
    pub is_asterisk: bool,
    pub is_dynamic_answer: bool,
    pub dynamic_field: Option<DynamicField>,
}

impl QuestionDraft {
    /// Validate the draft into an immutable `Question`.
    ///
    /// Blank answers are dropped; the remaining order is preserved.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the id is zero, the prompt is blank, or
    /// every static answer is blank. Answers are kept exactly as authored.
    pub fn validate(self) -> Result<Question, QuestionError> {
        if self.id == 0 {
            return Err(QuestionError::InvalidId);
        }

        let prompt = self.prompt.trim().to_string();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt { id: self.id });
        }

        if self.answers.iter().all(|answer| answer.trim().is_empty()) {
            return Err(QuestionError::NoAnswers { id: self.id });
        }

        Ok(Question {
            id: QuestionId::new(self.id),
            prompt,
            answers: self.answers,
            category: self.category,
            subcategory: self.subcategory.trim().to_string(),
            is_asterisk: self.is_asterisk,
            is_dynamic_answer: self.is_dynamic_answer,
            dynamic_field: self.dynamic_field,
        })
    }
}

/// A single catalog question. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    answers: Vec<String>,
    category: Category,
    subcategory: String,
    is_asterisk: bool,
    is_dynamic_answer: bool,
    dynamic_field: Option<DynamicField>,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Static answers as authored in the catalog.
    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn subcategory(&self) -> &str {
        &self.subcategory
    }

    /// Eligible for the reduced-question (65/20) exemption mode.
    #[must_use]
    pub fn is_asterisk(&self) -> bool {
        self.is_asterisk
    }

    /// The correct answer depends on current office holders.
    #[must_use]
    pub fn is_dynamic_answer(&self) -> bool {
        self.is_dynamic_answer
    }

    #[must_use]
    pub fn dynamic_field(&self) -> Option<DynamicField> {
        self.dynamic_field
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
