//! Loading the read-only question catalog from its JSON source.

use std::path::Path;

use civics_core::model::{Category, DynamicField, QuestionDraft};
use civics_core::{Error as CoreError, QuestionCatalog};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogLoadError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] CoreError),
}

/// Authored shape of one catalog entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionRecord {
    id: u32,
    question: String,
    answers: Vec<String>,
    category: Category,
    #[serde(default)]
    subcategory: String,
    #[serde(default)]
    is_asterisk: bool,
    #[serde(default)]
    is_dynamic_answer: bool,
    #[serde(default)]
    dynamic_field: Option<DynamicField>,
}

impl QuestionRecord {
    fn into_draft(self) -> QuestionDraft {
        QuestionDraft {
            id: self.id,
            prompt: self.question,
            answers: self.answers,
            category: self.category,
            subcategory: self.subcategory,
            is_asterisk: self.is_asterisk,
            is_dynamic_answer: self.is_dynamic_answer,
            dynamic_field: self.dynamic_field,
        }
    }
}

/// Parse a JSON array of question records into a validated catalog.
///
/// # Errors
///
/// Returns `CatalogLoadError` for malformed JSON, invalid questions, or ids
/// that are not dense from 1.
pub fn load_catalog_json(raw: &str) -> Result<QuestionCatalog, CatalogLoadError> {
    let records: Vec<QuestionRecord> = serde_json::from_str(raw)?;
    let questions = records
        .into_iter()
        .map(|record| record.into_draft().validate().map_err(CoreError::from))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(QuestionCatalog::new(questions).map_err(CoreError::from)?)
}

/// Read and parse a catalog file.
///
/// # Errors
///
/// Returns `CatalogLoadError` if the file cannot be read or parsed.
pub fn load_catalog_file(path: &Path) -> Result<QuestionCatalog, CatalogLoadError> {
    let raw = std::fs::read_to_string(path)?;
    load_catalog_json(&raw)
}
