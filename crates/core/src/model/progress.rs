use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressRecordError {
    #[error("seen count ({seen}) does not match correct + incorrect ({sum})")]
    CountMismatch { seen: u32, sum: u64 },
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Subjective difficulty tag set by the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Hard,
}

//
// ─── PROGRESS RECORD ───────────────────────────────────────────────────────────
//

/// Attempt history for a single question.
///
/// `seen_count == correct_count + incorrect_count` holds for every value of
/// this type; counters only move through [`ProgressRecord::record_outcome`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressRecord {
    seen_count: u32,
    correct_count: u32,
    incorrect_count: u32,
    last_seen_at: Option<DateTime<Utc>>,
    difficulty: Option<Difficulty>,
}

impl ProgressRecord {
    /// Rehydrate a record from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `ProgressRecordError::CountMismatch` if the counters disagree.
    pub fn from_persisted(
        seen_count: u32,
        correct_count: u32,
        incorrect_count: u32,
        last_seen_at: Option<DateTime<Utc>>,
        difficulty: Option<Difficulty>,
    ) -> Result<Self, ProgressRecordError> {
        let sum = u64::from(correct_count) + u64::from(incorrect_count);
        if u64::from(seen_count) != sum {
            return Err(ProgressRecordError::CountMismatch {
                seen: seen_count,
                sum,
            });
        }

        Ok(Self {
            seen_count,
            correct_count,
            incorrect_count,
            last_seen_at,
            difficulty,
        })
    }

    /// Count one answer. A record whose `seen_count` is already at
    /// `u32::MAX` is left untouched.
    pub fn record_outcome(&mut self, was_correct: bool, at: DateTime<Utc>) {
        let Some(seen) = self.seen_count.checked_add(1) else {
            return;
        };
        self.seen_count = seen;
        if was_correct {
            self.correct_count += 1;
        } else {
            self.incorrect_count += 1;
        }
        self.last_seen_at = Some(at);
    }

    pub fn set_difficulty(&mut self, difficulty: Option<Difficulty>) {
        self.difficulty = difficulty;
    }

    #[must_use]
    pub fn seen_count(&self) -> u32 {
        self.seen_count
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn incorrect_count(&self) -> u32 {
        self.incorrect_count
    }

    /// `None` for a record created only by a difficulty tag.
    #[must_use]
    pub fn last_seen_at(&self) -> Option<DateTime<Utc>> {
        self.last_seen_at
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }
}

//
// ─── LEDGER ────────────────────────────────────────────────────────────────────
//

/// Per-question progress keyed by id. Records are created lazily.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressLedger {
    records: BTreeMap<QuestionId, ProgressRecord>,
}

impl ProgressLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one answer and return the updated record.
    pub fn record_answer(
        &mut self,
        id: QuestionId,
        was_correct: bool,
        at: DateTime<Utc>,
    ) -> ProgressRecord {
        let record = self.records.entry(id).or_default();
        record.record_outcome(was_correct, at);
        *record
    }

    /// Set or clear the difficulty tag, creating a zeroed record if needed.
    pub fn set_difficulty(&mut self, id: QuestionId, difficulty: Option<Difficulty>) {
        self.records
            .entry(id)
            .or_default()
            .set_difficulty(difficulty);
    }

    /// Insert a record loaded from storage, replacing any existing entry.
    pub fn insert_persisted(&mut self, id: QuestionId, record: ProgressRecord) {
        self.records.insert(id, record);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<&ProgressRecord> {
        self.records.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &ProgressRecord)> {
        self.records.iter().map(|(id, record)| (*id, record))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
