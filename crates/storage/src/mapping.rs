//! JSON shapes of the persisted blobs and their conversion to domain types.
//!
//! Decoding is strict about counters (a record whose counts disagree is
//! corrupt) and lenient about settings (unknown dynamic keys are ignored and
//! missing ones take their defaults).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use civics_core::model::{
    AppSettings, Difficulty, DynamicAnswers, DynamicField, ProgressLedger, ProgressRecord,
    QuestionId,
};
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedSettings {
    #[serde(default)]
    flagged_only: bool,
    #[serde(default)]
    dynamic_answers: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedRecord {
    seen_count: u32,
    correct_count: u32,
    incorrect_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_seen_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    difficulty: Option<Difficulty>,
}

/// Serialize settings to the `settings` blob.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_settings(settings: &AppSettings) -> Result<String, StorageError> {
    let persisted = PersistedSettings {
        flagged_only: settings.flagged_only(),
        dynamic_answers: settings
            .dynamic_answers()
            .iter()
            .map(|(field, value)| (field.key().to_string(), value.to_string()))
            .collect(),
    };
    serde_json::to_string(&persisted).map_err(ser)
}

/// Parse the `settings` blob, filling missing dynamic fields with defaults.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the blob is not valid settings JSON.
pub fn decode_settings(raw: &str) -> Result<AppSettings, StorageError> {
    let persisted: PersistedSettings = serde_json::from_str(raw).map_err(ser)?;
    let overrides = persisted
        .dynamic_answers
        .into_iter()
        .filter_map(|(key, value)| DynamicField::from_key(&key).map(|field| (field, value)));
    Ok(AppSettings::new(
        persisted.flagged_only,
        DynamicAnswers::from_partial(overrides),
    ))
}

/// Serialize the ledger to the `progress` blob, keyed by question id.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_progress(ledger: &ProgressLedger) -> Result<String, StorageError> {
    let persisted: BTreeMap<String, PersistedRecord> = ledger
        .iter()
        .map(|(id, record)| {
            (
                id.to_string(),
                PersistedRecord {
                    seen_count: record.seen_count(),
                    correct_count: record.correct_count(),
                    incorrect_count: record.incorrect_count(),
                    last_seen_at: record.last_seen_at().map(|at| at.to_rfc3339()),
                    difficulty: record.difficulty(),
                },
            )
        })
        .collect();
    serde_json::to_string(&persisted).map_err(ser)
}

/// Parse the `progress` blob.
///
/// An empty `lastSeenAt` string is read as "never answered".
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON, ids, timestamps,
/// or records whose counters disagree.
pub fn decode_progress(raw: &str) -> Result<ProgressLedger, StorageError> {
    let persisted: BTreeMap<String, PersistedRecord> = serde_json::from_str(raw).map_err(ser)?;
    let mut ledger = ProgressLedger::new();
    for (key, record) in persisted {
        let id: QuestionId = key.parse().map_err(ser)?;
        let last_seen_at = record
            .last_seen_at
            .as_deref()
            .filter(|value| !value.is_empty())
            .map(parse_timestamp)
            .transpose()?;
        let record = ProgressRecord::from_persisted(
            record.seen_count,
            record.correct_count,
            record.incorrect_count,
            last_seen_at,
            record.difficulty,
        )
        .map_err(ser)?;
        ledger.insert_persisted(id, record);
    }
    Ok(ledger)
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(ser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use civics_core::time::fixed_now;

    #[test]
    fn progress_blob_uses_camel_case_keys() {
        let mut ledger = ProgressLedger::new();
        ledger.record_answer(QuestionId::new(12), false, fixed_now());
        let raw = encode_progress(&ledger).unwrap();
        assert!(raw.contains("\"12\""));
        assert!(raw.contains("\"seenCount\":1"));
        assert!(raw.contains("\"incorrectCount\":1"));
        assert!(raw.contains("\"lastSeenAt\":\"2023-11-14T22:13:20+00:00\""));
    }

    #[test]
    fn decodes_legacy_records_with_empty_timestamp() {
        let raw = r#"{"5":{"seenCount":0,"correctCount":0,"incorrectCount":0,"lastSeenAt":"","difficulty":"easy"}}"#;
        let ledger = decode_progress(raw).unwrap();
        let record = ledger.get(QuestionId::new(5)).unwrap();
        assert_eq!(record.last_seen_at(), None);
        assert_eq!(record.difficulty(), Some(Difficulty::Easy));
    }

    #[test]
    fn inconsistent_counts_are_corrupt() {
        let raw = r#"{"1":{"seenCount":3,"correctCount":1,"incorrectCount":1}}"#;
        assert!(matches!(
            decode_progress(raw),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn bad_ids_and_timestamps_are_corrupt() {
        let zero = r#"{"0":{"seenCount":0,"correctCount":0,"incorrectCount":0}}"#;
        assert!(decode_progress(zero).is_err());
        let bad_time = r#"{"1":{"seenCount":1,"correctCount":1,"incorrectCount":0,"lastSeenAt":"yesterday"}}"#;
        assert!(decode_progress(bad_time).is_err());
    }

    #[test]
    fn partial_settings_take_defaults() {
        let raw = r#"{"flaggedOnly":true,"dynamicAnswers":{"governor":"Jane Doe","mayor":"ignored"}}"#;
        let settings = decode_settings(raw).unwrap();
        assert!(settings.flagged_only());
        assert_eq!(settings.dynamic_answers().get(DynamicField::Governor), "Jane Doe");
        assert_eq!(
            settings.dynamic_answers().get(DynamicField::President),
            "Donald Trump"
        );

        let empty = decode_settings("{}").unwrap();
        assert_eq!(empty, AppSettings::default());
    }
}
