use std::sync::Arc;

use civics_core::model::{Difficulty, ProgressLedger, ProgressRecord, QuestionId};
use civics_core::stats::{self, Mastery, ProgressStats};
use storage::repository::ProgressRepository;
use tracing::{debug, warn};

use crate::Clock;

/// Durable per-question attempt ledger.
///
/// Loaded once on construction; every mutation is written through to the
/// repository immediately. Load failures fall back to an empty ledger and
/// write failures are logged, never surfaced: the in-memory ledger is always
/// the source of truth for the running app.
pub struct ProgressStore {
    ledger: ProgressLedger,
    repo: Arc<dyn ProgressRepository>,
    clock: Clock,
}

impl ProgressStore {
    #[must_use]
    pub fn load(repo: Arc<dyn ProgressRepository>, clock: Clock) -> Self {
        let ledger = match repo.load_progress() {
            Ok(Some(ledger)) => ledger,
            Ok(None) => ProgressLedger::new(),
            Err(err) => {
                warn!(error = %err, "progress could not be loaded; starting empty");
                ProgressLedger::new()
            }
        };
        debug!(records = ledger.len(), "progress loaded");
        Self {
            ledger,
            repo,
            clock,
        }
    }

    /// Count one answer for `id` and persist. Answers cannot be undone.
    pub fn record_answer(&mut self, id: QuestionId, was_correct: bool) -> ProgressRecord {
        let record = self
            .ledger
            .record_answer(id, was_correct, self.clock.now());
        self.persist();
        record
    }

    /// Set or clear the learner's difficulty tag; counters are untouched.
    pub fn mark_difficulty(&mut self, id: QuestionId, difficulty: Option<Difficulty>) {
        self.ledger.set_difficulty(id, difficulty);
        self.persist();
    }

    /// Apply `difficulty`, or clear it if already set to the same tag.
    pub fn toggle_difficulty(&mut self, id: QuestionId, difficulty: Difficulty) -> Option<Difficulty> {
        let current = self.get(id).and_then(ProgressRecord::difficulty);
        let next = if current == Some(difficulty) {
            None
        } else {
            Some(difficulty)
        };
        self.mark_difficulty(id, next);
        next
    }

    /// Forget all progress. Irreversible.
    pub fn reset(&mut self) {
        self.ledger.clear();
        self.persist();
    }

    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<&ProgressRecord> {
        self.ledger.get(id)
    }

    #[must_use]
    pub fn ledger(&self) -> &ProgressLedger {
        &self.ledger
    }

    #[must_use]
    pub fn status(&self, id: QuestionId) -> Mastery {
        stats::classify(self.get(id))
    }

    #[must_use]
    pub fn stats(&self, total_questions: usize) -> ProgressStats {
        stats::aggregate(&self.ledger, total_questions)
    }

    fn persist(&self) {
        match self.repo.save_progress(&self.ledger) {
            Ok(()) => debug!(records = self.ledger.len(), "progress persisted"),
            Err(err) => warn!(error = %err, "failed to persist progress; keeping in-memory state"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civics_core::time::{fixed_clock, fixed_now};
    use storage::repository::{BlobKey, BlobStore, InMemoryRepository, StorageError};

    /// Reads succeed, every write fails.
    struct ReadOnlyRepository(InMemoryRepository);

    impl BlobStore for ReadOnlyRepository {
        fn read_blob(&self, key: BlobKey) -> Result<Option<String>, StorageError> {
            self.0.read_blob(key)
        }

        fn write_blob(&self, _key: BlobKey, _data: &str) -> Result<(), StorageError> {
            Err(StorageError::Connection("disk full".into()))
        }
    }

    fn store_with(repo: &InMemoryRepository) -> ProgressStore {
        ProgressStore::load(Arc::new(repo.clone()), fixed_clock())
    }

    #[test]
    fn record_answer_keeps_counts_consistent_and_persists() {
        let repo = InMemoryRepository::new();
        let mut store = store_with(&repo);
        let id = QuestionId::new(3);

        store.record_answer(id, true);
        let record = store.record_answer(id, false);

        assert_eq!(record.seen_count(), 2);
        assert_eq!(record.seen_count(), record.correct_count() + record.incorrect_count());
        assert_eq!(record.last_seen_at(), Some(fixed_now()));

        let reloaded = store_with(&repo);
        assert_eq!(reloaded.get(id), Some(&record));
    }

    #[test]
    fn missing_or_corrupt_data_loads_empty() {
        let repo = InMemoryRepository::new();
        assert!(store_with(&repo).ledger().is_empty());

        repo.put_raw(BlobKey::Progress, "not json at all").unwrap();
        assert!(store_with(&repo).ledger().is_empty());
    }

    #[test]
    fn mark_difficulty_without_prior_answer() {
        let repo = InMemoryRepository::new();
        let mut store = store_with(&repo);
        let id = QuestionId::new(10);

        store.mark_difficulty(id, Some(Difficulty::Hard));

        let record = store.get(id).unwrap();
        assert_eq!(record.difficulty(), Some(Difficulty::Hard));
        assert_eq!(record.seen_count(), 0);
        assert_eq!(store.status(id), Mastery::Learning);
    }

    #[test]
    fn toggle_clears_same_tag_and_switches_other() {
        let mut store = store_with(&InMemoryRepository::new());
        let id = QuestionId::new(1);

        assert_eq!(store.toggle_difficulty(id, Difficulty::Easy), Some(Difficulty::Easy));
        assert_eq!(store.toggle_difficulty(id, Difficulty::Hard), Some(Difficulty::Hard));
        assert_eq!(store.toggle_difficulty(id, Difficulty::Hard), None);
        assert_eq!(store.get(id).unwrap().difficulty(), None);
    }

    #[test]
    fn reset_clears_memory_and_storage() {
        let repo = InMemoryRepository::new();
        let mut store = store_with(&repo);
        store.record_answer(QuestionId::new(1), true);
        store.mark_difficulty(QuestionId::new(2), Some(Difficulty::Easy));

        store.reset();

        assert!(store.ledger().is_empty());
        assert!(store_with(&repo).ledger().is_empty());
    }

    #[test]
    fn write_failures_do_not_corrupt_memory() {
        let mut store = ProgressStore::load(
            Arc::new(ReadOnlyRepository(InMemoryRepository::new())),
            fixed_clock(),
        );
        let id = QuestionId::new(8);

        store.record_answer(id, true);
        store.record_answer(id, true);
        store.mark_difficulty(id, Some(Difficulty::Easy));

        let record = store.get(id).unwrap();
        assert_eq!(record.seen_count(), 2);
        assert_eq!(record.correct_count(), 2);
        assert_eq!(record.difficulty(), Some(Difficulty::Easy));

        store.reset();
        assert!(store.ledger().is_empty());
    }

    #[test]
    fn stats_cover_whole_catalog() {
        let mut store = store_with(&InMemoryRepository::new());
        for _ in 0..4 {
            store.record_answer(QuestionId::new(1), true);
        }
        store.record_answer(QuestionId::new(2), false);
        store.record_answer(QuestionId::new(2), false);

        let stats = store.stats(10);
        assert_eq!(stats.seen, 2);
        assert_eq!(stats.mastered, 1);
        assert_eq!(stats.needs_work, 1);
        assert_eq!(stats.not_seen, 8);
        assert_eq!(stats.seen_percentage, 20);
    }
}
