//! Mastery classification and aggregate progress counts.

use std::fmt;

use crate::model::{ProgressLedger, ProgressRecord};

/// Four-way label derived from accumulated correct/incorrect counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mastery {
    NotSeen,
    Learning,
    Mastered,
    NeedsWork,
}

impl Mastery {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Mastery::NotSeen => "not-seen",
            Mastery::Learning => "learning",
            Mastery::Mastered => "mastered",
            Mastery::NeedsWork => "needs-work",
        }
    }
}

impl fmt::Display for Mastery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum attempts before a rate is judged.
pub const MIN_ATTEMPTS: u64 = 2;

/// Classify a record.
///
/// Rates are compared exactly: `correct / total >= 0.8` is `5 * correct >= 4 * total`
/// and `correct / total < 0.6` is `5 * correct < 3 * total`.
#[must_use]
pub fn classify(record: Option<&ProgressRecord>) -> Mastery {
    let Some(record) = record else {
        return Mastery::NotSeen;
    };

    let correct = u64::from(record.correct_count());
    let total = correct + u64::from(record.incorrect_count());
    if total < MIN_ATTEMPTS {
        return Mastery::Learning;
    }

    if 5 * correct >= 4 * total {
        Mastery::Mastered
    } else if 5 * correct < 3 * total {
        Mastery::NeedsWork
    } else {
        Mastery::Learning
    }
}

/// Aggregate counts over a catalog of `total_questions` dense ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressStats {
    pub seen: usize,
    pub not_seen: usize,
    pub seen_percentage: u32,
    pub mastered: usize,
    pub needs_work: usize,
    pub learning: usize,
}

/// Summarize `ledger` for a catalog with ids `1..=total_questions`.
///
/// Records for ids outside the catalog are ignored, so
/// `not_seen + learning + mastered + needs_work == total_questions` always holds.
#[must_use]
pub fn aggregate(ledger: &ProgressLedger, total_questions: usize) -> ProgressStats {
    let mut stats = ProgressStats::default();

    let in_catalog = ledger.iter().filter(|(id, _)| {
        usize::try_from(id.value()).is_ok_and(|value| value >= 1 && value <= total_questions)
    });
    for (_, record) in in_catalog {
        stats.seen += 1;
        match classify(Some(record)) {
            Mastery::Mastered => stats.mastered += 1,
            Mastery::NeedsWork => stats.needs_work += 1,
            Mastery::Learning | Mastery::NotSeen => stats.learning += 1,
        }
    }

    stats.not_seen = total_questions - stats.seen;
    stats.seen_percentage = rounded_percentage(stats.seen, total_questions);
    stats
}

/// `round(100 * part / whole)` with halves rounding up; 0 when `whole` is 0.
#[must_use]
pub fn rounded_percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let part = part as u128;
    let whole = whole as u128;
    let rounded = (200 * part + whole) / (2 * whole);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}
