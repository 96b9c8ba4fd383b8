use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog-wide identifier of a civics question.
///
/// Ids are dense and start at 1; zero is never a valid id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(u32);

impl QuestionId {
    /// Creates a new `QuestionId`
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Zero-based position of this id inside a dense catalog.
    #[must_use]
    pub(crate) fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()?.checked_sub(1)
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing a `QuestionId` from text (route params, persisted keys).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    raw: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse QuestionId from {:?}", self.raw)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for QuestionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .filter(|value| *value > 0)
            .map(QuestionId::new)
            .ok_or_else(|| ParseIdError { raw: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_bare_number() {
        assert_eq!(QuestionId::new(42).to_string(), "42");
    }

    #[test]
    fn parses_positive_ids() {
        let id: QuestionId = " 17 ".parse().unwrap();
        assert_eq!(id, QuestionId::new(17));
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert!("0".parse::<QuestionId>().is_err());
        assert!("-3".parse::<QuestionId>().is_err());
        assert!("abc".parse::<QuestionId>().is_err());
    }

    #[test]
    fn index_is_zero_based() {
        assert_eq!(QuestionId::new(1).index(), Some(0));
        assert_eq!(QuestionId::new(0).index(), None);
    }
}
