//! Read-only question catalog with lookup, navigation and study filters.

use thiserror::Error;

use crate::model::{Category, Question, QuestionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog ids must be dense from 1: expected {expected}, found {found}")]
    NonContiguousIds { expected: u32, found: u32 },

    #[error("catalog is too large")]
    TooLarge,
}

/// Immutable ordered set of questions with ids `1..=len`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Build a catalog from questions ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NonContiguousIds` unless the i-th question has id `i + 1`.
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        for (index, question) in questions.iter().enumerate() {
            let expected = u32::try_from(index + 1).map_err(|_| CatalogError::TooLarge)?;
            let found = question.id().value();
            if found != expected {
                return Err(CatalogError::NonContiguousIds { expected, found });
            }
        }
        Ok(Self { questions })
    }

    /// Look up a question; ids outside the catalog yield `None`.
    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.get(id.index()?)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Number of questions eligible for the 65/20 subset.
    #[must_use]
    pub fn flagged_count(&self) -> usize {
        self.questions.iter().filter(|q| q.is_asterisk()).count()
    }

    /// Categories present in the catalog, in catalog order.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = Vec::new();
        for question in &self.questions {
            if !seen.contains(&question.category()) {
                seen.push(question.category());
            }
        }
        seen
    }

    /// Previous and next ids for step-through navigation. Both are `None`
    /// when `id` is not in the catalog.
    #[must_use]
    pub fn neighbors(&self, id: QuestionId) -> (Option<QuestionId>, Option<QuestionId>) {
        let Some(index) = id.index().filter(|index| *index < self.questions.len()) else {
            return (None, None);
        };
        let prev = index
            .checked_sub(1)
            .and_then(|i| self.questions.get(i))
            .map(Question::id);
        let next = self.questions.get(index + 1).map(Question::id);
        (prev, next)
    }

    #[must_use]
    pub fn filter(&self, filter: &QuestionFilter) -> Vec<&Question> {
        self.questions.iter().filter(|q| filter.matches(q)).collect()
    }
}

/// Study-list filter: category, asterisk-only, and free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    category: Option<Category>,
    asterisk_only: bool,
    search: String,
}

impl QuestionFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn with_asterisk_only(mut self, asterisk_only: bool) -> Self {
        self.asterisk_only = asterisk_only;
        self
    }

    /// Case-insensitive match against the prompt and static answers.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into().trim().to_lowercase();
        self
    }

    #[must_use]
    pub fn matches(&self, question: &Question) -> bool {
        if self.category.is_some_and(|c| c != question.category()) {
            return false;
        }
        if self.asterisk_only && !question.is_asterisk() {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        question.prompt().to_lowercase().contains(&self.search)
            || question
                .answers()
                .iter()
                .any(|answer| answer.to_lowercase().contains(&self.search))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuestionDraft;

    fn build_question(id: u32, category: Category, prompt: &str, answer: &str) -> Question {
        QuestionDraft {
            id,
            prompt: prompt.into(),
            answers: vec![answer.into()],
            category,
            subcategory: "General".into(),
            is_asterisk: id % 2 == 0,
            is_dynamic_answer: false,
            dynamic_field: None,
        }
        .validate()
        .unwrap()
    }

    fn build_catalog() -> QuestionCatalog {
        QuestionCatalog::new(vec![
            build_question(1, Category::AmericanGovernment, "What is the supreme law?", "the Constitution"),
            build_question(2, Category::AmericanGovernment, "Name one branch of government.", "Congress"),
            build_question(3, Category::AmericanHistory, "Who was the first President?", "George Washington"),
            build_question(4, Category::IntegratedCivics, "Name one of the two longest rivers.", "Missouri River"),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_gaps_in_ids() {
        let err = QuestionCatalog::new(vec![
            build_question(1, Category::AmericanHistory, "Q1", "A"),
            build_question(3, Category::AmericanHistory, "Q3", "A"),
        ])
        .unwrap_err();
        assert_eq!(err, CatalogError::NonContiguousIds { expected: 2, found: 3 });
    }

    #[test]
    fn lookup_out_of_range_is_none() {
        let catalog = build_catalog();
        assert_eq!(catalog.get(QuestionId::new(3)).unwrap().id(), QuestionId::new(3));
        assert!(catalog.get(QuestionId::new(0)).is_none());
        assert!(catalog.get(QuestionId::new(5)).is_none());
    }

    #[test]
    fn neighbors_are_bounded() {
        let catalog = build_catalog();
        assert_eq!(catalog.neighbors(QuestionId::new(1)), (None, Some(QuestionId::new(2))));
        assert_eq!(
            catalog.neighbors(QuestionId::new(3)),
            (Some(QuestionId::new(2)), Some(QuestionId::new(4)))
        );
        assert_eq!(catalog.neighbors(QuestionId::new(4)), (Some(QuestionId::new(3)), None));
        assert_eq!(catalog.neighbors(QuestionId::new(9)), (None, None));
    }

    #[test]
    fn filter_combines_category_asterisk_and_search() {
        let catalog = build_catalog();

        let gov = QuestionFilter::new().with_category(Some(Category::AmericanGovernment));
        assert_eq!(catalog.filter(&gov).len(), 2);

        let flagged_gov = gov.clone().with_asterisk_only(true);
        let ids: Vec<_> = catalog.filter(&flagged_gov).iter().map(|q| q.id()).collect();
        assert_eq!(ids, vec![QuestionId::new(2)]);

        let by_answer = QuestionFilter::new().with_search("  WASHINGTON ");
        let ids: Vec<_> = catalog.filter(&by_answer).iter().map(|q| q.id()).collect();
        assert_eq!(ids, vec![QuestionId::new(3)]);

        let nothing = QuestionFilter::new().with_search("zebra");
        assert!(catalog.filter(&nothing).is_empty());
    }

    #[test]
    fn categories_and_flagged_count() {
        let catalog = build_catalog();
        assert_eq!(catalog.categories(), Category::ALL.to_vec());
        assert_eq!(catalog.flagged_count(), 2);
    }
}
