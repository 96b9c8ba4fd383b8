use crate::model::dynamic_answers::{DynamicAnswers, DynamicField};

/// Learner-editable settings persisted alongside progress.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppSettings {
    flagged_only: bool,
    dynamic_answers: DynamicAnswers,
}

impl AppSettings {
    #[must_use]
    pub fn new(flagged_only: bool, dynamic_answers: DynamicAnswers) -> Self {
        Self {
            flagged_only,
            dynamic_answers,
        }
    }

    /// Sessions draw only from asterisk (65/20) questions.
    #[must_use]
    pub fn flagged_only(&self) -> bool {
        self.flagged_only
    }

    #[must_use]
    pub fn dynamic_answers(&self) -> &DynamicAnswers {
        &self.dynamic_answers
    }

    pub fn set_flagged_only(&mut self, flagged_only: bool) {
        self.flagged_only = flagged_only;
    }

    pub fn set_dynamic_answer(&mut self, field: DynamicField, value: impl Into<String>) {
        self.dynamic_answers.set(field, value);
    }

    pub fn update_dynamic_answers(
        &mut self,
        values: impl IntoIterator<Item = (DynamicField, String)>,
    ) {
        self.dynamic_answers.update(values);
    }

    pub fn reset_dynamic_answers(&mut self) {
        self.dynamic_answers = DynamicAnswers::default();
    }
}
