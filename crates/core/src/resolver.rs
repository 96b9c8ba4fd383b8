//! Display-time substitution of answers that change with office holders.

use crate::model::{DynamicAnswers, Question};

/// Answers to show for `question` given the learner's current values.
///
/// A non-empty dynamic value replaces the static list entirely and is shown
/// exactly as entered; an empty or missing one falls back to the catalog
/// answers.
#[must_use]
pub fn resolve(question: &Question, dynamic_answers: &DynamicAnswers) -> Vec<String> {
    if !question.is_dynamic_answer() {
        return question.answers().to_vec();
    }
    let Some(field) = question.dynamic_field() else {
        return question.answers().to_vec();
    };

    let value = dynamic_answers.get(field);
    if value.is_empty() {
        question.answers().to_vec()
    } else {
        vec![value.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, DynamicField, QuestionDraft};

    fn build_question(is_dynamic_answer: bool, dynamic_field: Option<DynamicField>) -> Question {
        QuestionDraft {
            id: 28,
            prompt: "What is the name of the President of the United States now?".into(),
            answers: vec!["Visit uscis.gov for the current President".into()],
            category: Category::AmericanGovernment,
            subcategory: "System of Government".into(),
            is_asterisk: true,
            is_dynamic_answer,
            dynamic_field,
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn dynamic_value_replaces_static_answers() {
        let question = build_question(true, Some(DynamicField::President));
        let answers =
            DynamicAnswers::from_partial([(DynamicField::President, "Jane Doe".to_string())]);
        assert_eq!(resolve(&question, &answers), vec!["Jane Doe".to_string()]);
    }

    #[test]
    fn empty_value_falls_back_to_static_answers() {
        let question = build_question(true, Some(DynamicField::President));
        let answers = DynamicAnswers::from_partial([(DynamicField::President, String::new())]);
        assert_eq!(resolve(&question, &answers), question.answers().to_vec());
    }

    #[test]
    fn whitespace_value_is_shown_verbatim() {
        let question = build_question(true, Some(DynamicField::President));
        let answers = DynamicAnswers::from_partial([(DynamicField::President, "   ".to_string())]);
        assert_eq!(resolve(&question, &answers), vec!["   ".to_string()]);
    }

    #[test]
    fn static_questions_ignore_dynamic_values() {
        let answers = DynamicAnswers::default();

        let not_dynamic = build_question(false, Some(DynamicField::President));
        assert_eq!(resolve(&not_dynamic, &answers), not_dynamic.answers().to_vec());

        let no_field = build_question(true, None);
        assert_eq!(resolve(&no_field, &answers), no_field.answers().to_vec());
    }
}
