use std::fmt;

use crate::question::is_miscased_end;
use crate::{AnswerLetter, FieldKey, QuestionSlot, Survey, SurveyFields};

const REQUIRED_MESSAGE: &str = "This field is required.";
const MISCASED_END_MESSAGE: &str = "Syntax for end of survey is 'end' in lowercase, please fix.";

/// A field-level problem found while checking a survey submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The form field the message belongs to.
    pub field: FieldKey,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: FieldKey, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All problems found in one submission. Never empty when returned as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("survey failed validation with {} error(s)", .0.len())]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Errors attached to one field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.0.iter().filter(move |error| error.field.as_str() == field)
    }

    pub fn into_inner(self) -> Vec<ValidationError> {
        self.0
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Check a stored document the way the survey form checks a submission.
///
/// An empty result means the survey may be saved.
pub fn validate(fields: &SurveyFields) -> Vec<ValidationError> {
    validate_survey(&Survey::from_fields(fields)).into_inner()
}

/// A missing required field stops further checks on that field.
pub(crate) fn validate_survey(survey: &Survey) -> ValidationErrors {
    let mut errors = required_fields(survey);
    let slot_errors: Vec<ValidationError> = QuestionSlot::ALL
        .into_iter()
        .filter_map(|slot| validate_slot(survey, slot))
        .filter(|error| errors.iter().all(|required| required.field != error.field))
        .collect();
    errors.extend(slot_errors);
    ValidationErrors::new(errors)
}

/// Validate one question slot, returning the first problem found.
///
/// Every answer in the survey that branches to `target` requires `target` to
/// be complete (see [`crate::Question::is_incomplete`]). The slot's own next
/// pointers must spell the terminal marker in lowercase.
pub fn validate_slot(survey: &Survey, target: QuestionSlot) -> Option<ValidationError> {
    let field = FieldKey::question(target);
    let target_incomplete = survey.question(target).is_incomplete();

    for (source, question) in survey.questions() {
        for (letter, answer) in question.answers() {
            if answer.target().slot() == Some(target) && target_incomplete {
                return Some(ValidationError::new(
                    field,
                    format!(
                        "Answer {letter} from question {source} linked to this question, please fill in this section."
                    ),
                ));
            }

            if source == target && is_miscased_end(&answer.next) {
                return Some(ValidationError::new(field, MISCASED_END_MESSAGE));
            }
        }
    }

    None
}

fn required_fields(survey: &Survey) -> Vec<ValidationError> {
    let entry = survey.question(QuestionSlot::ENTRY);
    let a = entry.answer(AnswerLetter::A);
    let b = entry.answer(AnswerLetter::B);
    let slot = QuestionSlot::ENTRY;

    [
        (FieldKey::new(FieldKey::SURVEY_NAME), survey.name.as_str()),
        (FieldKey::question(slot), entry.text.as_str()),
        (FieldKey::answer(slot, AnswerLetter::A), a.text.as_str()),
        (FieldKey::answer(slot, AnswerLetter::B), b.text.as_str()),
        (FieldKey::answer_next(slot, AnswerLetter::A), a.next.as_str()),
        (FieldKey::answer_next(slot, AnswerLetter::B), b.next.as_str()),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| ValidationError::new(field, REQUIRED_MESSAGE))
    .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Answer, Question};

    fn slot(n: u8) -> QuestionSlot {
        QuestionSlot::new(n).unwrap()
    }

    fn complete(text: &str, a_next: &str, b_next: &str) -> Question {
        Question::new(text)
            .with_answer(AnswerLetter::A, Answer::new("Yes", a_next))
            .with_answer(AnswerLetter::B, Answer::new("No", b_next))
    }

    #[test]
    fn valid_survey_passes() {
        let survey = Survey::new("s")
            .with_question(slot(1), complete("q1", "2", "end"))
            .with_question(slot(2), complete("q2", "end", "end"));
        assert!(survey.validate().is_ok());
    }

    #[test]
    fn end_never_references_a_slot() {
        let survey = Survey::new("s").with_question(slot(1), complete("q1", "end", "end"));
        for target in QuestionSlot::ALL {
            assert_eq!(validate_slot(&survey, target), None);
        }
    }

    #[test]
    fn link_to_empty_slot_names_source_and_letter() {
        let survey = Survey::new("s").with_question(slot(1), complete("q1", "end", "3"));
        let error = validate_slot(&survey, slot(3)).unwrap();

        assert_eq!(error.field.as_str(), "question3");
        assert_eq!(
            error.message,
            "Answer B from question 1 linked to this question, please fill in this section."
        );
    }

    #[test]
    fn link_to_partially_filled_slot_fails() {
        let partial = Question::new("q2")
            .with_answer(AnswerLetter::A, Answer::new("Yes", "end"))
            .with_answer(AnswerLetter::B, Answer::new("No", ""));
        let survey = Survey::new("s")
            .with_question(slot(1), complete("q1", "2", "end"))
            .with_question(slot(2), partial);

        let errors = survey.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.for_field("question2").count(), 1);
    }

    #[test]
    fn miscased_end_is_rejected_on_its_own_slot() {
        let survey = Survey::new("s").with_question(slot(1), complete("q1", "End", "end"));

        let error = validate_slot(&survey, slot(1)).unwrap();
        assert_eq!(error.message, MISCASED_END_MESSAGE);
        assert_eq!(validate_slot(&survey, slot(2)), None);
    }

    #[test]
    fn required_fields_are_reported() {
        let errors = validate(&SurveyFields::new());
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();

        assert_eq!(
            fields,
            vec![
                "surveyname",
                "question1",
                "answer1a",
                "answer1b",
                "answer1anext",
                "answer1bnext"
            ]
        );
        assert!(errors.iter().all(|e| e.message == REQUIRED_MESSAGE));
    }

    #[test]
    fn empty_entry_question_is_only_reported_as_required() {
        let entry = Question::new("").with_answer(AnswerLetter::A, Answer::ending("a"));
        let survey = Survey::new("s")
            .with_question(slot(1), entry)
            .with_question(slot(2), complete("q2", "1", "end"));

        let errors = survey.validate().unwrap_err();
        let messages: Vec<&str> = errors
            .for_field("question1")
            .map(|error| error.message.as_str())
            .collect();
        assert_eq!(messages, vec![REQUIRED_MESSAGE]);
    }

    #[test]
    fn validates_flat_documents() {
        let fields = SurveyFields::new()
            .with("surveyname", "s")
            .with("question1", "q1")
            .with("answer1a", "Yes")
            .with("answer1anext", "2")
            .with("answer1b", "No")
            .with("answer1bnext", "end");

        let errors = validate(&fields);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "Answer A from question 1 linked to this question, please fill in this section."
        );
    }
}
