use std::fmt;

use crate::{AnswerLetter, QuestionSlot};

/// The name of one field in a stored survey document, e.g. `"answer2anext"`.
///
/// Stored surveys are flat maps; this type is the only place where the
/// concatenated key names are spelled out.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldKey {
    key: String,
}

impl FieldKey {
    pub const SURVEY_NAME: &'static str = "surveyname";
    pub const LANGUAGE: &'static str = "language";
    pub const SURVEY_TYPE: &'static str = "surveytype";
    pub const RESPONSE_TYPE: &'static str = "responsetype";
    pub const CUSTOM_CSS: &'static str = "custom_css";
    pub const ARCHIVED: &'static str = "archived";

    /// Create a key from a raw field name.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// `question{n}`
    pub fn question(slot: QuestionSlot) -> Self {
        Self::new(format!("question{slot}"))
    }

    /// `question{n}type`
    pub fn question_type(slot: QuestionSlot) -> Self {
        Self::new(format!("question{slot}type"))
    }

    /// `question{n}order`
    pub fn question_order(slot: QuestionSlot) -> Self {
        Self::new(format!("question{slot}order"))
    }

    /// `answer{n}{letter}`
    pub fn answer(slot: QuestionSlot, letter: AnswerLetter) -> Self {
        Self::new(format!("answer{slot}{}", letter.lower()))
    }

    /// `answer{n}{letter}next`
    pub fn answer_next(slot: QuestionSlot, letter: AnswerLetter) -> Self {
        Self::new(format!("answer{slot}{}next", letter.lower()))
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}

impl From<&str> for FieldKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FieldKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for FieldKey {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(n: u8) -> QuestionSlot {
        QuestionSlot::new(n).unwrap()
    }

    #[test]
    fn question_keys() {
        assert_eq!(FieldKey::question(slot(2)).as_str(), "question2");
        assert_eq!(FieldKey::question_type(slot(3)).as_str(), "question3type");
        assert_eq!(FieldKey::question_order(slot(5)).as_str(), "question5order");
    }

    #[test]
    fn answer_keys() {
        assert_eq!(
            FieldKey::answer(slot(2), AnswerLetter::A).as_str(),
            "answer2a"
        );
        assert_eq!(
            FieldKey::answer_next(slot(4), AnswerLetter::D).as_str(),
            "answer4dnext"
        );
    }
}
