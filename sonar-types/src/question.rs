use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SurveyError;

/// The terminal sentinel: an answer pointing here ends the survey.
pub const END_MARKER: &str = "end";

/// One of the five fixed question positions, numbered 1 to 5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionSlot(u8);

impl QuestionSlot {
    /// Number of question slots in every survey.
    pub const COUNT: usize = 5;

    /// Every survey starts at question 1.
    pub const ENTRY: QuestionSlot = QuestionSlot(1);

    /// All slots in display order.
    pub const ALL: [QuestionSlot; 5] = [
        QuestionSlot(1),
        QuestionSlot(2),
        QuestionSlot(3),
        QuestionSlot(4),
        QuestionSlot(5),
    ];

    /// Create a slot from its 1-based number.
    pub fn new(number: u8) -> Result<Self, SurveyError> {
        if (1..=Self::COUNT as u8).contains(&number) {
            Ok(Self(number))
        } else {
            Err(SurveyError::InvalidSlot(number))
        }
    }

    /// The 1-based number, as used in field names and question JSON.
    pub fn number(self) -> u8 {
        self.0
    }

    pub(crate) fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl fmt::Display for QuestionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QuestionSlot {
    type Err = SurveyError;

    /// Only the exact strings `"1"` to `"5"` name a slot.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Self(1)),
            "2" => Ok(Self(2)),
            "3" => Ok(Self(3)),
            "4" => Ok(Self(4)),
            "5" => Ok(Self(5)),
            _ => Err(SurveyError::InvalidTarget(s.to_owned())),
        }
    }
}

/// Answer identifier within a question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnswerLetter {
    A,
    B,
    C,
    D,
}

impl AnswerLetter {
    /// Number of answers a question can hold.
    pub const COUNT: usize = 4;

    /// All letters in display order.
    pub const ALL: [AnswerLetter; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Lowercase form used in field names (`answer1a`).
    pub fn lower(self) -> char {
        match self {
            Self::A => 'a',
            Self::B => 'b',
            Self::C => 'c',
            Self::D => 'd',
        }
    }

    /// Uppercase form used in question JSON and error messages.
    pub fn upper(self) -> char {
        self.lower().to_ascii_uppercase()
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }
}

impl fmt::Display for AnswerLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.upper())
    }
}

/// Whether a question accepts one or several answers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[default]
    #[serde(rename = "SINGLE_OPTION")]
    SingleOption,
    #[serde(rename = "MULTIPLE_OPTION")]
    MultipleOption,
}

impl QuestionType {
    pub const ALL: [QuestionType; 2] = [Self::SingleOption, Self::MultipleOption];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SingleOption => "SINGLE_OPTION",
            Self::MultipleOption => "MULTIPLE_OPTION",
        }
    }

    /// Parse a stored value. Unknown values yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == raw)
    }
}

/// How the creative orders a question's answers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerOrder {
    #[default]
    #[serde(rename = "SHUFFLED")]
    Shuffled,
    #[serde(rename = "ORDERED")]
    Ordered,
}

impl AnswerOrder {
    pub const ALL: [AnswerOrder; 2] = [Self::Shuffled, Self::Ordered];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shuffled => "SHUFFLED",
            Self::Ordered => "ORDERED",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.as_str() == raw)
    }
}

/// The interpretation of an answer's raw `next` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NextTarget<'a> {
    /// The terminal sentinel `"end"`.
    End,
    /// Branch to another question.
    Question(QuestionSlot),
    /// Nothing entered.
    Blank,
    /// Anything else, including a miscased `"End"`.
    Other(&'a str),
}

impl<'a> NextTarget<'a> {
    pub fn parse(raw: &'a str) -> Self {
        if raw.is_empty() {
            Self::Blank
        } else if raw == END_MARKER {
            Self::End
        } else if let Ok(slot) = raw.parse() {
            Self::Question(slot)
        } else {
            Self::Other(raw)
        }
    }

    /// The target slot, if this points at a question.
    pub fn slot(self) -> Option<QuestionSlot> {
        match self {
            Self::Question(slot) => Some(slot),
            _ => None,
        }
    }
}

/// Check for a terminal marker written in the wrong case, such as `"End"`.
pub(crate) fn is_miscased_end(raw: &str) -> bool {
    raw.to_lowercase() == END_MARKER && raw != END_MARKER
}

/// A single answer choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// Text shown on the option. Empty means the letter is unused.
    pub text: String,

    /// Raw next pointer: `"end"`, a slot number, or whatever was entered.
    pub next: String,
}

impl Answer {
    pub fn new(text: impl Into<String>, next: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next: next.into(),
        }
    }

    /// An answer that ends the survey.
    pub fn ending(text: impl Into<String>) -> Self {
        Self::new(text, END_MARKER)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn target(&self) -> NextTarget<'_> {
        NextTarget::parse(&self.next)
    }
}

impl Default for Answer {
    /// A fresh form answer: no text, pointing at the end of the survey.
    fn default() -> Self {
        Self::new("", END_MARKER)
    }
}

/// A single question slot with its four answers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Question {
    /// The prompt text. Empty means the slot is unused.
    pub text: String,

    pub question_type: QuestionType,

    pub order: AnswerOrder,

    /// Answers a to d, always four entries.
    pub answers: [Answer; AnswerLetter::COUNT],
}

impl Question {
    /// Create a question with no answers filled in.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Builder-style answer assignment.
    pub fn with_answer(mut self, letter: AnswerLetter, answer: Answer) -> Self {
        self.answers[letter.index()] = answer;
        self
    }

    pub fn with_type(mut self, question_type: QuestionType) -> Self {
        self.question_type = question_type;
        self
    }

    pub fn with_order(mut self, order: AnswerOrder) -> Self {
        self.order = order;
        self
    }

    pub fn answer(&self, letter: AnswerLetter) -> &Answer {
        &self.answers[letter.index()]
    }

    pub fn answer_mut(&mut self, letter: AnswerLetter) -> &mut Answer {
        &mut self.answers[letter.index()]
    }

    /// Iterate over all four answers with their letters.
    pub fn answers(&self) -> impl Iterator<Item = (AnswerLetter, &Answer)> {
        AnswerLetter::ALL
            .into_iter()
            .map(move |letter| (letter, self.answer(letter)))
    }

    /// Answers with text, in letter order.
    pub fn options(&self) -> impl Iterator<Item = (AnswerLetter, &Answer)> {
        self.answers().filter(|(_, answer)| !answer.is_empty())
    }

    /// Check if the slot is unused (no question text).
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    /// Check if the slot is missing anything a linked answer relies on:
    /// the text, answers a and b, or either of their next pointers.
    pub fn is_incomplete(&self) -> bool {
        let a = self.answer(AnswerLetter::A);
        let b = self.answer(AnswerLetter::B);
        self.text.is_empty()
            || a.text.is_empty()
            || b.text.is_empty()
            || a.next.is_empty()
            || b.next.is_empty()
    }
}
