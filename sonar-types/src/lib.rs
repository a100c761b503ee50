//! Core types for the sonar survey tool.
//!
//! This crate provides the foundational types for building branching surveys:
//! - `Survey` - The structured survey record (5 question slots, a-d answers)
//! - `SurveyFields` and `FieldKey` - The flat, string-keyed storage format
//! - `QuestionNode` and `SurveyGraph` - The navigation graph handed to creatives
//! - `validate` - Branch and required-field checks run before a survey is saved
//! - `DocumentStore`, `ResponseWarehouse` and `SurveyForm` traits - For the
//!   external collaborators (storage, analytics, form UI)

mod field_key;
pub use field_key::FieldKey;

mod fields;
pub use fields::SurveyFields;

mod question;
pub use question::{
    Answer, AnswerLetter, AnswerOrder, END_MARKER, NextTarget, Question, QuestionSlot,
    QuestionType,
};

mod survey;
pub use survey::{ResponseType, Survey, SurveyType};

mod language;
pub use language::{Language, get_comment_text, get_next_text, get_thank_you_text};

mod node;
pub use node::{OptionNode, QuestionNode, all_question_text, build_question_json};

mod graph;
pub use graph::{Edge, SurveyGraph};

mod validation;
pub use validation::{ValidationError, ValidationErrors, validate, validate_slot};

mod records;
pub use records::{ResponseCount, ResponseRow, StoredSurvey, SurveyId};

mod error;
pub use error::SurveyError;

mod traits;
pub use traits::{DocumentStore, ResponseWarehouse, StoreError, SurveyForm, WarehouseError};
