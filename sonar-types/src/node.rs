use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{AnswerOrder, QuestionType, Survey, SurveyFields};

/// One question as the creative's navigation script sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionNode {
    /// Slot number, 1 to 5.
    pub id: u8,

    #[serde(rename = "type")]
    pub question_type: QuestionType,

    pub text: String,

    pub options: Vec<OptionNode>,

    #[serde(rename = "answersOrder")]
    pub answers_order: AnswerOrder,

    /// Answer letter to raw next value (`"end"` or a slot number).
    pub next_question: BTreeMap<String, String>,
}

/// A selectable answer inside a [`QuestionNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionNode {
    /// Uppercase answer letter.
    pub id: String,
    pub role: String,
    pub text: String,
}

impl Survey {
    /// Build the navigation nodes: one per slot with question text, in slot order.
    ///
    /// Answers without text are left out. A question whose answers are all
    /// empty is still emitted, with no options.
    pub fn question_nodes(&self) -> Vec<QuestionNode> {
        self.questions()
            .filter(|(_, question)| !question.is_blank())
            .map(|(slot, question)| {
                let mut options = Vec::new();
                let mut next_question = BTreeMap::new();
                for (letter, answer) in question.options() {
                    let id = letter.upper().to_string();
                    options.push(OptionNode {
                        id: id.clone(),
                        role: "option".to_owned(),
                        text: answer.text.clone(),
                    });
                    next_question.insert(id, answer.next.clone());
                }

                QuestionNode {
                    id: slot.number(),
                    question_type: question.question_type,
                    text: question.text.clone(),
                    options,
                    answers_order: question.order,
                    next_question,
                }
            })
            .collect()
    }

    /// The navigation nodes as a JSON array.
    pub fn question_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.question_nodes())
    }
}

/// Build the navigation nodes straight from a stored document.
pub fn build_question_json(fields: &SurveyFields) -> Vec<QuestionNode> {
    Survey::from_fields(fields).question_nodes()
}

/// The non-empty question texts, in slot order.
pub fn all_question_text(survey: &Survey) -> Vec<&str> {
    survey
        .questions()
        .filter(|(_, question)| !question.is_blank())
        .map(|(_, question)| question.text.as_str())
        .collect()
}
