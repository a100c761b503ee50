use crate::{
    Answer, AnswerLetter, AnswerOrder, FieldKey, Language, Question, QuestionSlot, QuestionType,
    SurveyFields, ValidationErrors,
};

/// What kind of study a survey belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SurveyType {
    /// A single creative, no control group.
    #[default]
    BrandTrack,
    /// Control and exposed creatives, reported as lift.
    BrandLift,
}

impl SurveyType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BrandTrack => "brand_track",
            Self::BrandLift => "brand_lift",
        }
    }

    /// Anything other than `brand_track`, including a missing value, is
    /// treated as brand lift.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("brand_track") => Self::BrandTrack,
            _ => Self::BrandLift,
        }
    }
}

/// When the creative sends answers to the receiver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResponseType {
    #[default]
    AtEnd,
    Immediately,
}

impl ResponseType {
    pub const ALL: [ResponseType; 2] = [Self::AtEnd, Self::Immediately];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AtEnd => "Submit Responses at End of Survey",
            Self::Immediately => "Submit Responses after each Question",
        }
    }

    /// Older surveys carry no response type and default to submitting at the end.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(raw) if raw == Self::Immediately.as_str() => Self::Immediately,
            _ => Self::AtEnd,
        }
    }
}

/// A survey: global settings plus five question slots.
///
/// Slot 1 is the entry point; slots 2 to 5 may be left blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Survey {
    pub name: String,
    pub language: Language,
    pub survey_type: SurveyType,
    pub response_type: ResponseType,

    /// Stylesheet for the creative. `None` means the built-in default.
    pub custom_css: Option<String>,

    pub archived: bool,

    questions: [Question; QuestionSlot::COUNT],
}

impl Survey {
    /// Create an empty survey with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            language: Language::default(),
            survey_type: SurveyType::default(),
            response_type: ResponseType::default(),
            custom_css: None,
            archived: false,
            questions: Default::default(),
        }
    }

    /// Builder-style question assignment.
    pub fn with_question(mut self, slot: QuestionSlot, question: Question) -> Self {
        self.questions[slot.index()] = question;
        self
    }

    pub fn with_type(mut self, survey_type: SurveyType) -> Self {
        self.survey_type = survey_type;
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn question(&self, slot: QuestionSlot) -> &Question {
        &self.questions[slot.index()]
    }

    pub fn question_mut(&mut self, slot: QuestionSlot) -> &mut Question {
        &mut self.questions[slot.index()]
    }

    /// Iterate over all five slots, blank ones included.
    pub fn questions(&self) -> impl Iterator<Item = (QuestionSlot, &Question)> {
        QuestionSlot::ALL
            .into_iter()
            .map(move |slot| (slot, self.question(slot)))
    }

    /// Reporting is offered for every survey type except brand track.
    pub fn has_reporting(&self) -> bool {
        self.survey_type != SurveyType::BrandTrack
    }

    /// Run the submission checks. See [`crate::validate`].
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let errors = crate::validation::validate_survey(self);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Read a survey from its stored document.
    ///
    /// Missing keys read as empty strings; unknown keys are ignored.
    pub fn from_fields(fields: &SurveyFields) -> Self {
        let mut survey = Self::new(fields.get_or_empty(FieldKey::SURVEY_NAME));
        survey.language = Language::resolve(fields.get(FieldKey::LANGUAGE));
        survey.survey_type = SurveyType::parse(fields.get(FieldKey::SURVEY_TYPE));
        survey.response_type = ResponseType::parse(fields.get(FieldKey::RESPONSE_TYPE));
        survey.custom_css = fields
            .get(FieldKey::CUSTOM_CSS)
            .filter(|css| !css.is_empty())
            .map(str::to_owned);
        survey.archived = fields.get(FieldKey::ARCHIVED) == Some("true");

        for slot in QuestionSlot::ALL {
            let question = survey.question_mut(slot);
            question.text = fields.get_or_empty(FieldKey::question(slot)).to_owned();
            question.question_type = fields
                .get(FieldKey::question_type(slot))
                .and_then(QuestionType::parse)
                .unwrap_or_default();
            question.order = fields
                .get(FieldKey::question_order(slot))
                .and_then(AnswerOrder::parse)
                .unwrap_or_default();

            for letter in AnswerLetter::ALL {
                *question.answer_mut(letter) = Answer::new(
                    fields.get_or_empty(FieldKey::answer(slot, letter)),
                    fields.get_or_empty(FieldKey::answer_next(slot, letter)),
                );
            }
        }

        survey
    }

    /// Write the survey as a stored document. Every slot is written, blank or not.
    pub fn to_fields(&self) -> SurveyFields {
        let mut fields = SurveyFields::new()
            .with(FieldKey::SURVEY_NAME, self.name.as_str())
            .with(FieldKey::LANGUAGE, self.language.code())
            .with(FieldKey::SURVEY_TYPE, self.survey_type.as_str())
            .with(FieldKey::RESPONSE_TYPE, self.response_type.as_str())
            .with(FieldKey::ARCHIVED, if self.archived { "true" } else { "false" });

        // Always present; empty means the default stylesheet.
        fields.insert(FieldKey::CUSTOM_CSS, self.custom_css.as_deref().unwrap_or(""));

        for (slot, question) in self.questions() {
            fields.insert(FieldKey::question(slot), question.text.as_str());
            fields.insert(FieldKey::question_type(slot), question.question_type.as_str());
            fields.insert(FieldKey::question_order(slot), question.order.as_str());

            for (letter, answer) in question.answers() {
                fields.insert(FieldKey::answer(slot, letter), answer.text.as_str());
                fields.insert(FieldKey::answer_next(slot, letter), answer.next.as_str());
            }
        }

        fields
    }
}

impl Default for Survey {
    fn default() -> Self {
        Self::new("")
    }
}
