//! Scripted form for filling surveys without user interaction.
//!
//! `ScriptedForm` applies pre-defined field values, keyed by their stored
//! names, on top of whatever survey the service passes in. This is useful
//! for testing create and edit flows.
//!
//! # Example
//!
//! ```rust
//! use sonar::{MemoryStore, MemoryWarehouse, ScriptedForm, SurveyService};
//!
//! let service = SurveyService::new(MemoryStore::new(), MemoryWarehouse::new());
//! let id = service
//!     .create_with(
//!         &ScriptedForm::new()
//!             .with_field("surveyname", "Spring Promo")
//!             .with_field("question1", "Have you seen our ad?")
//!             .with_field("answer1a", "Yes")
//!             .with_field("answer1b", "No"),
//!     )
//!     .unwrap();
//!
//! assert_eq!(service.get(&id).unwrap().name, "Spring Promo");
//! ```

use sonar_types::{FieldKey, Survey, SurveyFields, SurveyForm, ValidationError};

/// A form backend that submits pre-configured field values.
#[derive(Debug, Clone, Default)]
pub struct ScriptedForm {
    fields: SurveyFields,
    cancel: bool,
}

/// Error type for ScriptedForm.
#[derive(Debug, thiserror::Error)]
pub enum ScriptedFormError {
    #[error("Form was cancelled")]
    Cancelled,

    /// A real form would re-prompt; a scripted one has nothing else to say.
    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: FieldKey, message: String },
}

impl ScriptedForm {
    /// Create a form that submits its input unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field by its stored name, e.g. `answer2bnext`.
    pub fn with_field(mut self, key: impl Into<FieldKey>, value: impl Into<String>) -> Self {
        self.fields.insert(key, value);
        self
    }

    /// Make the form report a cancellation instead of submitting.
    pub fn cancelled(mut self) -> Self {
        self.cancel = true;
        self
    }
}

impl SurveyForm for ScriptedForm {
    type Error = ScriptedFormError;

    fn collect(
        &self,
        initial: &Survey,
        validate: &dyn Fn(&Survey) -> Vec<ValidationError>,
    ) -> Result<Survey, Self::Error> {
        if self.cancel {
            return Err(ScriptedFormError::Cancelled);
        }

        let mut fields = initial.to_fields();
        fields.extend(self.fields.clone());
        let survey = Survey::from_fields(&fields);

        match validate(&survey).into_iter().next() {
            Some(error) => Err(ScriptedFormError::ValidationFailed {
                field: error.field,
                message: error.message,
            }),
            None => Ok(survey),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sonar_types::{AnswerLetter, QuestionSlot};

    use super::*;

    #[test]
    fn fields_override_initial_survey() {
        let initial = Survey::new("Old");
        let form = ScriptedForm::new()
            .with_field("surveyname", "New")
            .with_field("answer1bnext", "3");

        let survey = form.collect(&initial, &|_| Vec::new()).unwrap();
        assert_eq!(survey.name, "New");
        let entry = survey.question(QuestionSlot::ENTRY);
        assert_eq!(entry.answer(AnswerLetter::A).next, "end");
        assert_eq!(entry.answer(AnswerLetter::B).next, "3");
    }

    #[test]
    fn first_validation_error_is_reported() {
        let form = ScriptedForm::new();
        let error = form
            .collect(&Survey::default(), &|survey| {
                vec![ValidationError::new(
                    FieldKey::new(FieldKey::SURVEY_NAME),
                    format!("'{}' is not a name", survey.name),
                )]
            })
            .unwrap_err();

        assert!(matches!(
            error,
            ScriptedFormError::ValidationFailed { ref field, .. } if field.as_str() == "surveyname"
        ));
    }

    #[test]
    fn cancellation() {
        let error = ScriptedForm::new()
            .cancelled()
            .collect(&Survey::default(), &|_| Vec::new())
            .unwrap_err();
        assert!(matches!(error, ScriptedFormError::Cancelled));
    }
}
