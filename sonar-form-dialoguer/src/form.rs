//! Dialoguer implementation of the SurveyForm trait.

use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use dialoguer::{Confirm, Editor, Input, Select};
use sonar::{
    AnswerLetter, AnswerOrder, DEFAULT_CSS, Language, NextTarget, Question, QuestionSlot,
    QuestionType, ResponseType, Survey, SurveyForm, SurveyGraph, SurveyType, ValidationError,
};
use thiserror::Error;

/// Error type for the Dialoguer form.
#[derive(Debug, Error)]
pub enum FormError {
    /// User cancelled the form (e.g., pressed Ctrl+C or declined to fix errors).
    #[error("Survey form cancelled by user")]
    Cancelled,

    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

fn prompt_result<T>(result: dialoguer::Result<T>) -> Result<T, FormError> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if is_cancelled(&e) => Err(FormError::Cancelled),
        Err(e) => Err(FormError::Dialoguer(e)),
    }
}

/// Accepts what the creative can follow, plus miscased `end` for the
/// survey validator to report.
fn check_next(input: &String) -> Result<(), String> {
    match NextTarget::parse(input) {
        NextTarget::End | NextTarget::Question(_) => Ok(()),
        _ if input.eq_ignore_ascii_case("end") => Ok(()),
        _ => Err("Enter a question number from 1 to 5, or 'end'".to_string()),
    }
}

/// Dialoguer form for interactive survey editing.
#[derive(Debug, Default, Clone)]
pub struct DialoguerForm {
    /// Use colorful theme for prompts.
    colorful: bool,
}

impl DialoguerForm {
    /// Create a new form with the default (colorful) theme.
    pub fn new() -> Self {
        Self { colorful: true }
    }

    /// Create a form with plain (no color) theme.
    pub fn plain() -> Self {
        Self { colorful: false }
    }

    fn theme(&self) -> Box<dyn Theme> {
        if self.colorful {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        }
    }

    fn text(&self, prompt: &str, current: &str) -> Result<String, FormError> {
        let theme = self.theme();
        prompt_result(
            Input::<String>::with_theme(&*theme)
                .with_prompt(prompt)
                .with_initial_text(current)
                .allow_empty(true)
                .interact_text(),
        )
    }

    fn next_pointer(&self, prompt: &str, current: &str) -> Result<String, FormError> {
        let theme = self.theme();
        prompt_result(
            Input::<String>::with_theme(&*theme)
                .with_prompt(prompt)
                .with_initial_text(current)
                .validate_with(check_next)
                .interact_text(),
        )
    }

    fn select(&self, prompt: &str, items: &[&str], current: usize) -> Result<usize, FormError> {
        let theme = self.theme();
        prompt_result(
            Select::with_theme(&*theme)
                .with_prompt(prompt)
                .items(items)
                .default(current)
                .interact(),
        )
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool, FormError> {
        let theme = self.theme();
        prompt_result(
            Confirm::with_theme(&*theme)
                .with_prompt(prompt)
                .default(default)
                .interact(),
        )
    }

    fn fill_settings(&self, survey: &mut Survey) -> Result<(), FormError> {
        survey.name = self.text("Survey name", &survey.name)?;

        let codes: Vec<&str> = Language::ALL.iter().map(|l| l.code()).collect();
        let current = Language::ALL
            .iter()
            .position(|l| *l == survey.language)
            .unwrap_or(0);
        survey.language = Language::ALL[self.select("Language", &codes, current)?];

        let types = [SurveyType::BrandTrack, SurveyType::BrandLift];
        let current = usize::from(survey.survey_type == SurveyType::BrandLift);
        let choice = self.select("Survey type", &["Brand Track", "Brand Lift"], current)?;
        survey.survey_type = types[choice];

        let modes: Vec<&str> = ResponseType::ALL.iter().map(|r| r.as_str()).collect();
        let current = usize::from(survey.response_type == ResponseType::Immediately);
        survey.response_type = ResponseType::ALL[self.select("Response type", &modes, current)?];

        if self.confirm("Use a custom stylesheet?", survey.custom_css.is_some())? {
            let start = survey.custom_css.as_deref().unwrap_or(DEFAULT_CSS);
            let edited = prompt_result(Editor::new().edit(start))?;
            survey.custom_css = Some(edited.unwrap_or_else(|| start.to_string()));
        } else {
            survey.custom_css = None;
        }

        Ok(())
    }

    fn fill_question(&self, slot: QuestionSlot, question: &mut Question) -> Result<(), FormError> {
        let hint = if slot == QuestionSlot::ENTRY {
            ""
        } else {
            " (empty to leave blank)"
        };
        question.text = self.text(&format!("Question {slot}{hint}"), &question.text)?;
        if question.is_blank() {
            return Ok(());
        }

        let current = usize::from(question.question_type == QuestionType::MultipleOption);
        let choice = self.select("Question type", &["Single option", "Multiple option"], current)?;
        question.question_type = QuestionType::ALL[choice];

        let current = usize::from(question.order == AnswerOrder::Ordered);
        question.order = [AnswerOrder::Shuffled, AnswerOrder::Ordered]
            [self.select("Answer order", &["Shuffled", "Ordered"], current)?];

        for letter in AnswerLetter::ALL {
            let answer = question.answer_mut(letter);
            answer.text = self.text(&format!("  Answer {letter}"), &answer.text)?;
            if !answer.is_empty() {
                answer.next = self.next_pointer(
                    &format!("  Answer {letter} leads to (1-5 or 'end')"),
                    &answer.next,
                )?;
            }
        }

        Ok(())
    }

    fn fill(&self, survey: &mut Survey) -> Result<(), FormError> {
        self.fill_settings(survey)?;
        for slot in QuestionSlot::ALL {
            println!();
            self.fill_question(slot, survey.question_mut(slot))?;
        }
        Ok(())
    }
}

impl SurveyForm for DialoguerForm {
    type Error = FormError;

    fn collect(
        &self,
        initial: &Survey,
        validate: &dyn Fn(&Survey) -> Vec<ValidationError>,
    ) -> Result<Survey, Self::Error> {
        let mut survey = initial.clone();

        loop {
            self.fill(&mut survey)?;

            let errors = validate(&survey);
            if errors.is_empty() {
                let graph = SurveyGraph::new(&survey);
                for slot in graph.unreachable() {
                    println!("Note: question {slot} cannot be reached from question 1");
                }
                for slot in graph.dead_ends() {
                    println!("Note: question {slot} has no answers and ends the survey");
                }
                return Ok(survey);
            }

            println!();
            for error in &errors {
                println!("Error: {error}");
            }
            if !self.confirm("Fix the survey?", true)? {
                return Err(FormError::Cancelled);
            }
        }
    }
}
