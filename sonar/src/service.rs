use chrono::NaiveDate;
use sonar_creative::{CreativeOptions, PackageError, ZipExport, export_zip, render_creative};
use sonar_reporting::{LiftTable, SurveyActivity, brand_lift_results};
use sonar_types::{
    DocumentStore, FieldKey, ResponseWarehouse, StoreError, Survey, SurveyFields, SurveyForm,
    SurveyId, ValidationError, ValidationErrors, WarehouseError, all_question_text,
};
use tracing::{debug, error, info};

/// Error type for survey service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// No survey with this id exists.
    #[error("Survey not found")]
    NotFound(SurveyId),

    /// The submission failed validation; nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The document store or warehouse failed. The cause is logged.
    #[error("service unavailable")]
    Unavailable(#[source] anyhow::Error),

    #[error(transparent)]
    Package(#[from] PackageError),

    #[error("Creative rendering failed: {0}")]
    Render(#[from] serde_json::Error),

    /// The form backend failed or was cancelled.
    #[error("Form error: {0}")]
    Form(#[source] anyhow::Error),
}

impl ServiceError {
    fn unavailable(err: impl Into<anyhow::Error>) -> Self {
        let err = err.into();
        error!(error = %err, "backend call failed");
        Self::Unavailable(err)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::unavailable(other),
        }
    }
}

impl From<WarehouseError> for ServiceError {
    fn from(err: WarehouseError) -> Self {
        Self::unavailable(err)
    }
}

/// One row of the survey index.
#[derive(Debug, Clone)]
pub struct SurveySummary {
    pub id: SurveyId,
    pub survey: Survey,
    pub activity: SurveyActivity,
}

impl SurveySummary {
    pub fn has_reporting(&self) -> bool {
        self.survey.has_reporting()
    }

    pub fn question_text(&self) -> Vec<&str> {
        all_question_text(&self.survey)
    }
}

/// Brand-lift report for one survey.
#[derive(Debug, Clone)]
pub struct SurveyReport {
    pub id: SurveyId,
    pub survey: Survey,
    /// One table per response column.
    pub tables: Vec<LiftTable>,
}

/// Survey operations over a document store and a response warehouse.
pub struct SurveyService<S, W> {
    store: S,
    warehouse: W,
    receiver_url: Option<String>,
}

impl<S: DocumentStore, W: ResponseWarehouse> SurveyService<S, W> {
    pub fn new(store: S, warehouse: W) -> Self {
        Self {
            store,
            warehouse,
            receiver_url: None,
        }
    }

    /// Set the endpoint creatives report responses to.
    pub fn with_receiver_url(mut self, url: Option<String>) -> Self {
        self.receiver_url = url;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn warehouse(&self) -> &W {
        &self.warehouse
    }

    /// Surveys with their response activity, ordered by id.
    pub fn index(
        &self,
        today: NaiveDate,
        include_archived: bool,
    ) -> Result<Vec<SurveySummary>, ServiceError> {
        let documents = if include_archived {
            self.store.list()?
        } else {
            self.store.list_active()?
        };
        let counts = self.warehouse.response_counts(today)?;
        debug!(surveys = documents.len(), counts = counts.len(), "building survey index");

        Ok(documents
            .into_iter()
            .map(|document| SurveySummary {
                activity: SurveyActivity::from_counts(&document.id, &counts),
                survey: Survey::from_fields(&document.fields),
                id: document.id,
            })
            .collect())
    }

    pub fn get(&self, id: &str) -> Result<Survey, ServiceError> {
        let fields = self.fields(id)?;
        Ok(Survey::from_fields(&fields))
    }

    /// Validate and store a new survey.
    pub fn create(&self, survey: &Survey) -> Result<SurveyId, ServiceError> {
        survey.validate()?;
        let id = self.store.create(&survey.to_fields())?;
        info!(survey_id = %id, name = %survey.name, "survey created");
        Ok(id)
    }

    /// Validate and overwrite an existing survey.
    pub fn update(&self, id: &str, survey: &Survey) -> Result<(), ServiceError> {
        survey.validate()?;
        self.store.update(id, &survey.to_fields())?;
        info!(survey_id = %id, name = %survey.name, "survey updated");
        Ok(())
    }

    /// Set or clear the archived flag. Archived surveys leave the default index.
    pub fn set_archived(&self, id: &str, archived: bool) -> Result<(), ServiceError> {
        self.fields(id)?;
        let value = if archived { "true" } else { "false" };
        self.store
            .update(id, &SurveyFields::new().with(FieldKey::ARCHIVED, value))?;
        info!(survey_id = %id, archived, "survey archive flag changed");
        Ok(())
    }

    /// Delete a survey. Deleting a missing survey succeeds.
    pub fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.store.delete(id)?;
        info!(survey_id = %id, "survey deleted");
        Ok(())
    }

    /// Render the operator preview of a survey.
    pub fn preview(&self, id: &str) -> Result<String, ServiceError> {
        let survey = self.get(id)?;
        let options = CreativeOptions::preview(id).with_receiver_url(self.receiver_url.clone());
        Ok(render_creative(&survey, &options)?)
    }

    /// Package the survey's creatives, stamped with `date`.
    pub fn export_zip(&self, id: &str, date: NaiveDate) -> Result<ZipExport, ServiceError> {
        let survey = self.get(id)?;
        let export = export_zip(&survey, id, self.receiver_url.as_deref(), date)?;
        info!(survey_id = %id, file = %export.file_name, "creative export ready");
        Ok(export)
    }

    /// All responses as CSV with generic headers.
    pub fn responses_csv(&self, id: &str) -> Result<String, ServiceError> {
        let rows = self.warehouse.responses(id)?;
        Ok(sonar_reporting::download_responses(&rows))
    }

    /// All responses as CSV, headed by the question texts when the survey exists.
    pub fn responses_csv_with_context(&self, id: &str) -> Result<String, ServiceError> {
        let rows = self.warehouse.responses(id)?;
        let survey = self.store.get(id)?.map(|fields| Survey::from_fields(&fields));
        Ok(sonar_reporting::download_responses_with_context(
            &rows,
            survey.as_ref(),
        ))
    }

    /// Brand-lift tables for a survey.
    pub fn report(&self, id: &str) -> Result<SurveyReport, ServiceError> {
        let survey = self.get(id)?;
        let rows = self.warehouse.responses(id)?;
        let tables = brand_lift_results(&rows);
        debug!(survey_id = %id, rows = rows.len(), tables = tables.len(), "brand lift computed");

        Ok(SurveyReport {
            id: id.to_string(),
            survey,
            tables,
        })
    }

    /// Fill a new survey through a form and store it.
    ///
    /// The form starts blank with every next pointer set to `end`.
    pub fn create_with<F: SurveyForm>(&self, form: &F) -> Result<SurveyId, ServiceError> {
        let survey = form
            .collect(&Survey::default(), &validation_errors)
            .map_err(|err| ServiceError::Form(err.into()))?;
        self.create(&survey)
    }

    /// Edit a stored survey through a form.
    pub fn edit_with<F: SurveyForm>(&self, id: &str, form: &F) -> Result<(), ServiceError> {
        let current = self.get(id)?;
        let survey = form
            .collect(&current, &validation_errors)
            .map_err(|err| ServiceError::Form(err.into()))?;
        self.update(id, &survey)
    }

    fn fields(&self, id: &str) -> Result<SurveyFields, ServiceError> {
        self.store
            .get(id)?
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }
}

fn validation_errors(survey: &Survey) -> Vec<ValidationError> {
    survey
        .validate()
        .err()
        .map(ValidationErrors::into_inner)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryStore, MemoryWarehouse};

    #[test]
    fn store_not_found_maps_to_not_found() {
        let error = ServiceError::from(StoreError::NotFound("x".to_string()));
        assert!(error.is_not_found());
        assert_eq!(error.to_string(), "Survey not found");
    }

    #[test]
    fn backend_failures_are_unavailable() {
        let io = std::io::Error::other("disk on fire");
        let error = ServiceError::from(StoreError::Io(io));
        assert!(matches!(error, ServiceError::Unavailable(_)));
        assert_eq!(error.to_string(), "service unavailable");
    }

    #[test]
    fn missing_survey_is_not_found() {
        let service = SurveyService::new(MemoryStore::new(), MemoryWarehouse::new());
        assert!(service.get("nope").unwrap_err().is_not_found());
        assert!(service.preview("nope").unwrap_err().is_not_found());
        assert!(service.set_archived("nope", true).unwrap_err().is_not_found());
        service.delete("nope").unwrap();
    }
}
