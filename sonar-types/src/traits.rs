use chrono::NaiveDate;

use crate::{
    FieldKey, ResponseCount, ResponseRow, StoredSurvey, Survey, SurveyFields, SurveyId,
    ValidationError,
};

/// Error type for document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No survey with this id exists.
    #[error("Survey not found: {0}")]
    NotFound(SurveyId),

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error type for warehouse queries.
#[derive(Debug, thiserror::Error)]
pub enum WarehouseError {
    #[error("Warehouse I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored row could not be decoded.
    #[error("Warehouse row {line} is malformed: {source}")]
    MalformedRow {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Warehouse backend error: {0}")]
    Backend(#[source] anyhow::Error),
}

/// Storage for survey documents, one flat document per survey.
///
/// Concurrent writers to the same survey are resolved by the backend;
/// the last write wins.
pub trait DocumentStore {
    /// All surveys, archived ones included.
    fn list(&self) -> Result<Vec<StoredSurvey>, StoreError>;

    /// Surveys without `archived = "true"`.
    fn list_active(&self) -> Result<Vec<StoredSurvey>, StoreError> {
        let mut surveys = self.list()?;
        surveys.retain(|survey| survey.fields.get(FieldKey::ARCHIVED) != Some("true"));
        Ok(surveys)
    }

    /// Fetch one document. A missing id is `Ok(None)`.
    fn get(&self, id: &str) -> Result<Option<SurveyFields>, StoreError>;

    /// Store a new document and return its generated id.
    fn create(&self, fields: &SurveyFields) -> Result<SurveyId, StoreError>;

    /// Merge `fields` into an existing document.
    ///
    /// # Errors
    /// [`StoreError::NotFound`] if the document does not exist.
    fn update(&self, id: &str, fields: &SurveyFields) -> Result<(), StoreError>;

    /// Remove a document. Deleting a missing id succeeds.
    fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// Read access to collected responses.
pub trait ResponseWarehouse {
    /// All responses for one survey, oldest first.
    fn responses(&self, survey_id: &str) -> Result<Vec<ResponseRow>, WarehouseError>;

    /// Activity per survey and segmentation, ordered by survey id then segmentation.
    ///
    /// `today` anchors `days_since_response`.
    fn response_counts(&self, today: NaiveDate) -> Result<Vec<ResponseCount>, WarehouseError>;

    /// Activity per segmentation for a single survey.
    fn response_counts_for(
        &self,
        survey_id: &str,
        today: NaiveDate,
    ) -> Result<Vec<ResponseCount>, WarehouseError> {
        let mut counts = self.response_counts(today)?;
        counts.retain(|count| count.survey_id == survey_id);
        Ok(counts)
    }
}

/// A user interface that fills in a survey.
///
/// Forms receive the current state of the survey (blank for creation, the
/// stored survey for editing) and return the submitted survey. Validation
/// runs inside the form; `collect` only returns once `validate` reports no
/// errors, or on cancellation.
pub trait SurveyForm {
    /// The error type for this form.
    type Error: Into<anyhow::Error>;

    fn collect(
        &self,
        initial: &Survey,
        validate: &dyn Fn(&Survey) -> Vec<ValidationError>,
    ) -> Result<Survey, Self::Error>;
}
