use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::SurveyFields;

/// Document store identifier of a survey.
pub type SurveyId = String;

/// A survey document together with its store id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSurvey {
    pub id: SurveyId,
    pub fields: SurveyFields,
}

/// One collected response, as kept in the warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRow {
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,

    /// Experiment arm, e.g. `default_control`.
    #[serde(rename = "Segmentation")]
    pub segmentation: String,

    /// Pipe-delimited answer tokens, each with a 2-character prefix.
    #[serde(rename = "Response")]
    pub response: String,
}

impl ResponseRow {
    pub fn new(
        created_at: DateTime<Utc>,
        segmentation: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            created_at,
            segmentation: segmentation.into(),
            response: response.into(),
        }
    }
}

/// Response activity for one survey and segmentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseCount {
    pub survey_id: SurveyId,
    pub segmentation: String,
    pub last_response: NaiveDate,
    pub days_since_response: i64,
    pub response_count: u64,
}
