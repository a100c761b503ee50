use serde::Serialize;
use sonar_types::ResponseCount;

/// A survey answered within this many days is active.
pub const ACTIVE_DAYS: i64 = 3;

/// A survey answered within this many days is stale; older is timed out.
pub const WARNING_DAYS: i64 = 14;

/// Freshness of a survey's most recent response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ActivityStatus {
    Active,
    Stale,
    TimedOut,
    /// No responses recorded.
    Indeterminate,
}

impl ActivityStatus {
    /// Classify by days since the most recent response.
    pub fn from_days(days: i64) -> Self {
        if days <= ACTIVE_DAYS {
            Self::Active
        } else if days <= WARNING_DAYS {
            Self::Stale
        } else {
            Self::TimedOut
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Stale => "Stale",
            Self::TimedOut => "Timed Out",
            Self::Indeterminate => "No Responses",
        }
    }

    /// Badge color for the survey index.
    pub fn color(self) -> &'static str {
        match self {
            Self::Active => "#5cb85c",
            Self::Stale => "#f0ac4f",
            Self::TimedOut => "#d9534f",
            Self::Indeterminate => "#a0a0a0",
        }
    }
}

/// Response activity of one segmentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentActivity {
    pub segmentation: String,
    pub response_count: u64,
    pub days_since_response: i64,
}

/// Index-page statistics for one survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyActivity {
    pub survey_id: String,
    pub segments: Vec<SegmentActivity>,
    pub status: ActivityStatus,
    /// Days since the most recent response in any segmentation, `-1` without responses.
    pub last_change: i64,
}

impl SurveyActivity {
    /// Summarize the warehouse counts belonging to `survey_id`.
    ///
    /// Counts for other surveys are ignored, so the full result of
    /// [`sonar_types::ResponseWarehouse::response_counts`] may be passed.
    pub fn from_counts(survey_id: &str, counts: &[ResponseCount]) -> Self {
        let segments: Vec<SegmentActivity> = counts
            .iter()
            .filter(|count| count.survey_id == survey_id)
            .map(|count| SegmentActivity {
                segmentation: count.segmentation.clone(),
                response_count: count.response_count,
                days_since_response: count.days_since_response,
            })
            .collect();

        let most_recent = segments.iter().map(|s| s.days_since_response).min();
        let (status, last_change) = match most_recent {
            Some(days) => (ActivityStatus::from_days(days), days),
            None => (ActivityStatus::Indeterminate, -1),
        };

        Self {
            survey_id: survey_id.to_string(),
            segments,
            status,
            last_change,
        }
    }

    pub fn total_responses(&self) -> u64 {
        self.segments.iter().map(|s| s.response_count).sum()
    }
}
