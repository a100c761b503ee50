use chrono::NaiveDate;
use parking_lot::RwLock;
use sonar_types::{ResponseCount, ResponseRow, ResponseWarehouse, SurveyId, WarehouseError};

/// Response warehouse kept in memory.
#[derive(Debug, Default)]
pub struct MemoryWarehouse {
    rows: RwLock<Vec<(SurveyId, ResponseRow)>>,
}

impl MemoryWarehouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`MemoryWarehouse::record`].
    pub fn with_response(self, survey_id: impl Into<SurveyId>, row: ResponseRow) -> Self {
        self.record(survey_id, row);
        self
    }

    /// Store one collected response.
    pub fn record(&self, survey_id: impl Into<SurveyId>, row: ResponseRow) {
        self.rows.write().push((survey_id.into(), row));
    }
}

impl ResponseWarehouse for MemoryWarehouse {
    fn responses(&self, survey_id: &str) -> Result<Vec<ResponseRow>, WarehouseError> {
        let mut rows: Vec<ResponseRow> = self
            .rows
            .read()
            .iter()
            .filter(|(id, _)| id == survey_id)
            .map(|(_, row)| row.clone())
            .collect();
        rows.sort_by_key(|row| row.created_at);
        Ok(rows)
    }

    fn response_counts(&self, today: NaiveDate) -> Result<Vec<ResponseCount>, WarehouseError> {
        let rows = self.rows.read();
        Ok(super::aggregate_counts(
            rows.iter().map(|(id, row)| (id.as_str(), row)),
            today,
        ))
    }
}
