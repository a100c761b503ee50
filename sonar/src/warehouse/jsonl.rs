use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sonar_types::{ResponseCount, ResponseRow, ResponseWarehouse, WarehouseError};
use tracing::debug;

/// One line of the response file.
#[derive(Debug, Serialize, Deserialize)]
struct Record {
    #[serde(rename = "ID")]
    id: String,
    #[serde(flatten)]
    row: ResponseRow,
}

/// Response warehouse backed by a newline-delimited JSON file.
///
/// Each line is `{"ID", "CreatedAt", "Segmentation", "Response"}`, the shape
/// the response receiver writes. A missing file holds no responses; blank
/// lines are skipped.
#[derive(Debug, Clone)]
pub struct JsonlWarehouse {
    path: PathBuf,
}

impl JsonlWarehouse {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one response, creating the file if needed.
    pub fn append(&self, survey_id: &str, row: &ResponseRow) -> Result<(), WarehouseError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let record = Record {
            id: survey_id.to_string(),
            row: row.clone(),
        };
        let line =
            serde_json::to_string(&record).map_err(|err| WarehouseError::Backend(err.into()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    fn records(&self) -> Result<Vec<Record>, WarehouseError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let records = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line)
                    .map_err(|source| WarehouseError::MalformedRow { line: i + 1, source })
            })
            .collect::<Result<Vec<Record>, _>>()?;

        debug!(path = %self.path.display(), rows = records.len(), "read response file");
        Ok(records)
    }
}

impl ResponseWarehouse for JsonlWarehouse {
    fn responses(&self, survey_id: &str) -> Result<Vec<ResponseRow>, WarehouseError> {
        let mut rows: Vec<ResponseRow> = self
            .records()?
            .into_iter()
            .filter(|record| record.id == survey_id)
            .map(|record| record.row)
            .collect();
        rows.sort_by_key(|row| row.created_at);
        Ok(rows)
    }

    fn response_counts(&self, today: NaiveDate) -> Result<Vec<ResponseCount>, WarehouseError> {
        let records = self.records()?;
        Ok(super::aggregate_counts(
            records
                .iter()
                .filter(|record| !record.id.is_empty())
                .map(|record| (record.id.as_str(), &record.row)),
            today,
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn appended_rows_are_read_back_per_survey() {
        let dir = tempfile::tempdir().unwrap();
        let warehouse = JsonlWarehouse::open(dir.path().join("data/responses.jsonl"));
        let later = Utc.with_ymd_and_hms(2024, 3, 2, 8, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();

        warehouse
            .append("a", &ResponseRow::new(later, "default_expose", "1:B"))
            .unwrap();
        warehouse
            .append("b", &ResponseRow::new(earlier, "", "1:A"))
            .unwrap();
        warehouse
            .append("a", &ResponseRow::new(earlier, "default_control", "1:A"))
            .unwrap();

        let rows = warehouse.responses("a").unwrap();
        assert_eq!(
            rows.iter().map(|r| r.response.as_str()).collect::<Vec<_>>(),
            vec!["1:A", "1:B"]
        );
        assert_eq!(warehouse.response_counts_for("a", later.date_naive()).unwrap().len(), 2);
    }

    #[test]
    fn reads_receiver_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("responses.jsonl");
        fs::write(
            &path,
            "{\"ID\":\"a\",\"CreatedAt\":\"2024-03-01T10:00:00Z\",\"Segmentation\":\"default_expose\",\"Response\":\"1:A|2:B\"}\n\n",
        )
        .unwrap();

        let rows = JsonlWarehouse::open(&path).responses("a").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].segmentation, "default_expose");
        assert_eq!(rows[0].response, "1:A|2:B");
    }

    #[test]
    fn malformed_line_reports_its_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("responses.jsonl");
        fs::write(&path, "\n{\"ID\":\"a\"}\n").unwrap();

        let error = JsonlWarehouse::open(&path).responses("a").unwrap_err();
        assert!(matches!(error, WarehouseError::MalformedRow { line: 2, .. }));
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let warehouse = JsonlWarehouse::open(dir.path().join("none.jsonl"));
        assert!(warehouse.responses("a").unwrap().is_empty());
        assert!(
            warehouse
                .response_counts(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
                .unwrap()
                .is_empty()
        );
    }
}
