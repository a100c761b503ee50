//! [`ResponseWarehouse`](sonar_types::ResponseWarehouse) implementations.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use sonar_types::{ResponseCount, ResponseRow};

mod jsonl;
mod memory;

pub use jsonl::JsonlWarehouse;
pub use memory::MemoryWarehouse;

/// Group rows by survey id and segmentation, ordered by both.
///
/// Mirrors the warehouse aggregate: latest response date, whole days from
/// that date to `today`, and the row count.
pub(crate) fn aggregate_counts<'a>(
    rows: impl IntoIterator<Item = (&'a str, &'a ResponseRow)>,
    today: NaiveDate,
) -> Vec<ResponseCount> {
    let mut groups: BTreeMap<(&str, &str), (NaiveDate, u64)> = BTreeMap::new();

    for (survey_id, row) in rows {
        let date = row.created_at.date_naive();
        groups
            .entry((survey_id, row.segmentation.as_str()))
            .and_modify(|(latest, count)| {
                *latest = (*latest).max(date);
                *count += 1;
            })
            .or_insert((date, 1));
    }

    groups
        .into_iter()
        .map(|((survey_id, segmentation), (last_response, response_count))| ResponseCount {
            survey_id: survey_id.to_string(),
            segmentation: segmentation.to_string(),
            last_response,
            days_since_response: (today - last_response).num_days(),
            response_count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn groups_by_survey_and_segmentation() {
        let day = |d| Utc.with_ymd_and_hms(2024, 3, d, 10, 0, 0).unwrap();
        let rows = [
            ("b", ResponseRow::new(day(1), "", "1:A")),
            ("a", ResponseRow::new(day(2), "default_expose", "1:A")),
            ("a", ResponseRow::new(day(5), "default_expose", "1:B")),
            ("a", ResponseRow::new(day(3), "default_control", "1:B")),
        ];
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let counts = aggregate_counts(rows.iter().map(|(id, row)| (*id, row)), today);
        let summary: Vec<(&str, &str, i64, u64)> = counts
            .iter()
            .map(|c| {
                (
                    c.survey_id.as_str(),
                    c.segmentation.as_str(),
                    c.days_since_response,
                    c.response_count,
                )
            })
            .collect();

        assert_eq!(
            summary,
            vec![
                ("a", "default_control", 7, 1),
                ("a", "default_expose", 5, 2),
                ("b", "", 9, 1),
            ]
        );
        assert_eq!(counts[1].last_response, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }
}
