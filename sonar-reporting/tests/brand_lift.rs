use chrono::{TimeZone, Utc};
use sonar_reporting::{LiftTable, Segment, brand_lift_results, format_percentage};
use sonar_types::ResponseRow;

fn rows(data: &[(&str, &str)]) -> Vec<ResponseRow> {
    data.iter()
        .enumerate()
        .map(|(i, (segmentation, response))| {
            let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, i as u32 % 60, 0).unwrap();
            ResponseRow::new(at, *segmentation, *response)
        })
        .collect()
}

fn rendered(table: &LiftTable) -> Vec<(String, Vec<String>)> {
    table
        .rows()
        .into_iter()
        .map(|(name, values)| {
            (
                name.to_string(),
                values.iter().copied().map(format_percentage).collect(),
            )
        })
        .collect()
}

#[test]
fn report_for_two_question_survey() {
    let tables = brand_lift_results(&rows(&[
        ("default_expose", "1:A|2:A"),
        ("default_expose", "1:A|2:B"),
        ("default_expose", "1:B"),
        ("default_expose", "1:A|3:A"),
        ("default_control", "1:A|2:B"),
        ("default_control", "1:B|2:B"),
        ("preview", "1:B|2:A"),
    ]));
    assert_eq!(tables.len(), 2);

    let first = &tables[0];
    assert_eq!(first.labels, vec!["A", "B"]);
    assert_eq!(
        rendered(first),
        vec![
            ("expose".to_string(), vec!["75.00%".to_string(), "25.00%".to_string()]),
            ("control".to_string(), vec!["50.00%".to_string(), "50.00%".to_string()]),
            ("lift".to_string(), vec!["50.00%".to_string(), "-50.00%".to_string()]),
        ]
    );

    // Column 2 mixes tokens of questions 2 and 3; labels are positional.
    let second = &tables[1];
    assert_eq!(second.labels, vec!["A", "B"]);
    assert_eq!(second.share(Segment::Expose, "A"), Some(2.0 / 3.0));
    assert_eq!(second.share(Segment::Control, "A"), Some(0.0));
    assert_eq!(format_percentage(second.lift_for("A").unwrap()), "n/a");
}
