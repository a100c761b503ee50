//! CSV exports of raw responses.

use sonar_types::{QuestionSlot, ResponseRow, Survey};

use crate::tokens::answer_labels;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// Export responses with generic `Response N` headers.
///
/// Columns are `Date, Control/Expose, Dimension 2` followed by one column per
/// answer position, as many as the longest response. `Dimension 2` is
/// always empty.
pub fn download_responses(rows: &[ResponseRow]) -> String {
    write_csv(rows, |n| format!("Response {n}"))
}

/// Export responses with question texts as headers.
///
/// Column *n* takes the text of question slot *n*. Slots without text, or a
/// missing survey, fall back to `Response N`.
pub fn download_responses_with_context(rows: &[ResponseRow], survey: Option<&Survey>) -> String {
    write_csv(rows, |n| {
        let text = survey.and_then(|survey| {
            let slot = u8::try_from(n).ok().and_then(|n| QuestionSlot::new(n).ok())?;
            let text = survey.question(slot).text.as_str();
            (!text.is_empty()).then_some(text)
        });
        match text {
            Some(text) => text.to_string(),
            None => format!("Response {n}"),
        }
    })
}

fn write_csv(rows: &[ResponseRow], header: impl Fn(usize) -> String) -> String {
    let parsed: Vec<Vec<&str>> = rows.iter().map(|row| answer_labels(&row.response)).collect();
    let columns = parsed.iter().map(Vec::len).max().unwrap_or(0);

    let mut out = String::new();
    let mut fields: Vec<String> = vec![
        "Date".to_string(),
        "Control/Expose".to_string(),
        "Dimension 2".to_string(),
    ];
    fields.extend((1..=columns).map(&header));
    push_record(&mut out, &fields);

    for (row, answers) in rows.iter().zip(&parsed) {
        let mut fields = vec![
            row.created_at.format(DATE_FORMAT).to_string(),
            row.segmentation.clone(),
            String::new(),
        ];
        fields.extend((0..columns).map(|i| answers.get(i).copied().unwrap_or("").to_string()));
        push_record(&mut out, &fields);
    }

    out
}

fn push_record(out: &mut String, fields: &[String]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_field(field));
    }
    out.push('\n');
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
