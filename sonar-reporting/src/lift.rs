use std::collections::BTreeSet;

use serde::Serialize;
use sonar_types::ResponseRow;
use tracing::debug;

use crate::tokens::{answer_labels, segment_label};

/// Experiment arm of a brand-lift survey, after prefix stripping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Expose,
    Control,
}

impl Segment {
    /// Table row order: expose first.
    pub const ALL: [Segment; 2] = [Self::Expose, Self::Control];

    pub fn label(self) -> &'static str {
        match self {
            Self::Expose => "expose",
            Self::Control => "control",
        }
    }

    /// Match a stripped segmentation label. Other labels (`preview`, empty)
    /// are not part of the experiment.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|segment| segment.label() == label)
    }
}

/// Share and lift table for one response column.
///
/// `expose`, `control` and `lift` are parallel to `labels`. A segment with no
/// answers in this column has `NaN` shares. Lift is undefined when the
/// control share is 0 and then holds `inf` or `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiftTable {
    /// 1-based response column.
    pub column: usize,
    /// Distinct answer labels, sorted.
    pub labels: Vec<String>,
    pub expose: Vec<f64>,
    pub control: Vec<f64>,
    pub lift: Vec<f64>,
}

impl LiftTable {
    pub fn shares(&self, segment: Segment) -> &[f64] {
        match segment {
            Segment::Expose => &self.expose,
            Segment::Control => &self.control,
        }
    }

    pub fn share(&self, segment: Segment, label: &str) -> Option<f64> {
        self.position(label).map(|i| self.shares(segment)[i])
    }

    pub fn lift_for(&self, label: &str) -> Option<f64> {
        self.position(label).map(|i| self.lift[i])
    }

    /// The three rows in display order, with their names.
    pub fn rows(&self) -> [(&'static str, &[f64]); 3] {
        [
            (Segment::Expose.label(), self.expose.as_slice()),
            (Segment::Control.label(), self.control.as_slice()),
            ("lift", self.lift.as_slice()),
        ]
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }
}

/// Build one [`LiftTable`] per response column, in column order.
///
/// Rows with no response contribute nothing; no responses at all yields an
/// empty result.
pub fn brand_lift_results(rows: &[ResponseRow]) -> Vec<LiftTable> {
    let parsed: Vec<(Option<Segment>, Vec<&str>)> = rows
        .iter()
        .map(|row| {
            (
                Segment::from_label(segment_label(&row.segmentation)),
                answer_labels(&row.response),
            )
        })
        .collect();

    let columns = parsed.iter().map(|(_, labels)| labels.len()).max().unwrap_or(0);
    debug!(rows = rows.len(), columns, "computing brand lift");

    (0..columns)
        .map(|column| column_table(&parsed, column))
        .collect()
}

fn column_table(parsed: &[(Option<Segment>, Vec<&str>)], column: usize) -> LiftTable {
    let labels: Vec<String> = parsed
        .iter()
        .filter_map(|(_, answers)| answers.get(column).copied())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_owned)
        .collect();

    let shares = |segment: Segment| -> Vec<f64> {
        let mut counts = vec![0u64; labels.len()];
        for (_, answers) in parsed.iter().filter(|(s, _)| *s == Some(segment)) {
            if let Some(answer) = answers.get(column)
                && let Some(i) = labels.iter().position(|label| label == answer)
            {
                counts[i] += 1;
            }
        }
        let total: u64 = counts.iter().sum();
        counts
            .into_iter()
            .map(|count| count as f64 / total as f64)
            .collect()
    };

    let expose = shares(Segment::Expose);
    let control = shares(Segment::Control);
    let lift = expose
        .iter()
        .zip(&control)
        .map(|(e, c)| (e - c) / c)
        .collect();

    LiftTable {
        column: column + 1,
        labels,
        expose,
        control,
        lift,
    }
}
