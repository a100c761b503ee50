//! Zip packaging of rendered creatives.

use std::io::{Cursor, Write};

use chrono::NaiveDate;
use sonar_types::{Survey, SurveyType};
use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::{CreativeOptions, render_creative};

/// Error type for zip export.
#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    /// The creative could not be rendered.
    #[error("Creative rendering failed: {0}")]
    Render(#[from] serde_json::Error),

    #[error("Creative packaging I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// A finished export: the outer archive's file name and bytes.
#[derive(Debug, Clone)]
pub struct ZipExport {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// `{YYYYMMDD}_{survey name with spaces replaced by dashes}`.
///
/// Path separators become dashes too, so the prefix is always a single
/// file name.
pub fn export_prefix(survey: &Survey, date: NaiveDate) -> String {
    let name = survey.name.replace([' ', '/', '\\'], "-");
    format!("{}_{name}", date.format("%Y%m%d"))
}

/// The segmentation labels rendered for a survey type.
///
/// Brand track renders one creative with an empty label; every other type
/// renders a control and an exposed variant.
pub fn segmentation_variants(survey_type: SurveyType) -> &'static [&'static str] {
    match survey_type {
        SurveyType::BrandTrack => &[""],
        SurveyType::BrandLift => &["default_control", "default_expose"],
    }
}

/// Render every segmentation variant and bundle them into one archive.
///
/// Each variant becomes `{prefix}_{segmentation}.zip` holding `index.html`;
/// the variants are stored flat inside `{prefix}.zip`. Archives are built
/// in memory, so concurrent exports share nothing.
pub fn export_zip(
    survey: &Survey,
    survey_id: &str,
    receiver_url: Option<&str>,
    date: NaiveDate,
) -> Result<ZipExport, PackageError> {
    let prefix = export_prefix(survey, date);

    let mut inner = Vec::new();
    for segmentation in segmentation_variants(survey.survey_type) {
        let options = CreativeOptions::new(survey_id)
            .with_segmentation(*segmentation)
            .with_receiver_url(receiver_url.map(str::to_string));
        let html = render_creative(survey, &options)?;

        let name = format!("{prefix}_{segmentation}.zip");
        let bytes = build_archive([("index.html".to_string(), html.into_bytes())])?;
        debug!(survey_id, segmentation, archive = %name, "rendered creative variant");
        inner.push((name, bytes));
    }

    let data = build_archive(inner)?;
    debug!(survey_id, bytes = data.len(), "packaged creative export");
    Ok(ZipExport {
        file_name: format!("{prefix}.zip"),
        data,
    })
}

fn build_archive(
    entries: impl IntoIterator<Item = (String, Vec<u8>)>,
) -> Result<Vec<u8>, PackageError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, bytes) in entries {
        zip.start_file(name, options)?;
        zip.write_all(&bytes)?;
    }

    Ok(zip.finish()?.into_inner())
}
