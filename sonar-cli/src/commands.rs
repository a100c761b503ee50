use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use sonar::{
    DocumentStore, LiftTable, ResponseWarehouse, ServiceError, SurveyService, SurveySummary,
    format_percentage,
};
use sonar_form_dialoguer::{DialoguerForm, FormError};
use tracing::info;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// List surveys with their response activity.
    List {
        /// Include archived surveys.
        #[arg(long)]
        all: bool,
    },

    /// Create a survey interactively.
    Create {
        /// Disable colored prompts.
        #[arg(long)]
        plain: bool,
    },

    /// Edit a survey interactively.
    Edit {
        id: String,

        /// Disable colored prompts.
        #[arg(long)]
        plain: bool,
    },

    /// Delete a survey. Deleting an unknown id succeeds.
    Delete { id: String },

    /// Hide a survey from the default list.
    Archive {
        id: String,

        /// Restore the survey instead.
        #[arg(long)]
        undo: bool,
    },

    /// Render the preview creative.
    Preview {
        id: String,

        /// Write the HTML here instead of stdout.
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Package the creatives as a zip of per-segmentation zips.
    ExportZip {
        id: String,

        /// Directory for the archive.
        #[arg(long, short = 'o', default_value = ".")]
        output: PathBuf,
    },

    /// Export all responses as CSV.
    ExportCsv {
        id: String,

        /// Use the question text as column headers.
        #[arg(long)]
        context: bool,

        /// Write the CSV here instead of stdout.
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Show brand-lift tables.
    Report {
        id: String,

        /// Print the tables as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Run a command. A missing survey prints a notice and the survey list
/// instead of failing, and so does a cancelled form.
pub fn run<S, W>(
    service: &SurveyService<S, W>,
    command: Command,
    today: NaiveDate,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    S: DocumentStore,
    W: ResponseWarehouse,
{
    match dispatch(service, command, today, out) {
        Err(ServiceFailure::Service(err)) if err.is_not_found() => {
            writeln!(out, "{err}")?;
            writeln!(out)?;
            list(service, today, false, out)
        }
        Err(ServiceFailure::Service(ServiceError::Form(err)))
            if matches!(err.downcast_ref::<FormError>(), Some(FormError::Cancelled)) =>
        {
            writeln!(out, "{err}")?;
            Ok(())
        }
        Err(ServiceFailure::Service(err)) => Err(err.into()),
        Err(ServiceFailure::Other(err)) => Err(err),
        Ok(()) => Ok(()),
    }
}

/// Keeps service errors matchable until `run` has looked at them.
enum ServiceFailure {
    Service(ServiceError),
    Other(anyhow::Error),
}

impl From<ServiceError> for ServiceFailure {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

impl From<anyhow::Error> for ServiceFailure {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err)
    }
}

impl From<std::io::Error> for ServiceFailure {
    fn from(err: std::io::Error) -> Self {
        Self::Other(err.into())
    }
}

impl From<serde_json::Error> for ServiceFailure {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(err.into())
    }
}

fn dispatch<S, W>(
    service: &SurveyService<S, W>,
    command: Command,
    today: NaiveDate,
    out: &mut impl Write,
) -> Result<(), ServiceFailure>
where
    S: DocumentStore,
    W: ResponseWarehouse,
{
    match command {
        Command::List { all } => list(service, today, all, out)?,
        Command::Create { plain } => {
            let id = service.create_with(&form(plain))?;
            writeln!(out, "Created survey {id}")?;
        }
        Command::Edit { id, plain } => {
            service.edit_with(&id, &form(plain))?;
            writeln!(out, "Saved survey {id}")?;
        }
        Command::Delete { id } => {
            service.delete(&id)?;
            writeln!(out, "Deleted survey {id}")?;
        }
        Command::Archive { id, undo } => {
            service.set_archived(&id, !undo)?;
            let verb = if undo { "Restored" } else { "Archived" };
            writeln!(out, "{verb} survey {id}")?;
        }
        Command::Preview { id, output } => {
            let html = service.preview(&id)?;
            emit(&html, output.as_deref(), out)?;
        }
        Command::ExportZip { id, output } => {
            let export = service.export_zip(&id, today)?;
            fs::create_dir_all(&output)
                .with_context(|| format!("creating {}", output.display()))?;
            let path = output.join(&export.file_name);
            fs::write(&path, &export.data)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), bytes = export.data.len(), "zip written");
            writeln!(out, "{}", path.display())?;
        }
        Command::ExportCsv {
            id,
            context,
            output,
        } => {
            let csv = if context {
                service.responses_csv_with_context(&id)?
            } else {
                service.responses_csv(&id)?
            };
            emit(&csv, output.as_deref(), out)?;
        }
        Command::Report { id, json } => {
            let report = service.report(&id)?;
            if json {
                let value = serde_json::json!({
                    "id": report.id,
                    "name": report.survey.name,
                    "tables": report.tables,
                });
                writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
            } else {
                writeln!(out, "{}", report.survey.name)?;
                if !report.survey.has_reporting() {
                    writeln!(out, "Brand-track surveys have no lift report.")?;
                }
                for table in &report.tables {
                    writeln!(out)?;
                    write_table(table, out)?;
                }
            }
        }
    }
    Ok(())
}

fn form(plain: bool) -> DialoguerForm {
    if plain {
        DialoguerForm::plain()
    } else {
        DialoguerForm::new()
    }
}

fn emit(text: &str, path: Option<&Path>, out: &mut impl Write) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            writeln!(out, "{}", path.display())?;
        }
        None => write!(out, "{text}")?,
    }
    Ok(())
}

fn list<S, W>(
    service: &SurveyService<S, W>,
    today: NaiveDate,
    all: bool,
    out: &mut impl Write,
) -> anyhow::Result<()>
where
    S: DocumentStore,
    W: ResponseWarehouse,
{
    let surveys = service.index(today, all)?;
    if surveys.is_empty() {
        writeln!(out, "No surveys.")?;
        return Ok(());
    }
    for summary in &surveys {
        writeln!(out, "{}", summary_line(summary))?;
    }
    Ok(())
}

fn summary_line(summary: &SurveySummary) -> String {
    let activity = &summary.activity;
    let last_change = if activity.last_change < 0 {
        "-".to_string()
    } else {
        format!("{}d", activity.last_change)
    };
    let mut line = format!(
        "{}  {:<12} {:>5} {:>7}  {}",
        summary.id,
        activity.status.text(),
        last_change,
        activity.total_responses(),
        summary.survey.name,
    );
    if summary.survey.archived {
        line.push_str(" (archived)");
    }
    line
}

fn write_table(table: &LiftTable, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "Response {}", table.column)?;
    write!(out, "{:<8}", "")?;
    for label in &table.labels {
        write!(out, " {label:>10}")?;
    }
    writeln!(out)?;
    for (name, values) in table.rows() {
        write!(out, "{name:<8}")?;
        for value in values {
            write!(out, " {:>10}", format_percentage(*value))?;
        }
        writeln!(out)?;
    }
    Ok(())
}
