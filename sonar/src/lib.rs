#![doc = include_str!("../README.md")]

// Re-export the model and the collaborator traits
pub use sonar_types::*;

pub use sonar_creative::{
    CreativeOptions, DEFAULT_CSS, PackageError, ZipExport, export_prefix, render_creative,
    segmentation_variants,
};
pub use sonar_reporting::{
    ActivityStatus, LiftTable, Segment, SegmentActivity, SurveyActivity, brand_lift_results,
    download_responses, download_responses_with_context, format_percentage,
};

mod service;
pub use service::{ServiceError, SurveyReport, SurveyService, SurveySummary};

pub mod store;
pub use store::{JsonDirStore, MemoryStore};

pub mod warehouse;
pub use warehouse::{JsonlWarehouse, MemoryWarehouse};

// Scripted form for driving create/edit without a terminal
mod scripted_form;
pub use scripted_form::{ScriptedForm, ScriptedFormError};
