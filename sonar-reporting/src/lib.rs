//! Reporting over collected survey responses.
//!
//! Responses arrive as warehouse rows whose `Response` field holds
//! pipe-delimited answer tokens. Each token carries a 2-character question
//! marker (`1:A`), so column *n* of a response is the answer to the *n*-th
//! question the respondent saw.
//!
//! - [`brand_lift_results`] - expose/control share and lift per column
//! - [`download_responses`] and [`download_responses_with_context`] - CSV exports
//! - [`SurveyActivity`] - index-page status derived from response counts
//! - [`format_percentage`] - display helper for shares and lift

mod activity;
mod csv;
mod format;
mod lift;
mod tokens;

pub use activity::{ActivityStatus, SegmentActivity, SurveyActivity};
pub use csv::{download_responses, download_responses_with_context};
pub use format::format_percentage;
pub use lift::{LiftTable, Segment, brand_lift_results};
pub use tokens::{answer_labels, segment_label};
