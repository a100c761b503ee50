//! HTML creative generator for sonar surveys.
//!
//! A creative is a single self-contained `index.html`: the survey's question
//! nodes as embedded JSON, the stylesheet inlined, and a small navigation
//! script that walks the branch graph and posts answers to a receiver.
//!
//! # Example
//!
//! ```
//! use sonar_creative::{CreativeOptions, render_creative};
//! use sonar_types::{Answer, AnswerLetter, Question, QuestionSlot, Survey};
//!
//! let survey = Survey::new("Spring Promo").with_question(
//!     QuestionSlot::ENTRY,
//!     Question::new("Have you seen our ad?")
//!         .with_answer(AnswerLetter::A, Answer::ending("Yes"))
//!         .with_answer(AnswerLetter::B, Answer::ending("No")),
//! );
//!
//! let html = render_creative(&survey, &CreativeOptions::preview("abc123")).unwrap();
//! assert!(html.contains("Have you seen our ad?"));
//! ```
//!
//! [`export_zip`] bundles one creative per segmentation variant for upload
//! to an ad server.

mod assets;
mod generator;
mod package;

pub use assets::DEFAULT_CSS;
pub use generator::{CreativeOptions, PREVIEW_SEGMENTATION, render_creative};
pub use package::{PackageError, ZipExport, export_prefix, export_zip, segmentation_variants};
