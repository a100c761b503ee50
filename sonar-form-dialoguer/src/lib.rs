//! # sonar-form-dialoguer
//!
//! Dialoguer form backend for sonar.
//!
//! Walks the operator through a survey in the terminal: global settings
//! first, then each of the five question slots. Leaving a question's text
//! empty leaves the slot blank. After the last slot the survey is validated;
//! problems are listed and the form starts over with the entered values
//! pre-filled.
//!
//! ## Example
//!
//! ```no_run
//! use sonar::{JsonDirStore, JsonlWarehouse, SurveyService};
//! use sonar_form_dialoguer::DialoguerForm;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = SurveyService::new(
//!         JsonDirStore::open("data/surveys")?,
//!         JsonlWarehouse::open("data/responses.jsonl"),
//!     );
//!     let id = service.create_with(&DialoguerForm::new())?;
//!     println!("Created survey {id}");
//!     Ok(())
//! }
//! ```

mod form;

pub use form::{DialoguerForm, FormError};
