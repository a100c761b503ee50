/// Error type for survey model operations.
#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    /// A question slot number outside 1 to 5.
    #[error("Question slot must be between 1 and 5, got {0}")]
    InvalidSlot(u8),

    /// A next pointer that names no question slot.
    #[error("Not a question slot: '{0}'")]
    InvalidTarget(String),
}
