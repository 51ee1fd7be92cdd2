use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchGapError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for BenchGapError {
    fn from(e: serde_json::Error) -> Self {
        BenchGapError::SerializationError(e.to_string())
    }
}
