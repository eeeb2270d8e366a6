use thiserror::Error;

/// Error type that captures common tracker failures.
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid amount `{0}`: expected a positive number")]
    InvalidAmount(String),
    #[error("Unknown category `{0}`")]
    UnknownCategory(String),
    #[error("Receipt ingestion failed: {0}")]
    Ingest(String),
}
