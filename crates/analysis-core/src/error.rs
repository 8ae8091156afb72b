use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Unknown sector: {0}")]
    UnknownSector(String),

    #[error("Statement not found for {company_id} ({year})")]
    StatementNotFound { company_id: String, year: i32 },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("Task failed: {0}")]
    TaskFailed(String),
}
