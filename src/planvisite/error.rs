use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Visit index {index} out of range (list has {len})")]
    Index { index: usize, len: usize },

    #[error("Format error: {0}")]
    Format(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl PlanError {
    pub fn validation(msg: impl Into<String>) -> Self {
        PlanError::Validation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
