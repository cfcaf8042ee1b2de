use thiserror::Error;

/// Errors raised by the scoring library.
///
/// Scoring itself never fails: only construction (bad configuration, model
/// loading) and the file-level helpers return these.
#[derive(Debug, Error)]
pub enum ScorerError {
    #[error("Unsupported backend: {0} (expected \"tfidf\" or \"bert\")")]
    UnsupportedBackend(String),

    #[error("Unsupported embedding model: {0}")]
    UnsupportedModel(String),

    #[error("Failed to load embedding model: {0}")]
    ModelLoad(String),

    #[error("Embedding error: {0}")]
    Encoding(String),

    #[error("Could not extract text from resume: {0}")]
    Extraction(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScorerError>;
