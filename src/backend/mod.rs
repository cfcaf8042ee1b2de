
pub mod embedding;
pub mod tfidf;

use std::fmt;
use std::str::FromStr;

use crate::coverage::CoverageStats;
use crate::error::ScorerError;
use crate::keywords::KeywordScore;

pub use embedding::EmbeddingBackend;
pub use tfidf::TfidfBackend;

/// Degenerate input (empty or stop-word-only text) yields zero values
/// instead of an error.
pub trait MatchBackend: Send + Sync {
    fn kind(&self) -> BackendKind;

    /// Ranked keywords of `text`, importance descending, at most `top_n`.
    fn extract_keywords(&self, text: &str, top_n: usize) -> Vec<KeywordScore>;

    /// Similarity in [0, 1]; symmetric in its arguments.
    fn compute_similarity(&self, text_a: &str, text_b: &str) -> f64;

    /// Job keywords judged absent from the resume, in job keyword order.
    fn get_missing_keywords(
        &self,
        resume_text: &str,
        job_description: &str,
        threshold: f64,
    ) -> Vec<String>;

    fn get_keyword_coverage(&self, resume_text: &str, job_description: &str) -> CoverageStats;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Tfidf,
    Bert,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Tfidf => "tfidf",
            BackendKind::Bert => "bert",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = ScorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tfidf" => Ok(BackendKind::Tfidf),
            "bert" => Ok(BackendKind::Bert),
            _ => Err(ScorerError::UnsupportedBackend(s.to_string())),
        }
    }
}
