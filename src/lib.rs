//! Resume-to-job fit scoring.
//!
//! A [`ResumeScorer`] binds one matching backend (sparse TF-IDF or dense
//! sentence embeddings) and turns a resume plus a job description into an
//! [`AnalysisResult`]: an overall 0–100 score, the similarity behind it,
//! keyword coverage, missing keywords and improvement suggestions.

pub mod backend;
pub mod batch;
pub mod config;
pub mod coverage;
pub mod embedding;
pub mod error;
pub mod extract;
pub mod jobs;
pub mod keywords;
pub mod parser;
pub mod report;
pub mod scorer;
pub mod scoring;
pub mod text;
pub mod tfidf;
pub mod utils;

pub use backend::{BackendKind, MatchBackend};
pub use config::ScorerConfig;
pub use coverage::CoverageStats;
pub use error::ScorerError;
pub use keywords::KeywordScore;
pub use scorer::ResumeScorer;
pub use scoring::AnalysisResult;
