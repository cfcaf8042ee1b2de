use anyhow::{Context, Result};

use crate::coverage::{DEFAULT_MISSING_THRESHOLD, DEFAULT_STRONG_THRESHOLD};
use crate::keywords::DEFAULT_TOP_N;
use crate::tfidf::DEFAULT_MAX_FEATURES;

/// Scorer settings. `backend` and `embedding_model` are plain names so they
/// can come straight from env vars or flags; `ResumeScorer::new` validates
/// them.
#[derive(Debug, Clone)]
pub struct ScorerConfig {
    /// "tfidf" or "bert"
    pub backend: String,
    pub top_n: usize,
    pub missing_threshold: f64,
    pub strong_threshold: f64,
    pub max_features: usize,
    pub embedding_model: String,
    pub use_gpu: bool,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            backend: "tfidf".to_string(),
            top_n: DEFAULT_TOP_N,
            missing_threshold: DEFAULT_MISSING_THRESHOLD,
            strong_threshold: DEFAULT_STRONG_THRESHOLD,
            max_features: DEFAULT_MAX_FEATURES,
            embedding_model: "all-mini-lm-l6-v2".to_string(),
            use_gpu: false,
        }
    }
}

/// Application configuration loaded from environment variables, with
/// defaults for anything unset.
#[derive(Debug, Clone)]
pub struct Config {
    pub scorer: ScorerConfig,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = ScorerConfig::default();
        Ok(Config {
            scorer: ScorerConfig {
                backend: std::env::var("SCORER_BACKEND").unwrap_or(defaults.backend),
                top_n: parse_env("SCORER_TOP_N")?.unwrap_or(defaults.top_n),
                missing_threshold: parse_env("SCORER_MISSING_THRESHOLD")?
                    .unwrap_or(defaults.missing_threshold),
                strong_threshold: parse_env("SCORER_STRONG_THRESHOLD")?
                    .unwrap_or(defaults.strong_threshold),
                max_features: parse_env("SCORER_MAX_FEATURES")?.unwrap_or(defaults.max_features),
                embedding_model: std::env::var("SCORER_EMBEDDING_MODEL")
                    .unwrap_or(defaults.embedding_model),
                use_gpu: parse_env("SCORER_USE_GPU")?.unwrap_or(defaults.use_gpu),
            },
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {value}")),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScorerConfig::default();
        assert_eq!(config.backend, "tfidf");
        assert_eq!(config.top_n, 20);
        assert_eq!(config.missing_threshold, 0.1);
        assert_eq!(config.strong_threshold, 0.5);
        assert_eq!(config.max_features, 5000);
        assert!(!config.use_gpu);
    }

    #[test]
    fn test_parse_env_values() {
        std::env::set_var("RESUME_SCORER_TEST_TOP_N", "15");
        std::env::set_var("RESUME_SCORER_TEST_BAD", "many");
        assert_eq!(parse_env::<usize>("RESUME_SCORER_TEST_TOP_N").unwrap(), Some(15));
        assert!(parse_env::<usize>("RESUME_SCORER_TEST_BAD").is_err());
        assert_eq!(parse_env::<usize>("RESUME_SCORER_TEST_UNSET").unwrap(), None);
    }
}
