use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::backend::MatchBackend;
use crate::coverage::CoverageStats;

pub const SIMILARITY_WEIGHT: f64 = 0.4;
pub const COVERAGE_WEIGHT: f64 = 0.6;

/// Suggestions fire below these percentages.
pub const COVERAGE_SUGGESTION_BELOW: f64 = 70.0;
pub const STRONG_MATCH_SUGGESTION_BELOW: f64 = 30.0;

const SUGGESTED_KEYWORDS: usize = 5;

pub const EXTRACTION_FAILED_SUGGESTION: &str = "Error: Could not extract text from resume";
pub const EXPAND_RESUME_SUGGESTION: &str = "Expand your resume to better match the job requirements";
pub const HIGHLIGHT_EXPERIENCE_SUGGESTION: &str =
    "Highlight your relevant experience more prominently";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// 0 – 100
    pub overall_score: f64,
    /// 0 – 1
    pub similarity_score: f64,
    pub missing_keywords: Vec<String>,
    pub coverage_stats: CoverageStats,
    pub improvement_suggestions: Vec<String>,
}

impl AnalysisResult {
    /// Zero-score result for a resume whose text could not be read.
    pub fn extraction_failed() -> Self {
        Self {
            overall_score: 0.0,
            similarity_score: 0.0,
            missing_keywords: vec![],
            coverage_stats: CoverageStats::default(),
            improvement_suggestions: vec![EXTRACTION_FAILED_SUGGESTION.to_string()],
        }
    }

    /// Coverage as a fraction in [0, 1].
    pub fn keyword_score(&self) -> f64 {
        self.coverage_stats.coverage_percentage / 100.0
    }
}

/// Weighted combination of similarity (scaled to 0 – 100) and coverage.
pub fn overall_score(similarity_score: f64, coverage_percentage: f64) -> f64 {
    similarity_score * (SIMILARITY_WEIGHT * 100.0) + coverage_percentage * COVERAGE_WEIGHT
}

/// Evaluates every rule in order; one rule firing never suppresses another.
pub fn improvement_suggestions(missing_keywords: &[String], coverage: &CoverageStats) -> Vec<String> {
    let mut suggestions = Vec::new();

    if !missing_keywords.is_empty() {
        let shown: Vec<&str> = missing_keywords
            .iter()
            .take(SUGGESTED_KEYWORDS)
            .map(String::as_str)
            .collect();
        suggestions.push(format!("Add experience with: {}", shown.join(", ")));
    }

    if coverage.coverage_percentage < COVERAGE_SUGGESTION_BELOW {
        suggestions.push(EXPAND_RESUME_SUGGESTION.to_string());
    }

    if coverage.strong_match_percentage < STRONG_MATCH_SUGGESTION_BELOW {
        suggestions.push(HIGHLIGHT_EXPERIENCE_SUGGESTION.to_string());
    }

    suggestions
}

/// `None` or blank resume text yields [`AnalysisResult::extraction_failed`].
pub fn analyze(
    backend: &dyn MatchBackend,
    resume_text: Option<&str>,
    job_description: &str,
    missing_threshold: f64,
) -> AnalysisResult {
    let Some(resume_text) = resume_text.filter(|text| !text.trim().is_empty()) else {
        warn!("No resume text to analyze");
        return AnalysisResult::extraction_failed();
    };

    let similarity_score = backend.compute_similarity(resume_text, job_description);
    let missing_keywords =
        backend.get_missing_keywords(resume_text, job_description, missing_threshold);
    let coverage_stats = backend.get_keyword_coverage(resume_text, job_description);
    let overall_score = overall_score(similarity_score, coverage_stats.coverage_percentage);
    let improvement_suggestions = improvement_suggestions(&missing_keywords, &coverage_stats);

    debug!(
        backend = %backend.kind(),
        overall_score,
        similarity_score,
        coverage = coverage_stats.coverage_percentage,
        missing = missing_keywords.len(),
        "resume analyzed"
    );

    AnalysisResult {
        overall_score,
        similarity_score,
        missing_keywords,
        coverage_stats,
        improvement_suggestions,
    }
}
