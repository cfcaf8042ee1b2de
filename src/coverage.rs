use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::keywords::KeywordScore;

pub const DEFAULT_MISSING_THRESHOLD: f64 = 0.1;
pub const DEFAULT_STRONG_THRESHOLD: f64 = 0.5;

/// `strong_matches` is tallied separately from `matched_keywords`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CoverageStats {
    pub coverage_percentage: f64,
    pub strong_match_percentage: f64,
    pub total_keywords: usize,
    pub matched_keywords: usize,
    pub strong_matches: usize,
}

impl CoverageStats {
    pub fn from_counts(total_keywords: usize, matched_keywords: usize, strong_matches: usize) -> Self {
        Self {
            coverage_percentage: percentage(matched_keywords, total_keywords),
            strong_match_percentage: percentage(strong_matches, total_keywords),
            total_keywords,
            matched_keywords,
            strong_matches,
        }
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeywordVerdict {
    pub matched: bool,
    pub strong: bool,
}

/// Counts matched and strong keywords using a backend-specific judge.
pub fn tally<F>(job_keywords: &[KeywordScore], mut judge: F) -> CoverageStats
where
    F: FnMut(&KeywordScore) -> KeywordVerdict,
{
    let mut matched = 0;
    let mut strong = 0;
    for keyword in job_keywords {
        let verdict = judge(keyword);
        if verdict.matched {
            matched += 1;
        }
        if verdict.strong {
            strong += 1;
        }
    }
    CoverageStats::from_counts(job_keywords.len(), matched, strong)
}

/// Job keywords judged absent, in the job keywords' own order.
pub fn missing_terms<F>(job_keywords: &[KeywordScore], mut is_missing: F) -> Vec<String>
where
    F: FnMut(&KeywordScore) -> bool,
{
    job_keywords
        .iter()
        .filter(|keyword| is_missing(keyword))
        .map(|keyword| keyword.term.clone())
        .collect()
}

/// Literal token presence: a keyword is matched when the resume contains the
/// token, and strong when it is matched and its job importance is above
/// `strong_threshold`.
pub fn presence_verdict(
    keyword: &KeywordScore,
    resume_tokens: &HashSet<&str>,
    strong_threshold: f64,
) -> KeywordVerdict {
    let matched = resume_tokens.contains(keyword.term.as_str());
    KeywordVerdict {
        matched,
        strong: matched && keyword.importance > strong_threshold,
    }
}
