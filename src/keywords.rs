use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_N: usize = 20;

/// A job or resume term together with how important it is in its document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordScore {
    pub term: String,
    pub importance: f64,
}

impl KeywordScore {
    pub fn new(term: impl Into<String>, importance: f64) -> Self {
        Self {
            term: term.into(),
            importance,
        }
    }
}

/// Sorts by importance descending and truncates to `top_n`.
///
/// The sort is stable, so equal importances keep the order they were
/// produced in (first occurrence in the document).
pub fn rank_keywords(mut keywords: Vec<KeywordScore>, top_n: usize) -> Vec<KeywordScore> {
    keywords.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    keywords.truncate(top_n);
    keywords
}

/// Frequency keywords: importance is the raw occurrence count of each
/// distinct token.
pub fn frequency_keywords(tokens: &[String], top_n: usize) -> Vec<KeywordScore> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<KeywordScore> = Vec::new();

    for token in tokens {
        match positions.get(token.as_str()) {
            Some(&idx) => counts[idx].importance += 1.0,
            None => {
                positions.insert(token, counts.len());
                counts.push(KeywordScore::new(token.clone(), 1.0));
            }
        }
    }

    rank_keywords(counts, top_n)
}
