// src/tfidf.rs
use std::collections::HashMap;

pub const DEFAULT_MAX_FEATURES: usize = 5000;

#[derive(Debug, Clone)]
pub struct VectorizerConfig {
    pub ngram_range: (usize, usize),
    pub max_features: usize,
    /// Shorter tokens never become terms.
    pub min_token_len: usize,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            ngram_range: (1, 2),
            max_features: DEFAULT_MAX_FEATURES,
            min_token_len: 2,
        }
    }
}

impl VectorizerConfig {
    /// Builds the n-gram terms of a stop-word-free token sequence: all
    /// unigrams in order, then all bigrams, and so on.
    pub fn analyze(&self, tokens: &[String]) -> Vec<String> {
        let words: Vec<&str> = tokens
            .iter()
            .map(String::as_str)
            .filter(|w| w.len() >= self.min_token_len)
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n.max(1)..=max_n {
            if n > words.len() {
                break;
            }
            terms.extend(words.windows(n).map(|window| window.join(" ")));
        }
        terms
    }
}

/// Term indices follow first-seen order across the fitted documents.
pub struct TfIdf {
    config: VectorizerConfig,
    terms: Vec<String>,
    vocab: HashMap<String, usize>,
    idf: Vec<f64>,
}

pub struct TfIdfBuilder {
    config: VectorizerConfig,
    documents: Vec<Vec<String>>,
}

impl TfIdfBuilder {
    pub fn new(config: &VectorizerConfig) -> Self {
        Self {
            config: config.clone(),
            documents: Vec::new(),
        }
    }

    pub fn add(&mut self, tokens: &[String]) {
        self.documents.push(self.config.analyze(tokens));
    }

    pub fn build(self) -> TfIdf {
        let mut seen_order: Vec<String> = Vec::new();
        let mut term_count: HashMap<String, usize> = HashMap::new();
        let mut doc_count: HashMap<String, usize> = HashMap::new();

        // Build vocabulary and count document frequency
        for doc in &self.documents {
            let mut seen_terms = std::collections::HashSet::new();
            for term in doc {
                let count = term_count.entry(term.clone()).or_insert(0);
                if *count == 0 {
                    seen_order.push(term.clone());
                }
                *count += 1;

                if seen_terms.insert(term.as_str()) {
                    *doc_count.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        let terms = limit_features(seen_order, &term_count, self.config.max_features);

        // Smoothed IDF
        let total_docs = self.documents.len() as f64;
        let idf = terms
            .iter()
            .map(|term| {
                let df = doc_count.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + total_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let vocab = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();

        TfIdf {
            config: self.config,
            terms,
            vocab,
            idf,
        }
    }
}

/// Keeps the `max_features` most frequent terms, preserving first-seen order.
fn limit_features(
    seen_order: Vec<String>,
    term_count: &HashMap<String, usize>,
    max_features: usize,
) -> Vec<String> {
    if seen_order.len() <= max_features {
        return seen_order;
    }

    let mut by_count: Vec<usize> = (0..seen_order.len()).collect();
    by_count.sort_by_key(|&idx| std::cmp::Reverse(term_count[&seen_order[idx]]));
    let mut keep: Vec<usize> = by_count.into_iter().take(max_features).collect();
    keep.sort_unstable();

    keep.into_iter().map(|idx| seen_order[idx].clone()).collect()
}

impl TfIdf {
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocab.get(term).copied()
    }

    /// L2-normalized TF-IDF row of a document over this vocabulary. Terms
    /// outside the vocabulary are ignored; a document with none of them maps
    /// to the zero vector.
    pub fn transform(&self, tokens: &[String]) -> Vec<f64> {
        let mut row = vec![0.0; self.terms.len()];
        for term in self.config.analyze(tokens) {
            if let Some(idx) = self.index_of(&term) {
                row[idx] += 1.0;
            }
        }

        for (weight, idf) in row.iter_mut().zip(&self.idf) {
            *weight *= idf;
        }

        let norm = row.iter().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in row.iter_mut() {
                *weight /= norm;
            }
        }
        row
    }

    /// Weight of `term` within a row produced by [`TfIdf::transform`].
    pub fn tf_idf(&self, term: &str, row: &[f64]) -> Option<f64> {
        self.index_of(term).and_then(|idx| row.get(idx).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn fit(docs: &[&str], config: &VectorizerConfig) -> TfIdf {
        let mut builder = TfIdfBuilder::new(config);
        for doc in docs {
            builder.add(&tokens(doc));
        }
        builder.build()
    }

    #[test]
    fn test_analyze_builds_unigrams_then_bigrams() {
        let terms = VectorizerConfig::default().analyze(&tokens("python sql docker"));
        assert_eq!(
            terms,
            vec!["python", "sql", "docker", "python sql", "sql docker"]
        );
    }

    #[test]
    fn test_analyze_skips_single_letter_tokens() {
        let terms = VectorizerConfig::default().analyze(&tokens("r python"));
        assert_eq!(terms, vec!["python"]);
    }

    #[test]
    fn test_vocabulary_is_first_seen_order() {
        let model = fit(&["rust tokio", "serde rust"], &VectorizerConfig::default());
        assert_eq!(
            model.terms(),
            &["rust", "tokio", "rust tokio", "serde", "serde rust"]
        );
    }

    #[test]
    fn test_single_document_idf_is_constant() {
        let model = fit(&["aws aws kubernetes"], &VectorizerConfig::default());
        let row = model.transform(&tokens("aws aws kubernetes"));
        let aws = model.tf_idf("aws", &row).unwrap();
        let k8s = model.tf_idf("kubernetes", &row).unwrap();
        assert!((aws - 2.0 * k8s).abs() < 1e-12);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let model = fit(&["java spring boot", "java kotlin"], &VectorizerConfig::default());
        let row = model.transform(&tokens("java spring kotlin"));
        let norm: f64 = row.iter().map(|w| w * w).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rarer_terms_weigh_more() {
        let model = fit(&["java spring", "java kotlin"], &VectorizerConfig::default());
        let row = model.transform(&tokens("java spring"));
        assert!(model.tf_idf("spring", &row).unwrap() > model.tf_idf("java", &row).unwrap());
    }

    #[test]
    fn test_unknown_terms_map_to_zero_row() {
        let model = fit(&["golang"], &VectorizerConfig::default());
        assert_eq!(model.transform(&tokens("haskell")), vec![0.0]);
        assert_eq!(model.tf_idf("haskell", &[0.0]), None);
    }

    #[test]
    fn test_max_features_keeps_most_frequent() {
        let config = VectorizerConfig {
            ngram_range: (1, 1),
            max_features: 2,
            min_token_len: 2,
        };
        let model = fit(&["aa bb cc cc bb cc"], &config);
        assert_eq!(model.terms(), &["bb", "cc"]);
    }

    #[test]
    fn test_empty_corpus() {
        let model = fit(&[""], &VectorizerConfig::default());
        assert!(model.is_empty());
        assert!(model.transform(&tokens("anything")).is_empty());
    }
}
