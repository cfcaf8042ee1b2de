//! Dense-embedding backend.
//!
//! Similarity is the cosine of two document embeddings. Keywords are raw
//! token frequencies and coverage is literal token presence.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::backend::{BackendKind, MatchBackend};
use crate::coverage::{self, CoverageStats};
use crate::embedding::Encoder;
use crate::error::Result;
use crate::keywords::{frequency_keywords, KeywordScore};
use crate::text::{Document, TextNormalizer};
use crate::utils::{compute_cosine_similarity, unit_similarity};

pub struct EmbeddingBackend {
    normalizer: TextNormalizer,
    encoder: Box<dyn Encoder>,
    top_n: usize,
    strong_threshold: f64,
}

impl EmbeddingBackend {
    pub fn new(encoder: Box<dyn Encoder>, top_n: usize, strong_threshold: f64) -> Result<Self> {
        Ok(Self {
            normalizer: TextNormalizer::new()?,
            encoder,
            top_n,
            strong_threshold,
        })
    }

    fn job_keywords(&self, job_description: &str) -> Vec<KeywordScore> {
        self.extract_keywords(job_description, self.top_n)
    }
}

impl MatchBackend for EmbeddingBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Bert
    }

    fn extract_keywords(&self, text: &str, top_n: usize) -> Vec<KeywordScore> {
        let doc = Document::new(text, &self.normalizer);
        frequency_keywords(&doc.tokens, top_n)
    }

    fn compute_similarity(&self, text_a: &str, text_b: &str) -> f64 {
        let a = self.normalizer.normalize(text_a);
        let b = self.normalizer.normalize(text_b);
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let embeddings = match self.encoder.encode(&[a.as_str(), b.as_str()]) {
            Ok(embeddings) => embeddings,
            Err(e) => {
                warn!("Embedding failed, similarity set to 0: {e}");
                return 0.0;
            }
        };

        let [emb_a, emb_b] = embeddings.as_slice() else {
            warn!("Encoder returned {} embeddings for 2 texts", embeddings.len());
            return 0.0;
        };
        if emb_a.len() != emb_b.len() {
            warn!("Embedding sizes differ: {} vs {}", emb_a.len(), emb_b.len());
            return 0.0;
        }

        let to_f64 = |v: &[f32]| v.iter().map(|&x| x as f64).collect::<Vec<_>>();
        let similarity = unit_similarity(compute_cosine_similarity(
            &to_f64(emb_a.as_slice()),
            &to_f64(emb_b.as_slice()),
        ));
        debug!(dimension = emb_a.len(), similarity, "embedding similarity");
        similarity
    }

    fn get_missing_keywords(
        &self,
        resume_text: &str,
        job_description: &str,
        _threshold: f64,
    ) -> Vec<String> {
        let resume = Document::new(resume_text, &self.normalizer);
        let resume_tokens: HashSet<&str> = resume.tokens.iter().map(String::as_str).collect();
        coverage::missing_terms(&self.job_keywords(job_description), |keyword| {
            !resume_tokens.contains(keyword.term.as_str())
        })
    }

    fn get_keyword_coverage(&self, resume_text: &str, job_description: &str) -> CoverageStats {
        let resume = Document::new(resume_text, &self.normalizer);
        let resume_tokens: HashSet<&str> = resume.tokens.iter().map(String::as_str).collect();
        coverage::tally(&self.job_keywords(job_description), |keyword| {
            coverage::presence_verdict(keyword, &resume_tokens, self.strong_threshold)
        })
    }
}
