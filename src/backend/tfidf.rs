//! Keyword importance comes from a vocabulary fitted on the job description
//! alone, so IDF is constant within a call.

use tracing::debug;

use crate::backend::{BackendKind, MatchBackend};
use crate::coverage::{self, CoverageStats, KeywordVerdict};
use crate::error::Result;
use crate::keywords::{rank_keywords, KeywordScore};
use crate::text::{Document, TextNormalizer, ENGLISH_STOP_WORDS};
use crate::tfidf::{TfIdf, TfIdfBuilder, VectorizerConfig};
use crate::utils::{compute_cosine_similarity, unit_similarity};

/// Every call fits its own [`TfIdf`].
pub struct TfidfBackend {
    normalizer: TextNormalizer,
    vectorizer: VectorizerConfig,
    top_n: usize,
    strong_threshold: f64,
}

struct ResumeWeights {
    keywords: Vec<KeywordScore>,
    model: TfIdf,
    row: Vec<f64>,
}

impl ResumeWeights {
    fn weight(&self, keyword: &KeywordScore) -> Option<f64> {
        self.model.tf_idf(&keyword.term, &self.row)
    }
}

impl TfidfBackend {
    pub fn new(vectorizer: VectorizerConfig, top_n: usize, strong_threshold: f64) -> Result<Self> {
        Ok(Self {
            normalizer: TextNormalizer::with_stop_words(ENGLISH_STOP_WORDS)?,
            vectorizer,
            top_n,
            strong_threshold,
        })
    }

    fn fit(&self, docs: &[&Document]) -> TfIdf {
        let mut builder = TfIdfBuilder::new(&self.vectorizer);
        for doc in docs {
            builder.add(&doc.tokens);
        }
        builder.build()
    }

    fn keywords_of(&self, doc: &Document, top_n: usize) -> (TfIdf, Vec<KeywordScore>) {
        let model = self.fit(&[doc]);
        let row = model.transform(&doc.tokens);
        let scores = model
            .terms()
            .iter()
            .zip(row)
            .map(|(term, weight)| KeywordScore::new(term.clone(), weight))
            .collect();
        (model, rank_keywords(scores, top_n))
    }

    fn resume_weights(&self, resume_text: &str, job_description: &str) -> ResumeWeights {
        let job = Document::new(job_description, &self.normalizer);
        let resume = Document::new(resume_text, &self.normalizer);
        let (model, keywords) = self.keywords_of(&job, self.top_n);
        let row = model.transform(&resume.tokens);
        ResumeWeights { keywords, model, row }
    }
}

impl MatchBackend for TfidfBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Tfidf
    }

    fn extract_keywords(&self, text: &str, top_n: usize) -> Vec<KeywordScore> {
        let doc = Document::new(text, &self.normalizer);
        self.keywords_of(&doc, top_n).1
    }

    fn compute_similarity(&self, text_a: &str, text_b: &str) -> f64 {
        let a = Document::new(text_a, &self.normalizer);
        let b = Document::new(text_b, &self.normalizer);
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let model = self.fit(&[&a, &b]);
        let similarity = unit_similarity(compute_cosine_similarity(
            &model.transform(&a.tokens),
            &model.transform(&b.tokens),
        ));
        debug!(vocabulary = model.terms().len(), similarity, "tfidf similarity");
        similarity
    }

    fn get_missing_keywords(
        &self,
        resume_text: &str,
        job_description: &str,
        threshold: f64,
    ) -> Vec<String> {
        let weights = self.resume_weights(resume_text, job_description);
        coverage::missing_terms(&weights.keywords, |keyword| {
            weights.weight(keyword).is_some_and(|w| w < threshold)
        })
    }

    fn get_keyword_coverage(&self, resume_text: &str, job_description: &str) -> CoverageStats {
        let weights = self.resume_weights(resume_text, job_description);
        coverage::tally(&weights.keywords, |keyword| match weights.weight(keyword) {
            Some(w) => KeywordVerdict {
                matched: w > 0.0,
                strong: w > self.strong_threshold,
            },
            None => KeywordVerdict::default(),
        })
    }
}
