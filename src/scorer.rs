use std::path::Path;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::backend::{BackendKind, EmbeddingBackend, MatchBackend, TfidfBackend};
use crate::config::ScorerConfig;
use crate::embedding::{BertEncoder, EmbeddingModel};
use crate::error::{Result, ScorerError};
use crate::extract::{FileTextExtractor, TextExtractor};
use crate::parser::{ParsedResume, ResumeParser};
use crate::scoring::{self, AnalysisResult};
use crate::tfidf::VectorizerConfig;

/// Parsed resume structure alongside its score.
#[derive(Debug, Clone, Serialize)]
pub struct DetailedAnalysis {
    pub resume: ParsedResume,
    pub analysis: AnalysisResult,
}

/// Scores resumes on disk against job descriptions with one backend.
pub struct ResumeScorer {
    backend: Box<dyn MatchBackend>,
    extractor: Box<dyn TextExtractor>,
    parser: ResumeParser,
    missing_threshold: f64,
}

impl ResumeScorer {
    /// Validates the backend name and builds that backend, loading the
    /// embedding model up front for `bert`.
    pub fn new(config: &ScorerConfig) -> Result<Self> {
        let kind: BackendKind = config.backend.parse()?;
        info!("Initializing {kind} backend");

        let backend: Box<dyn MatchBackend> = match kind {
            BackendKind::Tfidf => {
                let vectorizer = VectorizerConfig {
                    max_features: config.max_features,
                    ..VectorizerConfig::default()
                };
                Box::new(TfidfBackend::new(
                    vectorizer,
                    config.top_n,
                    config.strong_threshold,
                )?)
            }
            BackendKind::Bert => {
                let model: EmbeddingModel = config.embedding_model.parse()?;
                let encoder = BertEncoder::load(model, config.use_gpu)?;
                Box::new(EmbeddingBackend::new(
                    Box::new(encoder),
                    config.top_n,
                    config.strong_threshold,
                )?)
            }
        };

        Self::with_backend(backend, config)
    }

    /// Uses an already constructed backend; `config.backend` is not consulted.
    pub fn with_backend(backend: Box<dyn MatchBackend>, config: &ScorerConfig) -> Result<Self> {
        Ok(Self {
            backend,
            extractor: Box::new(FileTextExtractor),
            parser: ResumeParser::new()?,
            missing_threshold: config.missing_threshold,
        })
    }

    pub fn with_extractor(mut self, extractor: Box<dyn TextExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn backend(&self) -> &dyn MatchBackend {
        self.backend.as_ref()
    }

    pub fn kind(&self) -> BackendKind {
        self.backend.kind()
    }

    pub fn extract_text(&self, resume_path: &Path) -> Option<String> {
        self.extractor.extract_text(resume_path)
    }

    /// Scores already extracted text; `None` marks a failed extraction.
    pub fn analyze_text(&self, resume_text: Option<&str>, job_description: &str) -> AnalysisResult {
        scoring::analyze(
            self.backend.as_ref(),
            resume_text,
            job_description,
            self.missing_threshold,
        )
    }

    pub fn analyze_resume(&self, resume_path: &Path, job_description: &str) -> AnalysisResult {
        let resume_text = self.extract_text(resume_path);
        self.analyze_text(resume_text.as_deref(), job_description)
    }

    pub fn get_detailed_analysis(
        &self,
        resume_path: &Path,
        job_description: &str,
    ) -> Result<DetailedAnalysis> {
        let text = self
            .extract_text(resume_path)
            .ok_or_else(|| ScorerError::Extraction(resume_path.display().to_string()))?;

        Ok(DetailedAnalysis {
            analysis: self.analyze_text(Some(text.as_str()), job_description),
            resume: self.parser.parse(&text),
        })
    }

    /// Ranks resumes by overall score, best first. Every path gets an entry;
    /// unreadable resumes score 0. Equal scores keep input order.
    pub fn compare_resumes<P>(&self, resume_paths: &[P], job_description: &str) -> Vec<(String, f64)>
    where
        P: AsRef<Path> + Sync,
    {
        let mut resume_scores: Vec<(String, f64)> = resume_paths
            .par_iter()
            .map(|path| {
                let path = path.as_ref();
                let analysis = self.analyze_resume(path, job_description);
                debug!(resume = %path.display(), score = analysis.overall_score, "resume scored");
                (resume_identifier(path), analysis.overall_score)
            })
            .collect();

        resume_scores.sort_by(|a, b| b.1.total_cmp(&a.1));
        resume_scores
    }
}

/// File name of the resume, or the whole path when it has none.
pub fn resume_identifier(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_backend_fails_at_construction() {
        let config = ScorerConfig {
            backend: "doc2vec".to_string(),
            ..ScorerConfig::default()
        };
        let err = ResumeScorer::new(&config).err().unwrap();
        assert!(matches!(err, ScorerError::UnsupportedBackend(_)));
    }

    #[test]
    fn test_unknown_embedding_model_fails_before_loading() {
        let config = ScorerConfig {
            backend: "bert".to_string(),
            embedding_model: "not-a-model".to_string(),
            ..ScorerConfig::default()
        };
        let err = ResumeScorer::new(&config).err().unwrap();
        assert!(matches!(err, ScorerError::UnsupportedModel(_)));
    }

    #[test]
    fn test_tfidf_backend_selected() {
        let scorer = ResumeScorer::new(&ScorerConfig::default()).unwrap();
        assert_eq!(scorer.kind(), BackendKind::Tfidf);
    }

    #[test]
    fn test_resume_identifier_is_file_name() {
        assert_eq!(resume_identifier(Path::new("data/resumes/resume_7.txt")), "resume_7.txt");
        assert_eq!(resume_identifier(Path::new("/")), "/");
    }
}
