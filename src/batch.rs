use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::Result;
use crate::extract::is_supported_resume;
use crate::jobs::JobDescription;
use crate::report::{save_results, JobMatch};
use crate::scorer::ResumeScorer;

/// Counts from one batch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub processed: usize,
    /// Resumes whose text could not be extracted. They still get zero-score
    /// reports.
    pub unreadable: Vec<String>,
    /// Resumes whose reports could not be written.
    pub failed: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Chunk {
    Number(u64),
    Text(String),
}

impl Ord for Chunk {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Chunk::Number(a), Chunk::Number(b)) => a.cmp(b),
            (Chunk::Text(a), Chunk::Text(b)) => a.cmp(b),
            (Chunk::Number(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Number(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Chunk {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Splits a name into digit and non-digit runs so `resume_2` sorts before
/// `resume_10`.
fn natural_key(name: &str) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut digits = String::new();
    let mut text = String::new();

    for c in name.chars() {
        if c.is_ascii_digit() {
            if !text.is_empty() {
                chunks.push(Chunk::Text(std::mem::take(&mut text)));
            }
            digits.push(c);
        } else {
            if !digits.is_empty() {
                chunks.push(Chunk::Number(digits.parse().unwrap_or(u64::MAX)));
                digits.clear();
            }
            text.extend(c.to_lowercase());
        }
    }
    if !digits.is_empty() {
        chunks.push(Chunk::Number(digits.parse().unwrap_or(u64::MAX)));
    }
    if !text.is_empty() {
        chunks.push(Chunk::Text(text));
    }
    chunks
}

/// `.txt` and `.pdf` files directly inside `dir`, in natural name order.
pub fn list_resumes(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut resumes = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_supported_resume(&path) {
            resumes.push(path);
        }
    }
    resumes.sort_by_cached_key(|path| {
        natural_key(&path.file_name().unwrap_or_default().to_string_lossy())
    });
    Ok(resumes)
}

/// Scores every resume against every job and writes one report directory
/// per resume. A failing resume is logged and skipped.
pub fn run_batch(
    scorer: &ResumeScorer,
    jobs: &[JobDescription],
    resumes: &[PathBuf],
    output_dir: &Path,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    let job_texts: Vec<String> = jobs.iter().map(JobDescription::scoring_text).collect();

    for resume in resumes {
        let name = resume
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| resume.display().to_string());
        info!("Processing {}", resume.display());

        let text = scorer.extract_text(resume);
        if text.is_none() {
            warn!("Failed to extract text from {}", resume.display());
            outcome.unreadable.push(name.clone());
        }

        let results: Vec<JobMatch> = jobs
            .iter()
            .zip(&job_texts)
            .map(|(job, job_text)| JobMatch::new(job, scorer.analyze_text(text.as_deref(), job_text)))
            .collect();

        match save_results(output_dir, &name, &results) {
            Ok(dir) => {
                info!("Wrote results for {name} to {}", dir.display());
                outcome.processed += 1;
            }
            Err(e) => {
                warn!("Error saving results for {name}: {e}");
                outcome.failed.push(name);
            }
        }
    }

    outcome
}
