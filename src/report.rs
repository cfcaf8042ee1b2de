use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::coverage::CoverageStats;
use crate::error::Result;
use crate::jobs::JobDescription;
use crate::scoring::AnalysisResult;

pub const DETAIL_FILE: &str = "detailed_results.json";
pub const SUMMARY_FILE: &str = "summary.txt";

const SUMMARY_KEYWORDS: usize = 5;

/// How one resume fared against one job.
#[derive(Debug, Clone, Serialize)]
pub struct JobMatch {
    pub job_title: String,
    pub company: Option<String>,
    pub score: f64,
    pub similarity: f64,
    pub missing_keywords: Vec<String>,
    pub coverage: CoverageStats,
    pub suggestions: Vec<String>,
}

impl JobMatch {
    pub fn new(job: &JobDescription, analysis: AnalysisResult) -> Self {
        Self {
            job_title: job.title.clone(),
            company: job.company.clone(),
            score: analysis.overall_score,
            similarity: analysis.similarity_score,
            missing_keywords: analysis.missing_keywords,
            coverage: analysis.coverage_stats,
            suggestions: analysis.improvement_suggestions,
        }
    }
}

pub fn render_summary(resume_name: &str, results: &[JobMatch], generated_at: DateTime<Local>) -> String {
    let rule = "=".repeat(50);
    let mut lines = vec![
        format!("Analysis Results for {resume_name}"),
        format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
        rule.clone(),
    ];

    for result in results {
        lines.push(String::new());
        match &result.company {
            Some(company) => lines.push(format!("Job: {} ({company})", result.job_title)),
            None => lines.push(format!("Job: {}", result.job_title)),
        }
        lines.push(format!("Overall Score: {:.2}%", result.score));
        lines.push(format!("Similarity Score: {:.2}", result.similarity));
        lines.push(String::new());
        lines.push("Coverage Statistics:".to_string());
        lines.push(format!("- Total Keywords: {}", result.coverage.total_keywords));
        lines.push(format!("- Matched Keywords: {}", result.coverage.matched_keywords));
        lines.push(format!(
            "- Coverage Percentage: {:.2}%",
            result.coverage.coverage_percentage
        ));
        lines.push(format!("- Strong Matches: {}", result.coverage.strong_matches));

        if !result.missing_keywords.is_empty() {
            lines.push(String::new());
            lines.push("Missing Keywords:".to_string());
            let shown: Vec<&str> = result
                .missing_keywords
                .iter()
                .take(SUMMARY_KEYWORDS)
                .map(String::as_str)
                .collect();
            lines.push(shown.join(", "));
        }

        if !result.suggestions.is_empty() {
            lines.push(String::new());
            lines.push("Improvement Suggestions:".to_string());
            for suggestion in &result.suggestions {
                lines.push(format!("- {suggestion}"));
            }
        }

        lines.push(String::new());
        lines.push(rule.clone());
    }

    lines.join("\n")
}

/// Writes `<output_dir>/<resume_name>/detailed_results.json` and
/// `summary.txt`, returning the directory written to.
pub fn save_results(output_dir: &Path, resume_name: &str, results: &[JobMatch]) -> Result<PathBuf> {
    let resume_dir = output_dir.join(resume_name);
    fs::create_dir_all(&resume_dir)?;

    let detail = File::create(resume_dir.join(DETAIL_FILE))?;
    serde_json::to_writer_pretty(detail, results)?;

    let mut summary = File::create(resume_dir.join(SUMMARY_FILE))?;
    summary.write_all(render_summary(resume_name, results, Local::now()).as_bytes())?;

    Ok(resume_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, company: Option<&str>) -> JobDescription {
        JobDescription {
            title: title.to_string(),
            description: "Python and SQL".to_string(),
            required_skills: None,
            company: company.map(str::to_string),
        }
    }

    fn sample() -> JobMatch {
        JobMatch::new(
            &job("Data Engineer", Some("Acme")),
            AnalysisResult {
                overall_score: 52.5,
                similarity_score: 0.4,
                missing_keywords: ["spark", "airflow", "etl", "hadoop", "kafka", "dbt"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                coverage_stats: CoverageStats::from_counts(10, 6, 1),
                improvement_suggestions: vec!["Add experience with: spark".to_string()],
            },
        )
    }

    #[test]
    fn test_summary_contents() {
        let summary = render_summary("resume_1", &[sample()], Local::now());
        assert!(summary.starts_with("Analysis Results for resume_1"));
        assert!(summary.contains("Job: Data Engineer (Acme)"));
        assert!(summary.contains("Overall Score: 52.50%"));
        assert!(summary.contains("- Matched Keywords: 6"));
        assert!(summary.contains("spark, airflow, etl, hadoop, kafka"));
        assert!(!summary.contains("dbt"));
        assert!(summary.contains("- Add experience with: spark"));
    }

    #[test]
    fn test_summary_without_company() {
        let result = JobMatch::new(&job("QA Engineer", None), AnalysisResult::extraction_failed());
        let summary = render_summary("resume_2", &[result], Local::now());
        assert!(summary.contains("Job: QA Engineer\n"));
        assert!(!summary.contains("Missing Keywords:"));
    }

    #[test]
    fn test_save_results_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let written = save_results(dir.path(), "resume_3", &[sample()]).unwrap();
        assert_eq!(written, dir.path().join("resume_3"));

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(written.join(DETAIL_FILE)).unwrap()).unwrap();
        assert_eq!(json[0]["job_title"], "Data Engineer");
        assert_eq!(json[0]["coverage"]["matched_keywords"], 6);

        let summary = fs::read_to_string(written.join(SUMMARY_FILE)).unwrap();
        assert!(summary.contains("Analysis Results for resume_3"));
    }
}
