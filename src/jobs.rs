use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;
use serde::Deserialize;

use crate::error::Result;

/// One job posting. Columns other than these are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobDescription {
    pub title: String,
    pub description: String,
    /// Free text, often a stringified list such as `['Python', 'SQL']`.
    #[serde(default)]
    pub required_skills: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

impl JobDescription {
    /// Text the resume is scored against: the description followed by the
    /// required skills.
    pub fn scoring_text(&self) -> String {
        match self.required_skills.as_deref().map(str::trim) {
            Some(skills) if !skills.is_empty() => format!("{} {}", self.description, skills),
            _ => self.description.clone(),
        }
    }
}

pub fn load_job_descriptions(path: &Path) -> Result<Vec<JobDescription>> {
    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);
    let mut jobs = Vec::new();
    for result in rdr.deserialize() {
        let job: JobDescription = result?;
        jobs.push(job);
    }
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_loads_jobs_and_ignores_extra_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.csv");
        fs::write(
            &path,
            "title,company,location,required_skills,description\n\
             Data Engineer,Acme,Berlin,\"['Python', 'Spark']\",Build pipelines.\n\
             QA Engineer,Initech,Austin,,Write tests.\n",
        )
        .unwrap();

        let jobs = load_job_descriptions(&path).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "Data Engineer");
        assert_eq!(jobs[0].company.as_deref(), Some("Acme"));
        assert_eq!(jobs[0].scoring_text(), "Build pipelines. ['Python', 'Spark']");
        assert_eq!(jobs[1].required_skills, None);
        assert_eq!(jobs[1].scoring_text(), "Write tests.");
    }

    #[test]
    fn test_missing_required_column_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.csv");
        fs::write(&path, "title\nData Engineer\n").unwrap();
        assert!(load_job_descriptions(&path).is_err());
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(load_job_descriptions(Path::new("/nonexistent/jobs.csv")).is_err());
    }
}
