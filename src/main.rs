use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_scorer::batch::{list_resumes, run_batch};
use resume_scorer::config::Config;
use resume_scorer::jobs::load_job_descriptions;
use resume_scorer::{AnalysisResult, ResumeScorer};

#[derive(Parser)]
#[command(name = "resume-scorer", version, about = "Score resumes against job descriptions")]
struct Cli {
    /// Matching backend: "tfidf" or "bert" (overrides SCORER_BACKEND)
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Sentence-embedding model for the bert backend
    #[arg(long, global = true)]
    model: Option<String>,

    /// Number of job keywords considered
    #[arg(long, global = true)]
    top_n: Option<usize>,

    /// Run the embedding model on CUDA when available
    #[arg(long, global = true)]
    gpu: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one resume against one job description
    Analyze {
        #[arg(long)]
        resume: PathBuf,
        #[command(flatten)]
        job: JobArgs,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
        /// Include parsed resume sections, contact info and skills (implies --json)
        #[arg(long)]
        detailed: bool,
    },
    /// Rank several resumes against one job description
    Compare {
        #[command(flatten)]
        job: JobArgs,
        #[arg(required = true)]
        resumes: Vec<PathBuf>,
    },
    /// Score every resume in a directory against every job in a CSV file
    Batch {
        #[arg(long)]
        jobs: PathBuf,
        #[arg(long)]
        resumes: PathBuf,
        #[arg(long, default_value = "output")]
        output: PathBuf,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct JobArgs {
    /// Job description text
    #[arg(long)]
    job: Option<String>,
    /// File holding the job description
    #[arg(long)]
    job_file: Option<PathBuf>,
}

impl JobArgs {
    fn text(&self) -> Result<String> {
        match (&self.job, &self.job_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read job description {}", path.display())),
            (None, None) => anyhow::bail!("Either --job or --job-file is required"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_scorer={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(backend) = cli.backend {
        config.scorer.backend = backend;
    }
    if let Some(model) = cli.model {
        config.scorer.embedding_model = model;
    }
    if let Some(top_n) = cli.top_n {
        config.scorer.top_n = top_n;
    }
    config.scorer.use_gpu |= cli.gpu;

    info!("Starting resume-scorer v{}", env!("CARGO_PKG_VERSION"));
    let scorer = ResumeScorer::new(&config.scorer).context("Failed to initialize scorer")?;

    match cli.command {
        Commands::Analyze {
            resume,
            job,
            json,
            detailed,
        } => {
            let job_text = job.text()?;
            if detailed {
                let analysis = scorer.get_detailed_analysis(&resume, &job_text)?;
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                let analysis = scorer.analyze_resume(&resume, &job_text);
                if json {
                    println!("{}", serde_json::to_string_pretty(&analysis)?);
                } else {
                    print_analysis(&resume, &analysis);
                }
            }
        }
        Commands::Compare { job, resumes } => {
            let job_text = job.text()?;
            let ranking = scorer.compare_resumes(&resumes, &job_text);
            println!("{:<6}{:<40}{:>10}", "Rank", "Resume", "Score");
            for (rank, (name, score)) in ranking.iter().enumerate() {
                println!("{:<6}{:<40}{:>9.2}%", rank + 1, name, score);
            }
        }
        Commands::Batch {
            jobs,
            resumes,
            output,
        } => {
            let jobs = load_job_descriptions(&jobs)
                .with_context(|| format!("Failed to load jobs from {}", jobs.display()))?;
            info!("Loaded {} job descriptions", jobs.len());

            let resume_paths = list_resumes(&resumes)
                .with_context(|| format!("Failed to list resumes in {}", resumes.display()))?;
            info!("Found {} resumes", resume_paths.len());

            let outcome = run_batch(&scorer, &jobs, &resume_paths, &output);
            println!(
                "Processed {} resumes ({} unreadable, {} failed) into {}",
                outcome.processed,
                outcome.unreadable.len(),
                outcome.failed.len(),
                output.display()
            );
        }
    }

    Ok(())
}

fn print_analysis(resume: &std::path::Path, analysis: &AnalysisResult) {
    let coverage = &analysis.coverage_stats;
    println!("Resume: {}", resume.display());
    println!("Overall Score: {:.2}%", analysis.overall_score);
    println!("Similarity Score: {:.2}", analysis.similarity_score);
    println!(
        "Keyword Coverage: {}/{} ({:.2}%), strong matches: {}",
        coverage.matched_keywords,
        coverage.total_keywords,
        coverage.coverage_percentage,
        coverage.strong_matches
    );
    if !analysis.missing_keywords.is_empty() {
        println!("Missing Keywords: {}", analysis.missing_keywords.join(", "));
    }
    for suggestion in &analysis.improvement_suggestions {
        println!("- {suggestion}");
    }
}
