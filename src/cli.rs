//! CLI interface for the resume analyzer

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-analyzer")]
#[command(about = "Keyword match between a resume and a job description")]
#[command(
    long_about = "Split a resume into its standard sections, extract noun-phrase keywords from the resume and a job description, and score how many job keywords the resume covers"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match a resume against a job description
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        #[command(flatten)]
        job: JobSource,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include keyword lists and fuzzy matches
        #[arg(short, long)]
        detailed: bool,

        /// Similarity a keyword pair must exceed to count as a match (0.0 - 1.0)
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Paste job descriptions one after another and re-run the match for each
    Interactive {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,
    },

    /// Show the sections found in a resume
    Sections {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,
    },

    /// List the keywords extracted from a file
    Keywords {
        /// Path to a resume or job description
        file: PathBuf,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

/// Where the job description comes from
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct JobSource {
    /// Path to job description file (TXT, MD, PDF), or "-" for stdin
    #[arg(short, long)]
    pub job: Option<PathBuf>,

    /// Job description given inline
    #[arg(long)]
    pub job_text: Option<String>,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

impl JobSource {
    pub fn is_stdin(&self) -> bool {
        self.job.as_deref() == Some(Path::new("-"))
    }

    /// Label used in report metadata
    pub fn describe(&self) -> String {
        match (&self.job, &self.job_text) {
            (Some(_), _) if self.is_stdin() => "stdin".to_string(),
            (Some(path), _) => path.display().to_string(),
            (None, _) => "inline text".to_string(),
        }
    }
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_with_job_file() {
        let cli = Cli::parse_from([
            "resume-analyzer",
            "analyze",
            "--resume",
            "cv.pdf",
            "--job",
            "job.txt",
            "--threshold",
            "0.7",
        ]);

        match cli.command {
            Commands::Analyze { resume, job, threshold, .. } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert_eq!(job.describe(), "job.txt");
                assert_eq!(threshold, Some(0.7));
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_job_source_is_required_and_exclusive() {
        assert!(Cli::try_parse_from(["resume-analyzer", "analyze", "--resume", "cv.pdf"]).is_err());
        assert!(Cli::try_parse_from([
            "resume-analyzer",
            "analyze",
            "--resume",
            "cv.pdf",
            "--job",
            "job.txt",
            "--job-text",
            "Rust developer",
        ])
        .is_err());
    }

    #[test]
    fn test_job_from_stdin() {
        let cli = Cli::parse_from(["resume-analyzer", "analyze", "-r", "cv.pdf", "-j", "-"]);
        match cli.command {
            Commands::Analyze { job, .. } => {
                assert!(job.is_stdin());
                assert_eq!(job.describe(), "stdin");
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("MD"), Ok(OutputFormat::Markdown));
        assert_eq!(parse_output_format("html"), Ok(OutputFormat::Html));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        let allowed = ["pdf", "txt", "md"];
        assert!(validate_file_extension(Path::new("resume.PDF"), &allowed).is_ok());
        assert!(validate_file_extension(Path::new("resume.docx"), &allowed).is_err());
        assert!(validate_file_extension(Path::new("resume"), &allowed).is_err());
    }
}
