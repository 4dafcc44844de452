//! Resume analyzer: keyword match between a resume and a job description

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use resume_analyzer::cli::{self, Cli, Commands, ConfigAction, JobSource};
use resume_analyzer::config::OutputFormat;
use resume_analyzer::input::InputManager;
use resume_analyzer::output::{save_report_to_file, suggest_filename, AnalysisReport, ReportGenerator};
use resume_analyzer::processing::analyzer::{has_job_description, AnalysisEngine};
use resume_analyzer::processing::sections::{SectionMap, NOT_FOUND};
use resume_analyzer::{Config, Result, ResumeAnalyzerError};
use std::path::Path;
use std::process;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};

const RESUME_EXTENSIONS: &[&str] = &["pdf", "txt", "md"];
const JOB_EXTENSIONS: &[&str] = &["txt", "md", "pdf"];
const EMPTY_JOB_HINT: &str = "Provide a job description to run the analysis.";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            output,
            save,
            detailed,
            threshold,
        } => {
            cli::validate_file_extension(&resume, RESUME_EXTENSIONS)
                .map_err(|e| ResumeAnalyzerError::InvalidInput(format!("Resume file: {}", e)))?;

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeAnalyzerError::InvalidInput)?,
                None => config.output.format,
            };
            if let Some(threshold) = threshold {
                config.matching.similarity_threshold = threshold;
                config.validate()?;
            }
            let detailed = detailed || config.output.detailed;

            let job_text = read_job_description(&job).await?;
            if !has_job_description(&job_text) {
                println!("{}", EMPTY_JOB_HINT);
                return Ok(());
            }

            let report = run_analysis(&config, &resume, &job_text, &job.describe()).await?;

            let generator =
                ReportGenerator::with_options(config.output.color_output && save.is_none(), detailed, true, true, true);
            let rendered = generator.generate_report(&report, &output_format)?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(&output_format, &resume.to_string_lossy(), true))
                    } else {
                        path
                    };
                    save_report_to_file(&rendered, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Interactive { resume } => {
            cli::validate_file_extension(&resume, RESUME_EXTENSIONS)
                .map_err(|e| ResumeAnalyzerError::InvalidInput(format!("Resume file: {}", e)))?;
            run_interactive(&config, &resume).await?;
        }

        Commands::Sections { resume } => {
            cli::validate_file_extension(&resume, RESUME_EXTENSIONS)
                .map_err(|e| ResumeAnalyzerError::InvalidInput(format!("Resume file: {}", e)))?;

            let resume_text = InputManager::new().extract_text(&resume).await?;
            let sections = SectionMap::extract(&resume_text);
            info!("Found {} of {} sections", sections.found_count(), sections.len());

            for (section, content) in sections.iter() {
                println!("\n{}", section.to_string().green().bold());
                if content == NOT_FOUND {
                    println!("  {}", content.bright_black());
                } else {
                    for line in content.lines() {
                        println!("  {}", line);
                    }
                }
            }
        }

        Commands::Keywords { file } => {
            let text = InputManager::new().extract_text(&file).await?;
            let engine = AnalysisEngine::new(&config)?;
            let keywords = engine.extract_keywords(&text);

            println!("{} keywords in {}", keywords.len(), file.display());
            for keyword in keywords.iter() {
                println!("  • {}", keyword);
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    ResumeAnalyzerError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("# {}\n", config_path.display());
                println!("{}", content);
            }
            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset to defaults at {}", config_path.display());
            }
            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

async fn read_job_description(job: &JobSource) -> Result<String> {
    if job.is_stdin() {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        return Ok(text);
    }

    match (&job.job, &job.job_text) {
        (Some(path), _) => {
            cli::validate_file_extension(path, JOB_EXTENSIONS)
                .map_err(|e| ResumeAnalyzerError::InvalidInput(format!("Job description file: {}", e)))?;
            InputManager::new().extract_text(path).await
        }
        (None, Some(text)) => Ok(text.clone()),
        (None, None) => Ok(String::new()),
    }
}

/// Extract the resume and run the whole pipeline behind a spinner.
async fn run_analysis(config: &Config, resume: &Path, job_text: &str, job_source: &str) -> Result<AnalysisReport> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Analyzing resume...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result: Result<AnalysisReport> = async {
        let start = Instant::now();
        let resume_text = InputManager::new().extract_text(resume).await?;
        debug!("Resume text: {} characters", resume_text.chars().count());

        let engine = AnalysisEngine::new(config)?;
        let analysis = engine.analyze(&resume_text, job_text);

        Ok(AnalysisReport::new(
            analysis,
            engine.matcher(),
            resume.to_string_lossy(),
            job_source,
            start.elapsed().as_millis() as u64,
        ))
    }
    .await;

    spinner.finish_and_clear();
    result
}

async fn run_interactive(config: &Config, resume: &Path) -> Result<()> {
    let generator = ReportGenerator::with_options(config.output.color_output, config.output.detailed, true, true, true);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut round = 0usize;

    loop {
        println!(
            "\n{}",
            "Paste a job description, then a line with a single '.' (Ctrl-D to quit):".cyan()
        );

        let mut job_text = String::new();
        let mut reached_eof = true;
        while let Some(line) = lines.next_line().await? {
            if line.trim() == "." {
                reached_eof = false;
                break;
            }
            job_text.push_str(&line);
            job_text.push('\n');
        }

        if !has_job_description(&job_text) {
            if reached_eof {
                break;
            }
            println!("{}", EMPTY_JOB_HINT);
            continue;
        }

        round += 1;
        let report = run_analysis(config, resume, &job_text, &format!("interactive input #{}", round)).await?;
        println!("{}", generator.generate_report(&report, &OutputFormat::Console)?);

        if reached_eof {
            break;
        }
    }

    info!("Interactive session ended after {} analyses", round);
    Ok(())
}
