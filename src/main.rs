//! Resume screener: rank a batch of resumes against one job description

use anyhow::Context;
use clap::Parser;
use indicatif::ProgressBar;
use log::{error, info, warn};
use resume_screener::cli::{self, Cli, Commands, ConfigAction};
use resume_screener::config::{Config, OutputFormat};
use resume_screener::error::{Result, ScreenerError};
use resume_screener::input::InputManager;
use resume_screener::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use resume_screener::output::report::ScreeningReport;
use resume_screener::processing::scoring;
use resume_screener::processing::vocabulary::SkillCategory;
use resume_screener::processing::{rank_results, ScreeningEngine};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path, cli.no_color).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path, no_color: bool) -> anyhow::Result<()> {
    match command {
        Commands::Screen {
            job,
            job_text,
            resumes,
            output,
            save,
            detailed,
            top,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ScreenerError::InvalidInput)?,
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;

            let mut input_manager = InputManager::new()
                .with_cache(config.input.enable_caching)
                .with_allowed_extensions(config.input.allowed_extensions.clone());

            let job_description = match (job, job_text) {
                (_, Some(text)) => text,
                (Some(path), None) => {
                    validate_job_file(&path, &config)?;
                    input_manager
                        .extract_text(&path)
                        .await
                        .with_context(|| format!("Failed to read job description {}", path.display()))?
                }
                (None, None) => {
                    return Err(ScreenerError::InvalidInput(
                        "A job description file or --job-text is required".to_string(),
                    )
                    .into())
                }
            };
            validate_job_description(&job_description, config.screening.min_job_description_chars)?;

            let resumes = input_manager
                .load_resumes(&resumes)
                .await
                .context("Failed to load resumes")?;
            if resumes.is_empty() {
                return Err(ScreenerError::InvalidInput("No resumes to screen".to_string()).into());
            }

            let started = Instant::now();
            let engine = ScreeningEngine::with_custom_skills(config.screening.custom_skills.clone())?;
            let requirements = engine.extract_requirements(&job_description);
            info!(
                "Extracted {} required and {} preferred skill(s), {} year(s) experience, education {}",
                requirements.required_skills.len(),
                requirements.preferred_skills.len(),
                requirements.experience_level,
                requirements.education_level
            );

            let progress = if output_format == OutputFormat::Console {
                ProgressBar::new(resumes.len() as u64)
            } else {
                ProgressBar::hidden()
            };
            let mut results = Vec::with_capacity(resumes.len());
            for resume in &resumes {
                progress.set_message(resume.file_name.clone());
                results.push(engine.analyze_resume(&requirements, resume));
                progress.inc(1);
            }
            progress.finish_and_clear();

            let results = rank_results(results);
            let processing_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

            let mut report = ScreeningReport::new(
                &job_description,
                requirements,
                results,
                processing_time_ms,
                config.screening.top_chart_entries,
            );
            if let Some(n) = top {
                report.truncate_results(n);
            }

            let generator = ReportGenerator::with_options(
                config.output.color_output && !no_color && save.is_none(),
                detailed,
                config.output.pretty_json,
                true,
                true,
            );
            let rendered = generator.generate_report(&report, &output_format)?;

            match save {
                Some(path) => {
                    let path = resolve_save_path(path, &output_format);
                    save_report_to_file(&rendered, &path)
                        .with_context(|| format!("Failed to save report to {}", path.display()))?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Requirements { job } => {
            validate_job_file(&job, &config)?;
            let mut input_manager = InputManager::new();
            let job_description = input_manager
                .extract_text(&job)
                .await
                .with_context(|| format!("Failed to read job description {}", job.display()))?;
            validate_job_description(&job_description, config.screening.min_job_description_chars)?;

            let engine = ScreeningEngine::with_custom_skills(config.screening.custom_skills.clone())?;
            let requirements = engine.extract_requirements(&job_description);
            println!("{}", serde_json::to_string_pretty(&requirements)?);
        }

        Commands::Vocabulary { category } => {
            let filter = match category {
                Some(name) => Some(SkillCategory::parse(&name).ok_or_else(|| {
                    ScreenerError::InvalidInput(format!("Unknown skill category: {}", name))
                })?),
                None => None,
            };

            let engine = ScreeningEngine::with_custom_skills(config.screening.custom_skills.clone())?;
            let terms = engine
                .vocabulary()
                .terms()
                .iter()
                .filter(|term| filter.map_or(true, |category| term.category == category));

            for term in terms {
                println!("{:<24} {}", term.term, term.category);
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Configuration ({})\n", config_path.display());
                println!("{}", toml::to_string_pretty(&config).map_err(|e| {
                    ScreenerError::Configuration(format!("Failed to serialize config: {}", e))
                })?);
                println!("Scoring weights (fixed):");
                println!("  Skills: {:.0}%", scoring::SKILLS_WEIGHT * 100.0);
                println!("  Experience: {:.0}%", scoring::EXPERIENCE_WEIGHT * 100.0);
                println!("  Education: {:.0}%", scoring::EDUCATION_WEIGHT * 100.0);
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

fn validate_job_file(path: &Path, config: &Config) -> Result<()> {
    let allowed: Vec<&str> = config.input.allowed_extensions.iter().map(String::as_str).collect();
    cli::validate_file_extension(path, &allowed)
        .map_err(|e| ScreenerError::InvalidInput(format!("Job description file: {}", e)))
}

/// Empty descriptions are rejected; short ones only warn
fn validate_job_description(job_description: &str, min_chars: usize) -> Result<()> {
    if job_description.trim().is_empty() {
        return Err(ScreenerError::InvalidInput("Job description is empty".to_string()));
    }

    let chars = job_description.chars().count();
    if chars < min_chars {
        warn!(
            "Job description is only {} characters; results may be unreliable (recommended minimum {})",
            chars, min_chars
        );
    }

    Ok(())
}

/// A directory target gets a timestamped file name for the format
fn resolve_save_path(path: PathBuf, format: &OutputFormat) -> PathBuf {
    if path.is_dir() {
        path.join(suggest_filename(format, true))
    } else {
        path
    }
}
