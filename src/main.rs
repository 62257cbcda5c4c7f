//! Recruiter bot: AI-powered resume and job description compatibility reports

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use recruiter_bot::app::{self, AssumeYes, Session, SubmitOutcome};
use recruiter_bot::cli::{self, Cli, Commands, ConfigAction, HistoryAction, TerminalConfirm};
use recruiter_bot::history::{FileStorage, HistoryStore};
use recruiter_bot::input::{InputLoader, TextSource};
use recruiter_bot::llm::GeminiClient;
use recruiter_bot::output::{export_record, formatter_for};
use recruiter_bot::{Config, RecruiterBotError, Result};
use std::path::Path;
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if !config.output.color_output {
        colored::control::set_override(false);
    }

    // Execute command
    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            job,
            job_file,
            resume,
            resume_file,
            output,
            export,
            export_dir,
        } => {
            let output_format = cli::parse_output_format(&output).map_err(RecruiterBotError::Configuration)?;

            // The key is checked before any input is read or any call is made.
            let api_key = config.api_key()?;
            let client = GeminiClient::new(&config.service, api_key)?;
            let store = HistoryStore::open(FileStorage::new(config.data_dir()))?;
            let mut session = Session::new(client, store);

            let loader = InputLoader::new();
            let job_text = loader.load(&TextSource::from_args(job, job_file)).await?;
            let resume_text = loader.load(&TextSource::from_args(resume, resume_file)).await?;
            debug!(
                "Job description: {} chars, resume: {} chars",
                job_text.len(),
                resume_text.len()
            );

            let spinner = analysis_spinner();
            let outcome = session.submit(&job_text, &resume_text).await;
            spinner.finish_and_clear();

            match outcome? {
                SubmitOutcome::Completed(record) => {
                    let formatter = formatter_for(output_format, config.output.color_output);
                    println!("{}", formatter.format_record(&record)?);

                    if export {
                        let dir = export_dir.unwrap_or_else(|| config.output.export_dir.clone());
                        let path = export_record(&record, &dir)?;
                        eprintln!("Report saved to {}", path.display());
                    }
                    info!("History now holds {} analyses", session.history().len());
                }
                SubmitOutcome::Rejected(input_error) => {
                    eprintln!("{}", input_error.to_string().red());
                    return Err(input_error.into());
                }
                SubmitOutcome::Failed { message, cause } => {
                    eprintln!("{}", message.red());
                    debug!("Failure cause: {}", cause);
                    return Err(RecruiterBotError::AnalysisFailed(cause));
                }
                SubmitOutcome::Busy => {
                    return Err(RecruiterBotError::AnalysisFailed(
                        "another analysis is already in progress".to_string(),
                    ));
                }
            }
        }

        Commands::History { action } => {
            let mut store = HistoryStore::open(FileStorage::new(config.data_dir()))?;

            match action.unwrap_or(HistoryAction::List {
                output: "console".to_string(),
            }) {
                HistoryAction::List { output } => {
                    let output_format = cli::parse_output_format(&output).map_err(RecruiterBotError::Configuration)?;
                    let formatter = formatter_for(output_format, config.output.color_output);
                    println!("{}", formatter.format_history(store.records())?);
                }

                HistoryAction::Show { id, output } => {
                    let output_format = cli::parse_output_format(&output).map_err(RecruiterBotError::Configuration)?;
                    let record = store
                        .get(&id)
                        .ok_or_else(|| RecruiterBotError::RecordNotFound(id.clone()))?;
                    let formatter = formatter_for(output_format, config.output.color_output);
                    println!("{}", formatter.format_record(record)?);
                }

                HistoryAction::Export { id, out } => {
                    let record = store
                        .get(&id)
                        .ok_or_else(|| RecruiterBotError::RecordNotFound(id.clone()))?;
                    let dir = out.unwrap_or_else(|| config.output.export_dir.clone());
                    let path = export_record(record, &dir)?;
                    println!("Report saved to {}", path.display());
                }

                HistoryAction::Clear { yes } => {
                    if store.is_empty() {
                        println!("History is already empty.");
                        return Ok(());
                    }

                    let cleared = if yes {
                        app::clear_history(&mut store, &mut AssumeYes)?
                    } else {
                        app::clear_history(&mut store, &mut TerminalConfirm::stdio())?
                    };

                    if cleared {
                        println!("History cleared.");
                    } else {
                        println!("History kept.");
                    }
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Configuration ({})\n", config_path.display());
                println!("Service endpoint: {}", config.service.endpoint);
                println!("Model: {}", config.service.model);
                println!("Temperature: {:.2}", config.service.temperature);
                println!("API key variable: {}", config.service.api_key_env);
                match config.service.timeout_secs {
                    Some(secs) => println!("Timeout: {}s", secs),
                    None => println!("Timeout: none"),
                }
                println!("History directory: {}", config.data_dir().display());
                println!("Export directory: {}", config.output.export_dir.display());
                println!("Colors: {}", config.output.color_output);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(config_path)?;
                println!("Configuration reset: {}", config_path.display());
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

fn analysis_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Analyzing...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
