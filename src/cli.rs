//! CLI interface for the recruiter bot

use crate::app::Confirm;
use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recruiter-bot")]
#[command(about = "AI-powered resume and job description compatibility reports")]
#[command(long_about = "Compare a resume against a job description with a hosted AI model, and keep a local history of the reports")]
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
    /// Analyze a resume against a job description
    Analyze {
        /// Job description text
        #[arg(long, conflicts_with = "job_file")]
        job: Option<String>,

        /// Path to job description file (TXT, MD, PDF)
        #[arg(short = 'j', long)]
        job_file: Option<PathBuf>,

        /// Resume text
        #[arg(long, conflicts_with = "resume_file")]
        resume: Option<String>,

        /// Path to resume file (TXT, MD, PDF)
        #[arg(short = 'r', long)]
        resume_file: Option<PathBuf>,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Also export the report as a text file
        #[arg(short, long)]
        export: bool,

        /// Directory for the exported report (defaults to output.export_dir)
        #[arg(long, requires = "export")]
        export_dir: Option<PathBuf>,
    },

    /// Browse or manage past analyses
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List past analyses, newest first
    List {
        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// Show one past analysis
    Show {
        /// Analysis id
        id: String,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// Export one past analysis as a text report
    Export {
        /// Analysis id
        id: String,

        /// Target directory
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Delete the entire history
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!("Invalid output format: {}. Supported: console, json", format)),
    }
}

/// Reads a yes/no answer from the terminal. Anything but `y`/`yes` is no.
pub struct TerminalConfirm<R, W> {
    input: R,
    output: W,
}

impl TerminalConfirm<std::io::StdinLock<'static>, std::io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalConfirm<R, W> {
    fn confirm(&mut self, question: &str) -> bool {
        if write!(self.output, "{} [y/N] ", question).and_then(|_| self.output.flush()).is_err() {
            return false;
        }

        let mut answer = String::new();
        if self.input.read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}
