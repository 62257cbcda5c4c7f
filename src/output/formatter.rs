//! Output formatters for analysis records and the history list

use crate::config::OutputFormat;
use crate::error::Result;
use crate::model::{AnalysisRecord, ScoreBand};
use colored::{Color, Colorize};

/// Trait for rendering records for the terminal or for other tools
pub trait OutputFormatter {
    fn format_record(&self, record: &AnalysisRecord) -> Result<String>;
    fn format_history(&self, records: &[AnalysisRecord]) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for scripting
pub struct JsonFormatter {
    pretty: bool,
}

pub fn formatter_for(format: OutputFormat, use_colors: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(use_colors)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".blue().bold(), title.blue().bold())
        } else {
            format!("\n█ {}\n", title)
        }
    }

    fn score_color(score: u8) -> Color {
        match ScoreBand::from_score(score) {
            ScoreBand::Low => Color::Red,
            ScoreBand::Medium => Color::Yellow,
            ScoreBand::High => Color::Green,
        }
    }

    fn format_score(&self, score: u8) -> String {
        let text = format!("{}/100", score);
        if self.use_colors {
            text.color(Self::score_color(score)).bold().to_string()
        } else {
            text
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_record(&self, record: &AnalysisRecord) -> Result<String> {
        let result = &record.result;
        let mut output = String::new();

        output.push_str(&self.format_header("ANALYSIS RESULT"));
        output.push_str(&format!("Job: {}\n", result.job_title));
        output.push_str(&format!("Analyzed: {} (id {})\n", record.timestamp, record.id));
        output.push_str(&format!("\nCompatibility score: {}\n", self.format_score(result.compatibility_score)));

        output.push_str(&self.format_header("Common Skills"));
        if result.common_skills.is_empty() {
            output.push_str("No common skills were clearly identified.\n");
        } else {
            let skills: Vec<String> = result
                .common_skills
                .iter()
                .map(|skill| self.colorize(skill, Color::Cyan))
                .collect();
            output.push_str(&format!("{}\n", skills.join(", ")));
        }

        output.push_str(&self.format_header("Improvement Suggestions"));
        if result.improvement_suggestions.is_empty() {
            output.push_str("No specific suggestions right now. Looks like a good resume!\n");
        } else {
            for (i, suggestion) in result.improvement_suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        Ok(output)
    }

    fn format_history(&self, records: &[AnalysisRecord]) -> Result<String> {
        let mut output = self.format_header("Analysis History");

        if records.is_empty() {
            output.push_str("No analyses yet.\n");
            return Ok(output);
        }

        for (i, record) in records.iter().enumerate() {
            let marker = if i == 0 { self.colorize("*", Color::Blue) } else { " ".to_string() };
            output.push_str(&format!(
                "{} {:<15} {:>7}  {}  {}\n",
                marker,
                record.id,
                self.format_score(record.score()),
                record.timestamp,
                record.job_title()
            ));
        }

        output.push_str(&format!("\n{} analyses (newest first)\n", records.len()));
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_record(&self, record: &AnalysisRecord) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(record)?)
        } else {
            Ok(serde_json::to_string(record)?)
        }
    }

    fn format_history(&self, records: &[AnalysisRecord]) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(records)?)
        } else {
            Ok(serde_json::to_string(records)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}
