//! Plain-text report export

use crate::error::{RecruiterBotError, Result};
use crate::model::AnalysisRecord;
use askama::Template;
use log::info;
use std::path::{Path, PathBuf};

#[derive(Template)]
#[template(
    ext = "txt",
    source = r#"Compatibility Analysis - Recruiter Bot
==============================================

Job: {{ job_title }}
Analysis date: {{ analyzed_at }}

----------------------------------------------
COMPATIBILITY SCORE: {{ score }} / 100
----------------------------------------------

COMMON SKILLS:
{% if common_skills.is_empty() -%}
No common skills identified.
{% else -%}
{% for skill in common_skills -%}
- {{ skill }}
{% endfor -%}
{% endif %}
----------------------------------------------

IMPROVEMENT SUGGESTIONS:
{% if improvement_suggestions.is_empty() -%}
No specific improvement suggestions.
{% else -%}
{% for suggestion in improvement_suggestions -%}
- {{ suggestion }}
{% endfor -%}
{% endif %}"#
)]
struct PlainTextReport<'a> {
    job_title: &'a str,
    analyzed_at: String,
    score: u8,
    common_skills: &'a [String],
    improvement_suggestions: &'a [String],
}

/// Render a record as the human-readable text report.
pub fn render_plain_text(record: &AnalysisRecord) -> Result<String> {
    let analyzed_at = record
        .created_at()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| record.timestamp.clone());

    let report = PlainTextReport {
        job_title: &record.result.job_title,
        analyzed_at,
        score: record.result.compatibility_score,
        common_skills: &record.result.common_skills,
        improvement_suggestions: &record.result.improvement_suggestions,
    };

    let rendered = report
        .render()
        .map_err(|e| RecruiterBotError::Export(format!("Failed to render report: {}", e)))?;
    Ok(rendered.trim().to_string())
}

/// Every character outside `[A-Za-z0-9]` becomes `_`, then lower-case.
pub fn sanitize_title(title: &str) -> String {
    if title.is_empty() {
        return "analysis".to_string();
    }

    title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

pub fn export_file_name(record: &AnalysisRecord) -> String {
    format!("resume_analysis_{}.txt", sanitize_title(record.job_title()))
}

/// Write the text report into `dir`, returning the file path.
pub fn export_record(record: &AnalysisRecord, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(record));

    std::fs::write(&path, render_plain_text(record)?)?;
    info!("Exported analysis {} to {}", record.id, path.display());
    Ok(path)
}
