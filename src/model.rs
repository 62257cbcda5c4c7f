//! Analysis result and history record types

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Structured output of comparing a job description against a resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub job_title: String,
    /// 0 to 100
    pub compatibility_score: u8,
    pub common_skills: Vec<String>,
    pub improvement_suggestions: Vec<String>,
}

/// An analysis as stored in history.
///
/// `id` is the creation time in Unix milliseconds, so two analyses that
/// complete within the same millisecond share an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub id: String,
    pub timestamp: String,
}

impl AnalysisRecord {
    pub fn new(result: AnalysisResult, created_at: DateTime<Utc>) -> Self {
        Self {
            result,
            id: created_at.timestamp_millis().to_string(),
            timestamp: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn now(result: AnalysisResult) -> Self {
        Self::new(result, Utc::now())
    }

    pub fn job_title(&self) -> &str {
        &self.result.job_title
    }

    pub fn score(&self) -> u8 {
        self.result.compatibility_score
    }

    /// Parsed creation time, if the stored timestamp is well formed.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Low,
    Medium,
    High,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=49 => ScoreBand::Low,
            50..=74 => ScoreBand::Medium,
            _ => ScoreBand::High,
        }
    }
}
