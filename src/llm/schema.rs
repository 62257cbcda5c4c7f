//! Response schema declared to the model
//!
//! Gemini treats the schema as a hint; replies are still checked by
//! [`crate::llm::validation`].

use serde_json::{json, Value};

pub const JOB_TITLE: &str = "jobTitle";
pub const COMPATIBILITY_SCORE: &str = "compatibilityScore";
pub const COMMON_SKILLS: &str = "commonSkills";
pub const IMPROVEMENT_SUGGESTIONS: &str = "improvementSuggestions";

pub const REQUIRED_FIELDS: [&str; 4] = [JOB_TITLE, COMPATIBILITY_SCORE, COMMON_SKILLS, IMPROVEMENT_SUGGESTIONS];

pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            JOB_TITLE: {
                "type": "STRING",
                "description": "The job title, extracted from the job description. For example, 'Senior Frontend Developer'."
            },
            COMPATIBILITY_SCORE: {
                "type": "INTEGER",
                "description": "A score from 0 to 100 representing the compatibility between the resume and the job."
            },
            COMMON_SKILLS: {
                "type": "ARRAY",
                "description": "Key skills and technologies found in both the resume and the job description.",
                "items": { "type": "STRING" }
            },
            IMPROVEMENT_SUGGESTIONS: {
                "type": "ARRAY",
                "description": "Actionable suggestions to improve the resume for this specific job.",
                "items": { "type": "STRING" }
            }
        },
        "required": REQUIRED_FIELDS
    })
}
