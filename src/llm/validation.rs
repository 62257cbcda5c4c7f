//! Strict decode-and-validate step for model replies

use crate::error::ValidationFailure;
use crate::llm::schema::{COMMON_SKILLS, COMPATIBILITY_SCORE, IMPROVEMENT_SUGGESTIONS, JOB_TITLE};
use crate::model::AnalysisResult;
use serde_json::{Map, Value};

/// Decode the raw reply text into an [`AnalysisResult`].
///
/// Fractional scores are rounded; anything outside 0..=100 is rejected.
/// Unknown fields are ignored.
pub fn parse_analysis(raw: &str) -> Result<AnalysisResult, ValidationFailure> {
    let value: Value =
        serde_json::from_str(raw.trim()).map_err(|e| ValidationFailure::MalformedJson(e.to_string()))?;

    let object = value.as_object().ok_or(ValidationFailure::NotAnObject)?;

    let job_title = required(object, JOB_TITLE)?
        .as_str()
        .ok_or(ValidationFailure::WrongType {
            field: JOB_TITLE,
            expected: "a string",
        })?
        .to_string();

    let compatibility_score = score(required(object, COMPATIBILITY_SCORE)?)?;
    let common_skills = string_list(object, COMMON_SKILLS)?;
    let improvement_suggestions = string_list(object, IMPROVEMENT_SUGGESTIONS)?;

    Ok(AnalysisResult {
        job_title,
        compatibility_score,
        common_skills,
        improvement_suggestions,
    })
}

fn required<'a>(object: &'a Map<String, Value>, field: &'static str) -> Result<&'a Value, ValidationFailure> {
    object.get(field).ok_or(ValidationFailure::MissingField(field))
}

fn score(value: &Value) -> Result<u8, ValidationFailure> {
    let raw = value.as_f64().ok_or(ValidationFailure::WrongType {
        field: COMPATIBILITY_SCORE,
        expected: "a number",
    })?;

    let rounded = raw.round();
    if !(0.0..=100.0).contains(&rounded) {
        return Err(ValidationFailure::ScoreOutOfRange(raw));
    }
    Ok(rounded as u8)
}

fn string_list(object: &Map<String, Value>, field: &'static str) -> Result<Vec<String>, ValidationFailure> {
    let wrong_type = ValidationFailure::WrongType {
        field,
        expected: "a list of strings",
    };

    required(object, field)?
        .as_array()
        .ok_or_else(|| wrong_type.clone())?
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(|| wrong_type.clone()))
        .collect()
}
