//! Error handling for the recruiter bot

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecruiterBotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("Analysis service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Stored data is unreadable: {0}")]
    CorruptData(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Export error: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, RecruiterBotError>;

/// Missing or blank form fields. Raised before the service is contacted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("please fill in both fields: job description and resume")]
    BothEmpty,

    #[error("the job description is empty")]
    EmptyJobDescription,

    #[error("the resume is empty")]
    EmptyResume,
}

/// Failures of the outbound analysis call.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("request to analysis service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("analysis service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("analysis service returned no text")]
    EmptyReply,

    #[error("invalid AI response format ({0})")]
    InvalidResponse(#[from] ValidationFailure),
}

/// Why a model reply was rejected by the decode-and-validate step.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationFailure {
    #[error("reply is not valid JSON: {0}")]
    MalformedJson(String),

    #[error("reply is not a JSON object")]
    NotAnObject,

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{field}` should be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("compatibility score {0} is outside 0..=100")]
    ScoreOutOfRange(f64),
}
