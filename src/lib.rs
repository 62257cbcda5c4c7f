//! Recruiter bot library

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod input;
pub mod llm;
pub mod model;
pub mod output;

pub use config::Config;
pub use error::{InputError, RecruiterBotError, Result, ServiceError, ValidationFailure};
pub use model::{AnalysisRecord, AnalysisResult};
