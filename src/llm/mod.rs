//! Analysis service adapter: prompt, declared schema, client and reply validation

pub mod client;
pub mod prompts;
pub mod schema;
pub mod validation;

pub use client::{AnalysisService, GeminiClient};
