//! Gemini `generateContent` adapter

use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::llm::prompts::{PromptParams, PromptTemplates};
use crate::llm::schema::analysis_schema;
use crate::llm::validation::parse_analysis;
use crate::model::AnalysisResult;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::time::{Duration, Instant};

/// Anything that can turn a job description and resume into an analysis.
///
/// Callers check that both texts are non-blank before calling.
pub trait AnalysisService {
    fn analyze(
        &self,
        job_description: &str,
        resume: &str,
    ) -> impl Future<Output = Result<AnalysisResult, ServiceError>> + Send;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    prompt_templates: PromptTemplates,
}

impl GeminiClient {
    pub fn new(config: &ServiceConfig, api_key: String) -> Result<Self, ServiceError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            temperature: config.temperature,
            prompt_templates: PromptTemplates::default(),
        })
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model)
    }

    fn build_request(&self, job_description: &str, resume: &str) -> GenerateContentRequest {
        let prompt = self.prompt_templates.render_compatibility_analysis(&PromptParams {
            job_description,
            resume,
        });

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(prompt) }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: analysis_schema(),
                temperature: self.temperature,
            },
        }
    }

    async fn generate(&self, request: &GenerateContentRequest) -> Result<String, ServiceError> {
        let url = self.url();
        info!("Calling analysis service: {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Analysis service error response: {}", body);
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GenerateContentResponse = response.json().await?;
        envelope.text().ok_or(ServiceError::EmptyReply)
    }
}

impl AnalysisService for GeminiClient {
    async fn analyze(&self, job_description: &str, resume: &str) -> Result<AnalysisResult, ServiceError> {
        let start_time = Instant::now();
        let request = self.build_request(job_description, resume);

        let text = self.generate(&request).await?;
        debug!("Raw analysis reply: {}", text);

        let result = parse_analysis(&text)?;
        info!(
            "Analysis for '{}' scored {} in {}ms",
            result.job_title,
            result.compatibility_score,
            start_time.elapsed().as_millis()
        );
        Ok(result)
    }
}
