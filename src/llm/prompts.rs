//! Prompt template for the compatibility analysis

use log::debug;

/// Compatibility analysis prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub compatibility_analysis: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            compatibility_analysis: COMPATIBILITY_ANALYSIS_TEMPLATE.to_string(),
        }
    }
}

/// Parameters for prompt template substitution
#[derive(Debug, Clone)]
pub struct PromptParams<'a> {
    pub job_description: &'a str,
    pub resume: &'a str,
}

impl PromptTemplates {
    /// Embed both texts verbatim in the analysis instruction.
    pub fn render_compatibility_analysis(&self, params: &PromptParams<'_>) -> String {
        debug!(
            "Rendering prompt: job description {} chars, resume {} chars",
            params.job_description.len(),
            params.resume.len()
        );

        // Single pass so that placeholder text inside the job description is
        // never substituted a second time.
        let (before_job, after_job) = self
            .compatibility_analysis
            .split_once("{job}")
            .unwrap_or((self.compatibility_analysis.as_str(), ""));

        let mut prompt = String::with_capacity(
            self.compatibility_analysis.len() + params.job_description.len() + params.resume.len(),
        );
        prompt.push_str(before_job);
        prompt.push_str(params.job_description);
        prompt.push_str(&after_job.replacen("{resume}", params.resume, 1));
        prompt
    }
}

const COMPATIBILITY_ANALYSIS_TEMPLATE: &str = r#"As an expert technical recruiter, analyze the job description and the resume provided below.
Your task is to produce a structured analysis covering the following points:
1. **Job Title:** Extract the job title from the job description.
2. **Compatibility Score:** A score from 0 to 100 quantifying how well the resume matches the job requirements.
3. **Common Skills:** List the most relevant skills, technologies and qualifications present in both documents.
4. **Improvement Suggestions:** Give 3 to 5 clear, practical suggestions on how the candidate can improve the resume to stand out for this specific job. Focus on adding keywords from the job description, quantifying achievements or restructuring sections.

**Job Description:**
---
{job}
---

**Resume:**
---
{resume}
---

Provide your analysis strictly in the requested JSON format."#;
