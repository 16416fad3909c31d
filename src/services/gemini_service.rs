use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::services::itinerary_generation_service::PipelineError;
use crate::services::token_service::AccessTokenProvider;

const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Turns a prompt into raw model text. The production impl talks to the
/// Gemini generateContent endpoint; tests substitute doubles.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, PipelineError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

pub struct GeminiService {
    client: Client,
    endpoint: String,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl GeminiService {
    pub fn new(tokens: Arc<dyn AccessTokenProvider>) -> Self {
        Self {
            client: Client::new(),
            endpoint: GEMINI_API_URL.to_string(),
            tokens,
        }
    }
}

fn request_body(prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
    }
}

#[async_trait]
impl TextGenerator for GeminiService {
    async fn generate(&self, prompt: &str) -> Result<String, PipelineError> {
        let token = self.tokens.access_token().await?;

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", token))
            .header("Content-Type", "application/json")
            .json(&request_body(prompt))
            .send()
            .await
            .map_err(|e| PipelineError::Generation {
                message: format!("Generation request failed: {}", e),
                details: None,
            })?;

        let status = response.status();
        if !status.is_success() {
            // Pass the provider's error body through as opaque details.
            let details = response.json::<serde_json::Value>().await.ok();
            return Err(PipelineError::Generation {
                message: format!("Generation endpoint returned {}", status),
                details,
            });
        }

        let body: GenerateContentResponse =
            response.json().await.map_err(|e| PipelineError::Generation {
                message: format!("Failed to parse generation response: {}", e),
                details: None,
            })?;

        body.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| PipelineError::Generation {
                message: "Generation response contained no candidates".to_string(),
                details: None,
            })
    }
}
