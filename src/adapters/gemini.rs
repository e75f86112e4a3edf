//! Gemini `generateContent` REST client.

use crate::domain::model::{ChatMessage, ChatRole};
use crate::domain::ports::GenerativeModel;
use crate::utils::error::{ComplianceError, Result};
use crate::utils::json::truncate_chars;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ERROR_BODY_CHARS: usize = 300;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

fn role_name(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Model => "model",
    }
}

pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn generate_content(&self, request: &GenerateRequest<'_>) -> Result<String> {
        let url = self.endpoint();
        tracing::debug!("Calling Gemini model {} ({} turns)", self.config.model, request.contents.len());

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ComplianceError::ModelResponseError {
                message: format!("HTTP {}: {}", status, truncate_chars(&body, ERROR_BODY_CHARS)),
            });
        }

        let payload: GenerateResponse = response.json().await?;
        let text: String = payload
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect::<String>())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ComplianceError::ModelResponseError {
                message: "response contained no candidate text".to_string(),
            });
        }

        tracing::debug!("Gemini returned {} chars", text.len());
        Ok(text)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: [Part { text: prompt }],
            }],
        };
        self.generate_content(&request).await
    }

    async fn chat(&self, history: &[ChatMessage], message: &str) -> Result<String> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| Content {
                role: role_name(turn.role),
                parts: [Part { text: &turn.content }],
            })
            .collect();
        contents.push(Content {
            role: "user",
            parts: [Part { text: message }],
        });

        self.generate_content(&GenerateRequest { contents }).await
    }
}
