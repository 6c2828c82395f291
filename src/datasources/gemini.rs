use crate::config::GeminiConfig;
use crate::error::{Result, TerraCastError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Something that turns a prompt into natural-language text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Google Gemini `generateContent` REST client
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

// Gemini API request/response structures
#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts joined in order
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self, suffix: &str) -> String {
        format!(
            "{}/models/{}{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            suffix
        )
    }

    /// Check that the key is accepted and the model exists
    pub async fn test_connection(&self) -> Result<bool> {
        let response = self
            .client
            .get(self.endpoint(""))
            .header("x-goog-api-key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| TerraCastError::DataSourceUnavailable(format!("Gemini: {}", e)))?;

        Ok(response.status().is_success())
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint(":generateContent"))
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TerraCastError::DataSourceUnavailable(format!("Gemini: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TerraCastError::Gemini { status, body });
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            TerraCastError::DataSourceUnavailable(format!("Failed to parse Gemini response: {}", e))
        })?;

        parsed.into_text().ok_or_else(|| {
            TerraCastError::InvalidData("Gemini response contained no text".into())
        })
    }
}
