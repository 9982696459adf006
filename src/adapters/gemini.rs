use crate::core::prompt::GenerationRequest;
use crate::domain::ports::{ServiceConfig, TextGenerator};
use crate::utils::error::{EstimateError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `generateContent` call against the Gemini REST API. The credential
/// travels in the `x-goog-api-key` header so it never appears in URLs.
pub struct GeminiGenerator {
    client: Client,
    endpoint: String,
    model: String,
    temperature: f32,
}

impl GeminiGenerator {
    pub fn new(config: &impl ServiceConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.api_endpoint().trim_end_matches('/').to_string(),
            model: config.model().to_string(),
            temperature: config.temperature(),
        }
    }

    fn request_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// First candidate's first part text; empty when the service
    /// returned no usable payload.
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .map(|part| part.text)
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, request: &GenerationRequest, credential: &str) -> Result<String> {
        let body = GenerateContentBody {
            contents: vec![Content {
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                response_mime_type: "application/json",
                response_schema: request.schema.clone(),
            },
        };

        let url = self.request_url();
        tracing::debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", credential)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::debug!("Generation service error {}: {}", status, message);
            return Err(EstimateError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let raw = response.text().await?;
        let envelope: GenerateContentResponse = serde_json::from_str(&raw)?;
        Ok(envelope.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_first_candidate_text() {
        let envelope: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [
                { "content": { "parts": [{ "text": "{\"a\":1}" }, { "text": "ignored" }] } },
                { "content": { "parts": [{ "text": "ignored too" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(envelope.text(), "{\"a\":1}");
    }

    #[test]
    fn test_missing_candidates_yield_empty_text() {
        let envelope: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(envelope.text(), "");

        let envelope: GenerateContentResponse =
            serde_json::from_value(serde_json::json!({ "candidates": [{ "content": null }] }))
                .unwrap();
        assert_eq!(envelope.text(), "");
    }
}
