//! Gemini provider.
//!
//! Non-streaming `generateContent` calls against the Generative Language API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::provider::{LlmProvider, ProviderError};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
        }
    }

    fn request_url(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_BASE, self.model, self.api_key
        )
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug!(model = %self.model, "sending request to Gemini");

        let resp = self
            .client
            .post(self.request_url())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let text = resp.text().await.unwrap_or_default();
            warn!(status, body = %text, "Gemini API error");
            return Err(ProviderError::Api {
                status,
                message: text,
            });
        }

        let api_resp: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        // Some failures arrive as a 200 with an error object in the body.
        if let Some(error) = api_resp.error {
            warn!(status, message = %error.message, "Gemini API error");
            return Err(ProviderError::Api {
                status,
                message: error.message,
            });
        }

        Ok(extract_text(api_resp))
    }
}

/// Concatenate the text parts of the first candidate.
///
/// Missing candidates or parts yield an empty string; the analyzer treats
/// that as an unusable response and falls back.
fn extract_text(resp: GenerateResponse) -> String {
    let mut out = String::new();
    if let Some(candidates) = resp.candidates {
        if let Some(candidate) = candidates.into_iter().next() {
            if let Some(content) = candidate.content {
                for part in content.parts {
                    if let Some(text) = part.text {
                        out.push_str(&text);
                    }
                }
            }
        }
    }
    out
}

// Gemini API request/response types (private — (de)serialization only)

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}
