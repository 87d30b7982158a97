//! Gemini API delivery
//!
//! Posts the prompt to `models/{model}:generateContent`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::{DeliveryHandle, DeliveryReport, PromptDelivery, excerpt};
use crate::config::{GeminiConfig, resolve_api_key};
use crate::types::{Result, ReviewError};

const METHOD: &str = "gemini";

pub struct GeminiApiDelivery {
    /// API key stored securely - never exposed in logs or debug output
    api_key: SecretString,
    api_base: String,
    model: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiApiDelivery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiApiDelivery")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

impl GeminiApiDelivery {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = resolve_api_key(config.api_key, "GEMINI_API_KEY").ok_or_else(|| {
            ReviewError::Config(
                "Gemini API key not found. Set GEMINI_API_KEY env var or provide in config"
                    .to_string(),
            )
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ReviewError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key: SecretString::from(api_key),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

fn build_request(prompt: &str) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
    }
}

/// Concatenated text parts of the first candidate
pub fn parse_generate_response(body: &str) -> Result<String> {
    let response: GenerateResponse = serde_json::from_str(body).map_err(|e| {
        ReviewError::delivery(METHOD, format!("Failed to parse Gemini response: {}", e))
    })?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>())
        .ok_or_else(|| ReviewError::delivery(METHOD, "No candidates in Gemini response"))
}

#[async_trait]
impl PromptDelivery for GeminiApiDelivery {
    fn name(&self) -> &str {
        METHOD
    }

    async fn launch(&self, prompt: &str) -> Result<DeliveryHandle> {
        info!("Sending prompt to Gemini (model: {})", self.model);

        let request = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&build_request(prompt));
        let start = Instant::now();

        Ok(DeliveryHandle::spawn(METHOD, async move {
            let response = request.send().await.map_err(|e| {
                ReviewError::delivery(METHOD, format!("Gemini request failed: {}", e))
            })?;

            let status = response.status();
            let body = response.text().await?;
            debug!("Gemini answered {} ({} bytes)", status, body.len());

            let (success, text) = if status.is_success() {
                (true, parse_generate_response(&body)?)
            } else {
                (false, body)
            };

            Ok(DeliveryReport {
                method: METHOD.to_string(),
                success,
                exit_code: Some(i32::from(status.as_u16())),
                excerpt: excerpt(&text),
                elapsed: start.elapsed(),
            })
        }))
    }
}
