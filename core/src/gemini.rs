//! HTTP client for the Gemini `generateContent` endpoint.

use async_trait::async_trait;
use proxyscope_common::config::InsightConfig;
use proxyscope_common::insights::{InsightError, InsightGenerator, InsightPrompt};
use proxyscope_common::models::insight::{Insight, RiskLevel};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

/// [`InsightGenerator`] backed by Google Gemini structured output.
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    /// Builds a client from `config`. Fails when no API key is configured.
    pub fn new(config: &InsightConfig) -> Result<Self, InsightError> {
        let api_key: String = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(InsightError::MissingCredentials)?
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(transport)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl InsightGenerator for GeminiClient {
    async fn generate(&self, prompt: &InsightPrompt) -> Result<Vec<Insight>, InsightError> {
        let url: String = self.url();
        let body: Value = request_body(&prompt.render()?);

        info!(model = %self.model, count = prompt.flagged.len(), "calling gemini");
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        let status = resp.status();
        let text: String = resp.text().await.map_err(transport)?;
        if !status.is_success() {
            return Err(InsightError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!(bytes = text.len(), "gemini response received");
        parse_response(&text)
    }
}

fn transport(e: reqwest::Error) -> InsightError {
    InsightError::Transport(Box::new(e))
}

/// JSON body asking for an array of insights constrained by a response schema.
pub fn request_body(prompt_text: &str) -> Value {
    let levels: Vec<&str> = RiskLevel::ALL.iter().map(|level| level.as_str()).collect();
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt_text }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "ip": { "type": "STRING" },
                        "summary": { "type": "STRING" },
                        "riskLevel": { "type": "STRING", "enum": levels },
                        "recommendation": { "type": "STRING" }
                    },
                    "required": ["ip", "summary", "riskLevel", "recommendation"]
                }
            }
        }
    })
}

/// Extracts the insight array from a `generateContent` response.
///
/// A candidate without text counts as an empty array.
pub fn parse_response(body: &str) -> Result<Vec<Insight>, InsightError> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    let candidate: Candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(InsightError::EmptyResponse)?;

    let text: String = candidate
        .content
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .unwrap_or_else(|| "[]".to_string());

    Ok(serde_json::from_str(&text)?)
}
