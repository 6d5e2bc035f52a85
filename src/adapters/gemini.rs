use crate::domain::model::ExtractionRequest;
use crate::domain::ports::{ConfigProvider, ExtractionService};
use crate::utils::error::{ExportError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Client for the hosted generative-language `generateContent` API with a
/// JSON response schema.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    timeout: Option<Duration>,
}

impl GeminiClient {
    pub fn new(endpoint: &str, model: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(Duration::from_secs(seconds));
        self
    }

    /// `None` when no API key is configured.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Option<Self> {
        let api_key = config.api_key().filter(|key| !key.trim().is_empty())?;
        let client = Self::new(config.ai_endpoint(), config.ai_model(), api_key);
        Some(match config.request_timeout_seconds() {
            Some(seconds) => client.with_timeout(seconds),
            None => client,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }
}

#[async_trait]
impl ExtractionService for GeminiClient {
    async fn extract(&self, request: &ExtractionRequest) -> Result<String> {
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": format!("{}\nDATA:\n{}", request.instruction, request.data) }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.schema
            }
        });

        let mut http_request = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body);

        if let Some(timeout) = self.timeout {
            http_request = http_request.timeout(timeout);
        }

        tracing::debug!("Making extraction request to model {}", self.model);
        let response = http_request.send().await?;
        let status = response.status();
        tracing::debug!("Extraction service response status: {}", status);

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ExportError::ExternalServiceError {
                message: format!("{}: {}", status, detail.trim()),
            });
        }

        let payload: GenerateContentResponse = response.json().await?;
        let candidate = payload.candidates.into_iter().next().ok_or_else(|| {
            ExportError::ExternalServiceError {
                message: "response contained no candidates".to_string(),
            }
        })?;

        Ok(candidate
            .content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect())
    }
}

/// Stand-in used when no credential is configured: the fallback always
/// degrades to zero records.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledExtractionService;

#[async_trait]
impl ExtractionService for DisabledExtractionService {
    async fn extract(&self, _request: &ExtractionRequest) -> Result<String> {
        Err(ExportError::MissingConfigError {
            field: "ai.api_key".to_string(),
        })
    }
}
