//! Vision extraction: send an inline image to an OpenAI-compatible
//! chat-completion endpoint and read back the transcribed text.

use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use persocr_core::{ExtractionRequestError, PreparedPayload, TextExtractor};

use crate::cleanup::clean_extracted_text;
use crate::prompt::PERSIAN_OCR_PROMPT;

/// Longest slice of an error body kept in a [`ExtractionRequestError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Endpoint, credential, model, and timeout for the extraction service.
#[derive(Clone)]
pub struct ExtractorConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl ExtractorConfig {
    pub const DEFAULT_API_URL: &'static str = "https://openrouter.ai/api/v1/chat/completions";
    pub const DEFAULT_MODEL: &'static str = "qwen/qwen2.5-vl-72b-instruct:free";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            model: Self::DEFAULT_MODEL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for ExtractorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractorConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Request body: one user message holding the instruction and the image.
#[derive(Debug, Serialize)]
pub struct ExtractionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

impl ExtractionRequest {
    pub fn new(model: impl Into<String>, instruction: impl Into<String>, payload: &PreparedPayload) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text { text: instruction.into() },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: payload.data_uri() },
                    },
                ],
            }],
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Extractor backed by a remote chat-completion endpoint (OpenRouter by default).
pub struct RemoteExtractor {
    client: Client,
    config: ExtractorConfig,
}

impl RemoteExtractor {
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractionRequestError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ExtractionRequestError::Client(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn map_transport_error(&self, err: reqwest::Error) -> ExtractionRequestError {
        if err.is_timeout() {
            ExtractionRequestError::Timeout(self.config.timeout)
        } else {
            ExtractionRequestError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl TextExtractor for RemoteExtractor {
    fn name(&self) -> &str {
        "remote"
    }

    async fn extract(&self, payload: &PreparedPayload) -> Result<String, ExtractionRequestError> {
        let start = Instant::now();
        let body = ExtractionRequest::new(&self.config.model, PERSIAN_OCR_PROMPT, payload);

        info!(
            model = %self.config.model,
            width = payload.width,
            height = payload.height,
            "Sending image to extraction service"
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        debug!(
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Extraction service responded"
        );

        if !status.is_success() {
            return Err(ExtractionRequestError::Status {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let chat: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| ExtractionRequestError::MalformedResponse(e.to_string()))?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.is_empty())
            .ok_or(ExtractionRequestError::MissingContent)?;

        let cleaned = clean_extracted_text(&content);
        if cleaned.is_empty() {
            return Err(ExtractionRequestError::EmptyContent);
        }
        Ok(cleaned)
    }
}
