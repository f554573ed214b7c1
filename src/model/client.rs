//! Model client for chat completions using an OpenAI-compatible API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Model identifier sent with every request.
pub const MODEL_NAME: &str = "gpt-3.5-turbo";

/// Output budget for a single reply, in tokens.
pub const MAX_OUTPUT_TOKENS: u32 = 50;

/// Default base URL of the completion service.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default timeout for a single HTTP call in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Model client errors.
///
/// Every failure of a completion call lands in exactly one of these kinds,
/// which is what the retry loop matches on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("rate limit exceeded: {0}")]
    RateLimited(String),
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },
    #[error("{0}")]
    Unknown(String),
}

impl From<reqwest::Error> for ModelError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            ModelError::Connection(err.to_string())
        } else {
            ModelError::Unknown(err.to_string())
        }
    }
}

/// Anything that can turn a prompt into a reply.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Send `prompt` as a single user message and return the reply text.
    async fn complete(&self, prompt: &str) -> Result<String, ModelError>;
}

#[async_trait]
impl<T: CompletionService + ?Sized> CompletionService for &T {
    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        (**self).complete(prompt).await
    }
}

/// Configuration for the completion client.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub base_url: String,
    pub api_key: String,
    /// Timeout applied to each HTTP call.
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ModelConfig {
    /// Create a new ModelConfig with custom base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Create a new ModelConfig with custom API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set the per-request timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// OpenAI API response structures.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

/// HTTP client for an OpenAI-compatible chat-completion endpoint.
pub struct ModelClient {
    config: ModelConfig,
    client: Client,
}

impl ModelClient {
    /// Create a new ModelClient with the given configuration.
    pub fn new(config: ModelConfig) -> Result<Self, ModelError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ModelError::Unknown(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Map a non-success HTTP status to its error kind.
    fn classify_status(status: StatusCode, body: &str) -> ModelError {
        let message = extract_error_message(body).unwrap_or_else(|| body.to_string());
        match status {
            StatusCode::UNAUTHORIZED => ModelError::Authentication(message),
            StatusCode::TOO_MANY_REQUESTS => ModelError::RateLimited(message),
            status => ModelError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[async_trait]
impl CompletionService for ModelClient {
    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        let body = ChatCompletionRequest {
            model: MODEL_NAME,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_OUTPUT_TOKENS,
        };

        let url = self.endpoint();
        tracing::debug!(url = %url, model = MODEL_NAME, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::classify_status(status, &error_text));
        }

        let text = response.text().await?;
        let completion: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| ModelError::Unknown(format!("failed to parse response: {e}")))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| ModelError::Unknown("no choices in response".to_string()))
    }
}

/// Pull a readable message out of an API error body.
///
/// Handles `{"error": {"message": "..."}}`, `{"error": "..."}` and
/// `{"message": "..."}`. Returns `None` for anything else.
fn extract_error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;

    if let Some(error) = json.get("error") {
        if let Some(msg) = error.get("message").and_then(Value::as_str) {
            return Some(msg.to_string());
        }
        if let Some(msg) = error.as_str() {
            return Some(msg.to_string());
        }
    }

    json.get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_config_default() {
        let config = ModelConfig::default();
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatCompletionRequest {
            model: MODEL_NAME,
            messages: [ChatMessage {
                role: "user",
                content: "Hola",
            }],
            max_tokens: MAX_OUTPUT_TOKENS,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["max_tokens"], 50);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Hola");
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client =
            ModelClient::new(ModelConfig::default().with_base_url("http://localhost:8000/v1/"))
                .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8000/v1/chat/completions");
    }

    #[test]
    fn test_classify_status() {
        let body = r#"{"error":{"message":"Incorrect API key provided","code":"invalid_api_key"}}"#;
        assert_eq!(
            ModelClient::classify_status(StatusCode::UNAUTHORIZED, body),
            ModelError::Authentication("Incorrect API key provided".to_string())
        );
        assert!(matches!(
            ModelClient::classify_status(StatusCode::TOO_MANY_REQUESTS, "slow down"),
            ModelError::RateLimited(msg) if msg == "slow down"
        ));
        assert_eq!(
            ModelClient::classify_status(StatusCode::INTERNAL_SERVER_ERROR, ""),
            ModelError::Api {
                status: 500,
                message: String::new()
            }
        );
    }

    #[test]
    fn test_extract_error_message() {
        assert_eq!(
            extract_error_message(r#"{"error":"bad model"}"#).as_deref(),
            Some("bad model")
        );
        assert_eq!(
            extract_error_message(r#"{"message":"overloaded"}"#).as_deref(),
            Some("overloaded")
        );
        assert_eq!(extract_error_message("plain text"), None);
    }
}
