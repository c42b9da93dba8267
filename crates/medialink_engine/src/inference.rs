use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{InferenceError, InferenceFailureKind};

#[derive(Debug, Clone)]
pub struct InferenceSettings {
    /// Base of a chat-completions compatible API, e.g. `https://api.openai.com/v1`.
    pub base_url: String,
    pub api_key: Option<String>,
    pub connect_timeout: Duration,
    /// `None` lets a request run for as long as the server takes.
    pub request_timeout: Option<Duration>,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait InferenceClient: Send + Sync {
    /// Sends `prompt` as a single user message and returns the answer text.
    async fn ask(&self, prompt: &str, model: &str) -> Result<String, InferenceError>;
}

#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    settings: InferenceSettings,
    endpoint: Url,
    client: reqwest::Client,
}

impl ChatCompletionsClient {
    pub fn new(settings: InferenceSettings) -> Result<Self, InferenceError> {
        let endpoint = chat_endpoint(&settings.base_url)?;

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| InferenceError::new(InferenceFailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            endpoint,
            client,
        })
    }
}

fn chat_endpoint(base_url: &str) -> Result<Url, InferenceError> {
    // Trailing slash so `join` appends instead of replacing the last segment.
    let base = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&base)
        .and_then(|base| base.join("chat/completions"))
        .map_err(|err| InferenceError::new(InferenceFailureKind::InvalidEndpoint, err.to_string()))
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

#[async_trait::async_trait]
impl InferenceClient for ChatCompletionsClient {
    async fn ask(&self, prompt: &str, model: &str) -> Result<String, InferenceError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                InferenceError::new(InferenceFailureKind::MissingApiKey, "no API key configured")
            })?;

        let body = ChatRequest {
            model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.error.message)
                .filter(|message| !message.trim().is_empty())
                .or_else(|| status.canonical_reason().map(ToOwned::to_owned));
            let kind = InferenceFailureKind::HttpStatus(status.as_u16());
            return Err(match message {
                Some(message) => InferenceError::new(kind, message),
                None => InferenceError::without_message(kind),
            });
        }

        let parsed: ChatResponse = serde_json::from_slice(&bytes).map_err(|err| {
            InferenceError::new(InferenceFailureKind::MalformedResponse, err.to_string())
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                InferenceError::new(
                    InferenceFailureKind::EmptyAnswer,
                    "the service returned no answer",
                )
            })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> InferenceError {
    if err.is_timeout() {
        return InferenceError::new(InferenceFailureKind::Timeout, "request timed out");
    }
    InferenceError::new(InferenceFailureKind::Network, err.to_string())
}
