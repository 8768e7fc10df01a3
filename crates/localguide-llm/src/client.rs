//! HTTP client for OpenAI-compatible chat completions.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::LlmError;
use crate::model::LanguageModel;
use crate::types::{ChatMessage, ChatRequest, ChatResponse};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";
const COMPLETIONS_PATH: &str = "chat/completions";

/// Format-constrained answers need little creativity.
const DEFAULT_TEMPERATURE: f32 = 0.2;
const DEFAULT_MAX_TOKENS: u32 = 400;

/// Chat-completions client bound to one model.
pub struct ChatClient {
    client: Client,
    api_key: String,
    endpoint: Url,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl ChatClient {
    /// Creates a client pointed at the production OpenAI API.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, model, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL, e.g. a compatible gateway or
    /// a wiremock server. `base_url` is the API root that `chat/completions`
    /// is appended to.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the `reqwest::Client` cannot be built, or
    /// [`LlmError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(COMPLETIONS_PATH))
            .map_err(|e| LlmError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
            model: model.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one system + user exchange and returns the first choice's text.
    ///
    /// # Errors
    ///
    /// - [`LlmError::Http`] on network failure or timeout.
    /// - [`LlmError::UnexpectedStatus`] on a non-2xx status.
    /// - [`LlmError::Deserialize`] if the body is not a chat-completions response.
    /// - [`LlmError::EmptyChoices`] if the response carries no choices.
    pub async fn chat(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::Deserialize {
                context: format!("chat completions (model={})", self.model),
                source: e,
            })?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(LlmError::EmptyChoices)?;

        tracing::debug!(model = %self.model, chars = text.chars().count(), "chat completion");
        Ok(text)
    }
}

impl LanguageModel for ChatClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        self.chat(system, user).await
    }
}
