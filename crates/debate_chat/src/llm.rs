//! LLM adapter for debate rebuttals and conclusions.
//!
//! Talks to OpenAI-compatible chat-completions endpoints (Groq or OpenAI),
//! selected through [`DebateSettings`].

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::DebateSettings;
use crate::error::{ChatError, ChatResult};
use crate::prompts;
use crate::types::{DebateStyle, Message, MessageRole};

/// LLM provider type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    Groq,
    OpenAI,
}

impl LlmProvider {
    /// Environment variable holding the API key
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Self::Groq => "GROQ_API_KEY",
            Self::OpenAI => "OPENAI_API_KEY",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Groq => "llama-3.3-70b-versatile",
            Self::OpenAI => "gpt-4o-mini",
        }
    }

    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Self::Groq => "https://api.groq.com/openai/v1/chat/completions",
            Self::OpenAI => "https://api.openai.com/v1/chat/completions",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groq => "groq",
            Self::OpenAI => "openai",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "groq" => Ok(Self::Groq),
            "openai" => Ok(Self::OpenAI),
            other => Err(ChatError::Config(format!(
                "Unknown LLM provider '{}'. Expected groq or openai",
                other
            ))),
        }
    }
}

/// Text generation used by the debate controller.
///
/// `opposing_argument` sees only the latest user line; `summarize` sees the
/// whole transcript.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn opposing_argument(
        &self,
        topic: &str,
        style: DebateStyle,
        user_text: &str,
    ) -> ChatResult<String>;

    async fn summarize(&self, transcript: &[Message]) -> ChatResult<String>;
}

/// Response from LLM including usage info
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub model: String,
}

/// LLM adapter that handles API calls
pub struct LlmAdapter {
    provider: LlmProvider,
    api_key: String,
    model: String,
    endpoint: String,
    temperature: f32,
    rebuttal_max_tokens: u32,
    conclusion_max_tokens: u32,
    max_attempts: u32,
    client: reqwest::Client,
}

impl LlmAdapter {
    /// Create a new LLM adapter with default limits
    pub fn new(provider: LlmProvider, api_key: String, model: Option<String>) -> Self {
        let defaults = DebateSettings::default();
        Self {
            provider,
            api_key,
            model: model.unwrap_or_else(|| provider.default_model().to_string()),
            endpoint: provider.default_endpoint().to_string(),
            temperature: defaults.temperature,
            rebuttal_max_tokens: defaults.rebuttal_max_tokens,
            conclusion_max_tokens: defaults.conclusion_max_tokens,
            max_attempts: defaults.max_attempts,
            client: reqwest::Client::new(),
        }
    }

    /// Create an adapter from settings, reading the key from the environment
    pub fn from_settings(settings: &DebateSettings) -> ChatResult<Self> {
        Self::from_settings_with(settings, |key| std::env::var(key).ok())
    }

    /// Create an adapter from settings with an explicit key lookup
    pub fn from_settings_with<F>(settings: &DebateSettings, lookup: F) -> ChatResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        settings.validate()?;

        let api_key = lookup(settings.provider.api_key_env())
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ChatError::LlmNotConfigured)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| ChatError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            provider: settings.provider,
            api_key,
            model: settings.resolved_model(),
            endpoint: settings
                .api_base
                .clone()
                .unwrap_or_else(|| settings.provider.default_endpoint().to_string()),
            temperature: settings.temperature,
            rebuttal_max_tokens: settings.rebuttal_max_tokens,
            conclusion_max_tokens: settings.conclusion_max_tokens,
            max_attempts: settings.max_attempts,
            client,
        })
    }

    /// Get the current provider
    pub fn provider(&self) -> &LlmProvider {
        &self.provider
    }

    /// Get the current model
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request(&self, system: &str, user: &str, max_tokens: u32) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatCompletionMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatCompletionMessage {
                    role: MessageRole::User.as_str(),
                    content: user.to_string(),
                },
            ],
            temperature: self.temperature,
            max_tokens,
            stream: false,
        }
    }

    /// Run a single system + user completion
    pub async fn complete(&self, system: &str, user: &str, max_tokens: u32) -> ChatResult<LlmResponse> {
        let request = self.build_request(system, user, max_tokens);
        let mut last_error = None;

        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = Duration::from_secs(1 << (attempt - 1).min(5));
                warn!(
                    "Retrying {} request (attempt {}/{}) after {:?}",
                    self.provider.as_str(),
                    attempt + 1,
                    self.max_attempts,
                    delay
                );
                tokio::time::sleep(delay).await;
            }

            debug!(
                "Sending completion request to {} (model={}, max_tokens={})",
                self.endpoint, self.model, max_tokens
            );

            let response = match self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&request)
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(e) => {
                    last_error = Some(ChatError::LlmError(format!("Network error: {}", e)));
                    continue;
                }
            };

            let status = response.status();

            if status.is_server_error() || status.as_u16() == 429 {
                let body = response.text().await.unwrap_or_default();
                last_error = Some(ChatError::LlmError(format!(
                    "{} API error {} (attempt {}/{}): {}",
                    self.provider.as_str(),
                    status,
                    attempt + 1,
                    self.max_attempts,
                    body
                )));
                continue;
            }

            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(ChatError::Config(format!(
                    "{} rejected the API key ({})",
                    self.provider.as_str(),
                    status
                )));
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ChatError::LlmError(format!(
                    "{} API error {}: {}",
                    self.provider.as_str(),
                    status,
                    body
                )));
            }

            let result: ChatCompletionResponse = response
                .json()
                .await
                .map_err(|e| ChatError::LlmError(format!("Failed to parse response: {}", e)))?;

            return result.into_llm_response(&self.model);
        }

        Err(last_error.unwrap_or_else(|| ChatError::LlmError("Max retries exceeded".to_string())))
    }
}

#[async_trait]
impl TextGenerator for LlmAdapter {
    async fn opposing_argument(
        &self,
        topic: &str,
        style: DebateStyle,
        user_text: &str,
    ) -> ChatResult<String> {
        let system = prompts::rebuttal_system_prompt(topic, style);
        let response = self
            .complete(&system, user_text, self.rebuttal_max_tokens)
            .await?;
        debug!(
            "Rebuttal from {} used {} input / {} output tokens",
            response.model, response.input_tokens, response.output_tokens
        );
        Ok(response.content)
    }

    async fn summarize(&self, transcript: &[Message]) -> ChatResult<String> {
        let debate_text = prompts::transcript_text(transcript);
        let response = self
            .complete(
                prompts::summarizer_system_prompt(),
                &debate_text,
                self.conclusion_max_tokens,
            )
            .await?;
        debug!(
            "Conclusion from {} used {} input / {} output tokens",
            response.model, response.input_tokens, response.output_tokens
        );
        Ok(response.content)
    }
}

// OpenAI-compatible API types
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatCompletionMessage>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatCompletionMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
    usage: Option<ChatCompletionUsage>,
}

impl ChatCompletionResponse {
    fn into_llm_response(self, model: &str) -> ChatResult<LlmResponse> {
        let content = self
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ChatError::LlmError("No choices in provider response".to_string()))?;

        let (input_tokens, output_tokens) = self
            .usage
            .map(|u| (u.prompt_tokens, u.completion_tokens))
            .unwrap_or((0, 0));

        Ok(LlmResponse {
            content,
            input_tokens,
            output_tokens,
            model: model.to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponseMessage {
    content: Option<String>,
}
