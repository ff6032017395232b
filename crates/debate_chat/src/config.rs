//! Settings for the LLM provider and generation limits.
//!
//! Resolution order: built-in defaults, then an optional TOML file, then
//! environment overrides. The API key itself is never stored here; see
//! [`crate::llm::LlmAdapter::from_settings`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChatError, ChatResult};
use crate::llm::LlmProvider;

/// Default settings file looked up in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "debate.toml";

/// Environment variable overriding the provider
pub const PROVIDER_ENV: &str = "DEBATE_PROVIDER";

/// Environment variable overriding the model
pub const MODEL_ENV: &str = "DEBATE_LLM_MODEL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebateSettings {
    /// Which OpenAI-compatible provider to call
    pub provider: LlmProvider,
    /// Model override; provider default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Chat-completions endpoint override (proxies, local gateways)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    pub temperature: f32,
    /// Length cap requested for each rebuttal
    pub rebuttal_max_tokens: u32,
    /// Length cap requested for the conclusion
    pub conclusion_max_tokens: u32,
    pub request_timeout_secs: u64,
    /// Total attempts per request; 1 disables retries
    pub max_attempts: u32,
}

impl Default for DebateSettings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::Groq,
            model: None,
            api_base: None,
            temperature: 0.7,
            rebuttal_max_tokens: 150,
            conclusion_max_tokens: 200,
            request_timeout_secs: 60,
            max_attempts: 1,
        }
    }
}

impl DebateSettings {
    /// Parse settings from TOML text
    pub fn from_toml_str(content: &str) -> ChatResult<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> ChatResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ChatError::Config(format!("Cannot read settings file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Resolve settings for a run.
    ///
    /// An explicit path must exist. Without one, `debate.toml` in `workdir` is
    /// used when present. Environment overrides are applied last.
    pub fn load(explicit: Option<&Path>, workdir: &Path) -> ChatResult<Self> {
        let candidate: Option<PathBuf> = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_path = workdir.join(DEFAULT_SETTINGS_FILE);
                default_path.exists().then_some(default_path)
            }
        };

        let mut settings = match candidate {
            Some(path) => {
                debug!("Loading settings from {}", path.display());
                Self::from_file(&path)?
            }
            None => Self::default(),
        };

        settings.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Apply `DEBATE_PROVIDER` / `DEBATE_LLM_MODEL` from a lookup function
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ChatResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(provider) = lookup(PROVIDER_ENV).filter(|v| !v.trim().is_empty()) {
            self.provider = provider.parse()?;
        }
        if let Some(model) = lookup(MODEL_ENV).filter(|v| !v.trim().is_empty()) {
            self.model = Some(model);
        }
        self.validate()
    }

    /// Model that will actually be requested
    pub fn resolved_model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_string())
    }

    pub fn validate(&self) -> ChatResult<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ChatError::Config(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        if self.rebuttal_max_tokens == 0 || self.conclusion_max_tokens == 0 {
            return Err(ChatError::Config(
                "max token limits must be greater than zero".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(ChatError::Config("max_attempts must be at least 1".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ChatError::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
