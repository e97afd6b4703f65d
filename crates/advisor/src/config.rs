//! Advisor settings.
//!
//! There is no config file: the CLI fills this from flags and
//! environment variables, library callers build it directly.

use std::time::Duration;

use llm_client::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

use crate::error::AdvisorError;

/// Environment variable holding the generation-service key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: Option<f32>,
    pub timeout: Duration,
}

impl AdvisorConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: Some(0.4),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reject settings the ranking stage cannot work with.
    pub fn validate(&self) -> Result<(), AdvisorError> {
        if self.api_key.trim().is_empty() {
            return Err(AdvisorError::Configuration(format!(
                "no API key for the generation service (set {} or pass --api-key)",
                API_KEY_ENV
            )));
        }
        if self.model.trim().is_empty() {
            return Err(AdvisorError::Configuration("model name is empty".to_string()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(AdvisorError::Configuration(format!(
                "base URL must be http(s): {}",
                self.base_url
            )));
        }
        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(AdvisorError::Configuration(format!(
                    "temperature must be within 0.0..=2.0, got {}",
                    t
                )));
            }
        }
        if self.timeout.is_zero() {
            return Err(AdvisorError::Configuration("timeout must be positive".to_string()));
        }
        Ok(())
    }

    pub fn to_gemini_config(&self) -> GeminiConfig {
        GeminiConfig::new(self.api_key.clone())
            .with_model(self.model.clone())
            .with_base_url(self.base_url.clone())
            .with_temperature(self.temperature)
            .with_timeout(self.timeout)
    }
}
