//! Text-generation client for the ranking stage.
//!
//! This crate provides a Rust client for the large-language-model that
//! picks the final recommendations. It handles:
//! - The `TextGenerator` seam: prompt in, raw text out
//! - Talking to the Gemini `generateContent` REST endpoint
//! - Mapping transport, HTTP and payload failures to `LlmClientError`
//!
//! The client makes exactly one request per call and never retries.

use async_trait::async_trait;
use thiserror::Error;

pub mod gemini;

pub use gemini::{GeminiClient, GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Errors that can occur when calling the generation service
#[derive(Error, Debug)]
pub enum LlmClientError {
    #[error("API key for the generation service is missing")]
    MissingApiKey,

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Request to generation service failed: {0}")]
    Request(String),

    #[error("Generation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from generation service: {0}")]
    InvalidResponse(String),
}

/// Anything that turns a prompt into text.
///
/// The ranking stage only depends on this trait, so tests can swap in a
/// scripted generator and other providers can be plugged in later.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short identifier for logs (e.g. `gemini-1.5-flash`).
    fn name(&self) -> &str;

    /// Send one prompt and return the raw text of the reply.
    async fn generate(&self, prompt: &str) -> Result<String, LlmClientError>;
}
