#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! LLM provider abstraction and the surveillance assistant.
//!
//! Supports Anthropic Claude and `OpenAI` via a common trait, selected
//! through environment variables. The assistant anchors every session on
//! a deterministic digest of the current surveillance data and forwards
//! the user's question unmodified, together with the session's message
//! history. There is no tool-use loop; the data context travels inside
//! the system prompt.

pub mod assistant;
pub mod providers;

use thiserror::Error;

/// Errors that can occur during AI operations.
#[derive(Debug, Error)]
pub enum AiError {
    /// HTTP request to the LLM provider failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider-specific error.
    #[error("Provider error: {message}")]
    Provider {
        /// Description of what went wrong.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// Description.
        message: String,
    },
}

/// The result of an assistant turn, always carrying the accumulated
/// messages regardless of whether the provider call succeeded.
///
/// This lets the caller persist the session history even when the turn
/// failed, so the user's question is not lost.
pub struct AskOutcome {
    /// The session message history including the new user question and,
    /// on success, the assistant's answer.
    pub messages: Vec<providers::Message>,

    /// The assistant's answer, or the error that ended the turn.
    pub result: Result<String, AiError>,
}
