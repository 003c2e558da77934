use std::fmt;

use async_trait::async_trait;

/// Errors that can occur while asking the service.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerError {
    /// Service misconfigured (bad endpoint URL).
    Config(String),
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// Service returned a non-success status.
    Api { status: u16, message: String },
    /// Response body was not the expected `{"answer": "..."}` shape.
    Parse(String),
}

impl fmt::Display for AnswerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerError::Config(msg) => write!(f, "config error: {msg}"),
            AnswerError::Network(msg) => write!(f, "network error: {msg}"),
            AnswerError::Api { status, message } => {
                write!(f, "service error (HTTP {status}): {message}")
            }
            AnswerError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for AnswerError {}

/// Turns a prompt into an answer. Opaque to the caller: transport, payload
/// shape and latency are the implementation's business.
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Short name for logs and the title bar.
    fn name(&self) -> &str;

    async fn send_prompt(&self, prompt: &str) -> Result<String, AnswerError>;
}
