//! Errors from the AI layer.

/// Errors produced while serving an AI request.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// The HTTP request to the model provider failed (network, DNS, TLS).
    #[error("Completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Completion API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The model response could not be parsed into the expected schema.
    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    /// The stored request input could not be deserialized.
    #[error("Invalid request input: {0}")]
    InvalidInput(String),
}
