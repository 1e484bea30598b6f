//! Router error types.

use thiserror::Error;

/// Errors from routing a request.
#[derive(Debug, Error)]
pub enum RouterError {
    /// No API key was passed in or found in the environment.
    #[error(
        "Gemini API key not found. Set the GEMINI_API_KEY environment variable or pass a key explicitly."
    )]
    MissingApiKey,

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an error status.
    #[error("Gemini API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    /// The model output could not be turned into a routing result.
    #[error("Failed to parse routing response: {reason}")]
    Parse { reason: String, response: String },
}

impl RouterError {
    pub(crate) fn parse(reason: impl Into<String>, response: &str) -> Self {
        Self::Parse {
            reason: reason.into(),
            response: response.to_string(),
        }
    }
}
