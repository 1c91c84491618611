use slack_morphism::errors::SlackClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Failed to access Slack API: {0}")]
    ApiError(String),

    #[error("Failed to access Gemini API: {0}")]
    GeminiError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Summarization failed: {0}")]
    SummarizationError(String),
}

impl From<SlackClientError> for BotError {
    fn from(error: SlackClientError) -> Self {
        BotError::ApiError(error.to_string())
    }
}

impl From<reqwest::Error> for BotError {
    fn from(error: reqwest::Error) -> Self {
        BotError::HttpError(error.to_string())
    }
}

impl From<tokio::task::JoinError> for BotError {
    fn from(error: tokio::task::JoinError) -> Self {
        BotError::SummarizationError(error.to_string())
    }
}

/// Why a document could not be fetched from esa.
///
/// The dispatcher reports every variant with the same user-facing message;
/// the distinction exists for logs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("URL does not reference an esa post: {0}")]
    InvalidUrl(String),

    #[error("esa post #{0} not found")]
    NotFound(u64),

    #[error("esa API returned HTTP {status} for post #{number}")]
    Status { number: u64, status: u16 },

    #[error("esa API request failed: {0}")]
    Transport(String),

    #[error("esa API response could not be decoded: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            FetchError::Malformed(error.to_string())
        } else {
            FetchError::Transport(error.to_string())
        }
    }
}
