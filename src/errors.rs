//! Error types for the ContentBuddy bot
//!
//! Provides a single error taxonomy for the Telegram transport, the
//! GigaChat backend, and the dialogue engine, with context propagation.

use thiserror::Error;

/// Main error type for the bot
#[derive(Error, Debug)]
pub enum BotError {
    /// Telegram Bot API returned a non-ok response
    #[error("Telegram API error: {0}")]
    TelegramApi(String),

    /// GigaChat API returned a non-success status
    #[error("GigaChat API error: {0}")]
    GigaChatApi(String),

    /// GigaChat authentication failed (OAuth exchange or expired token)
    #[error("GigaChat authentication failed: {0}")]
    Auth(String),

    /// Dialogue received input it cannot act on in the current state
    #[error("Invalid dialogue transition from {state}: {reason}")]
    InvalidTransition { state: String, reason: String },

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors with context
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for bot operations
pub type Result<T> = std::result::Result<T, BotError>;

/// Convert anyhow errors from boundary code (config, storage)
impl From<anyhow::Error> for BotError {
    fn from(err: anyhow::Error) -> Self {
        BotError::Generic(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BotError::TelegramApi("chat not found".to_string());
        assert!(err.to_string().contains("chat not found"));

        let err = BotError::Auth("401".to_string());
        assert!(err.to_string().contains("authentication"));
    }

    #[test]
    fn test_invalid_transition_display() {
        let err = BotError::InvalidTransition {
            state: "MainMenu".to_string(),
            reason: "no session".to_string(),
        };
        assert!(err.to_string().contains("MainMenu"));
        assert!(err.to_string().contains("no session"));
    }

    #[test]
    fn test_from_anyhow() {
        let err: BotError = anyhow::anyhow!("boundary failure").into();
        assert!(matches!(err, BotError::Generic(_)));
        assert!(err.to_string().contains("boundary failure"));
    }
}
