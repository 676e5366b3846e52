//! Per-chat dialogue engine
//!
//! Drives the conversation as a deterministic finite state machine: menus
//! select a flow, each flow collects its inputs step by step and ends in a
//! generation request. Handlers return outgoing replies instead of sending
//! them, so the engine runs against a mock generator in tests.

pub mod handlers;
pub mod keyboards;
pub mod session;
pub mod state;
pub mod texts;

pub use handlers::Dialog;
pub use session::{Session, SessionStore};
pub use state::DialogState;

use crate::errors::Result;
use crate::telegram::types::ReplyKeyboardMarkup;
use crate::types::ImageRequest;
use async_trait::async_trait;
use std::time::Duration;

/// Content generation seam between the dialogue and the GigaChat client
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate a text completion for the fully assembled prompt
    async fn generate_text(&self, prompt: &str) -> Result<String>;

    /// Generate an image and return its encoded bytes
    async fn generate_image(&self, request: &ImageRequest) -> Result<Vec<u8>>;
}

/// An outgoing reply produced by a dialogue handler
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text {
        text: String,
        keyboard: Option<ReplyKeyboardMarkup>,
        /// Pause before sending, used between content-plan parts
        delay_before: Option<Duration>,
    },
    Photo {
        bytes: Vec<u8>,
        filename: String,
        caption: Option<String>,
        keyboard: Option<ReplyKeyboardMarkup>,
    },
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text {
            text: text.into(),
            keyboard: None,
            delay_before: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: ReplyKeyboardMarkup) -> Self {
        Reply::Text {
            text: text.into(),
            keyboard: Some(keyboard),
            delay_before: None,
        }
    }

    pub fn delayed_text(text: impl Into<String>, delay: Duration) -> Self {
        Reply::Text {
            text: text.into(),
            keyboard: None,
            delay_before: Some(delay),
        }
    }

    pub fn photo(
        bytes: Vec<u8>,
        filename: impl Into<String>,
        caption: Option<String>,
        keyboard: Option<ReplyKeyboardMarkup>,
    ) -> Self {
        Reply::Photo {
            bytes,
            filename: filename.into(),
            caption,
            keyboard,
        }
    }

    /// Text content of a text reply, for assertions and logging
    pub fn text_content(&self) -> Option<&str> {
        match self {
            Reply::Text { text, .. } => Some(text),
            Reply::Photo { .. } => None,
        }
    }
}
