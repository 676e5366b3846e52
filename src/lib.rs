//! ContentBuddy - Telegram content assistant for nonprofits
//!
//! A long-running Telegram bot that helps nonprofit organizations produce
//! social-media content through the GigaChat API:
//!
//! - Post texts (from an idea, for an event, in the style of an example)
//! - Images via GigaChat's built-in text2image function
//! - Weekly/monthly content plans
//! - Proofreading of submitted texts
//!
//! The bot drives a per-chat finite-state dialogue over long polling and
//! persists every completed flow as a JSON record under the data directory.

pub mod errors;
pub mod types;
pub mod retry;
pub mod config;
pub mod cli;
pub mod logging;

// API clients
pub mod gigachat;
pub mod telegram;

// Dialogue engine and persistence
pub mod dialog;
pub mod storage;

// Long-polling runtime
pub mod bot;

// Re-export commonly used types
pub use errors::{BotError, Result};
