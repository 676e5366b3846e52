//! GigaChat API client
//!
//! Covers the three endpoints the bot uses: the OAuth token exchange,
//! chat completions, and file content download for generated images.

pub mod auth;
pub mod client;
pub mod prompts;
pub mod types;

pub use client::GigaChatClient;
