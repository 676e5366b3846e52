//! Minimal Telegram Bot API client
//!
//! Hand-rolled over reqwest: the bot only needs getMe, getUpdates long
//! polling, sendMessage with reply keyboards and sendPhoto with an
//! in-memory upload, so no framework is pulled in.

pub mod client;
pub mod split;
pub mod types;

pub use client::TelegramClient;
pub use split::{split_message, MAX_MESSAGE_LEN};
