//! HTTP client for the Telegram Bot API

use crate::errors::{BotError, Result};
use crate::telegram::types::{ApiResponse, Message, ReplyKeyboardMarkup, Update, User};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Timeout for plain API calls; long polling sets its own
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Telegram Bot API client
pub struct TelegramClient {
    http: Client,
    base_url: String,
}

impl TelegramClient {
    /// Create a client for the given bot token
    pub fn new(api_url: &str, token: &str) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
        })
    }

    /// Identify the bot; fails fast on a bad token
    pub async fn get_me(&self) -> Result<User> {
        let url = format!("{}/getMe", self.base_url);
        let response = self.http.get(&url).send().await?;
        Self::unwrap_response(response).await
    }

    /// Long-poll for updates. The HTTP timeout is padded past the poll
    /// timeout so the server, not the client, ends the wait.
    pub async fn get_updates(&self, offset: Option<i64>, timeout_secs: u64) -> Result<Vec<Update>> {
        let url = format!("{}/getUpdates", self.base_url);

        let mut body = serde_json::json!({
            "timeout": timeout_secs,
            "allowed_updates": ["message"],
        });
        if let Some(offset) = offset {
            body["offset"] = offset.into();
        }

        let response = self
            .http
            .post(&url)
            .json(&body)
            .timeout(Duration::from_secs(timeout_secs + 10))
            .send()
            .await?;

        Self::unwrap_response(response).await
    }

    /// Send a text message, optionally with a reply keyboard
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&ReplyKeyboardMarkup>,
    ) -> Result<Message> {
        let url = format!("{}/sendMessage", self.base_url);

        let mut body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });
        if let Some(keyboard) = keyboard {
            body["reply_markup"] = serde_json::to_value(keyboard)?;
        }

        let response = self.http.post(&url).json(&body).send().await?;
        Self::unwrap_response(response).await
    }

    /// Upload and send an in-memory photo
    pub async fn send_photo(
        &self,
        chat_id: i64,
        bytes: Vec<u8>,
        filename: &str,
        caption: Option<&str>,
        keyboard: Option<&ReplyKeyboardMarkup>,
    ) -> Result<Message> {
        let url = format!("{}/sendPhoto", self.base_url);

        let photo = Part::bytes(bytes).file_name(filename.to_string());
        let mut form = Form::new()
            .text("chat_id", chat_id.to_string())
            .part("photo", photo);
        if let Some(caption) = caption {
            form = form.text("caption", caption.to_string());
        }
        if let Some(keyboard) = keyboard {
            // Multipart fields are strings, so the keyboard goes in encoded
            form = form.text("reply_markup", serde_json::to_string(keyboard)?);
        }

        let response = self.http.post(&url).multipart(form).send().await?;
        Self::unwrap_response(response).await
    }

    /// Unwrap the `{ok, result, description}` envelope
    async fn unwrap_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let envelope: ApiResponse<T> = response.json().await?;

        if envelope.ok {
            envelope
                .result
                .ok_or_else(|| BotError::TelegramApi("ok response without result".to_string()))
        } else {
            Err(BotError::TelegramApi(
                envelope
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}
