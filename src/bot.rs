//! Long-polling runtime
//!
//! Pulls updates sequentially, routes each message through the dialogue
//! engine and sends the resulting replies. Transport errors back the loop
//! off; a failing handler is logged and never kills the loop.

use crate::dialog::{Dialog, Reply};
use crate::errors::Result;
use crate::telegram::types::Update;
use crate::telegram::TelegramClient;
use std::time::Duration;
use tokio::time::sleep;

/// Long-poll timeout passed to getUpdates
pub const POLL_TIMEOUT_SECS: u64 = 30;

/// Pause after a failed getUpdates call
const ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// The running bot: Telegram transport plus dialogue engine
pub struct Bot {
    telegram: TelegramClient,
    dialog: Dialog,
}

impl Bot {
    pub fn new(telegram: TelegramClient, dialog: Dialog) -> Self {
        Self { telegram, dialog }
    }

    /// Poll for updates until the process is stopped
    pub async fn run(&self) -> Result<()> {
        let mut offset: Option<i64> = None;

        loop {
            match self.telegram.get_updates(offset, POLL_TIMEOUT_SECS).await {
                Ok(updates) => {
                    for update in updates {
                        let next = update.update_id + 1;
                        offset = Some(offset.map_or(next, |current| current.max(next)));
                        self.process_update(update).await;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "getUpdates failed, backing off");
                    sleep(ERROR_BACKOFF).await;
                }
            }
        }
    }

    async fn process_update(&self, update: Update) {
        let Some(message) = update.message else {
            return;
        };
        // Non-text messages and messages without a sender are skipped
        let (Some(text), Some(from)) = (message.text, message.from) else {
            return;
        };

        let chat_id = message.chat.id;

        tracing::debug!(chat_id, user_id = from.id, "handling message");

        match self.dialog.handle(chat_id, from.id, &text).await {
            Ok(replies) => self.send_replies(chat_id, replies).await,
            Err(e) => {
                tracing::error!(chat_id, error = %e, "dialogue handler failed");
            }
        }
    }

    async fn send_replies(&self, chat_id: i64, replies: Vec<Reply>) {
        for reply in replies {
            let result = match reply {
                Reply::Text {
                    text,
                    keyboard,
                    delay_before,
                } => {
                    if let Some(delay) = delay_before {
                        sleep(delay).await;
                    }
                    self.telegram
                        .send_message(chat_id, &text, keyboard.as_ref())
                        .await
                        .map(|_| ())
                }
                Reply::Photo {
                    bytes,
                    filename,
                    caption,
                    keyboard,
                } => self
                    .telegram
                    .send_photo(chat_id, bytes, &filename, caption.as_deref(), keyboard.as_ref())
                    .await
                    .map(|_| ()),
            };

            if let Err(e) = result {
                tracing::error!(chat_id, error = %e, "failed to send reply");
            }
        }
    }
}
