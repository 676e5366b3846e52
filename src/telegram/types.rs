//! Serde types for the Bot API subset the bot uses

use serde::{Deserialize, Serialize};

/// Envelope every Bot API method responds with
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

/// An incoming update from long polling
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

/// A message inside an update
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

/// Telegram user
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Chat the message arrived in
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// Reply keyboard shown under the input field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    pub resize_keyboard: bool,
}

/// A single reply keyboard button
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyboardButton {
    pub text: String,
}

impl ReplyKeyboardMarkup {
    /// Build a resizable keyboard from rows of button labels
    pub fn from_rows<S: AsRef<str>>(rows: &[&[S]]) -> Self {
        Self {
            keyboard: rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|label| KeyboardButton {
                            text: label.as_ref().to_string(),
                        })
                        .collect()
                })
                .collect(),
            resize_keyboard: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_decodes() {
        let json = r#"{
            "update_id": 715,
            "message": {
                "message_id": 3,
                "from": {"id": 42, "is_bot": false, "first_name": "Аня", "username": "anya"},
                "chat": {"id": 42, "type": "private"},
                "date": 1700000000,
                "text": "Привет"
            }
        }"#;

        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(update.update_id, 715);
        let message = update.message.unwrap();
        assert_eq!(message.chat.id, 42);
        assert_eq!(message.text.as_deref(), Some("Привет"));
        assert_eq!(message.from.unwrap().first_name, "Аня");
    }

    #[test]
    fn test_update_without_message() {
        // Edited messages, callbacks etc. arrive without a `message` field
        let json = r#"{"update_id": 716}"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert!(update.message.is_none());
    }

    #[test]
    fn test_api_response_ok() {
        let json = r#"{"ok": true, "result": [{"update_id": 1}]}"#;
        let response: ApiResponse<Vec<Update>> = serde_json::from_str(json).unwrap();
        assert!(response.ok);
        assert_eq!(response.result.unwrap().len(), 1);
    }

    #[test]
    fn test_api_response_error() {
        let json = r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#;
        let response: ApiResponse<Vec<Update>> = serde_json::from_str(json).unwrap();
        assert!(!response.ok);
        assert_eq!(response.description.as_deref(), Some("Unauthorized"));
    }

    #[test]
    fn test_keyboard_from_rows() {
        let keyboard = ReplyKeyboardMarkup::from_rows(&[&["Да", "Нет"], &["Отмена"]]);

        assert!(keyboard.resize_keyboard);
        assert_eq!(keyboard.keyboard.len(), 2);
        assert_eq!(keyboard.keyboard[0][1].text, "Нет");

        let json = serde_json::to_value(&keyboard).unwrap();
        assert_eq!(json["keyboard"][1][0]["text"], "Отмена");
        assert_eq!(json["resize_keyboard"], true);
    }
}
