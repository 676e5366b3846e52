//! Request and response types for the GigaChat API

use serde::{Deserialize, Serialize};

/// OAuth token exchange response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Absolute expiry, milliseconds since epoch
    pub expires_at: i64,
}

/// Chat completion request
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// `"auto"` lets the model decide to call its built-in functions,
    /// which is how text2image is triggered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<String>,
}

/// A single chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_decodes() {
        let json = r#"{"access_token": "eyJhb...", "expires_at": 1740000000000}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "eyJhb...");
        assert_eq!(token.expires_at, 1740000000000);
    }

    #[test]
    fn test_chat_response_decodes() {
        let json = r#"{
            "choices": [{"message": {"role": "assistant", "content": "Привет!"}}],
            "created": 1700000000,
            "model": "GigaChat"
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices[0].message.content, "Привет!");
    }

    #[test]
    fn test_request_skips_unset_fields() {
        let request = ChatRequest {
            model: "GigaChat".to_string(),
            messages: vec![ChatMessage::user("тест")],
            temperature: None,
            max_tokens: None,
            function_call: Some("auto".to_string()),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("temperature"));
        assert!(!json.contains("max_tokens"));
        assert!(json.contains("\"function_call\":\"auto\""));
    }

    #[test]
    fn test_message_roles() {
        assert_eq!(ChatMessage::system("s").role, "system");
        assert_eq!(ChatMessage::user("u").role, "user");
    }
}
