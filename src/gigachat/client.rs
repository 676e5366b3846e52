//! GigaChat completions and image generation client
//!
//! Chat completions go through POST /chat/completions; a 401 triggers one
//! token refresh and a single retry. Image generation rides the same
//! endpoint with the image function enabled: the reply content carries an
//! `<img src="FILE_ID"/>` reference whose bytes are then fetched from the
//! files endpoint.

use crate::config::Config;
use crate::dialog::ContentGenerator;
use crate::errors::{BotError, Result};
use crate::gigachat::auth::TokenManager;
use crate::gigachat::prompts;
use crate::gigachat::types::{ChatMessage, ChatRequest, ChatResponse};
use crate::retry::RetryManager;
use crate::types::ImageRequest;
use async_trait::async_trait;
use regex::Regex;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Model name used for every request
pub const DEFAULT_MODEL: &str = "GigaChat";

/// Sampling temperature for text generation
const TEXT_TEMPERATURE: f32 = 0.7;

/// Completion length cap for text generation
const TEXT_MAX_TOKENS: u32 = 1000;

/// Generation requests can take a while, image ones especially
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// System message that enables the built-in image function
const IMAGE_SYSTEM_PROMPT: &str =
    "Ты — помощник, который умеет создавать изображения по запросу.";

/// GigaChat API client
pub struct GigaChatClient {
    http: Client,
    base_url: String,
    model: String,
    auth: TokenManager,
    retry: RetryManager,
    img_pattern: Regex,
}

impl GigaChatClient {
    /// Create a client from the runtime configuration
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        // Reply shape: <img src="ec49c288-6601-4fe4-8be5-5ef9e3738ac6" fuse="true" />
        let img_pattern = Regex::new(r#"<img src="([^"]+)""#)
            .map_err(|e| BotError::Generic(format!("invalid image pattern: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.gigachat_api_url.clone(),
            model: DEFAULT_MODEL.to_string(),
            auth: TokenManager::new(
                config.gigachat_auth_key.clone(),
                config.gigachat_scope.clone(),
                config.gigachat_oauth_url.clone(),
            ),
            retry: RetryManager::new(),
            img_pattern,
        })
    }

    /// Generate a text completion for the prompt
    pub async fn chat(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: Some(TEXT_TEMPERATURE),
            max_tokens: Some(TEXT_MAX_TOKENS),
            function_call: None,
        };

        self.complete(&request).await
    }

    /// Generate an image for the prompt and return its bytes
    pub async fn text_to_image(&self, prompt: &str) -> Result<Vec<u8>> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(IMAGE_SYSTEM_PROMPT),
                ChatMessage::user(prompt),
            ],
            temperature: None,
            max_tokens: None,
            function_call: Some("auto".to_string()),
        };

        let content = self.complete(&request).await?;
        let file_id = self.extract_file_id(&content).ok_or_else(|| {
            BotError::GigaChatApi(format!("no image reference in model reply: {}", content))
        })?;

        self.download_file(&file_id).await
    }

    /// Verify that credentials work by obtaining a token
    pub async fn health_check(&self) -> Result<()> {
        self.auth.token(&self.http).await.map(|_| ())
    }

    /// Run a completion, refreshing the token once on 401
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        let token = self.auth.token(&self.http).await?;

        match self.complete_once(&token, request).await {
            Err(BotError::Auth(reason)) => {
                tracing::debug!(%reason, "access token rejected, refreshing");
                let token = self.auth.refresh(&self.http).await?;
                self.complete_once(&token, request).await
            }
            other => other,
        }
    }

    async fn complete_once(&self, token: &str, request: &ChatRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .http
            .post(&url)
            .header("Accept", "application/json")
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(BotError::Auth("completion rejected with 401".to_string()));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(BotError::GigaChatApi(format!("HTTP {}: {}", status, body)));
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| BotError::GigaChatApi("completion response has no choices".to_string()))
    }

    /// Pull the file id out of an `<img src="...">` reference
    fn extract_file_id(&self, content: &str) -> Option<String> {
        self.img_pattern
            .captures(content)
            .map(|captures| captures[1].to_string())
    }

    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>> {
        self.retry
            .execute_with_retry(|| self.download_once(file_id))
            .await
    }

    async fn download_once(&self, file_id: &str) -> Result<Vec<u8>> {
        let token = self.auth.token(&self.http).await?;
        let url = format!("{}/files/{}/content", self.base_url, file_id);

        let response = self.http.get(&url).bearer_auth(&token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(BotError::GigaChatApi(format!(
                "file download failed, HTTP {}: {}",
                status, body
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl ContentGenerator for GigaChatClient {
    async fn generate_text(&self, prompt: &str) -> Result<String> {
        self.chat(prompt).await
    }

    async fn generate_image(&self, request: &ImageRequest) -> Result<Vec<u8>> {
        self.text_to_image(&prompts::image_prompt(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> GigaChatClient {
        let config = Config {
            bot_token: "123:abc".to_string(),
            gigachat_auth_key: "a2V5".to_string(),
            gigachat_scope: "GIGACHAT_API_PERS".to_string(),
            telegram_api_url: "https://api.telegram.org".to_string(),
            gigachat_oauth_url: "https://localhost:9443/api/v2/oauth".to_string(),
            gigachat_api_url: "https://localhost/api/v1".to_string(),
            data_dir: "data".into(),
            welcome_image: "assets/welcome.jpg".into(),
            accept_invalid_certs: true,
        };
        GigaChatClient::new(&config).unwrap()
    }

    #[test]
    fn test_extract_file_id() {
        let client = test_client();

        let content = r#"<img src="ec49c288-6601-4fe4-8be5-5ef9e3738ac6" fuse="true" />"#;
        assert_eq!(
            client.extract_file_id(content).as_deref(),
            Some("ec49c288-6601-4fe4-8be5-5ef9e3738ac6")
        );
    }

    #[test]
    fn test_extract_file_id_embedded_in_text() {
        let client = test_client();

        let content = r#"Вот изображение: <img src="abc-123"/> Готово!"#;
        assert_eq!(client.extract_file_id(content).as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_extract_file_id_absent() {
        let client = test_client();
        assert!(client.extract_file_id("обычный текст без изображения").is_none());
    }

    #[tokio::test]
    #[ignore] // Requires GigaChat credentials in the environment
    async fn test_chat_integration() {
        let client = test_client();
        let result = client.chat("Привет!").await;
        assert!(result.is_ok());
    }
}
