//! Retry with bounded exponential backoff
//!
//! Used around the GigaChat OAuth exchange and file downloads, where the
//! upstream endpoints are known to fail transiently. Delays are capped and
//! jittered; non-transient errors return immediately.

use crate::errors::{BotError, Result};
use std::time::Duration;
use tokio::time::sleep;

/// Maximum number of attempts
pub const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff
const BASE_DELAY_MS: u64 = 500;

/// Maximum delay cap
const MAX_DELAY_MS: u64 = 8000;

/// Retry manager with exponential backoff
#[derive(Debug, Clone)]
pub struct RetryManager {
    max_retries: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
    enable_jitter: bool,
}

impl Default for RetryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryManager {
    /// Create a retry manager with default settings
    pub fn new() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            base_delay_ms: BASE_DELAY_MS,
            max_delay_ms: MAX_DELAY_MS,
            enable_jitter: true,
        }
    }

    /// Create a retry manager with custom attempt count and base delay
    pub fn with_config(max_retries: u32, base_delay_ms: u64) -> Self {
        Self {
            max_retries,
            base_delay_ms,
            max_delay_ms: MAX_DELAY_MS,
            enable_jitter: true,
        }
    }

    /// Execute an operation, retrying transient failures
    pub async fn execute_with_retry<F, Fut, T>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if !Self::is_retryable(&e) {
                        return Err(e);
                    }

                    attempt += 1;
                    if attempt >= self.max_retries {
                        return Err(e);
                    }

                    let delay = self.calculate_delay(attempt);
                    tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, "retrying after transient error");
                    sleep(delay).await;
                }
            }
        }
    }

    /// Delay for the given attempt: binary exponential, capped, jittered
    fn calculate_delay(&self, attempt: u32) -> Duration {
        let exponential = self.base_delay_ms.saturating_mul(2u64.saturating_pow(attempt));
        let delay_ms = exponential.min(self.max_delay_ms);

        let final_delay = if self.enable_jitter {
            // ±25% random variation
            let jitter = (delay_ms / 4) as i64;
            let random_jitter = (rand::random::<f64>() * 2.0 - 1.0) * jitter as f64;
            ((delay_ms as i64) + random_jitter as i64).max(0) as u64
        } else {
            delay_ms
        };

        Duration::from_millis(final_delay)
    }

    /// Transport and upstream errors are transient; everything that points
    /// at our own request (auth, parsing, config) is not.
    fn is_retryable(error: &BotError) -> bool {
        match error {
            BotError::Http(_) => true,
            BotError::GigaChatApi(_) => true,
            BotError::TelegramApi(_) => false,
            BotError::Auth(_) => false,
            BotError::Serialization(_) => false,
            BotError::Config(_) => false,
            BotError::InvalidTransition { .. } => false,
            BotError::Io(_) => false,
            BotError::Generic(_) => false,
        }
    }

    /// Get max attempt count
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_success_first_attempt() {
        let retry = RetryManager::new();

        let attempts = Arc::new(Mutex::new(0));
        let counter = attempts.clone();

        let result = retry
            .execute_with_retry(move || {
                let counter = counter.clone();
                async move {
                    *counter.lock().unwrap() += 1;
                    Ok::<i32, BotError>(42)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(*attempts.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_success_after_transient_failures() {
        let retry = RetryManager::with_config(5, 10);

        let attempts = Arc::new(Mutex::new(0));
        let counter = attempts.clone();

        let result = retry
            .execute_with_retry(move || {
                let counter = counter.clone();
                async move {
                    let mut n = counter.lock().unwrap();
                    *n += 1;
                    let current = *n;
                    drop(n);

                    if current < 3 {
                        Err(BotError::GigaChatApi("HTTP 502".to_string()))
                    } else {
                        Ok(42)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(*attempts.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_max_attempts_exceeded() {
        let retry = RetryManager::with_config(3, 10);

        let attempts = Arc::new(Mutex::new(0));
        let counter = attempts.clone();

        let result = retry
            .execute_with_retry(move || {
                let counter = counter.clone();
                async move {
                    *counter.lock().unwrap() += 1;
                    Err::<i32, _>(BotError::GigaChatApi("HTTP 502".to_string()))
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(*attempts.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_error() {
        let retry = RetryManager::new();

        let attempts = Arc::new(Mutex::new(0));
        let counter = attempts.clone();

        let result = retry
            .execute_with_retry(move || {
                let counter = counter.clone();
                async move {
                    *counter.lock().unwrap() += 1;
                    Err::<i32, _>(BotError::Auth("bad credentials".to_string()))
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(*attempts.lock().unwrap(), 1);
    }

    #[test]
    fn test_calculate_delay_without_jitter() {
        let retry = RetryManager {
            max_retries: 3,
            base_delay_ms: 500,
            max_delay_ms: 8000,
            enable_jitter: false,
        };

        assert_eq!(retry.calculate_delay(1), Duration::from_millis(1000));
        assert_eq!(retry.calculate_delay(2), Duration::from_millis(2000));
        assert_eq!(retry.calculate_delay(3), Duration::from_millis(4000));
    }

    #[test]
    fn test_delay_cap() {
        let retry = RetryManager {
            max_retries: 3,
            base_delay_ms: 500,
            max_delay_ms: 8000,
            enable_jitter: false,
        };

        assert_eq!(retry.calculate_delay(10), Duration::from_millis(8000));
    }

    #[test]
    fn test_is_retryable() {
        assert!(RetryManager::is_retryable(&BotError::GigaChatApi("502".to_string())));
        assert!(!RetryManager::is_retryable(&BotError::Auth("401".to_string())));
        assert!(!RetryManager::is_retryable(&BotError::Config("missing".to_string())));
    }
}
