//! Runtime configuration
//!
//! Secrets (bot token, GigaChat credentials) come from the process
//! environment; endpoint URLs and paths can additionally be set in an
//! optional TOML file (`~/.contentbuddy/config.toml` or `--config`).
//! Missing secrets fail startup naming the variable.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::cli::Args;

/// Environment variable holding the Telegram bot token
pub const ENV_BOT_TOKEN: &str = "API_TOKEN";

/// Environment variable holding the base64 GigaChat authorization key
pub const ENV_GIGACHAT_AUTH_KEY: &str = "GIGACHAT_AUTHORIZATION_KEY";

/// Environment variable holding the GigaChat OAuth scope
pub const ENV_GIGACHAT_SCOPE: &str = "GIGACHAT_SCOPE";

pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_GIGACHAT_OAUTH_URL: &str = "https://ngw.devices.sberbank.ru:9443/api/v2/oauth";
pub const DEFAULT_GIGACHAT_API_URL: &str = "https://gigachat.devices.sberbank.ru/api/v1";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_WELCOME_IMAGE: &str = "assets/welcome.jpg";

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub gigachat_auth_key: String,
    pub gigachat_scope: String,
    pub telegram_api_url: String,
    pub gigachat_oauth_url: String,
    pub gigachat_api_url: String,
    pub data_dir: PathBuf,
    pub welcome_image: PathBuf,
    /// The Sberbank endpoints present a certificate chain rooted in the
    /// Russian Trusted Root CA; verification is off by default and can be
    /// enabled for deployments that install the CA.
    pub accept_invalid_certs: bool,
}

/// Optional settings read from the TOML config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub telegram_api_url: Option<String>,
    pub gigachat_oauth_url: Option<String>,
    pub gigachat_api_url: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub welcome_image: Option<PathBuf>,
    pub accept_invalid_certs: Option<bool>,
}

impl Config {
    /// Load configuration from the environment, the optional config file
    /// and CLI overrides.
    pub fn load(args: &Args) -> Result<Self> {
        let file = Self::read_file_config(args.config.clone())?;
        let mut config = Self::resolve(file, &|key| std::env::var(key).ok())?;

        if let Some(dir) = &args.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(image) = &args.welcome_image {
            config.welcome_image = image.clone();
        }

        Ok(config)
    }

    /// Assemble a config from file settings and an environment lookup
    fn resolve(file: FileConfig, env: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        let bot_token = match env(ENV_BOT_TOKEN) {
            Some(token) if !token.is_empty() => token,
            _ => bail!("{} is not set", ENV_BOT_TOKEN),
        };
        let gigachat_auth_key = match env(ENV_GIGACHAT_AUTH_KEY) {
            Some(key) if !key.is_empty() => key,
            _ => bail!("{} is not set", ENV_GIGACHAT_AUTH_KEY),
        };
        let gigachat_scope = match env(ENV_GIGACHAT_SCOPE) {
            Some(scope) if !scope.is_empty() => scope,
            _ => bail!("{} is not set", ENV_GIGACHAT_SCOPE),
        };

        Ok(Config {
            bot_token,
            gigachat_auth_key,
            gigachat_scope,
            telegram_api_url: file
                .telegram_api_url
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            gigachat_oauth_url: file
                .gigachat_oauth_url
                .unwrap_or_else(|| DEFAULT_GIGACHAT_OAUTH_URL.to_string()),
            gigachat_api_url: file
                .gigachat_api_url
                .unwrap_or_else(|| DEFAULT_GIGACHAT_API_URL.to_string()),
            data_dir: file.data_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            welcome_image: file
                .welcome_image
                .unwrap_or_else(|| PathBuf::from(DEFAULT_WELCOME_IMAGE)),
            accept_invalid_certs: file.accept_invalid_certs.unwrap_or(true),
        })
    }

    /// Read the config file when present; an explicitly passed path must
    /// exist, the default path is optional.
    fn read_file_config(explicit: Option<PathBuf>) -> Result<FileConfig> {
        let (path, required) = match explicit {
            Some(path) => (path, true),
            None => match Self::default_config_path() {
                Some(path) => (path, false),
                None => return Ok(FileConfig::default()),
            },
        };

        if !path.exists() {
            if required {
                bail!("config file not found: {}", path.display());
            }
            return Ok(FileConfig::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        let file: FileConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;

        Ok(file)
    }

    /// Default config file location
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".contentbuddy").join("config.toml"))
    }
}
