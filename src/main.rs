//! ContentBuddy - main entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;

use contentbuddy::bot::Bot;
use contentbuddy::cli::{Args, Commands};
use contentbuddy::config::Config;
use contentbuddy::dialog::Dialog;
use contentbuddy::gigachat::GigaChatClient;
use contentbuddy::logging;
use contentbuddy::storage::Storage;
use contentbuddy::telegram::TelegramClient;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbosity());

    let config = Config::load(&args)?;

    match &args.command {
        Some(Commands::Doctor) => run_doctor(&config).await,
        None => run_bot(&config).await,
    }
}

async fn run_bot(config: &Config) -> Result<()> {
    let storage = Storage::new(config.data_dir.clone());
    storage.ensure_root()?;

    let gigachat = GigaChatClient::new(config)?;

    // GigaChat being down only warns: generation re-authenticates on
    // demand and reports failures to the user.
    match gigachat.health_check().await {
        Ok(()) => tracing::info!("GigaChat connected"),
        Err(e) => {
            tracing::warn!(error = %e, "GigaChat is not reachable, check GIGACHAT_AUTHORIZATION_KEY");
        }
    }

    // A bad bot token is fatal: without it the poll loop cannot work
    let telegram = TelegramClient::new(&config.telegram_api_url, &config.bot_token)?;
    let me = telegram
        .get_me()
        .await
        .context("Telegram getMe failed, check API_TOKEN")?;

    tracing::info!(
        bot = %me.first_name,
        username = me.username.as_deref().unwrap_or("-"),
        "starting long polling"
    );

    if !config.welcome_image.exists() {
        tracing::warn!(
            path = %config.welcome_image.display(),
            "welcome image not found, /start will omit the photo"
        );
    }

    let dialog = Dialog::new(
        Arc::new(gigachat),
        storage,
        Some(config.welcome_image.clone()),
    );

    Bot::new(telegram, dialog).run().await?;
    Ok(())
}

async fn run_doctor(config: &Config) -> Result<()> {
    println!("contentbuddy doctor\n");
    let mut healthy = true;

    let storage = Storage::new(config.data_dir.clone());
    match storage.ensure_root() {
        Ok(()) => println!("✓ data directory: {}", config.data_dir.display()),
        Err(e) => {
            healthy = false;
            println!("✗ data directory: {}", e);
        }
    }

    if config.welcome_image.exists() {
        println!("✓ welcome image: {}", config.welcome_image.display());
    } else {
        println!("• welcome image missing (optional): {}", config.welcome_image.display());
    }

    match TelegramClient::new(&config.telegram_api_url, &config.bot_token) {
        Ok(client) => match client.get_me().await {
            Ok(me) => println!(
                "✓ Telegram: authorized as {}",
                me.username.unwrap_or(me.first_name)
            ),
            Err(e) => {
                healthy = false;
                println!("✗ Telegram: {}", e);
            }
        },
        Err(e) => {
            healthy = false;
            println!("✗ Telegram: {}", e);
        }
    }

    match GigaChatClient::new(config) {
        Ok(client) => match client.health_check().await {
            Ok(()) => println!("✓ GigaChat: access token obtained"),
            Err(e) => {
                healthy = false;
                println!("✗ GigaChat: {}", e);
            }
        },
        Err(e) => {
            healthy = false;
            println!("✗ GigaChat: {}", e);
        }
    }

    println!();
    std::process::exit(if healthy { 0 } else { 1 });
}
