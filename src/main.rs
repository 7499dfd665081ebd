//! wikisource-bot: a Telegram inline bot for sharing Wikisource articles
//!
//! This is the main entry point for the application.

use anyhow::{bail, Result};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wikisource_bot::{
    bot::{Bot, TelegramConnector},
    config,
    engines::ClientRegistry,
    network::HttpClient,
    search::QueryRouter,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let settings_path = config::settings_path();
    let settings = config::load(settings_path.as_deref())?;

    // Initialize logging
    let default_level = if settings.general.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting wikisource-bot v{}", wikisource_bot::VERSION);
    match settings_path {
        Some(path) => info!("Loaded settings from: {}", path.display()),
        None => info!("No settings file found, using defaults"),
    }

    if settings.bot.token.is_empty() {
        bail!("No bot token configured (set bot.token or WIKISOURCE_BOT_TOKEN)");
    }

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.search.user_agent, &settings.outgoing)?;
    info!("HTTP client initialized");

    // One wiki client per language; any failure is fatal
    let registry = Arc::new(ClientRegistry::build(&settings.search, &client)?);
    info!("Loaded {} wiki clients", registry.len());

    let router = Arc::new(QueryRouter::with_settings(registry, &settings.search)?);
    let connector = Arc::new(TelegramConnector::new(&settings.bot, client));
    let bot = Bot::new(connector, router, settings.bot.help_message.as_str());

    bot.run_until(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
        }
    })
    .await;

    Ok(())
}
