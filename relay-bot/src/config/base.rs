//! Base config: Telegram Bot connection, logging, album window. Loaded from env.

use std::time::Duration;

use anyhow::Result;
use relay_telegram::{TelegramConfig, DEFAULT_ALBUM_WINDOW};

use super::env::{parsed, var};

/// Base config: Telegram connection and logging only.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN and TELEGRAM_API_URL (or TELOXIDE_API_URL)
    pub telegram: TelegramConfig,
    /// Log file path
    pub log_file: String,
    /// Quiet window for collecting album parts (ALBUM_WINDOW_MS)
    pub album_window: Duration,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::from_env(token)?;
        let log_file = var("LOG_FILE").unwrap_or_else(|| "logs/price-relay.log".to_string());
        let album_window_ms = parsed(
            "ALBUM_WINDOW_MS",
            DEFAULT_ALBUM_WINDOW.as_millis() as u64,
        )?;

        Ok(Self {
            telegram,
            log_file,
            album_window: Duration::from_millis(album_window_ms),
        })
    }

    /// Validate config (e.g. telegram_api_url must be valid URL if set).
    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()
    }
}
