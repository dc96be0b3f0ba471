//! Minimal Telegram connection config: token and API URL.
//! Loaded from BOT_TOKEN and TELEGRAM_API_URL (or TELOXIDE_API_URL).

use anyhow::Result;
use std::env;
use tracing::error;

/// Telegram connection settings (transport only).
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
}

fn env_value(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TelegramConfig {
    /// Loads from env. `token` overrides BOT_TOKEN; one of them is required.
    pub fn from_env(token: Option<String>) -> Result<Self> {
        let bot_token = token
            .or_else(|| env_value("BOT_TOKEN"))
            .ok_or_else(|| anyhow::anyhow!("BOT_TOKEN not set"))?;
        let telegram_api_url =
            env_value("TELEGRAM_API_URL").or_else(|| env_value("TELOXIDE_API_URL"));
        Ok(Self {
            bot_token,
            telegram_api_url,
        })
    }

    /// Builds with the given token; everything else unset.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
        }
    }

    /// Fails when an API URL is set but does not parse.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }

    /// Creates the teloxide Bot, pointed at the custom API URL when one is set and valid.
    pub fn build_bot(&self) -> teloxide::Bot {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match self.telegram_api_url.as_deref() {
            Some(url_str) => match reqwest::Url::parse(url_str) {
                Ok(url) => bot.set_api_url(url),
                Err(e) => {
                    error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                    bot
                }
            },
            None => bot,
        }
    }
}
