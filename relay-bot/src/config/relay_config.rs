//! RelayConfig: BaseConfig + destination chat + pipeline settings. Use load() for env-based loading.

use std::collections::HashSet;
use std::time::Duration;

use anyhow::Result;
use relay_core::parse_chat_id;
use relay_pipeline::PipelineConfig;

use super::env::var;
use super::profiles::load_pipeline_config;
use super::BaseConfig;

/// Relay config. Use RelayConfig::load() for env-based loading, then validate().
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub base: BaseConfig,
    /// TARGET_GROUP_ID; 0 when unset (rejected by validate).
    pub target_chat: i64,
    pub pipeline: PipelineConfig,
}

impl RelayConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let target_chat = match var("TARGET_GROUP_ID") {
            Some(raw) => parse_chat_id(&raw)?,
            None => 0,
        };
        let pipeline = load_pipeline_config()?;
        Ok(Self {
            base,
            target_chat,
            pipeline,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;

        if self.target_chat == 0 {
            anyhow::bail!("TARGET_GROUP_ID not set");
        }
        if self.pipeline.profiles.is_empty() {
            anyhow::bail!("SOURCE_GROUP_IDS (or SOURCE_GROUP_ID) not set");
        }

        let mut seen = HashSet::new();
        for id in self.source_ids() {
            if id == 0 {
                anyhow::bail!("Source group id must not be 0");
            }
            if id == self.target_chat {
                anyhow::bail!("Source group {} is also the target group", id);
            }
            if !seen.insert(id) {
                anyhow::bail!("Source group {} is listed more than once", id);
            }
        }
        Ok(())
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn pipeline(&self) -> &PipelineConfig {
        &self.pipeline
    }

    // --- Base config getters ---
    pub fn bot_token(&self) -> &str {
        &self.base.telegram.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram.telegram_api_url.as_deref()
    }
    pub fn album_window(&self) -> Duration {
        self.base.album_window
    }

    // --- Routing getters ---
    pub fn target_chat(&self) -> i64 {
        self.target_chat
    }
    pub fn source_ids(&self) -> Vec<i64> {
        self.pipeline.origin_ids()
    }
}
