//! Application entry: validate config, init logging, build the relay, run the Telegram dispatcher.

use std::sync::Arc;

use anyhow::Result;
use relay_core::{init_tracing, Bot, Chat, Dispatcher};
use relay_pipeline::Pipeline;
use relay_telegram::{run_dispatcher, TelegramBotAdapter};
use tracing::{info, instrument};

use crate::config::RelayConfig;
use crate::relay::Relay;

/// Builds the [`Relay`] for `config`, sending through `bot`. Used by [`run_bot`] and by tests that
/// inject a mock bot.
pub fn build_relay(config: &RelayConfig, bot: Arc<dyn Bot>) -> Result<Relay> {
    let pipeline = Pipeline::new(config.pipeline().clone())?;
    info!(steps = ?pipeline.step_names(), "step: pipeline built");
    let dispatcher = Dispatcher::new(bot, Chat::new(config.target_chat()));
    Ok(Relay::new(pipeline, dispatcher))
}

/// Main entry: validate config, init logging, build the relay, then run the dispatcher until
/// shutdown.
#[instrument(skip(config))]
pub async fn run_bot(config: RelayConfig) -> Result<()> {
    config.validate()?;
    init_tracing(Some(config.log_file()))?;

    info!(
        sources = ?config.source_ids(),
        target = config.target_chat(),
        log_file = %config.log_file(),
        "Initializing relay"
    );

    let teloxide_bot = config.base().telegram.build_bot();
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let relay = build_relay(&config, bot)?;

    info!("Relay started successfully");

    run_dispatcher(
        teloxide_bot,
        Arc::new(relay),
        config.source_ids(),
        config.target_chat(),
        config.album_window(),
    )
    .await
}
