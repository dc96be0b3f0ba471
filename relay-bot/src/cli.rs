//! CLI parser and the offline commands (`check-config`, `preview`).

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use relay_core::RawMessage;
use relay_pipeline::{Pipeline, PipelineConfig, ProcessOutcome};

use crate::config::RelayConfig;

#[derive(Parser)]
#[command(name = "relay")]
#[command(about = "Price relay: re-price and forward source chat messages", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Env file to load instead of ./.env
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the relay (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Load and validate config, then print the sources, target and pricing in use.
    CheckConfig,
    /// Run the pipeline on a sample message and print the result; nothing is sent.
    Preview {
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        caption: Option<String>,
        /// Origin chat id; defaults to the first configured source.
        #[arg(long, allow_hyphen_values = true)]
        origin: Option<i64>,
    },
}

/// Human-readable summary of a validated config.
pub fn config_report(config: &RelayConfig) -> String {
    let pipeline = config.pipeline();
    let mut out = String::new();

    out.push_str(&format!("Target: {}\n", config.target_chat()));
    out.push_str(&format!("Sources ({}):\n", pipeline.profiles.len()));
    for p in &pipeline.profiles {
        out.push_str(&format!(
            "  [{}] {} ({}) delay {}s, {}, delivery: {:?}\n",
            p.tag,
            p.name,
            p.id,
            p.send_delay.as_secs(),
            if p.enabled { "enabled" } else { "disabled" },
            p.delivery_notice
        ));
    }

    let f = &pipeline.formula;
    out.push_str(&format!(
        "Pricing: watch +{}, non-watch x{} +{}, round up: {}\n",
        f.watch_flat_markup, f.nonwatch_multiplier, f.nonwatch_flat_fee, f.round_up
    ));
    out.push_str(&format!("Watch keywords: {}\n", pipeline.watch_keywords.join(", ")));

    let c = &pipeline.contact;
    out.push_str(&format!(
        "Contact: {} {} ({}), auto add: {}\n",
        c.text, c.link, c.shop_name, c.auto_add
    ));
    out.push_str(&format!("Log file: {}\n", config.log_file()));
    out
}

/// Runs the standard pipeline offline on a message built from the given text and caption.
pub fn preview(
    config: PipelineConfig,
    text: Option<String>,
    caption: Option<String>,
    origin: Option<i64>,
) -> Result<ProcessOutcome> {
    let origin = origin
        .or_else(|| config.origin_ids().first().copied())
        .unwrap_or(0);
    let pipeline = Pipeline::new(config)?;

    let mut raw = RawMessage::new("preview", origin);
    raw.text = text;
    raw.caption = caption;
    Ok(pipeline.process(&raw))
}

/// Text printed by `preview`.
pub fn preview_report(outcome: &ProcessOutcome) -> String {
    let mut out = String::new();
    out.push_str(&format!("--- text ---\n{}\n", outcome.content.text));
    if !outcome.content.caption.is_empty() {
        out.push_str(&format!("--- caption ---\n{}\n", outcome.content.caption));
    }
    for failure in &outcome.failures {
        out.push_str(&format!("step {} skipped: {}\n", failure.step, failure.error));
    }
    out
}
