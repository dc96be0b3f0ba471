//! # Price relay application
//!
//! Wires relay-pipeline and relay-telegram: loads config from env, builds the [`Relay`]
//! (pipeline + dispatcher) and runs the Telegram dispatcher. The `relay` binary adds a CLI with
//! `run`, `check-config` and `preview`.

pub mod cli;
pub mod config;
pub mod relay;
pub mod runner;

pub use cli::{Cli, Commands};
pub use config::{load_env_file, BaseConfig, RelayConfig};
pub use relay::{Relay, RelayOutcome};
pub use runner::{build_relay, run_bot};

pub use relay_core::{Bot, Chat, Handler, MediaHandle, MediaKind, RawMessage, RelayError, Result};
pub use relay_pipeline::{Pipeline, PipelineConfig};
