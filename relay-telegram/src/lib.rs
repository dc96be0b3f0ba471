//! # relay-telegram
//!
//! Telegram transport for the price relay: teloxide message adapters, album collection, the
//! [`relay_core::Bot`] implementation, minimal connection config and the dispatcher runner.
//! Handles only Telegram connectivity; content transformation lives in relay-pipeline.

mod adapters;
mod album;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::TelegramMessageWrapper;
pub use album::{merge_album, AlbumCollector, DEFAULT_ALBUM_WINDOW};
pub use bot_adapter::TelegramBotAdapter;
pub use config::TelegramConfig;
pub use runner::{run_dispatcher, SourceFilter};
