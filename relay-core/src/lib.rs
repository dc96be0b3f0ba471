//! # relay-core
//!
//! Core types and traits for the price relay: [`RawMessage`] as delivered by a transport,
//! [`NormalizedContent`] as produced by the pipeline, the transport-agnostic [`Bot`] and [`Handler`] traits,
//! the [`Dispatcher`] that paces and sends processed content, and tracing initialization.
//! Used by relay-pipeline, relay-telegram and relay-bot.

pub mod bot;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use dispatch::{DispatchReport, Dispatcher};
pub use error::{RelayError, Result};
pub use handler::Handler;
pub use logger::init_tracing;
pub use types::{
    parse_chat_id, Chat, MediaField, MediaHandle, MediaItem, MediaKind, NormalizedContent,
    RawMessage,
};
