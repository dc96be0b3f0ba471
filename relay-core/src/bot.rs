//! Bot abstraction for sending processed content.
//!
//! [`Bot`] is transport-agnostic; relay-telegram implements it via teloxide and tests substitute a
//! recording mock.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Chat, MediaHandle, MediaKind};

/// Abstraction for outbound sends. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a plain text message to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;

    /// Sends one media file, optionally captioned.
    async fn send_media(
        &self,
        chat: &Chat,
        kind: MediaKind,
        media: &MediaHandle,
        caption: Option<&str>,
    ) -> Result<()>;

    /// Sends several same-kind media files as one grouped album; every item carries `caption`.
    async fn send_album(
        &self,
        chat: &Chat,
        kind: MediaKind,
        media: &[MediaHandle],
        caption: Option<&str>,
    ) -> Result<()>;
}
