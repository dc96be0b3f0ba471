//! Mock implementation of [`relay_bot::Bot`] for integration tests.
//!
//! Records every send so tests can assert on what would reach the destination chat without
//! hitting Telegram.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use relay_bot::{Bot, Chat, MediaHandle, MediaKind, RelayError, Result};

/// One recorded outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentRecord {
    Text {
        chat_id: i64,
        text: String,
    },
    Media {
        chat_id: i64,
        kind: MediaKind,
        handle: String,
        caption: Option<String>,
    },
    Album {
        chat_id: i64,
        kind: MediaKind,
        handles: Vec<String>,
        caption: Option<String>,
    },
}

/// Mock Bot that records sends; can be told to fail every send.
#[derive(Default)]
pub struct MockBot {
    sent: Mutex<Vec<SentRecord>>,
    fail: bool,
}

impl MockBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A bot whose every send fails with a Bot error.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn sent(&self) -> Vec<SentRecord> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, record: SentRecord) -> Result<()> {
        if self.fail {
            return Err(RelayError::Bot("chat not found".to_string()));
        }
        self.sent.lock().unwrap().push(record);
        Ok(())
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.record(SentRecord::Text {
            chat_id: chat.id,
            text: text.to_string(),
        })
    }

    async fn send_media(
        &self,
        chat: &Chat,
        kind: MediaKind,
        media: &MediaHandle,
        caption: Option<&str>,
    ) -> Result<()> {
        self.record(SentRecord::Media {
            chat_id: chat.id,
            kind,
            handle: media.to_string(),
            caption: caption.map(str::to_string),
        })
    }

    async fn send_album(
        &self,
        chat: &Chat,
        kind: MediaKind,
        media: &[MediaHandle],
        caption: Option<&str>,
    ) -> Result<()> {
        self.record(SentRecord::Album {
            chat_id: chat.id,
            kind,
            handles: media.iter().map(|m| m.to_string()).collect(),
            caption: caption.map(str::to_string),
        })
    }
}
