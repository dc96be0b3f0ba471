//! Core types: chat, raw inbound message with its media descriptors, and the normalized content
//! the pipeline produces for the dispatcher.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RelayError, Result};

/// Chat (channel, group or private) identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub title: Option<String>,
}

impl Chat {
    pub fn new(id: i64) -> Self {
        Self { id, title: None }
    }
}

/// Parses a chat id such as `-1001879591244`. Used by config loading.
pub fn parse_chat_id(s: &str) -> Result<i64> {
    s.trim()
        .parse()
        .map_err(|_| RelayError::Config(format!("Invalid chat id: {}", s)))
}

/// Kind of a media attachment. One kind per outgoing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
    Document,
    Audio,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
            MediaKind::Document => "document",
            MediaKind::Audio => "audio",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque, transport-specific reference to a media file (a Telegram file id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaHandle(pub String);

impl MediaHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One attachment in the unified media field. `kind` is `None` when the transport delivered
/// something the relay cannot forward (sticker, poll, web page preview...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub kind: Option<MediaKind>,
    pub handle: MediaHandle,
}

impl MediaItem {
    pub fn new(kind: MediaKind, handle: MediaHandle) -> Self {
        Self {
            kind: Some(kind),
            handle,
        }
    }

    /// An attachment with no forwardable kind.
    pub fn unsupported(handle: MediaHandle) -> Self {
        Self { kind: None, handle }
    }
}

/// Unified media field: either a single attachment or an ordered album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaField {
    Single(MediaItem),
    Album(Vec<MediaItem>),
}

impl MediaField {
    /// Items in original order.
    pub fn items(&self) -> &[MediaItem] {
        match self {
            MediaField::Single(item) => std::slice::from_ref(item),
            MediaField::Album(items) => items,
        }
    }
}

/// Inbound message as delivered by a transport, tagged with the origin chat id.
///
/// The unified `media` field takes precedence; the typed fields are a fallback for transports
/// that only expose per-kind attachments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMessage {
    pub id: String,
    pub origin: i64,
    pub text: Option<String>,
    pub caption: Option<String>,
    pub media: Option<MediaField>,
    #[serde(default)]
    pub photo: Vec<MediaHandle>,
    #[serde(default)]
    pub video: Vec<MediaHandle>,
    #[serde(default)]
    pub document: Vec<MediaHandle>,
    #[serde(default)]
    pub audio: Vec<MediaHandle>,
    pub received_at: DateTime<Utc>,
}

impl RawMessage {
    /// Empty message from `origin`; fill fields with the `with_*` builders.
    pub fn new(id: impl Into<String>, origin: i64) -> Self {
        Self {
            id: id.into(),
            origin,
            text: None,
            caption: None,
            media: None,
            photo: Vec::new(),
            video: Vec::new(),
            document: Vec::new(),
            audio: Vec::new(),
            received_at: Utc::now(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_media(mut self, media: MediaField) -> Self {
        self.media = Some(media);
        self
    }
}

/// Uniform content record produced by the pipeline and consumed by the dispatcher.
///
/// Invariants: `media_kind` is `None` iff `media` is empty; when `text` was taken from the
/// caption, `caption` holds the same value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedContent {
    pub text: String,
    pub caption: String,
    pub media: Vec<MediaHandle>,
    pub media_kind: Option<MediaKind>,
}

impl NormalizedContent {
    /// Nothing to send: no text, no caption, no media.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.caption.is_empty() && self.media.is_empty()
    }

    /// Caption for outgoing media: the caption if set, otherwise the text. `None` when both are empty.
    pub fn outgoing_caption(&self) -> Option<&str> {
        if !self.caption.is_empty() {
            Some(&self.caption)
        } else if !self.text.is_empty() {
            Some(&self.text)
        } else {
            None
        }
    }
}
