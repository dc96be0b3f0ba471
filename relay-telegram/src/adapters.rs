//! Adapters from Telegram (teloxide) messages to relay_core types.

use relay_core::{MediaField, MediaHandle, MediaItem, MediaKind, RawMessage};
use teloxide::types::Message;

/// Wraps a teloxide Message for conversion to [`RawMessage`].
pub struct TelegramMessageWrapper<'a>(pub &'a Message);

impl<'a> TelegramMessageWrapper<'a> {
    /// Converts to a [`RawMessage`] originating from the message's chat.
    ///
    /// Photos use the largest size. Attachments other than photo, video, document and audio
    /// produce no media.
    pub fn to_raw(&self) -> RawMessage {
        let msg = self.0;
        let mut raw = RawMessage::new(msg.id.to_string(), msg.chat.id.0);
        raw.text = msg.text().map(str::to_string);
        raw.caption = msg.caption().map(str::to_string);
        raw.media = self.media_item().map(MediaField::Single);
        raw.received_at = msg.date;
        raw
    }

    /// Album id when the message is one part of a media group.
    pub fn media_group_id(&self) -> Option<String> {
        self.0.media_group_id().map(|id| id.0.clone())
    }

    /// Sender user id, if the message has a user sender.
    pub fn sender_id(&self) -> Option<u64> {
        self.0.from.as_ref().map(|u| u.id.0)
    }

    fn media_item(&self) -> Option<MediaItem> {
        let msg = self.0;
        if let Some(largest) = msg.photo().and_then(|sizes| sizes.last()) {
            return Some(item(MediaKind::Photo, largest.file.id.to_string()));
        }
        if let Some(video) = msg.video() {
            return Some(item(MediaKind::Video, video.file.id.to_string()));
        }
        if let Some(document) = msg.document() {
            return Some(item(MediaKind::Document, document.file.id.to_string()));
        }
        msg.audio()
            .map(|audio| item(MediaKind::Audio, audio.file.id.to_string()))
    }
}

fn item(kind: MediaKind, file_id: String) -> MediaItem {
    MediaItem::new(kind, MediaHandle::new(file_id))
}
