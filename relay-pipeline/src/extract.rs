//! Content extraction: raw message → [`NormalizedContent`].
//!
//! Never fails; missing or unusable fields become empty values.

use relay_core::{MediaField, MediaHandle, MediaKind, NormalizedContent, RawMessage};

/// Normalizes a raw message.
///
/// Text comes from `text`, else from `caption` (then both fields hold it). Media comes from the
/// unified field when present, otherwise from the first non-empty typed field in the order
/// photo, video, document, audio.
pub fn extract(raw: &RawMessage) -> NormalizedContent {
    let (text, caption) = match (non_empty(&raw.text), non_empty(&raw.caption)) {
        (Some(text), _) => (text.to_string(), String::new()),
        (None, Some(caption)) => (caption.to_string(), caption.to_string()),
        (None, None) => (String::new(), String::new()),
    };

    let (media, media_kind) = match &raw.media {
        Some(field) => resolve_unified(field),
        None => resolve_typed(raw),
    };

    NormalizedContent {
        text,
        caption,
        media,
        media_kind,
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Keeps items with a resolvable kind; the first such item decides the kind of the whole message.
fn resolve_unified(field: &MediaField) -> (Vec<MediaHandle>, Option<MediaKind>) {
    let mut kind = None;
    let mut media = Vec::new();
    for item in field.items() {
        if let Some(item_kind) = item.kind {
            kind.get_or_insert(item_kind);
            media.push(item.handle.clone());
        }
    }
    (media, kind)
}

fn resolve_typed(raw: &RawMessage) -> (Vec<MediaHandle>, Option<MediaKind>) {
    [
        (MediaKind::Photo, &raw.photo),
        (MediaKind::Video, &raw.video),
        (MediaKind::Document, &raw.document),
        (MediaKind::Audio, &raw.audio),
    ]
    .into_iter()
    .find(|(_, handles)| !handles.is_empty())
    .map(|(kind, handles)| (handles.clone(), Some(kind)))
    .unwrap_or_default()
}
