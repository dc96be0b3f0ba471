//! Album collection.
//!
//! Telegram delivers an album as separate messages sharing a `media_group_id`. Each part is held
//! for a quiet window; the task that added the last part before the window elapsed emits the whole
//! album as one [`RawMessage`].

use std::collections::HashMap;
use std::time::Duration;

use relay_core::{MediaField, RawMessage};
use tokio::sync::Mutex;
use tracing::debug;

/// Quiet window used when none is configured.
pub const DEFAULT_ALBUM_WINDOW: Duration = Duration::from_millis(800);

#[derive(Default)]
struct PendingAlbum {
    parts: Vec<RawMessage>,
    /// Number of parts added so far; identifies the latest caller.
    seq: u64,
}

/// Buffers album parts by group id.
pub struct AlbumCollector {
    window: Duration,
    pending: Mutex<HashMap<String, PendingAlbum>>,
}

impl AlbumCollector {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: Mutex::new(HashMap::new()),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Adds `part` to its album and waits for the quiet window.
    ///
    /// Returns the merged album when no further part arrived meanwhile, `None` otherwise (a later
    /// caller will emit it).
    pub async fn collect(&self, group_id: String, part: RawMessage) -> Option<RawMessage> {
        let seq = {
            let mut pending = self.pending.lock().await;
            let album = pending.entry(group_id.clone()).or_default();
            album.parts.push(part);
            album.seq += 1;
            album.seq
        };

        tokio::time::sleep(self.window).await;

        let mut pending = self.pending.lock().await;
        if pending.get(&group_id).map(|a| a.seq) != Some(seq) {
            return None;
        }
        let album = pending.remove(&group_id)?;
        debug!(group_id = %group_id, parts = album.parts.len(), "Album complete");
        merge_album(album.parts)
    }

    /// Number of albums still waiting for their window.
    pub async fn pending_albums(&self) -> usize {
        self.pending.lock().await.len()
    }
}

/// Merges album parts into one message, ordered by message id.
///
/// Media items keep part order; text and caption are the first non-empty ones. `None` for no parts.
pub fn merge_album(mut parts: Vec<RawMessage>) -> Option<RawMessage> {
    parts.sort_by_key(|p| p.id.parse::<i64>().ok());

    let first = parts.first()?;
    let mut merged = RawMessage::new(first.id.clone(), first.origin);
    merged.received_at = first.received_at;
    merged.text = first_non_empty(parts.iter().map(|p| &p.text));
    merged.caption = first_non_empty(parts.iter().map(|p| &p.caption));

    let items: Vec<_> = parts
        .iter()
        .filter_map(|p| p.media.as_ref())
        .flat_map(|m| m.items().iter().cloned())
        .collect();
    if !items.is_empty() {
        merged.media = Some(MediaField::Album(items));
    }

    Some(merged)
}

fn first_non_empty<'a>(values: impl Iterator<Item = &'a Option<String>>) -> Option<String> {
    values.flatten().find(|s| !s.is_empty()).cloned()
}
