//! Outbound dispatch of processed content to the single destination chat.
//!
//! Picks the send mode from the content shape: plain text, one captioned media file, or a grouped
//! album. When an album send is rejected, the first item is re-sent with the caption and the
//! remaining items without one.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::bot::Bot;
use crate::error::Result;
use crate::types::{Chat, NormalizedContent};

/// What [`Dispatcher::dispatch`] ended up sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchReport {
    /// Nothing to send (empty text, no media).
    Skipped,
    Text,
    Single,
    Album { count: usize },
    /// Album send failed; items were sent one by one.
    AlbumFallback { count: usize },
}

/// Sends processed content to the destination chat through a [`Bot`].
#[derive(Clone)]
pub struct Dispatcher {
    bot: Arc<dyn Bot>,
    target: Chat,
}

impl Dispatcher {
    pub fn new(bot: Arc<dyn Bot>, target: Chat) -> Self {
        Self { bot, target }
    }

    /// Waits `delay` (outbound pacing), then sends `content`.
    ///
    /// The wait happens inside the caller's task, so concurrent dispatches do not queue behind
    /// each other.
    #[instrument(skip(self, content), fields(target = self.target.id))]
    pub async fn dispatch(
        &self,
        content: &NormalizedContent,
        delay: Duration,
    ) -> Result<DispatchReport> {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let kind = match content.media_kind {
            Some(kind) if !content.media.is_empty() => kind,
            _ => {
                if content.text.is_empty() {
                    info!("step: dispatch skipped, nothing to send");
                    return Ok(DispatchReport::Skipped);
                }
                self.bot.send_message(&self.target, &content.text).await?;
                info!(len = content.text.len(), "step: dispatch sent text message");
                return Ok(DispatchReport::Text);
            }
        };

        let caption = content.outgoing_caption();

        if let [single] = content.media.as_slice() {
            self.bot
                .send_media(&self.target, kind, single, caption)
                .await?;
            info!(kind = %kind, "step: dispatch sent single media");
            return Ok(DispatchReport::Single);
        }

        let count = content.media.len();
        match self
            .bot
            .send_album(&self.target, kind, &content.media, caption)
            .await
        {
            Ok(()) => {
                info!(kind = %kind, count, "step: dispatch sent album");
                Ok(DispatchReport::Album { count })
            }
            Err(e) => {
                warn!(error = %e, kind = %kind, count, "Album send failed, falling back to single sends");
                if let [first, rest @ ..] = content.media.as_slice() {
                    self.bot
                        .send_media(&self.target, kind, first, caption)
                        .await?;
                    for media in rest {
                        self.bot.send_media(&self.target, kind, media, None).await?;
                    }
                }
                info!(kind = %kind, count, "step: dispatch sent album via fallback");
                Ok(DispatchReport::AlbumFallback { count })
            }
        }
    }
}
