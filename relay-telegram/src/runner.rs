//! Dispatcher runner: listens to messages and channel posts, keeps those from configured source
//! chats, collects albums and hands each message to a [`Handler`] in its own task.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use relay_core::{Handler, RawMessage};
use teloxide::prelude::*;
use tracing::{debug, error, info, instrument, warn};

use crate::adapters::TelegramMessageWrapper;
use crate::album::AlbumCollector;

/// Decides which inbound messages are relayed.
#[derive(Debug, Clone)]
pub struct SourceFilter {
    sources: HashSet<i64>,
    target: i64,
    bot_id: Option<u64>,
}

impl SourceFilter {
    pub fn new(sources: impl IntoIterator<Item = i64>, target: i64) -> Self {
        Self {
            sources: sources.into_iter().collect(),
            target,
            bot_id: None,
        }
    }

    /// Also drops messages sent by this user id (the bot itself).
    pub fn with_bot_id(mut self, bot_id: u64) -> Self {
        self.bot_id = Some(bot_id);
        self
    }

    /// True for messages from a source chat that were not sent by the bot and do not come from
    /// the destination chat.
    pub fn accepts(&self, chat_id: i64, sender_id: Option<u64>) -> bool {
        if chat_id == self.target {
            return false;
        }
        if sender_id.is_some() && sender_id == self.bot_id {
            return false;
        }
        self.sources.contains(&chat_id)
    }
}

struct Inbound {
    filter: SourceFilter,
    albums: AlbumCollector,
    handler: Arc<dyn Handler>,
}

impl Inbound {
    fn accept(self: &Arc<Self>, msg: &Message) {
        let wrapper = TelegramMessageWrapper(msg);
        let chat_id = msg.chat.id.0;
        if !self.filter.accepts(chat_id, wrapper.sender_id()) {
            debug!(chat_id, "Ignoring message outside source chats");
            return;
        }

        let raw = wrapper.to_raw();
        let group_id = wrapper.media_group_id();
        info!(
            chat_id,
            message_id = %raw.id,
            album = group_id.is_some(),
            "Received message"
        );

        let inbound = self.clone();
        tokio::spawn(async move { inbound.process(raw, group_id).await });
    }

    async fn process(&self, raw: RawMessage, group_id: Option<String>) {
        let raw = match group_id {
            Some(group_id) => match self.albums.collect(group_id, raw).await {
                Some(album) => album,
                None => return,
            },
            None => raw,
        };

        info!(
            origin = raw.origin,
            message_id = %raw.id,
            "step: processing message (handler started)"
        );
        let origin = raw.origin;
        if let Err(e) = self.handler.handle(raw).await {
            error!(error = %e, origin, "Handler failed");
        }
    }
}

/// Runs the teloxide dispatcher until shutdown.
///
/// Calls get_me() first so the bot's own messages can be dropped; every accepted message (or
/// completed album) is handled in a separate task.
#[instrument(skip(bot, handler, sources))]
pub async fn run_dispatcher(
    bot: teloxide::Bot,
    handler: Arc<dyn Handler>,
    sources: Vec<i64>,
    target: i64,
    album_window: Duration,
) -> Result<()> {
    let mut filter = SourceFilter::new(sources, target);
    match bot.get_me().await {
        Ok(me) => {
            info!(
                bot_id = me.user.id.0,
                username = ?me.user.username,
                "Bot identity resolved before dispatch"
            );
            filter = filter.with_bot_id(me.user.id.0);
        }
        Err(e) => warn!(error = %e, "get_me failed, bot's own messages filtered by chat only"),
    }

    let inbound = Arc::new(Inbound {
        filter,
        albums: AlbumCollector::new(album_window),
        handler,
    });

    let on_message = move |msg: Message| {
        let inbound = inbound.clone();
        async move {
            inbound.accept(&msg);
            respond(())
        }
    };

    let schema = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message.clone()))
        .branch(Update::filter_channel_post().endpoint(on_message));

    Dispatcher::builder(bot, schema)
        .default_handler(|_upd| async {})
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
