//! Wraps teloxide::Bot and implements [`relay_core::Bot`]. Production code sends via Telegram;
//! tests can substitute another Bot impl.

use async_trait::async_trait;
use relay_core::{Bot as CoreBot, Chat, MediaHandle, MediaKind, RelayError, Result};
use teloxide::{
    prelude::*,
    types::{
        ChatId, FileId, InputFile, InputMedia, InputMediaAudio, InputMediaDocument,
        InputMediaPhoto, InputMediaVideo,
    },
};

/// Thin wrapper around teloxide::Bot that implements relay-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

fn input_file(handle: &MediaHandle) -> InputFile {
    InputFile::file_id(FileId(handle.as_str().to_string()))
}

fn bot_error(e: teloxide::RequestError) -> RelayError {
    RelayError::Bot(e.to_string())
}

/// Sends a media request, setting the caption only when there is one.
macro_rules! send_captioned {
    ($request:expr, $caption:expr) => {
        match $caption {
            Some(caption) => $request.caption(caption.to_string()).await,
            None => $request.await,
        }
    };
}

fn album_item(kind: MediaKind, handle: &MediaHandle, caption: Option<&str>) -> InputMedia {
    let file = input_file(handle);
    match (kind, caption) {
        (MediaKind::Photo, Some(c)) => InputMedia::Photo(InputMediaPhoto::new(file).caption(c)),
        (MediaKind::Photo, None) => InputMedia::Photo(InputMediaPhoto::new(file)),
        (MediaKind::Video, Some(c)) => InputMedia::Video(InputMediaVideo::new(file).caption(c)),
        (MediaKind::Video, None) => InputMedia::Video(InputMediaVideo::new(file)),
        (MediaKind::Document, Some(c)) => {
            InputMedia::Document(InputMediaDocument::new(file).caption(c))
        }
        (MediaKind::Document, None) => InputMedia::Document(InputMediaDocument::new(file)),
        (MediaKind::Audio, Some(c)) => InputMedia::Audio(InputMediaAudio::new(file).caption(c)),
        (MediaKind::Audio, None) => InputMedia::Audio(InputMediaAudio::new(file)),
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn send_media(
        &self,
        chat: &Chat,
        kind: MediaKind,
        media: &MediaHandle,
        caption: Option<&str>,
    ) -> Result<()> {
        let chat_id = ChatId(chat.id);
        let file = input_file(media);
        let sent = match kind {
            MediaKind::Photo => send_captioned!(self.bot.send_photo(chat_id, file), caption),
            MediaKind::Video => send_captioned!(self.bot.send_video(chat_id, file), caption),
            MediaKind::Document => {
                send_captioned!(self.bot.send_document(chat_id, file), caption)
            }
            MediaKind::Audio => send_captioned!(self.bot.send_audio(chat_id, file), caption),
        };
        sent.map_err(bot_error)?;
        Ok(())
    }

    async fn send_album(
        &self,
        chat: &Chat,
        kind: MediaKind,
        media: &[MediaHandle],
        caption: Option<&str>,
    ) -> Result<()> {
        let items: Vec<InputMedia> = media
            .iter()
            .map(|handle| album_item(kind, handle, caption))
            .collect();
        self.bot
            .send_media_group(ChatId(chat.id), items)
            .await
            .map_err(bot_error)?;
        Ok(())
    }
}
