//! Telegram adapter (teloxide).
//!
//! This crate implements the `wtw-core` MessagingClient port over the Telegram
//! Bot API. Updates are pulled with plain `getUpdates` calls; the core's
//! polling loop owns the offset.

use std::time::Duration;

use async_trait::async_trait;
use teloxide::{prelude::*, types::UpdateKind};
use tracing::debug;

use wtw_core::{
    domain::{ChatId, IncomingUpdate, TextMessage, UserId},
    errors::Error,
    ports::MessagingClient,
    Result,
};

#[derive(Clone)]
pub struct TelegramClient {
    bot: Bot,
}

impl TelegramClient {
    /// Build a client whose every request is bounded by `request_timeout`.
    pub fn new(token: impl Into<String>, request_timeout: Duration) -> Result<Self> {
        let client: reqwest::Client = teloxide::net::default_reqwest_settings()
            .timeout(request_timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build http client: {e}")))?;
        Ok(Self {
            bot: Bot::with_client(token, client),
        })
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::External(format!("telegram error: {e}"))
    }
}

/// Project a Telegram update onto the core model.
///
/// Every new message carries a payload; a photo or sticker arrives with empty
/// text. Other update kinds keep only their id so the offset can move past them.
pub fn to_incoming(update: Update) -> IncomingUpdate {
    let id = i64::from(update.id);
    let message = match update.kind {
        UpdateKind::Message(msg) => Some(TextMessage {
            chat_id: ChatId(msg.chat.id.0),
            user_id: msg.from().map(|u| UserId(u.id.0 as i64)),
            username: msg.from().and_then(|u| u.username.clone()),
            text: msg.text().unwrap_or_default().to_string(),
        }),
        _ => None,
    };
    IncomingUpdate { id, message }
}

#[async_trait]
impl MessagingClient for TelegramClient {
    async fn fetch_updates(&self, offset: i64, limit: u8) -> Result<Vec<IncomingUpdate>> {
        let offset = i32::try_from(offset)
            .map_err(|_| Error::External(format!("update offset {offset} out of range")))?;

        let updates = self
            .bot
            .get_updates()
            .offset(offset)
            .limit(limit)
            .await
            .map_err(Self::map_err)?;

        debug!(offset, count = updates.len(), "fetched updates");
        Ok(updates.into_iter().map(to_incoming).collect())
    }

    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<()> {
        self.bot
            .send_message(Self::tg_chat(chat_id), text.to_string())
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }
}
