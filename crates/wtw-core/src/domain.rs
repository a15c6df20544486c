use std::fmt;

/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// The identity a movie list belongs to, after remapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OwnerId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One stored entry: a normalized title on an owner's list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Movie {
    pub title: String,
    pub owner: OwnerId,
}

impl Movie {
    pub fn new(title: impl Into<String>, owner: OwnerId) -> Self {
        Self {
            title: title.into(),
            owner,
        }
    }
}

/// Inbound update as seen by the core.
///
/// `message` is `None` for update kinds that are not new messages (edits,
/// callbacks, ...). A new message without text (photo, sticker) has a payload
/// with empty `text`. The id is always needed to advance the offset.
#[derive(Clone, Debug)]
pub struct IncomingUpdate {
    pub id: i64,
    pub message: Option<TextMessage>,
}

#[derive(Clone, Debug)]
pub struct TextMessage {
    pub chat_id: ChatId,
    pub user_id: Option<UserId>,
    pub username: Option<String>,
    pub text: String,
}
