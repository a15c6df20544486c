use async_trait::async_trait;

use crate::{
    domain::{ChatId, IncomingUpdate, Movie, OwnerId},
    Result,
};

/// Hexagonal port for the messaging API.
///
/// Telegram is the only implementation; tests drive the core with fakes.
#[async_trait]
pub trait MessagingClient: Send + Sync {
    /// Fetch up to `limit` pending updates with id >= `offset`, ascending by id.
    async fn fetch_updates(&self, offset: i64, limit: u8) -> Result<Vec<IncomingUpdate>>;

    /// Send a plain-text message. Failures are returned, never retried here.
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<()>;
}

/// Hexagonal port for movie persistence.
///
/// Each call is atomic on its own; callers that check then mutate get no
/// transaction spanning both calls.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Create the schema if it is missing. Safe to call on every startup.
    async fn init_schema(&self) -> Result<()>;

    /// Insert a movie. Fails with `Error::InvalidInput` on an empty title and
    /// `Error::Duplicate` when (title, owner) is already stored.
    async fn save(&self, movie: &Movie) -> Result<()>;

    /// Uniformly random movie of `owner`, or `None` when the list is empty.
    async fn pick_random(&self, owner: OwnerId) -> Result<Option<Movie>>;

    /// Delete a movie. Deleting something that is not stored is not an error.
    async fn remove(&self, movie: &Movie) -> Result<()>;

    /// All movies of `owner`, alphabetical by title.
    async fn list(&self, owner: OwnerId) -> Result<Vec<Movie>>;

    async fn exists(&self, movie: &Movie) -> Result<bool>;
}
