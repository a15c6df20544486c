/// Core error type for the bot.
///
/// Adapter crates map their specific errors into this type so the polling loop
/// can treat every failure the same way (log and carry on).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The (title, owner) pair is already stored.
    #[error("movie '{title}' already exists")]
    Duplicate { title: String },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
