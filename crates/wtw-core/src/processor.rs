use std::sync::Arc;

use tracing::debug;

use crate::{
    domain::{ChatId, IncomingUpdate, Movie},
    errors::Error,
    identity::OwnerMap,
    ports::{MessagingClient, MovieStore},
    replies,
    title::{normalize_title, validate_title, TitleError},
    Result,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command<'a> {
    Start,
    Help,
    Random,
    List,
    Remove(&'a str),
    Add(&'a str),
}

impl Command<'_> {
    fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::Random => "random",
            Command::List => "list",
            Command::Remove(_) => "remove",
            Command::Add(_) => "add",
        }
    }
}

fn parse_command(text: &str) -> Command<'_> {
    match text {
        "/start" => Command::Start,
        "/help" => Command::Help,
        "/random" => Command::Random,
        "/list" => Command::List,
        _ => match text.strip_prefix("/remove ") {
            Some(title) => Command::Remove(title),
            None => Command::Add(text),
        },
    }
}

/// Interprets one update, mutates the owner's list and replies.
///
/// Storage and send failures are returned to the caller; user mistakes are
/// answered with a reply and are not errors.
pub struct CommandProcessor {
    messenger: Arc<dyn MessagingClient>,
    store: Arc<dyn MovieStore>,
    owners: OwnerMap,
}

impl CommandProcessor {
    pub fn new(
        messenger: Arc<dyn MessagingClient>,
        store: Arc<dyn MovieStore>,
        owners: OwnerMap,
    ) -> Self {
        Self {
            messenger,
            store,
            owners,
        }
    }

    pub async fn process(&self, update: &IncomingUpdate) -> Result<()> {
        let Some(msg) = &update.message else {
            return Ok(());
        };

        let chat_id = msg.chat_id;
        let cmd = parse_command(&msg.text);
        debug!(
            update_id = update.id,
            chat_id = chat_id.0,
            user_id = msg.user_id.map(|u| u.0),
            username = msg.username.as_deref().unwrap_or("unknown"),
            command = cmd.name(),
            "handling message"
        );

        match cmd {
            Command::Start => self.reply(chat_id, replies::START).await,
            Command::Help => self.reply(chat_id, replies::HELP).await,
            Command::Random => self.handle_random(chat_id).await,
            Command::List => self.handle_list(chat_id).await,
            Command::Remove(title) => self.handle_remove(chat_id, title).await,
            Command::Add(text) => self.handle_add(chat_id, text).await,
        }
    }

    async fn handle_random(&self, chat_id: ChatId) -> Result<()> {
        let owner = self.owners.resolve(chat_id);

        // Read-only: the pick stays on the list until explicitly removed.
        match self.store.pick_random(owner).await? {
            Some(movie) => self.reply(chat_id, &replies::random_pick(&movie.title)).await,
            None => self.reply(chat_id, replies::EMPTY_LIST).await,
        }
    }

    async fn handle_list(&self, chat_id: ChatId) -> Result<()> {
        let owner = self.owners.resolve(chat_id);

        let movies = self.store.list(owner).await?;
        if movies.is_empty() {
            return self.reply(chat_id, replies::EMPTY_LIST).await;
        }
        self.reply(chat_id, &replies::movie_list(&movies)).await
    }

    async fn handle_remove(&self, chat_id: ChatId, raw_title: &str) -> Result<()> {
        let title = normalize_title(raw_title);
        if title.is_empty() {
            return self.reply(chat_id, replies::REMOVE_USAGE).await;
        }

        let movie = Movie::new(title, self.owners.resolve(chat_id));
        if !self.store.exists(&movie).await? {
            return self.reply(chat_id, &replies::not_found(&movie.title)).await;
        }

        self.store.remove(&movie).await?;
        self.reply(chat_id, &replies::removed(&movie.title)).await
    }

    async fn handle_add(&self, chat_id: ChatId, text: &str) -> Result<()> {
        if text == "/remove" {
            return self.reply(chat_id, replies::REMOVE_MISSING_TITLE).await;
        }
        if text.starts_with('/') {
            return self.reply(chat_id, replies::UNKNOWN_COMMAND).await;
        }

        let title = match validate_title(text) {
            Ok(title) => title,
            Err(TitleError::Empty) => return self.reply(chat_id, replies::EMPTY_TITLE).await,
            Err(TitleError::TooLong { .. }) => {
                return self.reply(chat_id, &replies::title_too_long()).await
            }
        };

        let movie = Movie::new(title, self.owners.resolve(chat_id));
        if self.store.exists(&movie).await? {
            return self
                .reply(chat_id, &replies::already_listed(&movie.title))
                .await;
        }

        match self.store.save(&movie).await {
            Ok(()) => self.reply(chat_id, &replies::added(&movie.title)).await,
            // Another chat sharing this owner inserted it between the two calls.
            Err(Error::Duplicate { .. }) => {
                self.reply(chat_id, &replies::already_listed(&movie.title))
                    .await
            }
            Err(e) => Err(e),
        }
    }

    async fn reply(&self, chat_id: ChatId, text: &str) -> Result<()> {
        self.messenger.send_message(chat_id, text).await
    }
}
