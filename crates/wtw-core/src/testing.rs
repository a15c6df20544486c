//! In-process fakes for the ports, shared by the core's unit tests.

use std::{
    collections::{HashSet, VecDeque},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{
    domain::{ChatId, IncomingUpdate, Movie, OwnerId, TextMessage, UserId},
    errors::Error,
    ports::{MessagingClient, MovieStore},
    Result,
};

pub fn text_update(id: i64, chat: i64, text: &str) -> IncomingUpdate {
    IncomingUpdate {
        id,
        message: Some(TextMessage {
            chat_id: ChatId(chat),
            user_id: Some(UserId(chat)),
            username: Some("tester".to_string()),
            text: text.to_string(),
        }),
    }
}

#[derive(Default)]
pub struct FakeMessenger {
    batches: Mutex<VecDeque<Result<Vec<IncomingUpdate>>>>,
    fetches: Mutex<Vec<(i64, u8)>>,
    sends: Mutex<Vec<(ChatId, String)>>,
    fail_sends: Mutex<bool>,
    drained: Mutex<Option<CancellationToken>>,
}

impl FakeMessenger {
    pub fn push_batch(&self, batch: Result<Vec<IncomingUpdate>>) {
        self.batches.lock().unwrap().push_back(batch);
    }

    /// Cancel `token` on the first fetch after every scripted batch was served.
    pub fn cancel_when_drained(&self, token: CancellationToken) {
        *self.drained.lock().unwrap() = Some(token);
    }

    pub fn fail_sends(&self, fail: bool) {
        *self.fail_sends.lock().unwrap() = fail;
    }

    pub fn fetches(&self) -> Vec<(i64, u8)> {
        self.fetches.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<(ChatId, String)> {
        self.sends.lock().unwrap().clone()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, t)| t).collect()
    }
}

#[async_trait]
impl MessagingClient for FakeMessenger {
    async fn fetch_updates(&self, offset: i64, limit: u8) -> Result<Vec<IncomingUpdate>> {
        self.fetches.lock().unwrap().push((offset, limit));
        let next = self.batches.lock().unwrap().pop_front();
        match next {
            Some(batch) => batch,
            None => {
                if let Some(token) = self.drained.lock().unwrap().as_ref() {
                    token.cancel();
                }
                Ok(Vec::new())
            }
        }
    }

    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<()> {
        if *self.fail_sends.lock().unwrap() {
            return Err(Error::External("send failed".to_string()));
        }
        self.sends.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }
}

/// Vec-backed store with the same contract as the SQLite adapter.
#[derive(Default)]
pub struct MemoryStore {
    movies: Mutex<Vec<Movie>>,
    failing: Mutex<HashSet<String>>,
    hidden: Mutex<HashSet<String>>,
    calls: AtomicUsize,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Make every call touching `title` fail with a storage error.
    pub fn fail_on(&self, title: &str) {
        self.failing.lock().unwrap().insert(title.to_string());
    }

    /// Make `exists` report `title` as absent even when stored.
    pub fn hide_from_exists(&self, title: &str) {
        self.hidden.lock().unwrap().insert(title.to_string());
    }

    pub fn movies_of(&self, owner: OwnerId) -> Vec<String> {
        let mut titles: Vec<String> = self
            .movies
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.owner == owner)
            .map(|m| m.title.clone())
            .collect();
        titles.sort();
        titles
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self, title: &str) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.lock().unwrap().contains(title) {
            return Err(Error::Storage(format!("injected failure for '{title}'")));
        }
        Ok(())
    }
}

#[async_trait]
impl MovieStore for MemoryStore {
    async fn init_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn save(&self, movie: &Movie) -> Result<()> {
        self.check(&movie.title)?;
        if movie.title.is_empty() {
            return Err(Error::InvalidInput("title cannot be empty".to_string()));
        }
        let mut movies = self.movies.lock().unwrap();
        if movies.contains(movie) {
            return Err(Error::Duplicate {
                title: movie.title.clone(),
            });
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        movies.push(movie.clone());
        Ok(())
    }

    async fn pick_random(&self, owner: OwnerId) -> Result<Option<Movie>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .movies
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.owner == owner)
            .cloned())
    }

    async fn remove(&self, movie: &Movie) -> Result<()> {
        self.check(&movie.title)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.movies.lock().unwrap().retain(|m| m != movie);
        Ok(())
    }

    async fn list(&self, owner: OwnerId) -> Result<Vec<Movie>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut out: Vec<Movie> = self
            .movies
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.owner == owner)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(out)
    }

    async fn exists(&self, movie: &Movie) -> Result<bool> {
        self.check(&movie.title)?;
        if self.hidden.lock().unwrap().contains(&movie.title) {
            return Ok(false);
        }
        Ok(self.movies.lock().unwrap().contains(movie))
    }
}
