//! SQLite adapter (rusqlite).
//!
//! This crate implements the `wtw-core` MovieStore port over a single SQLite
//! connection. Calls run on the blocking pool so the polling loop's runtime
//! threads never wait on disk I/O.

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use tracing::info;

use wtw_core::{
    domain::{Movie, OwnerId},
    errors::Error,
    ports::MovieStore,
    Result,
};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS movies (
    title TEXT NOT NULL,
    chat_id INTEGER NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    PRIMARY KEY (title, chat_id)
);";

#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| {
            Error::Storage(format!("failed to open database {}: {e}", path.display()))
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| db_err("can't connect to database", e))?;
        info!(path = %path.display(), "database opened");
        Ok(Self::from_connection(conn))
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| db_err("failed to open database", e))?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| Error::Storage("database connection lock poisoned".to_string()))?;
            f(&guard)
        })
        .await
        .map_err(|e| Error::Storage(format!("database task failed: {e}")))?
    }
}

fn db_err(context: &str, e: rusqlite::Error) -> Error {
    Error::Storage(format!("{context}: {e}"))
}

fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(e, rusqlite::Error::SqliteFailure(f, _) if f.code == ErrorCode::ConstraintViolation)
}

#[async_trait]
impl MovieStore for SqliteStore {
    async fn init_schema(&self) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute_batch(SCHEMA)
                .map_err(|e| db_err("failed to create table", e))
        })
        .await
    }

    async fn save(&self, movie: &Movie) -> Result<()> {
        if movie.title.is_empty() {
            return Err(Error::InvalidInput("title cannot be empty".to_string()));
        }

        let Movie { title, owner } = movie.clone();
        self.with_conn(move |conn| {
            let inserted = conn.execute(
                "INSERT INTO movies (title, chat_id) VALUES (?1, ?2)",
                params![title, owner.0],
            );
            match inserted {
                Ok(_) => Ok(()),
                Err(e) if is_constraint_violation(&e) => Err(Error::Duplicate { title }),
                Err(e) => Err(db_err("failed to insert movie", e)),
            }
        })
        .await
    }

    async fn pick_random(&self, owner: OwnerId) -> Result<Option<Movie>> {
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT title, chat_id FROM movies WHERE chat_id = ?1 ORDER BY RANDOM() LIMIT 1",
                params![owner.0],
                |row| Ok(Movie::new(row.get::<_, String>(0)?, OwnerId(row.get(1)?))),
            )
            .optional()
            .map_err(|e| db_err("can't pick random movie", e))
        })
        .await
    }

    async fn remove(&self, movie: &Movie) -> Result<()> {
        let Movie { title, owner } = movie.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "DELETE FROM movies WHERE title = ?1 AND chat_id = ?2",
                params![title, owner.0],
            )
            .map(|_| ())
            .map_err(|e| db_err("failed to delete the movie", e))
        })
        .await
    }

    async fn list(&self, owner: OwnerId) -> Result<Vec<Movie>> {
        self.with_conn(move |conn| {
            let mut stmt = conn
                .prepare("SELECT title, chat_id FROM movies WHERE chat_id = ?1 ORDER BY title ASC")
                .map_err(|e| db_err("can't get movies", e))?;
            let rows = stmt
                .query_map(params![owner.0], |row| {
                    Ok(Movie::new(row.get::<_, String>(0)?, OwnerId(row.get(1)?)))
                })
                .map_err(|e| db_err("can't get movies", e))?;
            rows.collect::<rusqlite::Result<Vec<_>>>()
                .map_err(|e| db_err("can't scan movie", e))
        })
        .await
    }

    async fn exists(&self, movie: &Movie) -> Result<bool> {
        let Movie { title, owner } = movie.clone();
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM movies WHERE title = ?1 AND chat_id = ?2",
                params![title, owner.0],
                |row| row.get::<_, i64>(0),
            )
            .map(|count| count > 0)
            .map_err(|e| db_err("failed to check movie existence", e))
        })
        .await
    }
}
