use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{errors::Error, identity::OwnerMap, Result};

pub const DEFAULT_DATABASE_PATH: &str = "movies.db";
pub const DEFAULT_BATCH_SIZE: u8 = 5;
pub const DEFAULT_POLL_BACKOFF: Duration = Duration::from_secs(3);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// Telegram accepts 1..=100 for getUpdates `limit`.
const MAX_BATCH_SIZE: u8 = 100;

/// Typed configuration for the bot.
#[derive(Clone, Debug)]
pub struct Config {
    pub bot_token: String,
    pub database_path: PathBuf,
    pub owner_map: OwnerMap,

    // Polling
    pub batch_size: u8,
    pub poll_backoff: Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Load from the process environment, after applying `.env` if present.
    pub fn load() -> Result<Self> {
        apply_dotenv(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bot_token = lookup("BOT_TOKEN").and_then(non_empty).ok_or_else(|| {
            Error::Config("BOT_TOKEN environment variable is not set".to_string())
        })?;

        let database_path = lookup("DATABASE_PATH")
            .and_then(non_empty)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

        let owner_map = match lookup("WTW_OWNER_MAP") {
            Some(spec) => OwnerMap::parse(&spec)?,
            None => OwnerMap::default(),
        };

        let batch_size = match parse_num::<u8>(&lookup, "WTW_BATCH_SIZE")? {
            Some(n) if (1..=MAX_BATCH_SIZE).contains(&n) => n,
            Some(n) => {
                return Err(Error::Config(format!(
                    "WTW_BATCH_SIZE must be between 1 and {MAX_BATCH_SIZE}, got {n}"
                )))
            }
            None => DEFAULT_BATCH_SIZE,
        };

        let poll_backoff = parse_num::<u64>(&lookup, "WTW_POLL_BACKOFF_MS")?
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_POLL_BACKOFF);
        let request_timeout = parse_num::<u64>(&lookup, "WTW_REQUEST_TIMEOUT_SECS")?
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        Ok(Self {
            bot_token,
            database_path,
            owner_map,
            batch_size,
            poll_backoff,
            request_timeout,
        })
    }
}

fn parse_num<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>> {
    let Some(raw) = lookup(key).and_then(non_empty) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| Error::Config(format!("{key} must be a number, got '{raw}'")))
}

// Applies `KEY=value` pairs from `path`; variables already in the environment win.
fn apply_dotenv(path: &Path) {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "skipping .env");
            return;
        }
    };

    let pending: Vec<_> = parse_dotenv(&contents)
        .into_iter()
        .filter(|(key, _)| env::var_os(key).is_none())
        .collect();
    tracing::debug!(path = %path.display(), vars = pending.len(), "applying .env");
    for (key, value) in pending {
        env::set_var(key, value);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .filter_map(parse_dotenv_line)
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

// `None` for blanks, comments and lines without a usable key.
fn parse_dotenv_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    let key = key.strip_prefix("export ").unwrap_or(key).trim();
    if key.is_empty() {
        return None;
    }
    Some((key, unquote(value.trim())))
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
