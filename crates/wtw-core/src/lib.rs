//! Core domain + application logic for the What To Watch bot.
//!
//! This crate is intentionally framework-agnostic. Telegram and SQLite live
//! behind ports (traits) implemented in adapter crates.

pub mod config;
pub mod consumer;
pub mod domain;
pub mod errors;
pub mod identity;
pub mod logging;
pub mod ports;
pub mod processor;
pub mod replies;
pub mod title;

#[cfg(test)]
pub(crate) mod testing;

pub use errors::{Error, Result};
