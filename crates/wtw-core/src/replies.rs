//! User-facing reply texts.

use crate::{domain::Movie, title::MAX_TITLE_CHARS};

pub const START: &str = "👋 Hello! I'm your What To Watch bot.\n\n\
Send me a movie title to add it to your list! 🎬\n\n\
Use /help to see all commands.";

pub const HELP: &str = "📖 Help:\n\n\
/start - starts this bot\n\
/help - shows this message\n\
/random - gets a random movie from your list\n\
/list - shows all movies in your list\n\
/remove + title - removes a movie (don't write the + sign)\n\n\
To add a movie, just send me its title! 🎬";

pub const EMPTY_LIST: &str = "You don't have any saved movies yet!\n\
Add some by sending me their titles! 🎬";

pub const UNKNOWN_COMMAND: &str = "❌ Unknown command. Use /help for the list of commands.";

pub const REMOVE_MISSING_TITLE: &str =
    "❌ Please provide a movie title after the \"/remove\" command.";

pub const REMOVE_USAGE: &str = "❌ Please specify the movie title after the /remove command";

pub const EMPTY_TITLE: &str = "❌ Movie title cannot be empty";

pub fn title_too_long() -> String {
    format!("❌ Movie title is too long (maximum {MAX_TITLE_CHARS} characters)")
}

pub fn random_pick(title: &str) -> String {
    format!("🎬 {title}\n\nTo remove it from the list after watching, send:\n/remove {title}")
}

pub fn movie_list(movies: &[Movie]) -> String {
    let mut out = format!("📋 You have {} movies:\n\n", movies.len());
    for (idx, movie) in movies.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", idx + 1, movie.title));
    }
    out
}

pub fn already_listed(title: &str) -> String {
    format!("ℹ️ The movie \"{title}\" is already in your list!")
}

pub fn added(title: &str) -> String {
    format!("✅ The movie \"{title}\" has been added to your list!")
}

pub fn not_found(title: &str) -> String {
    format!("❌ The movie \"{title}\" was not found in your list")
}

pub fn removed(title: &str) -> String {
    format!("✅ The movie \"{title}\" has been removed from your list")
}
