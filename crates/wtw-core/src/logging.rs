use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::{errors::Error, Result};

// Crates whose events are shown at info level by default.
const WORKSPACE_CRATES: &[&str] = &["wtw_core", "wtw_sqlite", "wtw_telegram"];

/// Installs the global subscriber: compact lines on stderr, filtered by
/// `RUST_LOG` when it is set.
///
/// Without `RUST_LOG` our crates log at info and dependencies at warn, so
/// teloxide and reqwest stay quiet during normal polling.
pub fn init(binary: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directives(binary))
            .map_err(|e| Error::Config(format!("invalid log filter: {e}")))?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| Error::Config(format!("log subscriber already set: {e}")))
}

fn default_directives(binary: &str) -> String {
    let binary = binary.replace('-', "_");
    std::iter::once("warn".to_string())
        .chain(
            std::iter::once(binary.as_str())
                .chain(WORKSPACE_CRATES.iter().copied().filter(|c| *c != binary))
                .map(|c| format!("{c}=info")),
        )
        .collect::<Vec<_>>()
        .join(",")
}
