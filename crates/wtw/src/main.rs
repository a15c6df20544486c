use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use wtw_core::{
    config::Config,
    consumer::{Consumer, ConsumerConfig},
    ports::{MessagingClient, MovieStore},
    processor::CommandProcessor,
};
use wtw_sqlite::SqliteStore;
use wtw_telegram::TelegramClient;

#[tokio::main]
async fn main() {
    if let Err(e) = wtw_core::logging::init("wtw") {
        eprintln!("{e}");
    }

    if let Err(e) = run().await {
        error!("{e:#}");
        std::process::exit(1);
    }
    info!("bot stopped gracefully");
}

async fn run() -> anyhow::Result<()> {
    let cfg = Config::load()?;

    let store: Arc<dyn MovieStore> = Arc::new(
        SqliteStore::open(&cfg.database_path).context("failed to create storage")?,
    );
    store
        .init_schema()
        .await
        .context("failed to init storage")?;
    info!(path = %cfg.database_path.display(), "database initialized");

    let messenger: Arc<dyn MessagingClient> =
        Arc::new(TelegramClient::new(cfg.bot_token.clone(), cfg.request_timeout)?);
    info!(shared_chats = cfg.owner_map.len(), "owner map loaded");

    let processor = CommandProcessor::new(messenger.clone(), store, cfg.owner_map.clone());
    let mut consumer = Consumer::new(
        messenger,
        processor,
        ConsumerConfig {
            batch_size: cfg.batch_size,
            backoff: cfg.poll_backoff,
        },
    );

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_signal(cancel.clone()));

    consumer.run(cancel).await?;
    Ok(())
}

async fn cancel_on_signal(cancel: CancellationToken) {
    match shutdown_signal().await {
        Ok(name) => {
            info!(signal = name, "received shutdown signal, shutting down");
            cancel.cancel();
        }
        // The default handlers still terminate the process.
        Err(e) => error!("failed to listen for shutdown signals: {e}"),
    }
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut term = signal(SignalKind::terminate())?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res.map(|_| "SIGINT"),
        _ = term.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await.map(|_| "ctrl-c")
}
