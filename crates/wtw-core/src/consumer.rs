use std::{sync::Arc, time::Duration};

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::{ports::MessagingClient, processor::CommandProcessor, Result};

#[derive(Clone, Copy, Debug)]
pub struct ConsumerConfig {
    /// Max updates requested per fetch.
    pub batch_size: u8,
    /// Fixed delay after a failed fetch and after an empty batch.
    pub backoff: Duration,
}

/// The polling loop: fetch a batch, process it in order, advance the offset.
///
/// The offset lives in memory only. A restart relies on the messaging API's
/// retention window for what gets redelivered.
pub struct Consumer {
    messenger: Arc<dyn MessagingClient>,
    processor: CommandProcessor,
    cfg: ConsumerConfig,
    offset: i64,
}

impl Consumer {
    pub fn new(
        messenger: Arc<dyn MessagingClient>,
        processor: CommandProcessor,
        cfg: ConsumerConfig,
    ) -> Self {
        Self {
            messenger,
            processor,
            cfg,
            offset: 0,
        }
    }

    /// Next update id that will be requested.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Poll until `cancel` fires. Cancellation is a normal exit, not an error.
    ///
    /// The token is checked between network calls and during backoff sleeps;
    /// an in-flight request is allowed to finish.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<()> {
        info!(batch_size = self.cfg.batch_size, "bot started, waiting for updates");

        loop {
            if cancel.is_cancelled() {
                info!(offset = self.offset, "cancellation requested, stopping");
                return Ok(());
            }

            let updates = match self
                .messenger
                .fetch_updates(self.offset, self.cfg.batch_size)
                .await
            {
                Ok(updates) => updates,
                Err(e) => {
                    warn!(offset = self.offset, "error getting updates: {e}");
                    self.pause(&cancel).await;
                    continue;
                }
            };

            if updates.is_empty() {
                self.pause(&cancel).await;
                continue;
            }

            for update in &updates {
                if let Err(e) = self.processor.process(update).await {
                    // The update is abandoned; it will not be redelivered.
                    error!(update_id = update.id, "error processing update: {e}");
                }
                self.offset = self.offset.max(update.id + 1);
            }
        }
    }

    async fn pause(&self, cancel: &CancellationToken) {
        tokio::select! {
            _ = cancel.cancelled() => {}
            _ = tokio::time::sleep(self.cfg.backoff) => {}
        }
    }
}
