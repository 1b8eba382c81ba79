//! The single writer: drains the feed channel into an [`IngestionBatcher`].

use headerproof_store::{BatchSink, HeaderRecord, IngestionBatcher};
use tokio::{select, sync::mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Feed every received header to `batcher` until the channel closes or the
/// token is cancelled. Returns the batcher with whatever is still pending.
///
/// A failing header or commit is logged and ingestion carries on with the
/// next header.
pub async fn run_ingestion<S: BatchSink>(
    mut receiver: mpsc::Receiver<HeaderRecord>,
    mut batcher: IngestionBatcher<S>,
    cancellation_token: CancellationToken,
) -> IngestionBatcher<S> {
    loop {
        let header = select! {
            _ = cancellation_token.cancelled() => break,
            header = receiver.recv() => header,
        };
        let Some(header) = header else {
            break;
        };
        let number = header.number;
        if let Err(e) = batcher.ingest(header) {
            error!(number, error = %e, "failed to ingest header");
        }
    }

    info!(
        pending = batcher.pending_count(),
        batch_size = batcher.batch_size(),
        "ingestion stopped"
    );
    batcher
}
