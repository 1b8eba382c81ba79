use std::time::Duration;

use clap::Parser;
use eyre::{Result as EyreResult, WrapErr, eyre};
use headerproof_server::{
    api::{self, AppState},
    config::ServerConfig,
    feed::{self, FEED_CHANNEL_CAPACITY},
    ingest,
    logging::{self, LogLevel},
};
use headerproof_store::{IngestionBatcher, MerkleStore, SharedMerkleStore};
use tokio::{net::TcpListener, runtime, sync::mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Upper bound on waiting for blocking tasks once the server has stopped.
/// An idle stdin read never completes, so shutdown must not wait on it.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

fn main() -> EyreResult<()> {
    let config = ServerConfig::parse();
    logging::try_init(LogLevel::from_verbosity(config.verbose))
        .map_err(|e| eyre!("failed to initialise logging: {e}"))?;

    let runtime = runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .wrap_err("failed to start tokio runtime")?;
    let result = runtime.block_on(run(config));
    runtime.shutdown_timeout(SHUTDOWN_TIMEOUT);
    result
}

async fn run(config: ServerConfig) -> EyreResult<()> {
    let store = SharedMerkleStore::new(MerkleStore::new(config.recent_limit));
    let batcher = IngestionBatcher::new(config.batch_size.get(), store.clone())?;
    let cancellation_token = CancellationToken::new();

    let reader = feed::open(config.feed.as_deref())
        .await
        .wrap_err("failed to open header feed")?;
    let (sender, receiver) = mpsc::channel(FEED_CHANNEL_CAPACITY);
    let feed_task = tokio::spawn(feed::read_feed(
        reader,
        sender,
        cancellation_token.clone(),
    ));
    let ingest_task = tokio::spawn(ingest::run_ingestion(
        receiver,
        batcher,
        cancellation_token.clone(),
    ));

    tokio::spawn({
        let cancellation_token = cancellation_token.clone();
        async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("shutting down");
                    cancellation_token.cancel();
                }
                Err(e) => warn!(error = %e, "unable to listen for shutdown signal"),
            }
        }
    });

    let listener = TcpListener::bind(config.listen)
        .await
        .wrap_err_with(|| format!("failed to bind {}", config.listen))?;
    info!(
        address = %config.listen,
        batch_size = config.batch_size.get(),
        recent_limit = config.recent_limit,
        "listening"
    );

    let app = api::router(AppState::new(store));
    axum::serve(listener, app)
        .with_graceful_shutdown({
            let cancellation_token = cancellation_token.clone();
            async move { cancellation_token.cancelled().await }
        })
        .await
        .wrap_err("server error")?;

    cancellation_token.cancel();
    match feed_task.await? {
        Ok(stats) => info!(headers = stats.headers, skipped = stats.skipped, "feed closed"),
        Err(e) => error!(error = %e, "feed failed"),
    }
    let batcher = ingest_task.await?;
    if batcher.pending_count() > 0 {
        warn!(
            pending = batcher.pending_count(),
            "discarding headers from incomplete batch"
        );
    }

    Ok(())
}
