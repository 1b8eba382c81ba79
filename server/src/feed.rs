//! Newline-delimited JSON header feed.
//!
//! Each non-blank line is one [`HeaderJson`] object. Parsed records are sent
//! to the ingestion task over a bounded channel, so a slow writer applies
//! backpressure to the reader.

use std::path::Path;

use headerproof_store::HeaderRecord;
use headerproof_types::HeaderJson;
use thiserror::Error;
use tokio::{
    fs::File,
    io::{self, AsyncBufRead, AsyncBufReadExt, BufReader},
    select,
    sync::mpsc,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::convert::{ConvertError, header_from_json};

/// Capacity of the channel between the feed reader and the ingestion task.
pub const FEED_CHANNEL_CAPACITY: usize = 1024;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed header JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid header: {0}")]
    InvalidHeader(#[from] ConvertError),
}

/// Counters reported when the feed ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FeedStats {
    pub lines: u64,
    pub headers: u64,
    pub skipped: u64,
}

pub type FeedReader = Box<dyn AsyncBufRead + Send + Unpin>;

/// Open the feed at `path`, or stdin when no path is given.
pub async fn open(path: Option<&Path>) -> Result<FeedReader, FeedError> {
    Ok(match path {
        Some(path) => Box::new(BufReader::new(File::open(path).await?)),
        None => Box::new(BufReader::new(io::stdin())),
    })
}

/// Parse one feed line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<HeaderRecord>, FeedError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let json: HeaderJson = serde_json::from_str(line)?;
    Ok(Some(header_from_json(&json)?))
}

/// Read headers from `reader` until end of input, cancellation, or the
/// receiving side going away.
///
/// Malformed lines are logged and skipped; only I/O errors end the feed
/// early.
pub async fn read_feed<R>(
    reader: R,
    sender: mpsc::Sender<HeaderRecord>,
    cancellation_token: CancellationToken,
) -> Result<FeedStats, FeedError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut stats = FeedStats::default();

    loop {
        let line = select! {
            _ = cancellation_token.cancelled() => break,
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            break;
        };
        stats.lines += 1;

        match parse_line(&line) {
            Ok(Some(header)) => {
                debug!(number = header.number, "feed header");
                if sender.send(header).await.is_err() {
                    warn!("ingestion stopped, closing feed");
                    break;
                }
                stats.headers += 1;
            }
            Ok(None) => {}
            Err(e) => {
                stats.skipped += 1;
                warn!(line = stats.lines, error = %e, "skipping feed line");
            }
        }
    }

    info!(
        lines = stats.lines,
        headers = stats.headers,
        skipped = stats.skipped,
        "header feed ended"
    );
    Ok(stats)
}
