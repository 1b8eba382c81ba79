//! Command line and environment configuration.

use std::{net::SocketAddr, num::NonZeroUsize, path::PathBuf};

use clap::{ArgAction, Parser};
use headerproof_store::DEFAULT_RECENT_LIMIT;

pub const DEFAULT_LISTEN: &str = "127.0.0.1:3000";
pub const DEFAULT_BATCH_SIZE: &str = "8";

/// Batch incoming block headers into Merkle trees and serve inclusion proofs.
#[derive(Debug, Clone, Parser)]
#[command(name = "headerproof", version, about)]
pub struct ServerConfig {
    /// Address to listen on for HTTP requests
    #[arg(long, env = "HEADERPROOF_LISTEN", default_value = DEFAULT_LISTEN)]
    pub listen: SocketAddr,

    /// Number of headers committed together into one Merkle tree
    #[arg(long, env = "HEADERPROOF_BATCH_SIZE", default_value = DEFAULT_BATCH_SIZE)]
    pub batch_size: NonZeroUsize,

    /// Maximum number of headers returned by /headers/recent
    #[arg(long, env = "HEADERPROOF_RECENT_LIMIT", default_value_t = DEFAULT_RECENT_LIMIT)]
    pub recent_limit: usize,

    /// Newline-delimited JSON header feed; reads stdin when omitted
    #[arg(long, env = "HEADERPROOF_FEED")]
    pub feed: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
