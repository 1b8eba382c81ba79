//! HTTP service that batches a stream of block headers into Merkle trees and
//! serves lookups and inclusion proofs over them.

pub mod api;
pub mod config;
pub mod convert;
pub mod feed;
pub mod ingest;
pub mod logging;
