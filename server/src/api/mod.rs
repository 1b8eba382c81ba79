//! HTTP routes under `/headers`.

mod error;


use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{get, post},
};
use headerproof_merkle::{hash::parse_hex, verify_proof as verify_merkle_proof};
use headerproof_store::SharedMerkleStore;
use headerproof_types::{
    HeaderJson, ProofResponse, VerifyBatchEntry, VerifyBatchRequest, VerifyBatchResponse,
    VerifyProofRequest, VerifyProofResponse,
};
use tower_http::cors::CorsLayer;
use tracing::debug;

pub use self::error::AppError;
use crate::convert::{header_to_json, proof_from_json, proof_response};

#[derive(Clone)]
pub struct AppState {
    store: SharedMerkleStore,
}

impl AppState {
    pub fn new(store: SharedMerkleStore) -> Self {
        Self { store }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let headers = Router::new()
        .route("/block/{number}", get(header_by_block))
        .route("/hash/{hash}", get(header_by_hash))
        .route("/proof/{hash}", get(header_proof))
        .route("/verify-proof", post(verify_proof))
        .route("/recent", get(recent_headers))
        .route("/verify-batch", post(verify_batch));

    Router::new()
        .nest("/headers", headers)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub(crate) async fn header_by_block(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<HeaderJson>, AppError> {
    debug!(%number, "get header by block number");
    let store = state.store.read()?;
    store
        .get_header_by_block_number(&number)
        .map(|header| Json(header_to_json(header)))
        .ok_or_else(|| AppError::NotFound(format!("Header not found for block number {number}")))
}

pub(crate) async fn header_by_hash(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Json<HeaderJson>, AppError> {
    let store = state.store.read()?;
    store
        .get_header_by_hash(&hash)
        .map(|header| Json(header_to_json(header)))
        .ok_or_else(|| AppError::NotFound(format!("Header not found for hash {hash}")))
}

pub(crate) async fn header_proof(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Json<ProofResponse>, AppError> {
    let proof = state.store.read()?.prove_header(&hash)?;
    Ok(Json(proof_response(&proof)))
}

pub(crate) async fn verify_proof(
    payload: Result<Json<VerifyProofRequest>, JsonRejection>,
) -> Result<Json<VerifyProofResponse>, AppError> {
    let Json(request) = payload?;
    // Empty digests count as missing.
    let leaf_hash = request.leaf_hash.filter(|hash| !hash.is_empty());
    let root_hash = request.root_hash.filter(|hash| !hash.is_empty());
    let (Some(leaf_hash), Some(proof), Some(root_hash)) = (leaf_hash, request.proof, root_hash)
    else {
        return Err(AppError::InvalidInput(
            "Missing required parameters: leafHash, proof, rootHash".into(),
        ));
    };

    // Undecodable input cannot reproduce any root: report it as invalid.
    let success = match (parse_hex(&leaf_hash), proof_from_json(&proof), parse_hex(&root_hash)) {
        (Some(leaf), Some(steps), Some(root)) => verify_merkle_proof(&leaf, &steps, &root),
        _ => false,
    };
    let message = if success {
        "The proof is valid."
    } else {
        "The proof is invalid."
    };
    Ok(Json(VerifyProofResponse {
        success,
        message: message.into(),
    }))
}

pub(crate) async fn recent_headers(
    State(state): State<AppState>,
) -> Result<Json<Vec<HeaderJson>>, AppError> {
    let store = state.store.read()?;
    Ok(Json(
        store
            .get_recent_headers()
            .into_iter()
            .map(header_to_json)
            .collect(),
    ))
}

/// Verify each hash in its own task; one failing entry never affects the
/// others. Results keep request order.
pub(crate) async fn verify_batch(
    State(state): State<AppState>,
    payload: Result<Json<VerifyBatchRequest>, JsonRejection>,
) -> Result<Json<VerifyBatchResponse>, AppError> {
    let Json(request) = payload?;
    let hashes = request
        .hashes
        .ok_or_else(|| AppError::InvalidInput("Missing required parameter: hashes".into()))?;

    let tasks: Vec<_> = hashes
        .into_iter()
        .map(|hash| {
            let store = state.store.clone();
            let task = tokio::spawn({
                let hash = hash.clone();
                async move { verify_entry(&store, hash) }
            });
            (hash, task)
        })
        .collect();

    let mut results = Vec::with_capacity(tasks.len());
    for (hash, task) in tasks {
        let entry = task.await.unwrap_or_else(|e| VerifyBatchEntry {
            hash,
            is_valid: false,
            error: Some(format!("verification task failed: {e}")),
        });
        results.push(entry);
    }
    Ok(Json(VerifyBatchResponse { results }))
}

fn verify_entry(store: &SharedMerkleStore, hash: String) -> VerifyBatchEntry {
    let outcome = store
        .read()
        .and_then(|store| store.verify_header(&hash));
    match outcome {
        Ok(is_valid) => VerifyBatchEntry {
            hash,
            is_valid,
            error: None,
        },
        Err(e) => VerifyBatchEntry {
            hash,
            is_valid: false,
            error: Some(e.to_string()),
        },
    }
}
