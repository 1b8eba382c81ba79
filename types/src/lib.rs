//! Wire types exchanged with the headerproof HTTP API.
//!
//! Digests travel as hex strings. Chain header fields are `0x`-prefixed;
//! Merkle digests (`leafHash`, `siblingHash`, `rootHash`) are plain hex.
//! Request fields the server must validate itself are optional so that a
//! missing field can be reported as invalid input rather than a parse error.

use serde::{Deserialize, Serialize};


pub type HexString = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HeaderJson {
    pub hash: HexString,
    pub parent_hash: HexString,
    pub number: u64,
    pub state_root: HexString,
    pub extrinsics_root: HexString,
    #[serde(default)]
    pub digest: HexString,
}

/// A proof step as sent over the wire.
///
/// `position` is kept as free text: anything other than `"left"` combines
/// the sibling on the right.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProofStepJson {
    pub sibling_hash: HexString,
    pub position: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProofResponse {
    pub leaf_hash: HexString,
    pub proof: Vec<ProofStepJson>,
    pub root_hash: HexString,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerifyProofRequest {
    pub leaf_hash: Option<HexString>,
    pub proof: Option<Vec<ProofStepJson>>,
    pub root_hash: Option<HexString>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyProofResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyBatchRequest {
    pub hashes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VerifyBatchEntry {
    pub hash: String,
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyBatchResponse {
    pub results: Vec<VerifyBatchEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
