//! Conversions between store records and wire types.

use headerproof_merkle::{
    CryptoHash, Position, ProofStep,
    hash::{parse_hex, strip_hex_prefix},
};
use headerproof_store::{HeaderProof, HeaderRecord};
use headerproof_types::{HeaderJson, ProofResponse, ProofStepJson};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("field `{field}` is not a 32-byte hex digest: {value}")]
    InvalidDigest { field: &'static str, value: String },
    #[error("field `{field}` is not valid hex: {value}")]
    InvalidHex { field: &'static str, value: String },
}

fn prefixed_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn digest_field(field: &'static str, value: &str) -> Result<CryptoHash, ConvertError> {
    parse_hex(value).ok_or_else(|| ConvertError::InvalidDigest {
        field,
        value: value.to_owned(),
    })
}

pub fn header_to_json(header: &HeaderRecord) -> HeaderJson {
    HeaderJson {
        hash: prefixed_hex(&header.hash),
        parent_hash: prefixed_hex(&header.parent_hash),
        number: header.number,
        state_root: prefixed_hex(&header.state_root),
        extrinsics_root: prefixed_hex(&header.extrinsics_root),
        digest: prefixed_hex(&header.digest),
    }
}

pub fn header_from_json(json: &HeaderJson) -> Result<HeaderRecord, ConvertError> {
    let digest = hex::decode(strip_hex_prefix(&json.digest)).map_err(|_| {
        ConvertError::InvalidHex {
            field: "digest",
            value: json.digest.clone(),
        }
    })?;
    Ok(HeaderRecord {
        hash: digest_field("hash", &json.hash)?,
        parent_hash: digest_field("parentHash", &json.parent_hash)?,
        number: json.number,
        state_root: digest_field("stateRoot", &json.state_root)?,
        extrinsics_root: digest_field("extrinsicsRoot", &json.extrinsics_root)?,
        digest,
    })
}

pub fn proof_step_to_json(step: &ProofStep) -> ProofStepJson {
    ProofStepJson {
        sibling_hash: hex::encode(step.sibling_hash),
        position: step.position.as_str().to_owned(),
    }
}

/// Decode wire proof steps.
///
/// Any position other than `"left"` is taken as right. Returns `None` if a
/// sibling digest does not decode, which callers treat as a failed proof.
pub fn proof_from_json(steps: &[ProofStepJson]) -> Option<Vec<ProofStep>> {
    steps
        .iter()
        .map(|step| {
            let position = if step.position == Position::Left.as_str() {
                Position::Left
            } else {
                Position::Right
            };
            Some(ProofStep {
                sibling_hash: parse_hex(&step.sibling_hash)?,
                position,
            })
        })
        .collect()
}

pub fn proof_response(proof: &HeaderProof) -> ProofResponse {
    ProofResponse {
        leaf_hash: hex::encode(proof.leaf_hash),
        proof: proof.proof.iter().map(proof_step_to_json).collect(),
        root_hash: hex::encode(proof.root_hash),
    }
}
