//! Attestation verification
//!
//! An attestation is the concatenation of `threshold` recoverable secp256k1
//! signatures (`r || s || v`, 65 bytes each) over `keccak256(message)`.
//! Signatures must be ordered by strictly increasing signer address, which
//! makes duplicate detection and membership checks a single linear pass and
//! gives every attestation one canonical encoding.
//!
//! Public key recovery goes through [`cosmwasm_std::Api`] so the contract uses
//! the chain's native secp256k1 implementation.

use cosmwasm_std::Api;

use crate::error::AttestationError;
use crate::hash::{keccak256, pubkey_to_address};

/// Length of one recoverable signature
pub const SIGNATURE_LEN: usize = 65;

/// 20-byte signer identity derived from the recovered public key
pub type AttesterAddress = [u8; 20];

/// Verify that `attestation` carries `threshold` valid, ordered signatures
/// from members of `attesters` over `message`.
///
/// `attesters` is a snapshot taken by the caller; this function never mutates
/// policy state.
pub fn verify_attestation_signatures(
    api: &dyn Api,
    message: &[u8],
    attestation: &[u8],
    attesters: &[AttesterAddress],
    threshold: u32,
) -> Result<(), AttestationError> {
    let expected = SIGNATURE_LEN as u64 * u64::from(threshold);
    if attestation.len() as u64 != expected {
        return Err(AttestationError::InvalidLength {
            expected,
            got: attestation.len(),
        });
    }

    if threshold == 0 {
        return Err(AttestationError::ZeroThreshold);
    }

    let digest = keccak256(message);
    let mut previous: Option<AttesterAddress> = None;

    for (index, signature) in attestation.chunks_exact(SIGNATURE_LEN).enumerate() {
        let signer = recover_signer(api, &digest, signature, index)?;

        if let Some(previous) = previous {
            if signer <= previous {
                return Err(AttestationError::InvalidOrderOrDuplicate { index });
            }
        }

        if !attesters.contains(&signer) {
            return Err(AttestationError::UnknownSigner {
                signer: format_attester(&signer),
            });
        }

        previous = Some(signer);
    }

    Ok(())
}

/// Recover the address that produced `signature` over `digest`.
fn recover_signer(
    api: &dyn Api,
    digest: &[u8; 32],
    signature: &[u8],
    index: usize,
) -> Result<AttesterAddress, AttestationError> {
    let recovery_param = normalize_recovery_id(signature[64]).ok_or_else(|| {
        AttestationError::RecoveryFailed {
            index,
            reason: format!("invalid recovery id {}", signature[64]),
        }
    })?;

    let pubkey = api
        .secp256k1_recover_pubkey(digest, &signature[..64], recovery_param)
        .map_err(|e| AttestationError::RecoveryFailed {
            index,
            reason: e.to_string(),
        })?;

    pubkey_to_address(&pubkey).ok_or_else(|| AttestationError::RecoveryFailed {
        index,
        reason: format!("unexpected public key length {}", pubkey.len()),
    })
}

/// Map a trailing `v` byte to a recovery id.
///
/// Valid v values: 0, 1, 27, 28
pub fn normalize_recovery_id(v: u8) -> Option<u8> {
    match v {
        0 | 27 => Some(0),
        1 | 28 => Some(1),
        _ => None,
    }
}

/// Parse a 20-byte attester address from hex (with or without 0x prefix).
pub fn parse_attester(input: &str) -> Result<AttesterAddress, String> {
    let hex_str = input.strip_prefix("0x").unwrap_or(input);
    if hex_str.len() != 40 {
        return Err(format!(
            "Invalid attester length: expected 40 hex chars, got {}",
            hex_str.len()
        ));
    }
    let bytes = hex::decode(hex_str).map_err(|e| format!("Invalid hex: {}", e))?;
    let mut address = [0u8; 20];
    address.copy_from_slice(&bytes);
    Ok(address)
}

/// Canonical lower-case `0x` rendering of an attester address.
pub fn format_attester(address: &AttesterAddress) -> String {
    format!("0x{}", hex::encode(address))
}
