//! Error types for the protocol core

use thiserror::Error;

/// Failure to parse one of the wire formats.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum DecodeError {
    #[error("Message too short: expected at least {min} bytes, got {got}")]
    TooShort { min: usize, got: usize },

    #[error("Invalid burn message length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("Burn message amount does not fit in 64 bits")]
    AmountOverflow,
}

/// Failure to verify an attestation against the attester set.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum AttestationError {
    #[error("Invalid attestation length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: u64, got: usize },

    #[error("Signature threshold must be greater than zero")]
    ZeroThreshold,

    #[error("Signature recovery failed for signature {index}: {reason}")]
    RecoveryFailed { index: usize, reason: String },

    #[error("Invalid signature order or duplicate signer at signature {index}")]
    InvalidOrderOrDuplicate { index: usize },

    #[error("Invalid signature: signer {signer} is not an enabled attester")]
    UnknownSigner { signer: String },
}
