//! CCTP Common - Protocol Core Shared by the CCTP Contracts
//!
//! This package holds the parts of the protocol that must produce
//! byte-identical results on every chain:
//! - `layout` / `message` / `burn_message` - fixed-offset wire codecs
//! - `attestation` - m-of-n ordered secp256k1 attestation verification
//! - `hash` - keccak256 helpers and the replay-protection key

pub mod attestation;
pub mod burn_message;
pub mod error;
pub mod hash;
pub mod layout;
pub mod message;

pub use attestation::{verify_attestation_signatures, AttesterAddress, SIGNATURE_LEN};
pub use burn_message::BurnMessage;
pub use error::{AttestationError, DecodeError};
pub use hash::{bytes32_to_hex, keccak256, used_nonce_key};
pub use layout::{BURN_MESSAGE_LEN, MESSAGE_HEADER_LEN};
pub use message::Message;
