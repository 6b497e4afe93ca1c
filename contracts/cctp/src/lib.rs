//! CCTP Contract - Cross-Chain Burn and Mint for CosmWasm Chains
//!
//! This contract combines a message transmitter and a token messenger. Tokens
//! burned on one domain are minted on another once an off-chain attester set
//! has signed the burn message.
//!
//! # Outgoing Flow (DepositForBurn)
//! 1. User burns CW20 tokens through this contract (directly or via CW20 `Send`)
//! 2. The contract emits the encoded envelope in a `message_sent` event
//! 3. Attesters sign `keccak256(envelope)` and the envelope is relayed to the
//!    destination domain
//!
//! # Incoming Flow (ReceiveMessage)
//! 1. Anyone (or the named destination caller) submits envelope + attestation
//! 2. The contract verifies m-of-n ordered signatures against the attester set
//! 3. The (source_domain, nonce) pair is marked used
//! 4. A BurnMessage body mints the paired local token; any other body is
//!    forwarded to the router
//!
//! # Security
//! - Ordered, duplicate-free m-of-n secp256k1 attestations
//! - Permanent replay protection per (source_domain, nonce)
//! - Per-message burn limits and minter allowances
//! - Independent pause switches for burns/mints and message traffic

pub mod address_codec;
pub mod contract;
pub mod custody;
pub mod error;
mod execute;
pub mod msg;
mod query;
pub mod state;

pub use crate::address_codec::{identity_to_address, local_identity};
pub use crate::error::ContractError;
