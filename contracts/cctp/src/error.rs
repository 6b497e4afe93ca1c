//! Error types for the CCTP contract
//!
//! Variants are grouped by category so callers can tell malformed input,
//! policy violations, authorization failures and replays apart.

use cctp_common::{AttestationError, DecodeError};
use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Decode(#[from] DecodeError),

    #[error("{0}")]
    Attestation(#[from] AttestationError),

    // ========================================================================
    // Role Errors
    // ========================================================================

    #[error("Unauthorized: only owner can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only pending owner can accept")]
    UnauthorizedPendingOwner,

    #[error("No pending owner change")]
    NoPendingOwner,

    #[error("Unauthorized: only attester manager can perform this action")]
    UnauthorizedAttesterManager,

    #[error("Unauthorized: only pauser can perform this action")]
    UnauthorizedPauser,

    #[error("Unauthorized: only token controller can perform this action")]
    UnauthorizedTokenController,

    // ========================================================================
    // Policy Errors
    // ========================================================================

    #[error("Burning and minting are paused")]
    BurningAndMintingPaused,

    #[error("Sending and receiving messages are paused")]
    SendingAndReceivingPaused,

    #[error("Message body too large: {size} bytes exceeds maximum of {max}")]
    MessageBodyTooLarge { size: u64, max: u64 },

    #[error("Burn amount {amount} exceeds per-message limit of {limit}")]
    OverBurnLimit { limit: Uint128, amount: Uint128 },

    #[error("No attesters configured")]
    NoAttesters,

    #[error("No signature threshold configured")]
    NoThreshold,

    #[error("No remote token messenger for destination domain {domain}")]
    UnknownDestination { domain: u32 },

    #[error("Burn token not supported: {token}")]
    UnsupportedBurnToken { token: String },

    #[error("No router configured for non-burn message bodies")]
    NoRouter,

    // ========================================================================
    // Input Validation Errors
    // ========================================================================

    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Amount {amount} does not fit in 64 bits")]
    AmountTooLarge { amount: Uint128 },

    #[error("Recipient must be nonzero")]
    ZeroRecipient,

    #[error("Destination caller must be nonzero")]
    ZeroDestinationCaller,

    #[error("Mint recipient must be nonzero")]
    EmptyMintRecipient,

    #[error("Invalid {field}: expected 32 bytes, got {got}")]
    InvalidBytes32 { field: String, got: usize },

    #[error("Invalid address: {reason}")]
    InvalidAddress { reason: String },

    #[error("Unsupported message version: expected {expected}, got {got}")]
    UnsupportedVersion { expected: u32, got: u32 },

    // ========================================================================
    // Message Routing Errors
    // ========================================================================

    #[error("Wrong destination domain: expected {expected}, got {got}")]
    WrongDestinationDomain { expected: u32, got: u32 },

    #[error("Wrong destination caller")]
    WrongDestinationCaller,

    #[error("Wrong source domain: expected {expected}, got {got}")]
    WrongSourceDomain { expected: u32, got: u32 },

    #[error("Sender does not match original message sender")]
    SenderMismatch,

    // ========================================================================
    // Replay Errors
    // ========================================================================

    #[error("Nonce already used: source domain {source_domain}, nonce {nonce}")]
    NonceAlreadyUsed { source_domain: u32, nonce: u64 },

    // ========================================================================
    // Minting Errors
    // ========================================================================

    #[error("No token pair for remote domain {remote_domain} and token {remote_token}")]
    NoTokenPair {
        remote_domain: u32,
        remote_token: String,
    },

    #[error("Token pair already linked for remote domain {remote_domain} and token {remote_token}")]
    TokenPairAlreadyLinked {
        remote_domain: u32,
        remote_token: String,
    },

    #[error("Token is not mintable: {token}")]
    TokenNotMintable { token: String },

    #[error("No minter allowance configured for {token}")]
    NoAllowance { token: String },

    #[error("Mint amount {amount} exceeds minter allowance {allowance}")]
    OverAllowance { allowance: Uint128, amount: Uint128 },

    // ========================================================================
    // Attester Management Errors
    // ========================================================================

    #[error("Attester already enabled: {attester}")]
    AttesterAlreadyEnabled { attester: String },

    #[error("Attester not found: {attester}")]
    AttesterNotFound { attester: String },

    #[error("Cannot disable the last attester")]
    CannotDisableLastAttester,

    #[error("Cannot disable attester: {remaining} remaining attesters would be below threshold {threshold}")]
    AttesterCountBelowThreshold { remaining: u32, threshold: u32 },

    #[error("Invalid signature threshold: {reason}")]
    InvalidThreshold { reason: String },

    #[error("Signature threshold already set to {threshold}")]
    ThresholdUnchanged { threshold: u32 },
}
