//! Message types for the CCTP contract
//!
//! Byte-valued fields (recipients, callers, remote tokens, raw envelopes and
//! attestations) are carried as `Binary`. Every 32-byte field is checked for
//! length before it is used.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Token messenger on a remote domain
#[cw_serde]
pub struct RemoteTokenMessenger {
    pub domain: u32,
    /// 32-byte identity of the remote token messenger
    pub token_messenger: Binary,
}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Owner address; also the default for every other role
    pub owner: String,
    pub attester_manager: Option<String>,
    pub pauser: Option<String>,
    pub token_controller: Option<String>,
    /// Domain id of this chain
    pub local_domain: u32,
    /// Envelope version emitted and required on inbound messages
    pub message_version: u32,
    /// BurnMessage version emitted on outbound burns
    pub burn_message_version: u32,
    /// Bech32 prefix for rendering mint recipients (e.g. "terra")
    pub bech32_prefix: String,
    /// Initial attesters as 0x-prefixed 20-byte hex addresses
    pub attesters: Vec<String>,
    /// Defaults to 1 when attesters are given
    pub signature_threshold: Option<u32>,
    pub max_message_body_size: Option<u64>,
    /// CW20 token this contract burns and mints
    pub minting_token: Option<String>,
    /// Contract that handles inbound non-burn bodies
    pub router: Option<String>,
    pub remote_token_messengers: Vec<RemoteTokenMessenger>,
}

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {
    /// Entries to add or replace in the remote token messenger table
    pub remote_token_messengers: Option<Vec<RemoteTokenMessenger>>,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Message Transmitter
    // ========================================================================
    /// Emit an arbitrary message body toward a remote domain
    SendMessage {
        destination_domain: u32,
        /// 32-byte recipient on the destination domain
        recipient: Binary,
        message_body: Binary,
    },

    /// Deliver an attested envelope
    ///
    /// Authorization: Anyone, unless the envelope names a destination caller
    ReceiveMessage {
        message: Binary,
        attestation: Binary,
    },

    /// Re-emit an envelope with a new body and destination caller.
    /// The nonce is unchanged.
    ///
    /// Authorization: Original sender only
    ReplaceMessage {
        original_message: Binary,
        original_attestation: Binary,
        new_message_body: Binary,
        /// 32 bytes; all zero means any caller
        new_destination_caller: Binary,
    },

    // ========================================================================
    // Token Messenger
    // ========================================================================
    /// Burn CW20 tokens held by the sender and emit a BurnMessage.
    /// The sender must have granted this contract a CW20 allowance.
    DepositForBurn {
        amount: Uint128,
        destination_domain: u32,
        /// 32-byte recipient on the destination domain
        mint_recipient: Binary,
        burn_token: String,
        /// 32-byte caller allowed to deliver on the destination. None means any.
        destination_caller: Option<Binary>,
    },

    /// Deposit CW20 tokens for burning (called via CW20 send)
    /// Implements CW20 Receiver interface
    Receive(cw20::Cw20ReceiveMsg),

    /// Re-emit a burn with a new mint recipient and destination caller
    ///
    /// Authorization: Original depositor only
    ReplaceDepositForBurn {
        original_message: Binary,
        original_attestation: Binary,
        new_destination_caller: Binary,
        new_mint_recipient: Binary,
    },

    // ========================================================================
    // Ownership & Roles (Owner only)
    // ========================================================================
    /// Propose a new owner (two-step)
    UpdateOwner { new_owner: String },

    /// Accept a proposed ownership transfer
    ///
    /// Authorization: Pending owner only
    AcceptOwner {},

    UpdateAttesterManager { new_attester_manager: String },

    UpdatePauser { new_pauser: String },

    UpdateTokenController { new_token_controller: String },

    // ========================================================================
    // Configuration (Owner only)
    // ========================================================================
    /// None removes the limit
    UpdateMaxMessageBodySize { max_message_body_size: Option<u64> },

    UpdateMintingToken { token: String },

    /// None removes the router
    UpdateRouter { router: Option<String> },

    // ========================================================================
    // Attester Management (Attester manager only)
    // ========================================================================
    EnableAttester { attester: String },

    DisableAttester { attester: String },

    UpdateSignatureThreshold { threshold: u32 },

    // ========================================================================
    // Pause Control (Pauser only)
    // ========================================================================
    PauseBurningAndMinting {},

    UnpauseBurningAndMinting {},

    PauseSendingAndReceiving {},

    UnpauseSendingAndReceiving {},

    // ========================================================================
    // Token Controller
    // ========================================================================
    /// Map a remote token to a local CW20 token
    LinkTokenPair {
        local_token: String,
        remote_domain: u32,
        /// 32-byte remote token identity
        remote_token: Binary,
    },

    UnlinkTokenPair {
        remote_domain: u32,
        remote_token: Binary,
    },

    SetMaxBurnAmountPerMessage { local_token: String, amount: Uint128 },

    /// Set the remaining mint budget for a local token
    ConfigureMinterAllowance { local_token: String, amount: Uint128 },
}

/// CW20 receive hook message
#[cw_serde]
pub enum ReceiveMsg {
    /// Burn the received tokens and emit a BurnMessage
    DepositForBurn {
        destination_domain: u32,
        mint_recipient: Binary,
        destination_caller: Option<Binary>,
    },
}

/// Message delivered to the router for inbound bodies that are not burns
#[cw_serde]
pub enum RouterExecuteMsg {
    HandleMessage {
        message: Binary,
        attestation: Binary,
    },
}

// ============================================================================
// Query Messages
// ============================================================================

/// Query messages
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    // ========================================================================
    // Core Queries
    // ========================================================================
    /// Get contract configuration
    #[returns(ConfigResponse)]
    Config {},

    #[returns(RolesResponse)]
    Roles {},

    #[returns(PendingOwnerResponse)]
    PendingOwner {},

    #[returns(PausedResponse)]
    Paused {},

    #[returns(MaxMessageBodySizeResponse)]
    MaxMessageBodySize {},

    // ========================================================================
    // Attestation Policy
    // ========================================================================
    #[returns(AttestersResponse)]
    Attesters {},

    #[returns(SignatureThresholdResponse)]
    SignatureThreshold {},

    // ========================================================================
    // Nonces
    // ========================================================================
    #[returns(NextAvailableNonceResponse)]
    NextAvailableNonce {},

    /// Check whether an inbound (source_domain, nonce) pair has been consumed
    #[returns(UsedNonceResponse)]
    UsedNonce { source_domain: u32, nonce: u64 },

    // ========================================================================
    // Token Messenger
    // ========================================================================
    #[returns(TokenPairResponse)]
    TokenPair {
        remote_domain: u32,
        remote_token: Binary,
    },

    /// List token pairs (paginated)
    #[returns(TokenPairsResponse)]
    TokenPairs {
        start_after: Option<(u32, Binary)>,
        limit: Option<u32>,
    },

    #[returns(RemoteTokenMessengerResponse)]
    RemoteTokenMessenger { domain: u32 },

    #[returns(RemoteTokenMessengersResponse)]
    RemoteTokenMessengers {
        start_after: Option<u32>,
        limit: Option<u32>,
    },

    #[returns(BurnLimitResponse)]
    PerMessageBurnLimit { token: String },

    #[returns(MinterAllowanceResponse)]
    MinterAllowance { token: String },

    /// 32-byte identity this contract uses for a local address
    #[returns(LocalIdentityResponse)]
    LocalIdentity { address: String },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub local_domain: u32,
    pub message_version: u32,
    pub burn_message_version: u32,
    pub bech32_prefix: String,
    pub minting_token: Option<Addr>,
    pub router: Option<Addr>,
    /// 32-byte identity of this contract as sender of outbound burns
    pub local_identity: Binary,
}

#[cw_serde]
pub struct RolesResponse {
    pub owner: Addr,
    pub attester_manager: Addr,
    pub pauser: Addr,
    pub token_controller: Addr,
}

#[cw_serde]
pub struct PendingOwnerResponse {
    pub pending_owner: Option<Addr>,
}

#[cw_serde]
pub struct PausedResponse {
    pub burning_and_minting: bool,
    pub sending_and_receiving: bool,
}

#[cw_serde]
pub struct MaxMessageBodySizeResponse {
    pub max_message_body_size: Option<u64>,
}

#[cw_serde]
pub struct AttestersResponse {
    /// 0x-prefixed lower-case hex addresses in insertion order
    pub attesters: Vec<String>,
}

#[cw_serde]
pub struct SignatureThresholdResponse {
    pub threshold: u32,
}

#[cw_serde]
pub struct NextAvailableNonceResponse {
    pub nonce: u64,
}

#[cw_serde]
pub struct UsedNonceResponse {
    pub source_domain: u32,
    pub nonce: u64,
    pub used: bool,
}

#[cw_serde]
pub struct TokenPairResponse {
    pub remote_domain: u32,
    pub remote_token: Binary,
    pub local_token: Option<Addr>,
}

#[cw_serde]
pub struct TokenPairsResponse {
    pub pairs: Vec<TokenPairResponse>,
}

#[cw_serde]
pub struct RemoteTokenMessengerResponse {
    pub domain: u32,
    pub token_messenger: Option<Binary>,
}

#[cw_serde]
pub struct RemoteTokenMessengersResponse {
    pub remote_token_messengers: Vec<RemoteTokenMessenger>,
}

#[cw_serde]
pub struct BurnLimitResponse {
    pub token: Addr,
    pub limit: Option<Uint128>,
}

#[cw_serde]
pub struct MinterAllowanceResponse {
    pub token: Addr,
    pub allowance: Option<Uint128>,
}

#[cw_serde]
pub struct LocalIdentityResponse {
    pub address: String,
    pub identity: Binary,
}
