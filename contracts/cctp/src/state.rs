//! State definitions for the CCTP contract
//!
//! The contract state doubles as the policy store, the token-pair and
//! allowance store, and the replay registry.

use cctp_common::AttesterAddress;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdError, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Domain id of this chain in the cross-chain protocol
    pub local_domain: u32,
    /// Envelope version emitted and accepted by this contract
    pub message_version: u32,
    /// BurnMessage version emitted by this contract
    pub burn_message_version: u32,
    /// Bech32 prefix used to render 32-byte identities as local addresses
    pub bech32_prefix: String,
    /// The CW20 token this contract can burn and mint
    pub minting_token: Option<Addr>,
    /// Contract that handles inbound bodies that are not burn messages
    pub router: Option<Addr>,
    /// Maximum outbound message body size in bytes
    pub max_message_body_size: Option<u64>,
}

/// Role holders
#[cw_serde]
pub struct Roles {
    pub owner: Addr,
    pub attester_manager: Addr,
    pub pauser: Addr,
    pub token_controller: Addr,
}

/// Independent pause switches
#[cw_serde]
#[derive(Default)]
pub struct PausedState {
    /// Blocks DepositForBurn and inbound mints
    pub burning_and_minting: bool,
    /// Blocks SendMessage, ReceiveMessage and the replace flows
    pub sending_and_receiving: bool,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:cctp";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core State Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");

pub const ROLES: Item<Roles> = Item::new("roles");

/// Proposed owner awaiting `AcceptOwner`
pub const PENDING_OWNER: Item<Addr> = Item::new("pending_owner");

pub const PAUSED: Item<PausedState> = Item::new("paused");

// ============================================================================
// Attestation Policy
// ============================================================================

/// Enabled attesters in insertion order
pub const ATTESTERS: Item<Vec<AttesterAddress>> = Item::new("attesters");

/// Number of signatures required on an attestation
pub const SIGNATURE_THRESHOLD: Item<u32> = Item::new("signature_threshold");

// ============================================================================
// Nonces
// ============================================================================

/// Next nonce assigned to an outbound burn
pub const NEXT_AVAILABLE_NONCE: Item<u64> = Item::new("next_available_nonce");

/// Consumed inbound nonces
/// Key: keccak256(source_domain || nonce) as &[u8], Value: bool (true if used)
pub const USED_NONCES: Map<&[u8], bool> = Map::new("used_nonces");

// ============================================================================
// Token Messenger State
// ============================================================================

/// Token messenger on each remote domain. Set at instantiate or migrate only.
/// Key: remote domain, Value: 32-byte token messenger identity
pub const REMOTE_TOKEN_MESSENGERS: Map<u32, [u8; 32]> = Map::new("remote_token_messengers");

/// Remote token to local token mapping
/// Key: (remote_domain, remote_token as &[u8]), Value: local CW20 token
pub const TOKEN_PAIRS: Map<(u32, &[u8]), Addr> = Map::new("token_pairs");

/// Per-message burn limit per local token
pub const PER_MESSAGE_BURN_LIMITS: Map<&Addr, Uint128> = Map::new("per_message_burn_limits");

/// Remaining mint budget per local token
pub const MINTER_ALLOWANCES: Map<&Addr, Uint128> = Map::new("minter_allowances");

// ============================================================================
// Accessors
// ============================================================================

/// Reserve the next outbound nonce. The counter only moves forward.
pub fn reserve_nonce(storage: &mut dyn Storage) -> StdResult<u64> {
    let nonce = NEXT_AVAILABLE_NONCE.load(storage)?;
    let next = nonce
        .checked_add(1)
        .ok_or_else(|| StdError::generic_err("nonce overflow"))?;
    NEXT_AVAILABLE_NONCE.save(storage, &next)?;
    Ok(nonce)
}

pub fn is_nonce_used(storage: &dyn Storage, source_domain: u32, nonce: u64) -> StdResult<bool> {
    let key = cctp_common::used_nonce_key(source_domain, nonce);
    Ok(USED_NONCES
        .may_load(storage, &key)?
        .unwrap_or(false))
}

pub fn mark_nonce_used(storage: &mut dyn Storage, source_domain: u32, nonce: u64) -> StdResult<()> {
    let key = cctp_common::used_nonce_key(source_domain, nonce);
    USED_NONCES.save(storage, &key, &true)
}
