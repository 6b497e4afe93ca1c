//! Query handlers for the CCTP contract.
//!
//! This module contains all query message handlers for retrieving contract state.

use cosmwasm_std::{Binary, Deps, Env, Order, StdError, StdResult};
use cw_storage_plus::Bound;

use cctp_common::attestation::format_attester;

use crate::address_codec::local_identity;
use crate::msg::{
    AttestersResponse, BurnLimitResponse, ConfigResponse, LocalIdentityResponse,
    MaxMessageBodySizeResponse, MinterAllowanceResponse, NextAvailableNonceResponse,
    PausedResponse, PendingOwnerResponse, RemoteTokenMessenger, RemoteTokenMessengerResponse,
    RemoteTokenMessengersResponse, RolesResponse, SignatureThresholdResponse, TokenPairResponse,
    TokenPairsResponse, UsedNonceResponse,
};
use crate::state::{
    is_nonce_used, ATTESTERS, CONFIG, MINTER_ALLOWANCES, NEXT_AVAILABLE_NONCE, PAUSED,
    PENDING_OWNER, PER_MESSAGE_BURN_LIMITS, REMOTE_TOKEN_MESSENGERS, ROLES, SIGNATURE_THRESHOLD,
    TOKEN_PAIRS,
};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 50;

fn to_bytes32(field: &str, value: &Binary) -> StdResult<[u8; 32]> {
    value.as_slice().try_into().map_err(|_| {
        StdError::generic_err(format!(
            "Invalid {}: expected 32 bytes, got {}",
            field,
            value.len()
        ))
    })
}

// ============================================================================
// Core Queries
// ============================================================================

/// Query contract configuration.
pub fn query_config(deps: Deps, env: Env) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        local_domain: config.local_domain,
        message_version: config.message_version,
        burn_message_version: config.burn_message_version,
        bech32_prefix: config.bech32_prefix,
        minting_token: config.minting_token,
        router: config.router,
        local_identity: Binary::from(local_identity(&env.contract.address).to_vec()),
    })
}

pub fn query_roles(deps: Deps) -> StdResult<RolesResponse> {
    let roles = ROLES.load(deps.storage)?;
    Ok(RolesResponse {
        owner: roles.owner,
        attester_manager: roles.attester_manager,
        pauser: roles.pauser,
        token_controller: roles.token_controller,
    })
}

pub fn query_pending_owner(deps: Deps) -> StdResult<PendingOwnerResponse> {
    Ok(PendingOwnerResponse {
        pending_owner: PENDING_OWNER.may_load(deps.storage)?,
    })
}

pub fn query_paused(deps: Deps) -> StdResult<PausedResponse> {
    let paused = PAUSED.load(deps.storage)?;
    Ok(PausedResponse {
        burning_and_minting: paused.burning_and_minting,
        sending_and_receiving: paused.sending_and_receiving,
    })
}

pub fn query_max_message_body_size(deps: Deps) -> StdResult<MaxMessageBodySizeResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(MaxMessageBodySizeResponse {
        max_message_body_size: config.max_message_body_size,
    })
}

// ============================================================================
// Attestation Policy Queries
// ============================================================================

pub fn query_attesters(deps: Deps) -> StdResult<AttestersResponse> {
    let attesters = ATTESTERS.may_load(deps.storage)?.unwrap_or_default();
    Ok(AttestersResponse {
        attesters: attesters.iter().map(format_attester).collect(),
    })
}

pub fn query_signature_threshold(deps: Deps) -> StdResult<SignatureThresholdResponse> {
    Ok(SignatureThresholdResponse {
        threshold: SIGNATURE_THRESHOLD.may_load(deps.storage)?.unwrap_or(0),
    })
}

// ============================================================================
// Nonce Queries
// ============================================================================

pub fn query_next_available_nonce(deps: Deps) -> StdResult<NextAvailableNonceResponse> {
    Ok(NextAvailableNonceResponse {
        nonce: NEXT_AVAILABLE_NONCE.load(deps.storage)?,
    })
}

/// Check if an inbound (source_domain, nonce) pair has been consumed.
pub fn query_used_nonce(
    deps: Deps,
    source_domain: u32,
    nonce: u64,
) -> StdResult<UsedNonceResponse> {
    Ok(UsedNonceResponse {
        source_domain,
        nonce,
        used: is_nonce_used(deps.storage, source_domain, nonce)?,
    })
}

// ============================================================================
// Token Messenger Queries
// ============================================================================

pub fn query_token_pair(
    deps: Deps,
    remote_domain: u32,
    remote_token: Binary,
) -> StdResult<TokenPairResponse> {
    let key = to_bytes32("remote_token", &remote_token)?;
    let local_token = TOKEN_PAIRS.may_load(deps.storage, (remote_domain, key.as_slice()))?;
    Ok(TokenPairResponse {
        remote_domain,
        remote_token,
        local_token,
    })
}

/// List token pairs ordered by (remote_domain, remote_token).
pub fn query_token_pairs(
    deps: Deps,
    start_after: Option<(u32, Binary)>,
    limit: Option<u32>,
) -> StdResult<TokenPairsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start: Option<Bound<(u32, &[u8])>> = start_after
        .as_ref()
        .map(|(domain, token)| Bound::exclusive((*domain, token.as_slice())));

    let pairs = TOKEN_PAIRS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let ((remote_domain, remote_token), local_token) = item?;
            Ok(TokenPairResponse {
                remote_domain,
                remote_token: Binary::from(remote_token),
                local_token: Some(local_token),
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(TokenPairsResponse { pairs })
}

pub fn query_remote_token_messenger(
    deps: Deps,
    domain: u32,
) -> StdResult<RemoteTokenMessengerResponse> {
    let token_messenger = REMOTE_TOKEN_MESSENGERS
        .may_load(deps.storage, domain)?
        .map(|messenger| Binary::from(messenger.to_vec()));
    Ok(RemoteTokenMessengerResponse {
        domain,
        token_messenger,
    })
}

pub fn query_remote_token_messengers(
    deps: Deps,
    start_after: Option<u32>,
    limit: Option<u32>,
) -> StdResult<RemoteTokenMessengersResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let remote_token_messengers = REMOTE_TOKEN_MESSENGERS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (domain, messenger) = item?;
            Ok(RemoteTokenMessenger {
                domain,
                token_messenger: Binary::from(messenger.to_vec()),
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(RemoteTokenMessengersResponse {
        remote_token_messengers,
    })
}

pub fn query_per_message_burn_limit(deps: Deps, token: String) -> StdResult<BurnLimitResponse> {
    let token = deps.api.addr_validate(&token)?;
    let limit = PER_MESSAGE_BURN_LIMITS.may_load(deps.storage, &token)?;
    Ok(BurnLimitResponse { token, limit })
}

pub fn query_minter_allowance(deps: Deps, token: String) -> StdResult<MinterAllowanceResponse> {
    let token = deps.api.addr_validate(&token)?;
    let allowance = MINTER_ALLOWANCES.may_load(deps.storage, &token)?;
    Ok(MinterAllowanceResponse { token, allowance })
}

/// 32-byte identity this contract uses for `address`.
pub fn query_local_identity(deps: Deps, address: String) -> StdResult<LocalIdentityResponse> {
    let addr = deps.api.addr_validate(&address)?;
    Ok(LocalIdentityResponse {
        address,
        identity: Binary::from(local_identity(&addr).to_vec()),
    })
}
