//! Configuration management handlers.
//!
//! This module handles:
//! - Token pairs (link/unlink)
//! - Per-message burn limits and minter allowances
//! - Max message body size, minting token and router

use cosmwasm_std::{Binary, DepsMut, MessageInfo, Response, Storage, Uint128};

use cctp_common::bytes32_to_hex;

use super::admin::load_roles_as_owner;
use super::parse_bytes32;
use crate::error::ContractError;
use crate::state::{CONFIG, MINTER_ALLOWANCES, PER_MESSAGE_BURN_LIMITS, ROLES, TOKEN_PAIRS};

fn ensure_token_controller(storage: &dyn Storage, info: &MessageInfo) -> Result<(), ContractError> {
    let roles = ROLES.load(storage)?;
    if info.sender != roles.token_controller {
        return Err(ContractError::UnauthorizedTokenController);
    }
    Ok(())
}

// ============================================================================
// Token Pairs
// ============================================================================

/// Map (remote_domain, remote_token) to a local CW20 token.
pub fn execute_link_token_pair(
    deps: DepsMut,
    info: MessageInfo,
    local_token: String,
    remote_domain: u32,
    remote_token: Binary,
) -> Result<Response, ContractError> {
    ensure_token_controller(deps.storage, &info)?;

    let local_token = deps.api.addr_validate(&local_token)?;
    let remote_token = parse_bytes32("remote_token", &remote_token)?;

    if TOKEN_PAIRS.has(deps.storage, (remote_domain, remote_token.as_slice())) {
        return Err(ContractError::TokenPairAlreadyLinked {
            remote_domain,
            remote_token: bytes32_to_hex(&remote_token),
        });
    }

    TOKEN_PAIRS.save(
        deps.storage,
        (remote_domain, remote_token.as_slice()),
        &local_token,
    )?;

    Ok(Response::new()
        .add_attribute("method", "link_token_pair")
        .add_attribute("local_token", local_token)
        .add_attribute("remote_domain", remote_domain.to_string())
        .add_attribute("remote_token", bytes32_to_hex(&remote_token)))
}

pub fn execute_unlink_token_pair(
    deps: DepsMut,
    info: MessageInfo,
    remote_domain: u32,
    remote_token: Binary,
) -> Result<Response, ContractError> {
    ensure_token_controller(deps.storage, &info)?;

    let remote_token = parse_bytes32("remote_token", &remote_token)?;
    let key = (remote_domain, remote_token.as_slice());

    let local_token = TOKEN_PAIRS.may_load(deps.storage, key)?.ok_or_else(|| {
        ContractError::NoTokenPair {
            remote_domain,
            remote_token: bytes32_to_hex(&remote_token),
        }
    })?;
    TOKEN_PAIRS.remove(deps.storage, key);

    Ok(Response::new()
        .add_attribute("method", "unlink_token_pair")
        .add_attribute("local_token", local_token)
        .add_attribute("remote_domain", remote_domain.to_string())
        .add_attribute("remote_token", bytes32_to_hex(&remote_token)))
}

// ============================================================================
// Limits & Allowances
// ============================================================================

/// Set the largest amount a single DepositForBurn may burn of `local_token`.
pub fn execute_set_max_burn_amount_per_message(
    deps: DepsMut,
    info: MessageInfo,
    local_token: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    ensure_token_controller(deps.storage, &info)?;

    let local_token = deps.api.addr_validate(&local_token)?;
    PER_MESSAGE_BURN_LIMITS.save(deps.storage, &local_token, &amount)?;

    Ok(Response::new()
        .add_attribute("method", "set_max_burn_amount_per_message")
        .add_attribute("local_token", local_token)
        .add_attribute("amount", amount.to_string()))
}

/// Set the remaining mint budget for `local_token`. Zero keeps the token
/// registered but exhausted.
pub fn execute_configure_minter_allowance(
    deps: DepsMut,
    info: MessageInfo,
    local_token: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    ensure_token_controller(deps.storage, &info)?;

    let local_token = deps.api.addr_validate(&local_token)?;
    MINTER_ALLOWANCES.save(deps.storage, &local_token, &amount)?;

    Ok(Response::new()
        .add_attribute("method", "configure_minter_allowance")
        .add_attribute("local_token", local_token)
        .add_attribute("allowance", amount.to_string()))
}

// ============================================================================
// Contract Settings (Owner only)
// ============================================================================

pub fn execute_update_max_message_body_size(
    deps: DepsMut,
    info: MessageInfo,
    max_message_body_size: Option<u64>,
) -> Result<Response, ContractError> {
    load_roles_as_owner(deps.storage, &info)?;

    let mut config = CONFIG.load(deps.storage)?;
    config.max_message_body_size = max_message_body_size;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "update_max_message_body_size")
        .add_attribute(
            "max_message_body_size",
            max_message_body_size
                .map(|size| size.to_string())
                .unwrap_or_else(|| "none".to_string()),
        ))
}

pub fn execute_update_minting_token(
    deps: DepsMut,
    info: MessageInfo,
    token: String,
) -> Result<Response, ContractError> {
    load_roles_as_owner(deps.storage, &info)?;

    let token = deps.api.addr_validate(&token)?;
    let mut config = CONFIG.load(deps.storage)?;
    config.minting_token = Some(token.clone());
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "update_minting_token")
        .add_attribute("minting_token", token))
}

pub fn execute_update_router(
    deps: DepsMut,
    info: MessageInfo,
    router: Option<String>,
) -> Result<Response, ContractError> {
    load_roles_as_owner(deps.storage, &info)?;

    let router = router
        .map(|router| deps.api.addr_validate(&router))
        .transpose()?;

    let mut config = CONFIG.load(deps.storage)?;
    config.router = router.clone();
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "update_router")
        .add_attribute(
            "router",
            router
                .map(|router| router.to_string())
                .unwrap_or_else(|| "none".to_string()),
        ))
}
