//! Admin operations handlers.
//!
//! This module handles:
//! - Ownership transfer (propose/accept)
//! - Role assignment (attester manager, pauser, token controller)
//! - Pause/unpause of the two independent switches

use cosmwasm_std::{DepsMut, MessageInfo, Response, Storage};

use crate::error::ContractError;
use crate::state::{Roles, PAUSED, PENDING_OWNER, ROLES};

pub(crate) fn load_roles_as_owner(
    storage: &dyn Storage,
    info: &MessageInfo,
) -> Result<Roles, ContractError> {
    let roles = ROLES.load(storage)?;
    if info.sender != roles.owner {
        return Err(ContractError::Unauthorized);
    }
    Ok(roles)
}

// ============================================================================
// Ownership
// ============================================================================

/// Propose a new owner. Takes effect once the proposed owner accepts.
pub fn execute_update_owner(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    load_roles_as_owner(deps.storage, &info)?;

    let new_owner = deps.api.addr_validate(&new_owner)?;
    PENDING_OWNER.save(deps.storage, &new_owner)?;

    Ok(Response::new()
        .add_attribute("method", "update_owner")
        .add_attribute("pending_owner", new_owner))
}

/// Accept a pending ownership transfer.
pub fn execute_accept_owner(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let pending = PENDING_OWNER
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingOwner)?;

    if info.sender != pending {
        return Err(ContractError::UnauthorizedPendingOwner);
    }

    let mut roles = ROLES.load(deps.storage)?;
    let previous_owner = std::mem::replace(&mut roles.owner, pending);
    ROLES.save(deps.storage, &roles)?;
    PENDING_OWNER.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("method", "accept_owner")
        .add_attribute("previous_owner", previous_owner)
        .add_attribute("new_owner", roles.owner))
}

// ============================================================================
// Roles
// ============================================================================

pub fn execute_update_attester_manager(
    deps: DepsMut,
    info: MessageInfo,
    new_attester_manager: String,
) -> Result<Response, ContractError> {
    let mut roles = load_roles_as_owner(deps.storage, &info)?;

    let new_attester_manager = deps.api.addr_validate(&new_attester_manager)?;
    let previous = std::mem::replace(&mut roles.attester_manager, new_attester_manager);
    ROLES.save(deps.storage, &roles)?;

    Ok(Response::new()
        .add_attribute("method", "update_attester_manager")
        .add_attribute("previous_attester_manager", previous)
        .add_attribute("new_attester_manager", roles.attester_manager))
}

pub fn execute_update_pauser(
    deps: DepsMut,
    info: MessageInfo,
    new_pauser: String,
) -> Result<Response, ContractError> {
    let mut roles = load_roles_as_owner(deps.storage, &info)?;

    roles.pauser = deps.api.addr_validate(&new_pauser)?;
    ROLES.save(deps.storage, &roles)?;

    Ok(Response::new()
        .add_attribute("method", "update_pauser")
        .add_attribute("new_pauser", roles.pauser))
}

pub fn execute_update_token_controller(
    deps: DepsMut,
    info: MessageInfo,
    new_token_controller: String,
) -> Result<Response, ContractError> {
    let mut roles = load_roles_as_owner(deps.storage, &info)?;

    roles.token_controller = deps.api.addr_validate(&new_token_controller)?;
    ROLES.save(deps.storage, &roles)?;

    Ok(Response::new()
        .add_attribute("method", "update_token_controller")
        .add_attribute("new_token_controller", roles.token_controller))
}

// ============================================================================
// Pause/Unpause
// ============================================================================

fn ensure_pauser(storage: &dyn Storage, info: &MessageInfo) -> Result<(), ContractError> {
    let roles = ROLES.load(storage)?;
    if info.sender != roles.pauser {
        return Err(ContractError::UnauthorizedPauser);
    }
    Ok(())
}

/// Pause burns and mints (DepositForBurn and inbound mints).
pub fn execute_pause_burning_and_minting(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    set_burning_and_minting(deps, info, true)
}

pub fn execute_unpause_burning_and_minting(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    set_burning_and_minting(deps, info, false)
}

fn set_burning_and_minting(
    deps: DepsMut,
    info: MessageInfo,
    paused: bool,
) -> Result<Response, ContractError> {
    ensure_pauser(deps.storage, &info)?;

    PAUSED.update(deps.storage, |mut state| -> Result<_, ContractError> {
        state.burning_and_minting = paused;
        Ok(state)
    })?;

    let method = if paused {
        "pause_burning_and_minting"
    } else {
        "unpause_burning_and_minting"
    };
    Ok(Response::new().add_attribute("method", method))
}

/// Pause message traffic (send, receive and replace).
pub fn execute_pause_sending_and_receiving(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    set_sending_and_receiving(deps, info, true)
}

pub fn execute_unpause_sending_and_receiving(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    set_sending_and_receiving(deps, info, false)
}

fn set_sending_and_receiving(
    deps: DepsMut,
    info: MessageInfo,
    paused: bool,
) -> Result<Response, ContractError> {
    ensure_pauser(deps.storage, &info)?;

    PAUSED.update(deps.storage, |mut state| -> Result<_, ContractError> {
        state.sending_and_receiving = paused;
        Ok(state)
    })?;

    let method = if paused {
        "pause_sending_and_receiving"
    } else {
        "unpause_sending_and_receiving"
    };
    Ok(Response::new().add_attribute("method", method))
}
