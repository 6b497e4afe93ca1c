//! Attester management handlers.
//!
//! The attester set never drops below the signature threshold and the last
//! attester can never be removed.

use cosmwasm_std::{DepsMut, MessageInfo, Response, Storage};

use cctp_common::attestation::{format_attester, parse_attester};

use crate::error::ContractError;
use crate::state::{ATTESTERS, ROLES, SIGNATURE_THRESHOLD};

fn ensure_attester_manager(
    storage: &dyn Storage,
    info: &MessageInfo,
) -> Result<(), ContractError> {
    let roles = ROLES.load(storage)?;
    if info.sender != roles.attester_manager {
        return Err(ContractError::UnauthorizedAttesterManager);
    }
    Ok(())
}

/// Add an attester (20-byte hex address).
pub fn execute_enable_attester(
    deps: DepsMut,
    info: MessageInfo,
    attester: String,
) -> Result<Response, ContractError> {
    ensure_attester_manager(deps.storage, &info)?;

    let address = parse_attester(&attester)
        .map_err(|reason| ContractError::InvalidAddress { reason })?;

    let mut attesters = ATTESTERS.load(deps.storage)?;
    if attesters.contains(&address) {
        return Err(ContractError::AttesterAlreadyEnabled {
            attester: format_attester(&address),
        });
    }
    attesters.push(address);
    ATTESTERS.save(deps.storage, &attesters)?;

    Ok(Response::new()
        .add_attribute("method", "enable_attester")
        .add_attribute("attester", format_attester(&address))
        .add_attribute("attester_count", attesters.len().to_string()))
}

/// Remove an attester.
pub fn execute_disable_attester(
    deps: DepsMut,
    info: MessageInfo,
    attester: String,
) -> Result<Response, ContractError> {
    ensure_attester_manager(deps.storage, &info)?;

    let address = parse_attester(&attester)
        .map_err(|reason| ContractError::InvalidAddress { reason })?;

    let mut attesters = ATTESTERS.load(deps.storage)?;
    let position = attesters
        .iter()
        .position(|a| *a == address)
        .ok_or_else(|| ContractError::AttesterNotFound {
            attester: format_attester(&address),
        })?;

    if attesters.len() == 1 {
        return Err(ContractError::CannotDisableLastAttester);
    }

    let threshold = SIGNATURE_THRESHOLD.may_load(deps.storage)?.unwrap_or(0);
    let remaining = (attesters.len() - 1) as u32;
    if remaining < threshold {
        return Err(ContractError::AttesterCountBelowThreshold {
            remaining,
            threshold,
        });
    }

    // Preserve insertion order of the remaining attesters
    attesters.remove(position);
    ATTESTERS.save(deps.storage, &attesters)?;

    Ok(Response::new()
        .add_attribute("method", "disable_attester")
        .add_attribute("attester", format_attester(&address))
        .add_attribute("attester_count", attesters.len().to_string()))
}

/// Set the number of signatures required on an attestation.
pub fn execute_update_signature_threshold(
    deps: DepsMut,
    info: MessageInfo,
    threshold: u32,
) -> Result<Response, ContractError> {
    ensure_attester_manager(deps.storage, &info)?;

    if threshold == 0 {
        return Err(ContractError::InvalidThreshold {
            reason: "threshold must be greater than zero".to_string(),
        });
    }

    let attester_count = ATTESTERS.load(deps.storage)?.len() as u32;
    if threshold > attester_count {
        return Err(ContractError::InvalidThreshold {
            reason: format!(
                "threshold {} exceeds attester count {}",
                threshold, attester_count
            ),
        });
    }

    let previous = SIGNATURE_THRESHOLD.may_load(deps.storage)?.unwrap_or(0);
    if previous == threshold {
        return Err(ContractError::ThresholdUnchanged { threshold });
    }

    SIGNATURE_THRESHOLD.save(deps.storage, &threshold)?;

    Ok(Response::new()
        .add_attribute("method", "update_signature_threshold")
        .add_attribute("old_threshold", previous.to_string())
        .add_attribute("new_threshold", threshold.to_string()))
}
