//! CCTP Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
    Storage,
};
use cw2::set_contract_version;

use cctp_common::attestation::{format_attester, parse_attester};
use cctp_common::bytes32_to_hex;

use crate::error::ContractError;
use crate::execute::{
    execute_accept_owner, execute_configure_minter_allowance, execute_deposit_for_burn,
    execute_disable_attester, execute_enable_attester, execute_link_token_pair,
    execute_pause_burning_and_minting, execute_pause_sending_and_receiving, execute_receive,
    execute_receive_message, execute_replace_deposit_for_burn, execute_replace_message,
    execute_send_message, execute_set_max_burn_amount_per_message, execute_unlink_token_pair,
    execute_unpause_burning_and_minting, execute_unpause_sending_and_receiving,
    execute_update_attester_manager, execute_update_max_message_body_size,
    execute_update_minting_token, execute_update_owner, execute_update_pauser,
    execute_update_router, execute_update_signature_threshold, execute_update_token_controller,
    is_zero, parse_bytes32,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, RemoteTokenMessenger};
use crate::query::{
    query_attesters, query_config, query_local_identity, query_max_message_body_size,
    query_minter_allowance, query_next_available_nonce, query_paused, query_pending_owner,
    query_per_message_burn_limit, query_remote_token_messenger, query_remote_token_messengers,
    query_roles, query_signature_threshold, query_token_pair, query_token_pairs,
    query_used_nonce,
};
use crate::state::{
    Config, PausedState, Roles, ATTESTERS, CONFIG, CONTRACT_NAME, CONTRACT_VERSION,
    NEXT_AVAILABLE_NONCE, PAUSED, REMOTE_TOKEN_MESSENGERS, ROLES, SIGNATURE_THRESHOLD,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    // Roles default to the owner
    let owner = deps.api.addr_validate(&msg.owner)?;
    let validate_role = |role: Option<String>| -> StdResult<_> {
        match role {
            Some(addr) => deps.api.addr_validate(&addr),
            None => Ok(owner.clone()),
        }
    };
    let roles = Roles {
        attester_manager: validate_role(msg.attester_manager)?,
        pauser: validate_role(msg.pauser)?,
        token_controller: validate_role(msg.token_controller)?,
        owner: owner.clone(),
    };

    if msg.bech32_prefix.is_empty() {
        return Err(ContractError::InvalidAddress {
            reason: "bech32 prefix must not be empty".to_string(),
        });
    }

    let config = Config {
        local_domain: msg.local_domain,
        message_version: msg.message_version,
        burn_message_version: msg.burn_message_version,
        bech32_prefix: msg.bech32_prefix,
        minting_token: msg
            .minting_token
            .map(|token| deps.api.addr_validate(&token))
            .transpose()?,
        router: msg
            .router
            .map(|router| deps.api.addr_validate(&router))
            .transpose()?,
        max_message_body_size: msg.max_message_body_size,
    };

    // Attesters
    let mut attesters = Vec::with_capacity(msg.attesters.len());
    for attester in &msg.attesters {
        let address =
            parse_attester(attester).map_err(|reason| ContractError::InvalidAddress { reason })?;
        if attesters.contains(&address) {
            return Err(ContractError::AttesterAlreadyEnabled {
                attester: format_attester(&address),
            });
        }
        attesters.push(address);
    }

    let threshold = match msg.signature_threshold {
        Some(threshold) => Some(threshold),
        None if !attesters.is_empty() => Some(1),
        None => None,
    };
    if let Some(threshold) = threshold {
        if threshold == 0 || threshold as usize > attesters.len() {
            return Err(ContractError::InvalidThreshold {
                reason: format!(
                    "threshold {} must be between 1 and attester count {}",
                    threshold,
                    attesters.len()
                ),
            });
        }
        SIGNATURE_THRESHOLD.save(deps.storage, &threshold)?;
    }

    ROLES.save(deps.storage, &roles)?;
    CONFIG.save(deps.storage, &config)?;
    ATTESTERS.save(deps.storage, &attesters)?;
    PAUSED.save(deps.storage, &PausedState::default())?;
    NEXT_AVAILABLE_NONCE.save(deps.storage, &0u64)?;

    save_remote_token_messengers(deps.storage, &msg.remote_token_messengers)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", owner)
        .add_attribute("local_domain", config.local_domain.to_string())
        .add_attribute("attester_count", attesters.len().to_string())
        .add_attribute(
            "signature_threshold",
            threshold.unwrap_or(0).to_string(),
        ))
}

fn save_remote_token_messengers(
    storage: &mut dyn Storage,
    entries: &[RemoteTokenMessenger],
) -> Result<(), ContractError> {
    for entry in entries {
        let messenger = parse_bytes32("token_messenger", &entry.token_messenger)?;
        if is_zero(&messenger) {
            return Err(ContractError::InvalidAddress {
                reason: format!(
                    "token messenger for domain {} must be nonzero",
                    entry.domain
                ),
            });
        }
        REMOTE_TOKEN_MESSENGERS.save(storage, entry.domain, &messenger)?;
    }
    Ok(())
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Message transmitter
        ExecuteMsg::SendMessage {
            destination_domain,
            recipient,
            message_body,
        } => execute_send_message(deps, info, destination_domain, recipient, message_body),
        ExecuteMsg::ReceiveMessage {
            message,
            attestation,
        } => execute_receive_message(deps, info, message, attestation),
        ExecuteMsg::ReplaceMessage {
            original_message,
            original_attestation,
            new_message_body,
            new_destination_caller,
        } => execute_replace_message(
            deps,
            info,
            original_message,
            original_attestation,
            new_message_body,
            new_destination_caller,
        ),

        // Token messenger
        ExecuteMsg::DepositForBurn {
            amount,
            destination_domain,
            mint_recipient,
            burn_token,
            destination_caller,
        } => execute_deposit_for_burn(
            deps,
            env,
            info,
            amount,
            destination_domain,
            mint_recipient,
            burn_token,
            destination_caller,
        ),
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, env, info, cw20_msg),
        ExecuteMsg::ReplaceDepositForBurn {
            original_message,
            original_attestation,
            new_destination_caller,
            new_mint_recipient,
        } => execute_replace_deposit_for_burn(
            deps,
            env,
            info,
            original_message,
            original_attestation,
            new_destination_caller,
            new_mint_recipient,
        ),

        // Ownership & roles
        ExecuteMsg::UpdateOwner { new_owner } => execute_update_owner(deps, info, new_owner),
        ExecuteMsg::AcceptOwner {} => execute_accept_owner(deps, info),
        ExecuteMsg::UpdateAttesterManager {
            new_attester_manager,
        } => execute_update_attester_manager(deps, info, new_attester_manager),
        ExecuteMsg::UpdatePauser { new_pauser } => execute_update_pauser(deps, info, new_pauser),
        ExecuteMsg::UpdateTokenController {
            new_token_controller,
        } => execute_update_token_controller(deps, info, new_token_controller),

        // Configuration
        ExecuteMsg::UpdateMaxMessageBodySize {
            max_message_body_size,
        } => execute_update_max_message_body_size(deps, info, max_message_body_size),
        ExecuteMsg::UpdateMintingToken { token } => execute_update_minting_token(deps, info, token),
        ExecuteMsg::UpdateRouter { router } => execute_update_router(deps, info, router),

        // Attesters
        ExecuteMsg::EnableAttester { attester } => execute_enable_attester(deps, info, attester),
        ExecuteMsg::DisableAttester { attester } => execute_disable_attester(deps, info, attester),
        ExecuteMsg::UpdateSignatureThreshold { threshold } => {
            execute_update_signature_threshold(deps, info, threshold)
        }

        // Pause control
        ExecuteMsg::PauseBurningAndMinting {} => execute_pause_burning_and_minting(deps, info),
        ExecuteMsg::UnpauseBurningAndMinting {} => execute_unpause_burning_and_minting(deps, info),
        ExecuteMsg::PauseSendingAndReceiving {} => {
            execute_pause_sending_and_receiving(deps, info)
        }
        ExecuteMsg::UnpauseSendingAndReceiving {} => {
            execute_unpause_sending_and_receiving(deps, info)
        }

        // Token controller
        ExecuteMsg::LinkTokenPair {
            local_token,
            remote_domain,
            remote_token,
        } => execute_link_token_pair(deps, info, local_token, remote_domain, remote_token),
        ExecuteMsg::UnlinkTokenPair {
            remote_domain,
            remote_token,
        } => execute_unlink_token_pair(deps, info, remote_domain, remote_token),
        ExecuteMsg::SetMaxBurnAmountPerMessage {
            local_token,
            amount,
        } => execute_set_max_burn_amount_per_message(deps, info, local_token, amount),
        ExecuteMsg::ConfigureMinterAllowance {
            local_token,
            amount,
        } => execute_configure_minter_allowance(deps, info, local_token, amount),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps, env)?),
        QueryMsg::Roles {} => to_json_binary(&query_roles(deps)?),
        QueryMsg::PendingOwner {} => to_json_binary(&query_pending_owner(deps)?),
        QueryMsg::Paused {} => to_json_binary(&query_paused(deps)?),
        QueryMsg::MaxMessageBodySize {} => to_json_binary(&query_max_message_body_size(deps)?),
        QueryMsg::Attesters {} => to_json_binary(&query_attesters(deps)?),
        QueryMsg::SignatureThreshold {} => to_json_binary(&query_signature_threshold(deps)?),
        QueryMsg::NextAvailableNonce {} => to_json_binary(&query_next_available_nonce(deps)?),
        QueryMsg::UsedNonce {
            source_domain,
            nonce,
        } => to_json_binary(&query_used_nonce(deps, source_domain, nonce)?),
        QueryMsg::TokenPair {
            remote_domain,
            remote_token,
        } => to_json_binary(&query_token_pair(deps, remote_domain, remote_token)?),
        QueryMsg::TokenPairs { start_after, limit } => {
            to_json_binary(&query_token_pairs(deps, start_after, limit)?)
        }
        QueryMsg::RemoteTokenMessenger { domain } => {
            to_json_binary(&query_remote_token_messenger(deps, domain)?)
        }
        QueryMsg::RemoteTokenMessengers { start_after, limit } => {
            to_json_binary(&query_remote_token_messengers(deps, start_after, limit)?)
        }
        QueryMsg::PerMessageBurnLimit { token } => {
            to_json_binary(&query_per_message_burn_limit(deps, token)?)
        }
        QueryMsg::MinterAllowance { token } => {
            to_json_binary(&query_minter_allowance(deps, token)?)
        }
        QueryMsg::LocalIdentity { address } => {
            to_json_binary(&query_local_identity(deps, address)?)
        }
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let mut response = Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION);

    if let Some(entries) = msg.remote_token_messengers {
        save_remote_token_messengers(deps.storage, &entries)?;
        for entry in &entries {
            response = response.add_attribute(
                format!("remote_token_messenger_{}", entry.domain),
                bytes32_to_hex(&parse_bytes32("token_messenger", &entry.token_messenger)?),
            );
        }
    }

    Ok(response)
}
