//! Message transmitter handlers.
//!
//! This module handles:
//! - SendMessage (raw body emission)
//! - ReceiveMessage (attestation check, replay protection, dispatch)
//! - ReplaceMessage (re-emission of an attested envelope)
//!
//! Every check runs before the first storage write.

use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Event, MessageInfo, Response, Storage, WasmMsg,
};

use cctp_common::hash::bytes_to_hex;
use cctp_common::{bytes32_to_hex, verify_attestation_signatures, BurnMessage, Message};

use super::token_messenger::mint_from_burn_message;
use super::{is_zero, parse_bytes32};
use crate::address_codec::local_identity;
use crate::error::ContractError;
use crate::msg::RouterExecuteMsg;
use crate::state::{
    is_nonce_used, mark_nonce_used, Config, ATTESTERS, CONFIG, PAUSED, SIGNATURE_THRESHOLD,
};

// ============================================================================
// Shared Checks
// ============================================================================

pub(crate) fn ensure_sending_and_receiving(storage: &dyn Storage) -> Result<(), ContractError> {
    if PAUSED.load(storage)?.sending_and_receiving {
        return Err(ContractError::SendingAndReceivingPaused);
    }
    Ok(())
}

pub(crate) fn ensure_body_size(config: &Config, len: usize) -> Result<(), ContractError> {
    if let Some(max) = config.max_message_body_size {
        if len as u64 > max {
            return Err(ContractError::MessageBodyTooLarge {
                size: len as u64,
                max,
            });
        }
    }
    Ok(())
}

/// Verify `attestation` over `message` against the current attester set.
pub(crate) fn verify_attestation(
    deps: Deps,
    message: &[u8],
    attestation: &[u8],
) -> Result<(), ContractError> {
    let attesters = ATTESTERS.may_load(deps.storage)?.unwrap_or_default();
    if attesters.is_empty() {
        return Err(ContractError::NoAttesters);
    }

    let threshold = SIGNATURE_THRESHOLD
        .may_load(deps.storage)?
        .filter(|t| *t > 0)
        .ok_or(ContractError::NoThreshold)?;

    verify_attestation_signatures(deps.api, message, attestation, &attesters, threshold)?;
    Ok(())
}

/// Load an attested envelope that originated on this domain.
pub(crate) fn load_attested_original(
    deps: Deps,
    config: &Config,
    original_message: &[u8],
    original_attestation: &[u8],
) -> Result<Message, ContractError> {
    verify_attestation(deps, original_message, original_attestation)?;

    let original = Message::decode(original_message)?;
    if original.source_domain != config.local_domain {
        return Err(ContractError::WrongSourceDomain {
            expected: config.local_domain,
            got: original.source_domain,
        });
    }
    Ok(original)
}

/// Encode a replacement envelope. Version, domains, nonce, sender and
/// recipient are carried over from `original`.
pub(crate) fn build_replacement(
    config: &Config,
    original: &Message,
    new_message_body: Vec<u8>,
    new_destination_caller: [u8; 32],
) -> Result<Vec<u8>, ContractError> {
    ensure_body_size(config, new_message_body.len())?;

    let replacement = Message {
        message_body: new_message_body,
        destination_caller: new_destination_caller,
        ..original.clone()
    };
    Ok(replacement.encode())
}

pub(crate) fn message_sent_event(message: &[u8]) -> Event {
    Event::new("message_sent").add_attribute("message", bytes_to_hex(message))
}

// ============================================================================
// SendMessage
// ============================================================================

/// Emit an arbitrary body toward `destination_domain`.
///
/// No envelope is built and no nonce is assigned.
pub fn execute_send_message(
    deps: DepsMut,
    info: MessageInfo,
    destination_domain: u32,
    recipient: Binary,
    message_body: Binary,
) -> Result<Response, ContractError> {
    ensure_sending_and_receiving(deps.storage)?;

    let config = CONFIG.load(deps.storage)?;
    ensure_body_size(&config, message_body.len())?;

    let recipient = parse_bytes32("recipient", &recipient)?;
    if is_zero(&recipient) {
        return Err(ContractError::ZeroRecipient);
    }

    let sender = local_identity(&info.sender);
    let event = message_sent_event(message_body.as_slice())
        .add_attribute("destination_domain", destination_domain.to_string())
        .add_attribute("recipient", bytes32_to_hex(&recipient))
        .add_attribute("sender", bytes32_to_hex(&sender));

    Ok(Response::new()
        .add_event(event)
        .add_attribute("method", "send_message")
        .add_attribute("destination_domain", destination_domain.to_string()))
}

// ============================================================================
// ReceiveMessage
// ============================================================================

/// Deliver an attested envelope.
///
/// A 132-byte body is treated as a BurnMessage and minted; any other body is
/// forwarded to the router.
pub fn execute_receive_message(
    deps: DepsMut,
    info: MessageInfo,
    message: Binary,
    attestation: Binary,
) -> Result<Response, ContractError> {
    ensure_sending_and_receiving(deps.storage)?;
    verify_attestation(deps.as_ref(), &message, &attestation)?;

    let envelope = Message::decode(&message)?;
    let config = CONFIG.load(deps.storage)?;

    if envelope.destination_domain != config.local_domain {
        return Err(ContractError::WrongDestinationDomain {
            expected: config.local_domain,
            got: envelope.destination_domain,
        });
    }

    let caller = local_identity(&info.sender);
    if !envelope.has_open_destination_caller() && envelope.destination_caller != caller {
        return Err(ContractError::WrongDestinationCaller);
    }

    if envelope.version != config.message_version {
        return Err(ContractError::UnsupportedVersion {
            expected: config.message_version,
            got: envelope.version,
        });
    }

    if is_nonce_used(deps.storage, envelope.source_domain, envelope.nonce)? {
        return Err(ContractError::NonceAlreadyUsed {
            source_domain: envelope.source_domain,
            nonce: envelope.nonce,
        });
    }
    mark_nonce_used(deps.storage, envelope.source_domain, envelope.nonce)?;

    let received = Event::new("message_received")
        .add_attribute("caller", bytes32_to_hex(&caller))
        .add_attribute("source_domain", envelope.source_domain.to_string())
        .add_attribute("nonce", envelope.nonce.to_string())
        .add_attribute("sender", bytes32_to_hex(&envelope.sender))
        .add_attribute("message_body", bytes_to_hex(&envelope.message_body));

    let response = Response::new()
        .add_event(received)
        .add_attribute("method", "receive_message")
        .add_attribute("source_domain", envelope.source_domain.to_string())
        .add_attribute("nonce", envelope.nonce.to_string());

    if BurnMessage::matches_length(&envelope.message_body) {
        let burn = BurnMessage::decode(&envelope.message_body)?;
        let (mint, minted) = mint_from_burn_message(deps, &config, envelope.source_domain, &burn)?;
        return Ok(response.add_message(mint).add_event(minted));
    }

    let router = config.router.ok_or(ContractError::NoRouter)?;
    let forward = WasmMsg::Execute {
        contract_addr: router.to_string(),
        msg: to_json_binary(&RouterExecuteMsg::HandleMessage {
            message,
            attestation,
        })?,
        funds: vec![],
    };

    Ok(response
        .add_message(forward)
        .add_attribute("router", router))
}

// ============================================================================
// ReplaceMessage
// ============================================================================

/// Re-emit an attested envelope with a new body and destination caller.
/// Only the original sender may replace; the nonce is reused.
pub fn execute_replace_message(
    deps: DepsMut,
    info: MessageInfo,
    original_message: Binary,
    original_attestation: Binary,
    new_message_body: Binary,
    new_destination_caller: Binary,
) -> Result<Response, ContractError> {
    ensure_sending_and_receiving(deps.storage)?;

    let config = CONFIG.load(deps.storage)?;
    let original = load_attested_original(
        deps.as_ref(),
        &config,
        &original_message,
        &original_attestation,
    )?;

    if local_identity(&info.sender) != original.sender {
        return Err(ContractError::SenderMismatch);
    }

    let new_destination_caller = parse_bytes32("new_destination_caller", &new_destination_caller)?;
    let replacement = build_replacement(
        &config,
        &original,
        new_message_body.to_vec(),
        new_destination_caller,
    )?;

    Ok(Response::new()
        .add_event(message_sent_event(&replacement))
        .add_attribute("method", "replace_message")
        .add_attribute("nonce", original.nonce.to_string()))
}
