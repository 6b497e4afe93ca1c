//! Token messenger handlers.
//!
//! This module handles:
//! - DepositForBurn, directly (CW20 `BurnFrom`) or through the CW20 hook (`Burn`)
//! - ReplaceDepositForBurn
//! - Minting for inbound BurnMessages

use cosmwasm_std::{
    from_json, Addr, Binary, CosmosMsg, DepsMut, Env, Event, MessageInfo, Response, StdError,
    Uint128,
};
use cw20::Cw20ReceiveMsg;

use cctp_common::{bytes32_to_hex, BurnMessage, Message};

use super::transmitter::{
    build_replacement, ensure_body_size, ensure_sending_and_receiving, load_attested_original,
    message_sent_event,
};
use super::{is_zero, parse_bytes32};
use crate::address_codec::{identity_to_address, local_identity};
use crate::custody::{burn_from_msg, burn_msg, mint_msg};
use crate::error::ContractError;
use crate::msg::ReceiveMsg;
use crate::state::{
    reserve_nonce, Config, CONFIG, MINTER_ALLOWANCES, PAUSED, PER_MESSAGE_BURN_LIMITS,
    REMOTE_TOKEN_MESSENGERS, TOKEN_PAIRS,
};

/// Where the burned tokens come from
enum BurnSource {
    /// Depositor's balance, through the allowance granted to this contract
    Allowance,
    /// Tokens already transferred to this contract by a CW20 `Send`
    Received,
}

struct Deposit {
    depositor: Addr,
    burn_token: Addr,
    amount: Uint128,
    destination_domain: u32,
    mint_recipient: Binary,
    destination_caller: Option<Binary>,
    source: BurnSource,
}

// ============================================================================
// DepositForBurn
// ============================================================================

/// Burn `amount` of `burn_token` held by the sender and emit a BurnMessage.
#[allow(clippy::too_many_arguments)]
pub fn execute_deposit_for_burn(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    destination_domain: u32,
    mint_recipient: Binary,
    burn_token: String,
    destination_caller: Option<Binary>,
) -> Result<Response, ContractError> {
    let burn_token = deps.api.addr_validate(&burn_token)?;

    deposit_for_burn(
        deps,
        &env,
        Deposit {
            depositor: info.sender,
            burn_token,
            amount,
            destination_domain,
            mint_recipient,
            destination_caller,
            source: BurnSource::Allowance,
        },
    )
}

/// Execute handler for receiving CW20 tokens to burn
pub fn execute_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let depositor = deps.api.addr_validate(&cw20_msg.sender)?;
    let receive_msg: ReceiveMsg = from_json(&cw20_msg.msg)?;

    match receive_msg {
        ReceiveMsg::DepositForBurn {
            destination_domain,
            mint_recipient,
            destination_caller,
        } => deposit_for_burn(
            deps,
            &env,
            Deposit {
                depositor,
                // The CW20 contract calling the hook is the token being burned
                burn_token: info.sender,
                amount: cw20_msg.amount,
                destination_domain,
                mint_recipient,
                destination_caller,
                source: BurnSource::Received,
            },
        ),
    }
}

fn deposit_for_burn(
    deps: DepsMut,
    env: &Env,
    deposit: Deposit,
) -> Result<Response, ContractError> {
    let paused = PAUSED.load(deps.storage)?;
    if paused.burning_and_minting {
        return Err(ContractError::BurningAndMintingPaused);
    }
    if paused.sending_and_receiving {
        return Err(ContractError::SendingAndReceivingPaused);
    }

    if deposit.amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    let amount = u64::try_from(deposit.amount.u128()).map_err(|_| {
        ContractError::AmountTooLarge {
            amount: deposit.amount,
        }
    })?;

    let mint_recipient = parse_bytes32("mint_recipient", &deposit.mint_recipient)?;
    if is_zero(&mint_recipient) {
        return Err(ContractError::ZeroRecipient);
    }

    let destination_token_messenger = REMOTE_TOKEN_MESSENGERS
        .may_load(deps.storage, deposit.destination_domain)?
        .ok_or(ContractError::UnknownDestination {
            domain: deposit.destination_domain,
        })?;

    let config = CONFIG.load(deps.storage)?;
    if config.minting_token.as_ref() != Some(&deposit.burn_token) {
        return Err(ContractError::UnsupportedBurnToken {
            token: deposit.burn_token.to_string(),
        });
    }

    if let Some(limit) = PER_MESSAGE_BURN_LIMITS.may_load(deps.storage, &deposit.burn_token)? {
        if deposit.amount > limit {
            return Err(ContractError::OverBurnLimit {
                limit,
                amount: deposit.amount,
            });
        }
    }

    let destination_caller = match &deposit.destination_caller {
        Some(caller) => {
            let caller = parse_bytes32("destination_caller", caller)?;
            if is_zero(&caller) {
                return Err(ContractError::ZeroDestinationCaller);
            }
            caller
        }
        None => [0u8; 32],
    };

    let burn_token_identity = local_identity(&deposit.burn_token);
    let burn = BurnMessage {
        version: config.burn_message_version,
        burn_token: burn_token_identity,
        mint_recipient,
        amount,
        message_sender: local_identity(&deposit.depositor),
    };
    let body = burn.encode().to_vec();
    ensure_body_size(&config, body.len())?;

    let nonce = reserve_nonce(deps.storage)?;
    let envelope = Message {
        version: config.message_version,
        source_domain: config.local_domain,
        destination_domain: deposit.destination_domain,
        nonce,
        sender: local_identity(&env.contract.address),
        recipient: destination_token_messenger,
        destination_caller,
        message_body: body,
    }
    .encode();

    let custody = match deposit.source {
        BurnSource::Allowance => {
            burn_from_msg(&deposit.burn_token, &deposit.depositor, deposit.amount)?
        }
        BurnSource::Received => burn_msg(&deposit.burn_token, deposit.amount)?,
    };

    let event = deposit_for_burn_event(
        nonce,
        &burn,
        &deposit.depositor,
        deposit.destination_domain,
        &destination_token_messenger,
        &destination_caller,
    );

    Ok(Response::new()
        .add_message(custody)
        .add_event(event)
        .add_event(message_sent_event(&envelope))
        .add_attribute("method", "deposit_for_burn")
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("depositor", deposit.depositor)
        .add_attribute("amount", deposit.amount.to_string())
        .add_attribute("destination_domain", deposit.destination_domain.to_string()))
}

fn deposit_for_burn_event(
    nonce: u64,
    burn: &BurnMessage,
    depositor: &Addr,
    destination_domain: u32,
    destination_token_messenger: &[u8; 32],
    destination_caller: &[u8; 32],
) -> Event {
    Event::new("deposit_for_burn")
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("burn_token", bytes32_to_hex(&burn.burn_token))
        .add_attribute("amount", burn.amount.to_string())
        .add_attribute("depositor", depositor.to_string())
        .add_attribute("mint_recipient", bytes32_to_hex(&burn.mint_recipient))
        .add_attribute("destination_domain", destination_domain.to_string())
        .add_attribute(
            "destination_token_messenger",
            bytes32_to_hex(destination_token_messenger),
        )
        .add_attribute("destination_caller", bytes32_to_hex(destination_caller))
}

// ============================================================================
// ReplaceDepositForBurn
// ============================================================================

/// Re-emit a burn with a new mint recipient and destination caller.
///
/// Only the original depositor may replace, and only envelopes this contract
/// sent. Nothing is burned and no nonce is reserved.
pub fn execute_replace_deposit_for_burn(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    original_message: Binary,
    original_attestation: Binary,
    new_destination_caller: Binary,
    new_mint_recipient: Binary,
) -> Result<Response, ContractError> {
    ensure_sending_and_receiving(deps.storage)?;

    let config = CONFIG.load(deps.storage)?;
    let original = load_attested_original(
        deps.as_ref(),
        &config,
        &original_message,
        &original_attestation,
    )?;
    let burn = BurnMessage::decode(&original.message_body)?;

    if local_identity(&info.sender) != burn.message_sender {
        return Err(ContractError::SenderMismatch);
    }
    if original.sender != local_identity(&env.contract.address) {
        return Err(ContractError::SenderMismatch);
    }

    if new_mint_recipient.is_empty() || new_mint_recipient.iter().all(|&b| b == 0) {
        return Err(ContractError::EmptyMintRecipient);
    }
    let new_mint_recipient = parse_bytes32("new_mint_recipient", &new_mint_recipient)?;
    let new_destination_caller = parse_bytes32("new_destination_caller", &new_destination_caller)?;

    let new_burn = BurnMessage {
        mint_recipient: new_mint_recipient,
        ..burn
    };
    let replacement = build_replacement(
        &config,
        &original,
        new_burn.encode().to_vec(),
        new_destination_caller,
    )?;

    let event = deposit_for_burn_event(
        original.nonce,
        &new_burn,
        &info.sender,
        original.destination_domain,
        &original.recipient,
        &new_destination_caller,
    );

    Ok(Response::new()
        .add_event(message_sent_event(&replacement))
        .add_event(event)
        .add_attribute("method", "replace_deposit_for_burn")
        .add_attribute("nonce", original.nonce.to_string()))
}

// ============================================================================
// Minting
// ============================================================================

/// Resolve and authorize the mint for an inbound BurnMessage.
///
/// Decrements the minter allowance and returns the custody mint together with
/// the `mint_and_withdraw` event.
pub(crate) fn mint_from_burn_message(
    deps: DepsMut,
    config: &Config,
    source_domain: u32,
    burn: &BurnMessage,
) -> Result<(CosmosMsg, Event), ContractError> {
    if PAUSED.load(deps.storage)?.burning_and_minting {
        return Err(ContractError::BurningAndMintingPaused);
    }

    let local_token = TOKEN_PAIRS
        .may_load(deps.storage, (source_domain, burn.burn_token.as_slice()))?
        .ok_or_else(|| ContractError::NoTokenPair {
            remote_domain: source_domain,
            remote_token: bytes32_to_hex(&burn.burn_token),
        })?;

    if config.minting_token.as_ref() != Some(&local_token) {
        return Err(ContractError::TokenNotMintable {
            token: local_token.to_string(),
        });
    }

    let allowance = MINTER_ALLOWANCES
        .may_load(deps.storage, &local_token)?
        .ok_or_else(|| ContractError::NoAllowance {
            token: local_token.to_string(),
        })?;

    let amount = Uint128::from(burn.amount);
    if amount > allowance {
        return Err(ContractError::OverAllowance { allowance, amount });
    }
    let remaining = allowance.checked_sub(amount).map_err(StdError::from)?;
    MINTER_ALLOWANCES.save(deps.storage, &local_token, &remaining)?;

    let recipient = identity_to_address(&burn.mint_recipient, &config.bech32_prefix)?;
    let recipient = deps.api.addr_validate(&recipient)?;

    let mint = mint_msg(&local_token, &recipient, amount)?;
    let event = Event::new("mint_and_withdraw")
        .add_attribute("mint_recipient", recipient)
        .add_attribute("amount", amount.to_string())
        .add_attribute("mint_token", local_token);

    Ok((mint, event))
}
