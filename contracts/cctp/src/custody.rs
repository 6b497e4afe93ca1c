//! CW20 token custody messages
//!
//! The contract never holds a balance across transactions: tokens are burned
//! on the way out and minted on the way in.

use cosmwasm_std::{to_json_binary, Addr, CosmosMsg, StdResult, Uint128, WasmMsg};
use cw20::Cw20ExecuteMsg;

/// Burn `amount` from `owner` using the allowance granted to this contract
pub fn burn_from_msg(token: &Addr, owner: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    cw20_execute(
        token,
        &Cw20ExecuteMsg::BurnFrom {
            owner: owner.to_string(),
            amount,
        },
    )
}

/// Burn `amount` from this contract's own balance
pub fn burn_msg(token: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    cw20_execute(token, &Cw20ExecuteMsg::Burn { amount })
}

/// Mint `amount` to `recipient`. This contract must be the token's minter.
pub fn mint_msg(token: &Addr, recipient: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    cw20_execute(
        token,
        &Cw20ExecuteMsg::Mint {
            recipient: recipient.to_string(),
            amount,
        },
    )
}

fn cw20_execute(token: &Addr, msg: &Cw20ExecuteMsg) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }))
}
