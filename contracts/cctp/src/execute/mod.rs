//! Execute handlers for the CCTP contract.
//!
//! This module contains all execute message handlers, organized by category:
//! - `transmitter` - SendMessage, ReceiveMessage and ReplaceMessage
//! - `token_messenger` - DepositForBurn, the CW20 hook, ReplaceDepositForBurn and minting
//! - `attesters` - Attester set and signature threshold management
//! - `config` - Token pairs, burn limits, minter allowances and contract settings
//! - `admin` - Ownership, role assignment and pause control

mod admin;
mod attesters;
mod config;
mod token_messenger;
mod transmitter;

pub use admin::*;
pub use attesters::*;
pub use config::*;
pub use token_messenger::*;
pub use transmitter::*;

use cosmwasm_std::Binary;

use crate::error::ContractError;

/// Interpret `value` as a 32-byte field
pub(crate) fn parse_bytes32(field: &str, value: &Binary) -> Result<[u8; 32], ContractError> {
    value
        .as_slice()
        .try_into()
        .map_err(|_| ContractError::InvalidBytes32 {
            field: field.to_string(),
            got: value.len(),
        })
}

pub(crate) fn is_zero(bytes: &[u8; 32]) -> bool {
    bytes.iter().all(|&b| b == 0)
}
