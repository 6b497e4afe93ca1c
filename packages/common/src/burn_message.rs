//! BurnMessage codec
//!
//! The canonical body of a token burn/mint instruction. The amount occupies a
//! full 32-byte slot on the wire (uint256 on EVM chains) but is limited to
//! u64 here, so the high-order 24 bytes of the slot must be zero.

use crate::error::DecodeError;
use crate::layout::{
    BURN_AMOUNT_HIGH, BURN_AMOUNT_LOW, BURN_MESSAGE_LEN, BURN_MESSAGE_SENDER,
    BURN_MINT_RECIPIENT, BURN_TOKEN, BURN_VERSION,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurnMessage {
    pub version: u32,
    /// Token identifier on the chain where the burn happened (left-padded).
    pub burn_token: [u8; 32],
    /// Recipient on the destination chain (left-padded).
    pub mint_recipient: [u8; 32],
    pub amount: u64,
    pub message_sender: [u8; 32],
}

impl BurnMessage {
    pub fn encode(&self) -> [u8; BURN_MESSAGE_LEN] {
        let mut out = [0u8; BURN_MESSAGE_LEN];
        BURN_VERSION.write(&mut out, &self.version.to_be_bytes());
        BURN_TOKEN.write(&mut out, &self.burn_token);
        BURN_MINT_RECIPIENT.write(&mut out, &self.mint_recipient);
        // High-order bytes of the amount slot stay zero
        BURN_AMOUNT_LOW.write(&mut out, &self.amount.to_be_bytes());
        BURN_MESSAGE_SENDER.write(&mut out, &self.message_sender);
        out
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != BURN_MESSAGE_LEN {
            return Err(DecodeError::InvalidLength {
                expected: BURN_MESSAGE_LEN,
                got: bytes.len(),
            });
        }
        let invalid = || DecodeError::InvalidLength {
            expected: BURN_MESSAGE_LEN,
            got: bytes.len(),
        };

        let high = BURN_AMOUNT_HIGH.slice(bytes).ok_or_else(invalid)?;
        if high.iter().any(|&b| b != 0) {
            return Err(DecodeError::AmountOverflow);
        }

        Ok(Self {
            version: BURN_VERSION.read_u32(bytes).ok_or_else(invalid)?,
            burn_token: BURN_TOKEN.read_bytes32(bytes).ok_or_else(invalid)?,
            mint_recipient: BURN_MINT_RECIPIENT.read_bytes32(bytes).ok_or_else(invalid)?,
            amount: BURN_AMOUNT_LOW.read_u64(bytes).ok_or_else(invalid)?,
            message_sender: BURN_MESSAGE_SENDER.read_bytes32(bytes).ok_or_else(invalid)?,
        })
    }

    /// Whether `body` has the length of an encoded BurnMessage.
    ///
    /// Inbound dispatch keys on this length alone; there is no type tag on
    /// the wire.
    pub fn matches_length(body: &[u8]) -> bool {
        body.len() == BURN_MESSAGE_LEN
    }
}
