//! Message envelope codec
//!
//! The envelope is the unit attesters sign: a 116-byte fixed header followed
//! by an opaque body. See [`crate::layout`] for the byte layout.

use crate::error::DecodeError;
use crate::layout::{
    MESSAGE_DESTINATION_CALLER, MESSAGE_DESTINATION_DOMAIN, MESSAGE_HEADER_LEN, MESSAGE_NONCE,
    MESSAGE_RECIPIENT, MESSAGE_SENDER, MESSAGE_SOURCE_DOMAIN, MESSAGE_VERSION,
};

/// One cross-chain communication unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub version: u32,
    pub source_domain: u32,
    pub destination_domain: u32,
    pub nonce: u64,
    pub sender: [u8; 32],
    pub recipient: [u8; 32],
    /// All-zero means any caller may deliver the message.
    pub destination_caller: [u8; 32],
    pub message_body: Vec<u8>,
}

impl Message {
    /// Serialize to `116 + body.len()` bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = vec![0u8; MESSAGE_HEADER_LEN + self.message_body.len()];
        MESSAGE_VERSION.write(&mut out, &self.version.to_be_bytes());
        MESSAGE_SOURCE_DOMAIN.write(&mut out, &self.source_domain.to_be_bytes());
        MESSAGE_DESTINATION_DOMAIN.write(&mut out, &self.destination_domain.to_be_bytes());
        MESSAGE_NONCE.write(&mut out, &self.nonce.to_be_bytes());
        MESSAGE_SENDER.write(&mut out, &self.sender);
        MESSAGE_RECIPIENT.write(&mut out, &self.recipient);
        MESSAGE_DESTINATION_CALLER.write(&mut out, &self.destination_caller);
        out[MESSAGE_HEADER_LEN..].copy_from_slice(&self.message_body);
        out
    }

    /// Parse an envelope. The body is taken verbatim; its size is a policy
    /// decision left to the caller.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() < MESSAGE_HEADER_LEN {
            return Err(DecodeError::TooShort {
                min: MESSAGE_HEADER_LEN,
                got: bytes.len(),
            });
        }
        let too_short = || DecodeError::TooShort {
            min: MESSAGE_HEADER_LEN,
            got: bytes.len(),
        };

        Ok(Self {
            version: MESSAGE_VERSION.read_u32(bytes).ok_or_else(too_short)?,
            source_domain: MESSAGE_SOURCE_DOMAIN.read_u32(bytes).ok_or_else(too_short)?,
            destination_domain: MESSAGE_DESTINATION_DOMAIN
                .read_u32(bytes)
                .ok_or_else(too_short)?,
            nonce: MESSAGE_NONCE.read_u64(bytes).ok_or_else(too_short)?,
            sender: MESSAGE_SENDER.read_bytes32(bytes).ok_or_else(too_short)?,
            recipient: MESSAGE_RECIPIENT.read_bytes32(bytes).ok_or_else(too_short)?,
            destination_caller: MESSAGE_DESTINATION_CALLER
                .read_bytes32(bytes)
                .ok_or_else(too_short)?,
            message_body: bytes[MESSAGE_HEADER_LEN..].to_vec(),
        })
    }

    /// Whether any caller may deliver this message on the destination.
    pub fn has_open_destination_caller(&self) -> bool {
        self.destination_caller == [0u8; 32]
    }
}
