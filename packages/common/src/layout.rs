//! Byte layout tables for the CCTP wire formats
//!
//! Every fixed field of both formats is declared here exactly once as an
//! `(offset, len)` window. Codecs validate the total length up front and then
//! read and write fields only through [`Field`], so a field can never be
//! misaligned against the layout the attestation network signs.
//!
//! # Message envelope (116-byte header + body)
//! - Bytes 0-3:     version (u32, big-endian)
//! - Bytes 4-7:     sourceDomain (u32, big-endian)
//! - Bytes 8-11:    destinationDomain (u32, big-endian)
//! - Bytes 12-19:   nonce (u64, big-endian)
//! - Bytes 20-51:   sender (32 bytes)
//! - Bytes 52-83:   recipient (32 bytes)
//! - Bytes 84-115:  destinationCaller (32 bytes)
//! - Bytes 116-:    messageBody
//!
//! # BurnMessage (132 bytes)
//! - Bytes 0-3:     version (u32, big-endian)
//! - Bytes 4-35:    burnToken (32 bytes)
//! - Bytes 36-67:   mintRecipient (32 bytes)
//! - Bytes 68-99:   amount (uint256, big-endian, left-padded)
//! - Bytes 100-131: messageSender (32 bytes)

/// A named window into a fixed-layout byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub offset: usize,
    pub len: usize,
}

impl Field {
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// First byte after this field.
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Borrow the field from `buf`, or `None` if the buffer is too short.
    pub fn slice<'a>(&self, buf: &'a [u8]) -> Option<&'a [u8]> {
        buf.get(self.offset..self.end())
    }

    pub fn read_u32(&self, buf: &[u8]) -> Option<u32> {
        let bytes: [u8; 4] = self.slice(buf)?.try_into().ok()?;
        Some(u32::from_be_bytes(bytes))
    }

    pub fn read_u64(&self, buf: &[u8]) -> Option<u64> {
        let bytes: [u8; 8] = self.slice(buf)?.try_into().ok()?;
        Some(u64::from_be_bytes(bytes))
    }

    pub fn read_bytes32(&self, buf: &[u8]) -> Option<[u8; 32]> {
        self.slice(buf)?.try_into().ok()
    }

    /// Copy `value` into the field. Callers size `buf` from the layout
    /// constants and pass exactly `len` bytes.
    pub(crate) fn write(&self, buf: &mut [u8], value: &[u8]) {
        buf[self.offset..self.end()].copy_from_slice(value);
    }
}

// ============================================================================
// Message envelope
// ============================================================================

pub const MESSAGE_VERSION: Field = Field::new(0, 4);
pub const MESSAGE_SOURCE_DOMAIN: Field = Field::new(4, 4);
pub const MESSAGE_DESTINATION_DOMAIN: Field = Field::new(8, 4);
pub const MESSAGE_NONCE: Field = Field::new(12, 8);
pub const MESSAGE_SENDER: Field = Field::new(20, 32);
pub const MESSAGE_RECIPIENT: Field = Field::new(52, 32);
pub const MESSAGE_DESTINATION_CALLER: Field = Field::new(84, 32);

/// Length of the fixed envelope header; the body starts here.
pub const MESSAGE_HEADER_LEN: usize = MESSAGE_DESTINATION_CALLER.end();

// ============================================================================
// BurnMessage
// ============================================================================

pub const BURN_VERSION: Field = Field::new(0, 4);
pub const BURN_TOKEN: Field = Field::new(4, 32);
pub const BURN_MINT_RECIPIENT: Field = Field::new(36, 32);
/// Full 32-byte amount slot as it appears on the wire.
pub const BURN_AMOUNT: Field = Field::new(68, 32);
/// High-order part of the amount slot; must be zero for a u64 amount.
pub const BURN_AMOUNT_HIGH: Field = Field::new(68, 24);
/// Low 8 bytes of the amount slot holding the u64 value.
pub const BURN_AMOUNT_LOW: Field = Field::new(92, 8);
pub const BURN_MESSAGE_SENDER: Field = Field::new(100, 32);

/// Exact length of an encoded BurnMessage.
pub const BURN_MESSAGE_LEN: usize = BURN_MESSAGE_SENDER.end();
