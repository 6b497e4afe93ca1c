//! Local Identity Encoding
//!
//! Every account that appears in a cross-chain message is carried as a
//! 32-byte identity. On this chain the identity of an account is its raw
//! bech32 payload, left-padded with zeros:
//!
//! ```text
//! 20-byte account:  | 0x00 * 12 | payload (20 bytes) |
//! 32-byte account:  | payload (32 bytes)             |
//! ```
//!
//! Addresses that are not bech32 (some test environments use plain names)
//! fall back to `keccak256(address)`. Such identities are stable but cannot
//! be turned back into an address.

use cosmwasm_std::{Addr, StdError, StdResult};

use cctp_common::keccak256;

/// Bech32 character set
const BECH32_CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Bech32 checksum length in characters
const CHECKSUM_LEN: usize = 6;

// ============================================================================
// Identity Mapping
// ============================================================================

/// 32-byte identity of a local account
pub fn local_identity(addr: &Addr) -> [u8; 32] {
    match decode_bech32(addr.as_str()) {
        Ok((_, payload)) if payload.len() == 20 || payload.len() == 32 => {
            let mut identity = [0u8; 32];
            identity[32 - payload.len()..].copy_from_slice(&payload);
            identity
        }
        _ => keccak256(addr.as_str().as_bytes()),
    }
}

/// Render a 32-byte identity as a local bech32 address with prefix `hrp`
///
/// Identities whose first 12 bytes are zero are 20-byte accounts.
pub fn identity_to_address(identity: &[u8; 32], hrp: &str) -> StdResult<String> {
    if identity[..12].iter().all(|&b| b == 0) {
        encode_bech32(hrp, &identity[12..])
    } else {
        encode_bech32(hrp, identity)
    }
}

// ============================================================================
// Bech32
// ============================================================================

/// Decode a bech32 string into its human-readable part and payload bytes
///
/// The checksum is verified. Mixed-case input is rejected.
pub fn decode_bech32(addr: &str) -> StdResult<(String, Vec<u8>)> {
    let has_lower = addr.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = addr.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(StdError::generic_err("Mixed-case bech32 string"));
    }
    let addr = addr.to_ascii_lowercase();

    let (hrp, data_part) = addr
        .rsplit_once('1')
        .ok_or_else(|| StdError::generic_err("Invalid bech32 format"))?;

    if hrp.is_empty() {
        return Err(StdError::generic_err("Empty bech32 prefix"));
    }
    if data_part.len() <= CHECKSUM_LEN {
        return Err(StdError::generic_err("Bech32 data too short"));
    }

    let values = decode_bech32_data(data_part)?;

    let mut checked = expand_hrp(hrp);
    checked.extend_from_slice(&values);
    if bech32_polymod(&checked) != 1 {
        return Err(StdError::generic_err("Invalid bech32 checksum"));
    }

    let payload = convert_bits(&values[..values.len() - CHECKSUM_LEN], 5, 8, false)?;
    Ok((hrp.to_string(), payload))
}

/// Encode raw bytes as a bech32 string with the given prefix
pub fn encode_bech32(hrp: &str, bytes: &[u8]) -> StdResult<String> {
    if hrp.is_empty() {
        return Err(StdError::generic_err("Empty bech32 prefix"));
    }

    let data5 = convert_bits(bytes, 8, 5, true)?;
    let checksum = compute_bech32_checksum(hrp, &data5);

    Ok(format!(
        "{}1{}{}",
        hrp,
        encode_bech32_data(&data5),
        encode_bech32_data(&checksum)
    ))
}

/// Convert bits between different group sizes
fn convert_bits(data: &[u8], from_bits: u32, to_bits: u32, pad: bool) -> StdResult<Vec<u8>> {
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut result = Vec::new();
    let max_v = (1u32 << to_bits) - 1;

    for &value in data {
        acc = ((acc << from_bits) | value as u32) & 0xffff;
        bits += from_bits;

        while bits >= to_bits {
            bits -= to_bits;
            result.push(((acc >> bits) & max_v) as u8);
        }
    }

    if pad {
        if bits > 0 {
            result.push(((acc << (to_bits - bits)) & max_v) as u8);
        }
    } else if bits >= from_bits || ((acc << (to_bits - bits)) & max_v) != 0 {
        return Err(StdError::generic_err("Invalid padding"));
    }

    Ok(result)
}

fn decode_bech32_data(data: &str) -> StdResult<Vec<u8>> {
    data.chars()
        .map(|c| {
            BECH32_CHARSET
                .iter()
                .position(|&x| x as char == c)
                .map(|idx| idx as u8)
                .ok_or_else(|| StdError::generic_err(format!("Invalid bech32 character: {}", c)))
        })
        .collect()
}

fn encode_bech32_data(data: &[u8]) -> String {
    data.iter()
        .map(|&b| BECH32_CHARSET[b as usize] as char)
        .collect()
}

fn compute_bech32_checksum(hrp: &str, data: &[u8]) -> Vec<u8> {
    let mut values = expand_hrp(hrp);
    values.extend_from_slice(data);
    values.extend_from_slice(&[0; CHECKSUM_LEN]);

    let polymod = bech32_polymod(&values) ^ 1;

    (0..CHECKSUM_LEN)
        .map(|i| ((polymod >> (5 * (5 - i))) & 31) as u8)
        .collect()
}

/// Expand HRP for checksum calculation
fn expand_hrp(hrp: &str) -> Vec<u8> {
    let mut result = Vec::with_capacity(hrp.len() * 2 + 1);
    result.extend(hrp.bytes().map(|c| c >> 5));
    result.push(0);
    result.extend(hrp.bytes().map(|c| c & 31));
    result
}

fn bech32_polymod(values: &[u8]) -> u32 {
    const GENERATOR: [u32; 5] = [
        0x3b6a_57b2,
        0x2650_8e6d,
        0x1ea1_19fa,
        0x3d42_33dd,
        0x2a14_62b3,
    ];

    let mut chk: u32 = 1;
    for &v in values {
        let top = chk >> 25;
        chk = ((chk & 0x01ff_ffff) << 5) ^ (v as u32);
        for (i, gen) in GENERATOR.iter().enumerate() {
            if (top >> i) & 1 == 1 {
                chk ^= gen;
            }
        }
    }
    chk
}
