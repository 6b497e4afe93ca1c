//! Hashing helpers shared by the codec, the verifier and the contract
//!
//! All digests are keccak256 so that attesters and EVM-side contracts compute
//! identical values.

use tiny_keccak::{Hasher, Keccak};

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Replay-protection key for an inbound message.
///
/// `keccak256(sourceDomain (4 bytes BE) || nonce (8 bytes BE))`. Hashing keeps
/// distinct `(domain, nonce)` pairs from colliding under adversarial input.
pub fn used_nonce_key(source_domain: u32, nonce: u64) -> [u8; 32] {
    let mut data = [0u8; 12];
    data[0..4].copy_from_slice(&source_domain.to_be_bytes());
    data[4..12].copy_from_slice(&nonce.to_be_bytes());
    keccak256(&data)
}

/// Derive the 20-byte Ethereum-style address of a secp256k1 public key.
///
/// Accepts the 65-byte uncompressed SEC1 encoding (`0x04 || X || Y`) returned
/// by signature recovery, or the bare 64-byte `X || Y` form.
pub fn pubkey_to_address(pubkey: &[u8]) -> Option<[u8; 20]> {
    let xy = match pubkey.len() {
        65 if pubkey[0] == 0x04 => &pubkey[1..],
        64 => pubkey,
        _ => return None,
    };
    let hash = keccak256(xy);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    Some(address)
}

/// Convert 32-byte hash to hex string (for attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Hex-encode arbitrary bytes with a 0x prefix
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse hex string (with or without 0x prefix) to 32-byte array
pub fn hex_to_bytes32(hex_str: &str) -> Result<[u8; 32], &'static str> {
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    if hex_str.len() != 64 {
        return Err("Invalid hex length: expected 64 characters");
    }
    let bytes = hex::decode(hex_str).map_err(|_| "Invalid hex character")?;
    let mut result = [0u8; 32];
    result.copy_from_slice(&bytes);
    Ok(result)
}
