//! storage key derivation

use crate::rpc::encode_hex;

/// `twox128("Grandpa") ++ twox128("CurrentSetId")`, fixed by the runtime layout
pub const GRANDPA_CURRENT_SET_ID_KEY: &str =
    "0x5f9cc45b7a00c5899361e1c6099678dc8a2d09463effcc78a22d75b9cb87dffc";

/// build a plain storage value key from pallet and item names
pub fn storage_key(pallet: &[u8], item: &[u8]) -> Vec<u8> {
    let mut key = Vec::with_capacity(32);

    // twox128(pallet) ++ twox128(item)
    key.extend_from_slice(&sp_core::twox_128(pallet));
    key.extend_from_slice(&sp_core::twox_128(item));

    key
}

/// `Timestamp::Now`, milliseconds since the unix epoch as a scale `u64`
pub fn timestamp_now_key() -> String {
    encode_hex(storage_key(b"Timestamp", b"Now"))
}

/// storage key for an outward transfer commitment: the nonce as 64
/// zero-padded hex digits.
///
/// this is a stand-in until the bridge pallet's real key layout is pinned
/// down; it is not a hashed map key.
pub fn outward_transfer_key(nonce: u64) -> String {
    format!("0x{:064x}", nonce)
}

/// one key per nonce, in input order
pub fn outward_transfer_keys(nonces: &[u64]) -> Vec<String> {
    nonces.iter().map(|n| outward_transfer_key(*n)).collect()
}
