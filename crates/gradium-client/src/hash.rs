//! content hashing

use sha3::{Digest, Sha3_256};

/// sha3-256 of `data` as 64 lowercase hex characters
pub fn sha3_256_hex(data: impl AsRef<[u8]>) -> String {
    hex::encode(Sha3_256::digest(data.as_ref()))
}
