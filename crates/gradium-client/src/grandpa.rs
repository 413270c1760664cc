//! grandpa set id and authority decoding
//!
//! `state_getStorage` for the set id has been observed in three shapes
//! depending on the node and middleware in front of it: a json number, a
//! `0x` scale blob, or a decimal string. [`SetIdWire`] classifies the json
//! value once and decoding handles each case explicitly.

use crate::error::{ChainError, Result};
use crate::rpc::decode_hex;
use crate::types::Authority;

use parity_scale_codec::DecodeAll;
use serde_json::Value;
use std::collections::HashSet;

/// runtime api entry returning `Vec<(AuthorityId, u64)>`
pub const GRANDPA_AUTHORITIES_CALL: &str = "GrandpaApi_grandpa_authorities";

/// set id as it arrived on the wire
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetIdWire {
    /// already a number
    Typed(u64),
    /// scale-encoded `u64`
    Raw(Vec<u8>),
    /// decimal text
    Text(String),
}

impl SetIdWire {
    /// classify a `state_getStorage` result; `null` means the key is absent
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Null => Err(ChainError::NotFound(
                "grandpa current set id not in storage".into(),
            )),
            Value::Number(n) => n
                .as_u64()
                .map(SetIdWire::Typed)
                .ok_or_else(|| ChainError::Decode(format!("set id {} is not a u64", n))),
            Value::String(s) if s.starts_with("0x") => Ok(SetIdWire::Raw(decode_hex(&s)?)),
            Value::String(s) => Ok(SetIdWire::Text(s)),
            other => Err(ChainError::Decode(format!(
                "unexpected set id shape: {}",
                other
            ))),
        }
    }

    pub fn decode(self) -> Result<u64> {
        match self {
            SetIdWire::Typed(n) => Ok(n),
            SetIdWire::Raw(bytes) => u64::decode_all(&mut bytes.as_slice()).map_err(|e| {
                ChainError::Decode(format!(
                    "set id 0x{} is not a scale u64: {}",
                    hex::encode(&bytes),
                    e
                ))
            }),
            SetIdWire::Text(s) => s
                .trim()
                .parse::<u64>()
                .map_err(|e| ChainError::Decode(format!("set id {:?}: {}", s, e))),
        }
    }
}

/// decode `GrandpaApi_grandpa_authorities` output
pub fn decode_authorities(bytes: &[u8]) -> Result<Vec<Authority>> {
    Vec::<Authority>::decode_all(&mut &bytes[..])
        .map_err(|e| ChainError::Decode(format!("grandpa authorities: {}", e)))
}

/// a repeated identity means we decoded garbage or the node is broken
pub fn ensure_unique_authorities(authorities: &[Authority]) -> Result<()> {
    let mut seen = HashSet::with_capacity(authorities.len());
    for authority in authorities {
        if !seen.insert(authority.id) {
            return Err(ChainError::Consistency(format!(
                "duplicate grandpa authority {}",
                authority.id
            )));
        }
    }
    Ok(())
}
