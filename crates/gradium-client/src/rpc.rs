//! json-rpc transport seam
//!
//! the client speaks to the node through [`RpcTransport`]. the production
//! implementation is subxt's jsonrpsee-backed [`RpcClient`], which is also
//! handed to `OnlineClient` so metadata and raw calls share one socket.

use crate::error::{ChainError, Result};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use subxt::backend::rpc::{RpcClient, RpcParams};

/// one request/response round trip against a substrate node
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value>;
}

#[async_trait]
impl RpcTransport for RpcClient {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        let mut rpc_params = RpcParams::new();
        for param in params {
            rpc_params
                .push(param)
                .map_err(|e| ChainError::Rpc(format!("{}: bad params: {}", method, e)))?;
        }

        tracing::debug!("rpc {}", method);
        RpcClient::request::<Value>(self, method, rpc_params)
            .await
            .map_err(|e| ChainError::Rpc(format!("{}: {}", method, e)))
    }
}

/// decode a json result into `T`, treating `null` as absent
pub fn from_json_opt<T: DeserializeOwned>(method: &str, value: Value) -> Result<Option<T>> {
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| ChainError::Decode(format!("{}: {}", method, e)))
}

/// decode `0x`-prefixed (or bare) hex
pub fn decode_hex(data: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(data.trim_start_matches("0x"))?)
}

/// `0x`-prefixed lowercase hex
pub fn encode_hex(data: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(data))
}

/// opaque bytes carried as hex strings on the wire
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn to_hex(&self) -> String {
        encode_hex(&self.0)
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Bytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Bytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s.trim_start_matches("0x"))
            .map(Bytes)
            .map_err(serde::de::Error::custom)
    }
}

/// block numbers arrive as `0x` hex strings from `chain_getHeader`; some
/// nodes send plain json numbers instead
pub(crate) mod hex_number {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Number(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(n: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{:x}", n))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let raw = match Wire::deserialize(deserializer)? {
            Wire::Number(n) => n,
            Wire::Text(s) => match s.strip_prefix("0x") {
                Some(digits) => u64::from_str_radix(digits, 16).map_err(serde::de::Error::custom)?,
                None => s.parse::<u64>().map_err(serde::de::Error::custom)?,
            },
        };
        u32::try_from(raw).map_err(serde::de::Error::custom)
    }
}
