//! error types for gradium client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("decoding error: {0}")]
    Decode(String),

    #[error("inconsistent chain state: {0}")]
    Consistency(String),

    #[error("dispatch error: {0}")]
    Dispatch(String),

    #[error("rpc call failed: {0}")]
    Rpc(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("transaction failed: {0}")]
    Transaction(String),

    #[error("runtime metadata not loaded (rpc-only client)")]
    MetadataUnavailable,
}

pub type Result<T> = std::result::Result<T, ChainError>;

impl From<subxt::Error> for ChainError {
    fn from(e: subxt::Error) -> Self {
        match e {
            subxt::Error::Runtime(dispatch) => ChainError::Dispatch(dispatch.to_string()),
            subxt::Error::Rpc(rpc) => ChainError::Rpc(rpc.to_string()),
            subxt::Error::Codec(codec) => ChainError::Decode(codec.to_string()),
            subxt::Error::Transaction(tx) => ChainError::Transaction(tx.to_string()),
            other => ChainError::Rpc(other.to_string()),
        }
    }
}

// block and event decoding in subxt-core reports its own error type
impl From<subxt::ext::subxt_core::Error> for ChainError {
    fn from(e: subxt::ext::subxt_core::Error) -> Self {
        ChainError::Decode(e.to_string())
    }
}

impl From<parity_scale_codec::Error> for ChainError {
    fn from(e: parity_scale_codec::Error) -> Self {
        ChainError::Decode(e.to_string())
    }
}

impl From<hex::FromHexError> for ChainError {
    fn from(e: hex::FromHexError) -> Self {
        ChainError::Decode(e.to_string())
    }
}
