//! gradium-client: websocket rpc client for the gradium substrate chain
//!
//! fetches finalized heads, headers and blocks, grandpa set ids and authority
//! sets, storage read proofs, and submits `System::remark` transactions.
//! transport, scale decoding and extrinsic construction come from subxt.
//!
//! ## usage
//!
//! ```rust,ignore
//! let client = ChainClient::connect(ClientConfig::with_endpoint("ws://127.0.0.1:9944")).await?;
//!
//! let head = client.fetch_finalized_head().await?;
//! let grandpa = client.fetch_grandpa_state_at(Some(head)).await?;
//! println!("set {} with {} authorities", grandpa.set_id, grandpa.authorities.len());
//!
//! client.close().await;
//! ```

pub mod chain;
pub mod client;
pub mod config;
pub mod error;
pub mod grandpa;
pub mod hash;
pub mod rpc;
pub mod signer;
pub mod storage;
pub mod types;

pub use chain::{account_hex, EthereumSignature, GradiumConfig};
pub use client::*;
pub use config::*;
pub use error::*;
pub use grandpa::SetIdWire;
pub use hash::sha3_256_hex;
pub use rpc::RpcTransport;
pub use signer::EthereumSigner;
pub use types::*;
