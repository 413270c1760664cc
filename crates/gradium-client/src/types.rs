//! chain data as returned by the node
//!
//! every value here is a snapshot: fetched once, never mutated.

use crate::rpc::{encode_hex, hex_number, Bytes};

use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sp_core::crypto::Ss58Codec;
use std::fmt;

/// 32-byte block hash, `0x`-hex on the wire
pub type BlockHash = subxt::utils::H256;

/// substrate default header number type
pub type BlockNumber = u32;

/// full-width hex for a block hash (`Display` on `H256` elides the middle)
pub fn hash_hex(hash: &BlockHash) -> String {
    encode_hex(hash.as_bytes())
}

/// parse a `0x`-prefixed (or bare) 32-byte hex hash
pub fn parse_block_hash(s: &str) -> crate::error::Result<BlockHash> {
    let bytes = crate::rpc::decode_hex(s)?;
    let raw: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| {
        crate::error::ChainError::Decode(format!("block hash must be 32 bytes, got {}", b.len()))
    })?;
    Ok(BlockHash::from(raw))
}

/// header digest
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digest {
    pub logs: Vec<Bytes>,
}

/// block header
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub parent_hash: BlockHash,
    #[serde(with = "hex_number")]
    pub number: BlockNumber,
    pub state_root: BlockHash,
    pub extrinsics_root: BlockHash,
    #[serde(default)]
    pub digest: Digest,
}

/// block body: header plus opaque scale-encoded extrinsics in order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: Header,
    pub extrinsics: Vec<Bytes>,
}

/// `chain_getBlock` wraps the block alongside its justifications
#[derive(Deserialize)]
pub(crate) struct SignedBlock {
    pub block: Block,
}

/// `state_getReadProof` response; the echoed `at` hash is not kept
#[derive(Deserialize)]
pub(crate) struct ReadProof {
    pub proof: Vec<Bytes>,
}

/// grandpa authority identity (ed25519 public key)
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode)]
pub struct AuthorityId(pub [u8; 32]);

impl AuthorityId {
    /// generic-prefix (42) ss58 address
    pub fn to_ss58(&self) -> String {
        sp_core::ed25519::Public::from_raw(self.0).to_ss58check()
    }
}

impl fmt::Display for AuthorityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for AuthorityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthorityId({})", self)
    }
}

impl Serialize for AuthorityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AuthorityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(s.trim_start_matches("0x")).map_err(serde::de::Error::custom)?;
        let id: [u8; 32] = bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("authority id must be 32 bytes"))?;
        Ok(AuthorityId(id))
    }
}

/// one voter in a grandpa authority set; scale layout is `(AuthorityId, u64)`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct Authority {
    pub id: AuthorityId,
    pub weight: u64,
}

/// grandpa consensus snapshot at one block
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrandpaState {
    pub set_id: u64,
    pub authorities: Vec<Authority>,
    pub block_number: BlockNumber,
    pub block_hash: BlockHash,
    pub slot_duration_ms: u64,
    pub state_machine: String,
}

impl GrandpaState {
    pub fn total_weight(&self) -> u64 {
        self.authorities.iter().map(|a| a.weight).sum()
    }
}

/// decoded extrinsic summary for reports
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExtrinsicInfo {
    pub section: String,
    pub method: String,
    pub signer: Option<String>,
    pub nonce: Option<u64>,
    pub tip: Option<u128>,
}

/// decoded event summary for reports
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EventInfo {
    pub section: String,
    pub method: String,
    pub phase: String,
    pub data: String,
}

/// flattened block view for reports, not a protocol entity
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockInfo {
    pub number: BlockNumber,
    pub hash: BlockHash,
    pub parent_hash: BlockHash,
    /// `Timestamp::Now` in milliseconds, if the runtime has the pallet
    pub timestamp: Option<u64>,
    pub state_root: BlockHash,
    pub extrinsics_root: BlockHash,
    pub extrinsics: Vec<ExtrinsicInfo>,
    pub events: Vec<EventInfo>,
}

/// outcome of a submitted remark
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemarkReceipt {
    pub signer: String,
    pub nonce: u64,
    pub block_hash: BlockHash,
    pub extrinsic_hash: BlockHash,
    /// false when the receipt was taken from a best (not yet final) block
    pub finalized: bool,
}
