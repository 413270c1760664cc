//! subxt config for gradium's ethereum-style accounts
//!
//! accounts are 20-byte keccak addresses and extrinsics carry a 65-byte
//! recoverable secp256k1 signature. everything else (hashing, header
//! layout, signed extensions) is the stock substrate set.

use parity_scale_codec::{Decode, Encode};
use subxt::config::substrate::{BlakeTwo256, SubstrateExtrinsicParams, SubstrateHeader};
use subxt::utils::H256;
use subxt::Config;

/// 20-byte account id (subxt 0.37 has no `utils::AccountId20`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Encode, Decode)]
pub struct AccountId20(pub [u8; 20]);

/// chain config used for metadata, blocks and transactions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradiumConfig {}

impl Config for GradiumConfig {
    type Hash = H256;
    type AccountId = AccountId20;
    type Address = AccountId20;
    type Signature = EthereumSignature;
    type Hasher = BlakeTwo256;
    type Header = SubstrateHeader<u32, BlakeTwo256>;
    type ExtrinsicParams = SubstrateExtrinsicParams<Self>;
    type AssetId = u32;
}

/// `r || s || v` over keccak-256 of the signer payload, `v` in `{0, 1}`
#[derive(Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub struct EthereumSignature(pub [u8; 65]);

impl core::fmt::Debug for EthereumSignature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "EthereumSignature(0x{})", hex::encode(self.0))
    }
}

/// lowercase `0x`-prefixed form of an account
pub fn account_hex(account: &AccountId20) -> String {
    format!("0x{}", hex::encode(account.0))
}
