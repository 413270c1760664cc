//! ethereum-style secp256k1 signer for gradium extrinsics
//!
//! keys come from a raw `0x` private key or a bip39 mnemonic with an optional
//! bip32 path suffix (`<phrase>/m/44'/60'/0'/0/1`). the account is the last
//! 20 bytes of keccak-256 over the uncompressed public key.

use crate::chain::{EthereumSignature, GradiumConfig};
use crate::error::{ChainError, Result};

use hmac::{Hmac, Mac};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::SecretKey;
use sha2::Sha512;
use sha3::{Digest, Keccak256};
use sp_core::{ecdsa, Pair};
use subxt::tx::Signer;
use crate::chain::AccountId20;

/// first account of the standard ethereum derivation
pub const DEFAULT_DERIVATION_PATH: &str = "m/44'/60'/0'/0/0";

const HARDENED: u32 = 0x8000_0000;

type HmacSha512 = Hmac<Sha512>;

/// subxt signer over a secp256k1 key with a 20-byte account
pub struct EthereumSigner {
    pair: ecdsa::Pair,
    account: AccountId20,
}

impl EthereumSigner {
    /// `0x` + 64 hex private key, or mnemonic with optional `/m/...` path
    pub fn from_seed(seed: &str) -> Result<Self> {
        let seed = seed.trim();
        let secret = match seed.strip_prefix("0x") {
            Some(key) => {
                let bytes = hex::decode(key).map_err(|e| signing("private key", e))?;
                <[u8; 32]>::try_from(bytes.as_slice())
                    .map_err(|_| ChainError::Signing("private key must be 32 bytes".into()))?
            }
            None => {
                let (phrase, path) = match seed.find("/m/") {
                    Some(i) => (&seed[..i], &seed[i + 1..]),
                    None => (seed, DEFAULT_DERIVATION_PATH),
                };
                let mnemonic = bip39::Mnemonic::parse_normalized(phrase.trim())
                    .map_err(|e| signing("mnemonic", e))?;
                derive_secret(&mnemonic.to_seed(""), &parse_path(path)?)?
            }
        };
        Self::from_secret(&secret)
    }

    pub fn from_secret(secret: &[u8; 32]) -> Result<Self> {
        let key = SecretKey::from_slice(secret).map_err(|e| signing("private key", e))?;
        let pair = ecdsa::Pair::from_seed_slice(secret)
            .map_err(|e| ChainError::Signing(format!("private key: {:?}", e)))?;
        Ok(Self {
            pair,
            account: address_of(&key.public_key()),
        })
    }

    pub fn account(&self) -> &AccountId20 {
        &self.account
    }
}

impl Signer<GradiumConfig> for EthereumSigner {
    fn account_id(&self) -> AccountId20 {
        self.account.clone()
    }

    fn address(&self) -> AccountId20 {
        self.account.clone()
    }

    fn sign(&self, payload: &[u8]) -> EthereumSignature {
        let sig = self.pair.sign_prehashed(&keccak256(payload));
        let mut raw = [0u8; 65];
        raw.copy_from_slice(sig.as_ref());
        EthereumSignature(raw)
    }
}

fn signing(what: &str, e: impl std::fmt::Display) -> ChainError {
    ChainError::Signing(format!("invalid {}: {}", what, e))
}

fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

fn address_of(public: &k256::PublicKey) -> AccountId20 {
    let point = public.to_encoded_point(false);
    // skip the 0x04 sec1 tag
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut out = [0u8; 20];
    out.copy_from_slice(&hash[12..]);
    AccountId20(out)
}

/// `m/44'/60'/0'/0/0` into child indices, hardened ones tagged
fn parse_path(path: &str) -> Result<Vec<u32>> {
    let mut parts = path.trim().split('/');
    if parts.next() != Some("m") {
        return Err(ChainError::Signing(format!(
            "derivation path {:?} must start with m",
            path
        )));
    }

    parts
        .map(|part| {
            let hardened = part.strip_suffix('\'').or_else(|| part.strip_suffix('h'));
            let (digits, hardened) = match hardened {
                Some(digits) => (digits, true),
                None => (part, false),
            };
            let index: u32 = digits
                .parse()
                .map_err(|_| ChainError::Signing(format!("bad path component {:?}", part)))?;
            if index >= HARDENED {
                return Err(ChainError::Signing(format!("path index {} out of range", index)));
            }
            Ok(if hardened { index | HARDENED } else { index })
        })
        .collect()
}

fn hmac_sha512(key: &[u8], data: &[u8]) -> Result<([u8; 32], [u8; 32])> {
    let mut mac = HmacSha512::new_from_slice(key).map_err(|e| signing("hmac key", e))?;
    mac.update(data);
    let out = mac.finalize().into_bytes();
    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&out[..32]);
    right.copy_from_slice(&out[32..]);
    Ok((left, right))
}

/// bip32 private derivation from a bip39 seed
fn derive_secret(seed: &[u8], path: &[u32]) -> Result<[u8; 32]> {
    let (mut key, mut chain_code) = hmac_sha512(b"Bitcoin seed", seed)?;

    for &index in path {
        let parent = SecretKey::from_slice(&key).map_err(|e| signing("derived key", e))?;
        let mut data = Vec::with_capacity(37);
        if index & HARDENED != 0 {
            data.push(0);
            data.extend_from_slice(&key);
        } else {
            data.extend_from_slice(parent.public_key().to_encoded_point(true).as_bytes());
        }
        data.extend_from_slice(&index.to_be_bytes());

        let (tweak, next_chain_code) = hmac_sha512(&chain_code, &data)?;
        let tweak = SecretKey::from_slice(&tweak).map_err(|e| signing("derived key", e))?;
        let sum = *parent.to_nonzero_scalar() + *tweak.to_nonzero_scalar();
        let child =
            SecretKey::from_bytes(&sum.to_bytes()).map_err(|e| signing("derived key", e))?;

        key = child.to_bytes().into();
        chain_code = next_chain_code;
    }

    Ok(key)
}
