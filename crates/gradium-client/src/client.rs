//! chain client implementation
//!
//! one websocket connection, sequential request/response calls over it.

use crate::{
    chain::{account_hex, GradiumConfig},
    config::ClientConfig,
    error::{ChainError, Result},
    grandpa::{decode_authorities, ensure_unique_authorities, SetIdWire, GRANDPA_AUTHORITIES_CALL},
    hash::sha3_256_hex,
    rpc::{decode_hex, from_json_opt, RpcTransport},
    signer::EthereumSigner,
    storage::{outward_transfer_keys, timestamp_now_key, GRANDPA_CURRENT_SET_ID_KEY},
    types::{
        hash_hex, Authority, Block, BlockHash, BlockInfo, BlockNumber, EventInfo, ExtrinsicInfo,
        GrandpaState, Header, ReadProof, RemarkReceipt, SignedBlock,
    },
};

use parity_scale_codec::DecodeAll;
use serde_json::{json, Value};
use std::sync::Arc;
use subxt::backend::rpc::RpcClient;
use subxt::config::DefaultExtrinsicParamsBuilder;
use subxt::tx::{TxInBlock, TxStatus};
use subxt::client::RuntimeVersion;
use subxt::OnlineClient;
use tracing::{debug, info, warn};

/// gradium chain client
///
/// holds a single rpc connection and, when built with [`ChainClient::connect`],
/// the runtime metadata loaded over that same connection. each instance owns
/// its own metadata registry.
///
/// every method issues its calls one after another and awaits each reply.
/// the type is `Send + Sync` and the underlying jsonrpsee client multiplexes
/// by request id, so sharing one client between tasks is safe, but calls from
/// different tasks are not ordered relative to each other. there are no
/// timeouts or retries: a dead node surfaces as an error on the next call.
pub struct ChainClient {
    config: ClientConfig,
    rpc: Arc<dyn RpcTransport>,
    runtime: Option<OnlineClient<GradiumConfig>>,
}

impl ChainClient {
    /// open the websocket session and load runtime metadata
    pub async fn connect(config: ClientConfig) -> Result<Self> {
        info!("connecting to {}", config.endpoint);

        let rpc = if config.endpoint.starts_with("ws://") {
            RpcClient::from_insecure_url(&config.endpoint).await
        } else {
            RpcClient::from_url(&config.endpoint).await
        }
        .map_err(|e| ChainError::Connection(format!("{}: {}", config.endpoint, e)))?;

        let runtime = OnlineClient::<GradiumConfig>::from_rpc_client(rpc.clone())
            .await
            .map_err(|e| ChainError::Connection(format!("metadata negotiation failed: {}", e)))?;

        info!("connected to {}", config.endpoint);
        info!("  genesis: {}", hash_hex(&runtime.genesis_hash()));
        info!("  spec version: {}", runtime.runtime_version().spec_version);

        Ok(Self {
            config,
            rpc: Arc::new(rpc),
            runtime: Some(runtime),
        })
    }

    /// rpc-only client over an arbitrary transport.
    ///
    /// no metadata is loaded, so [`ChainClient::fetch_block_info`] and
    /// [`ChainClient::submit_remark`] fail with `MetadataUnavailable`.
    pub fn from_transport(transport: Arc<dyn RpcTransport>, config: ClientConfig) -> Self {
        Self {
            config,
            rpc: transport,
            runtime: None,
        }
    }

    /// release the connection
    pub async fn close(self) {
        info!("closing connection to {}", self.config.endpoint);
        drop(self.runtime);
        drop(self.rpc);
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// genesis hash from loaded metadata
    pub fn genesis_hash(&self) -> Option<BlockHash> {
        self.runtime.as_ref().map(|r| r.genesis_hash())
    }

    /// runtime spec and transaction version from loaded metadata
    pub fn runtime_version(&self) -> Option<RuntimeVersion> {
        self.runtime.as_ref().map(|r| r.runtime_version())
    }

    fn runtime(&self) -> Result<&OnlineClient<GradiumConfig>> {
        self.runtime.as_ref().ok_or(ChainError::MetadataUnavailable)
    }

    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        self.rpc.call(method, params).await
    }

    /// latest finalized block hash
    pub async fn fetch_finalized_head(&self) -> Result<BlockHash> {
        let method = "chain_getFinalizedHead";
        let value = self.call(method, vec![]).await?;
        from_json_opt(method, value)?
            .ok_or_else(|| ChainError::Decode(format!("{}: null result", method)))
    }

    pub async fn fetch_header(&self, hash: BlockHash) -> Result<Header> {
        let method = "chain_getHeader";
        let value = self.call(method, vec![json!(hash)]).await?;
        from_json_opt(method, value)?
            .ok_or_else(|| ChainError::NotFound(format!("header {}", hash_hex(&hash))))
    }

    /// canonical hash for a block number
    pub async fn fetch_block_hash(&self, number: BlockNumber) -> Result<BlockHash> {
        let method = "chain_getBlockHash";
        let value = self.call(method, vec![json!(number)]).await?;
        from_json_opt(method, value)?
            .ok_or_else(|| ChainError::NotFound(format!("block #{}", number)))
    }

    pub async fn fetch_block(&self, hash: BlockHash) -> Result<Block> {
        let method = "chain_getBlock";
        let value = self.call(method, vec![json!(hash)]).await?;
        from_json_opt::<SignedBlock>(method, value)?
            .map(|signed| signed.block)
            .ok_or_else(|| ChainError::NotFound(format!("block {}", hash_hex(&hash))))
    }

    /// grandpa `CurrentSetId` at a block
    pub async fn fetch_current_set_id(&self, at: BlockHash) -> Result<u64> {
        let value = self
            .call(
                "state_getStorage",
                vec![json!(GRANDPA_CURRENT_SET_ID_KEY), json!(at)],
            )
            .await?;
        let wire = SetIdWire::from_json(value)?;
        debug!("set id wire form at {}: {:?}", hash_hex(&at), wire);
        wire.decode()
    }

    /// grandpa authorities via the runtime api (not storage)
    pub async fn fetch_authorities(&self, at: BlockHash) -> Result<Vec<Authority>> {
        let method = "state_call";
        let value = self
            .call(method, vec![json!(GRANDPA_AUTHORITIES_CALL), json!("0x"), json!(at)])
            .await?;
        let encoded: String = from_json_opt(method, value)?
            .ok_or_else(|| ChainError::Decode(format!("{}: null result", method)))?;
        decode_authorities(&decode_hex(&encoded)?)
    }

    /// set id, authorities and height at `at`, or at the finalized head
    pub async fn fetch_grandpa_state_at(&self, at: Option<BlockHash>) -> Result<GrandpaState> {
        let block_hash = match at {
            Some(hash) => hash,
            None => self.fetch_finalized_head().await?,
        };

        let header = self.fetch_header(block_hash).await?;
        let set_id = self.fetch_current_set_id(block_hash).await?;
        let authorities = self.fetch_authorities(block_hash).await?;
        ensure_unique_authorities(&authorities)?;

        Ok(GrandpaState {
            set_id,
            authorities,
            block_number: header.number,
            block_hash,
            slot_duration_ms: self.config.slot_duration_ms,
            state_machine: self.config.state_machine.clone(),
        })
    }

    /// headers for `start..=end` in ascending order; empty when `start > end`
    pub async fn query_headers(
        &self,
        start: BlockNumber,
        end: BlockNumber,
    ) -> Result<Vec<(BlockHash, Header)>> {
        if start > end {
            return Ok(Vec::new());
        }

        // grown per resolved block; the range may run far past the tip
        let mut headers = Vec::new();
        for number in start..=end {
            let hash = self.fetch_block_hash(number).await?;
            let header = self.fetch_header(hash).await?;
            headers.push((hash, header));
        }
        Ok(headers)
    }

    /// read proof covering one placeholder key per outward transfer nonce
    pub async fn fetch_state_proof_for_outward_transfers(
        &self,
        nonces: &[u64],
        at: BlockHash,
    ) -> Result<Vec<String>> {
        let method = "state_getReadProof";
        let keys = outward_transfer_keys(nonces);
        debug!("read proof for {} keys at {}", keys.len(), hash_hex(&at));

        let value = self.call(method, vec![json!(keys), json!(at)]).await?;
        let proof: ReadProof = from_json_opt(method, value)?
            .ok_or_else(|| ChainError::Decode(format!("{}: null result", method)))?;
        Ok(proof.proof.iter().map(|node| node.to_hex()).collect())
    }

    /// sha3-256 of `data`, hex encoded
    pub fn hash(&self, data: impl AsRef<[u8]>) -> String {
        sha3_256_hex(data)
    }

    /// `Timestamp::Now` at a block, if the runtime stores one
    pub async fn fetch_timestamp(&self, at: BlockHash) -> Result<Option<u64>> {
        let method = "state_getStorage";
        let value = self
            .call(method, vec![json!(timestamp_now_key()), json!(at)])
            .await?;
        match from_json_opt::<String>(method, value)? {
            Some(encoded) => {
                let bytes = decode_hex(&encoded)?;
                Ok(Some(u64::decode_all(&mut bytes.as_slice())?))
            }
            None => Ok(None),
        }
    }

    /// next usable nonce for an ss58 account
    pub async fn fetch_account_nonce(&self, account: &str) -> Result<u64> {
        let method = "system_accountNextIndex";
        let value = self.call(method, vec![json!(account)]).await?;
        from_json_opt(method, value)?
            .ok_or_else(|| ChainError::NotFound(format!("account {}", account)))
    }

    /// header, timestamp, decoded extrinsics and events of one block
    pub async fn fetch_block_info(&self, hash: BlockHash) -> Result<BlockInfo> {
        let runtime = self.runtime()?;
        let header = self.fetch_header(hash).await?;
        let timestamp = self.fetch_timestamp(hash).await?;

        let block = runtime.blocks().at(hash).await?;

        let mut extrinsics = Vec::new();
        for ext in block.extrinsics().await?.iter() {
            let ext = ext?;
            let signed = ext.signed_extensions();
            extrinsics.push(ExtrinsicInfo {
                section: ext.pallet_name()?.to_string(),
                method: ext.variant_name()?.to_string(),
                signer: ext.address_bytes().map(|b| format!("0x{}", hex::encode(b))),
                nonce: signed.as_ref().and_then(|s| s.nonce()),
                tip: signed.as_ref().and_then(|s| s.tip()),
            });
        }

        let mut events = Vec::new();
        for ev in block.events().await?.iter() {
            let ev = ev?;
            events.push(EventInfo {
                section: ev.pallet_name().to_string(),
                method: ev.variant_name().to_string(),
                phase: format!("{:?}", ev.phase()),
                data: ev.field_values()?.to_string(),
            });
        }

        Ok(BlockInfo {
            number: header.number,
            hash,
            parent_hash: header.parent_hash,
            timestamp,
            state_root: header.state_root,
            extrinsics_root: header.extrinsics_root,
            extrinsics,
            events,
        })
    }

    /// sign and submit `System::remark(payload)`, waiting for the first block
    /// that includes it.
    ///
    /// the nonce is read from the node up front; there is no resubmission if
    /// it turns out stale.
    pub async fn submit_remark(&self, seed: &str, payload: &[u8]) -> Result<RemarkReceipt> {
        let runtime = self.runtime()?;
        let signer = EthereumSigner::from_seed(seed)?;
        let account = account_hex(signer.account());

        let nonce = self.fetch_account_nonce(&account).await?;
        info!(
            "submitting remark ({} bytes) from {} with nonce {}",
            payload.len(),
            account,
            nonce
        );

        let tx = subxt::dynamic::tx(
            "System",
            "remark",
            vec![subxt::dynamic::Value::from_bytes(payload)],
        );
        let params = DefaultExtrinsicParamsBuilder::<GradiumConfig>::new()
            .nonce(nonce)
            .build();

        let mut progress = runtime
            .tx()
            .sign_and_submit_then_watch(&tx, &signer, params)
            .await?;

        while let Some(status) = progress.next().await {
            match status? {
                TxStatus::InBestBlock(in_block) => {
                    return settle(in_block, account, nonce, false).await;
                }
                TxStatus::InFinalizedBlock(in_block) => {
                    return settle(in_block, account, nonce, true).await;
                }
                TxStatus::Error { message }
                | TxStatus::Invalid { message }
                | TxStatus::Dropped { message } => {
                    warn!("remark rejected: {}", message);
                    return Err(ChainError::Transaction(message));
                }
                _ => debug!("remark pending"),
            }
        }

        Err(ChainError::Transaction(
            "status stream ended before inclusion".into(),
        ))
    }
}

/// check the dispatch outcome of an included remark
async fn settle(
    in_block: TxInBlock<GradiumConfig, OnlineClient<GradiumConfig>>,
    signer: String,
    nonce: u64,
    finalized: bool,
) -> Result<RemarkReceipt> {
    let block_hash = in_block.block_hash();
    let extrinsic_hash = in_block.extrinsic_hash();

    if let Err(e) = in_block.wait_for_success().await {
        warn!("remark failed in block {}: {}", hash_hex(&block_hash), e);
        return Err(e.into());
    }

    info!(
        "remark included in {} block {}",
        if finalized { "finalized" } else { "best" },
        hash_hex(&block_hash)
    );

    Ok(RemarkReceipt {
        signer,
        nonce,
        block_hash,
        extrinsic_hash,
        finalized,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::mock::MockTransport;
    use crate::types::AuthorityId;
    use parity_scale_codec::Encode;

    const HEIGHT: u32 = 20;
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn hash_of(number: u32) -> BlockHash {
        let mut bytes = [0u8; 32];
        bytes[..4].copy_from_slice(&number.to_be_bytes());
        bytes[31] = 0xaa;
        BlockHash::from(bytes)
    }

    fn number_of(hash: &BlockHash) -> u32 {
        u32::from_be_bytes(hash.as_bytes()[..4].try_into().unwrap())
    }

    fn header_json(number: u32) -> Value {
        json!({
            "parentHash": hash_of(number.saturating_sub(1)),
            "number": format!("0x{:x}", number),
            "stateRoot": BlockHash::repeat_byte(0x22),
            "extrinsicsRoot": BlockHash::repeat_byte(0x33),
            "digest": { "logs": [] }
        })
    }

    fn authorities_hex(ids: &[u8]) -> Value {
        let list: Vec<([u8; 32], u64)> = ids.iter().map(|b| ([*b; 32], 1u64)).collect();
        json!(format!("0x{}", hex::encode(list.encode())))
    }

    /// a chain of `HEIGHT + 1` blocks, finalized at the tip
    fn mock_chain() -> MockTransport {
        MockTransport::new()
            .with("chain_getFinalizedHead", json!(hash_of(HEIGHT)))
            .on("chain_getBlockHash", |params| {
                let n = params[0].as_u64().unwrap() as u32;
                Ok(if n <= HEIGHT { json!(hash_of(n)) } else { Value::Null })
            })
            .on("chain_getHeader", |params| {
                let hash: BlockHash = serde_json::from_value(params[0].clone()).unwrap();
                let n = number_of(&hash);
                Ok(if hash == hash_of(n) && n <= HEIGHT {
                    header_json(n)
                } else {
                    Value::Null
                })
            })
            .on("chain_getBlock", |params| {
                let hash: BlockHash = serde_json::from_value(params[0].clone()).unwrap();
                Ok(json!({
                    "block": {
                        "header": header_json(number_of(&hash)),
                        "extrinsics": ["0x280402000b", "0x0c00"]
                    },
                    "justifications": null
                }))
            })
            .with("state_getStorage", json!(format!("0x{}", hex::encode(3u64.encode()))))
            .with("state_call", authorities_hex(&[1, 2, 3]))
            .with("system_accountNextIndex", json!(4))
    }

    fn mock_client(mock: MockTransport) -> (ChainClient, Arc<MockTransport>) {
        let mock = Arc::new(mock);
        let client = ChainClient::from_transport(mock.clone(), ClientConfig::default());
        (client, mock)
    }

    #[tokio::test]
    async fn test_hash_then_header_roundtrip() {
        let (client, _) = mock_client(mock_chain());
        for n in [0, 1, 7, HEIGHT] {
            let hash = client.fetch_block_hash(n).await.unwrap();
            let header = client.fetch_header(hash).await.unwrap();
            assert_eq!(header.number, n);
        }
    }

    #[tokio::test]
    async fn test_missing_block_is_not_found() {
        let (client, _) = mock_client(mock_chain());
        assert!(matches!(
            client.fetch_block_hash(HEIGHT + 1).await,
            Err(ChainError::NotFound(_))
        ));
        assert!(matches!(
            client.fetch_header(BlockHash::repeat_byte(0xff)).await,
            Err(ChainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_block() {
        let (client, _) = mock_client(mock_chain());
        let head = client.fetch_finalized_head().await.unwrap();
        let block = client.fetch_block(head).await.unwrap();
        assert_eq!(block.header.number, HEIGHT);
        assert_eq!(block.extrinsics.len(), 2);
    }

    #[tokio::test]
    async fn test_query_headers_order_and_count() {
        let (client, _) = mock_client(mock_chain());
        let headers = client.query_headers(3, 9).await.unwrap();
        assert_eq!(headers.len(), 7);
        for (i, (hash, header)) in headers.iter().enumerate() {
            assert_eq!(header.number, 3 + i as u32);
            assert_eq!(*hash, hash_of(header.number));
        }

        let single = client.query_headers(5, 5).await.unwrap();
        assert_eq!(single.len(), 1);
    }

    #[tokio::test]
    async fn test_query_headers_empty_range_makes_no_calls() {
        let (client, mock) = mock_client(mock_chain());
        assert!(client.query_headers(9, 3).await.unwrap().is_empty());
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_query_headers_aborts_past_tip() {
        let (client, mock) = mock_client(mock_chain());
        let err = client.query_headers(HEIGHT - 1, HEIGHT + 2).await.unwrap_err();
        assert!(matches!(err, ChainError::NotFound(_)));
        // stopped at the first unresolved number
        assert_eq!(mock.calls_to("chain_getBlockHash").len(), 3);
    }

    #[tokio::test]
    async fn test_query_headers_huge_range_fails_on_first_gap() {
        let (client, mock) = mock_client(mock_chain());
        let err = client.query_headers(1, u32::MAX).await.unwrap_err();
        assert!(matches!(err, ChainError::NotFound(_)));
        // blocks 1..=HEIGHT resolve, HEIGHT + 1 does not
        assert_eq!(mock.calls_to("chain_getBlockHash").len(), HEIGHT as usize + 1);
    }

    #[tokio::test]
    async fn test_set_id_wire_shapes() {
        let raw = json!(format!("0x{}", hex::encode(42u64.encode())));
        for value in [json!(42), raw, json!("42")] {
            let (client, _) = mock_client(MockTransport::new().with("state_getStorage", value));
            let set_id = client.fetch_current_set_id(hash_of(1)).await.unwrap();
            assert_eq!(set_id, 42);
        }
    }

    #[tokio::test]
    async fn test_set_id_uses_fixed_key() {
        let (client, mock) = mock_client(mock_chain());
        client.fetch_current_set_id(hash_of(2)).await.unwrap();
        let calls = mock.calls_to("state_getStorage");
        assert_eq!(calls[0][0], json!(GRANDPA_CURRENT_SET_ID_KEY));
        assert_eq!(calls[0][1], json!(hash_of(2)));
    }

    #[tokio::test]
    async fn test_set_id_absent_and_garbage() {
        let (client, _) = mock_client(MockTransport::new().with("state_getStorage", Value::Null));
        assert!(matches!(
            client.fetch_current_set_id(hash_of(1)).await,
            Err(ChainError::NotFound(_))
        ));

        let (client, _) = mock_client(MockTransport::new().with("state_getStorage", json!("0x0102")));
        assert!(matches!(
            client.fetch_current_set_id(hash_of(1)).await,
            Err(ChainError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_authorities_calls_runtime_api() {
        let (client, mock) = mock_client(mock_chain());
        let authorities = client.fetch_authorities(hash_of(5)).await.unwrap();
        assert_eq!(authorities.len(), 3);
        assert_eq!(authorities[0].id, AuthorityId([1; 32]));

        let calls = mock.calls_to("state_call");
        assert_eq!(calls[0][0], json!("GrandpaApi_grandpa_authorities"));
        assert_eq!(calls[0][1], json!("0x"));
    }

    #[tokio::test]
    async fn test_fetch_authorities_malformed() {
        let (client, _) = mock_client(MockTransport::new().with("state_call", json!("0x0c0101")));
        assert!(matches!(
            client.fetch_authorities(hash_of(1)).await,
            Err(ChainError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_grandpa_state_at_finalized_head() {
        let (client, _) = mock_client(mock_chain());
        let state = client.fetch_grandpa_state_at(None).await.unwrap();
        assert_eq!(state.block_hash, hash_of(HEIGHT));
        assert_eq!(state.block_number, HEIGHT);
        assert_eq!(state.set_id, 3);
        assert_eq!(state.authorities.len(), 3);
        assert_eq!(state.total_weight(), 3);
        assert_eq!(state.slot_duration_ms, client.config().slot_duration_ms);
        assert_eq!(state.state_machine, client.config().state_machine);
    }

    #[tokio::test]
    async fn test_grandpa_state_at_explicit_hash_skips_head() {
        let (client, mock) = mock_client(mock_chain());
        let state = client.fetch_grandpa_state_at(Some(hash_of(4))).await.unwrap();
        assert_eq!(state.block_number, 4);
        assert!(mock.calls_to("chain_getFinalizedHead").is_empty());
    }

    #[tokio::test]
    async fn test_grandpa_state_rejects_duplicate_authorities() {
        let (client, _) = mock_client(mock_chain().with("state_call", authorities_hex(&[1, 2, 1])));
        let err = client.fetch_grandpa_state_at(None).await.unwrap_err();
        assert!(matches!(err, ChainError::Consistency(_)));
    }

    #[tokio::test]
    async fn test_grandpa_state_aborts_on_missing_set_id() {
        let (client, mock) = mock_client(mock_chain().with("state_getStorage", Value::Null));
        let err = client.fetch_grandpa_state_at(None).await.unwrap_err();
        assert!(matches!(err, ChainError::NotFound(_)));
        assert!(mock.calls_to("state_call").is_empty());
    }

    #[tokio::test]
    async fn test_outward_transfer_proof() {
        let mock = mock_chain().with(
            "state_getReadProof",
            json!({ "at": hash_of(HEIGHT), "proof": ["0x01aa", "0x02bb"] }),
        );
        let (client, mock) = mock_client(mock);
        let proof = client
            .fetch_state_proof_for_outward_transfers(&[1, 2, 3], hash_of(HEIGHT))
            .await
            .unwrap();
        assert_eq!(proof, vec!["0x01aa".to_string(), "0x02bb".to_string()]);

        let calls = mock.calls_to("state_getReadProof");
        assert_eq!(calls.len(), 1);
        let keys = calls[0][0].as_array().unwrap();
        assert_eq!(keys.len(), 3);
        for (i, key) in keys.iter().enumerate() {
            let key = key.as_str().unwrap();
            assert_eq!(key.len(), 66);
            assert!(key.ends_with(&format!("{:02x}", i + 1)));
        }
    }

    #[tokio::test]
    async fn test_timestamp() {
        let ts = 1_700_000_000_000u64;
        let (client, _) = mock_client(
            MockTransport::new().with("state_getStorage", json!(format!("0x{}", hex::encode(ts.encode())))),
        );
        assert_eq!(client.fetch_timestamp(hash_of(1)).await.unwrap(), Some(ts));

        let (client, _) = mock_client(MockTransport::new().with("state_getStorage", Value::Null));
        assert_eq!(client.fetch_timestamp(hash_of(1)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_account_nonce() {
        let (client, mock) = mock_client(mock_chain());
        let nonce = client
            .fetch_account_nonce("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266")
            .await
            .unwrap();
        assert_eq!(nonce, 4);
        assert_eq!(mock.calls_to("system_accountNextIndex").len(), 1);
    }

    #[tokio::test]
    async fn test_metadata_operations_need_connect() {
        let (client, _) = mock_client(mock_chain());
        assert!(client.genesis_hash().is_none());
        assert!(client.runtime_version().is_none());
        assert!(matches!(
            client.fetch_block_info(hash_of(1)).await,
            Err(ChainError::MetadataUnavailable)
        ));
        assert!(matches!(
            client.submit_remark(DEV_KEY, &[0, 1, 2]).await,
            Err(ChainError::MetadataUnavailable)
        ));
    }

    #[tokio::test]
    async fn test_rpc_errors_propagate() {
        let mock = MockTransport::new()
            .on("chain_getFinalizedHead", |_| Err(ChainError::Rpc("connection reset".into())));
        let (client, _) = mock_client(mock);
        assert!(matches!(
            client.fetch_grandpa_state_at(None).await,
            Err(ChainError::Rpc(_))
        ));
    }

    #[tokio::test]
    async fn test_hash_is_pure() {
        let (client, mock) = mock_client(MockTransport::new());
        let a = client.hash("Hello, Gradium!");
        let b = client.hash(b"Hello, Gradium!");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_close() {
        let (client, mock) = mock_client(mock_chain());
        client.close().await;
        // only the test's handle remains
        assert_eq!(Arc::strong_count(&mock), 1);
    }
}
