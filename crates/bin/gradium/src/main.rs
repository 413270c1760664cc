//! Gradium CLI - chain query and report tool
//!
//! Commands:
//! - report: full walk over the finalized head (default)
//! - head / header / block-hash / block: single queries
//! - grandpa: authority set snapshot
//! - headers: header range
//! - proof: read proof for outward transfer nonces
//! - hash: sha3-256 of text
//! - remark: submit a System::remark

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use gradium_client::{
    hash_hex, parse_block_hash, BlockHash, BlockInfo, ChainClient, ClientConfig,
    DEFAULT_ENDPOINT, DEFAULT_SLOT_DURATION_MS, DEFAULT_STATE_MACHINE,
};
use tracing::{error, info};

/// Text hashed by the report
const REPORT_HASH_INPUT: &str = "Hello, Gradium!";

/// Default remark payload
const DEFAULT_REMARK: [u8; 3] = [0, 1, 2];

#[derive(Parser)]
#[command(name = "gradium")]
#[command(about = "Gradium chain query and report CLI", long_about = None)]
struct Cli {
    /// WebSocket RPC endpoint
    #[arg(long, env = "GRADIUM_WS", default_value = DEFAULT_ENDPOINT)]
    url: String,

    /// Signing key: 0x private key, or BIP39 mnemonic with optional /m/44'/60'/.. path
    #[arg(long, env = "GRADIUM_SEED", hide_env_values = true)]
    seed: Option<String>,

    /// Slot duration in milliseconds reported with grandpa snapshots
    #[arg(long, default_value_t = DEFAULT_SLOT_DURATION_MS)]
    slot_duration: u64,

    /// State machine identifier reported with grandpa snapshots
    #[arg(long, default_value = DEFAULT_STATE_MACHINE)]
    state_machine: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk the finalized head: header, block, grandpa, hash, block info
    Report {
        /// Also submit a test remark (requires --seed)
        #[arg(long)]
        remark: bool,
    },

    /// Latest finalized block hash
    Head,

    /// Header for a block hash
    Header {
        hash: String,
    },

    /// Canonical hash for a block number
    BlockHash {
        number: u32,
    },

    /// Block body for a block hash
    Block {
        hash: String,
    },

    /// GRANDPA set id and authorities
    Grandpa {
        /// Block hash (default: finalized head)
        #[arg(long)]
        at: Option<String>,
    },

    /// Headers for an inclusive block number range
    Headers {
        #[arg(long)]
        start: u32,
        #[arg(long)]
        end: u32,
    },

    /// Read proof for outward transfer nonces
    Proof {
        /// Comma separated nonces
        #[arg(long, value_delimiter = ',', required = true)]
        nonces: Vec<u64>,
        /// Block hash (default: finalized head)
        #[arg(long)]
        at: Option<String>,
    },

    /// SHA3-256 of the given text
    Hash {
        data: String,
    },

    /// Submit a System::remark
    Remark {
        /// Payload as 0x-hex or plain text (default: 0x000102)
        #[arg(long)]
        payload: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gradium=info".parse()?)
                .add_directive("gradium_client=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let status = exit_status(run(cli).await);
    if status != 0 {
        std::process::exit(status);
    }
    Ok(())
}

/// log a failed run once and map it to a process exit status
fn exit_status(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // pure commands never touch the node
    if let Some(Commands::Hash { data }) = &cli.command {
        println!("{}", gradium_client::sha3_256_hex(data));
        return Ok(());
    }

    let config = ClientConfig::with_endpoint(&cli.url)
        .slot_duration_ms(cli.slot_duration)
        .state_machine(cli.state_machine.clone());

    let client = ChainClient::connect(config)
        .await
        .with_context(|| format!("connecting to {}", cli.url))?;

    let result = dispatch(&client, &cli).await;
    client.close().await;
    result
}

async fn dispatch(client: &ChainClient, cli: &Cli) -> Result<()> {
    match cli.command.as_ref().unwrap_or(&Commands::Report { remark: false }) {
        Commands::Report { remark } => {
            cmd_report(client).await?;
            if *remark {
                let seed = cli.seed.as_deref().ok_or_else(|| anyhow!("--seed required for remark"))?;
                cmd_remark(client, seed, None).await?;
            }
        }
        Commands::Head => {
            let head = client.fetch_finalized_head().await?;
            println!("{}", hash_hex(&head));
        }
        Commands::Header { hash } => {
            let header = client.fetch_header(parse_block_hash(hash)?).await?;
            println!("{}", serde_json::to_string_pretty(&header)?);
        }
        Commands::BlockHash { number } => {
            let hash = client.fetch_block_hash(*number).await?;
            println!("{}", hash_hex(&hash));
        }
        Commands::Block { hash } => {
            let block = client.fetch_block(parse_block_hash(hash)?).await?;
            println!("{}", serde_json::to_string_pretty(&block)?);
        }
        Commands::Grandpa { at } => {
            let at = at.as_deref().map(parse_block_hash).transpose()?;
            let state = client.fetch_grandpa_state_at(at).await?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Commands::Headers { start, end } => {
            for (hash, header) in client.query_headers(*start, *end).await? {
                println!("#{} {}", header.number, hash_hex(&hash));
            }
        }
        Commands::Proof { nonces, at } => {
            let at = resolve_at(client, at.as_deref()).await?;
            let proof = client
                .fetch_state_proof_for_outward_transfers(nonces, at)
                .await?;
            println!("Proof at {} ({} nodes):", hash_hex(&at), proof.len());
            for node in proof {
                println!("  {}", node);
            }
        }
        Commands::Hash { data } => {
            println!("{}", client.hash(data));
        }
        Commands::Remark { payload } => {
            let seed = cli.seed.as_deref().ok_or_else(|| anyhow!("--seed required for remark"))?;
            let payload = payload.as_deref().map(parse_payload).transpose()?;
            cmd_remark(client, seed, payload).await?;
        }
    }

    Ok(())
}

async fn resolve_at(client: &ChainClient, at: Option<&str>) -> Result<BlockHash> {
    match at {
        Some(hash) => Ok(parse_block_hash(hash)?),
        None => Ok(client.fetch_finalized_head().await?),
    }
}

async fn cmd_report(client: &ChainClient) -> Result<()> {
    info!("running report against {}", client.config().endpoint);

    // 1. finalized head
    let head = client
        .fetch_finalized_head()
        .await
        .context("fetching finalized head")?;
    println!("Latest finalized block hash: {}", hash_hex(&head));

    // 2. header
    let header = client.fetch_header(head).await.context("fetching header")?;
    println!("Block number: {}", header.number);
    println!("Parent hash: {}", hash_hex(&header.parent_hash));
    println!("State root: {}", hash_hex(&header.state_root));

    // 3. hash by number must round-trip to the head
    let by_number = client
        .fetch_block_hash(header.number)
        .await
        .context("fetching block hash by number")?;
    println!("Block hash for #{}: {}", header.number, hash_hex(&by_number));
    if by_number != head {
        return Err(anyhow!(
            "hash for #{} does not match finalized head",
            header.number
        ));
    }

    // 4. raw block
    let block = client.fetch_block(head).await.context("fetching block")?;
    println!("Block extrinsics count: {}", block.extrinsics.len());

    // 5. set id
    let set_id = client
        .fetch_current_set_id(head)
        .await
        .context("fetching grandpa set id")?;
    println!("Current set ID: {}", set_id);

    // 6. authorities
    let authorities = client
        .fetch_authorities(head)
        .await
        .context("fetching grandpa authorities")?;
    println!("Number of authorities: {}", authorities.len());
    for authority in &authorities {
        println!("  {} (weight {})", authority.id.to_ss58(), authority.weight);
    }

    // 7. hashing
    println!("Input: {}", REPORT_HASH_INPUT);
    println!("SHA3 hash: {}", client.hash(REPORT_HASH_INPUT));

    // 8. detailed block info
    let info = client
        .fetch_block_info(head)
        .await
        .context("fetching block info")?;
    print_block_info(&info);

    Ok(())
}

fn print_block_info(info: &BlockInfo) {
    println!();
    println!("Block Information:");
    println!("-------------------");
    println!("Block Number: {}", info.number);
    println!("Block Hash: {}", hash_hex(&info.hash));
    println!("Parent Hash: {}", hash_hex(&info.parent_hash));
    match info.timestamp {
        Some(ms) => println!("Timestamp: {} ms", ms),
        None => println!("Timestamp: N/A"),
    }
    println!("State Root: {}", hash_hex(&info.state_root));
    println!("Extrinsics Root: {}", hash_hex(&info.extrinsics_root));
    println!();
    println!("Extrinsics Count: {}", info.extrinsics.len());
    println!("Events Count: {}", info.events.len());

    println!();
    println!("First 3 Extrinsics:");
    for (i, ext) in info.extrinsics.iter().take(3).enumerate() {
        println!();
        println!("Extrinsic #{}:", i + 1);
        println!("  Section: {}", ext.section);
        println!("  Method: {}", ext.method);
        println!("  Signer: {}", ext.signer.as_deref().unwrap_or("None"));
        println!(
            "  Nonce: {}",
            ext.nonce.map(|n| n.to_string()).unwrap_or_else(|| "N/A".into())
        );
        println!("  Tip: {}", ext.tip.unwrap_or(0));
    }

    println!();
    println!("First 3 Events:");
    for (i, event) in info.events.iter().take(3).enumerate() {
        println!();
        println!("Event #{}:", i + 1);
        println!("  Section: {}", event.section);
        println!("  Method: {}", event.method);
        println!("  Phase: {}", event.phase);
        println!("  Data: {}", event.data);
    }
}

async fn cmd_remark(client: &ChainClient, seed: &str, payload: Option<Vec<u8>>) -> Result<()> {
    let payload = payload.unwrap_or_else(|| DEFAULT_REMARK.to_vec());
    println!("Sending remark ({} bytes)...", payload.len());

    let receipt = client
        .submit_remark(seed, &payload)
        .await
        .context("submitting remark")?;

    println!("Signer: {} (nonce {})", receipt.signer, receipt.nonce);
    println!("Extrinsic hash: {}", hash_hex(&receipt.extrinsic_hash));
    println!(
        "Included in {} block: {}",
        if receipt.finalized { "finalized" } else { "best" },
        hash_hex(&receipt.block_hash)
    );

    Ok(())
}

/// `0x`-prefixed input is hex, anything else is taken as utf-8 text
fn parse_payload(input: &str) -> Result<Vec<u8>> {
    match input.strip_prefix("0x") {
        Some(digits) => hex::decode(digits).context("invalid hex payload"),
        None => Ok(input.as_bytes().to_vec()),
    }
}
