//! Treasury Commit CLI - build, publish and check balance commitments
//!
//! This tool provides commands for:
//! - Computing the Merkle root of a set of balance attestations
//! - Building inclusion proofs for a single address
//! - Verifying an attestation against a published root
//! - Snapshotting live address balances from an Esplora API
//! - Generating sample attestations and timing tree construction
//!
//! Machine-readable results go to stdout; progress is logged to stderr and
//! can be tuned with `RUST_LOG`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use treasury_client::{BalanceSnapshot, EsploraClient, EsploraConfig, BLOCKSTREAM_API};
use treasury_merkle::{verify, BalanceMerkleTree, InclusionProof};
use treasury_primitives::BalanceAttestation;

/// Bech32 data characters, used for sample addresses
const BECH32_CHARSET: &[u8] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Treasury Commit - Merkle commitments to Bitcoin treasury balances
#[derive(Parser)]
#[command(name = "treasury-commit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build and verify Merkle commitments to Bitcoin address balances", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the commitment root of an attestation set
    Root {
        /// Attestations JSON (array or snapshot document), or - for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,
    },

    /// Build an inclusion proof for one address
    Proof {
        /// Attestations JSON (array or snapshot document), or - for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Address to prove
        #[arg(short, long)]
        address: String,

        /// Output file for the proof (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Verify an attestation against a root
    Verify {
        /// Attested address
        #[arg(short, long)]
        address: String,

        /// Attested balance in satoshis
        #[arg(short, long)]
        balance: u64,

        /// Attestation timestamp (seconds since the Unix epoch)
        #[arg(short, long)]
        timestamp: u64,

        /// Published root (hex)
        #[arg(short, long)]
        root: String,

        /// Path to the proof JSON file (or - for stdin)
        #[arg(short = 'f', long)]
        proof: PathBuf,
    },

    /// Fetch live balances and commit to them
    Snapshot {
        /// Address to include (repeatable)
        #[arg(short, long = "address", required = true)]
        addresses: Vec<String>,

        /// Esplora API base URL
        #[arg(long, env = "TREASURY_ESPLORA_URL", default_value = BLOCKSTREAM_API)]
        esplora_url: String,

        /// Only count confirmed funds
        #[arg(long)]
        no_mempool: bool,

        /// Request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout_secs: u64,

        /// Timestamp to attest (default: now)
        #[arg(long)]
        timestamp: Option<u64>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate sample attestations for testing
    #[command(name = "gen-attestations")]
    GenerateAttestations {
        /// Number of attestations
        #[arg(short = 'n', long, default_value = "8")]
        count: usize,

        /// RNG seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,

        /// Timestamp to attest (default: now)
        #[arg(long)]
        timestamp: Option<u64>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Time tree, proof and verification over random attestation sets
    Benchmark {
        /// Number of rounds
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// Attestations per round
        #[arg(short, long, default_value = "1000")]
        leaves: usize,
    },
}

/// Input files hold either a bare attestation list or a snapshot document
#[derive(Deserialize)]
#[serde(untagged)]
enum AttestationInput {
    List(Vec<BalanceAttestation>),
    Snapshot(BalanceSnapshot),
}

impl AttestationInput {
    fn into_attestations(self) -> Vec<BalanceAttestation> {
        match self {
            AttestationInput::List(list) => list,
            AttestationInput::Snapshot(snapshot) => {
                if !snapshot.is_consistent() {
                    tracing::warn!(
                        root = %snapshot.root,
                        "Snapshot root does not match its attestations; using the attestations"
                    );
                }
                snapshot.attestations
            }
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Root { input } => root(&input),

        Commands::Proof {
            input,
            address,
            output,
        } => proof(&input, &address, output),

        Commands::Verify {
            address,
            balance,
            timestamp,
            root,
            proof,
        } => verify_attestation(&address, balance, timestamp, &root, &proof),

        Commands::Snapshot {
            addresses,
            esplora_url,
            no_mempool,
            timeout_secs,
            timestamp,
            output,
        } => {
            let config = EsploraConfig::local(&esplora_url)
                .with_mempool(!no_mempool)
                .with_timeout(Duration::from_secs(timeout_secs));
            snapshot(config, addresses, timestamp, output)
        }

        Commands::GenerateAttestations {
            count,
            seed,
            timestamp,
            output,
        } => generate_attestations(count, seed, timestamp, output),

        Commands::Benchmark { count, leaves } => benchmark(count, leaves),
    }
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_source(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }
}

fn load_attestations(path: &Path) -> Result<Vec<BalanceAttestation>> {
    let raw = read_source(path)?;
    let input: AttestationInput = serde_json::from_str(&raw).with_context(|| {
        format!(
            "Expected an attestation array or snapshot document in {}",
            path.display()
        )
    })?;
    Ok(input.into_attestations())
}

fn write_output(contents: &str, output_path: Option<PathBuf>, what: &str) -> Result<()> {
    if let Some(path) = output_path {
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;
        tracing::info!("{} written to: {}", what, path.display());
    } else {
        println!("{}", contents);
    }
    Ok(())
}

fn unix_now() -> Result<u64> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock is before the Unix epoch")?
        .as_secs())
}

fn root(input: &Path) -> Result<()> {
    let attestations = load_attestations(input)?;
    let tree = BalanceMerkleTree::from_attestations(&attestations);
    tracing::info!(leaves = tree.num_leaves(), depth = tree.depth(), "Tree built");
    println!("{}", tree.root());
    Ok(())
}

fn proof(input: &Path, address: &str, output_path: Option<PathBuf>) -> Result<()> {
    let attestations = load_attestations(input)?;
    let tree = BalanceMerkleTree::from_attestations(&attestations);
    let proof = tree
        .proof_for_address(address)
        .with_context(|| format!("Cannot build proof for {}", address))?;

    tracing::info!(
        address,
        leaf_index = proof.leaf_index,
        steps = proof.len(),
        root = %tree.root(),
        "Proof built"
    );

    let json = serde_json::to_string_pretty(&proof)?;
    write_output(&json, output_path, "Proof")
}

fn verify_attestation(
    address: &str,
    balance: u64,
    timestamp: u64,
    root: &str,
    proof_path: &Path,
) -> Result<()> {
    let raw = read_source(proof_path)?;
    let proof: InclusionProof = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid proof JSON in {}", proof_path.display()))?;

    let start = Instant::now();
    let valid = verify(address, balance, timestamp, root, &proof)
        .context("Proof cannot be checked")?;
    let elapsed = start.elapsed();

    if valid {
        tracing::info!("Attestation VALID (verified in {:?})", elapsed);
        println!("VALID");
        Ok(())
    } else {
        tracing::warn!(address, balance, timestamp, "Attestation does not match root");
        println!("INVALID");
        std::process::exit(1);
    }
}

fn snapshot(
    config: EsploraConfig,
    addresses: Vec<String>,
    timestamp: Option<u64>,
    output_path: Option<PathBuf>,
) -> Result<()> {
    let timestamp = match timestamp {
        Some(ts) => ts,
        None => unix_now()?,
    };
    tracing::info!(
        addresses = addresses.len(),
        esplora = %config.base_url,
        include_mempool = config.include_mempool,
        "Fetching balances"
    );

    let client = EsploraClient::try_new(config)?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let snapshot = runtime.block_on(client.snapshot(&addresses, timestamp))?;

    let json = serde_json::to_string_pretty(&snapshot)?;
    write_output(&json, output_path, "Snapshot")
}

fn random_address(rng: &mut StdRng) -> String {
    let data: String = (0..38)
        .map(|_| BECH32_CHARSET[rng.gen_range(0..BECH32_CHARSET.len())] as char)
        .collect();
    format!("bc1q{}", data)
}

fn random_attestations(rng: &mut StdRng, count: usize, timestamp: u64) -> Vec<BalanceAttestation> {
    (0..count)
        .map(|_| {
            BalanceAttestation::new(
                random_address(rng),
                rng.gen_range(0..=10 * 100_000_000),
                timestamp,
            )
        })
        .collect()
}

fn generate_attestations(
    count: usize,
    seed: Option<u64>,
    timestamp: Option<u64>,
    output_path: Option<PathBuf>,
) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let timestamp = match timestamp {
        Some(ts) => ts,
        None => unix_now()?,
    };

    let attestations = random_attestations(&mut rng, count, timestamp);
    let json = serde_json::to_string_pretty(&attestations)?;
    write_output(&json, output_path, "Attestations")
}

fn benchmark(count: usize, leaves: usize) -> Result<()> {
    if count == 0 || leaves == 0 {
        anyhow::bail!("count and leaves must both be at least 1");
    }

    println!("Treasury Commit Benchmark");
    println!("=========================");
    println!("  Rounds: {}", count);
    println!("  Attestations per round: {}", leaves);
    println!();

    let mut rng = StdRng::seed_from_u64(0);
    let mut build_times: Vec<Duration> = Vec::with_capacity(count);
    let mut proof_times: Vec<Duration> = Vec::with_capacity(count);
    let mut verify_times: Vec<Duration> = Vec::with_capacity(count);

    for round in 0..count {
        let attestations = random_attestations(&mut rng, leaves, 1_700_000_000 + round as u64);

        let start = Instant::now();
        let tree = BalanceMerkleTree::from_attestations(&attestations);
        build_times.push(start.elapsed());

        let index = rng.gen_range(0..tree.num_leaves());
        let start = Instant::now();
        let proof = tree.proof(index)?;
        proof_times.push(start.elapsed());

        let target = &tree.attestations()[index];
        let root = tree.root().to_hex();
        let start = Instant::now();
        let valid = verify(&target.address, target.balance, target.timestamp, &root, &proof)?;
        verify_times.push(start.elapsed());

        if !valid {
            anyhow::bail!("Proof {} was invalid!", round);
        }
    }

    println!("Results:");
    println!("--------");
    for (label, times) in [
        ("Tree Construction", &build_times),
        ("Proof Extraction", &proof_times),
        ("Verification", &verify_times),
    ] {
        let avg = average(times)?;
        let min = times.iter().min().copied().unwrap_or_default();
        let max = times.iter().max().copied().unwrap_or_default();
        println!("{}:", label);
        println!("  Average: {:?}", avg);
        println!("  Min: {:?}", min);
        println!("  Max: {:?}", max);
        println!();
    }

    Ok(())
}

fn average(times: &[Duration]) -> Result<Duration> {
    let rounds = u32::try_from(times.len()).context("too many benchmark rounds")?;
    times
        .iter()
        .sum::<Duration>()
        .checked_div(rounds)
        .context("no benchmark rounds recorded")
}
