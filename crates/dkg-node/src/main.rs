//! DKG Node CLI
//!
//! Command-line interface for a single DKG participant:
//! - Generate a node configuration with fresh secret polynomials
//! - Build the node and publish its commitments
//! - Evaluate shares for peers
//! - Verify a received share against published commitments

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use clap::{Parser, Subcommand};
use pedersen_dkg_core::encoding::parse_bigint;
use pedersen_dkg_core::{
    verify_share, CurveName, CurvePoint, HashAlgorithm, NodeConfig, PublishedCommitments,
    ScalarPolynomial, SharePair, DEFAULT_ROUND_TIMEOUT_MS,
};
use rand::rngs::OsRng;
use std::path::{Path, PathBuf};
use tracing::{info, Level};

/// DKG Node - Pedersen VSS participant
#[derive(Parser)]
#[command(name = "dkg-node")]
#[command(about = "Threshold DKG participant node")]
#[command(version)]
struct Cli {
    /// Node configuration file
    #[arg(short, long, env = "NODE_CONFIG", default_value = "./node.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a configuration with random secret polynomials
    Generate {
        /// Curve name (p256 or secp256k1)
        #[arg(long, default_value = "p256")]
        curve: String,

        /// Second generator H, hex SEC1 uncompressed
        #[arg(long)]
        g2: String,

        /// Threshold (polynomials get this many coefficients)
        #[arg(short, long)]
        t: usize,

        /// Node id
        #[arg(long)]
        id: String,

        /// Round timeout in milliseconds
        #[arg(long, default_value_t = DEFAULT_ROUND_TIMEOUT_MS)]
        timeout_ms: u64,
    },

    /// Build the node and print its commitments
    Commit {
        /// Write the published commitments JSON here
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Evaluate the share pair for a recipient
    Share {
        /// Recipient index (decimal or 0x hex)
        #[arg(short, long)]
        recipient: String,

        /// Write the share pair JSON here
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Verify a share pair against published commitments
    Verify {
        /// Published commitments JSON
        #[arg(long)]
        commitments: PathBuf,

        /// Share pair JSON
        #[arg(long)]
        share: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            ref curve,
            ref g2,
            t,
            ref id,
            timeout_ms,
        } => run_generate(&cli, curve, g2, t, id, timeout_ms),
        Commands::Commit { ref out } => run_commit(&cli, out.as_deref()),
        Commands::Share {
            ref recipient,
            ref out,
        } => run_share(&cli, recipient, out.as_deref()),
        Commands::Verify {
            ref commitments,
            ref share,
        } => run_verify(commitments, share),
    }
}

fn run_generate(
    cli: &Cli,
    curve_name: &str,
    g2: &str,
    t: usize,
    id: &str,
    timeout_ms: u64,
) -> Result<()> {
    anyhow::ensure!(t >= 1, "threshold must be at least 1");

    let curve_name: CurveName = curve_name.parse()?;
    let curve = curve_name.curve();
    let h = CurvePoint::from_hex(curve.as_ref(), g2).context("invalid second generator")?;

    let mut rng = OsRng;
    let poly1 = ScalarPolynomial::random(t, curve.order(), &mut rng);
    let poly2 = ScalarPolynomial::random(t, curve.order(), &mut rng);
    let seed: [u8; 32] = rand::random();

    let config = NodeConfig {
        curve: curve_name,
        hash: HashAlgorithm::default(),
        g2x: h.x().clone(),
        g2y: h.y().clone(),
        zk_param: Default::default(),
        timeout_ms,
        id: parse_bigint(id)?,
        identity_key: hex::encode(seed),
        poly1: poly1.coefficients().to_vec(),
        poly2: poly2.coefficients().to_vec(),
    };

    // Fail before writing anything unusable
    config.build()?;

    std::fs::write(&cli.config, config.to_json()?)?;

    info!(
        curve = %curve_name,
        threshold = t,
        path = ?cli.config,
        "Configuration generated"
    );

    Ok(())
}

fn run_commit(cli: &Cli, out: Option<&Path>) -> Result<()> {
    let node = load_config(cli)?.build()?;
    let curve = node.curve();

    println!("Public Key Part: {}", node.public_key_point().to_hex(curve));
    println!("Verification Points:");
    for (index, point) in node.verification_points().iter().enumerate() {
        println!("  [{}] {}", index, point.to_hex(curve));
    }
    println!(
        "Encoded (base64): {}",
        STANDARD.encode(node.encoded_verification_points())
    );

    if let Some(path) = out {
        std::fs::write(path, node.published().to_json()?)?;
        info!(path = ?path, "Published commitments saved");
    }

    Ok(())
}

fn run_share(cli: &Cli, recipient: &str, out: Option<&Path>) -> Result<()> {
    let node = load_config(cli)?.build()?;
    let share = node.share_for(&parse_bigint(recipient)?)?;
    let json = serde_json::to_string_pretty(&share)?;

    match out {
        Some(path) => {
            std::fs::write(path, json)?;
            info!(recipient = recipient, path = ?path, "Share saved");
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn run_verify(commitments_path: &Path, share_path: &Path) -> Result<()> {
    let published = PublishedCommitments::from_json(
        &std::fs::read_to_string(commitments_path)
            .with_context(|| format!("reading {}", commitments_path.display()))?,
    )?;
    let share: SharePair = serde_json::from_str(
        &std::fs::read_to_string(share_path)
            .with_context(|| format!("reading {}", share_path.display()))?,
    )?;

    let curve = published.curve.parse::<CurveName>()?.curve();
    let decoded = published.decode(curve.as_ref())?;

    verify_share(
        curve.as_ref(),
        &decoded.second_generator,
        &decoded.verification_points,
        &share,
    )?;

    info!(
        sender = %decoded.node_id,
        index = %share.index,
        "Share verified"
    );
    println!("Share OK");

    Ok(())
}

fn load_config(cli: &Cli) -> Result<NodeConfig> {
    let json = std::fs::read_to_string(&cli.config)
        .with_context(|| format!("reading {}", cli.config.display()))?;
    Ok(NodeConfig::from_json(&json)?)
}
