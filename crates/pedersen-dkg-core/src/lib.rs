//! # Pedersen DKG Core
//!
//! Participant-side building blocks for threshold distributed key generation
//! with Pedersen verifiable secret sharing.
//!
//! This crate provides:
//! - Validation of the second generator `H` and of the two secret polynomials
//! - The node's public-key contribution `poly1[0]·G`
//! - Verification points `poly1[j]·G + poly2[j]·H` for every coefficient
//! - Share evaluation and verification against published commitments
//!
//! ## Example
//!
//! ```rust,ignore
//! use pedersen_dkg_core::{new_node, NodeParams, ScalarPolynomial};
//!
//! let node = new_node(params, poly1, poly2)?;
//! let (x, y) = node.public_key_part();
//! let commitments = node.published().to_json()?;
//! ```

pub mod commitment;
pub mod config;
pub mod curve;
pub mod encoding;
pub mod error;
pub mod messages;
pub mod node;
pub mod polynomial;

pub use commitment::{verify_share, Commitments, SharePair};
pub use config::{CurveName, HashAlgorithm, NodeConfig};
pub use curve::{Curve, CurvePoint};
pub use error::{Error, Result};
pub use messages::{DecodedCommitments, PublishedCommitments};
pub use node::{new_node, Node, NodeParams};
pub use polynomial::{ScalarPolynomial, SecretPolynomialPair};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Round timeout used when a configuration does not set one
pub const DEFAULT_ROUND_TIMEOUT_MS: u64 = 30_000;
