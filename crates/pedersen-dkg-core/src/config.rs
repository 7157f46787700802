//! Node configuration file format

use crate::curve::{p256, secp256k1, Curve};
use crate::encoding::{bigint_str, bigint_vec};
use crate::node::{new_node, HashFunction, Node, NodeParams};
use crate::polynomial::ScalarPolynomial;
use crate::{Error, Result, DEFAULT_ROUND_TIMEOUT_MS};
use ed25519_dalek::SigningKey;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use sha2::{Sha256, Sha512, Sha512_256};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Supported curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveName {
    P256,
    Secp256k1,
}

impl CurveName {
    pub fn curve(self) -> Arc<dyn Curve> {
        match self {
            CurveName::P256 => Arc::new(p256()),
            CurveName::Secp256k1 => Arc::new(secp256k1()),
        }
    }
}

impl FromStr for CurveName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "p256" | "p-256" | "secp256r1" => Ok(CurveName::P256),
            "secp256k1" => Ok(CurveName::Secp256k1),
            other => Err(Error::InvalidConfig(format!("unknown curve: {}", other))),
        }
    }
}

impl fmt::Display for CurveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveName::P256 => f.write_str("p256"),
            CurveName::Secp256k1 => f.write_str("secp256k1"),
        }
    }
}

/// Supported hash functions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    Sha256,
    Sha512,
    #[default]
    Sha512_256,
}

impl HashAlgorithm {
    pub fn hasher(self) -> HashFunction {
        match self {
            HashAlgorithm::Sha256 => Box::new(Sha256::default()),
            HashAlgorithm::Sha512 => Box::new(Sha512::default()),
            HashAlgorithm::Sha512_256 => Box::new(Sha512_256::default()),
        }
    }
}

fn default_timeout_ms() -> u64 {
    DEFAULT_ROUND_TIMEOUT_MS
}

/// Serialized node configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    pub curve: CurveName,
    #[serde(default)]
    pub hash: HashAlgorithm,
    /// Second generator `H`
    #[serde(with = "bigint_str")]
    pub g2x: BigInt,
    #[serde(with = "bigint_str")]
    pub g2y: BigInt,
    #[serde(with = "bigint_str")]
    pub zk_param: BigInt,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(with = "bigint_str")]
    pub id: BigInt,
    /// Hex-encoded 32-byte Ed25519 seed
    pub identity_key: String,
    #[serde(with = "bigint_vec")]
    pub poly1: Vec<BigInt>,
    #[serde(with = "bigint_vec")]
    pub poly2: Vec<BigInt>,
}

impl NodeConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Deserialization(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn identity_key(&self) -> Result<SigningKey> {
        let seed: [u8; 32] = hex::decode(&self.identity_key)
            .map_err(|e| Error::InvalidConfig(format!("identity key: {}", e)))?
            .try_into()
            .map_err(|_| Error::InvalidConfig("identity key must be 32 bytes".into()))?;
        Ok(SigningKey::from_bytes(&seed))
    }

    /// Resolve names and run the node factory
    pub fn build(&self) -> Result<Node> {
        let params = NodeParams {
            curve: self.curve.curve(),
            hash: self.hash.hasher(),
            g2x: self.g2x.clone(),
            g2y: self.g2y.clone(),
            zk_param: self.zk_param.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
            id: self.id.clone(),
            identity_key: self.identity_key()?,
        };

        new_node(
            params,
            ScalarPolynomial::new(self.poly1.clone()),
            ScalarPolynomial::new(self.poly2.clone()),
        )
    }
}
