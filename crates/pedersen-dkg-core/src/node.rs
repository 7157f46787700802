//! DKG participant node
//!
//! A [`Node`] is built once through [`new_node`], which validates the second
//! generator, then the secret polynomials, then derives the public
//! commitments. Nothing about a node changes afterwards.

use crate::commitment::{self, SharePair};
use crate::curve::{encode_points, Curve, CurvePoint};
use crate::messages::PublishedCommitments;
use crate::polynomial::{ScalarPolynomial, SecretPolynomialPair};
use crate::Result;
use digest::DynDigest;
use ed25519_dalek::{SigningKey, VerifyingKey};
use num_bigint::BigInt;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Hash function handed to the proof and challenge layers
pub type HashFunction = Box<dyn DynDigest + Send + Sync>;

/// Everything a node is configured with apart from its secret polynomials
pub struct NodeParams {
    pub curve: Arc<dyn Curve>,
    pub hash: HashFunction,
    /// x coordinate of the second generator `H`
    pub g2x: BigInt,
    /// y coordinate of the second generator `H`
    pub g2y: BigInt,
    /// Parameter for the zero-knowledge proof layer
    pub zk_param: BigInt,
    /// How long a round waits for peer messages
    pub timeout: Duration,
    pub id: BigInt,
    /// Key used to authenticate this node's protocol messages
    pub identity_key: SigningKey,
}

/// A DKG participant with its secret polynomials and public commitments
pub struct Node {
    curve: Arc<dyn Curve>,
    hash: HashFunction,
    h: CurvePoint,
    zk_param: BigInt,
    timeout: Duration,
    id: BigInt,
    identity_key: SigningKey,
    polynomials: SecretPolynomialPair,
    public_key_part: CurvePoint,
    verification_points: Vec<CurvePoint>,
}

/// Validate the inputs and build a node.
///
/// The second generator is always checked before the polynomials, so a call
/// with both invalid reports `InvalidCurvePoint`.
#[instrument(skip_all, fields(curve = params.curve.name(), id = %params.id))]
pub fn new_node(
    params: NodeParams,
    poly1: ScalarPolynomial,
    poly2: ScalarPolynomial,
) -> Result<Node> {
    let NodeParams {
        curve,
        hash,
        g2x,
        g2y,
        zk_param,
        timeout,
        id,
        identity_key,
    } = params;

    let h = CurvePoint::validate(curve.as_ref(), &g2x, &g2y).map_err(|e| {
        debug!(error = %e, "rejected second generator");
        e
    })?;

    let polynomials = SecretPolynomialPair::validate(poly1, poly2, curve.order()).map_err(|e| {
        debug!(error = %e, "rejected secret polynomials");
        e
    })?;

    let commitments = commitment::commit(curve.as_ref(), curve.generator(), &h, &polynomials)?;

    info!(
        degree = polynomials.degree(),
        public_key_part = %commitments.public_key_part.to_hex(curve.as_ref()),
        "Node constructed"
    );

    Ok(Node {
        curve,
        hash,
        h,
        zk_param,
        timeout,
        id,
        identity_key,
        polynomials,
        public_key_part: commitments.public_key_part,
        verification_points: commitments.verification_points,
    })
}

impl Node {
    /// Same as [`new_node`]
    pub fn new(params: NodeParams, poly1: ScalarPolynomial, poly2: ScalarPolynomial) -> Result<Self> {
        new_node(params, poly1, poly2)
    }

    /// This node's contribution `poly1[0]·G` to the joint public key
    pub fn public_key_part(&self) -> (&BigInt, &BigInt) {
        self.public_key_part.coordinates()
    }

    pub fn public_key_point(&self) -> &CurvePoint {
        &self.public_key_part
    }

    /// Commitments `poly1[j]·G + poly2[j]·H` in ascending coefficient order
    pub fn verification_points(&self) -> &[CurvePoint] {
        &self.verification_points
    }

    /// Concatenated canonical encodings of the verification points
    pub fn encoded_verification_points(&self) -> Vec<u8> {
        encode_points(self.curve.as_ref(), &self.verification_points)
    }

    pub fn curve(&self) -> &dyn Curve {
        self.curve.as_ref()
    }

    pub fn second_generator(&self) -> &CurvePoint {
        &self.h
    }

    pub fn hash_function(&self) -> &(dyn DynDigest + Send + Sync) {
        self.hash.as_ref()
    }

    pub fn zk_param(&self) -> &BigInt {
        &self.zk_param
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn id(&self) -> &BigInt {
        &self.id
    }

    pub fn identity_public_key(&self) -> VerifyingKey {
        self.identity_key.verifying_key()
    }

    /// Polynomial degree, which is the threshold minus one
    pub fn degree(&self) -> usize {
        self.polynomials.degree()
    }

    /// Share pair destined for the participant with the given index
    pub fn share_for(&self, recipient: &BigInt) -> Result<SharePair> {
        commitment::evaluate_shares(&self.polynomials, recipient, self.curve.order())
    }

    /// Public artifacts in their transmissible form
    pub fn published(&self) -> PublishedCommitments {
        PublishedCommitments::from_node(self)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("curve", &self.curve.name())
            .field("id", &self.id)
            .field("h", &self.h)
            .field("timeout", &self.timeout)
            .field("degree", &self.polynomials.degree())
            .field("public_key_part", &self.public_key_part)
            .finish_non_exhaustive()
    }
}
