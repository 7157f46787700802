//! Published commitment message
//!
//! What a node broadcasts after construction. Points travel as hex SEC1
//! encodings and are re-validated on decode.

use crate::curve::{Curve, CurvePoint};
use crate::encoding::bigint_str;
use crate::node::Node;
use crate::{Error, Result};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// Broadcast payload: public-key contribution and verification points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedCommitments {
    /// Curve name, e.g. `P-256`
    pub curve: String,
    /// Sender node id
    #[serde(with = "bigint_str")]
    pub node_id: BigInt,
    /// Second generator `H` the commitments were made under
    pub second_generator: String,
    /// `poly1[0]·G`
    pub public_key_part: String,
    /// Pedersen commitments, ascending coefficient index
    pub verification_points: Vec<String>,
}

/// Published commitments after decoding and validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCommitments {
    pub node_id: BigInt,
    pub second_generator: CurvePoint,
    pub public_key_part: CurvePoint,
    pub verification_points: Vec<CurvePoint>,
}

impl PublishedCommitments {
    pub fn from_node(node: &Node) -> Self {
        let curve = node.curve();
        Self {
            curve: curve.name().to_string(),
            node_id: node.id().clone(),
            second_generator: node.second_generator().to_hex(curve),
            public_key_part: node.public_key_point().to_hex(curve),
            verification_points: node
                .verification_points()
                .iter()
                .map(|point| point.to_hex(curve))
                .collect(),
        }
    }

    /// Decode every point, applying the same checks as node construction
    pub fn decode(&self, curve: &dyn Curve) -> Result<DecodedCommitments> {
        if self.curve != curve.name() {
            return Err(Error::Deserialization(format!(
                "commitments are for {}, expected {}",
                self.curve,
                curve.name()
            )));
        }
        if self.verification_points.is_empty() {
            return Err(Error::Deserialization("no verification points".into()));
        }

        Ok(DecodedCommitments {
            node_id: self.node_id.clone(),
            second_generator: CurvePoint::from_hex(curve, &self.second_generator)?,
            public_key_part: CurvePoint::from_hex(curve, &self.public_key_part)?,
            verification_points: self
                .verification_points
                .iter()
                .map(|point| CurvePoint::from_hex(curve, point))
                .collect::<Result<Vec<_>>>()?,
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Deserialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commitment::verify_share;
    use crate::curve::{p256, secp256k1};
    use crate::error::PointFault;
    use crate::node::{new_node, NodeParams};
    use crate::polynomial::ScalarPolynomial;
    use ed25519_dalek::SigningKey;
    use sha2::Sha256;
    use std::sync::Arc;
    use std::time::Duration;

    fn node() -> Node {
        let curve = Arc::new(p256());
        let h = curve
            .scalar_mul(curve.generator(), &BigInt::from(987654321))
            .unwrap();
        let params = NodeParams {
            curve,
            hash: Box::new(Sha256::default()),
            g2x: h.x().clone(),
            g2y: h.y().clone(),
            zk_param: BigInt::from(1),
            timeout: Duration::from_secs(5),
            id: BigInt::from(3),
            identity_key: SigningKey::from_bytes(&[1u8; 32]),
        };
        let first: ScalarPolynomial = [11, 12, 13].into_iter().collect();
        let second: ScalarPolynomial = [21, 22, 23].into_iter().collect();
        new_node(params, first, second).unwrap()
    }

    #[test]
    fn test_published_commitments_decode() {
        let node = node();
        let published = node.published();

        let json = published.to_json().unwrap();
        let decoded = PublishedCommitments::from_json(&json)
            .unwrap()
            .decode(node.curve())
            .unwrap();

        assert_eq!(decoded.node_id, BigInt::from(3));
        assert_eq!(&decoded.public_key_part, node.public_key_point());
        assert_eq!(decoded.verification_points, node.verification_points());

        let share = node.share_for(&BigInt::from(4)).unwrap();
        verify_share(
            node.curve(),
            &decoded.second_generator,
            &decoded.verification_points,
            &share,
        )
        .unwrap();
    }

    #[test]
    fn test_decode_rejects_identity_point() {
        let mut published = node().published();
        published.verification_points[1] = format!("04{}", "00".repeat(64));

        match published.decode(&p256()) {
            Err(Error::InvalidCurvePoint { fault, .. }) => assert_eq!(fault, PointFault::Identity),
            other => panic!("expected InvalidCurvePoint, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_other_curve() {
        let published = node().published();

        assert!(matches!(
            published.decode(&secp256k1()),
            Err(Error::Deserialization(_))
        ));
    }
}
