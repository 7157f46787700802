//! Pedersen commitments to polynomial coefficients

use crate::curve::{add_or_identity, reduce, Curve, CurvePoint};
use crate::encoding::bigint_str;
use crate::polynomial::SecretPolynomialPair;
use crate::{Error, Result};
use num_bigint::BigInt;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Public artifacts derived from a node's polynomials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commitments {
    /// `poly1[0]·G`
    pub public_key_part: CurvePoint,
    /// `poly1[j]·G + poly2[j]·H`, ascending `j`
    pub verification_points: Vec<CurvePoint>,
}

/// Compute the public-key contribution and the verification points.
///
/// Entry `j` depends only on `(poly1[j], poly2[j])`, so the output order
/// follows the coefficient order exactly.
pub fn commit(
    curve: &dyn Curve,
    g: &CurvePoint,
    h: &CurvePoint,
    polynomials: &SecretPolynomialPair,
) -> Result<Commitments> {
    let constant_term = &polynomials.first().coefficients()[0];
    let public_key_part = curve
        .scalar_mul(g, constant_term)
        .ok_or(Error::DegenerateCommitment { index: 0 })?;

    let verification_points = polynomials
        .pairs()
        .enumerate()
        .map(|(index, (a, b))| {
            pedersen(curve, g, h, a, b).ok_or(Error::DegenerateCommitment { index })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Commitments {
        public_key_part,
        verification_points,
    })
}

/// `a·G + b·H`, `None` for the identity
fn pedersen(
    curve: &dyn Curve,
    g: &CurvePoint,
    h: &CurvePoint,
    a: &BigInt,
    b: &BigInt,
) -> Option<CurvePoint> {
    add_or_identity(curve, curve.scalar_mul(g, a), curve.scalar_mul(h, b))
}

/// Evaluations of both secret polynomials at one recipient index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePair {
    /// Recipient index the polynomials were evaluated at
    #[serde(with = "bigint_str")]
    pub index: BigInt,
    /// `poly1(index) mod N`
    #[serde(with = "bigint_str")]
    pub share1: BigInt,
    /// `poly2(index) mod N`
    #[serde(with = "bigint_str")]
    pub share2: BigInt,
}

/// Evaluate both polynomials at `index`.
///
/// An index congruent to zero would hand out the constant terms and is
/// refused.
pub fn evaluate_shares(
    polynomials: &SecretPolynomialPair,
    index: &BigInt,
    order: &BigInt,
) -> Result<SharePair> {
    if reduce(index, order).is_zero() {
        return Err(Error::InvalidShareIndex(index.clone()));
    }

    Ok(SharePair {
        index: index.clone(),
        share1: polynomials.first().evaluate(index, order),
        share2: polynomials.second().evaluate(index, order),
    })
}

/// Check a share pair against published verification points.
///
/// Accepts iff `share1·G + share2·H == Σ_j index^j · V_j`.
pub fn verify_share(
    curve: &dyn Curve,
    h: &CurvePoint,
    verification_points: &[CurvePoint],
    share: &SharePair,
) -> Result<()> {
    let order = curve.order();
    let expected = pedersen(curve, curve.generator(), h, &share.share1, &share.share2);

    let x = reduce(&share.index, order);
    let mut x_power = BigInt::one();
    let mut actual = None;
    for point in verification_points {
        actual = add_or_identity(curve, actual, curve.scalar_mul(point, &x_power));
        x_power = reduce(&(x_power * &x), order);
    }

    if verification_points.is_empty() || expected != actual {
        debug!(index = %share.index, "share does not match verification points");
        return Err(Error::ShareVerification(share.index.clone()));
    }

    Ok(())
}
