//! Elliptic curve abstraction
//!
//! The node never constructs a curve itself; it is handed something that
//! implements [`Curve`]. Two implementations backed by the RustCrypto
//! curve crates are provided: NIST P-256 and secp256k1.

mod point;
mod sec1;

pub use point::{encode_points, CurvePoint};
pub use sec1::{p256, secp256k1, Sec1Curve};

use num_bigint::{BigInt, Sign};
use std::fmt;

/// Short Weierstrass curve over a prime field, with a prime-order base point.
///
/// Arithmetic returns `None` where the mathematical result is the point at
/// infinity, which has no affine coordinates.
pub trait Curve: fmt::Debug + Send + Sync {
    /// Curve identifier used in errors and published messages
    fn name(&self) -> &'static str;

    /// Field modulus `P`
    fn field_modulus(&self) -> &BigInt;

    /// Order `N` of the base point
    fn order(&self) -> &BigInt;

    /// Base point `G`
    fn generator(&self) -> &CurvePoint;

    /// Whether `(x, y)` satisfies the curve equation.
    ///
    /// Coordinates outside `[0, P)` never satisfy it.
    fn is_on_curve(&self, x: &BigInt, y: &BigInt) -> bool;

    /// `k·point`, with `k` taken modulo `N`
    fn scalar_mul(&self, point: &CurvePoint, k: &BigInt) -> Option<CurvePoint>;

    /// `a + b`
    fn add(&self, a: &CurvePoint, b: &CurvePoint) -> Option<CurvePoint>;

    /// Byte width of one encoded coordinate
    fn coordinate_len(&self) -> usize {
        ((self.field_modulus().bits() + 7) / 8) as usize
    }
}

/// Least non-negative residue of `k` modulo `n`
pub(crate) fn reduce(k: &BigInt, n: &BigInt) -> BigInt {
    let r = k % n;
    if r.sign() == Sign::Minus {
        r + n
    } else {
        r
    }
}

/// Sum of two points where `None` stands for the identity
pub(crate) fn add_or_identity(
    curve: &dyn Curve,
    a: Option<CurvePoint>,
    b: Option<CurvePoint>,
) -> Option<CurvePoint> {
    match (a, b) {
        (Some(a), Some(b)) => curve.add(&a, &b),
        (Some(p), None) | (None, Some(p)) => Some(p),
        (None, None) => None,
    }
}
