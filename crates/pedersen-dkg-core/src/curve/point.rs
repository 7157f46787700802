//! Validated curve points and their canonical encoding

use super::Curve;
use crate::error::{Error, PointFault, Result};
use num_bigint::{BigInt, Sign};
use num_traits::{Signed, Zero};

/// SEC1 tag for an uncompressed point
const UNCOMPRESSED_TAG: u8 = 0x04;

/// Affine point known to be canonical, on its curve, and not the identity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurvePoint {
    x: BigInt,
    y: BigInt,
}

impl CurvePoint {
    /// Validate `(x, y)` as a point on `curve`.
    ///
    /// Checks run in order and stop at the first failure: both coordinates
    /// in `[0, P)`, not the all-zero pair, then the curve equation. Shifted
    /// representatives are rejected rather than reduced.
    pub fn validate(curve: &dyn Curve, x: &BigInt, y: &BigInt) -> Result<Self> {
        let reject = |fault| Error::InvalidCurvePoint {
            curve: curve.name(),
            x: x.clone(),
            y: y.clone(),
            fault,
        };

        let p = curve.field_modulus();
        if x.is_negative() || y.is_negative() || x >= p || y >= p {
            return Err(reject(PointFault::OutOfRange));
        }

        if x.is_zero() && y.is_zero() {
            return Err(reject(PointFault::Identity));
        }

        if !curve.is_on_curve(x, y) {
            return Err(reject(PointFault::NotOnCurve));
        }

        Ok(Self::from_canonical(x.clone(), y.clone()))
    }

    /// Wrap coordinates produced by curve arithmetic
    pub(crate) fn from_canonical(x: BigInt, y: BigInt) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> &BigInt {
        &self.x
    }

    pub fn y(&self) -> &BigInt {
        &self.y
    }

    /// The `(x, y)` pair
    pub fn coordinates(&self) -> (&BigInt, &BigInt) {
        (&self.x, &self.y)
    }

    /// SEC1 uncompressed encoding: `0x04 || x || y`, coordinates left-padded
    /// to the field width
    pub fn to_bytes(&self, curve: &dyn Curve) -> Vec<u8> {
        let len = curve.coordinate_len();
        let mut out = Vec::with_capacity(1 + 2 * len);
        out.push(UNCOMPRESSED_TAG);
        write_padded(&mut out, &self.x, len);
        write_padded(&mut out, &self.y, len);
        out
    }

    /// Decode an uncompressed encoding and validate the result
    pub fn from_bytes(curve: &dyn Curve, bytes: &[u8]) -> Result<Self> {
        let len = curve.coordinate_len();
        if bytes.len() != 1 + 2 * len {
            return Err(Error::MalformedPoint(format!(
                "expected {} bytes, got {}",
                1 + 2 * len,
                bytes.len()
            )));
        }
        if bytes[0] != UNCOMPRESSED_TAG {
            return Err(Error::MalformedPoint(format!(
                "unsupported tag {:#04x}",
                bytes[0]
            )));
        }

        let x = BigInt::from_bytes_be(Sign::Plus, &bytes[1..1 + len]);
        let y = BigInt::from_bytes_be(Sign::Plus, &bytes[1 + len..]);
        Self::validate(curve, &x, &y)
    }

    /// Hex of [`CurvePoint::to_bytes`]
    pub fn to_hex(&self, curve: &dyn Curve) -> String {
        hex::encode(self.to_bytes(curve))
    }

    pub fn from_hex(curve: &dyn Curve, s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| Error::MalformedPoint(e.to_string()))?;
        Self::from_bytes(curve, &bytes)
    }
}

/// Concatenated encodings, in order
pub fn encode_points(curve: &dyn Curve, points: &[CurvePoint]) -> Vec<u8> {
    points
        .iter()
        .flat_map(|point| point.to_bytes(curve))
        .collect()
}

fn write_padded(out: &mut Vec<u8>, value: &BigInt, len: usize) {
    let (_, bytes) = value.to_bytes_be();
    out.resize(out.len() + len - bytes.len(), 0);
    out.extend_from_slice(&bytes);
}
