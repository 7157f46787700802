//! [`Curve`] implementation over the RustCrypto `elliptic-curve` arithmetic

use super::{reduce, Curve, CurvePoint};
use elliptic_curve::{
    bigint::ArrayEncoding,
    generic_array::typenum::Unsigned,
    group::{Curve as _, Group},
    sec1::{EncodedPoint, FromEncodedPoint, ModulusSize, ToEncodedPoint},
    AffinePoint, CurveArithmetic, FieldBytes, FieldBytesSize, PrimeField, ProjectivePoint, Scalar,
};
use num_bigint::{BigInt, Sign};
use num_traits::{One, Signed};
use std::fmt;
use std::marker::PhantomData;

/// Curve backed by a RustCrypto arithmetic implementation.
///
/// Coordinates cross the boundary as SEC1 field bytes, so the backend's own
/// canonical-encoding and on-curve checks apply.
pub struct Sec1Curve<C> {
    name: &'static str,
    field_modulus: BigInt,
    order: BigInt,
    generator: CurvePoint,
    _curve: PhantomData<fn() -> C>,
}

/// NIST P-256
pub fn p256() -> Sec1Curve<::p256::NistP256> {
    let one = BigInt::one();
    // 2^256 - 2^224 + 2^192 + 2^96 - 1
    let p = (&one << 256u32) - (&one << 224u32) + (&one << 192u32) + (&one << 96u32) - &one;
    Sec1Curve::new("P-256", p)
}

/// secp256k1
pub fn secp256k1() -> Sec1Curve<::k256::Secp256k1> {
    let one = BigInt::one();
    // 2^256 - 2^32 - 977
    let p = (&one << 256u32) - (&one << 32u32) - BigInt::from(977u32);
    Sec1Curve::new("secp256k1", p)
}

impl<C> Sec1Curve<C>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    fn new(name: &'static str, field_modulus: BigInt) -> Self {
        let order = BigInt::from_bytes_be(
            Sign::Plus,
            <C as elliptic_curve::Curve>::ORDER.to_be_byte_array().as_slice(),
        );
        let generator = affine_coordinates::<C>(&ProjectivePoint::<C>::generator().to_affine())
            .expect("base point is not the identity");

        Self {
            name,
            field_modulus,
            order,
            generator,
            _curve: PhantomData,
        }
    }

    /// Big-endian field bytes, or `None` if `value` does not fit
    fn field_bytes(&self, value: &BigInt) -> Option<FieldBytes<C>> {
        if value.is_negative() {
            return None;
        }
        let (_, bytes) = value.to_bytes_be();
        let len = FieldBytesSize::<C>::USIZE;
        if bytes.len() > len {
            return None;
        }

        let mut out = FieldBytes::<C>::default();
        out[len - bytes.len()..].copy_from_slice(&bytes);
        Some(out)
    }

    fn to_affine(&self, x: &BigInt, y: &BigInt) -> Option<AffinePoint<C>> {
        if x >= &self.field_modulus || y >= &self.field_modulus {
            return None;
        }
        let encoded =
            EncodedPoint::<C>::from_affine_coordinates(&self.field_bytes(x)?, &self.field_bytes(y)?, false);
        Option::from(AffinePoint::<C>::from_encoded_point(&encoded))
    }

    fn to_projective(&self, point: &CurvePoint) -> Option<ProjectivePoint<C>> {
        self.to_affine(point.x(), point.y())
            .map(ProjectivePoint::<C>::from)
    }

    fn to_scalar(&self, k: &BigInt) -> Option<Scalar<C>> {
        let repr = self.field_bytes(&reduce(k, &self.order))?;
        Option::from(<Scalar<C> as PrimeField>::from_repr(repr))
    }
}

/// Affine coordinates of a point, `None` for the identity
fn affine_coordinates<C>(point: &AffinePoint<C>) -> Option<CurvePoint>
where
    C: CurveArithmetic,
    AffinePoint<C>: ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    let encoded = point.to_encoded_point(false);
    let x = BigInt::from_bytes_be(Sign::Plus, encoded.x()?);
    let y = BigInt::from_bytes_be(Sign::Plus, encoded.y()?);
    Some(CurvePoint::from_canonical(x, y))
}

impl<C> Curve for Sec1Curve<C>
where
    C: CurveArithmetic,
    AffinePoint<C>: FromEncodedPoint<C> + ToEncodedPoint<C>,
    FieldBytesSize<C>: ModulusSize,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn field_modulus(&self) -> &BigInt {
        &self.field_modulus
    }

    fn order(&self) -> &BigInt {
        &self.order
    }

    fn generator(&self) -> &CurvePoint {
        &self.generator
    }

    fn is_on_curve(&self, x: &BigInt, y: &BigInt) -> bool {
        self.to_affine(x, y).is_some()
    }

    fn scalar_mul(&self, point: &CurvePoint, k: &BigInt) -> Option<CurvePoint> {
        let product = self.to_projective(point)? * self.to_scalar(k)?;
        affine_coordinates::<C>(&product.to_affine())
    }

    fn add(&self, a: &CurvePoint, b: &CurvePoint) -> Option<CurvePoint> {
        let sum = self.to_projective(a)? + self.to_projective(b)?;
        affine_coordinates::<C>(&sum.to_affine())
    }
}

impl<C> fmt::Debug for Sec1Curve<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sec1Curve").field("name", &self.name).finish()
    }
}
