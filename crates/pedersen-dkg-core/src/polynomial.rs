//! Secret scalar polynomials and their validation

use crate::curve::reduce;
use crate::error::{CoefficientFault, Error, PolynomialFault, Result, Side};
use num_bigint::{BigInt, RandBigInt};
use num_traits::{One, Signed, Zero};
use rand_core::{CryptoRng, RngCore};
use std::fmt;

/// Polynomial coefficients, constant term first.
///
/// Holds unvalidated input; only a [`SecretPolynomialPair`] guarantees the
/// coefficient invariants.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ScalarPolynomial(Vec<BigInt>);

impl ScalarPolynomial {
    pub fn new(coefficients: Vec<BigInt>) -> Self {
        Self(coefficients)
    }

    /// `len` coefficients drawn uniformly from `[1, order)`
    pub fn random<R: RngCore + CryptoRng>(len: usize, order: &BigInt, rng: &mut R) -> Self {
        let one = BigInt::one();
        (0..len)
            .map(|_| rng.gen_bigint_range(&one, order))
            .collect()
    }

    pub fn coefficients(&self) -> &[BigInt] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `len - 1`, or `None` for the empty polynomial
    pub fn degree(&self) -> Option<usize> {
        self.0.len().checked_sub(1)
    }

    /// Value at `x`, reduced modulo `order`
    pub fn evaluate(&self, x: &BigInt, order: &BigInt) -> BigInt {
        let x = reduce(x, order);
        self.0.iter().rev().fold(BigInt::zero(), |acc, coefficient| {
            reduce(&(acc * &x + coefficient), order)
        })
    }
}

impl<T: Into<BigInt>> FromIterator<T> for ScalarPolynomial {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<BigInt>> for ScalarPolynomial {
    fn from(coefficients: Vec<BigInt>) -> Self {
        Self(coefficients)
    }
}

// Coefficients are secret; only the shape is printed.
impl fmt::Debug for ScalarPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarPolynomial")
            .field("len", &self.0.len())
            .finish()
    }
}

/// Two non-empty polynomials of equal length whose coefficients all lie in
/// `(0, N)`
#[derive(Clone, PartialEq, Eq)]
pub struct SecretPolynomialPair {
    first: ScalarPolynomial,
    second: ScalarPolynomial,
}

impl SecretPolynomialPair {
    /// Validate a polynomial pair against the group order.
    ///
    /// Emptiness is checked before lengths, lengths before coefficients.
    /// Coefficients are scanned through `first` then `second`, ascending.
    pub fn validate(
        first: ScalarPolynomial,
        second: ScalarPolynomial,
        order: &BigInt,
    ) -> Result<Self> {
        if first.is_empty() {
            return Err(Error::InvalidPolynomial(PolynomialFault::Empty(Side::First)));
        }
        if second.is_empty() {
            return Err(Error::InvalidPolynomial(PolynomialFault::Empty(Side::Second)));
        }
        if first.len() != second.len() {
            return Err(Error::InvalidPolynomial(PolynomialFault::LengthMismatch {
                first: first.len(),
                second: second.len(),
            }));
        }

        check_coefficients(Side::First, &first, order)?;
        check_coefficients(Side::Second, &second, order)?;

        Ok(Self { first, second })
    }

    /// Number of coefficients in each polynomial
    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn degree(&self) -> usize {
        self.first.len() - 1
    }

    pub(crate) fn first(&self) -> &ScalarPolynomial {
        &self.first
    }

    pub(crate) fn second(&self) -> &ScalarPolynomial {
        &self.second
    }

    /// Coefficient pairs `(poly1[j], poly2[j])`, ascending `j`
    pub(crate) fn pairs(&self) -> impl Iterator<Item = (&BigInt, &BigInt)> {
        self.first.0.iter().zip(self.second.0.iter())
    }
}

impl fmt::Debug for SecretPolynomialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretPolynomialPair")
            .field("degree", &self.degree())
            .finish()
    }
}

fn check_coefficients(side: Side, poly: &ScalarPolynomial, order: &BigInt) -> Result<()> {
    for (index, coefficient) in poly.coefficients().iter().enumerate() {
        let fault = if coefficient.is_zero() {
            CoefficientFault::Zero
        } else if coefficient.is_negative() {
            CoefficientFault::Negative
        } else if coefficient >= order {
            CoefficientFault::NotBelowOrder
        } else {
            continue;
        };

        return Err(Error::InvalidPolynomial(PolynomialFault::Coefficient {
            side,
            index,
            fault,
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{p256, Curve};
    use rand_chacha::rand_core::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn poly(values: &[i64]) -> ScalarPolynomial {
        values.iter().copied().collect()
    }

    fn fault(result: Result<SecretPolynomialPair>) -> PolynomialFault {
        match result {
            Err(Error::InvalidPolynomial(fault)) => fault,
            other => panic!("expected InvalidPolynomial, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_empty_polynomials() {
        let n = BigInt::from(101);

        assert_eq!(
            fault(SecretPolynomialPair::validate(poly(&[]), poly(&[]), &n)),
            PolynomialFault::Empty(Side::First)
        );
        assert_eq!(
            fault(SecretPolynomialPair::validate(poly(&[1, 2]), poly(&[]), &n)),
            PolynomialFault::Empty(Side::Second)
        );
        assert_eq!(
            fault(SecretPolynomialPair::validate(poly(&[]), poly(&[1, 2]), &n)),
            PolynomialFault::Empty(Side::First)
        );
    }

    #[test]
    fn test_rejects_length_mismatch_either_way() {
        let n = BigInt::from(101);

        assert_eq!(
            fault(SecretPolynomialPair::validate(
                poly(&[1, 2, 3, 4]),
                poly(&[1, 2, 3]),
                &n
            )),
            PolynomialFault::LengthMismatch { first: 4, second: 3 }
        );
        assert_eq!(
            fault(SecretPolynomialPair::validate(
                poly(&[1, 2, 3, 4, 5]),
                poly(&[5, 6, 7, 8]),
                &n
            )),
            PolynomialFault::LengthMismatch { first: 5, second: 4 }
        );
    }

    #[test]
    fn test_rejects_bad_coefficients() {
        let curve = p256();
        let n = curve.order();
        let good = poly(&[1, 2, 3, 4]);

        let cases = [
            (poly(&[1, -2, 3, 4]), 1, CoefficientFault::Negative),
            (poly(&[1, 2, 3, 0]), 3, CoefficientFault::Zero),
            (
                ScalarPolynomial::new(vec![1.into(), 2.into(), 3.into(), n.clone()]),
                3,
                CoefficientFault::NotBelowOrder,
            ),
            (
                ScalarPolynomial::new(vec![n + BigInt::from(5), 2.into(), 3.into(), 4.into()]),
                0,
                CoefficientFault::NotBelowOrder,
            ),
        ];

        for (bad, index, expected) in cases {
            assert_eq!(
                fault(SecretPolynomialPair::validate(good.clone(), bad.clone(), n)),
                PolynomialFault::Coefficient {
                    side: Side::Second,
                    index,
                    fault: expected,
                }
            );
            assert_eq!(
                fault(SecretPolynomialPair::validate(bad, good.clone(), n)),
                PolynomialFault::Coefficient {
                    side: Side::First,
                    index,
                    fault: expected,
                }
            );
        }
    }

    #[test]
    fn test_first_polynomial_reported_first() {
        let n = BigInt::from(101);

        assert_eq!(
            fault(SecretPolynomialPair::validate(poly(&[1, 0]), poly(&[0, 1]), &n)),
            PolynomialFault::Coefficient {
                side: Side::First,
                index: 1,
                fault: CoefficientFault::Zero,
            }
        );
    }

    #[test]
    fn test_accepts_bounds_of_open_interval() {
        let curve = p256();
        let n = curve.order();
        let top = n - BigInt::from(1);

        let pair = SecretPolynomialPair::validate(
            ScalarPolynomial::new(vec![BigInt::from(1), top.clone()]),
            ScalarPolynomial::new(vec![top, BigInt::from(1)]),
            n,
        )
        .unwrap();

        assert_eq!(pair.len(), 2);
        assert_eq!(pair.degree(), 1);
    }

    #[test]
    fn test_random_polynomials_validate() {
        let curve = p256();
        let mut rng = ChaCha20Rng::seed_from_u64(7);

        for len in 1..8 {
            let first = ScalarPolynomial::random(len, curve.order(), &mut rng);
            let second = ScalarPolynomial::random(len, curve.order(), &mut rng);
            assert_eq!(first.degree(), Some(len - 1));
            assert!(SecretPolynomialPair::validate(first, second, curve.order()).is_ok());
        }
    }

    #[test]
    fn test_evaluate_horner() {
        let n = BigInt::from(101);
        // 1 + 2x + 3x^2 + 4x^3 at x = 5 is 586 = 81 mod 101
        assert_eq!(poly(&[1, 2, 3, 4]).evaluate(&BigInt::from(5), &n), BigInt::from(81));
        assert_eq!(poly(&[7]).evaluate(&BigInt::from(1000), &n), BigInt::from(7));
        // x = -1 is x = 100
        assert_eq!(
            poly(&[1, 2, 3, 4]).evaluate(&BigInt::from(-1), &n),
            poly(&[1, 2, 3, 4]).evaluate(&BigInt::from(100), &n)
        );
    }

    #[test]
    fn test_debug_hides_coefficients() {
        let rendered = format!("{:?}", poly(&[123456789]));
        assert!(!rendered.contains("123456789"));
    }
}
