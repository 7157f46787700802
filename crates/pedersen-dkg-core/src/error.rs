//! Error types for node construction and commitment handling

use num_bigint::BigInt;
use std::fmt;
use thiserror::Error;

/// Result type alias for DKG node operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a node or handling its commitments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The supplied coordinates are not an acceptable point on the curve
    #[error("Invalid curve point ({x:#x}, {y:#x}) on {curve}: {fault}")]
    InvalidCurvePoint {
        curve: &'static str,
        x: BigInt,
        y: BigInt,
        fault: PointFault,
    },

    /// A secret polynomial violates the length or coefficient rules
    #[error("Invalid polynomial: {0}")]
    InvalidPolynomial(PolynomialFault),

    /// Commitment arithmetic produced the point at infinity
    #[error("Commitment at index {index} is the identity point")]
    DegenerateCommitment { index: usize },

    /// Point encoding has the wrong length or tag
    #[error("Malformed point encoding: {0}")]
    MalformedPoint(String),

    /// Shares may not be evaluated at an index congruent to zero
    #[error("Invalid share index: {0}")]
    InvalidShareIndex(BigInt),

    /// Share does not match the published verification points
    #[error("Share for index {0} does not match commitments")]
    ShareVerification(BigInt),

    /// Invalid node configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Which check rejected a curve point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointFault {
    /// A coordinate lies outside `[0, P)`
    OutOfRange,
    /// The all-zero encoding of the identity
    Identity,
    /// The curve equation does not hold
    NotOnCurve,
}

impl fmt::Display for PointFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointFault::OutOfRange => f.write_str("coordinate outside canonical range"),
            PointFault::Identity => f.write_str("identity encoding is not allowed"),
            PointFault::NotOnCurve => f.write_str("point is not on the curve"),
        }
    }
}

/// One of the two secret polynomials held by a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => f.write_str("poly1"),
            Side::Second => f.write_str("poly2"),
        }
    }
}

/// Why a coefficient was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoefficientFault {
    Zero,
    Negative,
    /// Greater than or equal to the group order
    NotBelowOrder,
}

impl fmt::Display for CoefficientFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoefficientFault::Zero => f.write_str("is zero"),
            CoefficientFault::Negative => f.write_str("is negative"),
            CoefficientFault::NotBelowOrder => f.write_str("is not below the group order"),
        }
    }
}

/// Which polynomial rule failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolynomialFault {
    #[error("{0} is empty")]
    Empty(Side),

    #[error("length mismatch: poly1 has {first} coefficients, poly2 has {second}")]
    LengthMismatch { first: usize, second: usize },

    #[error("{side}[{index}] {fault}")]
    Coefficient {
        side: Side,
        index: usize,
        fault: CoefficientFault,
    },
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
