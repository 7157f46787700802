//! String encodings for big integers in JSON documents
//!
//! Integers are written as `0x`-prefixed lowercase hex. On input both
//! decimal and `0x` hex are accepted, with an optional leading `-`; the sign
//! is kept so that range checks, not the parser, reject negative values.

use crate::{Error, Result};
use num_bigint::BigInt;

/// Parse a decimal or `0x`-prefixed hex integer
pub fn parse_bigint(s: &str) -> Result<BigInt> {
    let trimmed = s.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let (radix, body) = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, digits),
    };

    // parse_bytes accepts its own sign prefix; a second one is malformed
    let value = Some(body)
        .filter(|body| !body.starts_with(&['-', '+'][..]))
        .and_then(|body| BigInt::parse_bytes(body.as_bytes(), radix))
        .ok_or_else(|| Error::Deserialization(format!("invalid integer: {:?}", s)))?;

    Ok(if negative { -value } else { value })
}

/// Format as `0x`-prefixed hex, `-0x...` for negatives
pub fn format_bigint(value: &BigInt) -> String {
    format!("{:#x}", value)
}

/// Serde adapter for a single [`BigInt`]
pub mod bigint_str {
    use super::{format_bigint, parse_bigint};
    use num_bigint::BigInt;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_bigint(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigInt, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_bigint(&s).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for a sequence of [`BigInt`]
pub mod bigint_vec {
    use super::{format_bigint, parse_bigint};
    use num_bigint::BigInt;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(values: &[BigInt], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(values.iter().map(format_bigint))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<BigInt>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|s| parse_bigint(s).map_err(serde::de::Error::custom))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(parse_bigint("12345").unwrap(), BigInt::from(12345));
        assert_eq!(parse_bigint("0xff").unwrap(), BigInt::from(255));
        assert_eq!(parse_bigint("-0x10").unwrap(), BigInt::from(-16));
        assert_eq!(parse_bigint(" -2 ").unwrap(), BigInt::from(-2));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "0x", "12a", "--1", "-+1", "0x-5", "0xzz"] {
            assert!(parse_bigint(bad).is_err(), "{:?} should not parse", bad);
        }
    }

    #[test]
    fn test_format_round_trips_sign() {
        let value = BigInt::from(-4096);
        assert_eq!(format_bigint(&value), "-0x1000");
        assert_eq!(parse_bigint(&format_bigint(&value)).unwrap(), value);
    }
}
