//! Serde support for integer literals
//!
//! Integers that fit in an `i64` are written as JSON numbers, larger ones as
//! decimal strings. Both forms are accepted when reading.

use std::fmt;

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::de::{self, Unexpected, Visitor};
use serde::{Deserializer, Serializer};

pub(crate) fn serialize<S: Serializer>(value: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
    match value.to_i64() {
        Some(n) => serializer.serialize_i64(n),
        None => serializer.collect_str(value),
    }
}

pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigInt, D::Error> {
    deserializer.deserialize_any(DecimalVisitor)
}

struct DecimalVisitor;

impl<'de> Visitor<'de> for DecimalVisitor {
    type Value = BigInt;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer or a string of decimal digits")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<BigInt, E> {
        Ok(BigInt::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<BigInt, E> {
        Ok(BigInt::from(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<BigInt, E> {
        v.parse()
            .map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Literal(#[serde(with = "super")] BigInt);

    #[test]
    fn test_small_values_are_numbers() {
        let json = serde_json::to_string(&Literal(BigInt::from(-42))).unwrap();
        assert_eq!(json, "-42");
        assert_eq!(serde_json::from_str::<Literal>("7").unwrap(), Literal(BigInt::from(7)));
    }

    #[test]
    fn test_large_values_are_strings() {
        let big: BigInt = "99999999999999999999".parse().unwrap();
        let json = serde_json::to_string(&Literal(big.clone())).unwrap();
        assert_eq!(json, "\"99999999999999999999\"");
        assert_eq!(serde_json::from_str::<Literal>(&json).unwrap(), Literal(big));
        assert!(serde_json::from_str::<Literal>("\"12x\"").is_err());
    }
}
