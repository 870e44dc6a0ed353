//! Serde helpers for account configuration.
//!
//! User ids are 128-bit and do not survive a round trip through a JSON
//! number in most tooling, so they are written as `0x`-prefixed hex strings.

use std::fmt;

use serde::{de, Deserializer, Serializer};

/// Serde module for a `u128` stored as a hex string (e.g. `"0x1"`).
///
/// Numbers are still accepted on input, which keeps small hand-written
/// ids in configuration files readable.
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct Seed {
///     #[serde(with = "hle_account::serde_helpers::u128_hex_string")]
///     id: u128,
/// }
/// ```
pub mod u128_hex_string {
    use super::*;

    pub fn serialize<S>(value: &u128, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{:032x}", value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u128, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct HexVisitor;

        impl<'de> de::Visitor<'de> for HexVisitor {
            type Value = u128;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a hex string like '0x...' or an unsigned number")
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let digits = s
                    .strip_prefix("0x")
                    .or_else(|| s.strip_prefix("0X"))
                    .unwrap_or(s);
                u128::from_str_radix(digits, 16).map_err(de::Error::custom)
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(u128::from(v))
            }

            fn visit_u128<E>(self, v: u128) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v)
            }
        }

        deserializer.deserialize_any(HexVisitor)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Holder {
        #[serde(with = "super::u128_hex_string")]
        id: u128,
    }

    #[test]
    fn test_writes_prefixed_hex() {
        let json = serde_json::to_string(&Holder { id: 0xAB }).unwrap();
        assert_eq!(json, r#"{"id":"0x000000000000000000000000000000ab"}"#);
    }

    #[test]
    fn test_reads_hex_and_numbers() {
        let hex: Holder = serde_json::from_str(r#"{"id":"0xFF"}"#).unwrap();
        let bare: Holder = serde_json::from_str(r#"{"id":"ff"}"#).unwrap();
        let number: Holder = serde_json::from_str(r#"{"id":255}"#).unwrap();

        assert_eq!(hex.id, 255);
        assert_eq!(bare.id, 255);
        assert_eq!(number.id, 255);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Holder>(r#"{"id":"0xnope"}"#).is_err());
    }
}
