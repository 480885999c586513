//! Memory quantities expressed in mebibytes
//!
//! Accepts the human forms users type on the command line or in filter files
//! (`"4"`, `"4 gib"`, `"512MiB"`, `"1.5 GiB"`, `"2tb"`). A bare number means MiB.

use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const MIB_PER_GIB: u64 = 1024;
const MIB_PER_TIB: u64 = 1024 * 1024;

/// A memory amount stored in MiB
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteQuantity {
    /// Quantity in MiB
    pub quantity: u64,
}

impl ByteQuantity {
    pub fn from_mib(mib: u64) -> Self {
        Self { quantity: mib }
    }

    pub fn from_gib(gib: u64) -> Self {
        Self {
            quantity: gib * MIB_PER_GIB,
        }
    }

    pub fn from_tib(tib: u64) -> Self {
        Self {
            quantity: tib * MIB_PER_TIB,
        }
    }

    pub fn mib(&self) -> u64 {
        self.quantity
    }

    pub fn gib(&self) -> f64 {
        self.quantity as f64 / MIB_PER_GIB as f64
    }

    /// Parse a human-readable quantity
    pub fn parse(value: &str) -> Result<Self> {
        let normalized = value.trim().to_lowercase();
        let split_at = normalized
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(normalized.len());
        let (number, unit) = normalized.split_at(split_at);

        if number.is_empty() {
            return Err(Error::InvalidByteQuantity {
                value: value.to_string(),
                message: "missing numeric quantity".to_string(),
            });
        }

        let amount: f64 = number.parse().map_err(|_| Error::InvalidByteQuantity {
            value: value.to_string(),
            message: format!("'{}' is not a number", number),
        })?;

        let multiplier = match unit.trim() {
            "" | "m" | "mb" | "mib" => 1,
            "g" | "gb" | "gib" => MIB_PER_GIB,
            "t" | "tb" | "tib" => MIB_PER_TIB,
            other => {
                return Err(Error::InvalidByteQuantity {
                    value: value.to_string(),
                    message: format!("unknown unit '{}', expected mib, gib or tib", other),
                })
            }
        };

        Ok(Self {
            quantity: (amount * multiplier as f64).round() as u64,
        })
    }
}

impl FromStr for ByteQuantity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ByteQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quantity > 0 && self.quantity % MIB_PER_GIB == 0 {
            write!(f, "{} GiB", self.quantity / MIB_PER_GIB)
        } else {
            write!(f, "{} MiB", self.quantity)
        }
    }
}

impl Serialize for ByteQuantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawByteQuantity {
    Mib(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for ByteQuantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match RawByteQuantity::deserialize(deserializer)? {
            RawByteQuantity::Mib(mib) => Ok(Self::from_mib(mib)),
            RawByteQuantity::Text(text) => Self::parse(&text).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!(ByteQuantity::parse("512").unwrap().mib(), 512);
        assert_eq!(ByteQuantity::parse("512 MiB").unwrap().mib(), 512);
        assert_eq!(ByteQuantity::parse("4gb").unwrap().mib(), 4096);
        assert_eq!(ByteQuantity::parse("1.5 GiB").unwrap().mib(), 1536);
        assert_eq!(ByteQuantity::parse(" 2 tib ").unwrap().mib(), 2 * 1024 * 1024);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            ByteQuantity::parse("gib"),
            Err(Error::InvalidByteQuantity { .. })
        ));
        assert!(matches!(
            ByteQuantity::parse("4 parsecs"),
            Err(Error::InvalidByteQuantity { .. })
        ));
        assert!(ByteQuantity::parse("1.2.3 gib").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ByteQuantity::from_gib(16).to_string(), "16 GiB");
        assert_eq!(ByteQuantity::from_mib(1536).to_string(), "1536 MiB");
        assert_eq!(ByteQuantity::from_mib(0).to_string(), "0 MiB");
    }

    #[test]
    fn test_serde_accepts_number_or_string() {
        let from_number: ByteQuantity = serde_json::from_str("2048").unwrap();
        let from_text: ByteQuantity = serde_json::from_str("\"2 GiB\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(serde_json::to_string(&from_text).unwrap(), "\"2 GiB\"");
    }
}
