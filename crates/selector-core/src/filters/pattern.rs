//! Compiled instance-type name patterns for allow and deny lists

use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A compiled regular expression over instance type identifiers
///
/// Two patterns are equal when their source text is equal.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compile a pattern, reporting the source text on failure
    pub fn new(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|source| Error::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    /// Compile the alternation of several sub-patterns
    pub fn any_of<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = patterns
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("|");
        Self::new(&joined)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, instance_type: &str) -> bool {
        self.0.is_match(instance_type)
    }

    pub fn regex(&self) -> &Regex {
        &self.0
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self(regex)
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Self::new(&source).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_of_joins_alternatives() {
        let pattern = Pattern::any_of(["^m5\\.", "^c5\\."]).unwrap();
        assert_eq!(pattern.as_str(), "^m5\\.|^c5\\.");
        assert!(pattern.is_match("c5.xlarge"));
        assert!(!pattern.is_match("r5.xlarge"));
    }

    #[test]
    fn test_invalid_pattern_keeps_source() {
        match Pattern::new("m5[") {
            Err(Error::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "m5["),
            other => panic!("expected InvalidPattern, got {:?}", other),
        }
    }

    #[test]
    fn test_equality_by_source() {
        assert_eq!(Pattern::new("^t3").unwrap(), Pattern::new("^t3").unwrap());
        assert_ne!(Pattern::new("^t3").unwrap(), Pattern::new("^t2").unwrap());
    }
}
