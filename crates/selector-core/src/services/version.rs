//! Service release version parsing
//!
//! Service versions come from the tail of the `service` filter (`eks-1.21`,
//! `emr-5.30.1`), so both `X.Y` and `X.Y.Z` forms are accepted. A missing patch
//! component is treated as zero. Qualifiers after `-` or `+` (`5.30.0-beta`) are
//! accepted but do not take part in comparisons: presets gate on the numeric
//! release line only.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric release of a managed service, ordered by `(major, minor, patch)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PresetVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl PresetVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |message: String| Error::InvalidVersion {
            version: input.to_string(),
            message,
        };

        let release = input.trim();
        let release = release.strip_prefix('v').unwrap_or(release);
        let release = release.split(['-', '+']).next().unwrap_or(release);

        let mut components = [0u32; 3];
        let mut count = 0;
        for part in release.split('.') {
            if count == components.len() {
                return Err(invalid(format!("too many components in '{}'", release)));
            }
            components[count] = part
                .parse()
                .map_err(|_| invalid(format!("'{}' is not a number", part)))?;
            count += 1;
        }
        if count < 2 {
            return Err(invalid("expected X.Y or X.Y.Z".to_string()));
        }

        let [major, minor, patch] = components;
        Ok(Self::new(major, minor, patch))
    }
}

impl fmt::Display for PresetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for PresetVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
