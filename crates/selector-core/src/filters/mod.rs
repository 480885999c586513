//! Instance type filter criteria
//!
//! [`Filters`] is the aggregate every transform consumes and produces. Each field
//! is optional: `None` means "no opinion", which is what lets transforms and
//! service presets fill in defaults without clobbering explicit user input.
//!
//! # Module Organization
//!
//! - [`range`] - inclusive range primitives
//! - [`byte_quantity`] - memory quantities in MiB
//! - [`pattern`] - compiled allow/deny list patterns
//! - [`merge`] - fill-if-empty merge primitive
//!
//! Copyright (c) 2025 Instance Selector Team
//! Licensed under the Apache-2.0 license

pub mod byte_quantity;
pub mod merge;
pub mod pattern;
pub mod range;

pub use byte_quantity::ByteQuantity;
pub use merge::FillIfEmpty;
pub use pattern::Pattern;
pub use range::{ByteQuantityRangeFilter, IntRangeFilter, RangeFilter};

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// CPU architectures reported by the instance catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CpuArchitecture {
    #[serde(rename = "x86_64")]
    X86_64,
    #[serde(rename = "arm64")]
    Arm64,
    #[serde(rename = "i386")]
    I386,
    #[serde(rename = "x86_64_mac")]
    X86_64Mac,
    #[serde(rename = "arm64_mac")]
    Arm64Mac,
}

impl CpuArchitecture {
    pub fn as_str(&self) -> &'static str {
        match self {
            CpuArchitecture::X86_64 => "x86_64",
            CpuArchitecture::Arm64 => "arm64",
            CpuArchitecture::I386 => "i386",
            CpuArchitecture::X86_64Mac => "x86_64_mac",
            CpuArchitecture::Arm64Mac => "arm64_mac",
        }
    }
}

impl fmt::Display for CpuArchitecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CpuArchitecture {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "x86_64" | "amd64" => Ok(CpuArchitecture::X86_64),
            "arm64" | "aarch64" => Ok(CpuArchitecture::Arm64),
            "i386" => Ok(CpuArchitecture::I386),
            "x86_64_mac" => Ok(CpuArchitecture::X86_64Mac),
            "arm64_mac" => Ok(CpuArchitecture::Arm64Mac),
            other => Err(Error::Configuration {
                message: format!("unknown CPU architecture '{}'", other),
            }),
        }
    }
}

/// Criteria describing the desired instance type attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filters {
    /// Reference instance type whose specs seed the unset resource filters.
    /// Cleared once expanded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_type_base: Option<String>,

    /// Presence enables the flexible defaults bundle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flexible: Option<bool>,

    /// Presence enables the EMR allow-list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emr: Option<bool>,

    /// Service preset as `<name>` or `<name>-<version>`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bare_metal: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fpga: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_architecture: Option<CpuArchitecture>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpus_range: Option<IntRangeFilter>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcpus_range: Option<IntRangeFilter>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_range: Option<ByteQuantityRangeFilter>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_list: Option<Pattern>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deny_list: Option<Pattern>,

    /// Explicit instance type ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_types: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_device_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtualization_type: Option<String>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no criterion is set at all
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Load filters from a file (TOML, YAML, or JSON by extension)
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let filters: Self = match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };

        Ok(filters)
    }
}
