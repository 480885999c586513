//! Configuration for the built-in transforms and presets
//!
//! Configuration is loaded from:
//! - Default values (the constants below)
//! - Configuration files (TOML, YAML or JSON)
//! - The [`TransformConfigBuilder`] for programmatic overrides

use crate::filters::{CpuArchitecture, Pattern};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Lower scale factor applied to a reference instance type's resources
pub const AGGREGATE_LOW_PERCENTILE: f64 = 0.9;

/// Upper scale factor applied to a reference instance type's resources
pub const AGGREGATE_HIGH_PERCENTILE: f64 = 1.2;

/// Families admitted by the flexible defaults: current-generation c/m/r,
/// Graviton a1 and burstable t
pub const FLEXIBLE_ALLOW_LIST: &str = r"^[cmr][3-9][ag]?\..*$|^a[1-9]\..*$|^t[2-9]\..*$";

/// vCPU count used when flexible mode has no resource filters to go on
pub const FLEXIBLE_DEFAULT_VCPUS: i32 = 4;

/// How long the EKS preset reuses a fetched instance type list
pub const EKS_DEFAULT_TTL_IN_SECONDS: u64 = 600;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Multiplier for the lower bound of ranges derived from a base instance type
    pub aggregate_low_percentile: f64,

    /// Multiplier for the upper bound of ranges derived from a base instance type
    pub aggregate_high_percentile: f64,

    /// Flexible mode defaults
    pub flexible: FlexibleDefaults,

    /// EKS preset settings
    pub eks: EksConfig,
}

/// Defaults applied when the flexible flag is present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlexibleDefaults {
    pub cpu_architecture: CpuArchitecture,
    pub vcpus: i32,
    pub allow_list: String,
}

/// EKS preset configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EksConfig {
    pub ttl_in_seconds: u64,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            aggregate_low_percentile: AGGREGATE_LOW_PERCENTILE,
            aggregate_high_percentile: AGGREGATE_HIGH_PERCENTILE,
            flexible: FlexibleDefaults::default(),
            eks: EksConfig::default(),
        }
    }
}

impl Default for FlexibleDefaults {
    fn default() -> Self {
        Self {
            cpu_architecture: CpuArchitecture::X86_64,
            vcpus: FLEXIBLE_DEFAULT_VCPUS,
            allow_list: FLEXIBLE_ALLOW_LIST.to_string(),
        }
    }
}

impl Default for EksConfig {
    fn default() -> Self {
        Self {
            ttl_in_seconds: EKS_DEFAULT_TTL_IN_SECONDS,
        }
    }
}

impl TransformConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };

        config.validate()?;
        log::debug!("Loaded transform configuration from {}", path.display());
        Ok(config)
    }

    /// Check that the percentiles describe a usable band and the flexible
    /// allow-list compiles
    pub fn validate(&self) -> Result<()> {
        let low = self.aggregate_low_percentile;
        let high = self.aggregate_high_percentile;
        if !(low.is_finite() && high.is_finite()) || low <= 0.0 || high <= 0.0 {
            return Err(Error::Configuration {
                message: format!(
                    "aggregate percentiles must be positive numbers (got {} and {})",
                    low, high
                ),
            });
        }
        if low > high {
            return Err(Error::Configuration {
                message: format!(
                    "aggregate_low_percentile ({}) must not exceed aggregate_high_percentile ({})",
                    low, high
                ),
            });
        }
        if self.flexible.vcpus <= 0 {
            return Err(Error::Configuration {
                message: format!("flexible.vcpus must be positive (got {})", self.flexible.vcpus),
            });
        }
        if let Err(err) = Pattern::new(&self.flexible.allow_list) {
            return Err(Error::Configuration {
                message: format!("flexible.allow_list is invalid: {}", err),
            });
        }
        Ok(())
    }
}

/// Builder for creating configurations programmatically
pub struct TransformConfigBuilder {
    config: TransformConfig,
}

impl Default for TransformConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: TransformConfig::default(),
        }
    }

    /// Set the low/high multipliers for base instance type expansion
    pub fn aggregate_percentiles(mut self, low: f64, high: f64) -> Self {
        self.config.aggregate_low_percentile = low;
        self.config.aggregate_high_percentile = high;
        self
    }

    pub fn flexible_cpu_architecture(mut self, architecture: CpuArchitecture) -> Self {
        self.config.flexible.cpu_architecture = architecture;
        self
    }

    pub fn flexible_vcpus(mut self, vcpus: i32) -> Self {
        self.config.flexible.vcpus = vcpus;
        self
    }

    pub fn flexible_allow_list(mut self, pattern: impl Into<String>) -> Self {
        self.config.flexible.allow_list = pattern.into();
        self
    }

    pub fn eks_ttl_in_seconds(mut self, ttl: u64) -> Self {
        self.config.eks.ttl_in_seconds = ttl;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<TransformConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
