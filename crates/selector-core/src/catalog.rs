//! Instance type metadata lookup
//!
//! The base-instance-type transform asks an [`InstanceTypeCatalog`] for the specs of
//! a reference instance type. Production callers back this with the cloud API;
//! [`StaticCatalog`] serves fixed records for tests and offline use.

use crate::filters::CpuArchitecture;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// FPGA accelerator details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FpgaInfo {
    #[serde(default)]
    pub total_fpga_memory_in_mib: u64,
}

/// A single GPU device group on an instance type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuDeviceInfo {
    pub count: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
}

/// GPU details for an instance type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GpuInfo {
    #[serde(default)]
    pub gpus: Vec<GpuDeviceInfo>,
}

impl GpuInfo {
    /// Sum of devices across all GPU groups
    pub fn total_gpu_count(&self) -> u32 {
        self.gpus.iter().map(|gpu| gpu.count).sum()
    }
}

/// Specs of one instance type as reported by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceTypeInfo {
    pub instance_type: String,
    #[serde(default)]
    pub bare_metal: bool,
    pub supported_architectures: Vec<CpuArchitecture>,
    #[serde(default)]
    pub fpga_info: Option<FpgaInfo>,
    #[serde(default)]
    pub gpu_info: Option<GpuInfo>,
    pub memory_size_in_mib: u64,
    pub default_vcpus: u32,
}

/// Source of instance type metadata
///
/// Returns zero records for unknown ids; transport failures are errors.
pub trait InstanceTypeCatalog: Send + Sync {
    fn describe_instance_types(&self, instance_types: &[String]) -> anyhow::Result<Vec<InstanceTypeInfo>>;
}

/// In-memory catalog keyed by instance type id
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    instance_types: HashMap<String, InstanceTypeInfo>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, replacing any previous record with the same id
    pub fn with_instance_type(mut self, info: InstanceTypeInfo) -> Self {
        self.insert(info);
        self
    }

    pub fn insert(&mut self, info: InstanceTypeInfo) {
        self.instance_types.insert(info.instance_type.clone(), info);
    }

    pub fn len(&self) -> usize {
        self.instance_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instance_types.is_empty()
    }

    /// Build a catalog from a JSON array of records
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<InstanceTypeInfo> = serde_json::from_str(json)?;
        Ok(records.into_iter().collect())
    }

    /// Load a catalog from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

impl FromIterator<InstanceTypeInfo> for StaticCatalog {
    fn from_iter<I: IntoIterator<Item = InstanceTypeInfo>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for info in iter {
            catalog.insert(info);
        }
        catalog
    }
}

impl InstanceTypeCatalog for StaticCatalog {
    fn describe_instance_types(&self, instance_types: &[String]) -> anyhow::Result<Vec<InstanceTypeInfo>> {
        Ok(instance_types
            .iter()
            .filter_map(|id| self.instance_types.get(id).cloned())
            .collect())
    }
}
