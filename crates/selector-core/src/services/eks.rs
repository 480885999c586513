//! EKS-optimized AMI instance type support
//!
//! The EKS AMI ships an `eni-max-pods.txt` table listing every instance type the
//! AMI supports together with its pod limit. The preset turns that list into an
//! explicit `instance_types` filter, reusing a fetched list for a configurable TTL.

use super::preset::ServicePreset;
use super::version::PresetVersion;
use crate::config::EKS_DEFAULT_TTL_IN_SECONDS;
use crate::filters::Filters;
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Source of the instance types supported by the EKS AMI for a Kubernetes version
///
/// An empty `version` asks for the source's default release.
pub trait EksInstanceTypeSource: Send + Sync {
    fn supported_instance_types(&self, version: &str) -> anyhow::Result<Vec<String>>;
}

/// Extract instance type ids from `eni-max-pods.txt` content
///
/// Lines look like `m5.large 29`; blank lines and `#` comments are skipped.
pub fn parse_eni_max_pods(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// In-memory [`EksInstanceTypeSource`] built from `eni-max-pods.txt` snapshots
#[derive(Debug, Clone, Default)]
pub struct EniMaxPodsSource {
    releases: HashMap<String, Vec<String>>,
}

impl EniMaxPodsSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the table for a Kubernetes version
    pub fn with_release(mut self, version: &str, eni_max_pods: &str) -> Self {
        self.releases
            .insert(version.to_string(), parse_eni_max_pods(eni_max_pods));
        self
    }

    /// Add the table served when no version is requested
    pub fn with_default_release(self, eni_max_pods: &str) -> Self {
        self.with_release("", eni_max_pods)
    }
}

impl EksInstanceTypeSource for EniMaxPodsSource {
    fn supported_instance_types(&self, version: &str) -> anyhow::Result<Vec<String>> {
        self.releases.get(version).cloned().ok_or_else(|| {
            if version.is_empty() {
                anyhow::anyhow!("no default EKS AMI release is available")
            } else {
                anyhow::anyhow!("no EKS AMI instance type data for Kubernetes version {}", version)
            }
        })
    }
}

#[derive(Debug, Clone)]
struct CachedInstanceTypes {
    fetched_at: Instant,
    instance_types: Vec<String>,
}

/// Preset for `--service eks[-<kubernetes version>]`
pub struct EksPreset {
    source: Arc<dyn EksInstanceTypeSource>,
    ttl: Duration,
    cache: RwLock<HashMap<String, CachedInstanceTypes>>,
}

impl EksPreset {
    pub fn new(source: Arc<dyn EksInstanceTypeSource>) -> Self {
        Self {
            source,
            ttl: Duration::from_secs(EKS_DEFAULT_TTL_IN_SECONDS),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// How long a fetched list is reused
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    fn cached(&self, version: &str) -> Option<Vec<String>> {
        let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
        cache
            .get(version)
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.instance_types.clone())
    }

    fn instance_types(&self, version: &str) -> Result<Vec<String>> {
        if let Some(instance_types) = self.cached(version) {
            log::debug!("Using cached EKS instance types for version '{}'", version);
            return Ok(instance_types);
        }

        let _span = tracing::debug_span!("eks_instance_types", version = version).entered();
        let instance_types = self
            .source
            .supported_instance_types(version)
            .map_err(|source| Error::Preset {
                service: "eks".to_string(),
                source,
            })?;
        if instance_types.is_empty() {
            return Err(Error::Preset {
                service: "eks".to_string(),
                source: anyhow::anyhow!("EKS AMI lists no instance types for version '{}'", version),
            });
        }

        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        cache.insert(
            version.to_string(),
            CachedInstanceTypes {
                fetched_at: Instant::now(),
                instance_types: instance_types.clone(),
            },
        );
        Ok(instance_types)
    }
}

impl ServicePreset for EksPreset {
    fn filters(&self, version: &str) -> Result<Filters> {
        if !version.is_empty() {
            PresetVersion::parse(version)?;
        }

        Ok(Filters {
            instance_types: Some(self.instance_types(version)?),
            ..Default::default()
        })
    }
}
