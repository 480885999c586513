//! Service preset registry
//!
//! Maps lower-cased service names to [`ServicePreset`] implementations and merges
//! the selected preset into a working set of filters. Registration happens while
//! the registry is being built; afterwards it is only read, so a registry shared
//! behind an `Arc` can serve concurrent lookups without locking.

use super::eks::{EksInstanceTypeSource, EksPreset};
use super::emr::EmrPreset;
use super::preset::ServicePreset;
use crate::config::TransformConfig;
use crate::filters::{FillIfEmpty, Filters};
use crate::transform::FiltersTransform;
use crate::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Split a service filter into `(name, version)`
///
/// The input is lower-cased and split on the first `-`; the version is empty when
/// there is no `-`.
pub fn parse_service(service: &str) -> (String, String) {
    let service = service.trim().to_lowercase();
    match service.split_once('-') {
        Some((name, version)) => (name.to_string(), version.to_string()),
        None => (service, String::new()),
    }
}

/// Registry of named service presets
#[derive(Clone, Default)]
pub struct ServiceRegistry {
    services: HashMap<String, Arc<dyn ServicePreset>>,
}

impl ServiceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            services: HashMap::new(),
        }
    }

    /// Create a registry holding the built-in `emr` and `eks` presets
    pub fn with_builtin_services(
        config: &TransformConfig,
        eks_source: Arc<dyn EksInstanceTypeSource>,
    ) -> Self {
        let mut registry = Self::new();
        registry.register_builtin_services(config, eks_source);
        registry
    }

    /// Register the built-in `emr` and `eks` presets
    pub fn register_builtin_services(
        &mut self,
        config: &TransformConfig,
        eks_source: Arc<dyn EksInstanceTypeSource>,
    ) {
        self.register("emr", EmrPreset::default());
        self.register(
            "eks",
            EksPreset::new(eks_source).with_ttl(Duration::from_secs(config.eks.ttl_in_seconds)),
        );
    }

    /// Register a preset under `name`, replacing any previous registration
    pub fn register<P>(&mut self, name: &str, preset: P)
    where
        P: ServicePreset + 'static,
    {
        self.register_shared(name, Arc::new(preset));
    }

    /// Register an already shared preset under `name`
    pub fn register_shared(&mut self, name: &str, preset: Arc<dyn ServicePreset>) {
        let name = name.to_lowercase();
        if self.services.insert(name.clone(), preset).is_some() {
            log::debug!("Replaced service preset registration for '{}'", name);
        }
    }

    /// Whether a preset is registered under `name` (case-insensitive)
    pub fn contains(&self, name: &str) -> bool {
        self.services.contains_key(&name.to_lowercase())
    }

    /// Registered service names, sorted
    pub fn service_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.services.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Merge the preset named by `filters.service` into a copy of `filters`
    ///
    /// Values already set in `filters` win over the preset's values. Returns an
    /// unchanged copy when no service is set.
    pub fn execute_transforms(&self, filters: &Filters) -> Result<Filters> {
        let Some(service) = filters.service.as_deref() else {
            return Ok(filters.clone());
        };

        let (name, version) = parse_service(service);
        let preset = self
            .services
            .get(&name)
            .ok_or_else(|| Error::UnknownService { name: name.clone() })?;

        log::debug!("Applying service preset '{}' (version '{}')", name, version);
        let service_filters = preset.filters(&version)?;

        let mut merged = filters.clone();
        merged.fill_if_empty(service_filters)?;
        Ok(merged)
    }
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("services", &self.service_names())
            .finish()
    }
}

impl FiltersTransform for ServiceRegistry {
    fn name(&self) -> &str {
        "service-registry"
    }

    fn transform(&self, filters: &Filters) -> Result<Filters> {
        self.execute_transforms(filters)
    }
}
