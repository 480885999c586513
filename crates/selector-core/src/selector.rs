//! Selector facade wiring the standard transform order
//!
//! The base instance type expands first because it fills several fields and then
//! clears itself; flexible and EMR defaults follow, and the service preset merge
//! runs last so explicit and derived values take precedence over preset values.

use crate::catalog::InstanceTypeCatalog;
use crate::config::TransformConfig;
use crate::filters::Filters;
use crate::services::{EksInstanceTypeSource, EniMaxPodsSource, ServiceRegistry};
use crate::transform::{
    BaseInstanceTypeTransform, EmrTransform, FlexibleTransform, TransformPipeline,
};
use crate::Result;
use std::sync::Arc;

/// Entry point that turns user filters into the filters handed to the matching engine
#[derive(Clone)]
pub struct Selector {
    catalog: Arc<dyn InstanceTypeCatalog>,
    registry: Arc<ServiceRegistry>,
    config: TransformConfig,
}

impl Selector {
    /// Create a selector with the default configuration and built-in services
    ///
    /// The EKS preset starts without AMI data; supply it with [`Selector::with_eks_source`].
    pub fn new(catalog: Arc<dyn InstanceTypeCatalog>) -> Self {
        let config = TransformConfig::default();
        let registry =
            ServiceRegistry::with_builtin_services(&config, Arc::new(EniMaxPodsSource::new()));
        Self {
            catalog,
            registry: Arc::new(registry),
            config,
        }
    }

    /// Replace the configuration, rebuilding the built-in services with it
    ///
    /// The configuration is validated first, so a config assembled by hand gets
    /// the same checks as one loaded from a file.
    pub fn with_config(
        mut self,
        config: TransformConfig,
        eks_source: Arc<dyn EksInstanceTypeSource>,
    ) -> Result<Self> {
        config.validate()?;
        self.registry = Arc::new(ServiceRegistry::with_builtin_services(&config, eks_source));
        self.config = config;
        Ok(self)
    }

    /// Rebuild the built-in services around an EKS AMI data source
    pub fn with_eks_source(mut self, eks_source: Arc<dyn EksInstanceTypeSource>) -> Self {
        self.registry = Arc::new(ServiceRegistry::with_builtin_services(&self.config, eks_source));
        self
    }

    /// Use a caller-built registry
    pub fn with_registry(mut self, registry: ServiceRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// The standard pipeline: base instance type, flexible, EMR, service presets
    pub fn pipeline(&self) -> TransformPipeline {
        TransformPipeline::new()
            .add_transform(
                BaseInstanceTypeTransform::new(self.catalog.clone()).with_percentiles(
                    self.config.aggregate_low_percentile,
                    self.config.aggregate_high_percentile,
                ),
            )
            .add_transform(FlexibleTransform::new(self.config.flexible.clone()))
            .add_transform(EmrTransform)
            .add_transform(self.registry.clone())
    }

    /// Run the standard pipeline over `filters`
    pub fn transform_filters(&self, filters: &Filters) -> Result<Filters> {
        self.pipeline().transform(filters)
    }
}
