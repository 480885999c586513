//! Built-in filter transforms
//!
//! - [`BaseInstanceTypeTransform`] expands a reference instance type into resource ranges
//! - [`FlexibleTransform`] applies opinionated, broadly compatible defaults
//! - [`EmrTransform`] restricts results to EMR-compatible instance families
//!
//! Copyright (c) 2025 Instance Selector Team
//! Licensed under the Apache-2.0 license

use super::types::FiltersTransform;
use crate::catalog::InstanceTypeCatalog;
use crate::config::{FlexibleDefaults, AGGREGATE_HIGH_PERCENTILE, AGGREGATE_LOW_PERCENTILE};
use crate::filters::{ByteQuantity, ByteQuantityRangeFilter, Filters, IntRangeFilter, Pattern};
use crate::services::emr;
use crate::{Error, Result};
use std::sync::Arc;

fn scale(value: u64, factor: f64) -> u64 {
    (value as f64 * factor).round() as u64
}

/// Derives unset resource filters from a reference instance type
///
/// Memory and vCPU ranges span `low..=high` times the reference's values, so
/// "similar" tolerates somewhat smaller and noticeably larger instances.
/// `instance_type_base` is cleared once expanded.
pub struct BaseInstanceTypeTransform {
    catalog: Arc<dyn InstanceTypeCatalog>,
    low_percentile: f64,
    high_percentile: f64,
}

impl BaseInstanceTypeTransform {
    pub fn new(catalog: Arc<dyn InstanceTypeCatalog>) -> Self {
        Self {
            catalog,
            low_percentile: AGGREGATE_LOW_PERCENTILE,
            high_percentile: AGGREGATE_HIGH_PERCENTILE,
        }
    }

    /// Override the range multipliers
    pub fn with_percentiles(mut self, low: f64, high: f64) -> Self {
        self.low_percentile = low;
        self.high_percentile = high;
        self
    }
}

impl FiltersTransform for BaseInstanceTypeTransform {
    fn name(&self) -> &str {
        "base-instance-type"
    }

    fn transform(&self, filters: &Filters) -> Result<Filters> {
        let Some(base) = filters.instance_type_base.as_ref() else {
            return Ok(filters.clone());
        };

        let records = self
            .catalog
            .describe_instance_types(std::slice::from_ref(base))
            .map_err(|source| Error::Lookup {
                instance_type: base.clone(),
                source,
            })?;
        let info = records
            .into_iter()
            .next()
            .ok_or_else(|| Error::InstanceTypeNotFound {
                instance_type: base.clone(),
            })?;
        let architecture = info
            .supported_architectures
            .first()
            .copied()
            .ok_or_else(|| Error::Lookup {
                instance_type: base.clone(),
                source: anyhow::anyhow!("catalog record lists no supported architectures"),
            })?;

        log::debug!(
            "Expanding base instance type {} ({} vCPUs, {} MiB)",
            info.instance_type,
            info.default_vcpus,
            info.memory_size_in_mib
        );

        let mut result = filters.clone();
        if result.bare_metal.is_none() {
            result.bare_metal = Some(info.bare_metal);
        }
        if result.cpu_architecture.is_none() {
            result.cpu_architecture = Some(architecture);
        }
        if result.fpga.is_none() {
            result.fpga = Some(info.fpga_info.is_some());
        }
        if result.gpus_range.is_none() {
            let gpus = info
                .gpu_info
                .as_ref()
                .map(|gpu| gpu.total_gpu_count())
                .unwrap_or(0);
            result.gpus_range = Some(IntRangeFilter::exact(gpus as i32));
        }
        if result.memory_range.is_none() {
            let memory = info.memory_size_in_mib;
            result.memory_range = Some(ByteQuantityRangeFilter::new(
                ByteQuantity::from_mib(scale(memory, self.low_percentile)),
                ByteQuantity::from_mib(scale(memory, self.high_percentile)),
            ));
        }
        if result.vcpus_range.is_none() {
            let vcpus = u64::from(info.default_vcpus);
            result.vcpus_range = Some(IntRangeFilter::new(
                scale(vcpus, self.low_percentile) as i32,
                scale(vcpus, self.high_percentile) as i32,
            ));
        }
        result.instance_type_base = None;

        Ok(result)
    }
}

/// Fills unset filters with general-purpose defaults when `flexible` is present
#[derive(Debug, Clone, Default)]
pub struct FlexibleTransform {
    defaults: FlexibleDefaults,
}

impl FlexibleTransform {
    pub fn new(defaults: FlexibleDefaults) -> Self {
        Self { defaults }
    }
}

impl FiltersTransform for FlexibleTransform {
    fn name(&self) -> &str {
        "flexible"
    }

    fn transform(&self, filters: &Filters) -> Result<Filters> {
        if filters.flexible.is_none() {
            return Ok(filters.clone());
        }

        let mut result = filters.clone();
        if result.cpu_architecture.is_none() {
            result.cpu_architecture = Some(self.defaults.cpu_architecture);
        }
        if result.bare_metal.is_none() {
            result.bare_metal = Some(false);
        }
        if result.fpga.is_none() {
            result.fpga = Some(false);
        }
        if result.allow_list.is_none() {
            // The allow-list comes from user configuration, not a built-in preset.
            let allow_list =
                Pattern::new(&self.defaults.allow_list).map_err(|err| Error::Configuration {
                    message: format!("flexible.allow_list is invalid: {}", err),
                })?;
            result.allow_list = Some(allow_list);
        }
        // Only when neither resource is constrained; memory stays open on purpose.
        if result.vcpus_range.is_none() && result.memory_range.is_none() {
            result.vcpus_range = Some(IntRangeFilter::exact(self.defaults.vcpus));
        }

        Ok(result)
    }
}

/// Restricts the allow-list to EMR-compatible families when `emr` is present
#[derive(Debug, Clone, Copy, Default)]
pub struct EmrTransform;

impl FiltersTransform for EmrTransform {
    fn name(&self) -> &str {
        "emr"
    }

    fn transform(&self, filters: &Filters) -> Result<Filters> {
        if filters.emr.is_none() || filters.allow_list.is_some() {
            return Ok(filters.clone());
        }

        let mut result = filters.clone();
        result.allow_list = Some(emr::emr_allow_list(None)?);
        Ok(result)
    }
}
