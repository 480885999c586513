//! Selector Core - filter transform pipeline for choosing cloud instance types
//!
//! This crate turns user-supplied instance type criteria into the complete filter
//! set consumed by an instance matching engine.
//!
//! # Main Components
//!
//! - **Filters**: the optional-field criteria aggregate, with range, memory and pattern primitives
//! - **Transforms**: base-instance-type expansion, flexible defaults and EMR allow-lists
//! - **Pipeline**: ordered transform runner that stops at the first failure
//! - **Services**: named presets merged with fill-if-empty semantics
//! - **Sort options**: parser for `column:direction` sort strings
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use selector_core::{CpuArchitecture, Filters, Selector, StaticCatalog};
//!
//! fn example() -> selector_core::Result<()> {
//!     let selector = Selector::new(Arc::new(StaticCatalog::new()));
//!     let filters = Filters {
//!         flexible: Some(true),
//!         cpu_architecture: Some(CpuArchitecture::Arm64),
//!         ..Default::default()
//!     };
//!
//!     let expanded = selector.transform_filters(&filters)?;
//!     assert_eq!(expanded.cpu_architecture, Some(CpuArchitecture::Arm64));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod selector;
pub mod services;
pub mod sort;
pub mod transform;

#[cfg(test)]
mod proptest_strategies;

// Re-export main types for convenience
pub use catalog::{FpgaInfo, GpuDeviceInfo, GpuInfo, InstanceTypeCatalog, InstanceTypeInfo, StaticCatalog};
pub use config::{
    TransformConfig, TransformConfigBuilder, AGGREGATE_HIGH_PERCENTILE, AGGREGATE_LOW_PERCENTILE,
};
pub use error::{Error, Result};
pub use filters::{
    ByteQuantity, ByteQuantityRangeFilter, CpuArchitecture, FillIfEmpty, Filters, IntRangeFilter,
    Pattern, RangeFilter,
};
pub use selector::Selector;
pub use services::{ServicePreset, ServiceRegistry};
pub use sort::{SortColumn, SortDirection, SortOptions};
pub use transform::{FiltersTransform, TransformFn, TransformPipeline};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    /// Shared pipeline pieces must be usable from worker threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send_sync<T: Send + Sync>() {}

        require_send_sync::<Filters>();
        require_send_sync::<ServiceRegistry>();
        require_send_sync::<TransformPipeline>();
        require_send_sync::<Selector>();
    }
}
