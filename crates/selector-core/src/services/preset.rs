//! Service preset capability

use crate::filters::Filters;
use crate::Result;
use std::fmt;
use std::sync::Arc;

/// A named bundle of default filters for a workload or managed service
///
/// `version` is the part of the service filter after the first `-`, lower-cased,
/// or empty when no version was given. Implementations must not depend on hidden
/// mutable state for their result.
pub trait ServicePreset: Send + Sync {
    fn filters(&self, version: &str) -> Result<Filters>;
}

/// A closure usable as a [`ServicePreset`]
#[derive(Clone)]
pub struct PresetFn {
    preset: Arc<dyn Fn(&str) -> Result<Filters> + Send + Sync>,
}

impl PresetFn {
    pub fn new<F>(preset: F) -> Self
    where
        F: Fn(&str) -> Result<Filters> + Send + Sync + 'static,
    {
        Self {
            preset: Arc::new(preset),
        }
    }
}

impl fmt::Debug for PresetFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PresetFn")
    }
}

impl ServicePreset for PresetFn {
    fn filters(&self, version: &str) -> Result<Filters> {
        (self.preset)(version)
    }
}

/// A preset returning the same filters for every version
#[derive(Debug, Clone, Default)]
pub struct StaticPreset {
    filters: Filters,
}

impl StaticPreset {
    pub fn new(filters: Filters) -> Self {
        Self { filters }
    }
}

impl ServicePreset for StaticPreset {
    fn filters(&self, _version: &str) -> Result<Filters> {
        Ok(self.filters.clone())
    }
}
