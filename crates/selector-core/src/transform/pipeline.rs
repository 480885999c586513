//! Transform pipeline implementation
//!
//! Applies an ordered list of transforms, each one seeing the output of the
//! previous. The first failure stops the run and is reported together with the
//! name of the transform that produced it.
//!
//! Copyright (c) 2025 Instance Selector Team
//! Licensed under the Apache-2.0 license

use super::types::FiltersTransform;
use crate::filters::Filters;
use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// An ordered pipeline of filter transforms
#[derive(Clone, Default)]
pub struct TransformPipeline {
    /// Transforms in application order
    transforms: Vec<Arc<dyn FiltersTransform>>,
}

impl TransformPipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    /// Append a transform to the end of the pipeline
    pub fn add_transform<T>(mut self, transform: T) -> Self
    where
        T: FiltersTransform + 'static,
    {
        self.transforms.push(Arc::new(transform));
        self
    }

    /// Append an already shared transform
    pub fn add_shared(mut self, transform: Arc<dyn FiltersTransform>) -> Self {
        self.transforms.push(transform);
        self
    }

    /// Append multiple transforms, preserving their order
    pub fn add_transforms<I>(mut self, transforms: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn FiltersTransform>>,
    {
        self.transforms.extend(transforms);
        self
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Names of the transforms in application order
    pub fn transform_names(&self) -> Vec<&str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }

    /// Apply all transforms in order
    ///
    /// The caller's filters are left untouched; on error no partial result is returned.
    pub fn transform(&self, filters: &Filters) -> Result<Filters> {
        let _span = tracing::debug_span!("filter_pipeline", stages = self.transforms.len()).entered();

        let mut current = filters.clone();
        for transform in &self.transforms {
            match transform.transform(&current) {
                Ok(next) => {
                    if next != current {
                        log::debug!("Transform '{}' updated filters", transform.name());
                    }
                    current = next;
                }
                Err(e) => {
                    log::debug!("Transform '{}' failed: {}", transform.name(), e);
                    return Err(Error::Transform {
                        transform: transform.name().to_string(),
                        source: Box::new(e),
                    });
                }
            }
        }

        Ok(current)
    }
}

impl fmt::Debug for TransformPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformPipeline")
            .field("transforms", &self.transform_names())
            .finish()
    }
}

impl FiltersTransform for TransformPipeline {
    fn name(&self) -> &str {
        "pipeline"
    }

    fn transform(&self, filters: &Filters) -> Result<Filters> {
        TransformPipeline::transform(self, filters)
    }
}
