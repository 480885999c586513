//! Core types for the filter transform system
//!
//! Copyright (c) 2025 Instance Selector Team
//! Licensed under the Apache-2.0 license

use crate::filters::Filters;
use crate::Result;
use std::fmt;
use std::sync::Arc;

/// A step that derives or defaults filter fields
///
/// Transforms read the filters handed to them and return a new value; the input
/// is never modified. Every transform follows fill-if-empty: a field the caller
/// already set is left alone.
pub trait FiltersTransform: Send + Sync {
    /// Stable name used in logs and pipeline errors
    fn name(&self) -> &str;

    /// Produce the transformed filters
    fn transform(&self, filters: &Filters) -> Result<Filters>;
}

/// A function that can transform filters
pub type TransformerFunction = dyn Fn(&Filters) -> Result<Filters> + Send + Sync;

/// A named closure usable as a [`FiltersTransform`]
#[derive(Clone)]
pub struct TransformFn {
    name: String,
    transformer: Arc<TransformerFunction>,
}

impl TransformFn {
    pub fn new<F>(name: impl Into<String>, transformer: F) -> Self
    where
        F: Fn(&Filters) -> Result<Filters> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            transformer: Arc::new(transformer),
        }
    }
}

impl fmt::Debug for TransformFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformFn").field("name", &self.name).finish()
    }
}

impl FiltersTransform for TransformFn {
    fn name(&self) -> &str {
        &self.name
    }

    fn transform(&self, filters: &Filters) -> Result<Filters> {
        (self.transformer)(filters)
    }
}

impl<T: FiltersTransform + ?Sized> FiltersTransform for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn transform(&self, filters: &Filters) -> Result<Filters> {
        (**self).transform(filters)
    }
}

impl<T: FiltersTransform + ?Sized> FiltersTransform for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn transform(&self, filters: &Filters) -> Result<Filters> {
        (**self).transform(filters)
    }
}
