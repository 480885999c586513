//! Filter transformation system
//!
//! Transforms derive or default [`Filters`](crate::Filters) fields before the
//! filters reach the matching engine. They are chained in a
//! [`TransformPipeline`], which stops at the first failure.
//!
//! # Module Organization
//!
//! - [`types`] - the [`FiltersTransform`] trait and closure adapter
//! - [`pipeline`] - ordered pipeline runner
//! - [`built_in`] - base instance type, flexible and EMR transforms
//!
//! # Examples
//!
//! ```
//! use selector_core::{Filters, TransformPipeline};
//! use selector_core::transform::built_in::FlexibleTransform;
//!
//! let pipeline = TransformPipeline::new().add_transform(FlexibleTransform::default());
//!
//! let input = Filters {
//!     flexible: Some(true),
//!     ..Default::default()
//! };
//! let output = pipeline.transform(&input).unwrap();
//! assert_eq!(output.bare_metal, Some(false));
//! ```
//!
//! Copyright (c) 2025 Instance Selector Team
//! Licensed under the Apache-2.0 license

pub mod types;

pub mod pipeline;

pub mod built_in;


pub use built_in::{BaseInstanceTypeTransform, EmrTransform, FlexibleTransform};
pub use pipeline::TransformPipeline;
pub use types::{FiltersTransform, TransformFn, TransformerFunction};
