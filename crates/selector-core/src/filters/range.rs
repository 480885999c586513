//! Inclusive range primitives used by resource filters

use super::byte_quantity::ByteQuantity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive `[lower_bound, upper_bound]` range over an ordered value
///
/// Callers are expected to keep `lower_bound <= upper_bound`; [`RangeFilter::is_valid`]
/// reports whether that holds. Ranges are replaced wholesale by transforms, never
/// adjusted in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeFilter<T> {
    pub lower_bound: T,
    pub upper_bound: T,
}

/// Range over integer counts (vCPUs, GPUs)
pub type IntRangeFilter = RangeFilter<i32>;

/// Range over memory amounts
pub type ByteQuantityRangeFilter = RangeFilter<ByteQuantity>;

impl<T> RangeFilter<T> {
    pub fn new(lower_bound: T, upper_bound: T) -> Self {
        Self {
            lower_bound,
            upper_bound,
        }
    }
}

impl<T: Clone> RangeFilter<T> {
    /// Range admitting exactly one value
    pub fn exact(value: T) -> Self {
        Self {
            lower_bound: value.clone(),
            upper_bound: value,
        }
    }
}

impl<T: PartialOrd> RangeFilter<T> {
    /// Whether the bounds are ordered
    pub fn is_valid(&self) -> bool {
        self.lower_bound <= self.upper_bound
    }

    /// Whether `value` falls inside the inclusive bounds
    pub fn contains(&self, value: &T) -> bool {
        &self.lower_bound <= value && value <= &self.upper_bound
    }
}

impl<T: fmt::Display> fmt::Display for RangeFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lower_bound, self.upper_bound)
    }
}
