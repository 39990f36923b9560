//! SetConfig: the tunable constants of a `HashSet`, fixed at construction.

use crate::capacity::{CapacityError, MAX_SIEVE_BOUND};

/// Load factor at which a rehash is triggered.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.8;
/// Smallest table the planner hands out.
pub const DEFAULT_MIN_CAPACITY: usize = 53;
/// Multiplier applied to the capacity on every rehash.
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

/// Immutable configuration for a `HashSet`.
///
/// The defaults (`0.8`, `53`, `2`) reproduce the classic behavior; every
/// set built without an explicit config uses them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SetConfig {
    /// Ratio `len / capacity` at which the table grows.
    pub load_factor: f64,
    /// Capacity returned by the planner for small requests.
    pub min_capacity: usize,
    /// Capacity multiplier used by rehash. Not re-validated as prime.
    pub growth_factor: usize,
}

impl SetConfig {
    pub const fn new() -> Self {
        Self {
            load_factor: DEFAULT_LOAD_FACTOR,
            min_capacity: DEFAULT_MIN_CAPACITY,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }

    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    pub fn with_min_capacity(mut self, min_capacity: usize) -> Self {
        self.min_capacity = min_capacity;
        self
    }

    pub fn with_growth_factor(mut self, growth_factor: usize) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    /// Check that the config describes a table that can actually grow.
    pub fn validate(&self) -> Result<(), CapacityError> {
        if !self.load_factor.is_finite() || self.load_factor <= 0.0 || self.load_factor > 1.0 {
            return Err(CapacityError::InvalidConfig(
                "load factor must lie in (0, 1]",
            ));
        }
        if self.min_capacity == 0 {
            return Err(CapacityError::InvalidConfig(
                "minimum capacity must be non-zero",
            ));
        }
        if self.min_capacity > MAX_SIEVE_BOUND {
            return Err(CapacityError::InvalidConfig(
                "minimum capacity exceeds the sieve bound",
            ));
        }
        if self.growth_factor < 2 {
            return Err(CapacityError::InvalidConfig(
                "growth factor must be at least 2",
            ));
        }
        Ok(())
    }
}

impl Default for SetConfig {
    fn default() -> Self {
        Self::new()
    }
}
