//! Core traits for streaming distribution summaries
//!
//! Every summary implements the base [`Sketch`] trait. Summaries that answer
//! distributional queries over a numeric stream also implement
//! [`DistributionSketch`].

use core::fmt::Debug;

#[cfg(feature = "std")]
use std::{string::String, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

/// Error during sketch merge operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    /// Sketches have incompatible configurations
    #[error("incompatible config: expected {expected}, found {found}")]
    IncompatibleConfig { expected: String, found: String },
}

/// Core trait for all streaming sketches
pub trait Sketch: Clone + Debug {
    /// The type of item this sketch processes
    type Item: ?Sized;

    /// Add an item to the sketch
    fn update(&mut self, item: &Self::Item);

    /// Merge another sketch into this one
    ///
    /// Returns an error if sketches are incompatible
    fn merge(&mut self, other: &Self) -> Result<(), MergeError>;

    /// Reset sketch to empty state
    fn clear(&mut self);

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Weight of the items represented by the sketch
    ///
    /// Sketches that decay older observations report a fractional count.
    fn count(&self) -> f64;

    /// Check if sketch is empty
    fn is_empty(&self) -> bool {
        self.count() == 0.0
    }
}

/// Distribution summaries over a stream of `f64` samples
pub trait DistributionSketch: Sketch {
    /// Add a sample to the sketch
    fn add(&mut self, value: f64);

    /// Get the value at the given rank (0.0 to 1.0)
    ///
    /// `None` when the sketch cannot answer, e.g. it is empty or the rank
    /// is out of range.
    fn quantile(&self, rank: f64) -> Option<f64>;

    /// Fraction of the total weight at or below `value`
    fn cdf(&self, value: f64) -> f64;

    /// Weighted mean of the distribution
    fn mean(&self) -> f64;

    /// Weighted population variance of the distribution
    fn variance(&self) -> f64;

    /// Standard deviation of the distribution
    fn stddev(&self) -> f64 {
        crate::math::sqrt(self.variance())
    }

    /// Get median (50th percentile)
    fn median(&self) -> Option<f64> {
        self.quantile(0.5)
    }

    /// Get multiple quantiles at once
    fn quantiles(&self, ranks: &[f64]) -> Vec<Option<f64>> {
        ranks.iter().map(|&r| self.quantile(r)).collect()
    }
}
