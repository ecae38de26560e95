//! Recency-weighted histograms
//!
//! This module provides a bounded-memory histogram that summarizes a stream
//! of samples with a fixed number of weighted bins, fading older samples on
//! every insertion.
//!
//! # Algorithms
//!
//! - [`WeightedHistogram`]: closest-pair bin merging with exponential decay
//!
//! # Example
//!
//! ```
//! use decayhist::histogram::WeightedHistogram;
//!
//! let mut hist = WeightedHistogram::new(32, 0.05);
//!
//! for value in [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0] {
//!     hist.insert(value);
//! }
//!
//! println!("Median: {:?}", hist.quantile(0.5));
//! println!("{}", hist);
//! ```

mod bin;
mod render;
mod weighted;

pub use bin::Bin;
pub use render::BAR_SCALE;
pub use weighted::WeightedHistogram;
