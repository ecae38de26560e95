//! # Decayhist
//!
//! Bounded-memory streaming histograms with recency weighting.
//!
//! A [`WeightedHistogram`] ingests an unbounded stream of `f64` samples and
//! keeps a fixed number of weighted bins. Every insertion fades the bins it
//! did not touch, so the summary follows the recent shape of the stream
//! rather than its whole history. The raw samples are never stored.
//!
//! ## Features
//!
//! - **Bounded memory**: at most `max_bins` bins, merged closest-first
//! - **Recency weighting**: exponential decay per inserted sample
//! - **Queries**: quantiles, CDF, mean, variance, decayed count
//! - **Mergeability**: histograms with the same configuration can be combined
//!
//! ## Quick Start
//!
//! ```rust
//! use decayhist::prelude::*;
//!
//! // 64 bins, averaging over roughly the last 100 samples
//! let mut hist = WeightedHistogram::with_window(64, 100).unwrap();
//! for latency_ms in [12.0, 15.0, 11.0, 240.0, 13.0, 14.0] {
//!     hist.insert(latency_ms);
//! }
//!
//! println!("p50: {:?}", hist.quantile(0.5));
//! println!("mean: {}", hist.mean());
//! println!("{}", hist);
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use decayhist::HistogramConfig;
//!
//! let config = HistogramConfig::from_window(20, 60).unwrap();
//! let hist = config.build().unwrap();
//! assert_eq!(hist.max_bins(), 20);
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support; without it the crate is
//!   `no_std` + `alloc` and uses `libm` for math
//! - `serde`: Serialization of histograms and bins, (de)serialization of
//!   [`HistogramConfig`]
//!
//! ## Logging
//!
//! Diagnostic events are emitted through [`tracing`] at `trace` and `debug`
//! level. The library never installs a subscriber.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod config;
pub mod histogram;
pub mod traits;

mod math;

pub mod prelude {
    pub use crate::config::{ConfigError, HistogramConfig};
    pub use crate::histogram::{Bin, WeightedHistogram};
    pub use crate::traits::*;
}

pub use config::{ConfigError, HistogramConfig};
pub use histogram::{Bin, WeightedHistogram};
pub use traits::{DistributionSketch, MergeError, Sketch};
