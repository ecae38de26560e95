//! Histogram configuration
//!
//! A [`HistogramConfig`] carries the two construction parameters of a
//! [`WeightedHistogram`]: the bin budget and the decay factor. It can be
//! validated on its own, which makes it a convenient value to embed in an
//! application's configuration file (see the `serde` feature).

use crate::histogram::WeightedHistogram;

/// Bin budget used by [`HistogramConfig::default`]
pub const DEFAULT_MAX_BINS: usize = 64;

/// Averaging window (in samples) used by [`HistogramConfig::default`]
pub const DEFAULT_WINDOW: usize = 60;

/// Error raised when histogram parameters are out of range
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The bin budget must allow at least one bin
    #[error("max_bins must be greater than zero")]
    ZeroMaxBins,
    /// The decay factor must be finite and in (0, 1]
    #[error("alpha must be in (0, 1], got {0}")]
    InvalidAlpha(f64),
    /// The averaging window must span at least one sample
    #[error("window must be greater than zero")]
    ZeroWindow,
}

/// Construction parameters for a [`WeightedHistogram`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct HistogramConfig {
    /// Upper bound on the number of retained bins
    pub max_bins: usize,
    /// Fraction of weight every untouched bin loses on each insertion
    pub alpha: f64,
}

impl HistogramConfig {
    /// Create a configuration from an explicit decay factor
    pub fn new(max_bins: usize, alpha: f64) -> Self {
        Self { max_bins, alpha }
    }

    /// Create a configuration whose decay averages over roughly `window` samples
    ///
    /// The decay factor is `2 / (window + 1)`, the usual smoothing constant of
    /// an exponential moving average over `window` observations.
    pub fn from_window(max_bins: usize, window: usize) -> Result<Self, ConfigError> {
        if window == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        let config = Self::new(max_bins, alpha_for_window(window));
        config.validate()?;
        Ok(config)
    }

    /// Check that both parameters are in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bins == 0 {
            return Err(ConfigError::ZeroMaxBins);
        }
        // NaN fails both comparisons
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(ConfigError::InvalidAlpha(self.alpha));
        }
        Ok(())
    }

    /// Build an empty histogram from this configuration
    pub fn build(&self) -> Result<WeightedHistogram, ConfigError> {
        WeightedHistogram::try_new(self.max_bins, self.alpha)
    }
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BINS, alpha_for_window(DEFAULT_WINDOW))
    }
}

#[inline]
pub(crate) fn alpha_for_window(window: usize) -> f64 {
    2.0 / (window as f64 + 1.0)
}
