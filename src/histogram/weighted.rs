//! Exponentially weighted streaming histogram
//!
//! A fixed budget of bins summarizes an unbounded stream. Each insertion
//! lands in (or creates) one bin and fades every other bin by the decay
//! factor, so the summary leans toward recent samples. The unit of time is
//! one sample, not wall-clock time.
//!
//! # Thread Safety
//!
//! `WeightedHistogram` is a plain value with no interior mutability. It is
//! `Send` and `Sync`, but concurrent mutation needs external locking, e.g.
//! `Arc<Mutex<_>>`.

use crate::config::{ConfigError, HistogramConfig};
use crate::histogram::bin::Bin;
use crate::traits::{DistributionSketch, MergeError, Sketch};
use core::cmp::Ordering;
use tracing::{debug, trace};

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// Helper macro for format! in both std and no_std
macro_rules! fmt {
    ($($arg:tt)*) => {{
        #[cfg(feature = "std")]
        { format!($($arg)*) }
        #[cfg(not(feature = "std"))]
        { alloc::format!($($arg)*) }
    }};
}

/// Relative tolerance when comparing decay factors of two histograms
const ALPHA_TOLERANCE: f64 = 1e-9;

/// Bounded-memory histogram with exponential recency decay
///
/// The histogram keeps at most `max_bins` bins, sorted by value. Inserting a
/// sample:
///
/// 1. increments the bin holding exactly that value, or inserts a new bin of
///    weight 1 at its sorted position;
/// 2. multiplies the weight of every *other* bin by `1 - alpha`;
/// 3. while over budget, merges the two adjacent bins whose values are
///    closest (first such pair on ties) into their weighted average.
///
/// Queries (quantile, CDF, mean, variance) read the bins directly and never
/// mutate.
///
/// # Decay Factor
///
/// `alpha` is the fraction of weight an untouched bin loses per insertion:
/// - `alpha` near 0 keeps history for a long time
/// - `alpha = 1` drops all untouched weight on every insertion
/// - `2 / (N + 1)` approximates a moving window of `N` samples
///   (see [`WeightedHistogram::with_window`])
///
/// # Example
///
/// ```
/// use decayhist::WeightedHistogram;
///
/// let mut hist = WeightedHistogram::new(20, 0.05);
/// for i in 1..=1000 {
///     hist.insert((i % 100) as f64);
/// }
///
/// let p90 = hist.quantile(0.9).unwrap();
/// assert!(p90 > 50.0);
/// assert!(hist.len() <= 20);
/// ```
#[derive(Clone, Debug)]
pub struct WeightedHistogram {
    /// Bins sorted strictly ascending by value
    bins: Vec<Bin>,
    /// Upper bound on `bins.len()` between public calls
    max_bins: usize,
    /// Sum of all bin weights
    total: f64,
    /// Per-insertion decay applied to untouched bins
    alpha: f64,
}

impl WeightedHistogram {
    /// Create a new histogram with the given bin budget and decay factor
    ///
    /// There is no optimal bin count; somewhere between 20 and 80 bins is
    /// usually enough.
    ///
    /// # Panics
    ///
    /// Panics if `max_bins` is zero or `alpha` is not in `(0, 1]`.
    /// Use [`WeightedHistogram::try_new`] to get an error instead.
    pub fn new(max_bins: usize, alpha: f64) -> Self {
        assert!(max_bins > 0, "max_bins must be greater than zero");
        assert!(
            alpha > 0.0 && alpha <= 1.0,
            "alpha must be in (0, 1], got {}",
            alpha
        );
        Self::empty(max_bins, alpha)
    }

    /// Create a new histogram, returning an error for out-of-range parameters
    pub fn try_new(max_bins: usize, alpha: f64) -> Result<Self, ConfigError> {
        HistogramConfig::new(max_bins, alpha).validate()?;
        Ok(Self::empty(max_bins, alpha))
    }

    /// Create a histogram whose decay averages over roughly `window` samples
    ///
    /// ```
    /// use decayhist::WeightedHistogram;
    ///
    /// let hist = WeightedHistogram::with_window(32, 9).unwrap();
    /// assert!((hist.alpha() - 0.2).abs() < 1e-12);
    /// ```
    pub fn with_window(max_bins: usize, window: usize) -> Result<Self, ConfigError> {
        HistogramConfig::from_window(max_bins, window)?.build()
    }

    fn empty(max_bins: usize, alpha: f64) -> Self {
        Self {
            // One spare slot for the bin that exists between insertion and compaction
            bins: Vec::with_capacity(max_bins.saturating_add(1)),
            max_bins,
            total: 0.0,
            alpha,
        }
    }

    /// Configuration this histogram was built with
    pub fn config(&self) -> HistogramConfig {
        HistogramConfig::new(self.max_bins, self.alpha)
    }

    /// Maximum number of bins
    pub fn max_bins(&self) -> usize {
        self.max_bins
    }

    /// Decay factor
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Current bins, sorted ascending by value
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Number of bins currently held
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// True when no sample has been retained
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Total decayed weight, i.e. the approximate number of samples
    ///
    /// This is not the number of `insert` calls: older samples count for
    /// less the more samples arrived after them.
    pub fn count(&self) -> f64 {
        self.total
    }

    /// Smallest retained bin value
    pub fn min(&self) -> Option<f64> {
        self.bins.first().map(|bin| bin.value)
    }

    /// Largest retained bin value
    pub fn max(&self) -> Option<f64> {
        self.bins.last().map(|bin| bin.value)
    }

    /// Add one observation with unit weight
    ///
    /// NaN and infinite samples are ignored and leave the histogram as it was.
    pub fn insert(&mut self, sample: f64) {
        if !sample.is_finite() {
            trace!(sample, "Ignoring non-finite sample.");
            return;
        }

        let touched = match self.position(sample) {
            Ok(index) => {
                self.bins[index].weight += 1.0;
                index
            }
            Err(index) => {
                self.bins.insert(index, Bin::new(sample, 1.0));
                index
            }
        };

        self.decay_except(touched);
        self.compact();
    }

    /// Insert every sample of a slice, in order
    pub fn insert_many(&mut self, samples: &[f64]) {
        for &sample in samples {
            self.insert(sample);
        }
    }

    /// Locate `value`: `Ok` with the index of an equal bin, or `Err` with the
    /// index of the first bin greater than it.
    ///
    /// Bins are strictly sorted and finite, so this agrees with an ascending
    /// linear scan.
    fn position(&self, value: f64) -> Result<usize, usize> {
        self.bins.binary_search_by(|bin| {
            bin.value
                .partial_cmp(&value)
                .unwrap_or(Ordering::Less)
        })
    }

    /// Fade every bin except `touched` by the decay factor
    fn decay_except(&mut self, touched: usize) {
        let retained = 1.0 - self.alpha;
        for (index, bin) in self.bins.iter_mut().enumerate() {
            if index != touched {
                bin.weight *= retained;
            }
        }
    }

    /// Merge closest neighbours until the bin budget holds, then refresh the total
    fn compact(&mut self) {
        while self.bins.len() > self.max_bins {
            let index = self.closest_pair();
            let lo = self.bins[index - 1];
            let hi = self.bins[index];
            let merged = Bin::merged(&lo, &hi);
            trace!(
                lo = lo.value,
                hi = hi.value,
                merged = merged.value,
                weight = merged.weight,
                "Merging closest bins."
            );
            self.bins[index - 1] = merged;
            self.bins.remove(index);
        }
        self.refresh_total();
    }

    /// Index `i >= 1` minimizing `bins[i] - bins[i - 1]`; the lowest index wins ties.
    fn closest_pair(&self) -> usize {
        let mut best_index = 1;
        let mut best_gap = f64::INFINITY;
        for (offset, pair) in self.bins.windows(2).enumerate() {
            let gap = pair[1].value - pair[0].value;
            if gap < best_gap {
                best_gap = gap;
                best_index = offset + 1;
            }
        }
        best_index
    }

    fn refresh_total(&mut self) {
        self.total = self.bins.iter().fold(0.0, |acc, bin| acc + bin.weight);
    }

    /// Smallest bin value whose cumulative weight reaches `q * count()`
    ///
    /// Returns `None` when the histogram is empty or `q` is NaN or outside
    /// `[0, 1]`. Out-of-range ranks are not clamped.
    pub fn quantile(&self, q: f64) -> Option<f64> {
        if !(0.0..=1.0).contains(&q) {
            return None;
        }

        let target = q * self.total;
        let mut cumulative = 0.0;
        for bin in &self.bins {
            cumulative += bin.weight;
            if cumulative >= target {
                return Some(bin.value);
            }
        }

        None
    }

    /// Fraction of the total weight carried by bins with value `<= x`
    ///
    /// On an empty histogram this is `0 / 0`, i.e. NaN, unlike
    /// [`mean`](Self::mean) and [`variance`](Self::variance) which return 0.
    /// Use [`checked_cdf`](Self::checked_cdf) to get `None` instead.
    pub fn cdf(&self, x: f64) -> f64 {
        // A NaN `x` compares false against every bin and counts no weight
        let below = self
            .bins
            .iter()
            .take_while(|bin| bin.value <= x)
            .fold(0.0, |acc, bin| acc + bin.weight);
        below / self.total
    }

    /// Like [`cdf`](Self::cdf), but `None` when there is no weight to divide by
    pub fn checked_cdf(&self, x: f64) -> Option<f64> {
        if self.total > 0.0 {
            Some(self.cdf(x))
        } else {
            None
        }
    }

    /// Weighted mean of the bin values; 0 when empty
    pub fn mean(&self) -> f64 {
        if self.total == 0.0 {
            return 0.0;
        }

        let sum = self
            .bins
            .iter()
            .fold(0.0, |acc, bin| acc + bin.value * bin.weight);
        sum / self.total
    }

    /// Weighted population variance around [`mean`](Self::mean); 0 when empty
    pub fn variance(&self) -> f64 {
        if self.total == 0.0 {
            return 0.0;
        }

        let mean = self.mean();
        let sum = self.bins.iter().fold(0.0, |acc, bin| {
            let delta = bin.value - mean;
            acc + bin.weight * delta * delta
        });
        sum / self.total
    }

    /// Weighted standard deviation
    pub fn stddev(&self) -> f64 {
        crate::math::sqrt(self.variance())
    }

    /// Remove every bin, keeping the configuration
    pub fn clear(&mut self) {
        debug!(bins = self.bins.len(), total = self.total, "Clearing histogram.");
        self.bins.clear();
        self.total = 0.0;
    }

    fn check_compatible(&self, other: &Self) -> Result<(), MergeError> {
        if self.max_bins != other.max_bins {
            return Err(MergeError::IncompatibleConfig {
                expected: fmt!("max_bins={}", self.max_bins),
                found: fmt!("max_bins={}", other.max_bins),
            });
        }

        let diff = self.alpha - other.alpha;
        let abs_diff = if diff < 0.0 { -diff } else { diff };
        if abs_diff > ALPHA_TOLERANCE * self.alpha.max(other.alpha) {
            return Err(MergeError::IncompatibleConfig {
                expected: fmt!("alpha={}", self.alpha),
                found: fmt!("alpha={}", other.alpha),
            });
        }

        Ok(())
    }
}

impl Default for WeightedHistogram {
    fn default() -> Self {
        let config = HistogramConfig::default();
        Self::empty(config.max_bins, config.alpha)
    }
}

impl Extend<f64> for WeightedHistogram {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for sample in iter {
            self.insert(sample);
        }
    }
}

impl Sketch for WeightedHistogram {
    type Item = f64;

    fn update(&mut self, item: &f64) {
        self.insert(*item);
    }

    /// Fold another histogram's bins into this one without decaying either side
    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        self.check_compatible(other)?;

        for bin in &other.bins {
            match self.position(bin.value) {
                Ok(index) => self.bins[index].weight += bin.weight,
                Err(index) => self.bins.insert(index, *bin),
            }
        }
        self.compact();

        debug!(
            merged_bins = other.bins.len(),
            bins = self.bins.len(),
            total = self.total,
            "Merged histogram."
        );
        Ok(())
    }

    fn clear(&mut self) {
        WeightedHistogram::clear(self);
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>() + self.bins.capacity() * core::mem::size_of::<Bin>()
    }

    fn count(&self) -> f64 {
        self.total
    }

    fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

impl DistributionSketch for WeightedHistogram {
    fn add(&mut self, value: f64) {
        self.insert(value);
    }

    fn quantile(&self, rank: f64) -> Option<f64> {
        WeightedHistogram::quantile(self, rank)
    }

    fn cdf(&self, value: f64) -> f64 {
        WeightedHistogram::cdf(self, value)
    }

    fn mean(&self) -> f64 {
        WeightedHistogram::mean(self)
    }

    fn variance(&self) -> f64 {
        WeightedHistogram::variance(self)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for WeightedHistogram {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("WeightedHistogram", 4)?;
        state.serialize_field("max_bins", &self.max_bins)?;
        state.serialize_field("alpha", &self.alpha)?;
        state.serialize_field("total", &self.total)?;
        state.serialize_field("bins", &self.bins)?;
        state.end()
    }
}

// ============================================================================
// Tests
// ============================================================================
