//! Terminal-friendly rendering of a histogram
//!
//! The first line holds the total weight, followed by one line per bin with
//! its value and a bar of dots whose length is proportional to the bin's
//! share of the total weight.

use crate::histogram::WeightedHistogram;
use crate::math;
use core::fmt::{self, Write};

/// Length of the bar of a bin holding all of the weight
pub const BAR_SCALE: f64 = 200.0;

impl fmt::Display for WeightedHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.count();
        writeln!(f, "Total: {}", total)?;

        for bin in self.bins() {
            // An all-zero histogram divides to NaN, which casts to an empty bar
            let dots = math::floor(bin.weight / total * BAR_SCALE) as usize;
            write!(f, "{} \t ", bin.value)?;
            for _ in 0..dots {
                f.write_char('.')?;
            }
            f.write_char('\n')?;
        }

        Ok(())
    }
}
