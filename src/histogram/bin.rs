/// A single histogram bin
///
/// Pairs a representative value with the decayed weight of the
/// observations it stands for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bin {
    /// Representative value of the bin
    pub value: f64,
    /// Accumulated, decayed weight of the bin
    pub weight: f64,
}

impl Bin {
    /// Create a new bin
    pub fn new(value: f64, weight: f64) -> Self {
        Self { value, weight }
    }

    /// Combine two adjacent bins into one
    ///
    /// The result carries the summed weight and the weight-averaged value,
    /// which always lies between the two input values. Two weightless bins
    /// collapse onto their midpoint.
    pub(crate) fn merged(lo: &Bin, hi: &Bin) -> Bin {
        let weight = lo.weight + hi.weight;
        let share = if weight > 0.0 { hi.weight / weight } else { 0.5 };
        // Each term is bounded by its input, so even -MAX and MAX combine
        // without overflow. Rounding must not push the result past either neighbour.
        let value = (lo.value * (1.0 - share) + hi.value * share).clamp(lo.value, hi.value);
        Bin { value, weight }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Bin {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeTuple;
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.value)?;
        tuple.serialize_element(&self.weight)?;
        tuple.end()
    }
}
