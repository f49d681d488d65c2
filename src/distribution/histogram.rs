//! Source histogram bins and inferred bin edges.

use crate::error::AepError;

/// One histogram observation: a bin centre and its relative frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    /// Bin centre (wind speed).
    pub centre: f64,
    /// Relative frequency or weight of the bin.
    pub value: f64,
}

impl Bin {
    pub fn new(centre: f64, value: f64) -> Self {
        Self { centre, value }
    }
}

impl From<(f64, f64)> for Bin {
    fn from((centre, value): (f64, f64)) -> Self {
        Self { centre, value }
    }
}

/// Validated source histogram, ordered ascending by bin centre.
///
/// Centres are unique and finite; values are finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    bins: Vec<Bin>,
}

impl Histogram {
    /// Builds a histogram from raw observations.
    ///
    /// # Errors
    ///
    /// Returns `AepError::Validation` if there are no bins, a centre repeats,
    /// or any centre/value is non-finite or any value is negative.
    pub fn new(bins: impl IntoIterator<Item = Bin>) -> Result<Self, AepError> {
        let mut bins: Vec<Bin> = bins.into_iter().collect();
        if bins.is_empty() {
            return Err(AepError::validation(
                "wind speed distribution has no bins",
            ));
        }

        for b in &bins {
            if !b.centre.is_finite() {
                return Err(AepError::validation(format!(
                    "bin centre {} is not finite",
                    b.centre
                )));
            }
            if !b.value.is_finite() || b.value < 0.0 {
                return Err(AepError::validation(format!(
                    "bin {} has invalid value {} (must be finite and >= 0)",
                    b.centre, b.value
                )));
            }
        }

        bins.sort_by(|a, b| a.centre.total_cmp(&b.centre));
        if let Some(w) = bins.windows(2).find(|w| w[0].centre == w[1].centre) {
            return Err(AepError::validation(format!(
                "bin {} has been defined more than once",
                w[0].centre
            )));
        }

        Ok(Self { bins })
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn centres(&self) -> impl Iterator<Item = f64> + '_ {
        self.bins.iter().map(|b| b.centre)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.bins.iter().map(|b| b.value)
    }

    /// Sum of all bin values.
    pub fn total(&self) -> f64 {
        self.values().sum()
    }

    /// Infers `len() + 1` bin edges from the centres.
    ///
    /// Interior edges are midpoints between consecutive centres. The outer
    /// edges mirror the spacing of the first two and last two centres. A
    /// lone bin gets `single_width` centred on it.
    pub fn edges(&self, single_width: f64) -> Vec<f64> {
        let c: Vec<f64> = self.centres().collect();
        let n = c.len();
        if n == 1 {
            return vec![c[0] - single_width / 2.0, c[0] + single_width / 2.0];
        }

        let mut edges = Vec::with_capacity(n + 1);
        edges.push(c[0] - (c[1] - c[0]) / 2.0);
        for w in c.windows(2) {
            edges.push((w[0] + w[1]) / 2.0);
        }
        edges.push(c[n - 1] + (c[n - 1] - c[n - 2]) / 2.0);
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hist(pairs: &[(f64, f64)]) -> Result<Histogram, AepError> {
        Histogram::new(pairs.iter().copied().map(Bin::from))
    }

    #[test]
    fn empty_histogram_rejected() {
        let err = hist(&[]);
        assert!(matches!(err, Err(AepError::Validation(_))));
    }

    #[test]
    fn duplicate_centre_rejected() {
        let err = hist(&[(4.0, 0.1), (5.0, 0.2), (4.0, 0.3)]);
        match err {
            Err(AepError::Validation(msg)) => assert!(msg.contains("more than once")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn negative_value_rejected() {
        assert!(hist(&[(4.0, -0.1)]).is_err());
    }

    #[test]
    fn nan_centre_rejected() {
        assert!(hist(&[(f64::NAN, 0.1)]).is_err());
    }

    #[test]
    fn bins_sorted_by_centre() {
        let h = hist(&[(6.0, 0.4), (4.0, 0.1), (5.0, 0.3)]).unwrap();
        let centres: Vec<f64> = h.centres().collect();
        assert_eq!(centres, vec![4.0, 5.0, 6.0]);
        assert!((h.total() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn edges_uniform_spacing() {
        let h = hist(&[(4.0, 0.1), (5.0, 0.3), (6.0, 0.4)]).unwrap();
        assert_eq!(h.edges(0.5), vec![3.5, 4.5, 5.5, 6.5]);
    }

    #[test]
    fn edges_non_uniform_spacing() {
        // spacing 1.0 then 2.0: outer edges mirror the nearest spacing
        let h = hist(&[(1.0, 0.2), (2.0, 0.3), (4.0, 0.5)]).unwrap();
        assert_eq!(h.edges(0.5), vec![0.5, 1.5, 3.0, 5.0]);
    }

    #[test]
    fn single_bin_edges_use_fallback_width() {
        let h = hist(&[(7.0, 1.0)]).unwrap();
        assert_eq!(h.edges(0.5), vec![6.75, 7.25]);
    }
}
