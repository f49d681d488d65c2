//! Wind-speed frequency distribution on a uniform grid.

use log::{debug, warn};

use super::cumulative::CumulativeFunction;
use super::histogram::{Bin, Histogram};
use super::rebin::{centred_edges, rebin};
use crate::error::AepError;

/// Width of the regridded bins (wind speed units).
pub const REBIN_WIDTH: f64 = 0.5;

/// A wind-speed histogram regridded to [`REBIN_WIDTH`] with a cumulative
/// frequency lookup.
///
/// # Examples
///
/// ```
/// use aep_calc::distribution::WindSpeedDistribution;
///
/// let dist = WindSpeedDistribution::from_pairs(&[(4.0, 0.1), (5.0, 0.3), (6.0, 0.4)])?;
/// let total: f64 = dist.rebinned().iter().map(|b| b.value).sum();
/// assert!((total - 0.8).abs() < 1e-9);
/// assert_eq!(dist.cumulative_function(0.0), 0.0);
/// # Ok::<(), aep_calc::error::AepError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WindSpeedDistribution {
    original: Histogram,
    rebinned: Vec<Bin>,
    keys: Vec<f64>,
    cumulative: CumulativeFunction,
}

impl WindSpeedDistribution {
    /// Builds a distribution from raw `(centre, value)` observations.
    ///
    /// # Errors
    ///
    /// Returns `AepError::Validation` for an empty input, repeated centres,
    /// or a span too wide to regrid.
    pub fn new(bins: impl IntoIterator<Item = Bin>) -> Result<Self, AepError> {
        Self::from_histogram(Histogram::new(bins)?)
    }

    /// Convenience constructor from `(centre, value)` tuples.
    ///
    /// # Errors
    ///
    /// Same as [`WindSpeedDistribution::new`].
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, AepError> {
        Self::new(pairs.iter().copied().map(Bin::from))
    }

    /// Regrids an already-validated histogram.
    ///
    /// # Errors
    ///
    /// Returns `AepError::Validation` when the histogram spans more than
    /// [`MAX_REGRID_BINS`](super::rebin::MAX_REGRID_BINS) regridded bins.
    pub fn from_histogram(original: Histogram) -> Result<Self, AepError> {
        let total = original.total();
        if (total - 1.0).abs() > 0.01 {
            warn!("wind speed distribution sums to {total:.4}, not 1.0");
        }

        let rebinned = Self::regrid(&original)?;
        let keys: Vec<f64> = rebinned.iter().map(|b| b.centre).collect();
        let values: Vec<f64> = rebinned.iter().map(|b| b.value).collect();
        let cumulative = CumulativeFunction::from_frequencies(&keys, &values);

        debug!(
            "regridded {} source bins onto {} bins of width {REBIN_WIDTH} ({:.3}..{:.3})",
            original.len(),
            rebinned.len(),
            keys.first().copied().unwrap_or_default(),
            keys.last().copied().unwrap_or_default(),
        );

        Ok(Self {
            original,
            rebinned,
            keys,
            cumulative,
        })
    }

    /// Conservatively regrids `original` onto a uniform grid whose centres
    /// include the first source centre and whose edges cover the source span.
    fn regrid(original: &Histogram) -> Result<Vec<Bin>, AepError> {
        let src_edges = original.edges(REBIN_WIDTH);
        let values: Vec<f64> = original.values().collect();
        let first_centre = original.bins()[0].centre;
        let lo = src_edges[0];
        let hi = src_edges[src_edges.len() - 1];
        let dst_edges = centred_edges(first_centre, lo, hi, REBIN_WIDTH)?;
        let dst_values = rebin(&src_edges, &values, &dst_edges);

        // centres step from the anchor so they stay on the source grid
        let first_dst = dst_edges[0] + REBIN_WIDTH / 2.0;
        Ok(dst_values
            .into_iter()
            .enumerate()
            .map(|(j, value)| Bin::new(first_dst + j as f64 * REBIN_WIDTH, value))
            .collect())
    }

    /// Cumulative frequency at `speed`; `0.0` outside the regridded centres.
    pub fn cumulative_function(&self, speed: f64) -> f64 {
        self.cumulative.value(speed)
    }

    /// Ascending centres of the regridded bins.
    pub fn keys(&self) -> &[f64] {
        &self.keys
    }

    /// Width of the regridded bins.
    pub fn rebin_width(&self) -> f64 {
        REBIN_WIDTH
    }

    pub fn original(&self) -> &Histogram {
        &self.original
    }

    pub fn rebinned(&self) -> &[Bin] {
        &self.rebinned
    }

    pub fn cumulative(&self) -> &CumulativeFunction {
        &self.cumulative
    }
}
