//! Core yield types: curve selectors, integration bounds, energy tables and
//! distribution provisioning.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use ordered_float::OrderedFloat;

use crate::distribution::{Bin, WindSpeedDistribution};
use crate::error::{AepError, ConfigError};
use crate::io::import::read_distribution_csv;

/// Which of the two power curves a yield refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveType {
    Reference,
    Measured,
}

impl CurveType {
    /// Both curve types in the order they are integrated.
    pub const ALL: [CurveType; 2] = [CurveType::Reference, CurveType::Measured];

    pub fn as_str(&self) -> &'static str {
        match self {
            CurveType::Reference => "reference",
            CurveType::Measured => "measured",
        }
    }
}

impl fmt::Display for CurveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurveType {
    type Err = ConfigError;

    /// Parses a curve label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reference" => Ok(CurveType::Reference),
            "measured" => Ok(CurveType::Measured),
            _ => Err(ConfigError::new(
                "curve_type",
                format!("unknown curve type \"{s}\", expected \"reference\" or \"measured\""),
            )),
        }
    }
}

/// Slack when comparing a regridded bin centre against the cutoff; keys are
/// computed as `start + j * width` while the cutoff is read from a table.
const CUTOFF_TOLERANCE: f64 = 1e-9;

/// Upper limit on the bins included in a yield integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntegrationBound {
    /// Every distribution bin contributes.
    Full,
    /// Only bins at or below the last bin with measured observations.
    LastCommonBin(f64),
}

impl IntegrationBound {
    /// Whether the bin centred at `centre` is summed.
    pub fn includes(&self, centre: f64) -> bool {
        match *self {
            IntegrationBound::Full => true,
            IntegrationBound::LastCommonBin(lcb) => centre <= lcb + CUTOFF_TOLERANCE,
        }
    }

    /// Short method label used in reports and scenario files.
    pub fn method(&self) -> &'static str {
        match self {
            IntegrationBound::Full => "standard",
            IntegrationBound::LastCommonBin(_) => "lcb",
        }
    }

    pub fn cutoff(&self) -> Option<f64> {
        match *self {
            IntegrationBound::Full => None,
            IntegrationBound::LastCommonBin(lcb) => Some(lcb),
        }
    }
}

/// Per-bin integration trace for one curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyRow {
    /// Power at the bin centre.
    pub upper: f64,
    /// Power one rebin width below the centre (0 below the curve's range).
    pub lower: f64,
    /// Probability mass attributed to the bin.
    pub freq: f64,
    /// Trapezoidal mean of `upper` and `lower`.
    pub power: f64,
    /// `freq * power`.
    pub energy: f64,
}

/// Ordered mapping from bin centre to its [`EnergyRow`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnergyTable {
    rows: BTreeMap<OrderedFloat<f64>, EnergyRow>,
}

impl EnergyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, centre: f64, row: EnergyRow) {
        self.rows.insert(OrderedFloat(centre), row);
    }

    pub fn get(&self, centre: f64) -> Option<&EnergyRow> {
        self.rows.get(&OrderedFloat(centre))
    }

    pub fn contains(&self, centre: f64) -> bool {
        self.rows.contains_key(&OrderedFloat(centre))
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in ascending bin-centre order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &EnergyRow)> + '_ {
        self.rows.iter().map(|(k, v)| (k.into_inner(), v))
    }

    pub fn centres(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.keys().map(|k| k.into_inner())
    }

    /// Sum of the `energy` column.
    pub fn total_energy(&self) -> f64 {
        self.rows.values().map(|r| r.energy).sum()
    }
}

/// Where the calculator gets its wind-speed distribution from.
///
/// Exactly one source is chosen up front, so "both" and "neither" cannot be
/// expressed here.
#[derive(Debug, Clone)]
pub enum DistributionSource {
    /// An already-built distribution.
    Instance(WindSpeedDistribution),
    /// Parsed `(centre, value)` observations still to be regridded.
    Observations(Vec<Bin>),
    /// A histogram CSV file to read and regrid.
    Path(PathBuf),
}

impl DistributionSource {
    /// Produces the distribution this source describes.
    ///
    /// # Errors
    ///
    /// Propagates validation errors from the histogram and I/O/CSV errors
    /// from reading a file.
    pub fn resolve(self) -> Result<WindSpeedDistribution, AepError> {
        match self {
            DistributionSource::Instance(d) => Ok(d),
            DistributionSource::Observations(bins) => WindSpeedDistribution::new(bins),
            DistributionSource::Path(path) => {
                WindSpeedDistribution::new(read_distribution_csv(&path)?)
            }
        }
    }
}

impl From<WindSpeedDistribution> for DistributionSource {
    fn from(d: WindSpeedDistribution) -> Self {
        DistributionSource::Instance(d)
    }
}
