//! Post-hoc summary of an AEP calculation.

use std::fmt;

use serde::Serialize;

use super::calculator::{AepCalculator, AepResult};
use super::types::CurveType;
use crate::power_curve::PowerCurve;

/// Summary of one AEP calculation, suitable for printing or JSON export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AepReport {
    /// `"standard"` or `"lcb"`.
    pub method: &'static str,
    /// Last common bin cutoff, when the LCB method was used.
    pub lcb: Option<f64>,
    /// Ideal yield of the reference curve.
    pub reference_yield: f64,
    /// Ideal yield of the measured curve.
    pub measured_yield: f64,
    /// Measured over reference yield.
    pub aep: f64,
    /// Number of distribution bins after regridding.
    pub distribution_bins: usize,
    /// Bins summed for the reference curve.
    pub bins_reference: usize,
    /// Bins summed for the measured curve.
    pub bins_measured: usize,
}

impl AepReport {
    /// Builds a report from a calculator and the result it produced.
    pub fn new<R: PowerCurve, M: PowerCurve>(calc: &AepCalculator<R, M>, result: AepResult) -> Self {
        Self {
            method: calc.bound().method(),
            lcb: calc.lcb(),
            reference_yield: result.reference_yield,
            measured_yield: result.measured_yield,
            aep: result.aep,
            distribution_bins: calc.distribution().keys().len(),
            bins_reference: calc.energy_table(CurveType::Reference).len(),
            bins_measured: calc.energy_table(CurveType::Measured).len(),
        }
    }

    /// Serializes the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for AepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- AEP Report ---")?;
        writeln!(f, "Method:                {}", self.method)?;
        if let Some(lcb) = self.lcb {
            writeln!(f, "Last common bin:       {lcb:.2}")?;
        }
        writeln!(f, "Distribution bins:     {}", self.distribution_bins)?;
        writeln!(
            f,
            "Bins integrated:       {} reference, {} measured",
            self.bins_reference, self.bins_measured
        )?;
        writeln!(f, "Reference yield:       {:.4}", self.reference_yield)?;
        writeln!(f, "Measured yield:        {:.4}", self.measured_yield)?;
        write!(f, "AEP ratio:             {:.2}%", self.aep * 100.0)
    }
}
