//! Ideal-yield integration and the AEP ratio.

use log::debug;

use super::types::{CurveType, DistributionSource, EnergyRow, EnergyTable, IntegrationBound};
use crate::distribution::WindSpeedDistribution;
use crate::error::AepError;
use crate::power_curve::{ObservedPowerCurve, PowerCurve};

/// Yields and ratio from one completed AEP calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AepResult {
    /// Ideal yield of the reference curve.
    pub reference_yield: f64,
    /// Ideal yield of the measured curve.
    pub measured_yield: f64,
    /// `measured_yield / reference_yield`.
    pub aep: f64,
}

/// Integrates a reference and a measured power curve against a wind-speed
/// distribution.
///
/// Generic over both curves for static dispatch; pass references (`&curve`)
/// to keep ownership with the caller. The result is computed on the first
/// [`AepCalculator::calculate_aep`] call and cached; build a new calculator
/// for a new computation.
///
/// # Examples
///
/// ```
/// use aep_calc::aep::{AepCalculator, DistributionSource};
/// use aep_calc::distribution::WindSpeedDistribution;
/// use aep_calc::power_curve::{PowerCurveLevel, TabulatedPowerCurve};
///
/// let dist = WindSpeedDistribution::from_pairs(&[(4.0, 0.25), (5.0, 0.5), (6.0, 0.25)])?;
/// let curve = TabulatedPowerCurve::new(vec![
///     PowerCurveLevel::new(0.0, 1000.0, 1),
///     PowerCurveLevel::new(10.0, 1000.0, 1),
/// ])?;
/// let mut calc = AepCalculator::new(&curve, &curve, DistributionSource::Instance(dist))?;
/// assert!((calc.calculate_aep()? - 1.0).abs() < 1e-12);
/// # Ok::<(), aep_calc::error::AepError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AepCalculator<R, M> {
    reference: R,
    measured: M,
    distribution: WindSpeedDistribution,
    bound: IntegrationBound,
    reference_table: EnergyTable,
    measured_table: EnergyTable,
    result: Option<AepResult>,
}

impl<R: PowerCurve, M: PowerCurve> AepCalculator<R, M> {
    /// Creates a calculator that integrates over every distribution bin.
    ///
    /// # Errors
    ///
    /// Propagates errors from resolving `source` into a distribution.
    pub fn new(reference: R, measured: M, source: DistributionSource) -> Result<Self, AepError> {
        let distribution = source.resolve()?;
        Ok(Self::with_bound(
            reference,
            measured,
            distribution,
            IntegrationBound::Full,
        ))
    }

    fn with_bound(
        reference: R,
        measured: M,
        distribution: WindSpeedDistribution,
        bound: IntegrationBound,
    ) -> Self {
        Self {
            reference,
            measured,
            distribution,
            bound,
            reference_table: EnergyTable::new(),
            measured_table: EnergyTable::new(),
            result: None,
        }
    }

    /// Computes the ideal yield of one curve and records its energy table.
    ///
    /// The table for `curve_type` is rebuilt on every call, so repeated calls
    /// give identical tables.
    pub fn calculate_ideal_yield(&mut self, curve_type: CurveType) -> f64 {
        match curve_type {
            CurveType::Reference => integrate(
                &self.reference,
                &self.distribution,
                self.bound,
                &mut self.reference_table,
            ),
            CurveType::Measured => integrate(
                &self.measured,
                &self.distribution,
                self.bound,
                &mut self.measured_table,
            ),
        }
    }

    /// Like [`AepCalculator::calculate_ideal_yield`] but selects the curve by
    /// label (`"reference"` or `"measured"`, any case).
    ///
    /// # Errors
    ///
    /// Returns `AepError::Configuration` for an unknown label.
    pub fn calculate_ideal_yield_for(&mut self, label: &str) -> Result<f64, AepError> {
        let curve_type: CurveType = label.parse()?;
        Ok(self.calculate_ideal_yield(curve_type))
    }

    /// Returns `measured_yield / reference_yield`, computing it on first use.
    ///
    /// # Errors
    ///
    /// Returns `AepError::Arithmetic` if the reference yield is zero or not
    /// finite. Nothing is cached on failure.
    pub fn calculate_aep(&mut self) -> Result<f64, AepError> {
        if let Some(result) = self.result {
            return Ok(result.aep);
        }

        let reference_yield = self.calculate_ideal_yield(CurveType::Reference);
        let measured_yield = self.calculate_ideal_yield(CurveType::Measured);

        if reference_yield == 0.0 || !reference_yield.is_finite() {
            return Err(AepError::Arithmetic(format!(
                "reference yield is {reference_yield}; cannot compute AEP ratio"
            )));
        }

        let aep = measured_yield / reference_yield;
        debug!(
            "AEP ({}): reference={reference_yield:.6} measured={measured_yield:.6} ratio={aep:.6}",
            self.bound.method()
        );

        self.result = Some(AepResult {
            reference_yield,
            measured_yield,
            aep,
        });
        Ok(aep)
    }

    /// Cached result of [`AepCalculator::calculate_aep`], if it has run.
    pub fn result(&self) -> Option<AepResult> {
        self.result
    }

    pub fn energy_table(&self, curve_type: CurveType) -> &EnergyTable {
        match curve_type {
            CurveType::Reference => &self.reference_table,
            CurveType::Measured => &self.measured_table,
        }
    }

    pub fn distribution(&self) -> &WindSpeedDistribution {
        &self.distribution
    }

    pub fn bound(&self) -> IntegrationBound {
        self.bound
    }

    /// Last common bin cutoff, for calculators built with
    /// [`AepCalculator::last_common_bin`].
    pub fn lcb(&self) -> Option<f64> {
        self.bound.cutoff()
    }

    pub fn reference_curve(&self) -> &R {
        &self.reference
    }

    pub fn measured_curve(&self) -> &M {
        &self.measured
    }
}

impl<R: PowerCurve, M: ObservedPowerCurve> AepCalculator<R, M> {
    /// Creates a calculator that skips every bin above the measured curve's
    /// last observed bin.
    ///
    /// # Errors
    ///
    /// Propagates errors from resolving `source`, and returns
    /// `AepError::Validation` if the measured curve has no observed bins.
    pub fn last_common_bin(
        reference: R,
        measured: M,
        source: DistributionSource,
    ) -> Result<Self, AepError> {
        let distribution = source.resolve()?;
        let lcb = measured.last_observed_bin().ok_or_else(|| {
            AepError::validation("measured power curve has no bins with observations")
        })?;
        debug!("last common bin: {lcb}");
        Ok(Self::with_bound(
            reference,
            measured,
            distribution,
            IntegrationBound::LastCommonBin(lcb),
        ))
    }
}

/// Steps through the distribution bins, accumulating trapezoidal energy.
///
/// Each bin's mass comes from differencing the cumulative function across
/// one rebin width, and its power is the mean of the curve at the bin
/// centre and one width below (0 below the curve's minimum speed).
fn integrate<C: PowerCurve>(
    curve: &C,
    distribution: &WindSpeedDistribution,
    bound: IntegrationBound,
    table: &mut EnergyTable,
) -> f64 {
    table.clear();
    let width = distribution.rebin_width();
    let min_speed = curve.min_speed();
    let mut energy_sum = 0.0;

    for &bin in distribution.keys() {
        if !bound.includes(bin) {
            continue;
        }
        let below = bin - width;
        let upper = curve.power(bin);
        let lower = if below < min_speed {
            0.0
        } else {
            curve.power(below)
        };
        let power = (upper + lower) / 2.0;
        let freq = distribution.cumulative_function(bin) - distribution.cumulative_function(below);
        let energy = freq * power;

        table.insert(
            bin,
            EnergyRow {
                upper,
                lower,
                freq,
                power,
                energy,
            },
        );
        energy_sum += energy;
    }

    energy_sum
}
