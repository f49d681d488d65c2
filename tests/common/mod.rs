//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use aep_calc::distribution::WindSpeedDistribution;
use aep_calc::power_curve::{PowerCurve, PowerCurveLevel, TabulatedPowerCurve};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Power curve returning the same output at every wind speed.
#[derive(Debug, Clone, Copy)]
pub struct FlatCurve {
    pub kw: f64,
}

impl PowerCurve for FlatCurve {
    fn power(&self, _speed: f64) -> f64 {
        self.kw
    }

    fn min_speed(&self) -> f64 {
        0.0
    }
}

/// The three-bin histogram {(4.0, 0.10), (5.0, 0.30), (6.0, 0.40)}.
pub fn three_bin_distribution() -> WindSpeedDistribution {
    WindSpeedDistribution::from_pairs(&[(4.0, 0.10), (5.0, 0.30), (6.0, 0.40)])
        .expect("three-bin distribution should build")
}

/// Histogram on half-integer centres 0.5..=`top` whose mass sums to 1.0.
///
/// Regridded keys land on the same centres.
pub fn half_step_distribution(top: f64) -> WindSpeedDistribution {
    let n = (top / 0.5).round() as usize;
    let value = 1.0 / n as f64;
    let pairs: Vec<(f64, f64)> = (1..=n).map(|i| (i as f64 * 0.5, value)).collect();
    WindSpeedDistribution::from_pairs(&pairs).expect("half-step distribution should build")
}

/// Histogram on integer centres 1..=`top` with equal mass summing to 1.0.
///
/// Source spacing is twice the regrid width, as with typical met-mast data.
pub fn integer_distribution(top: u32) -> WindSpeedDistribution {
    let value = 1.0 / top as f64;
    let pairs: Vec<(f64, f64)> = (1..=top).map(|v| (v as f64, value)).collect();
    WindSpeedDistribution::from_pairs(&pairs).expect("integer distribution should build")
}

/// Random histogram with non-uniform spacing and non-negative values.
pub fn random_pairs(rng: &mut StdRng, len: usize) -> Vec<(f64, f64)> {
    let mut centre = rng.random_range(0.0..3.0);
    (0..len)
        .map(|_| {
            centre += rng.random_range(0.05..2.5);
            (centre, rng.random_range(0.0..1.0))
        })
        .collect()
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Curve with the given power per level and observations only at or below
/// `observed_up_to`.
pub fn measured_curve(levels: &[(f64, f64)], observed_up_to: f64) -> TabulatedPowerCurve {
    let levels = levels
        .iter()
        .map(|&(speed, power)| {
            let count = if speed <= observed_up_to { 25 } else { 0 };
            PowerCurveLevel::new(speed, power, count)
        })
        .collect();
    TabulatedPowerCurve::new(levels).expect("measured curve should build")
}

/// Simple cubic curve between cut-in 3.0 and rated 12.0 (2000 kW), tabulated
/// every 0.5 up to `top`.
pub fn cubic_levels(top: f64, scale: f64) -> Vec<(f64, f64)> {
    let n = (top / 0.5).round() as usize;
    (0..=n)
        .map(|i| {
            let v = i as f64 * 0.5;
            let p = if v < 3.0 {
                0.0
            } else if v >= 12.0 {
                2000.0
            } else {
                2000.0 * (v.powi(3) - 27.0) / (1728.0 - 27.0)
            };
            (v, p * scale)
        })
        .collect()
}
