//! Power-curve contracts consumed by the yield integrator, plus a tabulated
//! implementation read from measured or reference data.

use crate::error::AepError;

/// Trait for anything that maps wind speed to power output.
///
/// The integrator never asks for power below [`PowerCurve::min_speed`]; it
/// substitutes `0.0` there instead.
pub trait PowerCurve {
    /// Returns the power output at the given wind speed.
    ///
    /// # Arguments
    ///
    /// * `speed` - Wind speed, at or above `min_speed()`
    fn power(&self, speed: f64) -> f64;

    /// Lowest wind speed the curve is defined for.
    fn min_speed(&self) -> f64;
}

/// A power curve that also reports how many samples were observed per bin.
///
/// Used by the last-common-bin integration to find the highest wind speed
/// actually supported by measured data.
pub trait ObservedPowerCurve: PowerCurve {
    /// `(bin centre, observation count)` pairs, keyed by the curve's bins.
    fn observation_counts(&self) -> Vec<(f64, u64)>;

    /// Highest bin centre with a nonzero observation count.
    fn last_observed_bin(&self) -> Option<f64> {
        self.observation_counts()
            .into_iter()
            .filter(|&(_, count)| count > 0)
            .map(|(speed, _)| speed)
            .max_by(f64::total_cmp)
    }
}

impl<T: PowerCurve + ?Sized> PowerCurve for &T {
    fn power(&self, speed: f64) -> f64 {
        (**self).power(speed)
    }

    fn min_speed(&self) -> f64 {
        (**self).min_speed()
    }
}

impl<T: ObservedPowerCurve + ?Sized> ObservedPowerCurve for &T {
    fn observation_counts(&self) -> Vec<(f64, u64)> {
        (**self).observation_counts()
    }
}

/// One row of a tabulated power curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerCurveLevel {
    /// Wind speed bin centre.
    pub wind_speed: f64,
    /// Power output at this wind speed.
    pub power: f64,
    /// Number of samples observed in this bin (0 for reference curves).
    pub data_count: u64,
}

impl PowerCurveLevel {
    pub fn new(wind_speed: f64, power: f64, data_count: u64) -> Self {
        Self {
            wind_speed,
            power,
            data_count,
        }
    }
}

/// Power curve defined by discrete levels with linear interpolation.
///
/// Returns `0.0` below the first level and above the last one (cut-in and
/// cut-out).
///
/// # Examples
///
/// ```
/// use aep_calc::power_curve::{PowerCurve, PowerCurveLevel, TabulatedPowerCurve};
///
/// let curve = TabulatedPowerCurve::new(vec![
///     PowerCurveLevel::new(3.0, 0.0, 0),
///     PowerCurveLevel::new(5.0, 200.0, 0),
/// ])?;
/// assert_eq!(curve.power(4.0), 100.0);
/// assert_eq!(curve.min_speed(), 3.0);
/// # Ok::<(), aep_calc::error::AepError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TabulatedPowerCurve {
    levels: Vec<PowerCurveLevel>,
}

impl TabulatedPowerCurve {
    /// Creates a curve from levels, sorting them by wind speed.
    ///
    /// # Errors
    ///
    /// Returns `AepError::Validation` if there are no levels, a wind speed
    /// repeats, or any speed/power is non-finite.
    pub fn new(mut levels: Vec<PowerCurveLevel>) -> Result<Self, AepError> {
        if levels.is_empty() {
            return Err(AepError::validation("power curve has no levels"));
        }
        if let Some(l) = levels
            .iter()
            .find(|l| !l.wind_speed.is_finite() || !l.power.is_finite())
        {
            return Err(AepError::validation(format!(
                "power curve level ({}, {}) is not finite",
                l.wind_speed, l.power
            )));
        }
        levels.sort_by(|a, b| a.wind_speed.total_cmp(&b.wind_speed));
        if let Some(w) = levels.windows(2).find(|w| w[0].wind_speed == w[1].wind_speed) {
            return Err(AepError::validation(format!(
                "power curve level {} has been defined more than once",
                w[0].wind_speed
            )));
        }
        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[PowerCurveLevel] {
        &self.levels
    }
}

impl PowerCurve for TabulatedPowerCurve {
    fn power(&self, speed: f64) -> f64 {
        let first = self.levels[0];
        let last = self.levels[self.levels.len() - 1];
        if !(speed >= first.wind_speed && speed <= last.wind_speed) {
            return 0.0;
        }

        let hi = self.levels.partition_point(|l| l.wind_speed <= speed);
        if hi == self.levels.len() {
            return last.power;
        }
        let (a, b) = (self.levels[hi - 1], self.levels[hi]);
        a.power + (b.power - a.power) * (speed - a.wind_speed) / (b.wind_speed - a.wind_speed)
    }

    fn min_speed(&self) -> f64 {
        self.levels[0].wind_speed
    }
}

impl ObservedPowerCurve for TabulatedPowerCurve {
    fn observation_counts(&self) -> Vec<(f64, u64)> {
        self.levels
            .iter()
            .map(|l| (l.wind_speed, l.data_count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> TabulatedPowerCurve {
        TabulatedPowerCurve::new(vec![
            PowerCurveLevel::new(4.0, 100.0, 12),
            PowerCurveLevel::new(3.0, 0.0, 5),
            PowerCurveLevel::new(5.0, 300.0, 0),
        ])
        .unwrap()
    }

    #[test]
    fn levels_sorted_and_min_speed() {
        let c = curve();
        assert_eq!(c.min_speed(), 3.0);
        assert_eq!(c.levels()[2].wind_speed, 5.0);
    }

    #[test]
    fn interpolates_between_levels() {
        let c = curve();
        assert_eq!(c.power(3.5), 50.0);
        assert_eq!(c.power(4.5), 200.0);
        assert_eq!(c.power(5.0), 300.0);
    }

    #[test]
    fn zero_outside_table() {
        let c = curve();
        assert_eq!(c.power(2.9), 0.0);
        assert_eq!(c.power(5.1), 0.0);
    }

    #[test]
    fn last_observed_bin_skips_zero_counts() {
        assert_eq!(curve().last_observed_bin(), Some(4.0));
    }

    #[test]
    fn no_observations_gives_none() {
        let c = TabulatedPowerCurve::new(vec![PowerCurveLevel::new(3.0, 0.0, 0)]).unwrap();
        assert_eq!(c.last_observed_bin(), None);
    }

    #[test]
    fn duplicate_level_rejected() {
        let err = TabulatedPowerCurve::new(vec![
            PowerCurveLevel::new(3.0, 0.0, 0),
            PowerCurveLevel::new(3.0, 1.0, 0),
        ]);
        assert!(matches!(err, Err(AepError::Validation(_))));
    }

    #[test]
    fn empty_curve_rejected() {
        assert!(TabulatedPowerCurve::new(Vec::new()).is_err());
    }
}
