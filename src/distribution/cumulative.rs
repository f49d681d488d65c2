//! Piecewise-linear cumulative frequency function.

/// Queries within this distance of a domain end are treated as in-domain.
const DOMAIN_TOLERANCE: f64 = 1e-9;

/// Cumulative frequency as a function of wind speed.
///
/// Linearly interpolates between `(speed, cumulative)` nodes. Outside the
/// node range the function evaluates to `0.0`, not to the nearest node value.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeFunction {
    speeds: Vec<f64>,
    cumulative: Vec<f64>,
}

impl CumulativeFunction {
    /// Builds the running sum of `values` at the given ascending `speeds`.
    pub fn from_frequencies(speeds: &[f64], values: &[f64]) -> Self {
        debug_assert_eq!(speeds.len(), values.len());
        let cumulative = values
            .iter()
            .scan(0.0, |acc, v| {
                *acc += v;
                Some(*acc)
            })
            .collect();
        Self {
            speeds: speeds.to_vec(),
            cumulative,
        }
    }

    /// Evaluates the cumulative frequency at `speed`.
    pub fn value(&self, speed: f64) -> f64 {
        let (Some(&first), Some(&last)) = (self.speeds.first(), self.speeds.last()) else {
            return 0.0;
        };
        if !(speed >= first - DOMAIN_TOLERANCE && speed <= last + DOMAIN_TOLERANCE) {
            return 0.0;
        }
        let speed = speed.clamp(first, last);

        // index of the first node strictly above `speed`
        let hi = self.speeds.partition_point(|&s| s <= speed);
        if hi == 0 {
            return self.cumulative[0];
        }
        if hi == self.speeds.len() {
            return self.cumulative[hi - 1];
        }
        let lo = hi - 1;
        let (x0, x1) = (self.speeds[lo], self.speeds[hi]);
        let (y0, y1) = (self.cumulative[lo], self.cumulative[hi]);
        y0 + (y1 - y0) * (speed - x0) / (x1 - x0)
    }

    /// Lowest speed in the domain, if any.
    pub fn domain_min(&self) -> Option<f64> {
        self.speeds.first().copied()
    }

    /// Highest speed in the domain, if any.
    pub fn domain_max(&self) -> Option<f64> {
        self.speeds.last().copied()
    }

    /// Final cumulative value (the total mass).
    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.speeds.iter().copied().zip(self.cumulative.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn func() -> CumulativeFunction {
        CumulativeFunction::from_frequencies(&[1.0, 2.0, 3.0], &[0.2, 0.3, 0.5])
    }

    #[test]
    fn exact_at_nodes() {
        let f = func();
        assert!((f.value(1.0) - 0.2).abs() < 1e-12);
        assert!((f.value(2.0) - 0.5).abs() < 1e-12);
        assert!((f.value(3.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn interpolates_between_nodes() {
        let f = func();
        assert!((f.value(1.5) - 0.35).abs() < 1e-12);
    }

    #[test]
    fn zero_outside_domain() {
        let f = func();
        assert_eq!(f.value(0.99), 0.0);
        assert_eq!(f.value(3.01), 0.0);
        assert_eq!(f.value(100.0), 0.0);
        assert_eq!(f.value(f64::NAN), 0.0);
    }

    #[test]
    fn float_noise_at_edge_stays_in_domain() {
        let f = func();
        assert!((f.value(1.0 - 1e-12) - 0.2).abs() < 1e-12);
        assert!((f.value(3.0 + 1e-12) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn single_node_domain() {
        let f = CumulativeFunction::from_frequencies(&[5.0], &[0.7]);
        assert!((f.value(5.0) - 0.7).abs() < 1e-12);
        assert_eq!(f.value(5.5), 0.0);
    }

    #[test]
    fn total_is_last_node() {
        assert!((func().total() - 1.0).abs() < 1e-12);
    }
}
