//! Wind-speed histograms, conservative regridding and cumulative lookup.

/// Piecewise-linear cumulative frequency function.
pub mod cumulative;
/// Source histogram bins and inferred edges.
pub mod histogram;
pub mod rebin;
pub mod wind_speed;

pub use cumulative::CumulativeFunction;
pub use histogram::{Bin, Histogram};
pub use wind_speed::{REBIN_WIDTH, WindSpeedDistribution};
