//! Energy-yield integration of power curves against a wind-speed distribution.

pub mod calculator;
/// Human- and machine-readable summaries of a finished calculation.
pub mod report;
pub mod types;

pub use calculator::{AepCalculator, AepResult};
pub use report::AepReport;
pub use types::{CurveType, DistributionSource, EnergyRow, EnergyTable, IntegrationBound};
