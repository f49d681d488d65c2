//! Annual Energy Production ratio estimation from wind-speed histograms and
//! power curves.

/// Energy-yield integration and AEP reporting.
pub mod aep;
pub mod cli;
/// TOML scenario configuration.
pub mod config;
pub mod distribution;
pub mod error;
/// CSV import and export.
pub mod io;
pub mod logging;
pub mod power_curve;
pub mod runner;
