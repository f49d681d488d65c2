//! CSV readers for wind-speed histograms and power-curve tables.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde::Deserialize;

use crate::distribution::Bin;
use crate::error::AepError;
use crate::power_curve::{PowerCurveLevel, TabulatedPowerCurve};

#[derive(Debug, Deserialize)]
struct BinRecord {
    bin_centre: f64,
    bin_value: f64,
}

#[derive(Debug, Deserialize)]
struct LevelRecord {
    wind_speed: f64,
    power: f64,
    #[serde(default)]
    data_count: u64,
}

/// Reads `(bin_centre, bin_value)` rows from a histogram CSV file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened, or a CSV error if a
/// row is missing a column or fails to parse.
pub fn read_distribution_csv(path: &Path) -> Result<Vec<Bin>, AepError> {
    let file = File::open(path).map_err(|e| {
        AepError::Io(io::Error::new(
            e.kind(),
            format!("cannot read \"{}\": {e}", path.display()),
        ))
    })?;
    read_distribution(io::BufReader::new(file))
}

/// Reads histogram rows from any reader. Expects a
/// `bin_centre,bin_value` header.
///
/// # Errors
///
/// Returns a CSV error on malformed rows.
pub fn read_distribution(reader: impl Read) -> Result<Vec<Bin>, AepError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut bins = Vec::new();
    for record in rdr.deserialize::<BinRecord>() {
        let r = record?;
        bins.push(Bin::new(r.bin_centre, r.bin_value));
    }
    Ok(bins)
}

/// Reads a power-curve CSV file into a [`TabulatedPowerCurve`].
///
/// # Errors
///
/// Returns I/O or CSV errors from reading, or a validation error if the
/// table is empty or has repeated wind speeds.
pub fn read_power_curve_csv(path: &Path) -> Result<TabulatedPowerCurve, AepError> {
    let file = File::open(path).map_err(|e| {
        AepError::Io(io::Error::new(
            e.kind(),
            format!("cannot read \"{}\": {e}", path.display()),
        ))
    })?;
    read_power_curve(io::BufReader::new(file))
}

/// Reads power-curve levels from any reader. Expects a
/// `wind_speed,power[,data_count]` header; a missing `data_count` column
/// reads as zero.
///
/// # Errors
///
/// Returns CSV errors on malformed rows and validation errors from
/// [`TabulatedPowerCurve::new`].
pub fn read_power_curve(reader: impl Read) -> Result<TabulatedPowerCurve, AepError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut levels = Vec::new();
    for record in rdr.deserialize::<LevelRecord>() {
        let r = record?;
        levels.push(PowerCurveLevel::new(r.wind_speed, r.power, r.data_count));
    }
    TabulatedPowerCurve::new(levels)
}
