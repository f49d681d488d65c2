//! CSV export for per-bin energy tables.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::aep::{AepCalculator, CurveType};
use crate::power_curve::PowerCurve;

/// Column header for energy table export.
const HEADER: &str = "bin_centre,curve,upper,lower,freq,power,energy";

/// Exports both energy tables of a calculator to a CSV file.
///
/// Writes a header row, then the reference rows and the measured rows, each
/// in ascending bin-centre order. Produces deterministic output for
/// identical inputs.
///
/// # Arguments
///
/// * `calc` - Calculator whose tables have been populated
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_energy_csv<R: PowerCurve, M: PowerCurve>(
    calc: &AepCalculator<R, M>,
    path: &Path,
) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_energy_csv(calc, buf)
}

/// Writes both energy tables as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_energy_csv<R: PowerCurve, M: PowerCurve>(
    calc: &AepCalculator<R, M>,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for curve_type in CurveType::ALL {
        for (centre, r) in calc.energy_table(curve_type).iter() {
            wtr.write_record(&[
                format!("{centre:.3}"),
                curve_type.to_string(),
                format!("{:.6}", r.upper),
                format!("{:.6}", r.lower),
                format!("{:.8}", r.freq),
                format!("{:.6}", r.power),
                format!("{:.8}", r.energy),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
