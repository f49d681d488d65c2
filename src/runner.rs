//! Scenario-driven AEP run: load curves and distribution, integrate, report.

use log::debug;

use crate::aep::{AepCalculator, AepReport};
use crate::config::ScenarioConfig;
use crate::error::{AepError, ConfigError};
use crate::io::import::read_power_curve_csv;
use crate::power_curve::TabulatedPowerCurve;

/// Calculator type produced from scenario files.
pub type ScenarioCalculator = AepCalculator<TabulatedPowerCurve, TabulatedPowerCurve>;

/// A finished scenario run.
#[derive(Debug, Clone)]
pub struct AepRun {
    /// Calculator holding the populated energy tables.
    pub calculator: ScenarioCalculator,
    pub report: AepReport,
}

/// Loads every input named by `config` and computes the AEP ratio.
///
/// # Errors
///
/// Returns the first configuration error from [`ScenarioConfig::validate`],
/// or any I/O, validation or arithmetic error raised while loading and
/// integrating.
pub fn run_scenario(config: &ScenarioConfig) -> Result<AepRun, AepError> {
    if let Some(e) = config.validate().into_iter().next() {
        return Err(e.into());
    }

    let source = config.distribution_source()?;
    let reference = load_curve(config, "reference.path", config.reference.path.as_deref())?;
    let measured = load_curve(config, "measured.path", config.measured.path.as_deref())?;
    debug!(
        "loaded curves: reference {} levels, measured {} levels",
        reference.levels().len(),
        measured.levels().len()
    );

    let mut calculator = if config.uses_lcb() {
        AepCalculator::last_common_bin(reference, measured, source)?
    } else {
        AepCalculator::new(reference, measured, source)?
    };

    calculator.calculate_aep()?;
    let result = calculator
        .result()
        .ok_or_else(|| AepError::Arithmetic("AEP result missing after calculation".into()))?;
    let report = AepReport::new(&calculator, result);

    Ok(AepRun { calculator, report })
}

fn load_curve(
    config: &ScenarioConfig,
    field: &str,
    path: Option<&std::path::Path>,
) -> Result<TabulatedPowerCurve, AepError> {
    let path = path.ok_or_else(|| ConfigError::new(field, "must be provided"))?;
    read_power_curve_csv(&config.resolve_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_reports_first_error() {
        let cfg = ScenarioConfig::default();
        let err = run_scenario(&cfg);
        match err {
            Err(AepError::Configuration(e)) => assert_eq!(e.field, "distribution"),
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn missing_curve_file_is_io_error() {
        let cfg = ScenarioConfig::from_toml_str(
            r#"
[distribution]
bins = [[5.0, 1.0]]
[reference]
path = "/nonexistent/reference.csv"
[measured]
path = "/nonexistent/measured.csv"
"#,
        )
        .unwrap();
        assert!(matches!(run_scenario(&cfg), Err(AepError::Io(_))));
    }
}
