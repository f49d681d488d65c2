//! TOML-based scenario configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::aep::DistributionSource;
use crate::distribution::Bin;
use crate::error::ConfigError;

/// Top-level scenario configuration parsed from TOML.
///
/// Relative paths are resolved against `base_dir`, which
/// [`ScenarioConfig::from_toml_file`] sets to the scenario file's directory.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Wind-speed distribution provisioning.
    #[serde(default)]
    pub distribution: DistributionConfig,
    /// Reference power curve.
    #[serde(default)]
    pub reference: CurveConfig,
    /// Measured power curve.
    #[serde(default)]
    pub measured: CurveConfig,
    /// Integration method.
    #[serde(default)]
    pub calculation: CalculationConfig,
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Wind-speed distribution provisioning: a CSV path or inline bins, never both.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DistributionConfig {
    /// Histogram CSV with `bin_centre,bin_value` columns.
    pub path: Option<PathBuf>,
    /// Inline `[centre, value]` pairs.
    pub bins: Option<Vec<[f64; 2]>>,
}

/// Power-curve file location.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CurveConfig {
    /// Power-curve CSV with `wind_speed,power,data_count` columns.
    pub path: Option<PathBuf>,
}

/// Integration method selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculationConfig {
    /// `"standard"` or `"lcb"` (last common bin).
    pub method: String,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            method: "standard".to_string(),
        }
    }
}

impl ScenarioConfig {
    /// Available integration methods.
    pub const METHODS: &[&str] = &["standard", "lcb"];

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        let mut cfg = Self::from_toml_str(&content)?;
        cfg.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(cfg)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Resolves `path` against the scenario's base directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Turns the `[distribution]` section into a [`DistributionSource`].
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` on field `distribution` if both or neither of
    /// `path` and `bins` are given.
    pub fn distribution_source(&self) -> Result<DistributionSource, ConfigError> {
        let d = &self.distribution;
        match (&d.path, &d.bins) {
            (Some(_), Some(_)) => Err(ConfigError::new(
                "distribution",
                "either a distribution path or inline bins must be provided, not both",
            )),
            (None, None) => Err(ConfigError::new(
                "distribution",
                "a distribution path or inline bins must be provided",
            )),
            (Some(path), None) => Ok(DistributionSource::Path(self.resolve_path(path))),
            (None, Some(bins)) => Ok(DistributionSource::Observations(
                bins.iter().map(|&[c, v]| Bin::new(c, v)).collect(),
            )),
        }
    }

    /// Whether the last-common-bin method is selected.
    pub fn uses_lcb(&self) -> bool {
        self.calculation.method == "lcb"
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = self.distribution_source() {
            errors.push(e);
        }
        if self.reference.path.is_none() {
            errors.push(ConfigError::new("reference.path", "must be provided"));
        }
        if self.measured.path.is_none() {
            errors.push(ConfigError::new("measured.path", "must be provided"));
        }

        let method = &self.calculation.method;
        if !Self::METHODS.contains(&method.as_str()) {
            errors.push(ConfigError::new(
                "calculation.method",
                format!("must be \"standard\" or \"lcb\", got \"{method}\""),
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
[distribution]
path = "dist.csv"

[reference]
path = "reference.csv"

[measured]
path = "measured.csv"

[calculation]
method = "lcb"
"#;

    #[test]
    fn valid_toml_parses() {
        let cfg = ScenarioConfig::from_toml_str(FULL);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.unwrap();
        assert!(cfg.validate().is_empty());
        assert!(cfg.uses_lcb());
    }

    #[test]
    fn method_defaults_to_standard() {
        let toml = r#"
[distribution]
bins = [[4.0, 0.5], [5.0, 0.5]]
[reference]
path = "r.csv"
[measured]
path = "m.csv"
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).unwrap();
        assert_eq!(cfg.calculation.method, "standard");
        assert!(!cfg.uses_lcb());
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn inline_bins_become_observations() {
        let toml = r#"
[distribution]
bins = [[4.0, 0.25], [5.0, 0.75]]
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).unwrap();
        match cfg.distribution_source() {
            Ok(DistributionSource::Observations(bins)) => {
                assert_eq!(bins, vec![Bin::new(4.0, 0.25), Bin::new(5.0, 0.75)]);
            }
            other => panic!("expected observations, got {other:?}"),
        }
    }

    #[test]
    fn both_distribution_sources_rejected() {
        let toml = r#"
[distribution]
path = "dist.csv"
bins = [[4.0, 1.0]]
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).unwrap();
        let err = cfg.distribution_source().unwrap_err();
        assert_eq!(err.field, "distribution");
        assert!(err.message.contains("not both"));
    }

    #[test]
    fn missing_distribution_rejected() {
        let cfg = ScenarioConfig::default();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "distribution"));
        assert!(errors.iter().any(|e| e.field == "reference.path"));
        assert!(errors.iter().any(|e| e.field == "measured.path"));
    }

    #[test]
    fn validation_catches_bad_method() {
        let mut cfg = ScenarioConfig::from_toml_str(FULL).unwrap();
        cfg.calculation.method = "bogus".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "calculation.method"));
    }

    #[test]
    fn unknown_field_rejected() {
        let toml = r#"
[calculation]
method = "standard"
bogus_field = true
"#;
        assert!(ScenarioConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn relative_paths_resolve_against_base_dir() {
        let mut cfg = ScenarioConfig::from_toml_str(FULL).unwrap();
        cfg.base_dir = PathBuf::from("scenarios");
        match cfg.distribution_source() {
            Ok(DistributionSource::Path(p)) => assert_eq!(p, Path::new("scenarios/dist.csv")),
            other => panic!("expected path, got {other:?}"),
        }
    }
}
