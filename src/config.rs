//! TOML-based planning configuration and preset definitions.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::error::PlanError;
use crate::forecast::{DayRange, ForecastSet, SyntheticForecast};
use crate::io::load::load_forecast;
use crate::model::PlantParams;
use crate::plan::Scenario;

/// Top-level planning configuration parsed from TOML.
///
/// All sections have defaults matching the `reference` preset's plant and
/// forecast. Load from TOML with [`PlanConfig::from_toml_file`] or use
/// [`PlanConfig::reference`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanConfig {
    /// Plant economics.
    #[serde(default)]
    pub plant: PlantConfig,
    /// Where the forecast comes from.
    #[serde(default)]
    pub data: DataConfig,
    /// Synthetic forecast shape, used when `data.source = "synthetic"`.
    #[serde(default)]
    pub synthetic: SyntheticConfig,
    /// Availability scenarios, planned independently and in order.
    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<Scenario>,
}

/// Plant economics.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlantConfig {
    /// Capacity multiplier applied to production (must be > 0).
    pub capacity: f64,
    /// Fixed maintenance cost per day, scaled by the day's coefficient (must be > 0).
    pub fixed_cost: f64,
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            capacity: 20.0,
            fixed_cost: 500.0,
        }
    }
}

impl PlantConfig {
    pub fn params(&self) -> PlantParams {
        PlantParams {
            capacity: self.capacity,
            fixed_cost: self.fixed_cost,
        }
    }
}

/// Forecast source selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// `"synthetic"` or `"csv"`.
    pub source: String,
    /// Production capacity-factor series.
    pub production_csv: PathBuf,
    /// Price series.
    pub price_csv: PathBuf,
    /// Maintenance cost coefficient series.
    pub coeff_csv: PathBuf,
    /// Column names shared by the three files.
    pub columns: ColumnConfig,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: "synthetic".to_string(),
            production_csv: PathBuf::from("data/production.csv"),
            price_csv: PathBuf::from("data/price.csv"),
            coeff_csv: PathBuf::from("data/coeff.csv"),
            columns: ColumnConfig::default(),
        }
    }
}

/// CSV column names.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnConfig {
    pub period: String,
    pub production: String,
    pub price: String,
    pub coeff: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            period: "period".to_string(),
            production: "forecastp".to_string(),
            price: "price".to_string(),
            coeff: "coeff".to_string(),
        }
    }
}

/// Synthetic forecast parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyntheticConfig {
    /// Number of days (must be > 0).
    pub days: usize,
    /// Master random seed.
    pub seed: u64,
    pub production_mean: f64,
    pub production_amp: f64,
    pub price_mean: f64,
    pub price_amp: f64,
    /// Weekend price discount (0.0–1.0).
    pub weekend_discount: f64,
    /// Day of peak demand (1–365).
    pub peak_day: usize,
    /// Relative noise standard deviation (>= 0).
    pub noise_std: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        let g = SyntheticForecast::default();
        Self {
            days: g.days,
            seed: g.seed,
            production_mean: g.production_mean,
            production_amp: g.production_amp,
            price_mean: g.price_mean,
            price_amp: g.price_amp,
            weekend_discount: g.weekend_discount,
            peak_day: g.peak_day,
            noise_std: g.noise_std,
        }
    }
}

impl SyntheticConfig {
    pub fn generator(&self) -> SyntheticForecast {
        SyntheticForecast {
            days: self.days,
            seed: self.seed,
            production_mean: self.production_mean,
            production_amp: self.production_amp,
            price_mean: self.price_mean,
            price_amp: self.price_amp,
            weekend_discount: self.weekend_discount,
            peak_day: self.peak_day,
            noise_std: self.noise_std,
        }
    }
}

fn default_scenarios() -> Vec<Scenario> {
    vec![Scenario::unconstrained("no_blackout")]
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"plant.capacity"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl PlanConfig {
    /// One synthetic year, planned with and without a mid-year blackout.
    pub fn reference() -> Self {
        Self {
            plant: PlantConfig::default(),
            data: DataConfig::default(),
            synthetic: SyntheticConfig::default(),
            scenarios: vec![
                Scenario::unconstrained("no_blackout"),
                Scenario {
                    name: "blackout_150_200".to_string(),
                    blackouts: vec![DayRange::new(150, 200)],
                },
            ],
        }
    }

    /// Two synthetic months with a single blackout; fast enough for smoke tests.
    pub fn quick() -> Self {
        Self {
            synthetic: SyntheticConfig {
                days: 60,
                ..SyntheticConfig::default()
            },
            scenarios: vec![Scenario {
                name: "blackout_20_30".to_string(),
                blackouts: vec![DayRange::new(20, 30)],
            }],
            ..Self::reference()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["reference", "quick"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "reference" => Ok(Self::reference()),
            "quick" => Ok(Self::quick()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// Relative CSV paths are resolved against the file's directory.
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
        if let Some(dir) = path.parent() {
            cfg.data.resolve_relative_to(dir);
        }
        Ok(cfg)
    }

    /// Parses a configuration from a TOML string.
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

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let mut push = |field: &str, message: String| {
            errors.push(ConfigError {
                field: field.to_string(),
                message,
            });
        };

        let p = &self.plant;
        if !(p.capacity.is_finite() && p.capacity > 0.0) {
            push("plant.capacity", "must be > 0".into());
        }
        if !(p.fixed_cost.is_finite() && p.fixed_cost > 0.0) {
            push("plant.fixed_cost", "must be > 0".into());
        }

        let d = &self.data;
        match d.source.as_str() {
            "synthetic" => {
                let s = &self.synthetic;
                if s.days == 0 {
                    push("synthetic.days", "must be > 0".into());
                }
                if !(1..=365).contains(&s.peak_day) {
                    push("synthetic.peak_day", "must be in [1, 365]".into());
                }
                if !(0.0..1.0).contains(&s.weekend_discount) {
                    push("synthetic.weekend_discount", "must be in [0.0, 1.0)".into());
                }
                if s.noise_std < 0.0 {
                    push("synthetic.noise_std", "must be >= 0".into());
                }
                if s.production_amp > s.production_mean {
                    push(
                        "synthetic.production_amp",
                        "must be <= synthetic.production_mean".into(),
                    );
                }
            }
            "csv" => {
                for (field, path) in [
                    ("data.production_csv", &d.production_csv),
                    ("data.price_csv", &d.price_csv),
                    ("data.coeff_csv", &d.coeff_csv),
                ] {
                    if path.as_os_str().is_empty() {
                        push(field, "must not be empty".into());
                    }
                }
            }
            other => push(
                "data.source",
                format!("must be \"synthetic\" or \"csv\", got \"{other}\""),
            ),
        }

        if self.scenarios.is_empty() {
            push("scenarios", "at least one scenario is required".into());
        }
        let mut seen = HashSet::new();
        for (i, sc) in self.scenarios.iter().enumerate() {
            if sc.name.trim().is_empty() {
                push(&format!("scenarios[{i}].name"), "must not be empty".into());
            } else if !seen.insert(sc.name.as_str()) {
                push(
                    &format!("scenarios[{i}].name"),
                    format!("duplicate scenario name \"{}\"", sc.name),
                );
            }
            for (j, b) in sc.blackouts.iter().enumerate() {
                if b.start == 0 || b.start > b.end {
                    push(
                        &format!("scenarios[{i}].blackouts[{j}]"),
                        format!("need 1 <= start <= end, got {}..={}", b.start, b.end),
                    );
                }
            }
        }

        errors
    }

    /// Loads or generates the forecast selected by `data.source`.
    ///
    /// # Errors
    ///
    /// Returns a [`PlanError`] if a CSV file cannot be loaded or the series
    /// are inconsistent.
    pub fn forecast(&self) -> Result<ForecastSet, PlanError> {
        match self.data.source.as_str() {
            "csv" => Ok(load_forecast(&self.data)?),
            _ => Ok(self.synthetic.generator().generate()?),
        }
    }
}

impl DataConfig {
    fn resolve_relative_to(&mut self, dir: &Path) {
        for path in [
            &mut self.production_csv,
            &mut self.price_csv,
            &mut self.coeff_csv,
        ] {
            if path.is_relative() {
                *path = dir.join(&*path);
            }
        }
    }
}
