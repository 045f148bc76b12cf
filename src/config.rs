//! TOML site configuration: equipment, utility rates and input files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::demand::EnergyDemand;
use crate::equipment::{AuxBoiler, Chp, EquipmentError, PartLoadCurve, ThermalStorage};
use crate::units::{
    Btu, BtuPerHour, DollarsPerKilowatt, DollarsPerKilowattHour, DollarsPerMegaBtu, Kilowatts,
};

/// Part-load table keys, in load percent.
pub const PART_LOAD_PERCENTS: [u32; 8] = [30, 40, 50, 60, 70, 80, 90, 100];

/// Site configuration parsed from TOML.
///
/// Every key lives at the top level except the CHP part-load efficiencies,
/// which form a `[part_load]` table keyed by load percent. Load with
/// [`SiteConfig::from_toml_file`], then check [`SiteConfig::validate`] before
/// building equipment.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CHP electrical capacity (kW).
    pub chp_cap: f64,
    /// CHP heat-to-power ratio.
    pub chp_heat_power: f64,
    /// CHP turn-down ratio (fraction of capacity).
    pub chp_turn_down: f64,
    /// CHP installed cost ($/kW).
    pub chp_installed_cost: f64,
    /// CHP electrical efficiency by load percent.
    pub part_load: BTreeMap<String, f64>,

    /// Auxiliary boiler capacity (Btu/h).
    pub ab_capacity: f64,
    /// Auxiliary boiler efficiency (fraction).
    pub ab_eff: f64,
    /// Auxiliary boiler turn-down ratio (fraction of capacity).
    pub ab_turn_down: f64,

    /// Thermal storage capacity (Btu).
    pub tes_cap: f64,
    /// Thermal storage installed cost ($/kWh of capacity).
    pub tes_installed_cost: f64,
    /// Heat stored at the start of the run (Btu).
    #[serde(default)]
    pub tes_initial_charge: f64,

    /// Hourly demand CSV, relative to the configuration file.
    pub demand_filename: PathBuf,
    /// Electricity rate ($/kWh).
    pub electric_utility_cost: f64,
    /// Fuel rate ($/MMBtu).
    pub fuel_cost: f64,

    /// Optional CSV export of the hourly dispatch.
    #[serde(default)]
    pub dispatch_csv: Option<PathBuf>,
    /// Open the chart viewer after the run.
    #[serde(default = "default_show_plots")]
    pub show_plots: bool,

    /// Directory relative paths are resolved against.
    #[serde(skip)]
    base_dir: PathBuf,
}

fn default_show_plots() -> bool {
    true
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Offending key (e.g., `"ab_eff"` or `"part_load.50"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<EquipmentError> for ConfigError {
    fn from(err: EquipmentError) -> Self {
        match &err {
            EquipmentError::OutOfRange { field, .. } => Self::new(*field, err.to_string()),
            EquipmentError::PartLoadCurve(_) => Self::new("part_load", err.to_string()),
        }
    }
}

fn positive(value: f64) -> bool {
    value > 0.0 && value.is_finite()
}

fn non_negative(value: f64) -> bool {
    value >= 0.0 && value.is_finite()
}

fn fraction(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

fn efficiency(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}

impl SiteConfig {
    /// Parses a configuration file; relative paths inside it resolve
    /// against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        let mut config = Self::from_toml_str(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(config)
    }

    /// Parses a configuration from a TOML string. Relative paths resolve
    /// against the working directory.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid, a required key is
    /// missing or an unknown key is present.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns every violated constraint.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let mut check = |field: &str, ok: bool, message: &str| {
            if !ok {
                errors.push(ConfigError::new(field, message));
            }
        };

        check("chp_cap", positive(self.chp_cap), "must be > 0");
        check(
            "chp_heat_power",
            positive(self.chp_heat_power),
            "must be > 0",
        );
        check(
            "chp_turn_down",
            fraction(self.chp_turn_down),
            "must be in [0, 1]",
        );
        check(
            "chp_installed_cost",
            non_negative(self.chp_installed_cost),
            "must be >= 0",
        );
        check("ab_capacity", positive(self.ab_capacity), "must be > 0");
        check("ab_eff", efficiency(self.ab_eff), "must be in (0, 1]");
        check(
            "ab_turn_down",
            fraction(self.ab_turn_down),
            "must be in [0, 1]",
        );
        check("tes_cap", non_negative(self.tes_cap), "must be >= 0");
        check(
            "tes_installed_cost",
            non_negative(self.tes_installed_cost),
            "must be >= 0",
        );
        check(
            "tes_initial_charge",
            self.tes_initial_charge >= 0.0 && self.tes_initial_charge <= self.tes_cap.max(0.0),
            "must be in [0, tes_cap]",
        );
        check(
            "electric_utility_cost",
            non_negative(self.electric_utility_cost),
            "must be >= 0",
        );
        check("fuel_cost", non_negative(self.fuel_cost), "must be >= 0");

        for pct in PART_LOAD_PERCENTS {
            let field = format!("part_load.{pct}");
            match self.part_load.get(&pct.to_string()) {
                None => errors.push(ConfigError::new(field, "missing")),
                Some(&eff) if !efficiency(eff) => {
                    errors.push(ConfigError::new(field, "must be in (0, 1]"));
                }
                Some(_) => {}
            }
        }
        for key in self.part_load.keys() {
            if !PART_LOAD_PERCENTS.iter().any(|pct| pct.to_string() == *key) {
                errors.push(ConfigError::new(
                    format!("part_load.{key}"),
                    "unknown load percent, expected one of 30, 40, ..., 100",
                ));
            }
        }

        errors
    }

    /// Part-load points sorted by load percent.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a key is not an integer percent.
    pub fn part_load_points(&self) -> Result<Vec<(f64, f64)>, ConfigError> {
        let mut points = self
            .part_load
            .iter()
            .map(|(key, eff)| {
                key.parse::<u32>()
                    .map(|pct| (pct, *eff))
                    .map_err(|_| ConfigError::new(format!("part_load.{key}"), "not a load percent"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        points.sort_by_key(|(pct, _)| *pct);
        let points = points.into_iter().map(|(pct, eff)| (f64::from(pct), eff));
        Ok(points.collect())
    }

    /// Builds the CHP unit.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if any CHP parameter is invalid.
    pub fn chp(&self) -> Result<Chp, ConfigError> {
        let curve = PartLoadCurve::new(self.part_load_points()?)?;
        Ok(Chp::new(
            Kilowatts(self.chp_cap),
            self.chp_heat_power,
            self.chp_turn_down,
            curve,
            DollarsPerKilowatt(self.chp_installed_cost),
        )?)
    }

    /// Builds the auxiliary boiler.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if any boiler parameter is invalid.
    pub fn aux_boiler(&self) -> Result<AuxBoiler, ConfigError> {
        Ok(AuxBoiler::new(
            BtuPerHour(self.ab_capacity),
            self.ab_eff,
            self.ab_turn_down,
        )?)
    }

    /// Builds the thermal storage tank.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if any storage parameter is invalid.
    pub fn thermal_storage(&self) -> Result<ThermalStorage, ConfigError> {
        Ok(ThermalStorage::new(
            Btu(self.tes_cap),
            DollarsPerKilowattHour(self.tes_installed_cost),
            Btu(self.tes_initial_charge),
        )?)
    }

    /// Path of the demand CSV.
    pub fn demand_path(&self) -> PathBuf {
        self.base_dir.join(&self.demand_filename)
    }

    /// Path of the dispatch CSV export, if one is configured.
    pub fn dispatch_csv_path(&self) -> Option<PathBuf> {
        self.dispatch_csv.as_ref().map(|p| self.base_dir.join(p))
    }

    /// Loads the demand series with the configured utility rates.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::demand::DemandError`] if the CSV cannot be loaded.
    pub fn load_demand(&self) -> Result<EnergyDemand, crate::demand::DemandError> {
        EnergyDemand::from_csv_path(
            &self.demand_path(),
            DollarsPerKilowattHour(self.electric_utility_cost),
            DollarsPerMegaBtu(self.fuel_cost),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
chp_cap = 100.0
chp_heat_power = 1.0
chp_turn_down = 0.3
chp_installed_cost = 2500.0
ab_capacity = 2000000.0
ab_eff = 0.8
ab_turn_down = 0.1
tes_cap = 500000.0
tes_installed_cost = 50.0
demand_filename = "demand.csv"
electric_utility_cost = 0.12
fuel_cost = 8.0

[part_load]
30 = 0.22
40 = 0.24
50 = 0.26
60 = 0.27
70 = 0.28
80 = 0.29
90 = 0.30
100 = 0.31
"#;

    fn valid() -> SiteConfig {
        SiteConfig::from_toml_str(VALID).unwrap()
    }

    #[test]
    fn valid_toml_parses() {
        let cfg = valid();
        assert_eq!(cfg.chp_cap, 100.0);
        assert_eq!(cfg.part_load.len(), 8);
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
    }

    #[test]
    fn optional_keys_default() {
        let cfg = valid();
        assert_eq!(cfg.tes_initial_charge, 0.0);
        assert!(cfg.dispatch_csv.is_none());
        assert!(cfg.show_plots);
    }

    #[test]
    fn unknown_key_rejected() {
        let toml = format!("bogus_field = true\n{VALID}");
        assert!(SiteConfig::from_toml_str(&toml).is_err());
    }

    #[test]
    fn missing_key_rejected() {
        let toml = VALID.replace("fuel_cost = 8.0\n", "");
        let err = SiteConfig::from_toml_str(&toml).unwrap_err();
        assert!(err.message.contains("fuel_cost"), "{err}");
    }

    #[test]
    fn part_load_points_sorted_numerically() {
        let points = valid().part_load_points().unwrap();
        assert_eq!(points.first(), Some(&(30.0, 0.22)));
        assert_eq!(points.last(), Some(&(100.0, 0.31)));
        assert!(points.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn validation_collects_every_error() {
        let mut cfg = valid();
        cfg.ab_eff = 1.5;
        cfg.chp_turn_down = -0.1;
        cfg.tes_initial_charge = 1e9;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "ab_eff"));
        assert!(errors.iter().any(|e| e.field == "chp_turn_down"));
        assert!(errors.iter().any(|e| e.field == "tes_initial_charge"));
    }

    #[test]
    fn validation_catches_missing_part_load_point() {
        let mut cfg = valid();
        cfg.part_load.remove("60");
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "part_load.60"));
    }

    #[test]
    fn validation_catches_unknown_part_load_key() {
        let mut cfg = valid();
        cfg.part_load.insert("35".to_string(), 0.2);
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "part_load.35"));
    }

    #[test]
    fn builds_equipment() {
        let cfg = valid();
        let chp = cfg.chp().unwrap();
        assert_eq!(chp.capacity, Kilowatts(100.0));
        assert_eq!(chp.full_load_efficiency(), 0.31);
        assert_eq!(cfg.aux_boiler().unwrap().efficiency, 0.8);
        assert_eq!(cfg.thermal_storage().unwrap().capacity, Btu(500_000.0));
    }

    #[test]
    fn equipment_error_maps_to_field() {
        let mut cfg = valid();
        cfg.ab_eff = 0.0;
        assert!(cfg.aux_boiler().is_err());
    }

    #[test]
    fn relative_paths_resolve_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.toml");
        fs::write(&path, format!("dispatch_csv = \"out.csv\"\n{VALID}")).unwrap();
        let cfg = SiteConfig::from_toml_file(&path).unwrap();
        assert_eq!(cfg.demand_path(), dir.path().join("demand.csv"));
        assert_eq!(cfg.dispatch_csv_path(), Some(dir.path().join("out.csv")));
    }

    #[test]
    fn missing_file_is_error() {
        let err = SiteConfig::from_toml_file(Path::new("/nonexistent/site.toml")).unwrap_err();
        assert_eq!(err.field, "config");
    }
}
