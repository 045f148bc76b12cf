//! Hourly site energy demand and utility rates.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::units::{
    Btu, BtuPerHour, DollarsPerKilowattHour, DollarsPerMegaBtu, Hours, KilowattHours, Kilowatts,
};

/// Number of hours in a non-leap year.
pub const HOURS_PER_YEAR: usize = 8760;

/// Failure while loading or validating a demand series.
#[derive(Debug, Error)]
pub enum DemandError {
    #[error("cannot open demand file \"{path}\": {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed demand data: {0}")]
    Csv(#[from] csv::Error),

    #[error("demand series is empty")]
    Empty,

    #[error("hour {hour}: {field} must be a finite value >= 0, got {value}")]
    InvalidValue {
        hour: usize,
        field: &'static str,
        value: f64,
    },
}

/// Electrical and thermal demand for one hour.
///
/// Columns of the demand CSV file: `electrical_kw,thermal_btu_per_hr`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct HourlyDemand {
    /// Average electrical demand over the hour.
    #[serde(rename = "electrical_kw")]
    pub electrical: Kilowatts,
    /// Average thermal demand over the hour.
    #[serde(rename = "thermal_btu_per_hr")]
    pub thermal: BtuPerHour,
}

impl HourlyDemand {
    pub fn new(electrical: Kilowatts, thermal: BtuPerHour) -> Self {
        Self {
            electrical,
            thermal,
        }
    }
}

/// Hourly demand for one site plus the utility rates paid for it.
///
/// Immutable once loaded. Both demand series share one record per hour, so
/// they always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyDemand {
    hours: Vec<HourlyDemand>,

    /// Price of grid electricity.
    pub electric_cost: DollarsPerKilowattHour,

    /// Price of fuel (natural gas).
    pub fuel_cost: DollarsPerMegaBtu,
}

impl EnergyDemand {
    /// Wraps an hourly series after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`DemandError::Empty`] for an empty series and
    /// [`DemandError::InvalidValue`] for negative or non-finite demand.
    pub fn new(
        hours: Vec<HourlyDemand>,
        electric_cost: DollarsPerKilowattHour,
        fuel_cost: DollarsPerMegaBtu,
    ) -> Result<Self, DemandError> {
        if hours.is_empty() {
            return Err(DemandError::Empty);
        }
        for (hour, demand) in hours.iter().enumerate() {
            if !demand.electrical.is_finite() || demand.electrical.0 < 0.0 {
                return Err(DemandError::InvalidValue {
                    hour,
                    field: "electrical_kw",
                    value: demand.electrical.0,
                });
            }
            if !demand.thermal.is_finite() || demand.thermal.0 < 0.0 {
                return Err(DemandError::InvalidValue {
                    hour,
                    field: "thermal_btu_per_hr",
                    value: demand.thermal.0,
                });
            }
        }
        if hours.len() != HOURS_PER_YEAR {
            warn!(
                n_hours = hours.len(),
                expected = HOURS_PER_YEAR,
                "demand series is not exactly one year, annual totals cover the given hours",
            );
        }

        Ok(Self {
            hours,
            electric_cost,
            fuel_cost,
        })
    }

    /// Loads the hourly series from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns a [`DemandError`] if the file cannot be opened or parsed, or
    /// the series is invalid.
    pub fn from_csv_path(
        path: &Path,
        electric_cost: DollarsPerKilowattHour,
        fuel_cost: DollarsPerMegaBtu,
    ) -> Result<Self, DemandError> {
        let file = File::open(path).map_err(|source| DemandError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let demand = Self::from_csv_reader(file, electric_cost, fuel_cost)?;
        debug!(path = %path.display(), n_hours = demand.len(), "loaded demand");
        Ok(demand)
    }

    /// Loads the hourly series from any CSV source.
    ///
    /// # Errors
    ///
    /// Returns a [`DemandError`] if parsing fails or the series is invalid.
    pub fn from_csv_reader(
        reader: impl Read,
        electric_cost: DollarsPerKilowattHour,
        fuel_cost: DollarsPerMegaBtu,
    ) -> Result<Self, DemandError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let hours = rdr.deserialize().collect::<Result<Vec<HourlyDemand>, _>>()?;
        Self::new(hours, electric_cost, fuel_cost)
    }

    /// Hourly records in time order.
    pub fn hours(&self) -> &[HourlyDemand] {
        &self.hours
    }

    /// Number of hours covered.
    pub fn len(&self) -> usize {
        self.hours.len()
    }

    /// Always `false` for a validated series; provided for API completeness.
    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    /// Total electrical energy demanded.
    pub fn annual_electricity(&self) -> KilowattHours {
        self.hours.iter().map(|h| h.electrical * Hours::ONE).sum()
    }

    /// Total thermal energy demanded.
    pub fn annual_heat(&self) -> Btu {
        self.hours.iter().map(|h| h.thermal * Hours::ONE).sum()
    }

    /// Hourly electrical demand series.
    pub fn electrical_series(&self) -> impl Iterator<Item = Kilowatts> + '_ {
        self.hours.iter().map(|h| h.electrical)
    }

    /// Hourly thermal demand series.
    pub fn thermal_series(&self) -> impl Iterator<Item = BtuPerHour> + '_ {
        self.hours.iter().map(|h| h.thermal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates() -> (DollarsPerKilowattHour, DollarsPerMegaBtu) {
        (DollarsPerKilowattHour(0.12), DollarsPerMegaBtu(8.0))
    }

    #[test]
    fn parses_csv_rows() {
        let data = "electrical_kw,thermal_btu_per_hr\n50.0,400000\n 20.5 , 100000.5\n";
        let (el, fuel) = rates();
        let demand = EnergyDemand::from_csv_reader(data.as_bytes(), el, fuel).unwrap();
        assert_eq!(demand.len(), 2);
        assert_eq!(demand.hours()[1].electrical, Kilowatts(20.5));
        assert_eq!(demand.hours()[1].thermal, BtuPerHour(100_000.5));
    }

    #[test]
    fn annual_totals_sum_hours() {
        let data = "electrical_kw,thermal_btu_per_hr\n10,1000\n20,2000\n30,3000\n";
        let (el, fuel) = rates();
        let demand = EnergyDemand::from_csv_reader(data.as_bytes(), el, fuel).unwrap();
        assert_eq!(demand.annual_electricity(), KilowattHours(60.0));
        assert_eq!(demand.annual_heat(), Btu(6_000.0));
    }

    #[test]
    fn rejects_empty_file() {
        let data = "electrical_kw,thermal_btu_per_hr\n";
        let (el, fuel) = rates();
        let result = EnergyDemand::from_csv_reader(data.as_bytes(), el, fuel);
        assert!(matches!(result, Err(DemandError::Empty)));
    }

    #[test]
    fn rejects_negative_demand() {
        let data = "electrical_kw,thermal_btu_per_hr\n10,1000\n-1,2000\n";
        let (el, fuel) = rates();
        let result = EnergyDemand::from_csv_reader(data.as_bytes(), el, fuel);
        assert!(matches!(
            result,
            Err(DemandError::InvalidValue {
                hour: 1,
                field: "electrical_kw",
                ..
            })
        ));
    }

    #[test]
    fn rejects_malformed_number() {
        let data = "electrical_kw,thermal_btu_per_hr\n10,abc\n";
        let (el, fuel) = rates();
        let result = EnergyDemand::from_csv_reader(data.as_bytes(), el, fuel);
        assert!(matches!(result, Err(DemandError::Csv(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let (el, fuel) = rates();
        let result = EnergyDemand::from_csv_path(Path::new("/nonexistent/demand.csv"), el, fuel);
        assert!(matches!(result, Err(DemandError::Io { .. })));
    }
}
