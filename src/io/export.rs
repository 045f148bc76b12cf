//! CSV export for hourly dispatch records.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::DispatchStep;

/// Column header for the dispatch CSV export.
const HEADER: &str = "hour,electrical_demand_kw,thermal_demand_btu_per_hr,\
                       chp_electricity_kwh,chp_heat_btu,chp_fuel_btu,chp_efficiency,\
                       tes_charge_btu,tes_discharge_btu,tes_stored_btu,curtailed_heat_btu,\
                       boiler_heat_btu,boiler_fuel_btu,boiler_cycling,unserved_heat_btu,\
                       grid_electricity_kwh";

/// Exports dispatch records to a CSV file at the given path.
///
/// Writes a header row followed by one data row per hour. Produces
/// deterministic output for identical inputs.
///
/// # Arguments
///
/// * `steps` - Hourly dispatch records
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(steps: &[DispatchStep], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(steps, buf)
}

/// Writes dispatch records as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(steps: &[DispatchStep], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for s in steps {
        wtr.write_record(&[
            s.hour.to_string(),
            format!("{:.4}", s.electrical_demand.0),
            format!("{:.4}", s.thermal_demand.0),
            format!("{:.4}", s.chp_electricity.0),
            format!("{:.4}", s.chp_heat.0),
            format!("{:.4}", s.chp_fuel.0),
            format!("{:.4}", s.chp_efficiency),
            format!("{:.4}", s.tes_charge.0),
            format!("{:.4}", s.tes_discharge.0),
            format!("{:.4}", s.tes_stored.0),
            format!("{:.4}", s.curtailed_heat.0),
            format!("{:.4}", s.boiler_heat.0),
            format!("{:.4}", s.boiler_fuel.0),
            s.boiler_cycling.to_string(),
            format!("{:.4}", s.unserved_heat.0),
            format!("{:.4}", s.grid_electricity.0),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
