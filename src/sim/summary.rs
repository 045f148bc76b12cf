//! Post-hoc totals computed from a dispatch run.

use std::fmt;

use crate::units::{Btu, KilowattHours};

use super::types::{DispatchResult, DispatchStep};

/// Aggregate totals derived from a complete dispatch run.
///
/// Computed post-hoc from the hourly records so the reported totals always
/// agree with the step data.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchSummary {
    /// Hours dispatched.
    pub n_hours: usize,
    /// Electricity generated by the CHP unit.
    pub chp_electricity: KilowattHours,
    /// Heat recovered from the CHP unit.
    pub chp_heat: Btu,
    /// Fuel burned by the CHP unit.
    pub chp_fuel: Btu,
    /// Hours with the CHP unit running.
    pub chp_run_hours: usize,
    /// Heat delivered by the auxiliary boiler.
    pub boiler_heat: Btu,
    /// Fuel burned by the auxiliary boiler.
    pub boiler_fuel: Btu,
    /// Hours with the boiler cycling below its minimum firing rate.
    pub boiler_cycling_hours: usize,
    /// Heat put into storage.
    pub tes_charged: Btu,
    /// Heat drawn from storage.
    pub tes_discharged: Btu,
    /// Storage equivalent full cycles (discharged / capacity).
    pub tes_equivalent_full_cycles: f64,
    /// Highest end-of-hour storage level.
    pub tes_peak_stored: Btu,
    /// CHP heat dumped because storage was full.
    pub curtailed_heat: Btu,
    /// Thermal demand the boiler could not cover.
    pub unserved_heat: Btu,
    /// Electricity bought from the grid.
    pub grid_electricity: KilowattHours,
}

impl DispatchSummary {
    /// Computes all totals from a dispatch run.
    ///
    /// # Arguments
    ///
    /// * `result` - Complete dispatch run
    /// * `tes_capacity` - Storage capacity for the cycle count
    pub fn from_result(result: &DispatchResult, tes_capacity: Btu) -> Self {
        let steps = result.steps();
        let total_btu = |f: fn(&DispatchStep) -> Btu| steps.iter().map(f).sum::<Btu>();
        let total_kwh =
            |f: fn(&DispatchStep) -> KilowattHours| steps.iter().map(f).sum::<KilowattHours>();

        let tes_discharged = total_btu(|s| s.tes_discharge);
        let tes_equivalent_full_cycles = if tes_capacity.0 > 0.0 {
            tes_discharged / tes_capacity
        } else {
            0.0
        };

        Self {
            n_hours: steps.len(),
            chp_electricity: total_kwh(|s| s.chp_electricity),
            chp_heat: total_btu(|s| s.chp_heat),
            chp_fuel: total_btu(|s| s.chp_fuel),
            chp_run_hours: steps.iter().filter(|s| s.chp_running()).count(),
            boiler_heat: total_btu(|s| s.boiler_heat),
            boiler_fuel: total_btu(|s| s.boiler_fuel),
            boiler_cycling_hours: steps.iter().filter(|s| s.boiler_cycling).count(),
            tes_charged: total_btu(|s| s.tes_charge),
            tes_discharged,
            tes_equivalent_full_cycles,
            tes_peak_stored: steps.iter().map(|s| s.tes_stored).fold(Btu::ZERO, Btu::max),
            curtailed_heat: total_btu(|s| s.curtailed_heat),
            unserved_heat: total_btu(|s| s.unserved_heat),
            grid_electricity: total_kwh(|s| s.grid_electricity),
        }
    }
}

impl fmt::Display for DispatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Dispatch Summary ({} h) ---", self.n_hours)?;
        writeln!(
            f,
            "CHP:        {} generated, {} recovered, {} fuel, {} h running",
            self.chp_electricity, self.chp_heat, self.chp_fuel, self.chp_run_hours
        )?;
        writeln!(
            f,
            "Aux boiler: {} delivered, {} fuel, {} h cycling",
            self.boiler_heat, self.boiler_fuel, self.boiler_cycling_hours
        )?;
        writeln!(
            f,
            "TES:        {} charged, {} discharged ({:.1} equiv. cycles), peak {}",
            self.tes_charged,
            self.tes_discharged,
            self.tes_equivalent_full_cycles,
            self.tes_peak_stored
        )?;
        writeln!(f, "Curtailed:  {}", self.curtailed_heat)?;
        writeln!(f, "Unserved:   {}", self.unserved_heat)?;
        write!(f, "Grid:       {}", self.grid_electricity)
    }
}
