//! Core dispatch types: per-hour records and the full run result.

use std::fmt;

use crate::units::{Btu, BtuPerHour, KilowattHours, Kilowatts};

/// Complete record of one hour of dispatch.
///
/// Energies are totals over the hour; demands are hourly averages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchStep {
    /// Hour index from the start of the series.
    pub hour: usize,
    /// Electrical demand.
    pub electrical_demand: Kilowatts,
    /// Thermal demand.
    pub thermal_demand: BtuPerHour,
    /// Electricity generated by the CHP unit.
    pub chp_electricity: KilowattHours,
    /// Heat recovered from the CHP unit.
    pub chp_heat: Btu,
    /// Fuel burned by the CHP unit.
    pub chp_fuel: Btu,
    /// CHP electrical efficiency at this hour's load (0 when off).
    pub chp_efficiency: f64,
    /// Heat put into storage.
    pub tes_charge: Btu,
    /// Heat drawn from storage.
    pub tes_discharge: Btu,
    /// Energy in storage at the end of the hour.
    pub tes_stored: Btu,
    /// CHP heat that could neither serve the load nor be stored.
    pub curtailed_heat: Btu,
    /// Heat delivered by the auxiliary boiler.
    pub boiler_heat: Btu,
    /// Fuel burned by the auxiliary boiler.
    pub boiler_fuel: Btu,
    /// Whether the boiler had to cycle below its minimum firing rate.
    pub boiler_cycling: bool,
    /// Thermal demand left unmet after the boiler ran at capacity.
    pub unserved_heat: Btu,
    /// Electricity still bought from the grid.
    pub grid_electricity: KilowattHours,
}

impl DispatchStep {
    /// Net storage flow: positive when charging, negative when discharging.
    pub fn tes_net_flow(&self) -> Btu {
        self.tes_charge - self.tes_discharge
    }

    /// Whether the CHP unit ran this hour.
    pub fn chp_running(&self) -> bool {
        self.chp_electricity.0 > 0.0
    }
}

impl fmt::Display for DispatchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "h={:>4} | el={:>8.2} kW  chp={:>8.2} kWh  grid={:>8.2} kWh | \
             heat={:>10.0} Btu/hr  chp={:>10.0}  tes={:>+10.0} (stored {:>10.0})  \
             boiler={:>10.0}  curtailed={:.0}  unserved={:.0}",
            self.hour,
            self.electrical_demand.0,
            self.chp_electricity.0,
            self.grid_electricity.0,
            self.thermal_demand.0,
            self.chp_heat.0,
            self.tes_net_flow().0,
            self.tes_stored.0,
            self.boiler_heat.0,
            self.curtailed_heat.0,
            self.unserved_heat.0,
        )
    }
}

/// Hour-ordered dispatch records for a whole run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DispatchResult {
    steps: Vec<DispatchStep>,
}

impl DispatchResult {
    pub fn new(steps: Vec<DispatchStep>) -> Self {
        Self { steps }
    }

    /// All hourly records.
    pub fn steps(&self) -> &[DispatchStep] {
        &self.steps
    }

    /// Number of hours dispatched.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// CHP electricity generated per hour.
    pub fn chp_electricity(&self) -> impl Iterator<Item = KilowattHours> + '_ {
        self.steps.iter().map(|s| s.chp_electricity)
    }

    /// CHP heat generated per hour.
    pub fn chp_heat(&self) -> impl Iterator<Item = Btu> + '_ {
        self.steps.iter().map(|s| s.chp_heat)
    }

    /// Net storage flow per hour (positive = charge).
    pub fn tes_net_flow(&self) -> impl Iterator<Item = Btu> + '_ {
        self.steps.iter().map(DispatchStep::tes_net_flow)
    }

    /// Stored energy at the end of each hour.
    pub fn tes_stored(&self) -> impl Iterator<Item = Btu> + '_ {
        self.steps.iter().map(|s| s.tes_stored)
    }

    /// Boiler heat output per hour.
    pub fn boiler_heat(&self) -> impl Iterator<Item = Btu> + '_ {
        self.steps.iter().map(|s| s.boiler_heat)
    }
}
