//! Dispatch engine that runs the CHP plant against hourly demand.

use tracing::{debug, warn};

use crate::demand::HourlyDemand;
use crate::equipment::{AuxBoiler, Chp, TesState, ThermalStorage};
use crate::units::{Btu, Hours, KilowattHours};

use super::controller::{HeatRouting, LoadFollowingController};
use super::types::{DispatchResult, DispatchStep};

/// Dispatch engine owning the plant equipment and controller.
///
/// Holds no run state: storage charge is a [`TesState`] value passed into
/// [`Engine::step`] and returned from it, so every run starts fresh from the
/// storage's initial charge and repeated runs are identical.
#[derive(Debug, Clone)]
pub struct Engine {
    chp: Chp,
    boiler: AuxBoiler,
    tes: ThermalStorage,
    controller: LoadFollowingController,
}

impl Engine {
    /// Creates a new dispatch engine.
    ///
    /// # Arguments
    ///
    /// * `chp` - Combined heat and power unit
    /// * `boiler` - Auxiliary boiler covering heat shortfalls
    /// * `tes` - Thermal storage (zero capacity for none)
    /// * `controller` - Dispatch controller
    pub fn new(
        chp: Chp,
        boiler: AuxBoiler,
        tes: ThermalStorage,
        controller: LoadFollowingController,
    ) -> Self {
        Self {
            chp,
            boiler,
            tes,
            controller,
        }
    }

    /// Dispatches one hour and returns the storage state for the next hour.
    ///
    /// # Arguments
    ///
    /// * `state` - Storage state at the start of the hour
    /// * `hour` - Hour index (recorded in the result)
    /// * `demand` - Demand for the hour
    pub fn step(
        &self,
        state: TesState,
        hour: usize,
        demand: &HourlyDemand,
    ) -> (TesState, DispatchStep) {
        // 1. Size the CHP unit to the electrical load
        let setpoint = self.controller.chp_setpoint(demand);
        let chp_power = self.chp.electric_output(setpoint);
        let chp_electricity = chp_power * Hours::ONE;
        let chp_heat = self.chp.heat_output(chp_power) * Hours::ONE;
        let chp_fuel = self.chp.fuel_input(chp_power) * Hours::ONE;
        let chp_efficiency = if chp_power.0 > 0.0 {
            self.chp.efficiency_at(chp_power)
        } else {
            0.0
        };

        // 2. Route recovered heat through storage and the boiler
        let thermal_load = demand.thermal * Hours::ONE;
        let (next_state, tes_charge, tes_discharge, curtailed_heat, shortfall) =
            match self.controller.route_heat(chp_heat, thermal_load) {
                HeatRouting::Surplus(surplus) => {
                    let (next, accepted) = state.charge(surplus, self.tes.capacity);
                    (next, accepted, Btu::ZERO, surplus - accepted, Btu::ZERO)
                }
                HeatRouting::Deficit(deficit) => {
                    let (next, delivered) = state.discharge(deficit);
                    (next, Btu::ZERO, delivered, Btu::ZERO, deficit - delivered)
                }
            };
        let boiler = self.boiler.dispatch(shortfall, Hours::ONE);

        // 3. Grid covers the rest of the electrical load
        let grid_electricity =
            (demand.electrical * Hours::ONE - chp_electricity).max(KilowattHours::ZERO);

        let step = DispatchStep {
            hour,
            electrical_demand: demand.electrical,
            thermal_demand: demand.thermal,
            chp_electricity,
            chp_heat,
            chp_fuel,
            chp_efficiency,
            tes_charge,
            tes_discharge,
            tes_stored: next_state.stored,
            curtailed_heat,
            boiler_heat: boiler.heat,
            boiler_fuel: boiler.fuel,
            boiler_cycling: boiler.cycling,
            unserved_heat: boiler.unserved,
            grid_electricity,
        };
        (next_state, step)
    }

    /// Dispatches every hour in order, threading storage state through.
    pub fn run(&self, demand: &[HourlyDemand]) -> DispatchResult {
        let steps: Vec<DispatchStep> = demand
            .iter()
            .enumerate()
            .scan(self.tes.initial_state(), |state, (hour, hourly)| {
                let (next, step) = self.step(*state, hour, hourly);
                *state = next;
                Some(step)
            })
            .collect();

        let unserved_hours = steps.iter().filter(|s| s.unserved_heat.0 > 0.0).count();
        if unserved_hours > 0 {
            let unserved: Btu = steps.iter().map(|s| s.unserved_heat).sum();
            warn!(
                unserved_hours,
                %unserved,
                "auxiliary boiler capacity is too small to cover the thermal load",
            );
        }
        debug!(n_hours = steps.len(), "dispatch finished");

        DispatchResult::new(steps)
    }

    /// Returns a reference to the CHP unit.
    pub fn chp(&self) -> &Chp {
        &self.chp
    }

    /// Returns a reference to the auxiliary boiler.
    pub fn boiler(&self) -> &AuxBoiler {
        &self.boiler
    }

    /// Returns a reference to the thermal storage.
    pub fn tes(&self) -> &ThermalStorage {
        &self.tes
    }
}
