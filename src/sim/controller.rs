use crate::demand::HourlyDemand;
use crate::units::{Btu, Kilowatts};

/// How CHP heat compares with the thermal load in one hour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeatRouting {
    /// CHP heat exceeds the load by this much; offered to storage.
    Surplus(Btu),
    /// The load exceeds CHP heat by this much (possibly zero); drawn from
    /// storage first, then the boiler.
    Deficit(Btu),
}

/// Equal (electrical) load following controller.
///
/// Sizes the CHP unit to the electrical demand and lets heat fall where it
/// may: surplus goes to storage, shortfalls to storage and then the boiler.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoadFollowingController;

impl LoadFollowingController {
    /// Requested CHP electrical output for the hour, before equipment limits.
    pub fn chp_setpoint(&self, demand: &HourlyDemand) -> Kilowatts {
        demand.electrical
    }

    /// Compares recovered heat with the thermal load.
    pub fn route_heat(&self, chp_heat: Btu, thermal_load: Btu) -> HeatRouting {
        if chp_heat > thermal_load {
            HeatRouting::Surplus(chp_heat - thermal_load)
        } else {
            HeatRouting::Deficit(thermal_load - chp_heat)
        }
    }
}
