//! Hourly thermal energy balance.

use crate::units::{Btu, Hours};

use super::types::DispatchStep;

/// Heat delivered to the load in one hour.
///
/// Sums every source and subtracts every sink with **no sign flipping**:
/// all arguments are non-negative magnitudes.
///
/// # Arguments
///
/// * `chp_heat` - Heat recovered from the CHP unit
/// * `tes_discharge` - Heat drawn from storage
/// * `boiler_heat` - Heat from the auxiliary boiler
/// * `tes_charge` - Heat put into storage
/// * `curtailed` - CHP heat that was dumped
pub fn heat_delivered(
    chp_heat: Btu,
    tes_discharge: Btu,
    boiler_heat: Btu,
    tes_charge: Btu,
    curtailed: Btu,
) -> Btu {
    chp_heat + tes_discharge + boiler_heat - tes_charge - curtailed
}

/// Residual of the thermal balance for one dispatched hour.
///
/// `delivered + unserved - demand`, which is zero (up to rounding) for every
/// hour the engine produces.
pub fn thermal_residual(step: &DispatchStep) -> Btu {
    heat_delivered(
        step.chp_heat,
        step.tes_discharge,
        step.boiler_heat,
        step.tes_charge,
        step.curtailed_heat,
    ) + step.unserved_heat
        - step.thermal_demand * Hours::ONE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_only() {
        let heat = heat_delivered(Btu(100.0), Btu(50.0), Btu(25.0), Btu::ZERO, Btu::ZERO);
        assert_eq!(heat, Btu(175.0));
    }

    #[test]
    fn charging_reduces_delivery() {
        let heat = heat_delivered(Btu(300.0), Btu::ZERO, Btu::ZERO, Btu(120.0), Btu::ZERO);
        assert_eq!(heat, Btu(180.0));
    }

    #[test]
    fn curtailment_reduces_delivery() {
        let heat = heat_delivered(Btu(300.0), Btu::ZERO, Btu::ZERO, Btu(100.0), Btu(50.0));
        assert_eq!(heat, Btu(150.0));
    }
}
