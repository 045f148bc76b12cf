//! Annual energy, cost and payback comparison of the CHP plant against a
//! boiler-only baseline.

use std::fmt;

use tracing::warn;

use crate::demand::EnergyDemand;
use crate::equipment::{AuxBoiler, Chp, ThermalStorage};
use crate::sim::summary::DispatchSummary;
use crate::units::{Btu, Dollars, KilowattHours, MegaBtu, Years};

/// Simple payback of the installed equipment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payback {
    /// Installed cost is recovered after this long.
    Years(Years),
    /// Annual savings are zero or negative, so the cost is never recovered.
    Never,
}

impl Payback {
    /// Installed cost divided by annual savings, or [`Payback::Never`] when
    /// the savings are not positive.
    pub fn simple(installed_cost: Dollars, annual_savings: Dollars) -> Self {
        if annual_savings.0 > 0.0 && annual_savings.is_finite() {
            Self::Years(Years(installed_cost / annual_savings))
        } else {
            Self::Never
        }
    }
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Years(years) => fmt::Display::fmt(years, f),
            Self::Never => f.write_str("never"),
        }
    }
}

/// Whether running the CHP unit lowers or raises the electricity bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavingsDirection {
    Lower,
    Unchanged,
    Higher,
}

impl SavingsDirection {
    fn of(savings: Dollars) -> Self {
        if savings.0 > 0.0 {
            Self::Lower
        } else if savings.0 < 0.0 {
            Self::Higher
        } else {
            Self::Unchanged
        }
    }
}

impl fmt::Display for SavingsDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lower => "lower",
            Self::Unchanged => "unchanged",
            Self::Higher => "higher",
        })
    }
}

/// Annual economics of the load-following plant.
///
/// "Control" is the existing boiler-only site buying all electricity from
/// the grid; "ELF" is the proposed CHP + TES + auxiliary boiler plant.
#[derive(Debug, Clone, PartialEq)]
pub struct EconomicsReport {
    /// Total electrical demand.
    pub annual_electrical_demand: KilowattHours,
    /// Total thermal demand.
    pub annual_thermal_demand: Btu,

    /// Fuel burned by the boiler-only baseline.
    pub fuel_control: Btu,
    /// Fuel burned by the CHP unit.
    pub fuel_chp: Btu,
    /// Fuel burned by the auxiliary boiler.
    pub fuel_aux_boiler: Btu,
    /// Fuel saved: control minus ELF.
    pub thermal_energy_savings: Btu,
    /// Heat the plant could not deliver. The ELF fuel does not cover it, so
    /// any non-zero value makes the fuel savings optimistic.
    pub unserved_heat: Btu,

    /// Fuel cost of the baseline.
    pub thermal_cost_control: Dollars,
    /// Fuel cost of the CHP unit.
    pub thermal_cost_chp: Dollars,
    /// Fuel cost of the auxiliary boiler.
    pub thermal_cost_aux_boiler: Dollars,
    /// Fuel cost saved; negative when the plant burns more fuel.
    pub thermal_cost_savings: Dollars,

    /// Electricity generated on site.
    pub electrical_energy_savings: KilowattHours,
    /// Electricity bill of the baseline.
    pub electric_cost_control: Dollars,
    /// Electricity bill with the plant running.
    pub electric_cost_elf: Dollars,
    /// Electricity bill saved, sign preserved.
    pub electric_cost_savings: Dollars,
    /// Direction of the electricity bill change.
    pub electric_cost_direction: SavingsDirection,

    /// Electrical plus thermal cost savings.
    pub total_cost_savings: Dollars,
    /// Installed cost of the CHP unit.
    pub chp_installed_cost: Dollars,
    /// Installed cost of the storage tank.
    pub tes_installed_cost: Dollars,
    /// CHP plus storage installed cost.
    pub implementation_cost: Dollars,
    /// Simple payback period.
    pub simple_payback: Payback,
}

impl EconomicsReport {
    /// Compares the dispatched plant against the boiler-only baseline.
    ///
    /// # Arguments
    ///
    /// * `demand` - Site demand and utility rates
    /// * `chp` - CHP unit (installed cost)
    /// * `boiler` - Auxiliary boiler (baseline efficiency)
    /// * `tes` - Storage tank (installed cost)
    /// * `dispatch` - Totals of the dispatch run
    pub fn calculate(
        demand: &EnergyDemand,
        chp: &Chp,
        boiler: &AuxBoiler,
        tes: &ThermalStorage,
        dispatch: &DispatchSummary,
    ) -> Self {
        let annual_electrical_demand = demand.annual_electricity();
        let annual_thermal_demand = demand.annual_heat();

        // Energy
        let fuel_control = boiler.fuel_for(annual_thermal_demand);
        let fuel_chp = dispatch.chp_fuel;
        let fuel_aux_boiler = dispatch.boiler_fuel;
        let thermal_energy_savings = fuel_control - (fuel_chp + fuel_aux_boiler);

        // Fuel costs
        let fuel_cost = |fuel: Btu| MegaBtu::from(fuel) * demand.fuel_cost;
        let thermal_cost_control = fuel_cost(fuel_control);
        let thermal_cost_chp = fuel_cost(fuel_chp);
        let thermal_cost_aux_boiler = fuel_cost(fuel_aux_boiler);
        let thermal_cost_savings =
            thermal_cost_control - (thermal_cost_chp + thermal_cost_aux_boiler);

        // Electricity costs
        let electric_cost_control = annual_electrical_demand * demand.electric_cost;
        let electric_cost_elf = dispatch.grid_electricity * demand.electric_cost;
        let electric_cost_savings = electric_cost_control - electric_cost_elf;
        let electric_cost_direction = SavingsDirection::of(electric_cost_savings);

        // Investment
        let total_cost_savings = electric_cost_savings + thermal_cost_savings;
        let chp_installed_cost = chp.total_installed_cost();
        let tes_installed_cost = tes.total_installed_cost();
        let implementation_cost = chp_installed_cost + tes_installed_cost;
        let simple_payback = Payback::simple(implementation_cost, total_cost_savings);

        if electric_cost_direction == SavingsDirection::Higher {
            warn!(%electric_cost_savings, "the plant raises the electricity bill");
        }
        if simple_payback == Payback::Never {
            warn!(
                %total_cost_savings,
                "no positive annual savings, the investment never pays back"
            );
        }

        Self {
            annual_electrical_demand,
            annual_thermal_demand,
            fuel_control,
            fuel_chp,
            fuel_aux_boiler,
            thermal_energy_savings,
            unserved_heat: dispatch.unserved_heat,
            thermal_cost_control,
            thermal_cost_chp,
            thermal_cost_aux_boiler,
            thermal_cost_savings,
            electrical_energy_savings: dispatch.chp_electricity,
            electric_cost_control,
            electric_cost_elf,
            electric_cost_savings,
            electric_cost_direction,
            total_cost_savings,
            chp_installed_cost,
            tes_installed_cost,
            implementation_cost,
            simple_payback,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::demand::HourlyDemand;
    use crate::equipment::PartLoadCurve;
    use crate::sim::{controller::LoadFollowingController, engine::Engine};
    use crate::units::{
        BtuPerHour, DollarsPerKilowatt, DollarsPerKilowattHour, DollarsPerMegaBtu, Kilowatts,
    };

    fn plant(chp_cost: f64) -> (Chp, AuxBoiler, ThermalStorage) {
        let curve = PartLoadCurve::new(vec![(30.0, 0.25), (100.0, 0.25)]).unwrap();
        let capacity = Kilowatts(100.0);
        (
            Chp::new(capacity, 1.0, 0.3, curve, DollarsPerKilowatt(chp_cost)).unwrap(),
            AuxBoiler::new(BtuPerHour(1_000_000.0), 0.8, 0.0).unwrap(),
            ThermalStorage::new(Btu::ZERO, DollarsPerKilowattHour(0.0), Btu::ZERO).unwrap(),
        )
    }

    fn report(fuel_cost: f64, electric_cost: f64, chp_cost: f64) -> EconomicsReport {
        let (chp, boiler, tes) = plant(chp_cost);
        let hour = HourlyDemand::new(Kilowatts(50.0), BtuPerHour(400_000.0));
        let demand = EnergyDemand::new(
            vec![hour; 10],
            DollarsPerKilowattHour(electric_cost),
            DollarsPerMegaBtu(fuel_cost),
        )
        .unwrap();
        let engine = Engine::new(chp, boiler, tes, LoadFollowingController);
        let result = engine.run(demand.hours());
        let summary = DispatchSummary::from_result(&result, engine.tes().capacity);
        let (chp, boiler, tes) = (engine.chp(), engine.boiler(), engine.tes());
        EconomicsReport::calculate(&demand, chp, boiler, tes, &summary)
    }

    #[test]
    fn control_fuel_is_demand_over_efficiency() {
        let report = report(10.0, 0.15, 1_000.0);
        assert_relative_eq!(report.fuel_control.0, 4_000_000.0 / 0.8, epsilon = 1e-6);
        assert_relative_eq!(report.thermal_cost_control.0, 5.0 * 10.0, epsilon = 1e-9);
    }

    #[test]
    fn electricity_savings_are_generated_energy() {
        let report = report(10.0, 0.15, 1_000.0);
        assert_eq!(report.electrical_energy_savings, KilowattHours(500.0));
        assert_relative_eq!(report.electric_cost_savings.0, 75.0, epsilon = 1e-9);
        assert_eq!(report.electric_cost_direction, SavingsDirection::Lower);
    }

    #[test]
    fn fuel_balance_between_control_and_elf() {
        let report = report(10.0, 0.15, 1_000.0);
        // CHP: 50 kWh / 0.25 per hour; boiler: (400 kBtu - 50 kWh of heat) / 0.8
        let chp_fuel = 10.0 * 200.0 * 3_412.141_63;
        let boiler_fuel = 10.0 * (400_000.0 - 50.0 * 3_412.141_63) / 0.8;
        assert_relative_eq!(report.fuel_chp.0, chp_fuel, epsilon = 1e-6);
        assert_relative_eq!(report.fuel_aux_boiler.0, boiler_fuel, epsilon = 1e-6);
        assert_relative_eq!(
            report.thermal_energy_savings.0,
            5_000_000.0 - chp_fuel - boiler_fuel,
            epsilon = 1e-6
        );
    }

    #[test]
    fn payback_is_cost_over_savings() {
        let report = report(2.0, 0.30, 1_000.0);
        let Payback::Years(years) = report.simple_payback else {
            panic!("expected a finite payback, got {}", report.simple_payback);
        };
        assert_relative_eq!(
            years.0,
            report.implementation_cost.0 / report.total_cost_savings.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn expensive_fuel_never_pays_back() {
        // At $100/MMBtu the CHP fuel costs far more than the grid electricity it displaces
        let report = report(100.0, 0.05, 1_000.0);
        assert!(report.total_cost_savings.0 < 0.0);
        assert_eq!(report.simple_payback, Payback::Never);
    }

    #[test]
    fn installed_costs_and_unserved_heat_are_reported() {
        let report = report(10.0, 0.15, 1_000.0);
        assert_eq!(report.chp_installed_cost, Dollars(100_000.0));
        assert_eq!(report.tes_installed_cost, Dollars::ZERO);
        assert_eq!(report.annual_thermal_demand, Btu(4_000_000.0));
        assert_eq!(report.unserved_heat, Btu::ZERO);
    }

    #[test]
    fn payback_never_on_zero_savings() {
        let cost = Dollars(1_000.0);
        assert_eq!(Payback::simple(cost, Dollars::ZERO), Payback::Never);
        assert_eq!(Payback::simple(cost, Dollars(-5.0)), Payback::Never);
        let payback = Payback::simple(cost, Dollars(250.0));
        assert_eq!(payback, Payback::Years(Years(4.0)));
    }

    #[test]
    fn payback_display() {
        assert_eq!(Payback::Never.to_string(), "never");
        assert_eq!(Payback::Years(Years(4.26)).to_string(), "4.3 yr");
    }
}
