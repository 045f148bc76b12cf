use crate::equipment::types::{Equipment, EquipmentError, EquipmentProperties, ensure_range};
use crate::units::{Btu, BtuPerHour, Hours};

/// Heat delivered and fuel burned by the auxiliary boiler over one interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoilerOutput {
    /// Heat delivered to the load.
    pub heat: Btu,
    /// Fuel energy burned.
    pub fuel: Btu,
    /// Part of the request beyond the boiler's capacity.
    pub unserved: Btu,
    /// Whether the request was below the minimum firing rate, so the boiler
    /// had to cycle on and off to deliver it.
    pub cycling: bool,
}

/// An auxiliary (backup) boiler with a fixed combustion efficiency.
#[derive(Debug, Clone, PartialEq)]
pub struct AuxBoiler {
    /// Maximum heat output rate.
    pub capacity: BtuPerHour,

    /// Fuel-to-heat efficiency (0..1.0).
    pub efficiency: f64,

    /// Minimum firing fraction of capacity (0.0 to 1.0).
    pub turn_down_ratio: f64,
}

impl AuxBoiler {
    /// Creates a new auxiliary boiler.
    ///
    /// # Errors
    ///
    /// Returns [`EquipmentError::OutOfRange`] if capacity is not positive,
    /// efficiency is outside (0, 1] or turn-down is outside [0, 1].
    pub fn new(
        capacity: BtuPerHour,
        efficiency: f64,
        turn_down_ratio: f64,
    ) -> Result<Self, EquipmentError> {
        ensure_range(
            "Aux Boiler",
            "capacity",
            capacity.0,
            capacity.0 > 0.0,
            "> 0",
        )?;
        ensure_range(
            "Aux Boiler",
            "efficiency",
            efficiency,
            efficiency > 0.0 && efficiency <= 1.0,
            "in (0, 1]",
        )?;
        ensure_range(
            "Aux Boiler",
            "turn_down_ratio",
            turn_down_ratio,
            (0.0..=1.0).contains(&turn_down_ratio),
            "in [0, 1]",
        )?;

        Ok(Self {
            capacity,
            efficiency,
            turn_down_ratio,
        })
    }

    /// Lowest continuous firing rate.
    pub fn minimum_output(&self) -> BtuPerHour {
        self.capacity * self.turn_down_ratio
    }

    /// Fuel burned to deliver `heat`.
    pub fn fuel_for(&self, heat: Btu) -> Btu {
        heat / self.efficiency
    }

    /// Covers a heat shortfall over `duration`.
    ///
    /// Delivery is capped at capacity; the remainder is reported as unserved.
    /// Requests below the minimum firing rate are still met exactly, with the
    /// boiler cycling over the interval.
    pub fn dispatch(&self, shortfall: Btu, duration: Hours) -> BoilerOutput {
        if shortfall.0 <= 0.0 {
            return BoilerOutput {
                heat: Btu::ZERO,
                fuel: Btu::ZERO,
                unserved: Btu::ZERO,
                cycling: false,
            };
        }

        let heat = shortfall.min(self.capacity * duration);
        BoilerOutput {
            heat,
            fuel: self.fuel_for(heat),
            unserved: shortfall - heat,
            cycling: heat < self.minimum_output() * duration,
        }
    }
}

impl Equipment for AuxBoiler {
    fn device_type(&self) -> &'static str {
        "Aux Boiler"
    }

    fn properties(&self) -> EquipmentProperties {
        EquipmentProperties {
            full_load_efficiency: Some(self.efficiency),
            turn_down_ratio: Some(self.turn_down_ratio),
            size: self.capacity.to_string(),
            heat_to_power: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn boiler() -> AuxBoiler {
        AuxBoiler::new(BtuPerHour(1_000_000.0), 0.8, 0.25).unwrap()
    }

    #[test]
    fn rejects_zero_efficiency() {
        assert!(AuxBoiler::new(BtuPerHour(1_000.0), 0.0, 0.2).is_err());
    }

    #[test]
    fn rejects_efficiency_above_one() {
        assert!(AuxBoiler::new(BtuPerHour(1_000.0), 1.01, 0.2).is_err());
    }

    #[test]
    fn fuel_is_heat_over_efficiency() {
        let output = boiler().dispatch(Btu(400_000.0), Hours::ONE);
        assert_eq!(output.heat, Btu(400_000.0));
        assert_relative_eq!(output.fuel.0, 500_000.0);
        assert_eq!(output.unserved, Btu::ZERO);
        assert!(!output.cycling);
    }

    #[test]
    fn capped_at_capacity() {
        let output = boiler().dispatch(Btu(1_500_000.0), Hours::ONE);
        assert_eq!(output.heat, Btu(1_000_000.0));
        assert_eq!(output.unserved, Btu(500_000.0));
        assert_relative_eq!(output.fuel.0, 1_250_000.0);
    }

    #[test]
    fn small_load_met_by_cycling() {
        let output = boiler().dispatch(Btu(100_000.0), Hours::ONE);
        assert_eq!(output.heat, Btu(100_000.0));
        assert!(output.cycling);
    }

    #[test]
    fn idle_without_shortfall() {
        let output = boiler().dispatch(Btu::ZERO, Hours::ONE);
        assert_eq!(output.heat, Btu::ZERO);
        assert_eq!(output.fuel, Btu::ZERO);
        assert!(!output.cycling);
    }
}
