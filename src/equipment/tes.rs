use crate::equipment::types::{Equipment, EquipmentError, EquipmentProperties, ensure_range};
use crate::units::{Btu, Dollars, DollarsPerKilowattHour, KilowattHours};

/// Thermal energy storage tank.
///
/// Holds only static parameters. The stored energy during a dispatch run is
/// a separate [`TesState`] value threaded through the hourly fold.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalStorage {
    /// Usable storage capacity.
    pub capacity: Btu,

    /// Installed cost per kWh of storage capacity.
    pub installed_cost: DollarsPerKilowattHour,

    /// Stored energy at the start of a dispatch run.
    pub initial_charge: Btu,
}

impl ThermalStorage {
    /// Creates a new storage tank.
    ///
    /// A capacity of zero is valid and means no storage is installed.
    ///
    /// # Errors
    ///
    /// Returns [`EquipmentError::OutOfRange`] if capacity or cost is negative,
    /// or the initial charge lies outside `[0, capacity]`.
    pub fn new(
        capacity: Btu,
        installed_cost: DollarsPerKilowattHour,
        initial_charge: Btu,
    ) -> Result<Self, EquipmentError> {
        ensure_range("TES", "capacity", capacity.0, capacity.0 >= 0.0, ">= 0")?;
        ensure_range(
            "TES",
            "installed_cost",
            installed_cost.0,
            installed_cost.0 >= 0.0,
            ">= 0",
        )?;
        ensure_range(
            "TES",
            "initial_charge",
            initial_charge.0,
            initial_charge.0 >= 0.0 && initial_charge <= capacity,
            "in [0, capacity]",
        )?;

        Ok(Self {
            capacity,
            installed_cost,
            initial_charge,
        })
    }

    /// Storage state at the start of a dispatch run.
    pub fn initial_state(&self) -> TesState {
        TesState {
            stored: self.initial_charge,
        }
    }

    /// Total installed cost of the tank.
    pub fn total_installed_cost(&self) -> Dollars {
        KilowattHours::from(self.capacity) * self.installed_cost
    }
}

impl Equipment for ThermalStorage {
    fn device_type(&self) -> &'static str {
        "TES"
    }

    fn properties(&self) -> EquipmentProperties {
        EquipmentProperties {
            full_load_efficiency: None,
            turn_down_ratio: None,
            size: self.capacity.to_string(),
            heat_to_power: None,
        }
    }
}

/// Energy held in storage between two hours of dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TesState {
    /// Stored energy, always within `[0, capacity]`.
    pub stored: Btu,
}

impl TesState {
    /// Stores as much of `surplus` as fits below `capacity`.
    ///
    /// Returns the new state and the energy actually accepted.
    #[must_use]
    pub fn charge(self, surplus: Btu, capacity: Btu) -> (Self, Btu) {
        let headroom = (capacity - self.stored).max(Btu::ZERO);
        let accepted = surplus.max(Btu::ZERO).min(headroom);
        (
            Self {
                stored: (self.stored + accepted).min(capacity.max(Btu::ZERO)),
            },
            accepted,
        )
    }

    /// Releases up to `deficit` from storage.
    ///
    /// Returns the new state and the energy actually delivered.
    #[must_use]
    pub fn discharge(self, deficit: Btu) -> (Self, Btu) {
        let delivered = deficit.max(Btu::ZERO).min(self.stored);
        (
            Self {
                stored: self.stored - delivered,
            },
            delivered,
        )
    }
}
