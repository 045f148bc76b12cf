//! Equipment profiles for the CHP plant: the CHP unit itself, the auxiliary
//! boiler, and thermal energy storage.

/// Auxiliary boiler model.
pub mod boiler;
/// Combined heat and power unit with part-load efficiency curve.
pub mod chp;
/// Thermal energy storage capacity and state.
pub mod tes;
pub mod types;

// Re-export the main types for convenience
pub use boiler::{AuxBoiler, BoilerOutput};
pub use chp::{Chp, PartLoadCurve};
pub use tes::{TesState, ThermalStorage};
pub use types::{Equipment, EquipmentError, EquipmentProperties};
