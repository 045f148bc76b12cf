//! Unit-tagged quantities used throughout the simulation.
//!
//! Each quantity is a transparent `f64` newtype. Only the arithmetic that is
//! dimensionally valid is implemented, so mixing up electrical and thermal
//! energy, or applying a $/kWh rate to Btu, fails to compile.

#[macro_use]
mod macros;

pub mod cost;
pub mod energy;
pub mod power;
pub mod thermal;
pub mod time;

pub use cost::{Dollars, DollarsPerKilowatt, DollarsPerKilowattHour, DollarsPerMegaBtu};
pub use energy::KilowattHours;
pub use power::Kilowatts;
pub use thermal::{Btu, BtuPerHour, MegaBtu};
pub use time::{Hours, Years};

/// Btu in one kilowatt-hour.
pub const BTU_PER_KWH: f64 = 3_412.141_63;

/// Btu in one MMBtu.
pub const BTU_PER_MMBTU: f64 = 1_000_000.0;
