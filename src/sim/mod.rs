/// Thermal energy balance checks.
pub mod balance;
pub mod controller;
pub mod engine;
/// Post-hoc run totals.
pub mod summary;
pub mod types;
