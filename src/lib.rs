//! Equal load following dispatch and economics of a combined heat and power
//! unit with thermal storage and an auxiliary boiler.

pub mod cli;
pub mod config;
pub mod demand;
pub mod economics;
/// CHP, auxiliary boiler and thermal storage models.
pub mod equipment;
pub mod io;
pub mod reporting;
pub mod runner;
/// Dispatch engine, controller, energy balance and run summary.
pub mod sim;
#[cfg(feature = "tui")]
pub mod tui;
/// Unit-of-measure quantities.
pub mod units;
