//! Plot data and chart viewer application state.

use crate::demand::EnergyDemand;
use crate::sim::types::DispatchResult;

/// One of the six dispatch plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plot {
    ElectricalDemand,
    ThermalDemand,
    ChpElectricity,
    ChpHeat,
    TesStatus,
    BoilerOutput,
}

impl Plot {
    /// Plots in tab order.
    pub const ALL: [Plot; 6] = [
        Plot::ElectricalDemand,
        Plot::ThermalDemand,
        Plot::ChpElectricity,
        Plot::ChpHeat,
        Plot::TesStatus,
        Plot::BoilerOutput,
    ];

    /// Tab and chart title.
    pub fn title(self) -> &'static str {
        match self {
            Plot::ElectricalDemand => "Electrical demand",
            Plot::ThermalDemand => "Thermal demand",
            Plot::ChpElectricity => "CHP electricity",
            Plot::ChpHeat => "CHP heat",
            Plot::TesStatus => "TES status",
            Plot::BoilerOutput => "Boiler output",
        }
    }

    /// Y-axis unit label.
    pub fn unit(self) -> &'static str {
        match self {
            Plot::ElectricalDemand => "kW",
            Plot::ThermalDemand => "Btu/hr",
            Plot::ChpElectricity => "kWh",
            Plot::ChpHeat | Plot::TesStatus | Plot::BoilerOutput => "Btu",
        }
    }
}

/// A named series of `(hour, value)` points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: &'static str,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    fn new(name: &'static str, values: impl Iterator<Item = f64>) -> Self {
        let points = values
            .enumerate()
            .map(|(hour, v)| (hour as f64, v))
            .collect();
        Self { name, points }
    }

    fn single(name: &'static str, values: impl Iterator<Item = f64>) -> Vec<Self> {
        vec![Self::new(name, values)]
    }
}

/// Chart viewer state: the precomputed series for every plot and the
/// selected tab.
pub struct App {
    plots: Vec<(Plot, Vec<Series>)>,
    /// Index into [`Plot::ALL`].
    pub selected: usize,
    /// Number of hours on the x axis.
    pub n_hours: usize,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl App {
    /// Builds every plot series from the demand and the dispatch result.
    pub fn new(demand: &EnergyDemand, result: &DispatchResult) -> Self {
        let plots = Plot::ALL
            .iter()
            .map(|&plot| {
                let series = match plot {
                    Plot::ElectricalDemand => {
                        Series::single("Demand", demand.electrical_series().map(|p| p.0))
                    }
                    Plot::ThermalDemand => {
                        Series::single("Demand", demand.thermal_series().map(|p| p.0))
                    }
                    Plot::ChpElectricity => {
                        Series::single("CHP", result.chp_electricity().map(|e| e.0))
                    }
                    Plot::ChpHeat => Series::single("CHP", result.chp_heat().map(|h| h.0)),
                    Plot::TesStatus => vec![
                        Series::new("Stored", result.tes_stored().map(|h| h.0)),
                        Series::new("Net flow", result.tes_net_flow().map(|h| h.0)),
                    ],
                    Plot::BoilerOutput => {
                        Series::single("Boiler", result.boiler_heat().map(|h| h.0))
                    }
                };
                (plot, series)
            })
            .collect();
        Self {
            plots,
            selected: 0,
            n_hours: demand.len(),
            quit: false,
        }
    }

    /// Currently selected plot.
    pub fn plot(&self) -> Plot {
        Plot::ALL[self.selected]
    }

    /// Series of the currently selected plot.
    pub fn series(&self) -> &[Series] {
        &self.plots[self.selected].1
    }

    /// Moves to the next tab, wrapping around.
    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % Plot::ALL.len();
    }

    /// Moves to the previous tab, wrapping around.
    pub fn previous(&mut self) {
        self.selected = (self.selected + Plot::ALL.len() - 1) % Plot::ALL.len();
    }

    /// Selects a tab by index; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < Plot::ALL.len() {
            self.selected = index;
        }
    }
}
