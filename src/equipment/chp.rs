use interp::{InterpMode, interp};

use crate::equipment::types::{Equipment, EquipmentError, EquipmentProperties, ensure_range};
use crate::units::{BtuPerHour, Dollars, DollarsPerKilowatt, Kilowatts};

/// Electrical efficiency as a function of output fraction of rated capacity.
///
/// Points are `(load_percent, efficiency)` pairs, typically at 10 % steps
/// from 30 % to 100 %. Efficiency between points is linearly interpolated;
/// outside the tabulated range the nearest end point applies.
#[derive(Debug, Clone, PartialEq)]
pub struct PartLoadCurve {
    load_percent: Vec<f64>,
    efficiency: Vec<f64>,
}

impl PartLoadCurve {
    /// Builds a curve from `(load_percent, efficiency)` points.
    ///
    /// # Errors
    ///
    /// Returns [`EquipmentError::PartLoadCurve`] if fewer than two points are
    /// given, load percentages are not strictly increasing, the last point is
    /// not 100 %, or an efficiency lies outside (0, 1].
    pub fn new(points: Vec<(f64, f64)>) -> Result<Self, EquipmentError> {
        if points.len() < 2 {
            return Err(EquipmentError::PartLoadCurve(format!(
                "needs at least two points, got {}",
                points.len()
            )));
        }
        for pair in points.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(EquipmentError::PartLoadCurve(format!(
                    "load percentages must be strictly increasing ({} then {})",
                    pair[0].0, pair[1].0
                )));
            }
        }
        if let Some(&(last, _)) = points.last()
            && (last - 100.0).abs() > f64::EPSILON
        {
            return Err(EquipmentError::PartLoadCurve(format!(
                "last point must be at 100 % load, got {last} %"
            )));
        }
        for &(load, efficiency) in &points {
            if !load.is_finite() || !(efficiency > 0.0 && efficiency <= 1.0) {
                return Err(EquipmentError::PartLoadCurve(format!(
                    "efficiency at {load} % must be in (0, 1], got {efficiency}"
                )));
            }
        }

        let (load_percent, efficiency) = points.into_iter().unzip();
        Ok(Self {
            load_percent,
            efficiency,
        })
    }

    /// Electrical efficiency at the given output fraction (0.0 to 1.0).
    pub fn efficiency_at(&self, load_fraction: f64) -> f64 {
        interp(
            &self.load_percent,
            &self.efficiency,
            load_fraction * 100.0,
            &InterpMode::FirstLast,
        )
    }

    /// Efficiency at rated output.
    pub fn full_load_efficiency(&self) -> f64 {
        self.efficiency[self.efficiency.len() - 1]
    }
}

/// A combined heat and power unit.
///
/// Electrical output follows the request between the turn-down floor and
/// rated capacity. Heat is recovered at a fixed heat-to-power ratio and fuel
/// input follows the part-load efficiency curve.
///
/// # Examples
///
/// ```
/// use chp_sim::equipment::{Chp, PartLoadCurve};
/// use chp_sim::units::{DollarsPerKilowatt, Kilowatts};
///
/// let curve = PartLoadCurve::new(vec![(30.0, 0.20), (100.0, 0.30)]).unwrap();
/// let chp = Chp::new(Kilowatts(100.0), 1.0, 0.3, curve, DollarsPerKilowatt(2_000.0)).unwrap();
///
/// // Below the 30 kW floor the unit stays off
/// assert_eq!(chp.electric_output(Kilowatts(20.0)), Kilowatts(0.0));
/// // Above capacity it is clipped to rated output
/// assert_eq!(chp.electric_output(Kilowatts(150.0)), Kilowatts(100.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Chp {
    /// Rated electrical capacity.
    pub capacity: Kilowatts,

    /// Recovered heat per unit of electricity generated.
    pub heat_to_power: f64,

    /// Minimum operating fraction of capacity (0.0 to 1.0).
    pub turn_down_ratio: f64,

    /// Electrical efficiency versus load.
    pub part_load: PartLoadCurve,

    /// Installed cost per kW of rated capacity.
    pub installed_cost: DollarsPerKilowatt,
}

impl Chp {
    /// Creates a new CHP unit.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Rated electrical capacity (must be > 0)
    /// * `heat_to_power` - Heat-to-power ratio (must be > 0)
    /// * `turn_down_ratio` - Minimum load fraction (0.0 to 1.0)
    /// * `part_load` - Part-load efficiency curve
    /// * `installed_cost` - Installed cost per kW (must be >= 0)
    ///
    /// # Errors
    ///
    /// Returns [`EquipmentError::OutOfRange`] for the first invalid parameter.
    pub fn new(
        capacity: Kilowatts,
        heat_to_power: f64,
        turn_down_ratio: f64,
        part_load: PartLoadCurve,
        installed_cost: DollarsPerKilowatt,
    ) -> Result<Self, EquipmentError> {
        ensure_range("CHP", "capacity", capacity.0, capacity.0 > 0.0, "> 0")?;
        ensure_range(
            "CHP",
            "heat_to_power",
            heat_to_power,
            heat_to_power > 0.0,
            "> 0",
        )?;
        ensure_range(
            "CHP",
            "turn_down_ratio",
            turn_down_ratio,
            (0.0..=1.0).contains(&turn_down_ratio),
            "in [0, 1]",
        )?;
        ensure_range(
            "CHP",
            "installed_cost",
            installed_cost.0,
            installed_cost.0 >= 0.0,
            ">= 0",
        )?;

        Ok(Self {
            capacity,
            heat_to_power,
            turn_down_ratio,
            part_load,
            installed_cost,
        })
    }

    /// Lowest electrical output the unit can run at.
    pub fn minimum_output(&self) -> Kilowatts {
        self.capacity * self.turn_down_ratio
    }

    /// Electrical output delivered for a requested output.
    ///
    /// Requests below the turn-down floor switch the unit off entirely;
    /// requests above capacity are clipped to capacity.
    pub fn electric_output(&self, requested: Kilowatts) -> Kilowatts {
        if requested.0 <= 0.0 || requested < self.minimum_output() {
            Kilowatts::ZERO
        } else {
            requested.min(self.capacity)
        }
    }

    /// Output as a fraction of rated capacity.
    pub fn load_fraction(&self, electric: Kilowatts) -> f64 {
        electric / self.capacity
    }

    /// Electrical efficiency when generating `electric`.
    pub fn efficiency_at(&self, electric: Kilowatts) -> f64 {
        self.part_load.efficiency_at(self.load_fraction(electric))
    }

    /// Recovered heat rate when generating `electric`.
    pub fn heat_output(&self, electric: Kilowatts) -> BtuPerHour {
        BtuPerHour::from(electric * self.heat_to_power)
    }

    /// Fuel input rate when generating `electric`.
    pub fn fuel_input(&self, electric: Kilowatts) -> BtuPerHour {
        if electric.0 <= 0.0 {
            return BtuPerHour::ZERO;
        }
        BtuPerHour::from(electric / self.efficiency_at(electric))
    }

    /// Electrical efficiency at rated output.
    pub fn full_load_efficiency(&self) -> f64 {
        self.part_load.full_load_efficiency()
    }

    /// Total installed cost of the unit.
    pub fn total_installed_cost(&self) -> Dollars {
        self.capacity * self.installed_cost
    }
}

impl Equipment for Chp {
    fn device_type(&self) -> &'static str {
        "CHP"
    }

    fn properties(&self) -> EquipmentProperties {
        EquipmentProperties {
            full_load_efficiency: Some(self.full_load_efficiency()),
            turn_down_ratio: Some(self.turn_down_ratio),
            size: self.capacity.to_string(),
            heat_to_power: Some(self.heat_to_power),
        }
    }
}
