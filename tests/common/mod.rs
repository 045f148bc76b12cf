//! Shared test fixtures for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use chp_sim::demand::HourlyDemand;
use chp_sim::equipment::{AuxBoiler, Chp, PartLoadCurve, ThermalStorage};
use chp_sim::sim::controller::LoadFollowingController;
use chp_sim::sim::engine::Engine;
use chp_sim::units::{Btu, BtuPerHour, DollarsPerKilowatt, DollarsPerKilowattHour, Kilowatts};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Part-load table used by every fixture (load percent, efficiency).
pub const PART_LOAD: [(f64, f64); 8] = [
    (30.0, 0.22),
    (40.0, 0.24),
    (50.0, 0.26),
    (60.0, 0.27),
    (70.0, 0.28),
    (80.0, 0.29),
    (90.0, 0.30),
    (100.0, 0.31),
];

/// Default CHP unit (100 kW, heat-to-power 1.0, turn-down 0.3).
pub fn default_chp() -> Chp {
    let curve = PartLoadCurve::new(PART_LOAD.to_vec()).unwrap();
    let capacity = Kilowatts(100.0);
    Chp::new(capacity, 1.0, 0.3, curve, DollarsPerKilowatt(2_500.0)).unwrap()
}

/// Default auxiliary boiler (1 MMBtu/h, 80 % efficient, turn-down 0.1).
pub fn default_boiler() -> AuxBoiler {
    AuxBoiler::new(BtuPerHour(1_000_000.0), 0.8, 0.1).unwrap()
}

/// Thermal storage with the given capacity, starting empty.
pub fn storage(capacity: f64) -> ThermalStorage {
    ThermalStorage::new(Btu(capacity), DollarsPerKilowattHour(50.0), Btu::ZERO).unwrap()
}

/// Default plant with the given storage capacity.
pub fn engine(tes_capacity: f64) -> Engine {
    Engine::new(
        default_chp(),
        default_boiler(),
        storage(tes_capacity),
        LoadFollowingController,
    )
}

/// Random hourly demand: 0-150 kW electrical, 0-900 kBtu/h thermal.
///
/// Deterministic for a given seed.
pub fn random_demand(seed: u64, n_hours: usize) -> Vec<HourlyDemand> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n_hours)
        .map(|_| {
            HourlyDemand::new(
                Kilowatts(rng.random_range(0.0..150.0)),
                BtuPerHour(rng.random_range(0.0..900_000.0)),
            )
        })
        .collect()
}

/// Site configuration matching [`default_chp`], [`default_boiler`] and a
/// 500 kBtu tank, reading `demand.csv` next to it.
#[allow(dead_code)]
pub const SITE_TOML: &str = r#"
chp_cap = 100.0
chp_heat_power = 1.0
chp_turn_down = 0.3
chp_installed_cost = 2500.0
ab_capacity = 1000000.0
ab_eff = 0.8
ab_turn_down = 0.1
tes_cap = 500000.0
tes_installed_cost = 50.0
demand_filename = "demand.csv"
electric_utility_cost = 0.12
fuel_cost = 8.0
show_plots = false

[part_load]
30 = 0.22
40 = 0.24
50 = 0.26
60 = 0.27
70 = 0.28
80 = 0.29
90 = 0.30
100 = 0.31
"#;

/// Writes `demand.csv` into `dir`.
#[allow(dead_code)]
pub fn write_demand_csv(dir: &Path, demand: &[HourlyDemand]) {
    let mut content = String::from("electrical_kw,thermal_btu_per_hr\n");
    for hour in demand {
        content.push_str(&format!("{},{}\n", hour.electrical.0, hour.thermal.0));
    }
    fs::write(dir.join("demand.csv"), content).unwrap();
}

/// Writes a site configuration (with `extra` prepended) and its demand CSV
/// into `dir`; returns the configuration path.
#[allow(dead_code)]
pub fn write_site(dir: &Path, extra: &str, demand: &[HourlyDemand]) -> PathBuf {
    let path = dir.join("site.toml");
    fs::write(&path, format!("{extra}\n{SITE_TOML}")).unwrap();
    write_demand_csv(dir, demand);
    path
}
