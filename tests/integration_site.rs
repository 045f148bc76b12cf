//! End-to-end tests: site configuration and demand CSV through to the
//! economics report and dispatch export.

mod common;

use std::fs;

use approx::assert_relative_eq;
use chp_sim::config::SiteConfig;
use chp_sim::demand::HourlyDemand;
use chp_sim::economics::Payback;
use chp_sim::io::export::export_csv;
use chp_sim::runner::{Analysis, AnalysisError};
use chp_sim::units::{BtuPerHour, Kilowatts};

#[test]
fn config_and_csv_produce_report() {
    let dir = tempfile::tempdir().unwrap();
    let demand = common::random_demand(42, 168);
    let path = common::write_site(dir.path(), "", &demand);

    let config = SiteConfig::from_toml_file(&path).unwrap();
    let analysis = Analysis::from_config(&config).unwrap();

    assert_eq!(analysis.result.len(), 168);
    assert_eq!(analysis.summary.n_hours, 168);
    let report = &analysis.economics;
    assert!(report.fuel_control.0 > 0.0);
    assert_relative_eq!(
        report.thermal_energy_savings.0,
        report.fuel_control.0 - report.fuel_chp.0 - report.fuel_aux_boiler.0,
        epsilon = 1e-6
    );
    assert_relative_eq!(
        report.total_cost_savings.0,
        report.electric_cost_savings.0 + report.thermal_cost_savings.0,
        epsilon = 1e-9
    );
    // 100 kW at $2500/kW plus 500 kBtu (~146.5 kWh) at $50/kWh
    assert_relative_eq!(
        report.implementation_cost.0,
        250_000.0 + 500_000.0 / 3_412.141_63 * 50.0,
        epsilon = 1e-6
    );
}

#[test]
fn config_builds_the_fixture_plant() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_site(dir.path(), "", &common::random_demand(4, 24));
    let config = SiteConfig::from_toml_file(&path).unwrap();
    let analysis = Analysis::from_config(&config).unwrap();

    let expected = common::engine(500_000.0);
    assert_eq!(analysis.engine.chp(), expected.chp());
    assert_eq!(analysis.engine.boiler(), expected.boiler());
    assert_eq!(analysis.engine.tes(), expected.tes());
}

#[test]
fn same_input_same_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_site(dir.path(), "", &common::random_demand(8, 48));
    let config = SiteConfig::from_toml_file(&path).unwrap();
    let first = Analysis::from_config(&config).unwrap();
    let second = Analysis::from_config(&config).unwrap();
    assert_eq!(first.result, second.result);
    assert_eq!(first.economics, second.economics);
}

#[test]
fn steady_load_pays_back() {
    let dir = tempfile::tempdir().unwrap();
    // Full-load CHP whose heat is entirely used on site
    let hour = HourlyDemand::new(Kilowatts(100.0), BtuPerHour(600_000.0));
    let demand = vec![hour; 8760];
    let path = common::write_site(dir.path(), "", &demand);
    let config = SiteConfig::from_toml_file(&path).unwrap();
    let analysis = Analysis::from_config(&config).unwrap();
    let payback = analysis.economics.simple_payback;
    assert!(matches!(payback, Payback::Years(y) if y.0 > 0.0));
}

#[test]
fn dispatch_csv_export_has_row_per_hour() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_site(
        dir.path(),
        "dispatch_csv = \"dispatch.csv\"",
        &common::random_demand(2, 24),
    );
    let config = SiteConfig::from_toml_file(&path).unwrap();
    let analysis = Analysis::from_config(&config).unwrap();

    let out = config.dispatch_csv_path().unwrap();
    assert_eq!(out, dir.path().join("dispatch.csv"));
    export_csv(analysis.result.steps(), &out).unwrap();
    let content = fs::read_to_string(out).unwrap();
    assert_eq!(content.lines().count(), 25);
}

#[test]
fn missing_demand_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("site.toml");
    fs::write(&path, common::SITE_TOML).unwrap();
    let config = SiteConfig::from_toml_file(&path).unwrap();
    let result = Analysis::from_config(&config);
    assert!(matches!(result, Err(AnalysisError::Demand(_))));
}

#[test]
fn negative_demand_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_site(
        dir.path(),
        "",
        &[HourlyDemand::new(Kilowatts(-1.0), BtuPerHour(0.0))],
    );
    let config = SiteConfig::from_toml_file(&path).unwrap();
    let result = Analysis::from_config(&config);
    assert!(matches!(result, Err(AnalysisError::Demand(_))));
}

#[test]
fn invalid_config_is_rejected_before_loading_demand() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("site.toml");
    let site = common::SITE_TOML.replace("ab_eff = 0.8", "ab_eff = 1.8");
    fs::write(&path, site).unwrap();
    let config = SiteConfig::from_toml_file(&path).unwrap();
    let Err(AnalysisError::Invalid(errors)) = Analysis::from_config(&config) else {
        panic!("expected validation errors");
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "ab_eff");
}
