//! CHP simulator entry point: CLI wiring and report output.

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chp_sim::cli::Args;
use chp_sim::config::SiteConfig;
use chp_sim::equipment::Equipment;
use chp_sim::io::export::export_csv;
use chp_sim::reporting::{build_economics_table, build_equipment_table, build_inputs_table};
use chp_sim::runner::Analysis;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .without_time()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = SiteConfig::from_toml_file(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    let analysis = Analysis::from_config(&config)
        .with_context(|| format!("failed to analyse {}", args.input.display()))?;
    info!("\n{}", analysis.summary);

    let engine = &analysis.engine;
    println!("{}", build_economics_table(&analysis.economics));
    let equipment: [&dyn Equipment; 3] = [engine.chp(), engine.tes(), engine.boiler()];
    println!("{}", build_equipment_table(&equipment));
    let demand = &analysis.demand;
    println!("{}", build_inputs_table(demand, engine.chp(), engine.tes()));

    if let Some(path) = config.dispatch_csv_path() {
        export_csv(analysis.result.steps(), &path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "exported hourly dispatch");
    }

    if config.show_plots {
        show_plots(&analysis)?;
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn show_plots(analysis: &Analysis) -> anyhow::Result<()> {
    chp_sim::tui::run(&analysis.demand, &analysis.result).context("chart viewer failed")
}

#[cfg(not(feature = "tui"))]
fn show_plots(_analysis: &Analysis) -> anyhow::Result<()> {
    tracing::warn!("plots are unavailable: built without the `tui` feature");
    Ok(())
}
