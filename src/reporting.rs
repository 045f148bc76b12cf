//! Terminal tables for the economics and equipment summaries.

use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::demand::EnergyDemand;
use crate::economics::{EconomicsReport, Payback, SavingsDirection};
use crate::equipment::{Chp, Equipment, EquipmentProperties, ThermalStorage};
use crate::units::{Btu, Dollars, MegaBtu};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

fn savings_color(savings: Dollars) -> Color {
    if savings > Dollars::ZERO {
        Color::Green
    } else {
        Color::Red
    }
}

fn right(value: impl ToString) -> Cell {
    Cell::new(value).set_alignment(CellAlignment::Right)
}

fn ratio_or_dash(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

fn percent_or_dash(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.1} %", v * 100.0))
}

/// Cost and savings of the load-following plant against the boiler-only
/// baseline: one row per quantity, control and ELF columns.
pub fn build_economics_table(report: &EconomicsReport) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", "Control", "ELF", "Savings"]);

    table.add_row(vec![
        Cell::new("Electrical demand"),
        right(report.annual_electrical_demand),
        right(report.annual_electrical_demand),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Thermal demand"),
        right(report.annual_thermal_demand),
        right(report.annual_thermal_demand),
        Cell::new(""),
    ]);
    if report.unserved_heat > Btu::ZERO {
        table.add_row(vec![
            Cell::new("  unserved by the plant").fg(Color::Red),
            Cell::new(""),
            right(report.unserved_heat).fg(Color::Red),
            Cell::new(""),
        ]);
    }

    let fuel = |btu: Btu| MegaBtu::from(btu);
    table.add_row(vec![
        Cell::new("Fuel"),
        right(fuel(report.fuel_control)),
        right(fuel(report.fuel_chp + report.fuel_aux_boiler)),
        right(fuel(report.thermal_energy_savings)),
    ]);
    let (chp_fuel, boiler_fuel) = (fuel(report.fuel_chp), fuel(report.fuel_aux_boiler));
    table.add_row(vec![
        Cell::new("  CHP / aux boiler").add_attribute(Attribute::Dim),
        Cell::new(""),
        right(format!("{chp_fuel} / {boiler_fuel}")).add_attribute(Attribute::Dim),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Thermal cost"),
        right(report.thermal_cost_control),
        right(report.thermal_cost_chp + report.thermal_cost_aux_boiler),
        right(report.thermal_cost_savings).fg(savings_color(report.thermal_cost_savings)),
    ]);
    table.add_row(vec![
        Cell::new("Grid electricity"),
        right(report.annual_electrical_demand),
        right(report.annual_electrical_demand - report.electrical_energy_savings),
        right(report.electrical_energy_savings),
    ]);
    let direction = match report.electric_cost_direction {
        SavingsDirection::Higher => " (bill higher)",
        SavingsDirection::Lower | SavingsDirection::Unchanged => "",
    };
    table.add_row(vec![
        Cell::new("Electric cost"),
        right(report.electric_cost_control),
        right(report.electric_cost_elf),
        right(format!("{}{direction}", report.electric_cost_savings))
            .fg(savings_color(report.electric_cost_savings)),
    ]);
    table.add_row(vec![
        Cell::new("Total savings").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        right(report.total_cost_savings)
            .add_attribute(Attribute::Bold)
            .fg(savings_color(report.total_cost_savings)),
    ]);
    table.add_row(vec![
        Cell::new("Implementation cost"),
        Cell::new(""),
        right(report.implementation_cost),
        Cell::new(""),
    ]);
    let payback_color = match report.simple_payback {
        Payback::Years(_) => Color::Reset,
        Payback::Never => Color::Red,
    };
    table.add_row(vec![
        Cell::new("Simple payback").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        right(report.simple_payback)
            .add_attribute(Attribute::Bold)
            .fg(payback_color),
    ]);
    table
}

/// Static properties of each piece of equipment, one column per device.
pub fn build_equipment_table(equipment: &[&dyn Equipment]) -> Table {
    let mut table = new_table();
    let mut header = vec![String::new()];
    header.extend(equipment.iter().map(|e| e.device_type().to_string()));
    table.set_header(header);

    let properties: Vec<_> = equipment.iter().map(|e| e.properties()).collect();
    let row = |f: fn(&EquipmentProperties) -> String| -> Vec<String> {
        properties.iter().map(f).collect()
    };

    let rows: [(&str, Vec<String>); 4] = [
        (
            "Full-load efficiency",
            row(|p| percent_or_dash(p.full_load_efficiency)),
        ),
        ("Turn-down ratio", row(|p| ratio_or_dash(p.turn_down_ratio))),
        ("Size", row(|p| p.size.clone())),
        (
            "Heat-to-power ratio",
            row(|p| ratio_or_dash(p.heat_to_power)),
        ),
    ];
    for (label, values) in rows {
        let mut row = vec![Cell::new(label)];
        row.extend(values.into_iter().map(right));
        table.add_row(row);
    }
    table
}

/// Utility rates and installed costs the economics are based on.
pub fn build_inputs_table(demand: &EnergyDemand, chp: &Chp, tes: &ThermalStorage) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Input", "Value"]);
    table.add_row(vec![Cell::new("Fuel cost"), right(demand.fuel_cost)]);
    table.add_row(vec![Cell::new("Electricity rate"), right(demand.electric_cost)]);
    table.add_row(vec![Cell::new("CHP installed cost"), right(chp.installed_cost)]);
    table.add_row(vec![
        Cell::new("  total").add_attribute(Attribute::Dim),
        right(chp.total_installed_cost()),
    ]);
    table.add_row(vec![Cell::new("TES installed cost"), right(tes.installed_cost)]);
    table.add_row(vec![
        Cell::new("  total").add_attribute(Attribute::Dim),
        right(tes.total_installed_cost()),
    ]);
    table.add_row(vec![
        Cell::new("Hours of demand").add_attribute(Attribute::Dim),
        right(demand.len()).add_attribute(Attribute::Dim),
    ]);
    table
}
