//! Color constants and auto-scaling helpers for the chart viewer.

use ratatui::style::Color;

/// Line colors, cycled per series within a plot.
pub const SERIES_COLORS: [Color; 2] = [Color::Cyan, Color::Yellow];
/// Selected tab.
pub const TAB_SELECTED: Color = Color::Cyan;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;

/// Computes Y-axis bounds over every series with 10% padding.
pub fn auto_bounds_y<'a>(series: impl IntoIterator<Item = &'a [(f64, f64)]>) -> [f64; 2] {
    let values: Vec<f64> = series.into_iter().flatten().map(|&(_, y)| y).collect();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [-1.0, 1.0];
    }
    let range = (max - min).max(0.1);
    let pad = range * 0.1;
    [min - pad, max + pad]
}
