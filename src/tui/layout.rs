//! Chart viewer layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Tabs};

use super::runtime::{App, Plot};
use super::style;

/// Renders the full viewer frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(3), // tabs
            Constraint::Min(10),   // chart
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_chart(frame, app, chunks[2]);
    render_footer(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header = Line::from(vec![
        Span::styled(
            " CHP-SIM ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" equal load following │ {} h ", app.n_hours)),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles = Plot::ALL
        .iter()
        .enumerate()
        .map(|(i, plot)| format!("{} {}", i + 1, plot.title()));
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(app.selected)
        .highlight_style(
            Style::default()
                .fg(style::TAB_SELECTED)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let plot = app.plot();
    let series = app.series();
    let y_bounds = style::auto_bounds_y(series.iter().map(|s| s.points.as_slice()));
    let x_hi = (app.n_hours.max(2) - 1) as f64;

    let datasets: Vec<Dataset> = series
        .iter()
        .zip(style::SERIES_COLORS.iter().cycle())
        .map(|(s, &color)| {
            Dataset::default()
                .name(s.name)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(color))
                .data(&s.points)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(format!(" {} ", plot.title()))
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("hour")
                .bounds([0.0, x_hi])
                .labels(vec!["0".to_string(), format!("{x_hi:.0}")]),
        )
        .y_axis(
            Axis::default()
                .title(plot.unit())
                .bounds(y_bounds)
                .labels(vec![format!("{:.0}", y_bounds[0]), format!("{:.0}", y_bounds[1])]),
        );

    frame.render_widget(chart, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  Tab/←/→:Switch plot  1-6:Select plot",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
