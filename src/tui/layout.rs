//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Row, Sparkline, Table};

use super::runtime::App;
use super::style;
use crate::sched::report::HourRow;
use crate::tariff::HOURS_PER_DAY;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(4), // tariff sparkline
            Constraint::Min(12),   // table + charts
            Constraint::Length(1), // forced banner
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_tariff(frame, app, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    render_table(frame, app, body[0]);

    let charts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(body[1]);
    render_power_chart(frame, app, charts[0]);
    render_cost_chart(frame, app, charts[1]);

    render_banner(frame, app, chunks[3]);
    render_footer(frame, app, chunks[4]);
}

/// Header bar: preset, tariff, ceiling, total cost.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let scenario = app.scenario();
    let preset = app.preset_name().unwrap_or("custom scenario");
    let header = Line::from(vec![
        Span::styled(
            " LOAD-SCHED ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(preset, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(
            " │ tariff={} │ limit={:.2} kW │ peak={:.2} kW │ total=€{:.2} ",
            scenario.tariff_label,
            app.report.max_power_kw,
            app.report.peak_power_kw,
            app.report.total_cost,
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Hourly price curve.
fn render_tariff(frame: &mut Frame, app: &App, area: Rect) {
    let tariff = &app.scenario().tariff;
    let (min, max) = tariff.bounds();
    let data: Vec<u64> = tariff
        .prices()
        .iter()
        .map(|&p| style::bar_value(p, 1000.0))
        .collect();
    let title = format!(" Tariff €/kWh (min {min:.3}, max {max:.3}) ");
    let sparkline = Sparkline::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .style(Style::default().fg(style::TARIFF_COLOR))
        .data(&data);
    frame.render_widget(sparkline, area);
}

/// Scrollable hourly table.
fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let ceiling = app.report.max_power_kw;
    let rows: Vec<Row> = app
        .report
        .rows
        .iter()
        .skip(app.scroll)
        .map(|r| {
            Row::new(vec![
                r.label.clone(),
                r.devices.clone(),
                format!("{:.2}", r.power_kw),
                format!("{:.3}", r.cost),
            ])
            .style(Style::default().fg(style::load_color(r.power_kw, ceiling)))
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Min(10),
        Constraint::Length(10),
        Constraint::Length(8),
    ];
    let header = Row::new(vec!["Hour", "Devices", "Power (kW)", "Cost (€)"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(" Schedule ").borders(Borders::ALL));
    frame.render_widget(table, area);
}

/// Bar width that fits one bar per hour inside `area`.
fn bar_width(area: Rect) -> u16 {
    let inner = area.width.saturating_sub(2);
    (inner / HOURS_PER_DAY as u16).saturating_sub(1).max(1)
}

fn hour_bars<'a>(
    rows: &'a [HourRow],
    value: impl Fn(&HourRow) -> u64,
    text: impl Fn(&HourRow) -> String,
    color: impl Fn(&HourRow) -> ratatui::style::Color,
) -> Vec<Bar<'a>> {
    rows.iter()
        .map(|r| {
            Bar::default()
                .value(value(r))
                .label(Line::from(format!("{:02}", r.hour)))
                .text_value(text(r))
                .style(Style::default().fg(color(r)))
        })
        .collect()
}

/// Hourly load against the ceiling.
fn render_power_chart(frame: &mut Frame, app: &App, area: Rect) {
    let ceiling = app.report.max_power_kw;
    let bars = hour_bars(
        &app.report.rows,
        |r| style::bar_value(r.power_kw, 100.0),
        |r| format!("{:.1}", r.power_kw),
        |r| {
            if r.power_kw > ceiling {
                style::OVER_CEILING
            } else {
                style::POWER_COLOR
            }
        },
    );
    let chart = BarChart::default()
        .block(
            Block::default()
                .title(format!(" Power kW (limit {ceiling:.2}) "))
                .borders(Borders::ALL),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(area))
        .bar_gap(1);
    frame.render_widget(chart, area);
}

/// Hourly cost.
fn render_cost_chart(frame: &mut Frame, app: &App, area: Rect) {
    let bars = hour_bars(
        &app.report.rows,
        |r| style::bar_value(r.cost, 1000.0),
        |r| format!("{:.2}", r.cost),
        |_| style::COST_COLOR,
    );
    let chart = BarChart::default()
        .block(Block::default().title(" Cost € ").borders(Borders::ALL))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(area))
        .bar_gap(1);
    frame.render_widget(chart, area);
}

/// Warning line naming forced appliances.
fn render_banner(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.report.forced_warning() {
        Some(warning) => Line::from(Span::styled(
            format!(" {warning}"),
            Style::default()
                .fg(style::FORCED_BANNER)
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(" All appliances fit under the power limit."),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Footer with keybinding hints, or the last preset error.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let text = match &app.status {
        Some(err) => format!(" error: {err}"),
        None => " q:Quit  1-4:Provider  p:Next preset  ↑/↓:Scroll".to_string(),
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
