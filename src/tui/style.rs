//! Color constants and bar-scaling helpers for the TUI.

use ratatui::style::Color;

/// Power bar color.
pub const POWER_COLOR: Color = Color::Cyan;
/// Cost bar color.
pub const COST_COLOR: Color = Color::Yellow;
/// Tariff sparkline color.
pub const TARIFF_COLOR: Color = Color::Green;
/// Rows and bars above the power ceiling.
pub const OVER_CEILING: Color = Color::Red;
/// Forced-appliance banner color.
pub const FORCED_BANNER: Color = Color::Magenta;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;

/// Returns the row color for an hour's load.
pub fn load_color(power_kw: f64, max_power_kw: f64) -> Color {
    if power_kw > max_power_kw {
        OVER_CEILING
    } else {
        Color::Reset
    }
}

/// Converts a non-negative quantity to an integer bar height in `1/scale` units.
pub fn bar_value(value: f64, scale: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        (value * scale).round() as u64
    } else {
        0
    }
}
