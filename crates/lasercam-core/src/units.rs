//! Number formatting for the toolpath dialect
//!
//! Coordinates are always written with exactly three decimal places.
//! Feed rates and laser power are written in their shortest form
//! (`1000`, `255`, `12.5`).

/// Millimeter unit label used in program comments
pub const UNIT_LABEL: &str = "mm";

/// Feed rate unit label used in program comments
pub const FEED_RATE_LABEL: &str = "mm/min";

/// Format a coordinate value with exactly three decimal places
///
/// Values that round to zero are written as `0.000`, never `-0.000`.
pub fn format_coordinate(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0.000".to_string();
    }
    format!("{:.3}", rounded)
}

/// Format a feed rate or intensity parameter
pub fn format_rate(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// Format a travel distance for display
pub fn format_length(value_mm: f64) -> String {
    format!("{:.3}", value_mm)
}

/// Format a percentage with one decimal place
pub fn format_percent(value: f64) -> String {
    format!("{:.1}", value)
}
