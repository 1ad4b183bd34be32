// Formatting helpers shared by the overlays.
use chrono::NaiveDateTime;

pub fn format_degrees(v: f64) -> String {
    format!("{:.4}°", v)
}

pub fn format_date(t: &NaiveDateTime) -> String {
    t.format("%b %-d, %Y").to_string()
}

pub fn format_clock(t: &NaiveDateTime) -> String {
    t.format("%H:%M").to_string()
}

/// Slider label for fractional hours, e.g. 9.5 → "9:30".
pub fn format_hours(hours: f64) -> String {
    let h = hours.floor();
    let mut m = ((hours - h) * 60.0).round() as u32;
    let mut h = h as u32;
    if m == 60 {
        h += 1;
        m = 0;
    }
    format!("{}:{:02}", h, m)
}
