//! Air Quality Index computation.
//!
//! Includes:
//! - `breakpoints`: the per-pollutant breakpoint table.
//! - `units`: conversion of raw measurements into table units.
//! - `calculator`: breakpoint interpolation (`BreakpointTable::aqi`).
//! - `category`: severity categories and advisory text.

mod breakpoints;
mod calculator;
mod category;
mod units;

pub use breakpoints::*;
pub use category::*;
pub use units::*;

/// Display name for a pollutant code; unknown codes are shown uppercased.
pub fn pollutant_name(code: &str) -> String {
    match code.to_ascii_lowercase().as_str() {
        "pm25" => "PM2.5".to_string(),
        "pm10" => "PM10".to_string(),
        "o3" => "Ozone".to_string(),
        "no2" => "Nitrogen Dioxide".to_string(),
        "so2" => "Sulfur Dioxide".to_string(),
        "co" => "Carbon Monoxide".to_string(),
        _ => code.to_uppercase(),
    }
}
