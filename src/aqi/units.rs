//! Converts raw measurements into the unit the breakpoint table expects.
//!
//! Normalization is best effort: anything not covered by an explicit rule below
//! passes through unchanged, including unrecognized unit labels.

/// Mass concentration unit as reported by OpenAQ (micro sign, superscript three).
pub const MICROGRAMS_PER_CUBIC_METER: &str = "µg/m³";

/// Molar volume of an ideal gas at 25 °C and 1 atm, in litres.
const MOLAR_VOLUME_L: f64 = 24.45;

/// Molecular mass (g/mol) of the gases the breakpoint table expresses in ppm.
pub fn molecular_mass(code: &str) -> Option<f64> {
    match code.to_ascii_lowercase().as_str() {
        "o3" => Some(48.0),
        "no2" => Some(46.0),
        "so2" => Some(64.1),
        "co" => Some(28.0),
        _ => None,
    }
}

/// Returns `value` expressed in the breakpoint table's unit for `code`.
///
/// Rules, first match wins:
/// 1. `ppb` (any case) is divided by 1000.
/// 2. `ppm` (any case) passes through.
/// 3. exactly `µg/m³` for a gas with a known molecular mass converts to ppm.
/// 4. everything else passes through.
pub fn normalize(code: &str, value: f64, unit: &str) -> f64 {
    if unit.eq_ignore_ascii_case("ppb") {
        return value / 1000.0;
    }
    if unit.eq_ignore_ascii_case("ppm") {
        return value;
    }
    if unit == MICROGRAMS_PER_CUBIC_METER {
        if let Some(mass) = molecular_mass(code) {
            return (value * MOLAR_VOLUME_L) / (mass * 1000.0);
        }
    }
    value
}
