use super::breakpoints::{BreakpointTable, Segment};

/// Upper bound of the AQI scale.
const AQI_MAX: i32 = 500;

impl BreakpointTable {
    /// Computes the AQI for a normalized concentration of `code`.
    ///
    /// - No table entry for `code`: the concentration truncated toward zero, unbounded.
    /// - First segment containing the value (inclusive): linear interpolation,
    ///   rounded half to even.
    /// - No segment matches (gap, negative, above the table): the concentration
    ///   clamped to `[0, 500]` and truncated, without interpolation.
    pub fn aqi(&self, code: &str, concentration: f64) -> i32 {
        let segments = self.segments_for(code);
        if segments.is_empty() {
            return truncate(concentration);
        }

        match segments.iter().find(|s| s.contains(concentration)) {
            Some(segment) => interpolate(segment, concentration),
            None => truncate(concentration.clamp(0.0, AQI_MAX as f64)),
        }
    }
}

fn interpolate(segment: &Segment, concentration: f64) -> i32 {
    let slope = (segment.i_high - segment.i_low) as f64 / (segment.c_high - segment.c_low);
    round_index(slope * (concentration - segment.c_low) + segment.i_low as f64)
}

/// Banker's rounding: 0.5 -> 0, 1.5 -> 2, 2.5 -> 2.
fn round_index(index: f64) -> i32 {
    index.round_ties_even() as i32
}

// `as` saturates and maps NaN to 0.
fn truncate(value: f64) -> i32 {
    value.trunc() as i32
}
