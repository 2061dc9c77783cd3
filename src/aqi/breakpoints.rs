//! US EPA breakpoint segments per pollutant.
//!
//! Particulates are expressed in µg/m³; gases in ppm. A pollutant absent from the
//! table has no segments, which the calculator treats as "use the raw value".

/// One piecewise-linear interval mapping a concentration range onto an index range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub c_low: f64,
    pub c_high: f64,
    pub i_low: i32,
    pub i_high: i32,
}

impl Segment {
    const fn new(c_low: f64, c_high: f64, i_low: i32, i_high: i32) -> Self {
        Self {
            c_low,
            c_high,
            i_low,
            i_high,
        }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, concentration: f64) -> bool {
        self.c_low <= concentration && concentration <= self.c_high
    }
}

const PM25: &[Segment] = &[
    Segment::new(0.0, 12.0, 0, 50),
    Segment::new(12.1, 35.4, 51, 100),
    Segment::new(35.5, 55.4, 101, 150),
    Segment::new(55.5, 150.4, 151, 200),
    Segment::new(150.5, 250.4, 201, 300),
    Segment::new(250.5, 500.4, 301, 500),
];

const PM10: &[Segment] = &[
    Segment::new(0.0, 54.0, 0, 50),
    Segment::new(54.1, 154.0, 51, 100),
    Segment::new(154.1, 254.0, 101, 150),
    Segment::new(254.1, 354.0, 151, 200),
    Segment::new(354.1, 424.0, 201, 300),
    Segment::new(424.1, 604.0, 301, 500),
];

const O3: &[Segment] = &[
    Segment::new(0.0, 0.054, 0, 50),
    Segment::new(0.055, 0.070, 51, 100),
    Segment::new(0.071, 0.085, 101, 150),
    Segment::new(0.086, 0.105, 151, 200),
    Segment::new(0.106, 0.200, 201, 300),
];

const NO2: &[Segment] = &[
    Segment::new(0.0, 0.053, 0, 50),
    Segment::new(0.054, 0.100, 51, 100),
    Segment::new(0.101, 0.360, 101, 150),
    Segment::new(0.361, 0.649, 151, 200),
    Segment::new(0.650, 1.249, 201, 300),
];

const SO2: &[Segment] = &[
    Segment::new(0.0, 0.035, 0, 50),
    Segment::new(0.036, 0.075, 51, 100),
    Segment::new(0.076, 0.185, 101, 150),
    Segment::new(0.186, 0.304, 151, 200),
    Segment::new(0.305, 0.604, 201, 300),
];

const CO: &[Segment] = &[
    Segment::new(0.0, 4.4, 0, 50),
    Segment::new(4.5, 9.4, 51, 100),
    Segment::new(9.5, 12.4, 101, 150),
    Segment::new(12.5, 15.4, 151, 200),
    Segment::new(15.5, 30.4, 201, 300),
];

const US_EPA: &[(&str, &[Segment])] = &[
    ("pm25", PM25),
    ("pm10", PM10),
    ("o3", O3),
    ("no2", NO2),
    ("so2", SO2),
    ("co", CO),
];

/// Read-only lookup from pollutant code to its ordered segments.
///
/// Constructed once and shared; the default instance is the US EPA table.
#[derive(Debug, Clone, Copy)]
pub struct BreakpointTable {
    entries: &'static [(&'static str, &'static [Segment])],
}

impl BreakpointTable {
    /// The US EPA table for PM2.5, PM10, O3, NO2, SO2 and CO.
    pub const fn us_epa() -> Self {
        Self { entries: US_EPA }
    }

    /// Segments for `code` (case-insensitive), ascending. Unknown codes yield an empty slice.
    pub fn segments_for(&self, code: &str) -> &'static [Segment] {
        let code = code.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(name, _)| *name == code)
            .map(|(_, segments)| *segments)
            .unwrap_or(&[])
    }

    /// Pollutant codes covered by this table, in table order.
    #[cfg(test)]
    pub fn pollutants(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self::us_epa()
    }
}
