//! AQI severity categories and their advisory text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used for degraded responses that carry no AQI.
pub const UNAVAILABLE: &str = "Unavailable";

/// Advice for a category label we do not recognise.
pub const GENERIC_ADVICE: &str = "Monitor conditions and stay informed about local advisories.";

/// Health category for an AQI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Good,
    Moderate,
    Unhealthy,
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
    Hazardous,
}

impl Category {
    /// Maps an AQI onto its category: ≤50, ≤100, ≤150, ≤200, above.
    pub fn for_aqi(aqi: i32) -> Self {
        match aqi {
            i32::MIN..=50 => Category::Good,
            51..=100 => Category::Moderate,
            101..=150 => Category::Unhealthy,
            151..=200 => Category::VeryUnhealthy,
            _ => Category::Hazardous,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Good => "Good",
            Category::Moderate => "Moderate",
            Category::Unhealthy => "Unhealthy",
            Category::VeryUnhealthy => "Very Unhealthy",
            Category::Hazardous => "Hazardous",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Good" => Some(Category::Good),
            "Moderate" => Some(Category::Moderate),
            "Unhealthy" => Some(Category::Unhealthy),
            "Very Unhealthy" => Some(Category::VeryUnhealthy),
            "Hazardous" => Some(Category::Hazardous),
            _ => None,
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Category::Good => "Air quality is ideal for outdoor activities.",
            Category::Moderate => {
                "Sensitive individuals should consider limiting prolonged outdoor exertion."
            },
            Category::Unhealthy => {
                "People with respiratory issues should avoid outdoor exertion; consider wearing protective masks."
            },
            Category::VeryUnhealthy => {
                "Everyone should limit outdoor exposure and use air purifiers indoors if available."
            },
            Category::Hazardous => "Stay indoors with filtered air. Avoid all outdoor activities.",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Advice for an arbitrary category label, falling back to [`GENERIC_ADVICE`].
pub fn advice_for(label: &str) -> &'static str {
    Category::from_label(label)
        .map(|c| c.advice())
        .unwrap_or(GENERIC_ADVICE)
}
