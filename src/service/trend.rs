//! Synthetic 24-hour trend line for charting.
//!
//! Cosmetic only: each point is the current AQI plus Gaussian noise, so two calls
//! never agree and nothing downstream should treat it as history.

use crate::models::TrendPoint;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand_distr::StandardNormal;

pub const TREND_POINTS: usize = 24;
pub const TREND_MAX_AQI: i32 = 400;
const NOISE_STD_DEV: f64 = 8.0;

/// One point per hour for the 24 hours ending at `now`, oldest first.
pub fn synthesize<R: Rng>(
    current_aqi: i32,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<TrendPoint> {
    (0..TREND_POINTS)
        .map(|hour| {
            let at = now - Duration::hours((TREND_POINTS - 1 - hour) as i64);
            let z: f64 = rng.sample(StandardNormal);
            let value = (current_aqi as f64 + z * NOISE_STD_DEV).trunc() as i32;
            TrendPoint {
                time: at.format("%H:%M").to_string(),
                aqi: value.clamp(0, TREND_MAX_AQI),
            }
        })
        .collect()
}

/// [`synthesize`] with the thread RNG and the current time.
pub fn recent_trend(current_aqi: i32) -> Vec<TrendPoint> {
    synthesize(current_aqi, Utc::now(), &mut rand::thread_rng())
}
