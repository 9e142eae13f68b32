//! Synthetic sample generation standing in for real device telemetry.
//!
//! Point samples jitter around a field's baseline; chart windows jitter
//! around the current value with minute-spaced labels counting back from
//! "now". Windows are rebuilt from scratch on every request, so no history
//! is retained between refreshes.

use crate::core::constants::{
    BAR_WINDOW, CHART_WINDOW, POINT_JITTER, SERIES_JITTER, STATS_MAX_FACTOR, STATS_MIN_FACTOR,
};
use chrono::{DateTime, Duration, Local};
use rand::Rng;
use std::collections::HashMap;
use tankmon_types::{Aggregation, FieldSpec, WidgetConfig};

/// One synthetic reading around a baseline value
pub fn sample_point(baseline: f64) -> f64 {
    let mut rng = rand::thread_rng();
    baseline + (rng.gen::<f64>() - 0.5) * baseline * POINT_JITTER
}

/// Fresh value map for a channel: one sample per numeric field, rebuilt
/// wholesale. Non-numeric fields carry no live value.
pub fn sample_fields(fields: &[FieldSpec]) -> HashMap<String, f64> {
    fields
        .iter()
        .filter_map(|f| {
            f.initial_number()
                .map(|baseline| (f.name.clone(), sample_point(baseline)))
        })
        .collect()
}

/// One labelled point of a synthetic series window
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    /// Minute-resolution wall-clock label, `%H:%M`
    pub label: String,
    pub value: f64,
}

/// Build a `len`-point window anchored to `current`, labels one minute
/// apart counting backward from `now` (the last point is the newest).
pub fn series_window(current: f64, len: usize, now: DateTime<Local>) -> Vec<SeriesPoint> {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|i| {
            let minutes_back = (len - 1 - i) as i64;
            let stamp = now - Duration::minutes(minutes_back);
            SeriesPoint {
                label: stamp.format("%H:%M").to_string(),
                value: current + (rng.gen::<f64>() - 0.5) * current * SERIES_JITTER,
            }
        })
        .collect()
}

/// Series window sized for the given widget: 20 points for charts, the
/// last 8 for bars, none for numeric displays.
pub fn window_for(
    config: &WidgetConfig,
    current: f64,
    now: DateTime<Local>,
) -> Option<Vec<SeriesPoint>> {
    match config {
        WidgetConfig::Chart(_) => Some(series_window(current, CHART_WINDOW, now)),
        WidgetConfig::Bar(_) => Some(series_window(current, BAR_WINDOW, now)),
        WidgetConfig::Numeric(_) => None,
    }
}

/// Reduce a window's values the way a bar widget displays them
pub fn aggregate(values: &[f64], aggregation: Aggregation) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    match aggregation {
        Aggregation::Average => values.iter().sum::<f64>() / values.len() as f64,
        Aggregation::Sum => values.iter().sum(),
        Aggregation::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        Aggregation::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        Aggregation::Count => values.len() as f64,
    }
}

/// At-a-glance statistics for one numeric field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    pub current: f64,
    /// Estimated floor, spread below the current value
    pub est_min: f64,
    /// Estimated ceiling, spread above the current value
    pub est_max: f64,
}

/// Statistics summary around the latest sample
pub fn field_stats(current: f64) -> FieldStats {
    FieldStats {
        current,
        est_min: current * STATS_MIN_FACTOR,
        est_max: current * STATS_MAX_FACTOR,
    }
}
