//! Shared constants for the monitoring core

use std::time::Duration;

/// Cadence of the simulated refresh loop (3 seconds)
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(3000);

/// Refresh interval in milliseconds (useful for config defaults)
pub const REFRESH_INTERVAL_MS: u64 = 3000;

/// Width of the uniform jitter on point samples, as a fraction of the baseline
pub const POINT_JITTER: f64 = 0.2;

/// Width of the uniform jitter within series windows, as a fraction of the
/// current value
pub const SERIES_JITTER: f64 = 0.15;

/// Number of points in a chart series window
pub const CHART_WINDOW: usize = 20;

/// Number of points in a bar series window (tail of the chart window)
pub const BAR_WINDOW: usize = 8;

/// Factors for the estimated min/max shown in the statistics summary
pub const STATS_MIN_FACTOR: f64 = 0.85;
pub const STATS_MAX_FACTOR: f64 = 1.15;

/// Length of the random suffix in generated api keys
pub const API_KEY_SUFFIX_LEN: usize = 9;
