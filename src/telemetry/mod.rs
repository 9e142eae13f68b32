//! Simulated telemetry: synthetic sampling and the shared live-data manager

mod live;
mod mock;

pub use live::LiveDataManager;
pub use mock::{
    aggregate, field_stats, sample_fields, sample_point, series_window, window_for, FieldStats,
    SeriesPoint,
};
