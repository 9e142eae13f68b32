//! tankmon-types: Shared data types for the tankmon monitoring core.
//!
//! This crate contains pure data types (field schemas, channel records,
//! widget configurations, user records) that are shared across the tankmon
//! crates. These types have no I/O or async dependencies, making them
//! suitable as a foundation layer.

pub mod channel;
pub mod field;
pub mod user;
pub mod widget;

// Re-export commonly used types at the crate root for convenience
pub use channel::{Channel, ChannelId, ChannelPatch};
pub use field::{default_unit, FieldKind, FieldPatch, FieldSpec, FieldValue};
pub use user::User;
pub use widget::{
    Aggregation, AggregationInterval, BarWidgetConfig, BarWidgetPatch, ChartType,
    ChartWidgetConfig, ChartWidgetPatch, MoveDirection, NumericWidgetConfig, NumericWidgetPatch,
    TimeRange, Widget, WidgetConfig, WidgetConfigPatch, WidgetId, WidgetKind,
};
