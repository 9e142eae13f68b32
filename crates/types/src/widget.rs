//! Widget configuration types - the tagged config union and its patches.
//!
//! Each widget kind carries exactly the settings it understands, so a config
//! can never hold keys its widget ignores. JSON uses a serde tag:
//! `{"widget_type": "chart", ...}`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of widget shown on a channel dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    /// Time-series plot over a numeric field
    Chart,
    /// Single current value with a unit
    Numeric,
    /// Aggregated bar graph over recent values
    Bar,
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WidgetKind::Chart => "chart",
            WidgetKind::Numeric => "numeric",
            WidgetKind::Bar => "bar",
        };
        f.write_str(name)
    }
}

/// Curve style for chart widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    #[default]
    Line,
    Bar,
    Area,
    Scatter,
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartType::Line => "line",
            ChartType::Bar => "bar",
            ChartType::Area => "area",
            ChartType::Scatter => "scatter",
        };
        f.write_str(name)
    }
}

/// How far back a chart looks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimeRange {
    #[serde(rename = "1h")]
    Hour,
    #[default]
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
}

/// Bucket width for chart aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AggregationInterval {
    #[serde(rename = "1m")]
    Minute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[default]
    #[serde(rename = "1h")]
    Hour,
    #[serde(rename = "1d")]
    Day,
}

/// Reduction applied by bar widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    #[default]
    Average,
    Sum,
    Min,
    Max,
    Count,
}

fn default_time_label() -> String {
    "Time".to_string()
}

fn default_value_label() -> String {
    "Value".to_string()
}

fn default_categories_label() -> String {
    "Categories".to_string()
}

fn default_values_label() -> String {
    "Values".to_string()
}

/// Chart widget configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartWidgetConfig {
    /// Curve style
    #[serde(default)]
    pub chart_type: ChartType,
    /// Numeric field this widget plots
    #[serde(default)]
    pub field: String,
    /// Lookback window
    #[serde(default)]
    pub time_range: TimeRange,
    /// Aggregation bucket width
    #[serde(default)]
    pub aggregation_interval: AggregationInterval,
    /// Display title, may be empty
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_time_label")]
    pub x_axis_label: String,
    #[serde(default = "default_value_label")]
    pub y_axis_label: String,
}

impl Default for ChartWidgetConfig {
    fn default() -> Self {
        Self {
            chart_type: ChartType::Line,
            field: String::new(),
            time_range: TimeRange::Day,
            aggregation_interval: AggregationInterval::Hour,
            title: String::new(),
            x_axis_label: default_time_label(),
            y_axis_label: default_value_label(),
        }
    }
}

/// Numeric display widget configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NumericWidgetConfig {
    /// Numeric field this widget shows
    #[serde(default)]
    pub field: String,
    /// Display title, may be empty
    #[serde(default)]
    pub title: String,
    /// Unit suffix shown next to the value
    #[serde(default)]
    pub unit: String,
}

/// Bar widget configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarWidgetConfig {
    /// Numeric field this widget aggregates
    #[serde(default)]
    pub field: String,
    /// Reduction over the windowed values
    #[serde(default)]
    pub aggregation: Aggregation,
    /// Display title, may be empty
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_categories_label")]
    pub x_axis_label: String,
    #[serde(default = "default_values_label")]
    pub y_axis_label: String,
}

impl Default for BarWidgetConfig {
    fn default() -> Self {
        Self {
            field: String::new(),
            aggregation: Aggregation::Average,
            title: String::new(),
            x_axis_label: default_categories_label(),
            y_axis_label: default_values_label(),
        }
    }
}

/// Type-safe enum for all widget configurations.
/// Uses serde tag for JSON serialization: {"widget_type": "chart", ...}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "widget_type")]
pub enum WidgetConfig {
    #[serde(rename = "chart")]
    Chart(ChartWidgetConfig),

    #[serde(rename = "numeric")]
    Numeric(NumericWidgetConfig),

    #[serde(rename = "bar")]
    Bar(BarWidgetConfig),
}

impl WidgetConfig {
    /// Get the widget kind for this config variant
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetConfig::Chart(_) => WidgetKind::Chart,
            WidgetConfig::Numeric(_) => WidgetKind::Numeric,
            WidgetConfig::Bar(_) => WidgetKind::Bar,
        }
    }

    /// Create a default config for a given widget kind
    pub fn default_for_kind(kind: WidgetKind) -> Self {
        match kind {
            WidgetKind::Chart => WidgetConfig::Chart(ChartWidgetConfig::default()),
            WidgetKind::Numeric => WidgetConfig::Numeric(NumericWidgetConfig::default()),
            WidgetKind::Bar => WidgetConfig::Bar(BarWidgetConfig::default()),
        }
    }

    /// Field this widget reads from
    pub fn field(&self) -> &str {
        match self {
            WidgetConfig::Chart(cfg) => &cfg.field,
            WidgetConfig::Numeric(cfg) => &cfg.field,
            WidgetConfig::Bar(cfg) => &cfg.field,
        }
    }

    /// Display title, may be empty
    pub fn title(&self) -> &str {
        match self {
            WidgetConfig::Chart(cfg) => &cfg.title,
            WidgetConfig::Numeric(cfg) => &cfg.title,
            WidgetConfig::Bar(cfg) => &cfg.title,
        }
    }

    /// Rebind the widget to another field
    pub fn set_field(&mut self, field: impl Into<String>) {
        let field = field.into();
        match self {
            WidgetConfig::Chart(cfg) => cfg.field = field,
            WidgetConfig::Numeric(cfg) => cfg.field = field,
            WidgetConfig::Bar(cfg) => cfg.field = field,
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        WidgetConfig::Chart(ChartWidgetConfig::default())
    }
}

/// Partial update for a chart widget config
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartWidgetPatch {
    #[serde(default)]
    pub chart_type: Option<ChartType>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub time_range: Option<TimeRange>,
    #[serde(default)]
    pub aggregation_interval: Option<AggregationInterval>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub x_axis_label: Option<String>,
    #[serde(default)]
    pub y_axis_label: Option<String>,
}

impl ChartWidgetPatch {
    fn apply(&self, cfg: &mut ChartWidgetConfig) {
        if let Some(chart_type) = self.chart_type {
            cfg.chart_type = chart_type;
        }
        if let Some(field) = &self.field {
            cfg.field = field.clone();
        }
        if let Some(time_range) = self.time_range {
            cfg.time_range = time_range;
        }
        if let Some(interval) = self.aggregation_interval {
            cfg.aggregation_interval = interval;
        }
        if let Some(title) = &self.title {
            cfg.title = title.clone();
        }
        if let Some(label) = &self.x_axis_label {
            cfg.x_axis_label = label.clone();
        }
        if let Some(label) = &self.y_axis_label {
            cfg.y_axis_label = label.clone();
        }
    }
}

/// Partial update for a numeric widget config
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NumericWidgetPatch {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl NumericWidgetPatch {
    fn apply(&self, cfg: &mut NumericWidgetConfig) {
        if let Some(field) = &self.field {
            cfg.field = field.clone();
        }
        if let Some(title) = &self.title {
            cfg.title = title.clone();
        }
        if let Some(unit) = &self.unit {
            cfg.unit = unit.clone();
        }
    }
}

/// Partial update for a bar widget config
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BarWidgetPatch {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub aggregation: Option<Aggregation>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub x_axis_label: Option<String>,
    #[serde(default)]
    pub y_axis_label: Option<String>,
}

impl BarWidgetPatch {
    fn apply(&self, cfg: &mut BarWidgetConfig) {
        if let Some(field) = &self.field {
            cfg.field = field.clone();
        }
        if let Some(aggregation) = self.aggregation {
            cfg.aggregation = aggregation;
        }
        if let Some(title) = &self.title {
            cfg.title = title.clone();
        }
        if let Some(label) = &self.x_axis_label {
            cfg.x_axis_label = label.clone();
        }
        if let Some(label) = &self.y_axis_label {
            cfg.y_axis_label = label.clone();
        }
    }
}

/// Kind-tagged partial update for a widget config.
/// Merging into a config of a different kind is refused.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "widget_type")]
pub enum WidgetConfigPatch {
    #[serde(rename = "chart")]
    Chart(ChartWidgetPatch),

    #[serde(rename = "numeric")]
    Numeric(NumericWidgetPatch),

    #[serde(rename = "bar")]
    Bar(BarWidgetPatch),
}

impl WidgetConfigPatch {
    /// Get the widget kind this patch targets
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetConfigPatch::Chart(_) => WidgetKind::Chart,
            WidgetConfigPatch::Numeric(_) => WidgetKind::Numeric,
            WidgetConfigPatch::Bar(_) => WidgetKind::Bar,
        }
    }

    /// Field rebinding carried by this patch, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            WidgetConfigPatch::Chart(p) => p.field.as_deref(),
            WidgetConfigPatch::Numeric(p) => p.field.as_deref(),
            WidgetConfigPatch::Bar(p) => p.field.as_deref(),
        }
    }

    /// Merge into a config of the same kind. Returns false and leaves the
    /// config untouched when the kinds differ.
    pub fn apply(&self, config: &mut WidgetConfig) -> bool {
        match (self, config) {
            (WidgetConfigPatch::Chart(p), WidgetConfig::Chart(cfg)) => {
                p.apply(cfg);
                true
            }
            (WidgetConfigPatch::Numeric(p), WidgetConfig::Numeric(cfg)) => {
                p.apply(cfg);
                true
            }
            (WidgetConfigPatch::Bar(p), WidgetConfig::Bar(cfg)) => {
                p.apply(cfg);
                true
            }
            _ => false,
        }
    }
}

/// Identifier for one widget within a channel.
/// Derived from the creation time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(pub i64);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction for reordering widgets within a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

/// A configured widget instance on a channel dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    /// Unique within the owning channel
    pub id: WidgetId,
    /// Type-safe configuration (includes the widget kind in the enum variant)
    pub config: WidgetConfig,
}

impl Widget {
    pub fn new(id: WidgetId, config: WidgetConfig) -> Self {
        Self { id, config }
    }

    /// Get the widget kind from the config variant
    pub fn kind(&self) -> WidgetKind {
        self.config.kind()
    }
}
