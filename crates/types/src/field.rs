//! Field schema types describing what data a channel carries

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of data a channel field contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Floating-point measurement (e.g. 23.5)
    #[default]
    Numeric,
    /// Free-form text
    Text,
    /// On/off state
    Boolean,
}

impl FieldKind {
    /// Zero value for this kind, used when a field is created or retyped
    pub fn default_value(&self) -> FieldValue {
        match self {
            FieldKind::Numeric => FieldValue::Number(0.0),
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::Boolean => FieldValue::Bool(false),
        }
    }
}

/// A field value, matching one of the field kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl FieldValue {
    /// Kind this value belongs to
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Number(_) => FieldKind::Numeric,
            FieldValue::Bool(_) => FieldKind::Boolean,
            FieldValue::Text(_) => FieldKind::Text,
        }
    }

    /// Numeric content, if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// Schema entry for a single channel field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name as shown on dashboards
    pub name: String,
    /// Kind of data this field contains
    pub kind: FieldKind,
    /// Starting value; for numeric fields also the baseline for simulated samples
    pub initial: FieldValue,
}

impl FieldSpec {
    /// Create a field with the kind's zero value
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            initial: kind.default_value(),
        }
    }

    /// Create a numeric field with a baseline value
    pub fn numeric(name: impl Into<String>, initial: f64) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Numeric,
            initial: FieldValue::Number(initial),
        }
    }

    /// Create a text field
    pub fn text(name: impl Into<String>, initial: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Text,
            initial: FieldValue::Text(initial.into()),
        }
    }

    /// Create a boolean field
    pub fn boolean(name: impl Into<String>, initial: bool) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Boolean,
            initial: FieldValue::Bool(initial),
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == FieldKind::Numeric
    }

    /// Baseline for simulated sampling; `None` for non-numeric fields
    pub fn initial_number(&self) -> Option<f64> {
        if self.is_numeric() {
            self.initial.as_number()
        } else {
            None
        }
    }
}

/// Partial update for one field; `None` entries leave the current value alone
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub kind: Option<FieldKind>,
    #[serde(default)]
    pub initial: Option<FieldValue>,
}

impl FieldPatch {
    /// Merge this patch into a field.
    ///
    /// Changing the kind resets the value to the new kind's zero value; a
    /// value carried by the same patch is ignored so a stale value of the
    /// old kind can never survive a retype.
    pub fn apply(&self, field: &mut FieldSpec) {
        if let Some(name) = &self.name {
            field.name = name.clone();
        }
        match self.kind {
            Some(kind) if kind != field.kind => {
                field.kind = kind;
                field.initial = kind.default_value();
            }
            _ => {
                if let Some(initial) = &self.initial {
                    field.initial = initial.clone();
                }
            }
        }
    }
}

/// Display unit inferred from a field name, empty when unknown
pub fn default_unit(name: &str) -> &'static str {
    match name.to_lowercase().as_str() {
        "temperature" => "°C",
        "pressure" => "bar",
        "level" => "%",
        "humidity" => "%",
        "ph" => "pH",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_kind_serialization() {
        let field = FieldSpec::numeric("temperature", 23.5);
        let json = serde_json::to_string(&field).unwrap();
        assert!(json.contains("\"kind\":\"numeric\""));

        let deserialized: FieldSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.initial_number(), Some(23.5));
    }

    #[test]
    fn test_patch_retype_resets_value() {
        let mut field = FieldSpec::numeric("status", 42.0);
        let patch = FieldPatch {
            kind: Some(FieldKind::Boolean),
            initial: Some(FieldValue::Number(99.0)),
            ..Default::default()
        };
        patch.apply(&mut field);

        assert_eq!(field.kind, FieldKind::Boolean);
        assert_eq!(field.initial, FieldValue::Bool(false));
    }

    #[test]
    fn test_patch_same_kind_keeps_value_edit() {
        let mut field = FieldSpec::numeric("level", 10.0);
        let patch = FieldPatch {
            kind: Some(FieldKind::Numeric),
            initial: Some(FieldValue::Number(55.0)),
            ..Default::default()
        };
        patch.apply(&mut field);

        assert_eq!(field.initial_number(), Some(55.0));
    }

    #[test]
    fn test_default_units() {
        assert_eq!(default_unit("Temperature"), "°C");
        assert_eq!(default_unit("pressure"), "bar");
        assert_eq!(default_unit("humidity"), "%");
        assert_eq!(default_unit("flow_rate"), "");
    }
}
