//! Channel records - the unit of registration and monitoring

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::field::FieldSpec;
use crate::widget::{Widget, WidgetId};

/// Identifier for a registered channel, unique and creation-ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub i64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A monitored channel: identity, field schema, dashboard widgets and
/// access metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    /// Display name; not required to be unique
    pub name: String,
    /// Field schema, always at least one entry
    pub fields: Vec<FieldSpec>,
    /// Dashboard widgets in display order
    #[serde(default)]
    pub widgets: Vec<Widget>,
    /// Access token handed to ingesting devices
    pub api_key: String,
    /// Wall-clock stamp of the last registry write, `%Y-%m-%d %H:%M:%S`
    pub last_update: String,
    /// Emails of users allowed to view this channel
    #[serde(default)]
    pub assigned_users: Vec<String>,
}

impl Channel {
    /// Fields a widget may bind to
    pub fn numeric_fields(&self) -> Vec<&FieldSpec> {
        self.fields.iter().filter(|f| f.is_numeric()).collect()
    }

    /// Name of the first numeric field, if any
    pub fn first_numeric_field(&self) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.is_numeric())
            .map(|f| f.name.as_str())
    }

    pub fn has_numeric_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.is_numeric() && f.name == name)
    }

    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    /// Whether the given user may view this channel
    pub fn is_assigned(&self, email: &str) -> bool {
        self.assigned_users.iter().any(|u| u == email)
    }
}

/// Partial update for a channel; `None` entries leave current values alone
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<FieldSpec>>,
    #[serde(default)]
    pub widgets: Option<Vec<Widget>>,
    #[serde(default)]
    pub assigned_users: Option<Vec<String>>,
}

impl ChannelPatch {
    /// Patch replacing only the field schema
    pub fn with_fields(fields: Vec<FieldSpec>) -> Self {
        Self {
            fields: Some(fields),
            ..Default::default()
        }
    }

    /// Patch replacing only the widget list
    pub fn with_widgets(widgets: Vec<Widget>) -> Self {
        Self {
            widgets: Some(widgets),
            ..Default::default()
        }
    }

    /// Patch replacing only the assigned-user list
    pub fn with_assigned_users(users: Vec<String>) -> Self {
        Self {
            assigned_users: Some(users),
            ..Default::default()
        }
    }

    /// Shallow-merge this patch into a channel
    pub fn apply(self, channel: &mut Channel) {
        if let Some(name) = self.name {
            channel.name = name;
        }
        if let Some(fields) = self.fields {
            channel.fields = fields;
        }
        if let Some(widgets) = self.widgets {
            channel.widgets = widgets;
        }
        if let Some(users) = self.assigned_users {
            channel.assigned_users = users;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    fn sample_channel() -> Channel {
        Channel {
            id: ChannelId(1),
            name: "Tank_001".to_string(),
            fields: vec![
                FieldSpec::numeric("temperature", 23.5),
                FieldSpec::text("status", "ok"),
                FieldSpec::numeric("level", 85.3),
            ],
            widgets: Vec::new(),
            api_key: "key_tank001_xyz789".to_string(),
            last_update: "2024-06-12 14:30:22".to_string(),
            assigned_users: vec!["operator1@example.com".to_string()],
        }
    }

    #[test]
    fn test_numeric_field_lookup() {
        let channel = sample_channel();
        assert_eq!(channel.numeric_fields().len(), 2);
        assert_eq!(channel.first_numeric_field(), Some("temperature"));
        assert!(channel.has_numeric_field("level"));
        assert!(!channel.has_numeric_field("status"));
        assert!(!channel.has_numeric_field("missing"));
    }

    #[test]
    fn test_patch_merges_subset() {
        let mut channel = sample_channel();
        let patch = ChannelPatch {
            name: Some("Tank_001B".to_string()),
            ..Default::default()
        };
        patch.apply(&mut channel);

        assert_eq!(channel.name, "Tank_001B");
        assert_eq!(channel.fields.len(), 3);
        assert_eq!(channel.api_key, "key_tank001_xyz789");
    }

    #[test]
    fn test_patch_replaces_fields_wholesale() {
        let mut channel = sample_channel();
        let patch = ChannelPatch::with_fields(vec![FieldSpec::new("ph", FieldKind::Numeric)]);
        patch.apply(&mut channel);

        assert_eq!(channel.fields.len(), 1);
        assert_eq!(channel.fields[0].name, "ph");
    }

    #[test]
    fn test_channel_serialization() {
        let channel = sample_channel();
        let json = serde_json::to_string(&channel).unwrap();
        let deserialized: Channel = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, channel);
    }
}
