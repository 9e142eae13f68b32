//! Widget configurator - attaches, reorders and reconfigures dashboard
//! widgets on a channel.
//!
//! Unlike the field editor there is no staging: every operation rewrites the
//! channel's widget list and commits it through the registry immediately.

use crate::core::{ChannelStore, Result, StoreError};
use chrono::Utc;
use log::{debug, info};
use tankmon_types::{
    Channel, ChannelId, ChannelPatch, MoveDirection, Widget, WidgetConfig, WidgetConfigPatch,
    WidgetId, WidgetKind,
};

/// Configures the widget list of one channel
pub struct WidgetConfigurator {
    channel_id: ChannelId,
}

impl WidgetConfigurator {
    pub fn new(channel_id: ChannelId) -> Self {
        Self { channel_id }
    }

    pub fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    /// Default configuration for a widget kind, before the user touches it
    pub fn defaults_for(kind: WidgetKind) -> WidgetConfig {
        WidgetConfig::default_for_kind(kind)
    }

    /// Attach a new widget.
    ///
    /// The patch's kind selects the widget kind; its settings are merged
    /// onto that kind's defaults. The merged config must bind a numeric
    /// field of the channel, otherwise nothing is committed.
    pub fn add_widget(&self, store: &ChannelStore, overrides: WidgetConfigPatch) -> Result<Widget> {
        let channel = self.channel(store)?;

        let mut config = WidgetConfig::default_for_kind(overrides.kind());
        overrides.apply(&mut config);
        validate_field_binding(&channel, &config)?;

        let widget = Widget::new(next_widget_id(&channel), config);
        info!(
            "Adding {} widget {} to channel {}",
            widget.kind(),
            widget.id,
            self.channel_id
        );

        let mut widgets = channel.widgets;
        widgets.push(widget.clone());
        store.update(self.channel_id, ChannelPatch::with_widgets(widgets))?;
        Ok(widget)
    }

    /// Detach a widget. An unknown id commits the unchanged list, so
    /// repeated removals are silent no-ops.
    pub fn remove_widget(&self, store: &ChannelStore, id: WidgetId) -> Result<()> {
        let channel = self.channel(store)?;

        let mut widgets = channel.widgets;
        widgets.retain(|w| w.id != id);
        debug!("Removing widget {} from channel {}", id, self.channel_id);
        store.update(self.channel_id, ChannelPatch::with_widgets(widgets))
    }

    /// Swap a widget with its neighbour in the given direction.
    ///
    /// Moving the first widget up or the last one down is a no-op, as is an
    /// unknown id; the list is only committed when the order changed.
    pub fn move_widget(
        &self,
        store: &ChannelStore,
        id: WidgetId,
        direction: MoveDirection,
    ) -> Result<()> {
        let channel = self.channel(store)?;

        let mut widgets = channel.widgets;
        let Some(index) = widgets.iter().position(|w| w.id == id) else {
            return Ok(());
        };
        let neighbour = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < widgets.len() => index + 1,
            _ => return Ok(()),
        };

        widgets.swap(index, neighbour);
        debug!(
            "Moved widget {} to slot {} on channel {}",
            id, neighbour, self.channel_id
        );
        store.update(self.channel_id, ChannelPatch::with_widgets(widgets))
    }

    /// Merge a partial configuration into one widget.
    ///
    /// The patch must carry the widget's own kind; a field rebinding is
    /// validated against the channel's numeric fields before anything is
    /// committed.
    pub fn reconfigure(
        &self,
        store: &ChannelStore,
        id: WidgetId,
        patch: WidgetConfigPatch,
    ) -> Result<()> {
        let channel = self.channel(store)?;

        let mut widgets = channel.widgets.clone();
        let widget = widgets
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(StoreError::WidgetNotFound(id))?;

        if widget.kind() != patch.kind() {
            return Err(StoreError::WidgetKindMismatch {
                id,
                actual: widget.kind(),
                requested: patch.kind(),
            });
        }
        if let Some(field) = patch.field() {
            if !channel.has_numeric_field(field) {
                return Err(StoreError::FieldNotNumeric {
                    channel: channel.name.clone(),
                    field: field.to_string(),
                });
            }
        }

        patch.apply(&mut widget.config);
        debug!("Reconfigured widget {} on channel {}", id, self.channel_id);
        store.update(self.channel_id, ChannelPatch::with_widgets(widgets))
    }

    fn channel(&self, store: &ChannelStore) -> Result<Channel> {
        store
            .get(self.channel_id)
            .ok_or(StoreError::ChannelNotFound(self.channel_id))
    }
}

/// Reject configs that do not bind an existing numeric field
fn validate_field_binding(channel: &Channel, config: &WidgetConfig) -> Result<()> {
    let field = config.field();
    if field.is_empty() {
        return Err(StoreError::NoFieldSelected);
    }
    if !channel.has_numeric_field(field) {
        return Err(StoreError::FieldNotNumeric {
            channel: channel.name.clone(),
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Creation-time id in milliseconds, bumped past the channel's existing ids
/// so interactive same-millisecond additions stay unique.
fn next_widget_id(channel: &Channel) -> WidgetId {
    let now = Utc::now().timestamp_millis();
    let max_existing = channel.widgets.iter().map(|w| w.id.0).max().unwrap_or(0);
    WidgetId(now.max(max_existing + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tankmon_types::{
        BarWidgetPatch, ChartType, ChartWidgetPatch, FieldSpec, NumericWidgetPatch,
    };

    fn chart_patch(field: &str) -> WidgetConfigPatch {
        WidgetConfigPatch::Chart(ChartWidgetPatch {
            field: Some(field.to_string()),
            ..Default::default()
        })
    }

    fn store_with_channel() -> (ChannelStore, ChannelId) {
        let store = ChannelStore::new();
        let channel = store
            .create(
                "Tank_003",
                vec![
                    FieldSpec::numeric("temperature", 23.5),
                    FieldSpec::text("status", "ok"),
                ],
                Vec::new(),
            )
            .unwrap();
        (store, channel.id)
    }

    #[test]
    fn test_add_widget_merges_defaults() {
        let (store, id) = store_with_channel();
        let configurator = WidgetConfigurator::new(id);

        let widget = configurator
            .add_widget(&store, chart_patch("temperature"))
            .unwrap();

        assert_eq!(widget.kind(), WidgetKind::Chart);
        assert_eq!(widget.config.field(), "temperature");
        match &widget.config {
            WidgetConfig::Chart(cfg) => {
                assert_eq!(cfg.chart_type, ChartType::Line);
                assert_eq!(cfg.x_axis_label, "Time");
            }
            other => panic!("expected chart config, got {:?}", other),
        }

        let channel = store.get(id).unwrap();
        assert_eq!(channel.widgets.len(), 1);
        assert_eq!(channel.widgets[0], widget);
    }

    #[test]
    fn test_add_widget_requires_field() {
        let (store, id) = store_with_channel();
        let configurator = WidgetConfigurator::new(id);

        let result = configurator.add_widget(
            &store,
            WidgetConfigPatch::Numeric(NumericWidgetPatch::default()),
        );

        assert_eq!(result.unwrap_err(), StoreError::NoFieldSelected);
        assert!(store.get(id).unwrap().widgets.is_empty());
    }

    #[test]
    fn test_add_widget_rejects_non_numeric_field() {
        let (store, id) = store_with_channel();
        let configurator = WidgetConfigurator::new(id);

        let result = configurator.add_widget(&store, chart_patch("status"));
        assert!(matches!(
            result.unwrap_err(),
            StoreError::FieldNotNumeric { .. }
        ));

        let result = configurator.add_widget(&store, chart_patch("missing"));
        assert!(matches!(
            result.unwrap_err(),
            StoreError::FieldNotNumeric { .. }
        ));
    }

    #[test]
    fn test_widget_ids_unique_within_channel() {
        let (store, id) = store_with_channel();
        let configurator = WidgetConfigurator::new(id);

        let first = configurator
            .add_widget(&store, chart_patch("temperature"))
            .unwrap();
        let second = configurator
            .add_widget(&store, chart_patch("temperature"))
            .unwrap();
        let third = configurator
            .add_widget(&store, chart_patch("temperature"))
            .unwrap();

        assert!(second.id > first.id);
        assert!(third.id > second.id);
    }

    #[test]
    fn test_remove_widget_is_idempotent() {
        let (store, id) = store_with_channel();
        let configurator = WidgetConfigurator::new(id);
        let widget = configurator
            .add_widget(&store, chart_patch("temperature"))
            .unwrap();

        configurator.remove_widget(&store, widget.id).unwrap();
        assert!(store.get(id).unwrap().widgets.is_empty());

        configurator.remove_widget(&store, widget.id).unwrap();
        assert!(store.get(id).unwrap().widgets.is_empty());
    }

    #[test]
    fn test_move_widget_boundaries_are_noops() {
        let (store, id) = store_with_channel();
        let configurator = WidgetConfigurator::new(id);
        let first = configurator
            .add_widget(&store, chart_patch("temperature"))
            .unwrap();
        let second = configurator
            .add_widget(&store, chart_patch("temperature"))
            .unwrap();

        configurator
            .move_widget(&store, first.id, MoveDirection::Up)
            .unwrap();
        configurator
            .move_widget(&store, second.id, MoveDirection::Down)
            .unwrap();

        let order: Vec<WidgetId> = store.get(id).unwrap().widgets.iter().map(|w| w.id).collect();
        assert_eq!(order, vec![first.id, second.id]);
    }

    #[test]
    fn test_move_widget_swaps_neighbours() {
        let (store, id) = store_with_channel();
        let configurator = WidgetConfigurator::new(id);
        let first = configurator
            .add_widget(&store, chart_patch("temperature"))
            .unwrap();
        let second = configurator
            .add_widget(&store, chart_patch("temperature"))
            .unwrap();

        configurator
            .move_widget(&store, second.id, MoveDirection::Up)
            .unwrap();

        let order: Vec<WidgetId> = store.get(id).unwrap().widgets.iter().map(|w| w.id).collect();
        assert_eq!(order, vec![second.id, first.id]);
    }

    #[test]
    fn test_move_unknown_widget_is_noop() {
        let (store, id) = store_with_channel();
        let configurator = WidgetConfigurator::new(id);
        let widget = configurator
            .add_widget(&store, chart_patch("temperature"))
            .unwrap();

        configurator
            .move_widget(&store, WidgetId(1), MoveDirection::Down)
            .unwrap();

        assert_eq!(store.get(id).unwrap().widgets, vec![widget]);
    }

    #[test]
    fn test_reconfigure_merges_partial_config() {
        let (store, id) = store_with_channel();
        let configurator = WidgetConfigurator::new(id);
        let widget = configurator
            .add_widget(&store, chart_patch("temperature"))
            .unwrap();

        configurator
            .reconfigure(
                &store,
                widget.id,
                WidgetConfigPatch::Chart(ChartWidgetPatch {
                    chart_type: Some(ChartType::Area),
                    title: Some("Temperature Over Time".to_string()),
                    ..Default::default()
                }),
            )
            .unwrap();

        let channel = store.get(id).unwrap();
        match &channel.widget(widget.id).unwrap().config {
            WidgetConfig::Chart(cfg) => {
                assert_eq!(cfg.chart_type, ChartType::Area);
                assert_eq!(cfg.title, "Temperature Over Time");
                assert_eq!(cfg.field, "temperature");
            }
            other => panic!("expected chart config, got {:?}", other),
        }
    }

    #[test]
    fn test_reconfigure_rejects_kind_mismatch() {
        let (store, id) = store_with_channel();
        let configurator = WidgetConfigurator::new(id);
        let widget = configurator
            .add_widget(&store, chart_patch("temperature"))
            .unwrap();

        let result = configurator.reconfigure(
            &store,
            widget.id,
            WidgetConfigPatch::Bar(BarWidgetPatch::default()),
        );

        assert_eq!(
            result.unwrap_err(),
            StoreError::WidgetKindMismatch {
                id: widget.id,
                actual: WidgetKind::Chart,
                requested: WidgetKind::Bar,
            }
        );
    }

    #[test]
    fn test_reconfigure_validates_field_rebinding() {
        let (store, id) = store_with_channel();
        let configurator = WidgetConfigurator::new(id);
        let widget = configurator
            .add_widget(&store, chart_patch("temperature"))
            .unwrap();

        let result = configurator.reconfigure(&store, widget.id, chart_patch("status"));
        assert!(matches!(
            result.unwrap_err(),
            StoreError::FieldNotNumeric { .. }
        ));

        let channel = store.get(id).unwrap();
        assert_eq!(channel.widget(widget.id).unwrap().config.field(), "temperature");
    }

    #[test]
    fn test_channel_lifecycle_end_to_end() {
        let store = ChannelStore::new();
        let channel = store
            .create(
                "Tank_003",
                vec![FieldSpec::numeric("temperature", 0.0)],
                Vec::new(),
            )
            .unwrap();
        assert_eq!(channel.fields.len(), 1);
        assert!(channel.widgets.is_empty());
        assert!(!channel.api_key.is_empty());
        assert_eq!(store.list().len(), 1);

        let configurator = WidgetConfigurator::new(channel.id);
        let widget = configurator
            .add_widget(&store, chart_patch("temperature"))
            .unwrap();
        let current = store.get(channel.id).unwrap();
        assert_eq!(current.widgets.len(), 1);
        assert_eq!(current.widgets[0].kind(), WidgetKind::Chart);
        assert_eq!(current.widgets[0].config.field(), "temperature");

        // Moving the only widget is a boundary no-op
        configurator
            .move_widget(&store, widget.id, MoveDirection::Up)
            .unwrap();
        assert_eq!(store.get(channel.id).unwrap().widgets, current.widgets);

        assert!(store.delete(channel.id));
        assert!(store.list().is_empty());
        assert!(!store.delete(channel.id));
    }

    #[test]
    fn test_reconfigure_unknown_widget_fails() {
        let (store, id) = store_with_channel();
        let configurator = WidgetConfigurator::new(id);

        let result = configurator.reconfigure(&store, WidgetId(99), chart_patch("temperature"));
        assert_eq!(result.unwrap_err(), StoreError::WidgetNotFound(WidgetId(99)));
    }
}
