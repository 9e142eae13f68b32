//! Staged editor for a channel's field schema.
//!
//! Edits accumulate on a working copy of the field list; nothing reaches the
//! registry until `commit`, which replaces the channel's schema atomically.

use crate::core::{ChannelStore, Result, StoreError};
use log::debug;
use tankmon_types::{Channel, ChannelId, ChannelPatch, FieldKind, FieldPatch, FieldSpec};

/// Working copy of one channel's field list
pub struct FieldSchemaEditor {
    channel_id: ChannelId,
    fields: Vec<FieldSpec>,
}

impl FieldSchemaEditor {
    /// Start editing from the channel's current schema
    pub fn for_channel(channel: &Channel) -> Self {
        Self {
            channel_id: channel.id,
            fields: channel.fields.clone(),
        }
    }

    pub fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    /// Staged schema, for rendering the edit form
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Append a blank numeric field for the user to fill in
    pub fn add_field(&mut self) {
        self.fields.push(FieldSpec::new("", FieldKind::Numeric));
    }

    /// Merge a partial edit into the field at `index`.
    ///
    /// A kind change resets the staged value to the new kind's zero value,
    /// even when the same patch carries a value (see `FieldPatch::apply`).
    /// Out-of-range indices are ignored.
    pub fn update_field(&mut self, index: usize, patch: FieldPatch) {
        if let Some(field) = self.fields.get_mut(index) {
            patch.apply(field);
        }
    }

    /// Remove the field at `index`. A channel keeps at least one field, so
    /// removing the last remaining field returns false and changes nothing.
    pub fn remove_field(&mut self, index: usize) -> bool {
        if self.fields.len() <= 1 || index >= self.fields.len() {
            return false;
        }
        self.fields.remove(index);
        true
    }

    /// Commit the staged schema to the registry.
    ///
    /// Names are trimmed and blank-named fields dropped; the commit is
    /// refused if nothing survives. On success the channel's field list is
    /// replaced wholesale.
    pub fn commit(&self, store: &ChannelStore) -> Result<()> {
        let fields: Vec<FieldSpec> = self
            .fields
            .iter()
            .filter(|f| !f.name.trim().is_empty())
            .map(|f| FieldSpec {
                name: f.name.trim().to_string(),
                kind: f.kind,
                initial: f.initial.clone(),
            })
            .collect();
        if fields.is_empty() {
            return Err(StoreError::NoFields);
        }
        debug!(
            "Committing {} fields to channel {}",
            fields.len(),
            self.channel_id
        );
        store.update(self.channel_id, ChannelPatch::with_fields(fields))
    }
}
