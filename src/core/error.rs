//! Error types for registry and editor operations

use tankmon_types::{ChannelId, WidgetId, WidgetKind};
use thiserror::Error;

/// Errors surfaced by the channel registry and the editors.
///
/// These are all recoverable validation failures; the registry itself is
/// left unchanged whenever one is returned.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("channel name must not be empty")]
    EmptyChannelName,

    #[error("a channel needs at least one named field")]
    NoFields,

    #[error("channel {0} not found")]
    ChannelNotFound(ChannelId),

    #[error("widget {0} not found")]
    WidgetNotFound(WidgetId),

    #[error("no field selected for the widget")]
    NoFieldSelected,

    #[error("'{field}' is not a numeric field of channel '{channel}'")]
    FieldNotNumeric { channel: String, field: String },

    #[error("widget {id} is a {actual} widget, not {requested}")]
    WidgetKindMismatch {
        id: WidgetId,
        actual: WidgetKind,
        requested: WidgetKind,
    },

    #[error("registry lock poisoned")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, StoreError>;
