//! tankmon: a channel-based IoT monitoring core with simulated telemetry
//!
//! This library provides the core functionality for tankmon, including:
//! - The channel registry (create, update, delete, filtered listing)
//! - Editors for channel field schemas and dashboard widgets
//! - A ref-counted live-data manager producing synthetic samples
//! - User directory with the demo login flow
//! - Configuration management

pub mod config;
pub mod core;
pub mod editor;
pub mod telemetry;
pub mod users;

// Re-export commonly used types
pub use config::AppConfig;
pub use core::{ChannelStore, StoreError, StoreEvent};
pub use editor::{FieldSchemaEditor, WidgetConfigurator};
pub use telemetry::LiveDataManager;
pub use users::{LoginOutcome, UserDirectory};
