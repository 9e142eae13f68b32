//! Configuration management

mod defaults;
mod settings;

pub use defaults::{seed_channels, seed_users};
pub use settings::{AppConfig, RefreshConfig, SeedConfig};
