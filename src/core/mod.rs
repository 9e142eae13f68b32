//! Core registry types, errors and shared constants

pub mod constants;
mod error;
mod store;

pub use error::{Result, StoreError};
pub use store::{ChannelStore, StoreEvent};
