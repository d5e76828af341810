//! Boltslot Settings Crate
//!
//! Loads, validates and saves the configuration of a boltslot run.

pub mod config;
pub mod error;

pub use config::{AdjustmentSettings, Config, OutputSettings, PathSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
