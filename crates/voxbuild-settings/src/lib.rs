//! VoxBuild Settings Crate
//!
//! Loads, validates and persists the application configuration.

pub mod config;
pub mod error;

pub use config::{Config, OutputSettings, PlanningSettings, WorkloadSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
