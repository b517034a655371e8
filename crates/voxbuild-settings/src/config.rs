//! Configuration for VoxBuild
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML files; the default location is inside the platform config directory.
//!
//! Configuration is organized into sections:
//! - Workload settings (worker count, depth splits, balancing weight)
//! - Planning settings (tour strategy, 2-opt topology, parallelism)
//! - Output settings (export format, table name)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use voxbuild_core::{
    ExportFormat, PlanOptions, TourStrategy, TourTopology, WorkloadWeighting,
};

const APP_DIR: &str = "voxbuild";
const CONFIG_FILE: &str = "config.toml";

/// How work is divided between workers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadSettings {
    /// Total number of workers
    pub workers: usize,
    /// Depth ranges per worker column; unset keeps full-depth columns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth_splits: Option<usize>,
    /// Which voxels are counted when balancing
    pub weighting: WorkloadWeighting,
}

impl Default for WorkloadSettings {
    fn default() -> Self {
        Self {
            workers: 1,
            depth_splits: None,
            weighting: WorkloadWeighting::default(),
        }
    }
}

/// How each layer's tour is planned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningSettings {
    pub strategy: TourStrategy,
    pub topology: TourTopology,
    /// Plan layers concurrently
    pub parallel: bool,
}

impl Default for PlanningSettings {
    fn default() -> Self {
        Self {
            strategy: TourStrategy::default(),
            topology: TourTopology::default(),
            parallel: true,
        }
    }
}

/// How the finished plan is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: ExportFormat,
    /// Name the literal table is bound to
    pub table_name: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            table_name: "data".to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub workload: WorkloadSettings,
    pub planning: PlanningSettings,
    pub output: OutputSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )
        .into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config_dir>/voxbuild/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
        })?;
        Ok(dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| SettingsError::LoadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, otherwise the default file if it exists,
    /// otherwise the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }
        match Self::default_path() {
            Ok(default) if default.is_file() => Self::load_from_file(&default),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => self.to_toml()?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| SettingsError::SaveError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn to_toml(&self) -> SettingsResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.workload.workers == 0 {
            return Err(SettingsError::invalid("workload.workers", "must be > 0"));
        }

        if let Some(depth) = self.workload.depth_splits {
            if depth == 0 {
                return Err(SettingsError::invalid("workload.depth_splits", "must be > 0"));
            }
            if self.workload.workers % depth != 0 {
                return Err(SettingsError::invalid(
                    "workload.depth_splits",
                    format!("{} does not divide {} workers", depth, self.workload.workers),
                ));
            }
        }

        let name = &self.output.table_name;
        let valid_name = name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid_name {
            return Err(SettingsError::invalid(
                "output.table_name",
                format!("'{}' is not an identifier", name),
            ));
        }

        Ok(())
    }

    /// Options for the build plan assembler.
    pub fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            workers: self.workload.workers,
            depth_splits: self.workload.depth_splits,
            weighting: self.workload.weighting,
            strategy: self.planning.strategy,
            topology: self.planning.topology,
            parallel: self.planning.parallel,
        }
    }
}
