//! Ambient, environment-supplied defaults for the runtime: named-block GC
//! behavior, the default smoothing transition, default DPI, and scheduler
//! capacity hints. Nothing here touches the data graph, signals, or layout
//! directly — [`RuntimeConfig`] is a plain struct that a host hands to
//! `rui-system` at startup; this crate itself never reads a file path or an
//! environment variable on its own (`from_path` takes a path the host
//! already resolved).

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct GcConfig {
    /// Whether named-block garbage collection runs after each traversal.
    /// Disabling it requires the controller to visit named blocks in a
    /// stable order (out-of-order visitation becomes a traversal error).
    pub enabled: bool,
}

impl Default for GcConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Mirrors `rui_signal::Transition` without depending on `rui-signal`; the
/// host (or `rui-system`) converts this into the real type.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SmoothingConfig {
    pub duration_ms: u32,
    pub curve: [f64; 4],
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            duration_ms: 300,
            curve: [0.25, 0.1, 0.25, 1.0],
        }
    }
}

/// Default per-axis pixels-per-inch used when a host doesn't supply its
/// own measured DPI.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct DpiConfig {
    pub x: f32,
    pub y: f32,
}

impl Default for DpiConfig {
    fn default() -> Self {
        Self { x: 96.0, y: 96.0 }
    }
}

/// Initial capacity hints for the system scheduler's ready/scheduled
/// callback queues — sizing only, never a hard limit.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct SchedulerConfig {
    pub ready_capacity_hint: usize,
    pub scheduled_capacity_hint: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            ready_capacity_hint: 16,
            scheduled_capacity_hint: 16,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct RuntimeConfig {
    pub gc: GcConfig,
    pub smoothing: SmoothingConfig,
    pub dpi: DpiConfig,
    pub scheduler: SchedulerConfig,
}

impl RuntimeConfig {
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        debug!(target: "rui_config::load", ?config, "runtime config parsed");
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_gc_enabled() {
        let config = RuntimeConfig::default();
        assert!(config.gc.enabled);
        assert_eq!(config.smoothing.duration_ms, 300);
        assert_eq!(config.dpi, DpiConfig { x: 96.0, y: 96.0 });
    }

    #[test]
    fn partial_toml_fills_remaining_defaults() {
        let config = RuntimeConfig::from_str("[gc]\nenabled = false\n").unwrap();
        assert!(!config.gc.enabled);
        assert_eq!(config.scheduler.ready_capacity_hint, 16);
    }

    #[test]
    fn parses_every_section() {
        let toml = r#"
            [gc]
            enabled = false

            [smoothing]
            duration_ms = 150
            curve = [0.1, 0.2, 0.3, 0.4]

            [dpi]
            x = 120.0
            y = 144.0

            [scheduler]
            ready_capacity_hint = 4
            scheduled_capacity_hint = 8
        "#;
        let config = RuntimeConfig::from_str(toml).unwrap();
        assert_eq!(
            config,
            RuntimeConfig {
                gc: GcConfig { enabled: false },
                smoothing: SmoothingConfig { duration_ms: 150, curve: [0.1, 0.2, 0.3, 0.4] },
                dpi: DpiConfig { x: 120.0, y: 144.0 },
                scheduler: SchedulerConfig { ready_capacity_hint: 4, scheduled_capacity_hint: 8 },
            }
        );
    }

    #[test]
    fn from_path_reads_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[dpi]\nx = 72.0\ny = 72.0\n").unwrap();
        let config = RuntimeConfig::from_path(tmp.path()).unwrap();
        assert_eq!(config.dpi, DpiConfig { x: 72.0, y: 72.0 });
    }

    #[test]
    fn from_path_missing_file_errors() {
        let err = RuntimeConfig::from_path("__nonexistent_rui_config__.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn invalid_toml_errors() {
        let err = RuntimeConfig::from_str("not valid toml [[[").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
