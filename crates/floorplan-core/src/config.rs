//! Designer configuration.

use crate::schedule::DEFAULT_DEBOUNCE_MS;
use crate::scene::DEFAULT_ITEM_POSITION;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Smallest grid spacing, in pixels, a config may request.
pub const MIN_GRID_SPACING: f64 = 1.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Canvas and timing settings. Every field has a default, so a config file
/// only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignerConfig {
    /// Canvas width in pixels.
    pub canvas_width: u32,
    /// Canvas height in pixels.
    pub canvas_height: u32,
    /// Distance between grid lines.
    pub grid_spacing: f64,
    pub grid_color: String,
    pub background_color: String,
    /// Outline color of the selected item in the interactive view.
    pub selection_color: String,
    /// Quiet period before a snapshot is exported.
    pub debounce_ms: u64,
    /// Where newly added items are placed.
    pub default_position: Point,
}

impl Default for DesignerConfig {
    fn default() -> Self {
        Self {
            canvas_width: 400,
            canvas_height: 300,
            grid_spacing: 40.0,
            grid_color: "#e5e7eb".to_string(),
            background_color: "#fafaf9".to_string(),
            selection_color: "#10b981".to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            default_position: DEFAULT_ITEM_POSITION,
        }
    }
}

impl DesignerConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("loaded designer config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if !self.grid_spacing.is_finite() || self.grid_spacing < MIN_GRID_SPACING {
            return Err(ConfigError::Invalid(format!(
                "grid_spacing must be at least {MIN_GRID_SPACING} px, got {}",
                self.grid_spacing
            )));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DesignerConfig::default();
        assert_eq!((config.canvas_width, config.canvas_height), (400, 300));
        assert_eq!(config.debounce(), Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DesignerConfig::from_json(r#"{"debounce_ms": 250}"#).unwrap();
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.canvas_width, 400);
        assert_eq!(config.grid_color, "#e5e7eb");
    }

    #[test]
    fn test_rejects_empty_canvas() {
        let err = DesignerConfig::from_json(r#"{"canvas_width": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_tiny_grid_spacing() {
        for json in [
            r#"{"grid_spacing": 1e-50}"#,
            r#"{"grid_spacing": 0.5}"#,
            r#"{"grid_spacing": 0}"#,
            r#"{"grid_spacing": -40}"#,
        ] {
            let err = DesignerConfig::from_json(json).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{json}");
        }
    }

    #[test]
    fn test_accepts_fractional_grid_spacing() {
        let config = DesignerConfig::from_json(r#"{"grid_spacing": 12.5}"#).unwrap();
        assert!((config.grid_spacing - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = DesignerConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"canvas_width": 800, "default_position": {{"x": 5.0, "y": 6.0}}}}"#)
            .unwrap();

        let config = DesignerConfig::load(file.path()).unwrap();
        assert_eq!(config.canvas_width, 800);
        assert_eq!(config.default_position, Point::new(5.0, 6.0));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DesignerConfig::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
