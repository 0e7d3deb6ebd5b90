//! TOML-based configuration for the `actions-replay` binary.
//!
//! The file describes the surface that replayed actions are dispatched
//! against: how large the viewport is, how the platform treats Ctrl + click,
//! which log level to use, and the client rects of any elements that
//! payloads refer to as origins.
//!
//! ```toml
//! [viewport]
//! width = 1280
//! height = 720
//!
//! [platform]
//! ctrl_click_is_secondary = false
//!
//! [logging]
//! level = "info"
//!
//! [[elements]]
//! id = "submit-button"
//! rects = [{ x = 100.0, y = 200.0, width = 80.0, height = 24.0 }]
//! ```
//!
//! # Serde default values
//!
//! Every field has a `#[serde(default = ...)]` so an empty file, a partial
//! file, or no file at all yields a working configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use actions_core::{Rect, Viewport};

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level engine configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub platform: PlatformConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Elements that payloads may use as an origin.
    #[serde(default)]
    pub elements: Vec<ElementEntry>,
}

/// Size of the headless viewport in CSS pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewportConfig {
    #[serde(default = "default_viewport_width")]
    pub width: u32,
    #[serde(default = "default_viewport_height")]
    pub height: u32,
}

/// Platform-dependent dispatch behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformConfig {
    /// Whether Ctrl + primary click is reported as a secondary click.
    #[serde(default = "default_ctrl_click_is_secondary")]
    pub ctrl_click_is_secondary: bool,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Geometry of one element known to the headless surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementEntry {
    /// Web element reference as it appears in payloads.
    pub id: String,
    /// Client rects; an empty list means the element is not displayed.
    #[serde(default)]
    pub rects: Vec<Rect>,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_viewport_width() -> u32 {
    1280
}
fn default_viewport_height() -> u32 {
    720
}
fn default_ctrl_click_is_secondary() -> bool {
    cfg!(target_os = "macos")
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            platform: PlatformConfig::default(),
            logging: LoggingConfig::default(),
            elements: Vec::new(),
        }
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_viewport_width(),
            height: default_viewport_height(),
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            ctrl_click_is_secondary: default_ctrl_click_is_secondary(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ViewportConfig {
    pub fn to_viewport(&self) -> Viewport {
        Viewport::new(f64::from(self.width), f64::from(self.height))
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Loads `EngineConfig` from `path`, returning the default configuration if
/// the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let cfg: EngineConfig = toml::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(EngineConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Persists `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(config: &EngineConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("actions_engine_test_{}_{name}", std::process::id()))
            .join("engine.toml")
    }

    // ── Defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_engine_config_default_viewport_is_1280_by_720() {
        // Arrange / Act
        let cfg = EngineConfig::default();

        // Assert
        assert_eq!(cfg.viewport.width, 1280);
        assert_eq!(cfg.viewport.height, 720);
        assert_eq!(cfg.viewport.to_viewport(), Viewport::new(1280.0, 720.0));
    }

    #[test]
    fn test_engine_config_default_log_level_is_info() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_engine_config_default_has_no_elements() {
        let cfg = EngineConfig::default();
        assert!(cfg.elements.is_empty());
    }

    // ── TOML parsing ──────────────────────────────────────────────────────────

    #[test]
    fn test_empty_toml_uses_defaults() {
        // Arrange / Act
        let cfg: EngineConfig = toml::from_str("").expect("deserialize empty");

        // Assert
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn test_partial_viewport_overrides_defaults() {
        // Arrange
        let toml_str = r#"
[viewport]
width = 800
"#;

        // Act
        let cfg: EngineConfig = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(cfg.viewport.width, 800);
        // Unspecified fields keep their defaults
        assert_eq!(cfg.viewport.height, 720);
    }

    #[test]
    fn test_elements_with_rects_deserialize() {
        let toml_str = r#"
[[elements]]
id = "button"
rects = [{ x = 10.0, y = 20.0, width = 30.0, height = 40.0 }]

[[elements]]
id = "hidden"
"#;

        let cfg: EngineConfig = toml::from_str(toml_str).expect("deserialize elements");

        assert_eq!(cfg.elements.len(), 2);
        assert_eq!(cfg.elements[0].rects, vec![Rect::new(10.0, 20.0, 30.0, 40.0)]);
        assert!(cfg.elements[1].rects.is_empty());
    }

    #[test]
    fn test_invalid_toml_returns_parse_error() {
        let path = temp_config_path("invalid");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[[[ not valid toml").unwrap();

        let result = load_config(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    // ── load_config / save_config ─────────────────────────────────────────────

    #[test]
    fn test_load_config_returns_default_when_file_absent() {
        // Arrange
        let path = PathBuf::from("/nonexistent/path/that/cannot/exist/engine.toml");

        // Act
        let cfg = load_config(&path).expect("missing file falls back to defaults");

        // Assert
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn test_save_and_load_config_round_trip_via_temp_dir() {
        // Arrange
        let path = temp_config_path("round_trip");
        let mut cfg = EngineConfig::default();
        cfg.viewport.width = 1920;
        cfg.platform.ctrl_click_is_secondary = true;
        cfg.elements.push(ElementEntry {
            id: "target".to_string(),
            rects: vec![Rect::new(0.0, 0.0, 50.0, 50.0)],
        });

        // Act
        save_config(&cfg, &path).expect("save");
        let restored = load_config(&path).expect("load");

        // Assert
        assert_eq!(cfg, restored);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
