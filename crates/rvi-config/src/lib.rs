//! Configuration management for the RVI viewer.
//!
//! Parses `rvi.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Host settings
//! can be applied after load via [`ViewerSettings`].
//!
//! ```toml
//! [viewer]
//! render_blocks = "auto"   # "auto" | "on" | "off"
//! breakpoint = 768         # px; inline presentation at/above
//! animate = true           # one-shot attention highlight
//! ```
//!
//! Configuration loading runs at host startup and is the only surface
//! of the pipeline allowed to return errors; message rendering itself
//! never fails.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "rvi.toml";

/// Default viewport breakpoint in pixels.
const DEFAULT_BREAKPOINT: u32 = 768;

/// Tri-state render preference.
///
/// `Auto` is the persisted default and currently resolves to on; the
/// explicit states override it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderPreference {
    /// Follow the default (render).
    #[default]
    Auto,
    /// Always render.
    On,
    /// Never render; stale content is removed.
    Off,
}

impl RenderPreference {
    /// Resolve the tri-state to a concrete decision.
    #[must_use]
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }
}

/// Host settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded
/// config.
#[derive(Debug, Default)]
pub struct ViewerSettings {
    /// Override the render preference.
    pub render_blocks: Option<RenderPreference>,
    /// Override the viewport breakpoint.
    pub breakpoint: Option<u32>,
    /// Override the animation switch.
    pub animate: Option<bool>,
}

/// Viewer configuration.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ViewerConfig {
    /// Tri-state render preference.
    pub render_blocks: RenderPreference,
    /// Viewport width (px) at or above which blocks render inline.
    pub breakpoint: u32,
    /// Whether the first attach applies the attention highlight.
    pub animate: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            render_blocks: RenderPreference::Auto,
            breakpoint: DEFAULT_BREAKPOINT,
            animate: true,
        }
    }
}

/// Top-level `rvi.toml` shape.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    viewer: ViewerConfig,
}

/// Error loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading the config file.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Malformed TOML.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// Path that failed to parse.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

impl ViewerConfig {
    /// Parse configuration from TOML content.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(file.viewer)
    }

    /// Load configuration from a specific file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Discover and load `rvi.toml`, walking parent directories from
    /// `start_dir`. Falls back to defaults when no file is found.
    pub fn discover(start_dir: &Path) -> Result<Self, ConfigError> {
        let mut dir = Some(start_dir);
        while let Some(current) = dir {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Self::load(&candidate);
            }
            dir = current.parent();
        }
        Ok(Self::default())
    }

    /// Apply host overrides on top of the loaded values.
    #[must_use]
    pub fn with_settings(mut self, settings: &ViewerSettings) -> Self {
        if let Some(render_blocks) = settings.render_blocks {
            self.render_blocks = render_blocks;
        }
        if let Some(breakpoint) = settings.breakpoint {
            self.breakpoint = breakpoint;
        }
        if let Some(animate) = settings.animate {
            self.animate = animate;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.render_blocks, RenderPreference::Auto);
        assert_eq!(config.breakpoint, 768);
        assert!(config.animate);
    }

    #[test]
    fn test_parse_full_file() {
        let content = r#"
[viewer]
render_blocks = "off"
breakpoint = 1024
animate = false
"#;
        let config = ViewerConfig::from_toml(content, Path::new("rvi.toml")).unwrap();
        assert_eq!(config.render_blocks, RenderPreference::Off);
        assert_eq!(config.breakpoint, 1024);
        assert!(!config.animate);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config =
            ViewerConfig::from_toml("[viewer]\nrender_blocks = \"on\"\n", Path::new("rvi.toml"))
                .unwrap();
        assert_eq!(config.render_blocks, RenderPreference::On);
        assert_eq!(config.breakpoint, 768);
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = ViewerConfig::from_toml("", Path::new("rvi.toml")).unwrap();
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn test_malformed_toml_errors() {
        let err = ViewerConfig::from_toml("[viewer\nbad", Path::new("rvi.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_preference_resolution() {
        assert!(RenderPreference::Auto.is_enabled());
        assert!(RenderPreference::On.is_enabled());
        assert!(!RenderPreference::Off.is_enabled());
    }

    #[test]
    fn test_settings_override() {
        let config = ViewerConfig::default().with_settings(&ViewerSettings {
            render_blocks: Some(RenderPreference::Off),
            breakpoint: None,
            animate: Some(false),
        });
        assert_eq!(config.render_blocks, RenderPreference::Off);
        assert_eq!(config.breakpoint, 768);
        assert!(!config.animate);
    }

    #[test]
    fn test_discover_in_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILENAME),
            "[viewer]\nbreakpoint = 600\n",
        )
        .unwrap();

        let config = ViewerConfig::discover(&nested).unwrap();
        assert_eq!(config.breakpoint, 600);
    }

    #[test]
    fn test_discover_without_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ViewerConfig::discover(dir.path()).unwrap();
        assert_eq!(config, ViewerConfig::default());
    }
}
