#![forbid(unsafe_code)]

//! Runtime configuration loaded from TOML or JSON.
//!
//! ```toml
//! # waypoint.toml
//! [display]
//! base_width = 1920
//! base_height = 1080
//! whitelist = ["TabletLandscape", "DesktopLandscape"]
//! orientation_lock = "landscape"
//!
//! [tutorial]
//! auto_start_delay_ms = 500
//!
//! [highlight]
//! transparency = 0.5
//! ```
//!
//! Every field has a default, so an empty file is a valid configuration
//! equal to [`WaypointConfig::default()`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use waypoint_core::{Rgb, ScreenSize};
use waypoint_layout::{DeviceLayout, LayoutError, OrientationLock};

use crate::viewport::{AxisPolicy, LayoutQuery, ScaleQuery};

/// Longest accepted auto-start delay: one minute.
pub const MAX_AUTO_START_DELAY_MS: u64 = 60_000;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaypointConfig {
    pub display: DisplayConfig,
    pub tutorial: TutorialConfig,
    pub highlight: HighlightConfig,
}

impl WaypointConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load by extension (`.json` is JSON, anything else TOML) and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_file(path)?
        } else {
            Self::from_toml_file(path)?
        };
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Range checks. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let d = &self.display;
        if !(d.base_width.is_finite() && d.base_width > 0.0) {
            errors.push(format!("display.base_width must be > 0, got {}", d.base_width));
        }
        if !(d.base_height.is_finite() && d.base_height > 0.0) {
            errors.push(format!(
                "display.base_height must be > 0, got {}",
                d.base_height
            ));
        }
        if let Some(axis) = d.dominant_axis
            && !(0.0..=1.0).contains(&axis)
        {
            errors.push(format!(
                "display.dominant_axis must be in [0, 1], got {axis}"
            ));
        }

        let h = &self.highlight;
        if !(0.0..=1.0).contains(&h.transparency) {
            errors.push(format!(
                "highlight.transparency must be in [0, 1], got {}",
                h.transparency
            ));
        }
        if !(h.target_padding.is_finite() && h.target_padding >= 0.0) {
            errors.push(format!(
                "highlight.target_padding must be >= 0, got {}",
                h.target_padding
            ));
        }

        let t = &self.tutorial;
        if t.auto_start_delay_ms > MAX_AUTO_START_DELAY_MS {
            errors.push(format!(
                "tutorial.auto_start_delay_ms must be <= {MAX_AUTO_START_DELAY_MS}, got {}",
                t.auto_start_delay_ms
            ));
        }

        errors
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Screen and layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Design resolution width.
    pub base_width: f64,
    /// Design resolution height.
    pub base_height: f64,
    /// Fixed dominant axis. Unset means per-category.
    pub dominant_axis: Option<f64>,
    /// Supported layouts in preference order. Empty means all.
    pub whitelist: Vec<DeviceLayout>,
    pub orientation_lock: OrientationLock,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            base_width: 1920.0,
            base_height: 1080.0,
            dominant_axis: None,
            whitelist: Vec::new(),
            orientation_lock: OrientationLock::Any,
        }
    }
}

impl DisplayConfig {
    pub fn base_resolution(&self) -> ScreenSize {
        ScreenSize::new(self.base_width, self.base_height)
    }

    pub fn layout_query(&self) -> LayoutQuery {
        LayoutQuery {
            whitelist: (!self.whitelist.is_empty()).then(|| self.whitelist.clone()),
            lock: self.orientation_lock,
        }
    }

    pub fn scale_query(&self) -> Result<ScaleQuery, LayoutError> {
        let axis = match self.dominant_axis {
            Some(a) => AxisPolicy::Fixed(a),
            None => AxisPolicy::Adaptive,
        };
        ScaleQuery::new(self.base_resolution(), axis)
    }
}

/// Tutorial start-up behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorialConfig {
    /// Start the tutorial automatically after launch.
    pub auto_start: bool,
    /// Delay before the automatic start.
    pub auto_start_delay_ms: u64,
}

impl Default for TutorialConfig {
    fn default() -> Self {
        Self {
            auto_start: true,
            auto_start_delay_ms: 1000,
        }
    }
}

impl TutorialConfig {
    pub fn auto_start_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.auto_start_delay_ms)
    }
}

/// Global highlight styling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub background: Rgb,
    /// Opacity of the dimmed background, 0 (clear) to 1 (opaque).
    pub transparency: f64,
    /// Whether clicks inside the highlighted cutout reach the UI.
    pub can_click_center: bool,
    /// Pixels added around each target rectangle.
    pub target_padding: f64,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            background: Rgb::new(7, 7, 7),
            transparency: 0.4,
            can_click_center: true,
            target_padding: 8.0,
        }
    }
}

/// Errors from loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_validates_clean() {
        let errors = WaypointConfig::default().validate();
        assert!(errors.is_empty(), "default should validate: {errors:?}");
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(
            WaypointConfig::from_toml_str("").unwrap(),
            WaypointConfig::default()
        );
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = WaypointConfig::from_toml_str(
            r#"
            [display]
            whitelist = ["TabletLandscape", "DesktopPortrait"]
            orientation_lock = "portrait"

            [highlight]
            transparency = 0.6
            background = { r = 10, g = 20, b = 30 }
            "#,
        )
        .unwrap();
        assert_eq!(
            config.display.whitelist,
            vec![DeviceLayout::TabletLandscape, DeviceLayout::DesktopPortrait]
        );
        assert_eq!(config.display.orientation_lock, OrientationLock::Portrait);
        assert_eq!(config.display.base_width, 1920.0);
        assert_eq!(config.highlight.background, Rgb::new(10, 20, 30));
        assert!(config.highlight.can_click_center);
        assert_eq!(config.tutorial, TutorialConfig::default());
    }

    #[test]
    fn json_round_trip() {
        let mut config = WaypointConfig::default();
        config.display.dominant_axis = Some(0.5);
        config.tutorial.auto_start = false;
        let json = config.to_json().unwrap();
        assert_eq!(WaypointConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn validate_catches_bad_values() {
        let mut config = WaypointConfig::default();
        config.display.base_width = 0.0;
        config.display.dominant_axis = Some(1.5);
        config.highlight.transparency = -0.1;
        let errors = config.validate();
        assert_eq!(errors.len(), 3, "{errors:?}");
        assert!(errors[0].contains("base_width"));
        assert!(errors[1].contains("dominant_axis"));
        assert!(errors[2].contains("transparency"));
    }

    #[test]
    fn auto_start_delay_is_bounded() {
        let mut config = WaypointConfig::default();
        config.tutorial.auto_start_delay_ms = MAX_AUTO_START_DELAY_MS;
        assert!(config.validate().is_empty());

        config.tutorial.auto_start_delay_ms = u64::MAX;
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("auto_start_delay_ms"));

        let parsed = WaypointConfig::from_json_str(
            r#"{"tutorial": {"auto_start_delay_ms": 18446744073709551615}}"#,
        )
        .unwrap();
        assert_eq!(parsed.validate().len(), 1);
    }

    #[test]
    fn unknown_layout_name_is_a_parse_error() {
        let err = WaypointConfig::from_toml_str("[display]\nwhitelist = [\"Phablet\"]").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn queries_from_display_config() {
        let display = DisplayConfig::default();
        assert_eq!(display.layout_query(), LayoutQuery::any());
        assert_eq!(display.scale_query().unwrap(), ScaleQuery::default());

        let display = DisplayConfig {
            dominant_axis: Some(0.25),
            whitelist: vec![DeviceLayout::MobilePortrait],
            ..DisplayConfig::default()
        };
        assert_eq!(
            display.layout_query().whitelist,
            Some(vec![DeviceLayout::MobilePortrait])
        );
        assert_eq!(display.scale_query().unwrap().axis(), AxisPolicy::Fixed(0.25));
    }

    #[test]
    fn load_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("waypoint.toml");
        std::fs::write(&toml_path, "[tutorial]\nauto_start_delay_ms = 250\n").unwrap();
        let config = WaypointConfig::load(&toml_path).unwrap();
        assert_eq!(config.tutorial.auto_start_delay_ms, 250);

        let json_path = dir.path().join("waypoint.json");
        std::fs::write(&json_path, r#"{"highlight": {"transparency": 0.9}}"#).unwrap();
        let config = WaypointConfig::load(&json_path).unwrap();
        assert_eq!(config.highlight.transparency, 0.9);
    }

    #[test]
    fn load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[highlight]\ntransparency = 3.0\n").unwrap();
        match WaypointConfig::load(&path) {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 1),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = WaypointConfig::load("/nonexistent/waypoint.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
