//! Tunable constants for the trail, loadable from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::MAX_POINTS;
use crate::clock::{DEFAULT_SAMPLE_INTERVAL, NANOS_PER_SECOND};
use crate::color::DEFAULT_HUE_STEP;
use crate::geometry::DEFAULT_SPREAD;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Particle cloud drawn under the ribbon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudStyle {
    pub particles: usize,
    pub oval_size: f64,
    pub jitter_min: f64,
    pub jitter_max: f64,
    pub brightness: f64,
}

impl Default for CloudStyle {
    fn default() -> Self {
        Self {
            particles: 100,
            oval_size: 2.0,
            jitter_min: 0.95,
            jitter_max: 1.05,
            brightness: 0.7,
        }
    }
}

/// Perpendicular strokes drawn on top of the cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RibbonStyle {
    pub line_width: f64,
    pub brightness: f64,
}

impl Default for RibbonStyle {
    fn default() -> Self {
        Self {
            line_width: 5.0,
            brightness: 1.0,
        }
    }
}

/// On-surface frame-rate readout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FpsStyle {
    pub sample_interval_ms: u64,
    pub position: [f64; 2],
    pub font_size: f64,
}

impl Default for FpsStyle {
    fn default() -> Self {
        Self {
            sample_interval_ms: DEFAULT_SAMPLE_INTERVAL / 1_000_000,
            position: [10.0, 25.0],
            font_size: 24.0,
        }
    }
}

impl FpsStyle {
    pub fn sample_interval_nanos(&self) -> u64 {
        self.sample_interval_ms * (NANOS_PER_SECOND / 1_000)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailPreset {
    pub name: String,
    pub max_points: usize,
    /// Points dropped per frame while fading out.
    pub fade_step: usize,
    pub spread: f64,
    pub hue_step: f64,
    pub cloud: CloudStyle,
    pub ribbon: RibbonStyle,
    pub fps: FpsStyle,
}

impl Default for TrailPreset {
    fn default() -> Self {
        Self {
            name: "Default".into(),
            max_points: MAX_POINTS,
            fade_step: 5,
            spread: DEFAULT_SPREAD,
            hue_step: DEFAULT_HUE_STEP,
            cloud: CloudStyle::default(),
            ribbon: RibbonStyle::default(),
            fps: FpsStyle::default(),
        }
    }
}

impl TrailPreset {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_points == 0 {
            return Err(invalid("max_points must be at least 1"));
        }
        if self.fade_step == 0 {
            return Err(invalid("fade_step must be at least 1"));
        }
        if self.cloud.particles == 0 {
            return Err(invalid("cloud.particles must be at least 1"));
        }
        if self.cloud.jitter_min > self.cloud.jitter_max {
            return Err(invalid(format!(
                "cloud.jitter_min ({}) exceeds cloud.jitter_max ({})",
                self.cloud.jitter_min, self.cloud.jitter_max
            )));
        }
        for (field, value) in [
            ("cloud.brightness", self.cloud.brightness),
            ("ribbon.brightness", self.ribbon.brightness),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(format!("{field} must be within 0..=1, got {value}")));
            }
        }
        if self.fps.sample_interval_ms == 0 {
            return Err(invalid("fps.sample_interval_ms must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub preset: TrailPreset,
}

impl EngineConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.preset.validate()
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_yields_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.preset.max_points, 360);
        assert_eq!(config.preset.fps.sample_interval_nanos(), 500_000_000);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [preset]
            name = "Wide"
            spread = 6.0

            [preset.cloud]
            particles = 40
            "#,
        )
        .unwrap();
        assert_eq!(config.preset.name, "Wide");
        assert_eq!(config.preset.spread, 6.0);
        assert_eq!(config.preset.cloud.particles, 40);
        assert_eq!(config.preset.cloud.jitter_max, 1.05);
        assert_eq!(config.preset.ribbon, RibbonStyle::default());
    }

    #[test]
    fn rejects_inverted_jitter() {
        let err = EngineConfig::from_toml_str(
            r#"
            [preset.cloud]
            jitter_min = 1.2
            jitter_max = 0.8
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_out_of_range_brightness() {
        let mut preset = TrailPreset::default();
        preset.ribbon.brightness = 1.5;
        assert!(matches!(preset.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn reports_parse_errors() {
        let err = EngineConfig::from_toml_str("[preset]\nmax_points = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = EngineConfig::load("/definitely/not/here/trailglow.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
