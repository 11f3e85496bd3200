// Loading of trailglow.toml

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use trailglow_core::{ConfigError, EngineConfig};

pub const CONFIG_FILE_NAME: &str = "trailglow.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub run: RunConfig,
    pub pointer: PointerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub frames_per_second: u32,
    pub duration_ms: u64,
    pub surface_width: f64,
    pub surface_height: f64,
    /// Frame written out as SVG; 0 disables the snapshot.
    pub snapshot_frame: u64,
    pub output_dir: String,
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames_per_second: 60,
            duration_ms: 4_000,
            surface_width: 800.0,
            surface_height: 600.0,
            snapshot_frame: 90,
            output_dir: "trailglow-out".into(),
            seed: None,
        }
    }
}

/// Scripted pointer path: a Lissajous figure traced gesture after gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    pub samples_per_second: u32,
    pub gesture_ms: u64,
    pub pause_ms: u64,
    pub gestures: u32,
    pub center: [f64; 2],
    pub radius: [f64; 2],
    pub frequency: [f64; 2],
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            samples_per_second: 240,
            gesture_ms: 1_500,
            pause_ms: 500,
            gestures: 2,
            center: [400.0, 300.0],
            radius: [300.0, 200.0],
            frequency: [3.0, 2.0],
        }
    }
}

impl AppConfig {
    /// Loads from `explicit` when given, otherwise from the executable's
    /// directory, then the working directory, then falls back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Ok((Self::load_from(path)?, Some(path.to_path_buf())));
        }
        for candidate in Self::candidates() {
            if candidate.exists() {
                let config = Self::load_from(&candidate)?;
                return Ok((config, Some(candidate)));
            }
        }
        Ok((Self::default(), None))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        if self.run.frames_per_second == 0 {
            return Err(ConfigError::Invalid("run.frames_per_second must be positive".into()));
        }
        if self.run.surface_width <= 0.0 || self.run.surface_height <= 0.0 {
            return Err(ConfigError::Invalid("run surface must have a positive size".into()));
        }
        if self.pointer.samples_per_second == 0 {
            return Err(ConfigError::Invalid(
                "pointer.samples_per_second must be positive".into(),
            ));
        }
        Ok(())
    }

    fn candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        {
            candidates.push(exe_dir.join(CONFIG_FILE_NAME));
        }
        candidates.push(PathBuf::from(CONFIG_FILE_NAME));
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_are_optional() {
        let config = AppConfig::from_toml_str(
            r#"
            [run]
            frames_per_second = 30

            [engine.preset]
            fade_step = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.run.frames_per_second, 30);
        assert_eq!(config.run.duration_ms, 4_000);
        assert_eq!(config.engine.preset.fade_step, 3);
        assert_eq!(config.pointer, PointerConfig::default());
    }

    #[test]
    fn rejects_zero_frame_rate() {
        let err = AppConfig::from_toml_str("[run]\nframes_per_second = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn engine_errors_surface() {
        let err = AppConfig::from_toml_str("[engine.preset]\nmax_points = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
