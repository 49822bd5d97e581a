//! Application configuration, loaded from `firewatch.toml`.
//!
//! Every section is optional; anything missing falls back to the defaults
//! the engine was tuned with.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use firewatch_core::dwell::{DwellError, DwellTimes};
use firewatch_core::level::{parse_levels, LevelError, ParkingLevel};
use firewatch_core::types::Surface;
use firewatch_sim::levels::demo_levels;
use firewatch_sim::SimConfig;

pub const DEFAULT_LOG_FILTER: &str = "firewatch=info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid dwell times: {0}")]
    Dwell(#[from] DwellError),

    #[error("frame rate must be a positive number of frames per second, got {0}")]
    FrameRate(f64),

    #[error("display size must be positive, got {width}x{height}")]
    Display { width: f64, height: f64 },

    #[error("invalid level data in {path}: {source}")]
    Levels { path: PathBuf, source: LevelError },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationSection {
    pub seed: u64,
    /// Display refresh rate the frame loop runs at (Hz).
    pub frame_rate: f64,
    pub dwell: DwellTimes,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            seed: 42,
            frame_rate: 60.0,
            dwell: DwellTimes::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    pub width: f64,
    pub height: f64,
}

impl Default for DisplaySection {
    fn default() -> Self {
        let surface = Surface::default();
        Self {
            width: surface.width,
            height: surface.height,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// `tracing-subscriber` filter directive, used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimulationSection,
    pub display: DisplaySection,
    pub logging: LoggingSection,
    /// JSON file with the car park levels. Built-in demo levels when unset.
    pub levels_path: Option<PathBuf>,
}

impl AppConfig {
    /// Read and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.dwell.validate()?;

        let rate = self.simulation.frame_rate;
        if !rate.is_finite() || rate <= 0.0 {
            return Err(ConfigError::FrameRate(rate));
        }

        let DisplaySection { width, height } = self.display;
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ConfigError::Display { width, height });
        }
        Ok(())
    }

    pub fn surface(&self) -> Surface {
        Surface::new(self.display.width, self.display.height)
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            seed: self.simulation.seed,
            dwell: self.simulation.dwell,
            surface: self.surface(),
        }
    }

    /// Levels from `levels_path`, or the demo car park.
    pub fn load_levels(&self) -> Result<Vec<ParkingLevel>, ConfigError> {
        let Some(path) = &self.levels_path else {
            return Ok(demo_levels());
        };
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let levels = parse_levels(&contents).map_err(|source| ConfigError::Levels {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), count = levels.len(), "loaded levels");
        Ok(levels)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
        assert_eq!(config.surface(), Surface::default());
    }

    #[test]
    fn test_partial_sections_merge_with_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [simulation]
            seed = 7

            [simulation.dwell]
            camera_verification = 6.0
            "#,
        )
        .unwrap();
        assert_eq!(config.simulation.seed, 7);
        assert_eq!(config.simulation.frame_rate, 60.0);
        assert_eq!(config.simulation.dwell.camera_verification, 6.0);
        assert_eq!(config.simulation.dwell.detector_activated, 2.0);
    }

    #[test]
    fn test_rejects_decreasing_dwell() {
        let err = AppConfig::from_toml_str(
            r#"
            [simulation.dwell]
            esser_processing = 1.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Dwell(_)));
    }

    #[test]
    fn test_rejects_bad_frame_rate_and_display() {
        let err = AppConfig::from_toml_str("[simulation]\nframe_rate = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::FrameRate(_)));

        let err = AppConfig::from_toml_str("[display]\nwidth = -5.0").unwrap_err();
        assert!(matches!(err, ConfigError::Display { .. }));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = AppConfig::from_toml_str("[simulation\nseed = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\nwidth = 1024.0\nheight = 400.0").unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.surface(), Surface::new(1024.0, 400.0));
        assert_eq!(config.sim_config().surface, Surface::new(1024.0, 400.0));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = AppConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn test_levels_default_to_demo() {
        let levels = AppConfig::default().load_levels().unwrap();
        assert_eq!(levels.len(), 3);
    }

    #[test]
    fn test_levels_load_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("levels.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "name": "Ground", "detectors": [
                {"id": "D-1", "zone": "A", "coordinates": {"x": 10.0, "y": 10.0}, "status": "normal"}
            ]}]"#,
        )
        .unwrap();

        let config = AppConfig {
            levels_path: Some(path),
            ..Default::default()
        };
        let levels = config.load_levels().unwrap();
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].detectors[0].id, "D-1");
    }

    #[test]
    fn test_invalid_levels_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("levels.json");
        std::fs::write(&path, "[]").unwrap();

        let config = AppConfig {
            levels_path: Some(path),
            ..Default::default()
        };
        assert!(matches!(
            config.load_levels(),
            Err(ConfigError::Levels { .. })
        ));
    }
}
