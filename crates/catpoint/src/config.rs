//! Configuration file parsing and structures.
//!
//! catpoint reads a single TOML file. Every section is optional, so an empty
//! file describes a disarmed system with no sensors and a random fake camera.

use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use catpoint_image::FakeImageService;
use catpoint_image::FixedImageService;
use catpoint_image::ImageService;
use serde::Deserialize;
use serde::Serialize;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::filter::Targets;

use crate::security::ArmingStatus;
use crate::security::InMemorySecurityRepository;
use crate::security::Sensor;
use crate::security::SensorType;

/// Top-level configuration structure
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub system: SystemConfig,

    #[serde(default)]
    pub image: ImageConfig,

    /// Sensors installed at startup
    #[serde(default)]
    pub sensors: Vec<SensorConfig>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default)]
    pub level: LogLevel,

    /// Per-target levels, e.g. `"catpoint::security" = "debug"`
    #[serde(default)]
    pub overrides: HashMap<String, LogLevel>,
}

impl LoggingConfig {
    /// Build a per-target filter from the default level and overrides
    pub fn filter(&self) -> Targets {
        Targets::new()
            .with_default(LevelFilter::from(self.level))
            .with_targets(
                self.overrides
                    .iter()
                    .map(|(target, level)| (target.clone(), LevelFilter::from(*level))),
            )
    }
}

/// System state at startup
#[derive(Debug, Default, Deserialize)]
pub struct SystemConfig {
    /// Initial arming status. Applied directly, without resetting sensors.
    #[serde(default)]
    pub arming_status: ArmingStatus,
}

#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnalyzerKind {
    /// Random answer for every image
    #[default]
    Fake,
    AlwaysCat,
    NeverCat,
}

#[derive(Debug, Default, Deserialize)]
pub struct ImageConfig {
    #[serde(default)]
    pub analyzer: AnalyzerKind,

    /// Seed for the fake analyzer. Ignored by the other analyzers.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ImageConfig {
    /// Construct the configured image service
    pub fn build(&self) -> Box<dyn ImageService> {
        match (self.analyzer, self.seed) {
            (AnalyzerKind::Fake, Some(seed)) => Box::new(FakeImageService::with_seed(seed)),
            (AnalyzerKind::Fake, None) => Box::new(FakeImageService::new()),
            (AnalyzerKind::AlwaysCat, _) => Box::new(FixedImageService::new(true)),
            (AnalyzerKind::NeverCat, _) => Box::new(FixedImageService::new(false)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SensorConfig {
    pub name: String,

    #[serde(rename = "type")]
    pub sensor_type: SensorType,

    #[serde(default)]
    pub active: bool,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().to_path_buf(), e))?;

        toml::from_str(&contents).map_err(ConfigError::Parse)
    }

    /// Build a repository holding the configured initial state
    pub fn build_repository(&self) -> InMemorySecurityRepository {
        self.sensors.iter().fold(
            InMemorySecurityRepository::new().with_arming_status(self.system.arming_status),
            |repo, s| {
                let mut sensor = Sensor::new(s.name.clone(), s.sensor_type);
                sensor.set_active(s.active);
                repo.with_sensor(sensor)
            },
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}
