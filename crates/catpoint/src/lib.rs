pub mod config;
pub mod security;
pub mod shell;

pub use config::Config;
pub use config::ConfigError;
pub use config::LogLevel;
pub use security::AlarmStatus;
pub use security::ArmingStatus;
pub use security::SecurityError;
pub use security::SecurityService;
pub use security::Sensor;
pub use security::SensorType;
pub use security::StatusListener;
