mod error;
mod listener;
mod repository;
mod sensor;
mod service;
mod status;

pub use error::SecurityError;
pub use listener::StatusListener;
pub use listener::TracingListener;
pub use repository::InMemorySecurityRepository;
pub use repository::RepositoryError;
pub use repository::SecurityRepository;
pub use sensor::Sensor;
pub use sensor::SensorId;
pub use sensor::SensorType;
pub use service::CAT_CONFIDENCE_THRESHOLD;
pub use service::SecurityService;
pub use service::SecuritySnapshot;
pub use status::AlarmStatus;
pub use status::ArmingStatus;
