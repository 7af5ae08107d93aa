use std::collections::BTreeMap;

use super::sensor::Sensor;
use super::sensor::SensorId;
use super::status::AlarmStatus;
use super::status::ArmingStatus;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Sensor not found: {0}")]
    SensorNotFound(SensorId),

    #[error("Repository unavailable: {0}")]
    Unavailable(String),
}

/// Storage for the security system's state.
///
/// The security service never caches what it reads from here, so a
/// repository is free to share its state with other readers.
pub trait SecurityRepository {
    fn arming_status(&self) -> Result<ArmingStatus, RepositoryError>;

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), RepositoryError>;

    fn alarm_status(&self) -> Result<AlarmStatus, RepositoryError>;

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), RepositoryError>;

    /// All known sensors, ordered by name
    fn sensors(&self) -> Result<Vec<Sensor>, RepositoryError>;

    /// Look up a single sensor.
    ///
    /// The default implementation scans `sensors()`.
    fn sensor(&self, id: SensorId) -> Result<Sensor, RepositoryError> {
        self.sensors()?
            .into_iter()
            .find(|s| s.id() == id)
            .ok_or(RepositoryError::SensorNotFound(id))
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), RepositoryError>;

    /// Remove a sensor. Removing an unknown sensor is not an error.
    fn remove_sensor(&mut self, id: SensorId) -> Result<(), RepositoryError>;

    /// Replace the stored copy of an existing sensor.
    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError>;
}

/// Repository that keeps everything in process memory.
#[derive(Debug, Default, Clone)]
pub struct InMemorySecurityRepository {
    arming_status: ArmingStatus,
    alarm_status: AlarmStatus,
    sensors: BTreeMap<SensorId, Sensor>,
}

impl InMemorySecurityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_arming_status(mut self, status: ArmingStatus) -> Self {
        self.arming_status = status;
        self
    }

    pub fn with_alarm_status(mut self, status: AlarmStatus) -> Self {
        self.alarm_status = status;
        self
    }

    pub fn with_sensor(mut self, sensor: Sensor) -> Self {
        self.sensors.insert(sensor.id(), sensor);
        self
    }
}

impl SecurityRepository for InMemorySecurityRepository {
    fn arming_status(&self) -> Result<ArmingStatus, RepositoryError> {
        Ok(self.arming_status)
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), RepositoryError> {
        self.arming_status = status;
        Ok(())
    }

    fn alarm_status(&self) -> Result<AlarmStatus, RepositoryError> {
        Ok(self.alarm_status)
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), RepositoryError> {
        self.alarm_status = status;
        Ok(())
    }

    fn sensors(&self) -> Result<Vec<Sensor>, RepositoryError> {
        let mut sensors: Vec<Sensor> = self.sensors.values().cloned().collect();
        sensors.sort();
        Ok(sensors)
    }

    fn sensor(&self, id: SensorId) -> Result<Sensor, RepositoryError> {
        self.sensors
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::SensorNotFound(id))
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<(), RepositoryError> {
        self.sensors.insert(sensor.id(), sensor);
        Ok(())
    }

    fn remove_sensor(&mut self, id: SensorId) -> Result<(), RepositoryError> {
        self.sensors.remove(&id);
        Ok(())
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError> {
        match self.sensors.get_mut(&sensor.id()) {
            Some(stored) => {
                *stored = sensor.clone();
                Ok(())
            }
            None => Err(RepositoryError::SensorNotFound(sensor.id())),
        }
    }
}
