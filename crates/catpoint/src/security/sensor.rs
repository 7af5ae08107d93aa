use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Stable identity of a sensor, assigned when the sensor is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorId(Uuid);

impl SensorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SensorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SensorType {
    Door,
    Window,
    Motion,
}

/// A door, window or motion detector.
///
/// Listings are ordered by name, then type, then id, so two sensors sharing
/// a name still sort deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sensor {
    id: SensorId,
    name: String,
    sensor_type: SensorType,
    active: bool,
}

impl Sensor {
    /// Create a new, inactive sensor with a fresh id
    pub fn new(name: impl Into<String>, sensor_type: SensorType) -> Self {
        Self {
            id: SensorId::new(),
            name: name.into(),
            sensor_type,
            active: false,
        }
    }

    pub fn id(&self) -> SensorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl PartialOrd for Sensor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Sensor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.sensor_type.cmp(&other.sensor_type))
            .then_with(|| self.id.cmp(&other.id))
            .then_with(|| self.active.cmp(&other.active))
    }
}
