use std::sync::Arc;

use catpoint_image::Image;
use catpoint_image::ImageService;
use serde::Serialize;
use tracing::debug;
use tracing::info;

use super::error::SecurityError;
use super::listener::StatusListener;
use super::repository::SecurityRepository;
use super::sensor::Sensor;
use super::sensor::SensorId;
use super::status::AlarmStatus;
use super::status::ArmingStatus;

/// Confidence (percent) the image service must reach before reporting a cat
pub const CAT_CONFIDENCE_THRESHOLD: f32 = 50.0;

/// Point-in-time view of the security system
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecuritySnapshot {
    pub arming_status: ArmingStatus,
    pub alarm_status: AlarmStatus,
    pub cat_detected: bool,
    pub sensors: Vec<Sensor>,
}

/// catpoint security service
///
/// Receives changes to the security system (arming, sensor activity, camera
/// frames), decides what they mean for the alarm, and forwards the result to
/// the repository and to every registered listener.
///
/// All alarm status changes go through [`SecurityService::set_alarm_status`],
/// which is the only place listeners are told about them.
pub struct SecurityService<R, I> {
    repository: R,
    image_service: I,

    /// Registered listeners, unique by identity
    status_listeners: Vec<Arc<dyn StatusListener>>,

    /// Result of the most recent image analysis. Not persisted.
    cat_detected: bool,
}

impl<R: SecurityRepository, I: ImageService> SecurityService<R, I> {
    pub fn new(repository: R, image_service: I) -> Self {
        Self {
            repository,
            image_service,
            status_listeners: Vec::new(),
            cat_detected: false,
        }
    }

    /// Set the arming status of the system.
    ///
    /// Disarming clears the alarm. Arming deactivates every sensor without
    /// running the deactivation rules, and arming at home while a cat is in
    /// view raises the alarm immediately.
    pub fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), SecurityError> {
        info!("Arming status -> {}", status);

        if status == ArmingStatus::Disarmed {
            self.set_alarm_status(AlarmStatus::NoAlarm)?;
        }
        if status == ArmingStatus::ArmedHome && self.cat_detected {
            self.set_alarm_status(AlarmStatus::Alarm)?;
        }
        if status.is_armed() {
            self.reset_sensors()?;
        }

        self.repository.set_arming_status(status)?;
        Ok(())
    }

    /// Change the activation state of a sensor and update the alarm status
    /// if necessary.
    ///
    /// Returns the sensor as stored after the change.
    pub fn change_sensor_activation_status(
        &mut self,
        id: SensorId,
        active: bool,
    ) -> Result<Sensor, SecurityError> {
        let mut sensor = self.repository.sensor(id)?;
        let was_active = sensor.is_active();
        debug!(
            "Sensor '{}' ({}): active {} -> {}",
            sensor.name(),
            id,
            was_active,
            active
        );

        if was_active && active && self.alarm_status()? == AlarmStatus::PendingAlarm {
            // A sensor that stays tripped while pending counts as a fresh trigger
            self.handle_sensor_activated()?;
        } else if !was_active && active {
            self.handle_sensor_activated()?;
        } else if was_active && !active {
            self.handle_sensor_deactivated()?;
        }

        sensor.set_active(active);
        self.repository.update_sensor(&sensor)?;

        if was_active != active {
            self.notify_sensor_status_changed();
        }
        Ok(sensor)
    }

    /// Analyse a camera frame and update the alarm status from the result.
    ///
    /// Returns whether a cat was detected.
    pub fn process_image(&mut self, image: &Image) -> Result<bool, SecurityError> {
        let detected = self
            .image_service
            .image_contains_cat(image, CAT_CONFIDENCE_THRESHOLD)?;
        self.handle_cat_detected(detected)?;
        Ok(detected)
    }

    /// Change the alarm status and notify all listeners
    pub fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), SecurityError> {
        self.repository.set_alarm_status(status)?;
        info!("Alarm status -> {}", status);

        for listener in &self.status_listeners {
            listener.notify(status);
        }
        Ok(())
    }

    /// Register a listener. Registering the same listener twice has no effect.
    pub fn add_status_listener(&mut self, listener: Arc<dyn StatusListener>) {
        if !self
            .status_listeners
            .iter()
            .any(|existing| same_listener(existing, &listener))
        {
            self.status_listeners.push(listener);
        }
    }

    pub fn remove_status_listener<L: StatusListener + ?Sized>(&mut self, listener: &Arc<L>) {
        self.status_listeners
            .retain(|existing| !same_listener(existing, listener));
    }

    pub fn alarm_status(&self) -> Result<AlarmStatus, SecurityError> {
        Ok(self.repository.alarm_status()?)
    }

    pub fn arming_status(&self) -> Result<ArmingStatus, SecurityError> {
        Ok(self.repository.arming_status()?)
    }

    pub fn sensors(&self) -> Result<Vec<Sensor>, SecurityError> {
        Ok(self.repository.sensors()?)
    }

    /// First sensor with the given name, in listing order
    pub fn find_sensor(&self, name: &str) -> Result<Option<Sensor>, SecurityError> {
        Ok(self.sensors()?.into_iter().find(|s| s.name() == name))
    }

    pub fn add_sensor(&mut self, sensor: Sensor) -> Result<(), SecurityError> {
        info!("Adding sensor '{}' ({})", sensor.name(), sensor.sensor_type());
        Ok(self.repository.add_sensor(sensor)?)
    }

    pub fn remove_sensor(&mut self, id: SensorId) -> Result<(), SecurityError> {
        info!("Removing sensor {}", id);
        Ok(self.repository.remove_sensor(id)?)
    }

    /// Whether the last analysed image contained a cat
    pub fn cat_detected(&self) -> bool {
        self.cat_detected
    }

    pub fn snapshot(&self) -> Result<SecuritySnapshot, SecurityError> {
        Ok(SecuritySnapshot {
            arming_status: self.arming_status()?,
            alarm_status: self.alarm_status()?,
            cat_detected: self.cat_detected,
            sensors: self.sensors()?,
        })
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn image_service(&self) -> &I {
        &self.image_service
    }

    fn handle_sensor_activated(&mut self) -> Result<(), SecurityError> {
        if self.arming_status()? == ArmingStatus::Disarmed {
            return Ok(());
        }
        match self.alarm_status()? {
            AlarmStatus::NoAlarm => self.set_alarm_status(AlarmStatus::PendingAlarm),
            AlarmStatus::PendingAlarm => self.set_alarm_status(AlarmStatus::Alarm),
            AlarmStatus::Alarm => Ok(()),
        }
    }

    /// An active alarm is never cleared by a sensor closing
    fn handle_sensor_deactivated(&mut self) -> Result<(), SecurityError> {
        match self.alarm_status()? {
            AlarmStatus::PendingAlarm => self.set_alarm_status(AlarmStatus::NoAlarm),
            AlarmStatus::NoAlarm | AlarmStatus::Alarm => Ok(()),
        }
    }

    // Any frame without a cat clears the alarm, whatever the sensors say.
    fn handle_cat_detected(&mut self, cat: bool) -> Result<(), SecurityError> {
        self.cat_detected = cat;
        debug!("Image analysed: cat={}", cat);

        if cat && self.arming_status()? == ArmingStatus::ArmedHome {
            self.set_alarm_status(AlarmStatus::Alarm)?;
        } else {
            self.set_alarm_status(AlarmStatus::NoAlarm)?;
        }

        for listener in &self.status_listeners {
            listener.cat_detected(cat);
        }
        Ok(())
    }

    fn reset_sensors(&mut self) -> Result<(), SecurityError> {
        let mut changed = false;
        for mut sensor in self.repository.sensors()? {
            if sensor.is_active() {
                sensor.set_active(false);
                self.repository.update_sensor(&sensor)?;
                changed = true;
            }
        }

        if changed {
            self.notify_sensor_status_changed();
        }
        Ok(())
    }

    fn notify_sensor_status_changed(&self) {
        for listener in &self.status_listeners {
            listener.sensor_status_changed();
        }
    }
}

fn same_listener<A: ?Sized, B: ?Sized>(a: &Arc<A>, b: &Arc<B>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
