use super::status::AlarmStatus;

/// Observer of security system events.
///
/// Listeners are called synchronously from inside the service operation that
/// caused the event, so they must not block.
pub trait StatusListener: Send + Sync {
    /// The alarm status was set (it may be the same as before)
    fn notify(&self, status: AlarmStatus);

    /// An image was analysed
    fn cat_detected(&self, detected: bool);

    /// One or more sensors changed state.
    /// Default implementation does nothing.
    fn sensor_status_changed(&self) {}
}

/// Listener that writes every event to the log.
#[derive(Debug, Default)]
pub struct TracingListener;

impl StatusListener for TracingListener {
    fn notify(&self, status: AlarmStatus) {
        match status {
            AlarmStatus::Alarm => tracing::warn!("ALARM"),
            AlarmStatus::PendingAlarm => tracing::info!("Alarm pending"),
            AlarmStatus::NoAlarm => tracing::info!("No alarm"),
        }
    }

    fn cat_detected(&self, detected: bool) {
        if detected {
            tracing::info!("Cat detected");
        } else {
            tracing::info!("No cat detected");
        }
    }

    fn sensor_status_changed(&self) {
        tracing::debug!("Sensor status changed");
    }
}

/// Event captured by [`RecordingListener`]
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerEvent {
    Notify(AlarmStatus),
    CatDetected(bool),
    SensorStatusChanged,
}

/// Listener that records every event for later inspection
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingListener {
    events: std::sync::Mutex<Vec<ListenerEvent>>,
}

#[cfg(test)]
impl RecordingListener {
    pub fn events(&self) -> Vec<ListenerEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Alarm statuses received, in order
    pub fn notified(&self) -> Vec<AlarmStatus> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ListenerEvent::Notify(status) => Some(status),
                _ => None,
            })
            .collect()
    }

    /// One line per event
    pub fn transcript(&self) -> String {
        self.events()
            .iter()
            .map(|e| match e {
                ListenerEvent::Notify(status) => format!("notify {}", status),
                ListenerEvent::CatDetected(cat) => format!("cat_detected {}", cat),
                ListenerEvent::SensorStatusChanged => "sensor_status_changed".to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
impl StatusListener for RecordingListener {
    fn notify(&self, status: AlarmStatus) {
        self.events.lock().unwrap().push(ListenerEvent::Notify(status));
    }

    fn cat_detected(&self, detected: bool) {
        self.events
            .lock()
            .unwrap()
            .push(ListenerEvent::CatDetected(detected));
    }

    fn sensor_status_changed(&self) {
        self.events
            .lock()
            .unwrap()
            .push(ListenerEvent::SensorStatusChanged);
    }
}
