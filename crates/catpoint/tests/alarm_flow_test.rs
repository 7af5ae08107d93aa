use std::sync::Arc;
use std::sync::Mutex;

use catpoint::AlarmStatus;
use catpoint::ArmingStatus;
use catpoint::Config;
use catpoint::SecurityService;
use catpoint::Sensor;
use catpoint::SensorType;
use catpoint::StatusListener;
use catpoint::security::InMemorySecurityRepository;
use catpoint_image::FixedImageService;
use catpoint_image::Image;

/// Collects events as text, one per line
#[derive(Default)]
struct Log(Mutex<Vec<String>>);

impl Log {
    fn take(&self) -> String {
        std::mem::take(&mut *self.0.lock().unwrap()).join("\n")
    }
}

impl StatusListener for Log {
    fn notify(&self, status: AlarmStatus) {
        self.0.lock().unwrap().push(format!("alarm {}", status));
    }

    fn cat_detected(&self, detected: bool) {
        self.0.lock().unwrap().push(format!("cat {}", detected));
    }

    fn sensor_status_changed(&self) {
        self.0.lock().unwrap().push("sensors changed".to_string());
    }
}

#[test]
fn test_intrusion_then_disarm() {
    let door = Sensor::new("Back door", SensorType::Door);
    let hallway = Sensor::new("Hallway", SensorType::Motion);
    let repo = InMemorySecurityRepository::new()
        .with_sensor(door.clone())
        .with_sensor(hallway.clone());

    let mut service = SecurityService::new(repo, FixedImageService::new(false));
    let log = Arc::new(Log::default());
    service.add_status_listener(log.clone());

    service.set_arming_status(ArmingStatus::ArmedAway).unwrap();
    service
        .change_sensor_activation_status(door.id(), true)
        .unwrap();
    service
        .change_sensor_activation_status(hallway.id(), true)
        .unwrap();
    service
        .change_sensor_activation_status(door.id(), false)
        .unwrap();
    assert_eq!(service.alarm_status().unwrap(), AlarmStatus::Alarm);

    service.set_arming_status(ArmingStatus::Disarmed).unwrap();
    assert_eq!(service.alarm_status().unwrap(), AlarmStatus::NoAlarm);

    insta::assert_snapshot!(log.take(), @"
    alarm pending_alarm
    sensors changed
    alarm alarm
    sensors changed
    sensors changed
    alarm no_alarm
    ");
}

#[test]
fn test_false_alarm_clears() {
    let window = Sensor::new("Kitchen window", SensorType::Window);
    let repo = InMemorySecurityRepository::new()
        .with_arming_status(ArmingStatus::ArmedHome)
        .with_sensor(window.clone());

    let mut service = SecurityService::new(repo, FixedImageService::new(false));

    service
        .change_sensor_activation_status(window.id(), true)
        .unwrap();
    assert_eq!(service.alarm_status().unwrap(), AlarmStatus::PendingAlarm);

    service
        .change_sensor_activation_status(window.id(), false)
        .unwrap();
    assert_eq!(service.alarm_status().unwrap(), AlarmStatus::NoAlarm);
}

#[test]
fn test_cat_at_home() {
    let camera = FixedImageService::new(false);
    let mut service = SecurityService::new(InMemorySecurityRepository::new(), &camera);
    let log = Arc::new(Log::default());
    service.add_status_listener(log.clone());

    camera.set_contains_cat(true);
    assert!(service.process_image(&Image::from_bytes(vec![0u8; 16])).unwrap());
    service.set_arming_status(ArmingStatus::ArmedHome).unwrap();
    assert_eq!(service.alarm_status().unwrap(), AlarmStatus::Alarm);

    camera.set_contains_cat(false);
    assert!(!service.process_image(&Image::from_bytes(vec![0u8; 16])).unwrap());
    assert_eq!(service.alarm_status().unwrap(), AlarmStatus::NoAlarm);

    assert_eq!(camera.calls(), 2);
    insta::assert_snapshot!(log.take(), @"
    alarm no_alarm
    cat true
    alarm alarm
    alarm no_alarm
    cat false
    ");
}

#[test]
fn test_service_from_config() {
    let config: Config = toml::from_str(
        r#"
        [system]
        arming_status = "armed_away"

        [image]
        analyzer = "always_cat"

        [[sensors]]
        name = "Front door"
        type = "door"
        "#,
    )
    .unwrap();

    let mut service = SecurityService::new(config.build_repository(), config.image.build());
    let door = service.find_sensor("Front door").unwrap().unwrap();

    service
        .change_sensor_activation_status(door.id(), true)
        .unwrap();
    assert_eq!(service.alarm_status().unwrap(), AlarmStatus::PendingAlarm);

    // A cat while armed away clears the alarm
    assert!(service.process_image(&Image::default()).unwrap());
    assert_eq!(service.alarm_status().unwrap(), AlarmStatus::NoAlarm);

    let snapshot = service.snapshot().unwrap();
    assert_eq!(snapshot.arming_status, ArmingStatus::ArmedAway);
    assert!(snapshot.cat_detected);
    assert!(snapshot.sensors[0].is_active());
}
