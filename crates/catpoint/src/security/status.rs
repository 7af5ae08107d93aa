use serde::Deserialize;
use serde::Serialize;

/// Whether the system is armed, and in which mode.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ArmingStatus {
    #[default]
    Disarmed,
    ArmedHome,
    ArmedAway,
}

impl ArmingStatus {
    pub fn is_armed(self) -> bool {
        matches!(self, ArmingStatus::ArmedHome | ArmingStatus::ArmedAway)
    }
}

/// Escalation level of the alarm.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AlarmStatus {
    #[default]
    NoAlarm,
    PendingAlarm,
    Alarm,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_armed_variants() {
        let armed: Vec<_> = ArmingStatus::iter().filter(|s| s.is_armed()).collect();
        assert_eq!(armed, vec![ArmingStatus::ArmedHome, ArmingStatus::ArmedAway]);
    }

    #[test]
    fn test_text_form() {
        assert_eq!(ArmingStatus::ArmedAway.to_string(), "armed_away");
        assert_eq!(AlarmStatus::PendingAlarm.to_string(), "pending_alarm");
        assert_eq!(
            ArmingStatus::from_str("armed_home").unwrap(),
            ArmingStatus::ArmedHome
        );
        assert_eq!(AlarmStatus::from_str("alarm").unwrap(), AlarmStatus::Alarm);
        assert!(AlarmStatus::from_str("panic").is_err());
    }

    #[test]
    fn test_serde_matches_display() {
        for status in AlarmStatus::iter() {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json.as_str().unwrap(), status.to_string());
        }
    }
}
