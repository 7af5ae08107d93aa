//! Line-oriented command console for driving a [`SecurityService`].
//!
//! One command per line. Sensor names may contain spaces; they run to the
//! end of the line. Blank lines and lines starting with `#` are skipped.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use catpoint_image::Image;
use catpoint_image::ImageService;

use crate::security::AlarmStatus;
use crate::security::ArmingStatus;
use crate::security::SecurityRepository;
use crate::security::SecurityService;
use crate::security::Sensor;
use crate::security::SensorType;

pub const HELP: &str = "\
Commands:
  arm home|away                        arm the system
  disarm                               disarm the system
  activate NAME                        mark a sensor active
  deactivate NAME                      mark a sensor inactive
  add door|window|motion NAME          install a sensor
  remove NAME                          uninstall a sensor
  image PATH                           analyse a camera frame
  alarm no_alarm|pending_alarm|alarm   set the alarm status directly
  status                               print the system state as JSON
  sensors                              list sensors
  help                                 show this help
  quit                                 exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Arm(ArmingStatus),
    Disarm,
    Activate(String),
    Deactivate(String),
    AddSensor {
        sensor_type: SensorType,
        name: String,
    },
    RemoveSensor(String),
    Image(PathBuf),
    SetAlarm(AlarmStatus),
    Status,
    Sensors,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseCommandError {
    #[error("Unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("Missing argument for '{command}': expected {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("Invalid {what} '{value}'")]
    InvalidArgument { what: &'static str, value: String },
}

/// Parse one console line. Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseCommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    line.parse().map(Some)
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (word, rest) = match s.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (s, ""),
        };

        let command = match word {
            "arm" => match required(rest, "arm", "home|away")? {
                "home" => Command::Arm(ArmingStatus::ArmedHome),
                "away" => Command::Arm(ArmingStatus::ArmedAway),
                other => return Err(invalid("arming mode", other)),
            },
            "disarm" => Command::Disarm,
            "activate" => Command::Activate(required(rest, "activate", "NAME")?.to_string()),
            "deactivate" => {
                Command::Deactivate(required(rest, "deactivate", "NAME")?.to_string())
            }
            "add" => {
                let args = required(rest, "add", "door|window|motion NAME")?;
                let (kind, name) = args.split_once(char::is_whitespace).ok_or(
                    ParseCommandError::MissingArgument {
                        command: "add",
                        expected: "door|window|motion NAME",
                    },
                )?;
                let sensor_type =
                    SensorType::from_str(kind).map_err(|_| invalid("sensor type", kind))?;
                Command::AddSensor {
                    sensor_type,
                    name: name.trim().to_string(),
                }
            }
            "remove" => Command::RemoveSensor(required(rest, "remove", "NAME")?.to_string()),
            "image" => Command::Image(PathBuf::from(required(rest, "image", "PATH")?)),
            "alarm" => {
                let status = required(rest, "alarm", "no_alarm|pending_alarm|alarm")?;
                Command::SetAlarm(
                    AlarmStatus::from_str(status).map_err(|_| invalid("alarm status", status))?,
                )
            }
            "status" => Command::Status,
            "sensors" => Command::Sensors,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ParseCommandError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

fn required<'a>(
    rest: &'a str,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str, ParseCommandError> {
    if rest.is_empty() {
        Err(ParseCommandError::MissingArgument { command, expected })
    } else {
        Ok(rest)
    }
}

fn invalid(what: &'static str, value: &str) -> ParseCommandError {
    ParseCommandError::InvalidArgument {
        what,
        value: value.to_string(),
    }
}

/// Result of executing a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the message and keep reading commands
    Continue(String),
    Quit,
}

/// Execute a command against the service
pub fn execute<R, I>(
    service: &mut SecurityService<R, I>,
    command: Command,
) -> anyhow::Result<Outcome>
where
    R: SecurityRepository,
    I: ImageService,
{
    let message = match command {
        Command::Arm(status) => {
            service.set_arming_status(status)?;
            format!(
                "Arming status: {} (alarm: {})",
                status,
                service.alarm_status()?
            )
        }
        Command::Disarm => {
            service.set_arming_status(ArmingStatus::Disarmed)?;
            format!(
                "Arming status: {} (alarm: {})",
                ArmingStatus::Disarmed,
                service.alarm_status()?
            )
        }
        Command::Activate(name) => set_sensor_active(service, &name, true)?,
        Command::Deactivate(name) => set_sensor_active(service, &name, false)?,
        Command::AddSensor { sensor_type, name } => {
            service.add_sensor(Sensor::new(name.clone(), sensor_type))?;
            format!("Added sensor '{}' ({})", name, sensor_type)
        }
        Command::RemoveSensor(name) => {
            let sensor = lookup(service, &name)?;
            service.remove_sensor(sensor.id())?;
            format!("Removed sensor '{}'", name)
        }
        Command::Image(path) => {
            let image = Image::load(&path)
                .with_context(|| format!("Failed to load image {}", path.display()))?;
            let cat = service.process_image(&image)?;
            format!(
                "{} (alarm: {})",
                if cat { "Cat detected" } else { "No cat detected" },
                service.alarm_status()?
            )
        }
        Command::SetAlarm(status) => {
            service.set_alarm_status(status)?;
            format!("Alarm status: {}", status)
        }
        Command::Status => serde_json::to_string_pretty(&service.snapshot()?)
            .context("Failed to serialize status")?,
        Command::Sensors => {
            let sensors = service.sensors()?;
            if sensors.is_empty() {
                "No sensors".to_string()
            } else {
                sensors
                    .iter()
                    .map(|s| {
                        format!(
                            "{} [{}] {}",
                            s.name(),
                            s.sensor_type(),
                            if s.is_active() { "active" } else { "inactive" }
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        Command::Help => HELP.to_string(),
        Command::Quit => return Ok(Outcome::Quit),
    };
    Ok(Outcome::Continue(message))
}

fn lookup<R, I>(service: &SecurityService<R, I>, name: &str) -> anyhow::Result<Sensor>
where
    R: SecurityRepository,
    I: ImageService,
{
    service
        .find_sensor(name)?
        .with_context(|| format!("No sensor named '{}'", name))
}

fn set_sensor_active<R, I>(
    service: &mut SecurityService<R, I>,
    name: &str,
    active: bool,
) -> anyhow::Result<String>
where
    R: SecurityRepository,
    I: ImageService,
{
    let sensor = lookup(service, name)?;
    let sensor = service.change_sensor_activation_status(sensor.id(), active)?;
    Ok(format!(
        "Sensor '{}' {} (alarm: {})",
        sensor.name(),
        if sensor.is_active() { "active" } else { "inactive" },
        service.alarm_status()?
    ))
}
