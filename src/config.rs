//! Environment-driven bridge configuration.
//!
//! Every option has a default, so an empty environment yields a runnable
//! config. The binary layers its CLI flags on top of what is read here.

use crate::constants::{DEFAULT_DATA_INTERVAL_MS, DEFAULT_REGISTER_INTERVAL_MS};
use crate::error::BridgeError;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Which transport carries the meter byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Optical head on a local serial device.
    Serial,
    /// Raw TCP socket, e.g. a serial-to-ethernet converter.
    Socket,
}

impl FromStr for Mode {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "serial" => Ok(Mode::Serial),
            "socket" => Ok(Mode::Socket),
            other => Err(BridgeError::ConfigError(format!(
                "invalid MODE {other:?}, expected \"serial\" or \"socket\""
            ))),
        }
    }
}

/// Runtime configuration for one bridge instance.
#[derive(Debug, Clone)]
pub struct Config {
    /// Hostname or address of the MQTT broker.
    pub mqtt_host: String,
    /// Topic all readings of this meter are published to.
    pub mqtt_topic: String,
    /// Meter designation (`POWERTYPE`), also the topic suffix and part of
    /// every discovery entity id.
    pub power_type: String,
    /// Transport selection.
    pub mode: Mode,
    /// Socket transport: remote host.
    pub socket_host: String,
    /// Socket transport: remote port.
    pub socket_port: u16,
    /// Serial transport: device path.
    pub serial_path: String,
    /// Optional Home Assistant area for the discovered entities.
    pub area: Option<String>,
    /// Raise the default log filter to debug.
    pub debug: bool,
    /// Minimum interval between published readings.
    pub data_interval: Duration,
    /// Minimum interval between discovery re-registrations.
    pub register_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        let power_type = "main".to_string();
        Config {
            mqtt_host: "192.168.178.100".to_string(),
            mqtt_topic: reading_topic(&power_type),
            power_type,
            mode: Mode::Serial,
            socket_host: "192.168.178.100".to_string(),
            socket_port: 2002,
            serial_path: "/dev/ttyUSB0".to_string(),
            area: None,
            debug: false,
            data_interval: Duration::from_millis(DEFAULT_DATA_INTERVAL_MS),
            register_interval: Duration::from_millis(DEFAULT_REGISTER_INTERVAL_MS),
        }
    }
}

impl Config {
    /// Builds a configuration from the process environment.
    ///
    /// Unset variables fall back to their defaults; a present but malformed
    /// value (unknown `MODE`, non-numeric port or interval) is a fatal
    /// configuration error.
    pub fn from_env() -> Result<Config, BridgeError> {
        let defaults = Config::default();

        let power_type = var_or("POWERTYPE", &defaults.power_type);
        let mode = match env::var("MODE") {
            Ok(value) => value.parse()?,
            Err(_) => defaults.mode,
        };

        Ok(Config {
            mqtt_host: var_or("MQTT_HOST", &defaults.mqtt_host),
            mqtt_topic: reading_topic(&power_type),
            mode,
            socket_host: var_or("SOCKET_HOST", &defaults.socket_host),
            socket_port: parsed_var("SOCKET_PORT", defaults.socket_port)?,
            serial_path: var_or("SERIAL_PATH", &defaults.serial_path),
            area: env::var("AREA").ok().filter(|a| !a.is_empty()),
            debug: flag_var("DEBUG"),
            data_interval: Duration::from_millis(parsed_var(
                "DATA_INTERVAL",
                DEFAULT_DATA_INTERVAL_MS,
            )?),
            register_interval: Duration::from_millis(parsed_var(
                "REGISTER_INTERVAL",
                DEFAULT_REGISTER_INTERVAL_MS,
            )?),
            power_type,
        })
    }

    /// Re-derives the reading topic after the power type changed, e.g. from a
    /// CLI override.
    pub fn set_power_type(&mut self, power_type: String) {
        self.mqtt_topic = reading_topic(&power_type);
        self.power_type = power_type;
    }
}

/// Topic all readings of the given meter are published to.
pub fn reading_topic(power_type: &str) -> String {
    format!("house/power/{power_type}")
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn flag_var(name: &str) -> bool {
    matches!(
        env::var(name).unwrap_or_default().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

fn parsed_var<T: FromStr>(name: &str, default: T) -> Result<T, BridgeError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| BridgeError::ConfigError(format!("invalid {name}: {value:?}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_known_values() {
        assert_eq!("serial".parse::<Mode>().unwrap(), Mode::Serial);
        assert_eq!("socket".parse::<Mode>().unwrap(), Mode::Socket);
        assert!("udp".parse::<Mode>().is_err());
    }

    #[test]
    fn reading_topic_includes_power_type() {
        assert_eq!(reading_topic("main"), "house/power/main");
        assert_eq!(reading_topic("solar"), "house/power/solar");
    }
}
