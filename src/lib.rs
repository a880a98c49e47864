//! # obis2mqtt - Bridging OBIS Smart-Meter Telemetry to MQTT
//!
//! The obis2mqtt crate reads the periodic telemetry stream of a utility
//! electricity meter, over a local serial device or a raw TCP socket, and
//! publishes decoded readings plus Home-Assistant discovery documents to an
//! MQTT broker.
//!
//! ## Features
//!
//! - Reassemble `!`-terminated meter telegrams from arbitrary byte chunks
//! - Extract the fixed OBIS field set (energy totals, windowed totals,
//!   momentary power) from free-form telegram text
//! - Throttle publishes to a configurable minimum interval, independent of
//!   how chatty the meter is
//! - Emit Home-Assistant MQTT-discovery config documents per sensor
//! - Serial (optical readout head) and TCP (serial-to-ethernet converter)
//!   transports, reconnecting automatically on link loss
//!
//! ## Usage
//!
//! To use the obis2mqtt crate in your Rust project, add the following to your
//! Cargo.toml file:
//!
//! ```toml
//! [dependencies]
//! obis2mqtt = "1.0.0"
//! ```
//!
//! Then, in your Rust code, you can import the necessary modules and
//! functions:
//!
//! ```rust
//! use obis2mqtt::{extract, FrameReassembler, Reading, ReadingValidator};
//! ```
//!
//! The `obis2mqtt` binary wires the full pipeline together; its behavior is
//! driven by environment variables (`MODE`, `MQTT_HOST`, `POWERTYPE`, ...)
//! with CLI flags as overrides.

pub mod bridge;
pub mod config;
pub mod constants;
pub mod error;
pub mod hass;
pub mod logging;
pub mod mqtt;
pub mod obis;
pub mod transport;

pub use crate::error::BridgeError;
pub use crate::logging::{init_logger, log_error, log_info, log_warn};

// Core telegram processing types
pub use obis::{extract, Frame, FrameReassembler, LabelRule, Reading, ReadingValidator, LABEL_RULES};

// Pipeline and collaborators
pub use bridge::{Bridge, Effect, LinkEvent, Pipeline};
pub use config::{Config, Mode};
pub use hass::{SensorConfig, SensorMeta, SENSORS};
pub use mqtt::MqttPublisher;
pub use transport::MeterLink;
