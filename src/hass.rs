//! # Home Assistant Discovery
//!
//! Deterministic construction of the MQTT-discovery config documents, one per
//! published field. Home Assistant picks these up from
//! `homeassistant/sensor/<object_id>/config` and creates the matching sensor
//! entities, each reading its value out of the shared state topic via a
//! `value_json` template.

use serde::Serialize;

/// Static discovery metadata for one published field.
#[derive(Debug, Clone, Copy)]
pub struct SensorMeta {
    pub field: &'static str,
    pub state_class: &'static str,
    pub device_class: &'static str,
    pub unit: &'static str,
}

/// One metadata row per published field. The energy totals are monotonically
/// increasing counters; the windowed totals reset with their window; the
/// momentary power draw is a plain measurement.
pub const SENSORS: [SensorMeta; 8] = [
    SensorMeta { field: "total", state_class: "total_increasing", device_class: "energy", unit: "kWh" },
    SensorMeta { field: "total_day", state_class: "total_increasing", device_class: "energy", unit: "kWh" },
    SensorMeta { field: "total_night", state_class: "total_increasing", device_class: "energy", unit: "kWh" },
    SensorMeta { field: "total_1d", state_class: "total", device_class: "energy", unit: "kWh" },
    SensorMeta { field: "total_7d", state_class: "total", device_class: "energy", unit: "kWh" },
    SensorMeta { field: "total_30d", state_class: "total", device_class: "energy", unit: "kWh" },
    SensorMeta { field: "total_365d", state_class: "total", device_class: "energy", unit: "kWh" },
    SensorMeta { field: "current_power", state_class: "measurement", device_class: "power", unit: "W" },
];

/// One Home Assistant MQTT-discovery config document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorConfig {
    pub object_id: String,
    pub entity_id: String,
    pub name: String,
    pub state_topic: String,
    pub state_class: String,
    pub device_class: String,
    pub unit_of_measurement: String,
    pub value_template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_area: Option<String>,
}

impl SensorConfig {
    /// Builds the document for one field of one meter instance.
    pub fn new(
        meta: &SensorMeta,
        power_type: &str,
        state_topic: &str,
        area: Option<&str>,
    ) -> SensorConfig {
        let object_id = format!("energy_{power_type}_{}", meta.field);
        SensorConfig {
            entity_id: object_id.clone(),
            name: format!("Energy {power_type} {}", meta.field),
            state_topic: state_topic.to_string(),
            state_class: meta.state_class.to_string(),
            device_class: meta.device_class.to_string(),
            unit_of_measurement: meta.unit.to_string(),
            value_template: format!("{{{{ value_json.{} }}}}", meta.field),
            suggested_area: area.map(str::to_string),
            object_id,
        }
    }

    /// Discovery topic this document is published to.
    pub fn topic(&self) -> String {
        format!("homeassistant/sensor/{}/config", self.object_id)
    }
}

/// All discovery documents for one meter instance, in table order.
pub fn all_sensor_configs(
    power_type: &str,
    state_topic: &str,
    area: Option<&str>,
) -> Vec<SensorConfig> {
    SENSORS
        .iter()
        .map(|meta| SensorConfig::new(meta, power_type, state_topic, area))
        .collect()
}
