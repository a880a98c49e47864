//! Unit tests for the Home Assistant discovery documents.

use obis2mqtt::hass::{all_sensor_configs, SENSORS};
use obis2mqtt::obis::LABEL_RULES;

/// Tests the discovery document of the total counter for the main meter.
#[test]
fn test_total_config_for_main_meter() {
    let configs = all_sensor_configs("main", "house/power/main", None);
    let total = configs.iter().find(|c| c.object_id == "energy_main_total").unwrap();

    assert_eq!(total.entity_id, "energy_main_total");
    assert_eq!(total.name, "Energy main total");
    assert_eq!(total.state_topic, "house/power/main");
    assert_eq!(total.state_class, "total_increasing");
    assert_eq!(total.device_class, "energy");
    assert_eq!(total.unit_of_measurement, "kWh");
    assert_eq!(total.value_template, "{{ value_json.total }}");
    assert_eq!(total.topic(), "homeassistant/sensor/energy_main_total/config");
}

/// Tests that the momentary power draw is announced as a measurement in
/// watts.
#[test]
fn test_current_power_is_a_measurement() {
    let configs = all_sensor_configs("main", "house/power/main", None);
    let power = configs
        .iter()
        .find(|c| c.object_id == "energy_main_current_power")
        .unwrap();

    assert_eq!(power.state_class, "measurement");
    assert_eq!(power.device_class, "power");
    assert_eq!(power.unit_of_measurement, "W");
    assert_eq!(power.value_template, "{{ value_json.current_power }}");
}

/// Tests that the windowed totals use the resetting "total" state class while
/// the tariff counters keep "total_increasing".
#[test]
fn test_windowed_totals_reset() {
    for meta in &SENSORS {
        let expected = match meta.field {
            "total" | "total_day" | "total_night" => "total_increasing",
            "current_power" => "measurement",
            _ => "total",
        };
        assert_eq!(meta.state_class, expected, "field {}", meta.field);
    }
}

/// Tests that exactly one discovery document exists per extracted field.
#[test]
fn test_one_config_per_extracted_field() {
    let mut announced: Vec<_> = SENSORS.iter().map(|m| m.field).collect();
    let mut extracted: Vec<_> = LABEL_RULES.iter().map(|r| r.field).collect();
    announced.sort_unstable();
    extracted.sort_unstable();
    assert_eq!(announced, extracted);
}

/// Tests that the power type flows into ids, names, and topics.
#[test]
fn test_power_type_flows_into_identifiers() {
    let configs = all_sensor_configs("solar", "house/power/solar", None);
    assert_eq!(configs.len(), 8);
    for config in &configs {
        assert!(config.object_id.starts_with("energy_solar_"));
        assert!(config.name.starts_with("Energy solar "));
        assert_eq!(config.state_topic, "house/power/solar");
    }
}

/// Tests that a configured area is carried in the document and omitted from
/// the JSON entirely when unset.
#[test]
fn test_area_is_optional() {
    let with_area = all_sensor_configs("main", "house/power/main", Some("cellar"));
    let json = serde_json::to_value(&with_area[0]).unwrap();
    assert_eq!(json["suggested_area"], "cellar");

    let without_area = all_sensor_configs("main", "house/power/main", None);
    let json = serde_json::to_value(&without_area[0]).unwrap();
    assert!(json.get("suggested_area").is_none());
}
