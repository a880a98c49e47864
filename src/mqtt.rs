//! # MQTT Publisher
//!
//! Thin wrapper around rumqttc's `AsyncClient`. Keep-alive, reconnection, and
//! broker retries all live in the rumqttc event loop, driven by a background
//! task; the bridge core only enqueues publishes and never blocks on broker
//! I/O.

use crate::config::Config;
use crate::error::BridgeError;
use log::{debug, info, warn};
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use std::time::Duration;

/// Handle used by the bridge to publish readings and discovery documents.
pub struct MqttPublisher {
    client: AsyncClient,
}

impl MqttPublisher {
    /// Creates the client and spawns the event-loop driver task. Connection
    /// establishment is lazy; publishes enqueued before the broker is
    /// reachable sit in the client's request queue.
    pub fn connect(config: &Config) -> MqttPublisher {
        let client_id = format!("obis2mqtt-{}", config.power_type);
        let mut options = MqttOptions::new(client_id, &config.mqtt_host, 1883);
        options.set_keep_alive(Duration::from_secs(30));

        let (client, mut event_loop) = AsyncClient::new(options, 16);
        tokio::spawn(async move {
            loop {
                match event_loop.poll().await {
                    Ok(Event::Incoming(Packet::ConnAck(_))) => {
                        info!("connected to MQTT broker");
                    }
                    Ok(event) => debug!("mqtt event: {event:?}"),
                    Err(e) => {
                        warn!("mqtt connection error: {e}");
                        tokio::time::sleep(Duration::from_secs(1)).await;
                    }
                }
            }
        });

        MqttPublisher { client }
    }

    /// Enqueues one payload for the broker, fire-and-forget QoS.
    pub async fn publish(&self, topic: &str, payload: &str) -> Result<(), BridgeError> {
        self.client
            .publish(topic, QoS::AtMostOnce, false, payload)
            .await
            .map_err(|e| BridgeError::MqttError(e.to_string()))
    }
}
