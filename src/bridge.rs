//! # Bridge Pipeline and Run Loop
//!
//! Single-threaded, event-driven core: each inbound link event is fully
//! processed through reassembly, extraction, and validation before the next
//! one is handled, so no throttle or buffer state is ever touched
//! concurrently.
//!
//! [`Pipeline`] is pure state with no I/O of its own: it maps typed inbound
//! events (`Data`, `Closed`) to outbound effects (`Publish`, `Reconnect`).
//! [`Bridge`] owns the transport and broker handles and executes those
//! effects in its async run loop.

use crate::config::Config;
use crate::constants::{READ_CHUNK_SIZE, RECONNECT_DELAY_MS};
use crate::error::BridgeError;
use crate::hass;
use crate::logging::{log_info, log_warn};
use crate::mqtt::MqttPublisher;
use crate::obis::{extract, FrameReassembler, ReadingValidator};
use crate::transport;
use std::time::{Duration, Instant};

/// Inbound event from the meter link.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkEvent {
    /// A chunk of raw bytes arrived.
    Data(Vec<u8>),
    /// The link closed or failed.
    Closed,
}

/// Outbound effect requested by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Publish `payload` to `topic`.
    Publish { topic: String, payload: String },
    /// Re-open the meter link.
    Reconnect,
}

/// The I/O-free core: reassembler, validator, and the configuration slice
/// needed to shape topics and discovery documents.
pub struct Pipeline {
    reassembler: FrameReassembler,
    validator: ReadingValidator,
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Pipeline {
        let validator = ReadingValidator::new(config.data_interval, config.register_interval);
        Pipeline {
            reassembler: FrameReassembler::new(),
            validator,
            config,
        }
    }

    /// Processes one inbound event into its outbound effects.
    ///
    /// `Closed` re-registers every sensor and asks for a reconnect; partial
    /// frame bytes stay buffered, so extraction resumes seamlessly once data
    /// flows again.
    pub fn handle_event(&mut self, event: LinkEvent, now: Instant) -> Vec<Effect> {
        match event {
            LinkEvent::Data(chunk) => self.handle_data(&chunk, now),
            LinkEvent::Closed => {
                let mut effects = self.registration_effects();
                self.validator.mark_registered(now);
                effects.push(Effect::Reconnect);
                effects
            }
        }
    }

    fn handle_data(&mut self, chunk: &[u8], now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();
        for frame in self.reassembler.feed(chunk) {
            let reading = extract(&frame);

            // co-scheduled with validation, but never a precondition for it
            if self.validator.should_register(now) {
                effects.extend(self.registration_effects());
            }

            if let Some(reading) = self.validator.consider(reading, now) {
                match serde_json::to_string(&reading) {
                    Ok(payload) => {
                        log_info(&format!(
                            "sending data point #{}",
                            self.validator.publish_count()
                        ));
                        effects.push(Effect::Publish {
                            topic: self.config.mqtt_topic.clone(),
                            payload,
                        });
                    }
                    Err(e) => log_warn(&format!("failed to serialize reading: {e}")),
                }
            }
        }
        effects
    }

    fn registration_effects(&self) -> Vec<Effect> {
        let configs = hass::all_sensor_configs(
            &self.config.power_type,
            &self.config.mqtt_topic,
            self.config.area.as_deref(),
        );
        let mut effects = Vec::with_capacity(configs.len());
        for config in configs {
            match serde_json::to_string(&config) {
                Ok(payload) => {
                    log_info(&format!("registering config {}", config.object_id));
                    effects.push(Effect::Publish {
                        topic: config.topic(),
                        payload,
                    });
                }
                Err(e) => log_warn(&format!("failed to serialize discovery config: {e}")),
            }
        }
        effects
    }

    /// Readings accepted for publishing so far.
    pub fn publish_count(&self) -> u64 {
        self.validator.publish_count()
    }
}

/// Owns the meter link and broker handle and runs the pipeline until the
/// process is stopped.
pub struct Bridge {
    pipeline: Pipeline,
    publisher: MqttPublisher,
    config: Config,
}

impl Bridge {
    pub fn new(config: Config, publisher: MqttPublisher) -> Bridge {
        Bridge {
            pipeline: Pipeline::new(config.clone()),
            publisher,
            config,
        }
    }

    /// Runs forever: register discovery, open the link, pump chunks, and
    /// reconnect with a short delay whenever the link drops. Link loss is
    /// never fatal; only startup configuration problems are.
    pub async fn run(&mut self) -> Result<(), BridgeError> {
        // startup behaves like a reconnect: register, then open the link
        let mut pending = self.pipeline.handle_event(LinkEvent::Closed, Instant::now());

        loop {
            self.execute(pending.drain(..)).await;

            let mut link = match transport::connect(&self.config).await {
                Ok(link) => link,
                Err(e) => {
                    log_warn(&format!("meter link unavailable: {e}"));
                    tokio::time::sleep(Duration::from_millis(RECONNECT_DELAY_MS)).await;
                    continue;
                }
            };
            log_info("meter link established");

            let mut buf = vec![0u8; READ_CHUNK_SIZE];
            loop {
                match link.read_chunk(&mut buf).await {
                    Ok(0) => {
                        log_info("connection closed");
                        break;
                    }
                    Ok(n) => {
                        let effects = self
                            .pipeline
                            .handle_event(LinkEvent::Data(buf[..n].to_vec()), Instant::now());
                        self.execute(effects.into_iter()).await;
                    }
                    Err(e) => {
                        log_warn(&format!("meter link error: {e}"));
                        break;
                    }
                }
            }

            pending = self.pipeline.handle_event(LinkEvent::Closed, Instant::now());
            tokio::time::sleep(Duration::from_millis(RECONNECT_DELAY_MS)).await;
        }
    }

    async fn execute(&self, effects: impl Iterator<Item = Effect>) {
        for effect in effects {
            match effect {
                Effect::Publish { topic, payload } => {
                    if let Err(e) = self.publisher.publish(&topic, &payload).await {
                        log_warn(&format!("publish to {topic} failed: {e}"));
                    }
                }
                // the run loop itself re-opens the link
                Effect::Reconnect => {}
            }
        }
    }
}
