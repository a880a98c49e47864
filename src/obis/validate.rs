//! # Reading Validation and Throttling
//!
//! Decides whether an extracted [`Reading`] is publishable: it must carry the
//! complete field set, and publishes are rate-limited because the meter emits
//! telegrams far more often than consumers need updates. Discovery
//! re-registration runs on its own, independently configured throttle.
//!
//! All state lives in the validator instance and time is caller-supplied, so
//! tests drive the clock directly.

use crate::constants::COMPLETE_FIELD_COUNT;
use crate::obis::reading::Reading;
use std::time::{Duration, Instant};

/// Timestamp-and-counter pair backing one throttle window.
#[derive(Debug, Clone, Copy, Default)]
struct ThrottleState {
    last: Option<Instant>,
    count: u64,
}

impl ThrottleState {
    /// Accepts and stamps `now` when at least `interval` has passed since the
    /// last accepted event, or none was accepted yet.
    fn accept(&mut self, interval: Duration, now: Instant) -> bool {
        if let Some(last) = self.last {
            if now.duration_since(last) < interval {
                return false;
            }
        }
        self.last = Some(now);
        self.count += 1;
        true
    }
}

/// Gatekeeper between extraction and the publisher.
#[derive(Debug)]
pub struct ReadingValidator {
    min_field_count: usize,
    data_interval: Duration,
    register_interval: Duration,
    publish: ThrottleState,
    register: ThrottleState,
}

impl ReadingValidator {
    pub fn new(data_interval: Duration, register_interval: Duration) -> Self {
        ReadingValidator {
            min_field_count: COMPLETE_FIELD_COUNT,
            data_interval,
            register_interval,
            publish: ThrottleState::default(),
            register: ThrottleState::default(),
        }
    }

    /// Returns the reading back when it should be published: complete, and
    /// outside the data-interval window of the previous publish. Incomplete
    /// or throttled readings are dropped without side effects.
    pub fn consider(&mut self, reading: Reading, now: Instant) -> Option<Reading> {
        if !reading.is_complete(self.min_field_count) {
            return None;
        }
        self.publish
            .accept(self.data_interval, now)
            .then_some(reading)
    }

    /// Whether the discovery configs should be (re-)emitted this cycle.
    /// Co-scheduled with publishing but never a precondition for it.
    pub fn should_register(&mut self, now: Instant) -> bool {
        self.register.accept(self.register_interval, now)
    }

    /// Records an out-of-cycle registration, e.g. the forced one on
    /// reconnect, so the register throttle restarts from `now`.
    pub fn mark_registered(&mut self, now: Instant) {
        self.register.last = Some(now);
        self.register.count += 1;
    }

    /// Number of readings accepted for publishing so far.
    pub fn publish_count(&self) -> u64 {
        self.publish.count
    }

    /// Number of discovery registrations so far.
    pub fn register_count(&self) -> u64 {
        self.register.count
    }
}
