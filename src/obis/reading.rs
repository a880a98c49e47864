//! The decoded meter reading model.

use serde::Serialize;
use std::collections::BTreeMap;

/// A sparse mapping from field name to measured value, extracted from one
/// telegram frame. Created fresh per frame; partial readings are never
/// carried over to the next frame.
///
/// A field whose value slice failed numeric parsing is present with a NaN
/// value, which keeps "present but malformed" distinguishable from "absent".
/// NaN serializes to JSON `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Reading {
    fields: BTreeMap<&'static str, f64>,
}

impl Reading {
    pub fn new() -> Self {
        Reading::default()
    }

    /// Sets a field value, replacing any earlier value of the same field.
    pub fn insert(&mut self, field: &'static str, value: f64) {
        self.fields.insert(field, value);
    }

    pub fn get(&self, field: &str) -> Option<f64> {
        self.fields.get(field).copied()
    }

    /// Number of distinct fields present.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether this reading carries at least `threshold` distinct fields and
    /// is therefore eligible for publishing.
    pub fn is_complete(&self, threshold: usize) -> bool {
        self.fields.len() >= threshold
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.fields.iter().map(|(&field, &value)| (field, value))
    }
}
