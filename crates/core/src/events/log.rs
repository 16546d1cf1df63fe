// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered, append-only log of recorded emissions

use super::pattern::EventPattern;
use crate::catalog::EventDescriptor;
use crate::object::ObjectId;
use crate::value::{ParamType, Value};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Arc, RwLock};

/// One recorded emission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionRecord {
    /// Monotonic sequence number, starting at 1
    pub sequence: u64,
    /// Wall-clock time the emission was recorded
    pub timestamp: DateTime<Utc>,
    pub sender: ObjectId,
    /// The signal that fired, after overload attribution
    pub event: EventDescriptor,
    pub params: Vec<Value>,
}

impl EmissionRecord {
    pub fn name(&self) -> &str {
        &self.event.name
    }

    pub fn param_types(&self) -> &[ParamType] {
        &self.event.params
    }

    pub fn signature(&self) -> String {
        self.event.signature()
    }
}

/// Emission log shared between the recording inspector and its readers
///
/// Cloning yields another read handle onto the same log. Only the
/// inspector's dispatch handler appends.
#[derive(Debug, Clone, Default)]
pub struct EmissionLog {
    records: Arc<RwLock<Vec<EmissionRecord>>>,
}

impl EmissionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(
        &self,
        sender: ObjectId,
        event: EventDescriptor,
        params: Vec<Value>,
        timestamp: DateTime<Utc>,
    ) -> EmissionRecord {
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        let record = EmissionRecord {
            sequence: records.len() as u64 + 1,
            timestamp,
            sender,
            event,
            params,
        };
        records.push(record.clone());
        record
    }

    pub fn len(&self) -> usize {
        self.read(|r| r.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<EmissionRecord> {
        self.read(|r| r.get(index).cloned())
    }

    pub fn last(&self) -> Option<EmissionRecord> {
        self.read(|r| r.last().cloned())
    }

    /// Snapshot of all records in arrival order
    pub fn records(&self) -> Vec<EmissionRecord> {
        self.read(|r| r.clone())
    }

    pub fn iter(&self) -> std::vec::IntoIter<EmissionRecord> {
        self.records().into_iter()
    }

    /// Records whose event matches the pattern
    pub fn query(&self, pattern: &EventPattern) -> Vec<EmissionRecord> {
        self.read(|r| {
            r.iter()
                .filter(|rec| pattern.matches(&rec.event))
                .cloned()
                .collect()
        })
    }

    /// Records after a sequence number
    pub fn after(&self, sequence: u64) -> Vec<EmissionRecord> {
        self.read(|r| {
            r.iter()
                .filter(|rec| rec.sequence > sequence)
                .cloned()
                .collect()
        })
    }

    /// Sequence number of the latest record, 0 when empty
    pub fn current_sequence(&self) -> u64 {
        self.read(|r| r.last().map_or(0, |rec| rec.sequence))
    }

    fn read<T>(&self, f: impl FnOnce(&Vec<EmissionRecord>) -> T) -> T {
        f(&self.records.read().unwrap_or_else(|e| e.into_inner()))
    }
}

impl IntoIterator for &EmissionLog {
    type Item = EmissionRecord;
    type IntoIter = std::vec::IntoIter<EmissionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
