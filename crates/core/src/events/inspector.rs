// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inspector: subscribes to every signal of a target and records emissions

use super::capture::CapturePoint;
use super::log::{EmissionLog, EmissionRecord};
use super::pattern::EventPattern;
use crate::catalog::{self, EventDescriptor};
use crate::clock::{Clock, SystemClock};
use crate::config::{Attribution, InspectorConfig};
use crate::error::InspectError;
use crate::introspect::{Callback, ConnectError, Connection, Delivery, Introspectable};
use crate::value::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tracing::{debug, info, warn};

/// State reachable from the installed callbacks
///
/// Callbacks hold it weakly, so deliveries arriving after the inspector is
/// dropped are ignored.
struct Recorder<C: Clock> {
    captures: Mutex<BTreeMap<usize, CapturePoint>>,
    log: EmissionLog,
    clock: C,
    attribution: Attribution,
    unattributed: AtomicU64,
}

impl<C: Clock> Recorder<C> {
    fn capture(&self, index: usize, args: &[Value]) {
        let mut captures = self.captures.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(cp) = captures.get_mut(&index) {
            cp.push(args);
        }
    }

    /// Single dispatch entry point, invoked after the capture of every emission
    fn dispatch(&self, delivery: &Delivery<'_>) {
        let (taken, orphaned) = {
            let mut captures = self.captures.lock().unwrap_or_else(|e| e.into_inner());
            let taken = self.take_resolved(&mut captures, delivery.sender_index);
            // Whatever the reported family captured for this emission is
            // orphaned; drain it so it cannot be mistaken for a later emission.
            // Other families may hold captures still awaiting their dispatch.
            let orphaned: usize = if taken.is_err() {
                let family = family_of(&captures, delivery.sender_index);
                captures
                    .values_mut()
                    .filter(|cp| cp.descriptor().family == family)
                    .filter_map(CapturePoint::take)
                    .map(|(_, discarded)| discarded + 1)
                    .sum()
            } else {
                0
            };
            (taken, orphaned)
        };

        match taken {
            Ok((event, params, discarded)) => {
                if discarded > 0 {
                    warn!(
                        signal = %event.signature(),
                        discarded,
                        "discarding emissions buffered beyond the first"
                    );
                }
                let record = self
                    .log
                    .append(delivery.sender, event, params, self.clock.now());
                debug!(
                    sequence = record.sequence,
                    signal = %record.signature(),
                    sender = %record.sender,
                    "recorded emission"
                );
            }
            Err(e) => {
                self.unattributed.fetch_add(1, Ordering::Relaxed);
                warn!(
                    sender = %delivery.sender,
                    error = %e,
                    orphaned,
                    "dropping unattributable emission"
                );
            }
        }
    }

    fn take_resolved(
        &self,
        captures: &mut BTreeMap<usize, CapturePoint>,
        reported: usize,
    ) -> Result<(EventDescriptor, Vec<Value>, usize), InspectError> {
        let index = self
            .resolve(captures, reported)
            .ok_or(InspectError::UnattributableEmission { reported })?;
        let cp = captures
            .get_mut(&index)
            .ok_or(InspectError::UnattributableEmission { reported })?;
        let (params, discarded) = cp
            .take()
            .ok_or(InspectError::UnattributableEmission { reported })?;
        Ok((cp.descriptor().clone(), params, discarded))
    }

    /// Find the capture point that caught the emission reported at `reported`
    ///
    /// The dispatcher may report the head of an overload family instead of
    /// the overload that fired. Capture points of that family are scanned in
    /// ascending index order from the reported index; the first one holding
    /// a buffered emission is the source.
    fn resolve(&self, captures: &BTreeMap<usize, CapturePoint>, reported: usize) -> Option<usize> {
        match self.attribution {
            Attribution::Exact => captures
                .get(&reported)
                .filter(|cp| cp.count() > 0)
                .map(|_| reported),
            Attribution::OverloadScan => {
                let family = family_of(captures, reported);
                captures
                    .range(reported..)
                    .map(|(_, cp)| cp)
                    .filter(|cp| cp.descriptor().family == family)
                    .find(|cp| cp.count() > 0)
                    .map(|cp| cp.descriptor().index)
            }
        }
    }
}

/// Overload family of the signal at `index`, or `index` itself if uncataloged
fn family_of(captures: &BTreeMap<usize, CapturePoint>, index: usize) -> usize {
    captures
        .get(&index)
        .map_or(index, |cp| cp.descriptor().family)
}

/// Records every signal emitted by a target object
///
/// One capture point is installed per cataloged signal at construction.
/// Dropping the inspector disconnects them all; the target is unaffected.
pub struct Inspector<C: Clock = SystemClock> {
    connections: Vec<Connection>,
    catalog: Vec<EventDescriptor>,
    recorder: Arc<Recorder<C>>,
}

impl Inspector<SystemClock> {
    /// Inspect `target`, optionally including signals of ancestor classes
    pub fn new(target: &dyn Introspectable, include_inherited: bool) -> Result<Self, InspectError> {
        let config = InspectorConfig {
            include_inherited,
            ..InspectorConfig::default()
        };
        Self::with_config(target, config, SystemClock)
    }
}

impl<C: Clock + 'static> Inspector<C> {
    /// Construction is all-or-nothing: if any subscription fails, the ones
    /// already installed are disconnected before the error is returned.
    pub fn with_config(
        target: &dyn Introspectable,
        config: InspectorConfig,
        clock: C,
    ) -> Result<Self, InspectError> {
        let class = target
            .meta_object()
            .map(|m| m.class_name().to_string())
            .unwrap_or_default();
        if !target.is_alive() {
            return Err(InspectError::Subscribe {
                signature: class,
                source: ConnectError::TargetDestroyed,
            });
        }
        let catalog = catalog::resolve(target, config.include_inherited)?;

        let captures = catalog
            .iter()
            .map(|d| (d.index, CapturePoint::new(d.clone())))
            .collect();
        let recorder = Arc::new(Recorder {
            captures: Mutex::new(captures),
            log: EmissionLog::new(),
            clock,
            attribution: config.attribution,
            unattributed: AtomicU64::new(0),
        });

        let mut connections = Vec::with_capacity(catalog.len() * 2);
        for descriptor in &catalog {
            let index = descriptor.index;
            let subscribe = |callback: Callback| {
                target
                    .subscribe(index, callback)
                    .map_err(|source| InspectError::Subscribe {
                        signature: descriptor.signature(),
                        source,
                    })
            };

            // Capture first so the buffer is filled before dispatch runs
            let weak = Arc::downgrade(&recorder);
            let capture: Callback = Arc::new(move |d: &Delivery<'_>| {
                if let Some(recorder) = Weak::upgrade(&weak) {
                    recorder.capture(index, d.args);
                }
            });
            connections.push(subscribe(capture)?);

            let weak = Arc::downgrade(&recorder);
            let dispatch: Callback = Arc::new(move |d: &Delivery<'_>| {
                if let Some(recorder) = Weak::upgrade(&weak) {
                    recorder.dispatch(d);
                }
            });
            connections.push(subscribe(dispatch)?);
        }

        info!(
            class = %class,
            events = catalog.len(),
            include_inherited = config.include_inherited,
            "inspector attached"
        );

        Ok(Self {
            connections,
            catalog,
            recorder,
        })
    }

    /// Read handle onto the emission log
    pub fn log(&self) -> &EmissionLog {
        &self.recorder.log
    }

    pub fn len(&self) -> usize {
        self.recorder.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recorder.log.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<EmissionRecord> {
        self.recorder.log.get(index)
    }

    pub fn records(&self) -> Vec<EmissionRecord> {
        self.recorder.log.records()
    }

    /// Records whose qualified name matches `pattern`
    pub fn query(&self, pattern: &EventPattern) -> Vec<EmissionRecord> {
        self.recorder.log.query(pattern)
    }

    /// Records newer than `sequence`
    pub fn after(&self, sequence: u64) -> Vec<EmissionRecord> {
        self.recorder.log.after(sequence)
    }

    /// Signals this inspector listens to, in table order
    pub fn catalog(&self) -> &[EventDescriptor] {
        &self.catalog
    }

    /// Emissions dropped because no capture point could be matched
    pub fn unattributed(&self) -> u64 {
        self.recorder.unattributed.load(Ordering::Relaxed)
    }

    /// Emissions captured but not yet consumed by dispatch
    pub fn pending(&self) -> usize {
        self.recorder
            .captures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .map(CapturePoint::count)
            .sum()
    }
}

impl<C: Clock> Drop for Inspector<C> {
    fn drop(&mut self) {
        debug!(
            connections = self.connections.len(),
            records = self.recorder.log.len(),
            "inspector detached"
        );
        self.connections.clear();
    }
}

impl<C: Clock> std::fmt::Debug for Inspector<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inspector")
            .field("events", &self.catalog.len())
            .field("records", &self.recorder.log.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "inspector_tests.rs"]
mod tests;
