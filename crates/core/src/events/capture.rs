// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-signal capture buffers

use crate::catalog::EventDescriptor;
use crate::value::Value;
use std::collections::VecDeque;

/// Passive recorder for one cataloged signal
///
/// Buffers the arguments of emissions not yet consumed by dispatch. Holds
/// no attribution logic.
#[derive(Debug)]
pub(crate) struct CapturePoint {
    descriptor: EventDescriptor,
    buffer: VecDeque<Vec<Value>>,
}

impl CapturePoint {
    pub(crate) fn new(descriptor: EventDescriptor) -> Self {
        Self {
            descriptor,
            buffer: VecDeque::new(),
        }
    }

    pub(crate) fn descriptor(&self) -> &EventDescriptor {
        &self.descriptor
    }

    pub(crate) fn push(&mut self, args: &[Value]) {
        self.buffer.push_back(args.to_vec());
    }

    pub(crate) fn count(&self) -> usize {
        self.buffer.len()
    }

    /// Take the earliest buffered emission and clear the rest
    ///
    /// Returns the arguments and how many later entries were discarded.
    pub(crate) fn take(&mut self) -> Option<(Vec<Value>, usize)> {
        let first = self.buffer.pop_front()?;
        let discarded = self.buffer.len();
        self.buffer.clear();
        Some((first, discarded))
    }
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;
