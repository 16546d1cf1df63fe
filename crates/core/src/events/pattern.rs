// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event pattern matching

use crate::catalog::EventDescriptor;

/// Pattern for matching recorded events by `Class:name`
/// Supports:
///   - Exact: "NetworkReply:finished"
///   - Overload: "Object:destroyed()" matches only that signature
///   - Single wildcard: "Object:*" matches every signal declared by `Object`
///   - Global: "*" or "**" matches everything
///
/// Whitespace is ignored, so "A(int, string)" and "A(int,string)" are equal.
#[derive(Clone, Debug)]
pub struct EventPattern(String);

impl EventPattern {
    pub fn new(pattern: &str) -> Self {
        Self(pattern.chars().filter(|c| !c.is_whitespace()).collect())
    }

    /// Check if this pattern matches a descriptor
    pub fn matches(&self, event: &EventDescriptor) -> bool {
        // Empty pattern matches nothing
        if self.0.is_empty() {
            return false;
        }
        if self.0 == "*" || self.0 == "**" {
            return true;
        }

        let (class, signal) = match self.0.split_once(':') {
            Some((class, signal)) => (Some(class), signal),
            None => (None, self.0.as_str()),
        };

        let class_matches = match class {
            None | Some("*") => true,
            Some(class) => class == event.class_name,
        };
        let signal_matches = match signal {
            "*" => true,
            s if s.contains('(') => s == event.signature(),
            s => s == event.name,
        };
        class_matches && signal_matches
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
