// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inspector configuration

use serde::{Deserialize, Serialize};

/// How a dispatch notification is mapped back to the signal that fired
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribution {
    /// Scan forward from the reported index through its overload family
    /// and pick the first capture point holding a buffered emission
    #[default]
    OverloadScan,
    /// Trust the reported index
    Exact,
}

/// Settings fixed at inspector construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectorConfig {
    /// Also record signals declared by ancestor classes
    pub include_inherited: bool,
    pub attribution: Attribution,
}

impl InspectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only record signals declared by the target's own class
    pub fn leaf_only() -> Self {
        Self {
            include_inherited: false,
            ..Self::default()
        }
    }

    pub fn with_attribution(mut self, attribution: Attribution) -> Self {
        self.attribution = attribution;
        self
    }
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            include_inherited: true,
            attribution: Attribution::default(),
        }
    }
}

#[cfg(test)]
#[path = "inspector_tests.rs"]
mod tests;
