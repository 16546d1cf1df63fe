// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Emission recording
//!
//! This module provides:
//! - `Inspector` - Subscribe to every signal of a target and record emissions
//! - `EmissionLog` - Ordered, append-only record of what was emitted
//! - `EventPattern` - Pattern matching for querying the log

mod capture;
mod inspector;
mod log;
mod pattern;

pub use inspector::Inspector;
pub use log::{EmissionLog, EmissionRecord};
pub use pattern::EventPattern;
