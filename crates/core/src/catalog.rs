// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event catalog resolution
//!
//! Enumerates the signals a target can emit. The returned order (ascending
//! method index) doubles as the search order for overload attribution.

use crate::error::InspectError;
use crate::introspect::Introspectable;
use crate::meta::{signature_of, MetaMethod, MetaObject};
use crate::value::ParamType;
use serde::Serialize;

/// One emittable event kind of the target's type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDescriptor {
    pub index: usize,
    pub name: String,
    pub params: Vec<ParamType>,
    /// Declared by an ancestor rather than the target's own type
    pub inherited: bool,
    pub class_name: String,
    /// Lowest index among overloads sharing this name in the declaring class
    pub family: usize,
}

impl EventDescriptor {
    fn from_method(method: &MetaMethod, meta: &MetaObject) -> Self {
        Self {
            index: method.index,
            name: method.name.clone(),
            params: method.params.clone(),
            inherited: method.index < meta.method_offset(),
            class_name: method.class_name.clone(),
            family: method.family,
        }
    }

    pub fn signature(&self) -> String {
        signature_of(&self.name, &self.params)
    }

    /// Name qualified by its declaring class, e.g. `Object:destroyed`
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.class_name, self.name)
    }
}

/// List the signals of `target`, optionally leaving out inherited ones
pub fn resolve(
    target: &dyn Introspectable,
    include_inherited: bool,
) -> Result<Vec<EventDescriptor>, InspectError> {
    let meta = target
        .meta_object()
        .ok_or(InspectError::IntrospectionUnavailable)?;

    let start = if include_inherited {
        0
    } else {
        meta.method_offset()
    };

    Ok(meta
        .methods()
        .iter()
        .skip(start)
        .filter(|m| m.is_signal())
        .map(|m| EventDescriptor::from_method(m, &meta))
        .collect())
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
