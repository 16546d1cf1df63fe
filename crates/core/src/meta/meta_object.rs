// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flattened method tables

use super::class::{ClassDef, MethodKind};
use crate::value::ParamType;
use serde::Serialize;
use std::sync::Arc;

/// Format `name(t1,t2)` for a method
pub fn signature_of(name: &str, params: &[ParamType]) -> String {
    let params: Vec<&str> = params.iter().map(ParamType::as_str).collect();
    format!("{}({})", name, params.join(","))
}

/// One entry of a flattened method table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaMethod {
    /// Position in the table, stable for the lifetime of the `MetaObject`
    pub index: usize,
    pub name: String,
    pub params: Vec<ParamType>,
    pub kind: MethodKind,
    /// Class that declared this method
    pub class_name: String,
    /// Lowest index among same-named methods of the declaring class
    pub family: usize,
}

impl MetaMethod {
    pub fn signature(&self) -> String {
        signature_of(&self.name, &self.params)
    }

    pub fn is_signal(&self) -> bool {
        self.kind == MethodKind::Signal
    }
}

/// Method table of a class and all its ancestors
///
/// Ancestors come first, each class in declaration order, so indices of
/// inherited methods are identical across all subclasses.
#[derive(Debug)]
pub struct MetaObject {
    class_name: String,
    ancestry: Vec<String>,
    methods: Vec<MetaMethod>,
    method_offset: usize,
}

impl MetaObject {
    pub fn for_class(class: &Arc<ClassDef>) -> Arc<MetaObject> {
        let mut chain = vec![Arc::clone(class)];
        let mut next = class.parent().cloned();
        while let Some(parent) = next {
            next = parent.parent().cloned();
            chain.push(parent);
        }
        chain.reverse();

        let mut methods: Vec<MetaMethod> = Vec::new();
        let mut method_offset = 0;
        for def in &chain {
            method_offset = methods.len();
            for method in def.methods() {
                let index = methods.len();
                let family = methods[method_offset..]
                    .iter()
                    .find(|m| m.name == method.name)
                    .map_or(index, |m| m.index);
                methods.push(MetaMethod {
                    index,
                    name: method.name.clone(),
                    params: method.params.clone(),
                    kind: method.kind,
                    class_name: def.name().to_string(),
                    family,
                });
            }
        }

        Arc::new(MetaObject {
            class_name: class.name().to_string(),
            ancestry: chain.iter().map(|c| c.name().to_string()).collect(),
            methods,
            method_offset,
        })
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Index of the first method declared by the most-derived class
    pub fn method_offset(&self) -> usize {
        self.method_offset
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    pub fn method(&self, index: usize) -> Option<&MetaMethod> {
        self.methods.get(index)
    }

    pub fn methods(&self) -> &[MetaMethod] {
        &self.methods
    }

    /// Whether this class is, or extends, `class_name`
    pub fn inherits(&self, class_name: &str) -> bool {
        self.ancestry.iter().any(|c| c == class_name)
    }

    pub fn index_of_method(&self, signature: &str) -> Option<usize> {
        let wanted = normalize(signature);
        self.methods
            .iter()
            .find(|m| m.signature() == wanted)
            .map(|m| m.index)
    }

    pub fn index_of_signal(&self, signature: &str) -> Option<usize> {
        self.index_of_method(signature)
            .filter(|&i| self.methods.get(i).is_some_and(MetaMethod::is_signal))
    }
}

fn normalize(signature: &str) -> String {
    signature.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
#[path = "meta_object_tests.rs"]
mod tests;
