// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Class declarations

use super::meta_object::signature_of;
use crate::value::ParamType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// Name of the root class every class ultimately extends
pub const OBJECT_CLASS: &str = "Object";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassError {
    #[error("class name must not be empty")]
    EmptyClassName,
    #[error("method name must not be empty in class {0}")]
    EmptyMethodName(String),
    #[error("{class} declares {signature} twice")]
    DuplicateSignature { class: String, signature: String },
    #[error("{name} has {params} parameters but {defaults} defaults")]
    TooManyDefaults {
        name: String,
        params: usize,
        defaults: usize,
    },
}

/// What a method table entry is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    Signal,
    Slot,
    Method,
}

/// A single declared method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    pub name: String,
    pub params: Vec<ParamType>,
    pub kind: MethodKind,
}

impl MethodDef {
    pub fn signature(&self) -> String {
        signature_of(&self.name, &self.params)
    }
}

/// A class: its own methods in declaration order plus an optional parent
#[derive(Debug)]
pub struct ClassDef {
    name: String,
    parent: Option<Arc<ClassDef>>,
    methods: Vec<MethodDef>,
}

impl ClassDef {
    /// The built-in root class
    ///
    /// Declares `destroyed(object)` with a defaulted argument (so also
    /// `destroyed()`), `objectNameChanged(string)` and the `deleteLater()` slot.
    pub fn object() -> Arc<ClassDef> {
        static OBJECT: OnceLock<Arc<ClassDef>> = OnceLock::new();
        OBJECT
            .get_or_init(|| {
                let mut methods = Vec::new();
                push_overloads(
                    &mut methods,
                    "destroyed",
                    &[ParamType::Object],
                    1,
                    MethodKind::Signal,
                );
                methods.push(MethodDef {
                    name: "objectNameChanged".to_string(),
                    params: vec![ParamType::String],
                    kind: MethodKind::Signal,
                });
                methods.push(MethodDef {
                    name: "deleteLater".to_string(),
                    params: vec![],
                    kind: MethodKind::Slot,
                });
                Arc::new(ClassDef {
                    name: OBJECT_CLASS.to_string(),
                    parent: None,
                    methods,
                })
            })
            .clone()
    }

    /// Start declaring a class extending `Object`
    pub fn builder(name: impl Into<String>) -> ClassBuilder {
        ClassBuilder {
            name: name.into(),
            parent: ClassDef::object(),
            methods: Vec::new(),
            error: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<ClassDef>> {
        self.parent.as_ref()
    }

    pub fn methods(&self) -> &[MethodDef] {
        &self.methods
    }
}

/// Builder for `ClassDef`
///
/// Errors are deferred to `build()` so declarations can be chained.
pub struct ClassBuilder {
    name: String,
    parent: Arc<ClassDef>,
    methods: Vec<MethodDef>,
    error: Option<ClassError>,
}

impl ClassBuilder {
    pub fn extends(mut self, parent: &Arc<ClassDef>) -> Self {
        self.parent = Arc::clone(parent);
        self
    }

    pub fn signal(self, name: &str, params: &[ParamType]) -> Self {
        self.declare(name, params, 0, MethodKind::Signal)
    }

    /// Declare a signal whose last `defaults` parameters are optional
    ///
    /// Expands into one overload per arity, widest first.
    pub fn signal_with_defaults(self, name: &str, params: &[ParamType], defaults: usize) -> Self {
        self.declare(name, params, defaults, MethodKind::Signal)
    }

    pub fn slot(self, name: &str, params: &[ParamType]) -> Self {
        self.declare(name, params, 0, MethodKind::Slot)
    }

    pub fn method(self, name: &str, params: &[ParamType]) -> Self {
        self.declare(name, params, 0, MethodKind::Method)
    }

    fn declare(
        mut self,
        name: &str,
        params: &[ParamType],
        defaults: usize,
        kind: MethodKind,
    ) -> Self {
        if self.error.is_some() {
            return self;
        }
        if name.is_empty() {
            self.error = Some(ClassError::EmptyMethodName(self.name.clone()));
        } else if defaults > params.len() {
            self.error = Some(ClassError::TooManyDefaults {
                name: name.to_string(),
                params: params.len(),
                defaults,
            });
        } else {
            push_overloads(&mut self.methods, name, params, defaults, kind);
        }
        self
    }

    pub fn build(self) -> Result<Arc<ClassDef>, ClassError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if self.name.is_empty() {
            return Err(ClassError::EmptyClassName);
        }

        let mut seen = HashSet::new();
        for method in &self.methods {
            let signature = method.signature();
            if !seen.insert(signature.clone()) {
                return Err(ClassError::DuplicateSignature {
                    class: self.name,
                    signature,
                });
            }
        }

        Ok(Arc::new(ClassDef {
            name: self.name,
            parent: Some(self.parent),
            methods: self.methods,
        }))
    }
}

fn push_overloads(
    methods: &mut Vec<MethodDef>,
    name: &str,
    params: &[ParamType],
    defaults: usize,
    kind: MethodKind,
) {
    for dropped in 0..=defaults {
        methods.push(MethodDef {
            name: name.to_string(),
            params: params[..params.len() - dropped].to_vec(),
            kind,
        });
    }
}

#[cfg(test)]
#[path = "class_tests.rs"]
mod tests;
