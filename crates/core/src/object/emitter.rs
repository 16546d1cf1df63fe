// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Emitter: a live object instance over a `MetaObject`

use super::ObjectId;
use crate::introspect::{
    Callback, ConnectError, Connection, ConnectionHost, ConnectionId, Delivery, Introspectable,
};
use crate::meta::{ClassDef, MetaObject};
use crate::value::{ParamType, Value};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EmitError {
    #[error("no method at index {0}")]
    UnknownMethod(usize),
    #[error("no signal with signature {0}")]
    UnknownSignal(String),
    #[error("{0} is not a signal")]
    NotASignal(String),
    #[error("{signature} takes {expected} arguments, got {actual}")]
    ArityMismatch {
        signature: String,
        expected: usize,
        actual: usize,
    },
    #[error("{signature} argument {position} must be {expected}, got {actual}")]
    TypeMismatch {
        signature: String,
        position: usize,
        expected: ParamType,
        actual: ParamType,
    },
}

/// Which index the dispatcher reports to listeners
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderIndexing {
    /// Report the lowest index of the overload family, whichever overload fired
    #[default]
    FamilyHead,
    /// Report the index of the overload that fired
    Exact,
}

struct Listener {
    id: ConnectionId,
    index: usize,
    callback: Callback,
}

struct ObjectInner {
    id: ObjectId,
    meta: Arc<MetaObject>,
    indexing: SenderIndexing,
    name: Mutex<String>,
    listeners: Mutex<Vec<Listener>>,
    next_connection: AtomicU64,
    destroying: AtomicBool,
}

impl ObjectInner {
    fn connect(self: &Arc<Self>, index: usize, callback: Callback) -> Result<Connection, ConnectError> {
        if self.destroying.load(Ordering::SeqCst) {
            return Err(ConnectError::TargetDestroyed);
        }
        let method = self
            .meta
            .method(index)
            .ok_or(ConnectError::UnknownMethod(index))?;
        if !method.is_signal() {
            return Err(ConnectError::NotASignal {
                index,
                signature: method.signature(),
            });
        }

        let id = ConnectionId(self.next_connection.fetch_add(1, Ordering::SeqCst));
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Listener {
                id,
                index,
                callback,
            });

        let weak: Weak<ObjectInner> = Arc::downgrade(self);
        let host: Weak<dyn ConnectionHost> = weak;
        Ok(Connection::new(id, host))
    }

    fn emit(&self, index: usize, args: &[Value]) -> Result<(), EmitError> {
        let method = self
            .meta
            .method(index)
            .ok_or(EmitError::UnknownMethod(index))?;
        if !method.is_signal() {
            return Err(EmitError::NotASignal(method.signature()));
        }
        if method.params.len() != args.len() {
            return Err(EmitError::ArityMismatch {
                signature: method.signature(),
                expected: method.params.len(),
                actual: args.len(),
            });
        }
        for (position, (expected, arg)) in method.params.iter().zip(args).enumerate() {
            if !arg.conforms_to(*expected) {
                return Err(EmitError::TypeMismatch {
                    signature: method.signature(),
                    position,
                    expected: *expected,
                    actual: arg.param_type(),
                });
            }
        }

        // Snapshot so no lock is held while listeners run
        let callbacks: Vec<Callback> = self
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|l| l.index == index)
            .map(|l| Arc::clone(&l.callback))
            .collect();

        let sender_index = match self.indexing {
            SenderIndexing::FamilyHead => method.family,
            SenderIndexing::Exact => index,
        };
        tracing::trace!(
            object = %self.id,
            signal = %method.signature(),
            sender_index,
            listeners = callbacks.len(),
            "emit"
        );

        let delivery = Delivery {
            sender: self.id,
            sender_index,
            args,
        };
        for callback in callbacks {
            callback(&delivery);
        }
        Ok(())
    }
}

impl ConnectionHost for ObjectInner {
    fn disconnect(&self, id: ConnectionId) -> bool {
        let mut listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        let before = listeners.len();
        listeners.retain(|l| l.id != id);
        listeners.len() != before
    }
}

/// A live object that emits the signals of its class
///
/// Dropping the emitter emits `destroyed(object)` with its own id, then
/// releases every listener.
pub struct Emitter {
    inner: Arc<ObjectInner>,
}

impl Emitter {
    pub fn new(class: &Arc<ClassDef>) -> Self {
        Self::with_indexing(class, SenderIndexing::default())
    }

    pub fn with_indexing(class: &Arc<ClassDef>, indexing: SenderIndexing) -> Self {
        Self {
            inner: Arc::new(ObjectInner {
                id: ObjectId::next(),
                meta: MetaObject::for_class(class),
                indexing,
                name: Mutex::new(String::new()),
                listeners: Mutex::new(Vec::new()),
                next_connection: AtomicU64::new(1),
                destroying: AtomicBool::new(false),
            }),
        }
    }

    pub fn id(&self) -> ObjectId {
        self.inner.id
    }

    pub fn meta(&self) -> &Arc<MetaObject> {
        &self.inner.meta
    }

    /// Weak handle that stays introspectable after the emitter is dropped
    pub fn handle(&self) -> ObjectRef {
        ObjectRef {
            id: self.inner.id,
            meta: Arc::clone(&self.inner.meta),
            inner: Arc::downgrade(&self.inner),
        }
    }

    pub fn connect(&self, index: usize, callback: Callback) -> Result<Connection, ConnectError> {
        self.inner.connect(index, callback)
    }

    /// Emit the signal at `index`, synchronously calling its listeners
    pub fn emit(&self, index: usize, args: Vec<Value>) -> Result<(), EmitError> {
        self.inner.emit(index, &args)
    }

    /// Emit by signature, e.g. `"progress(int,int)"`
    pub fn emit_signal(&self, signature: &str, args: Vec<Value>) -> Result<(), EmitError> {
        let index = self
            .inner
            .meta
            .index_of_signal(signature)
            .ok_or_else(|| EmitError::UnknownSignal(signature.to_string()))?;
        self.emit(index, args)
    }

    pub fn object_name(&self) -> String {
        self.inner
            .name
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Rename the object, emitting `objectNameChanged(string)` on change
    pub fn set_object_name(&self, name: &str) -> Result<(), EmitError> {
        {
            let mut current = self.inner.name.lock().unwrap_or_else(|e| e.into_inner());
            if *current == name {
                return Ok(());
            }
            *current = name.to_string();
        }
        self.emit_signal("objectNameChanged(string)", vec![Value::from(name)])
    }

    /// Remove one listener; returns whether it was still connected
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.inner.disconnect(id)
    }

    pub fn listener_count(&self) -> usize {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

impl Introspectable for Emitter {
    fn meta_object(&self) -> Option<Arc<MetaObject>> {
        Some(Arc::clone(&self.inner.meta))
    }

    fn is_alive(&self) -> bool {
        !self.inner.destroying.load(Ordering::SeqCst)
    }

    fn subscribe(&self, index: usize, callback: Callback) -> Result<Connection, ConnectError> {
        self.inner.connect(index, callback)
    }
}

impl Drop for Emitter {
    fn drop(&mut self) {
        self.inner.destroying.store(true, Ordering::SeqCst);
        if let Some(index) = self.inner.meta.index_of_signal("destroyed(object)") {
            if let Err(e) = self.inner.emit(index, &[Value::from(self.inner.id)]) {
                tracing::warn!(object = %self.inner.id, error = %e, "destroyed emission failed");
            }
        }
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Emitter")
            .field("id", &self.inner.id)
            .field("class", &self.inner.meta.class_name())
            .finish()
    }
}

/// Weak reference to an `Emitter`
///
/// Metadata stays readable after destruction; subscribing then fails.
#[derive(Clone)]
pub struct ObjectRef {
    id: ObjectId,
    meta: Arc<MetaObject>,
    inner: Weak<ObjectInner>,
}

impl ObjectRef {
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn is_alive(&self) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|inner| !inner.destroying.load(Ordering::SeqCst))
    }
}

impl Introspectable for ObjectRef {
    fn meta_object(&self) -> Option<Arc<MetaObject>> {
        Some(Arc::clone(&self.meta))
    }

    fn is_alive(&self) -> bool {
        ObjectRef::is_alive(self)
    }

    fn subscribe(&self, index: usize, callback: Callback) -> Result<Connection, ConnectError> {
        let inner = self.inner.upgrade().ok_or(ConnectError::TargetDestroyed)?;
        inner.connect(index, callback)
    }
}

#[cfg(test)]
#[path = "emitter_tests.rs"]
mod tests;
