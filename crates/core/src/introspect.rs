// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capability interface for objects whose events can be discovered and observed

use crate::meta::MetaObject;
use crate::object::ObjectId;
use crate::value::Value;
use std::sync::{Arc, Weak};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectError {
    #[error("target object has been destroyed")]
    TargetDestroyed,
    #[error("no method at index {0}")]
    UnknownMethod(usize),
    #[error("{signature} (index {index}) is not a signal")]
    NotASignal { index: usize, signature: String },
}

/// One synchronous notification handed to a listener
#[derive(Debug, Clone, Copy)]
pub struct Delivery<'a> {
    pub sender: ObjectId,
    /// Index the dispatcher reports for the firing signal
    ///
    /// For overloaded signals this may be the family head rather than the
    /// overload that actually fired.
    pub sender_index: usize,
    pub args: &'a [Value],
}

/// Listener invoked synchronously on each emission of the subscribed signal
pub type Callback = Arc<dyn Fn(&Delivery<'_>) + Send + Sync>;

/// Identifies one listener registration on a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u64);

/// Side of a connection that can remove listeners
pub trait ConnectionHost: Send + Sync {
    /// Remove a listener, returning whether it was still registered
    fn disconnect(&self, id: ConnectionId) -> bool;
}

/// Handle to a registered listener; disconnects when dropped
///
/// Holds the target weakly, so it is safe to drop after the target is gone.
pub struct Connection {
    id: ConnectionId,
    host: Weak<dyn ConnectionHost>,
}

impl Connection {
    pub fn new(id: ConnectionId, host: Weak<dyn ConnectionHost>) -> Self {
        Self { id, host }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Whether the target object is still alive
    pub fn target_alive(&self) -> bool {
        self.host.strong_count() > 0
    }

    pub fn disconnect(self) -> bool {
        self.release()
    }

    fn release(&self) -> bool {
        match self.host.upgrade() {
            Some(host) => host.disconnect(self.id),
            None => false,
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("target_alive", &self.target_alive())
            .finish()
    }
}

/// An object exposing its event catalog and a subscription primitive
pub trait Introspectable {
    /// Method table of the object's type, `None` for opaque objects
    fn meta_object(&self) -> Option<Arc<MetaObject>>;

    /// Whether the object still exists; destroyed objects refuse observers
    fn is_alive(&self) -> bool {
        true
    }

    /// Register `callback` for every emission of the signal at `index`
    ///
    /// Listeners of one signal run in registration order.
    fn subscribe(&self, index: usize, callback: Callback) -> Result<Connection, ConnectError>;
}
