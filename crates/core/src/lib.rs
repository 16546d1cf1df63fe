//! sigrec-core: record every signal an object emits
//!
//! This crate provides:
//! - A runtime type registry for emitting objects (classes, method tables, emitters)
//! - Event catalog resolution over any `Introspectable` target
//! - `Inspector`, which subscribes to every cataloged signal and keeps an
//!   ordered log of emissions, attributing overloaded signals correctly

pub mod clock;
pub mod value;

pub mod meta;
pub mod object;
pub mod introspect;

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;

// Re-exports
pub use catalog::{resolve, EventDescriptor};
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{Attribution, InspectorConfig};
pub use error::InspectError;
pub use events::{EmissionLog, EmissionRecord, EventPattern, Inspector};
pub use introspect::{Callback, ConnectError, Connection, Delivery, Introspectable};
pub use meta::{ClassBuilder, ClassDef, ClassError, MetaMethod, MetaObject, MethodKind};
pub use object::{EmitError, Emitter, ObjectId, ObjectRef, SenderIndexing};
pub use value::{ParamType, Value};
