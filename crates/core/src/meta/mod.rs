// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime type registry for emitting objects
//!
//! This module provides:
//! - `ClassDef` / `ClassBuilder` - Declare classes, their signals, slots and methods
//! - `MetaObject` - Flattened, indexed method table of a class and its ancestry

mod class;
mod meta_object;

pub use class::{ClassBuilder, ClassDef, ClassError, MethodDef, MethodKind, OBJECT_CLASS};
pub use meta_object::{signature_of, MetaMethod, MetaObject};
