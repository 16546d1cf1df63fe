// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dynamically-typed parameter values carried by emissions

use crate::object::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Declared type of a signal parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    Bool,
    Int,
    #[serde(rename = "uint")]
    UInt,
    Float,
    String,
    Bytes,
    Json,
    Object,
    List,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::Bool => "bool",
            ParamType::Int => "int",
            ParamType::UInt => "uint",
            ParamType::Float => "float",
            ParamType::String => "string",
            ParamType::Bytes => "bytes",
            ParamType::Json => "json",
            ParamType::Object => "object",
            ParamType::List => "list",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown parameter type: {0}")]
pub struct UnknownParamType(pub String);

impl FromStr for ParamType {
    type Err = UnknownParamType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "bool" => Ok(ParamType::Bool),
            "int" => Ok(ParamType::Int),
            "uint" => Ok(ParamType::UInt),
            "float" => Ok(ParamType::Float),
            "string" => Ok(ParamType::String),
            "bytes" => Ok(ParamType::Bytes),
            "json" => Ok(ParamType::Json),
            "object" => Ok(ParamType::Object),
            "list" => Ok(ParamType::List),
            other => Err(UnknownParamType(other.to_string())),
        }
    }
}

/// A parameter value as observed at emission time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Bool(bool),
    Int(i64),
    #[serde(rename = "uint")]
    UInt(u64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Json(serde_json::Value),
    /// Reference to a live object; `None` is the null reference
    Object(Option<ObjectId>),
    List(Vec<Value>),
}

impl Value {
    pub fn param_type(&self) -> ParamType {
        match self {
            Value::Bool(_) => ParamType::Bool,
            Value::Int(_) => ParamType::Int,
            Value::UInt(_) => ParamType::UInt,
            Value::Float(_) => ParamType::Float,
            Value::String(_) => ParamType::String,
            Value::Bytes(_) => ParamType::Bytes,
            Value::Json(_) => ParamType::Json,
            Value::Object(_) => ParamType::Object,
            Value::List(_) => ParamType::List,
        }
    }

    /// Whether this value may be passed for a parameter declared as `ty`
    pub fn conforms_to(&self, ty: ParamType) -> bool {
        self.param_type() == ty
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl From<ObjectId> for Value {
    fn from(v: ObjectId) -> Self {
        Value::Object(Some(v))
    }
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
