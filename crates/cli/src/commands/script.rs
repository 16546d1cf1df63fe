// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sigrec script <file>` - Run an emission scenario described in TOML
//!
//! ```toml
//! target = "Emitter"
//!
//! [inspector]
//! include_inherited = true
//! attribution = "overload_scan"
//!
//! [[class]]
//! name = "Emitter"
//! signal = [
//!     { name = "A", params = ["string"] },
//!     { name = "A", params = ["int", "string"] },
//! ]
//!
//! [[emit]]
//! signal = "A(string)"
//! args = ["x"]
//! ```

use crate::output::{self, OutputFormat};
use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use serde::Deserialize;
use sigrec_core::meta::OBJECT_CLASS;
use sigrec_core::{
    ClassDef, EmissionRecord, Emitter, Inspector, InspectorConfig, ParamType, SenderIndexing,
    SystemClock, Value,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args)]
pub struct ScriptArgs {
    /// Scenario file
    pub path: PathBuf,

    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub inspector: InspectorConfig,
    #[serde(default)]
    pub indexing: SenderIndexing,
    /// Class to instantiate; defaults to the last declared class
    pub target: Option<String>,
    #[serde(default, rename = "class")]
    pub classes: Vec<ClassSpec>,
    #[serde(default, rename = "emit")]
    pub emissions: Vec<EmitSpec>,
    /// Destroy the target before reading the log
    #[serde(default = "default_destroy")]
    pub destroy: bool,
}

fn default_destroy() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassSpec {
    pub name: String,
    pub extends: Option<String>,
    #[serde(default, rename = "signal")]
    pub signals: Vec<SignalSpec>,
    #[serde(default, rename = "slot")]
    pub slots: Vec<SlotSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignalSpec {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ParamType>,
    /// Number of trailing parameters that may be omitted
    #[serde(default)]
    pub defaults: usize,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotSpec {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ParamType>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmitSpec {
    pub signal: String,
    #[serde(default)]
    pub args: Vec<toml::Value>,
}

impl Scenario {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Build every declared class, parents before children
    fn build_classes(&self) -> Result<HashMap<String, Arc<ClassDef>>> {
        let mut classes = HashMap::new();
        for spec in &self.classes {
            if classes.contains_key(&spec.name) {
                bail!("class {} declared more than once", spec.name);
            }
            let mut builder = ClassDef::builder(spec.name.as_str());
            match spec.extends.as_deref() {
                None | Some(OBJECT_CLASS) => {}
                Some(parent) => {
                    let parent = classes
                        .get(parent)
                        .ok_or_else(|| anyhow!("{} extends undeclared class {}", spec.name, parent))?;
                    builder = builder.extends(parent);
                }
            }
            for signal in &spec.signals {
                builder = builder.signal_with_defaults(&signal.name, &signal.params, signal.defaults);
            }
            for slot in &spec.slots {
                builder = builder.slot(&slot.name, &slot.params);
            }
            let class = builder
                .build()
                .with_context(|| format!("invalid class {}", spec.name))?;
            classes.insert(spec.name.clone(), class);
        }
        Ok(classes)
    }

    /// Instantiate the target, replay the emissions and return the log
    pub fn run(&self) -> Result<Vec<EmissionRecord>> {
        let classes = self.build_classes()?;
        let target = match &self.target {
            Some(name) => name.as_str(),
            None => self
                .classes
                .last()
                .map(|c| c.name.as_str())
                .ok_or_else(|| anyhow!("scenario declares no classes"))?,
        };
        let class = classes
            .get(target)
            .ok_or_else(|| anyhow!("unknown target class {}", target))?;

        let emitter = Emitter::with_indexing(class, self.indexing);
        let inspector = Inspector::with_config(&emitter, self.inspector, SystemClock)?;

        for emit in &self.emissions {
            let index = emitter
                .meta()
                .index_of_signal(&emit.signal)
                .ok_or_else(|| anyhow!("{} has no signal {}", target, emit.signal))?;
            let params = emitter
                .meta()
                .method(index)
                .map(|m| m.params.clone())
                .unwrap_or_default();
            if params.len() != emit.args.len() {
                bail!(
                    "{} takes {} arguments, got {}",
                    emit.signal,
                    params.len(),
                    emit.args.len()
                );
            }
            let args = params
                .iter()
                .zip(&emit.args)
                .enumerate()
                .map(|(position, (ty, raw))| {
                    to_value(*ty, raw).with_context(|| {
                        format!("argument {} of {}", position, emit.signal)
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            emitter.emit(index, args)?;
        }

        if self.destroy {
            drop(emitter);
        }
        Ok(inspector.records())
    }
}

/// Convert a TOML argument to a value of the declared parameter type
pub fn to_value(ty: ParamType, raw: &toml::Value) -> Result<Value> {
    let mismatch = || anyhow!("expected {}, got {}", ty, raw.type_str());
    Ok(match ty {
        ParamType::Bool => Value::Bool(raw.as_bool().ok_or_else(mismatch)?),
        ParamType::Int => Value::Int(raw.as_integer().ok_or_else(mismatch)?),
        ParamType::UInt => {
            let n = raw.as_integer().ok_or_else(mismatch)?;
            Value::UInt(u64::try_from(n).map_err(|_| anyhow!("{} is negative", n))?)
        }
        ParamType::Float => match raw {
            toml::Value::Float(f) => Value::Float(*f),
            toml::Value::Integer(i) => Value::Float(*i as f64),
            _ => return Err(mismatch()),
        },
        ParamType::String => Value::String(raw.as_str().ok_or_else(mismatch)?.to_string()),
        ParamType::Bytes => match raw {
            toml::Value::String(s) => Value::Bytes(s.as_bytes().to_vec()),
            toml::Value::Array(items) => Value::Bytes(
                items
                    .iter()
                    .map(|item| {
                        item.as_integer()
                            .and_then(|n| u8::try_from(n).ok())
                            .ok_or_else(|| anyhow!("byte arrays hold integers 0-255"))
                    })
                    .collect::<Result<Vec<u8>>>()?,
            ),
            _ => return Err(mismatch()),
        },
        ParamType::Json => Value::Json(serde_json::to_value(raw)?),
        ParamType::Object => bail!("object references cannot be scripted"),
        ParamType::List => Value::List(
            raw.as_array()
                .ok_or_else(mismatch)?
                .iter()
                .map(infer_value)
                .collect::<Result<Vec<_>>>()?,
        ),
    })
}

fn infer_value(raw: &toml::Value) -> Result<Value> {
    Ok(match raw {
        toml::Value::Boolean(b) => Value::Bool(*b),
        toml::Value::Integer(i) => Value::Int(*i),
        toml::Value::Float(f) => Value::Float(*f),
        toml::Value::String(s) => Value::String(s.clone()),
        toml::Value::Datetime(d) => Value::String(d.to_string()),
        toml::Value::Array(items) => {
            Value::List(items.iter().map(infer_value).collect::<Result<Vec<_>>>()?)
        }
        toml::Value::Table(_) => Value::Json(serde_json::to_value(raw)?),
    })
}

pub fn run(args: ScriptArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let scenario = Scenario::parse(&text)
        .with_context(|| format!("invalid scenario {}", args.path.display()))?;
    let records = scenario.run()?;

    let title = args.path.display().to_string();
    output::write_emissions(&mut std::io::stdout().lock(), &title, &records, args.format)?;
    Ok(())
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
