// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use serde::Serialize;
use sigrec_core::{EmissionRecord, EventDescriptor, Value};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Textual form of a value, or its type name when it has none
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Bool(v) => v.to_string(),
        Value::Int(v) => v.to_string(),
        Value::UInt(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Bytes(v) => String::from_utf8_lossy(v).to_string(),
        Value::Json(_) | Value::Object(_) | Value::List(_) => value.param_type().to_string(),
    }
}

/// `name(p1, p2)` line for one record
pub fn render_record(record: &EmissionRecord) -> String {
    let params: Vec<String> = record.params.iter().map(render_value).collect();
    format!("{}({})", record.name(), params.join(", "))
}

#[derive(Serialize)]
struct EmissionReport<'a> {
    title: &'a str,
    emissions: &'a [EmissionRecord],
}

/// Write a titled list of emissions
pub fn write_emissions(
    out: &mut impl Write,
    title: &str,
    records: &[EmissionRecord],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "{}", title)?;
            writeln!(out, "{}", "-".repeat(title.chars().count()))?;
            for record in records {
                writeln!(out, "{}", render_record(record))?;
            }
            writeln!(out)
        }
        OutputFormat::Json => {
            let report = EmissionReport {
                title,
                emissions: records,
            };
            let json = serde_json::to_string_pretty(&report).map_err(io::Error::other)?;
            writeln!(out, "{}", json)
        }
    }
}

/// Write event descriptors, one per line
pub fn write_catalog(
    out: &mut impl Write,
    catalog: &[EventDescriptor],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            for descriptor in catalog {
                let origin = if descriptor.inherited { " (inherited)" } else { "" };
                writeln!(
                    out,
                    "{:>3} {}:{}{}",
                    descriptor.index,
                    descriptor.class_name,
                    descriptor.signature(),
                    origin
                )?;
            }
            Ok(())
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(catalog).map_err(io::Error::other)?;
            writeln!(out, "{}", json)
        }
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
