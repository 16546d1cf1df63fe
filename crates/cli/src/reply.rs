// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Simulated network reply
//!
//! Answers requests the way httpbin does, without touching the network,
//! and emits the signals a network reply emits over its lifetime.

use clap::ValueEnum;
use sigrec_core::{ClassDef, ClassError, EmitError, Emitter, ParamType, Value};
use std::sync::Arc;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

pub fn io_device_class() -> Result<Arc<ClassDef>, ClassError> {
    ClassDef::builder("IoDevice")
        .signal("readyRead", &[])
        .signal("bytesWritten", &[ParamType::Int])
        .signal("aboutToClose", &[])
        .signal("readChannelFinished", &[])
        .slot("close", &[])
        .build()
}

pub fn network_reply_class() -> Result<Arc<ClassDef>, ClassError> {
    ClassDef::builder("NetworkReply")
        .extends(&io_device_class()?)
        .signal("metaDataChanged", &[])
        .signal("finished", &[])
        .signal_with_defaults("errorOccurred", &[ParamType::Int, ParamType::String], 1)
        .signal("uploadProgress", &[ParamType::Int, ParamType::Int])
        .signal("downloadProgress", &[ParamType::Int, ParamType::Int])
        .slot("abort", &[])
        .build()
}

#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Produce the response httpbin would send
pub fn respond(request: &Request) -> Response {
    let segments: Vec<&str> = request
        .url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    match (request.method, segments.as_slice()) {
        (_, ["status", code]) => Response {
            status: code.parse().unwrap_or(400),
            body: Vec::new(),
        },
        (Method::Get, ["get"]) => json_response(serde_json::json!({
            "args": query_args(&request.url),
            "headers": headers(request),
            "url": request.url.as_str(),
        })),
        (Method::Post, ["post"]) => {
            let data = String::from_utf8_lossy(&request.body).to_string();
            let parsed = serde_json::from_slice::<serde_json::Value>(&request.body).ok();
            json_response(serde_json::json!({
                "args": query_args(&request.url),
                "data": data,
                "headers": headers(request),
                "json": parsed,
                "url": request.url.as_str(),
            }))
        }
        (_, ["get"]) | (_, ["post"]) => Response {
            status: 405,
            body: Vec::new(),
        },
        _ => Response {
            status: 404,
            body: Vec::new(),
        },
    }
}

fn json_response(json: serde_json::Value) -> Response {
    Response {
        status: 200,
        body: serde_json::to_vec_pretty(&json).unwrap_or_default(),
    }
}

fn query_args(url: &Url) -> serde_json::Map<String, serde_json::Value> {
    url.query_pairs()
        .map(|(k, v)| (k.to_string(), serde_json::Value::from(v.to_string())))
        .collect()
}

fn headers(request: &Request) -> serde_json::Map<String, serde_json::Value> {
    let mut headers = serde_json::Map::new();
    if let Some(host) = request.url.host_str() {
        headers.insert("Host".to_string(), host.into());
    }
    if let Some(content_type) = &request.content_type {
        headers.insert("Content-Type".to_string(), content_type.clone().into());
    }
    if !request.body.is_empty() {
        headers.insert(
            "Content-Length".to_string(),
            request.body.len().to_string().into(),
        );
    }
    headers
}

pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// Signals a reply emits while completing `request` with `response`, in order
///
/// Client errors carry a reason phrase; server errors only the status code.
pub fn lifecycle(request: &Request, response: &Response) -> Vec<(&'static str, Vec<Value>)> {
    let mut steps = Vec::new();

    if !request.body.is_empty() {
        let sent = request.body.len() as i64;
        steps.push((
            "uploadProgress(int,int)",
            vec![Value::from(sent), Value::from(sent)],
        ));
        steps.push(("uploadProgress(int,int)", vec![Value::from(0), Value::from(0)]));
    }

    steps.push(("metaDataChanged()", vec![]));

    if !response.body.is_empty() {
        let received = response.body.len() as i64;
        steps.push(("readyRead()", vec![]));
        steps.push((
            "downloadProgress(int,int)",
            vec![Value::from(received), Value::from(received)],
        ));
    }

    let status = i64::from(response.status);
    match response.status {
        400..=499 => steps.push((
            "errorOccurred(int,string)",
            vec![Value::from(status), Value::from(reason_phrase(response.status))],
        )),
        500..=599 => steps.push(("errorOccurred(int)", vec![Value::from(status)])),
        _ => {}
    }

    steps.push((
        "downloadProgress(int,int)",
        vec![Value::from(0), Value::from(0)],
    ));
    steps.push(("readChannelFinished()", vec![]));
    steps.push(("finished()", vec![]));
    steps
}

/// Emit `steps` from `reply`, yielding to the run-loop between emissions
pub async fn drive(reply: &Emitter, steps: Vec<(&'static str, Vec<Value>)>) -> Result<(), EmitError> {
    for (signature, args) in steps {
        reply.emit_signal(signature, args)?;
        tokio::task::yield_now().await;
    }
    Ok(())
}

#[cfg(test)]
#[path = "reply_tests.rs"]
mod tests;
