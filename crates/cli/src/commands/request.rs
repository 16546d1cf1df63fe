// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sigrec request <url>` - Record every signal of a simulated network reply

use crate::output::{self, OutputFormat};
use crate::reply::{self, Method, Request};
use anyhow::{Context, Result};
use clap::Args;
use sigrec_core::{Emitter, Inspector};
use url::Url;

#[derive(Args)]
pub struct RequestArgs {
    /// Request URL, e.g. http://eu.httpbin.org/status/200
    pub url: String,

    #[arg(short, long, value_enum, default_value = "get")]
    pub method: Method,

    /// Request body
    #[arg(short, long)]
    pub body: Option<String>,

    /// Content-Type header for the body
    #[arg(long)]
    pub content_type: Option<String>,

    /// Only record signals declared by the reply class itself
    #[arg(long)]
    pub leaf_only: bool,

    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub async fn run(args: RequestArgs) -> Result<()> {
    let url = Url::parse(&args.url).with_context(|| format!("invalid URL: {}", args.url))?;
    let request = Request {
        method: args.method,
        url,
        body: args.body.unwrap_or_default().into_bytes(),
        content_type: args.content_type,
    };

    let class = reply::network_reply_class()?;
    let reply_object = Emitter::new(&class);
    let inspector = Inspector::new(&reply_object, !args.leaf_only)?;

    let response = reply::respond(&request);
    tracing::info!(status = response.status, url = %request.url, "simulated response");
    reply::drive(&reply_object, reply::lifecycle(&request, &response)).await?;
    drop(reply_object);

    let title = format!("{} {}", request.method.as_str(), args.url);
    output::write_emissions(
        &mut std::io::stdout().lock(),
        &title,
        &inspector.records(),
        args.format,
    )?;
    Ok(())
}
