// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `sigrec catalog` - List the signals of the network reply class

use crate::output::{self, OutputFormat};
use crate::reply;
use anyhow::Result;
use clap::Args;
use sigrec_core::Emitter;

#[derive(Args)]
pub struct CatalogArgs {
    /// Leave out signals inherited from base classes
    #[arg(long)]
    pub leaf_only: bool,

    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run(args: CatalogArgs) -> Result<()> {
    let class = reply::network_reply_class()?;
    let reply_object = Emitter::new(&class);
    let catalog = sigrec_core::resolve(&reply_object, !args.leaf_only)?;
    output::write_catalog(&mut std::io::stdout().lock(), &catalog, args.format)?;
    Ok(())
}
