//! Точка входа `quote-fetch`: один запрос, печать результата, выход.

mod cli;
mod output;

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use log::debug;
use quote_core::{HttpTransport, QuoteClient, TagCatalog};

use crate::cli::{Command, normalize_symbols};

fn main() -> anyhow::Result<()> {
    // Логи через RUST_LOG=info/debug/trace
    env_logger::init();

    let args = cli::Args::parse();
    args.validate()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Command::Catalog = args.command {
        output::write_catalog(&mut out, &TagCatalog::standard(), args.json)?;
        return Ok(());
    }

    let transport =
        HttpTransport::with_timeout(args.http_timeout()).context("build HTTP transport")?;
    let client = QuoteClient::with_base_url(transport, &args.base_url)
        .with_context(|| format!("invalid --base-url {:?}", args.base_url))?;

    match &args.command {
        Command::All { symbols } => {
            let symbols = normalize_symbols(symbols);
            debug!("all fields for {}", symbols.join(","));
            let result = client.fetch_all(&symbols).context("fetch all fields")?;
            output::write_quotes(&mut out, &result, args.json)?;
        }
        Command::Tag { symbols, tags } => {
            let symbols = normalize_symbols(symbols);
            let rows = client
                .fetch_by_tag_string(&symbols, tags.trim())
                .with_context(|| format!("fetch tags {tags:?}"))?;
            output::write_rows(&mut out, &rows, args.json)?;
        }
        Command::Fields { symbols, fields } => {
            let symbols = normalize_symbols(symbols);
            let result = client
                .fetch_by_fields(&symbols, fields)
                .with_context(|| format!("fetch fields {}", fields.join(",")))?;
            output::write_quotes(&mut out, &result, args.json)?;
        }
        Command::Catalog => {}
    }

    out.flush()?;
    Ok(())
}
