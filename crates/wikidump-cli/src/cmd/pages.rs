//! Pages subcommand - stream filtered pages to stdout

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use wikidump_core::{SharedProgress, is_shutdown_requested};
use wikidump_reader::DumpReader;

use super::NamespaceArgs;
use crate::config::Config;

#[derive(Args, Debug)]
pub struct PagesArgs {
    /// Path to a bzip2-compressed XML dump
    pub dump: PathBuf,

    /// Stop after this many pages
    #[arg(short = 'l', long)]
    pub limit: Option<usize>,

    /// Print one title per line instead of JSON records
    #[arg(long)]
    pub titles_only: bool,

    #[command(flatten)]
    pub namespaces: NamespaceArgs,
}

pub fn run(args: PagesArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    let reader_config = args.namespaces.apply(&config.reader);
    let reader = super::open_reader(&args.dump, reader_config, progress)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let written = write_pages(&reader, &mut out, args.limit, args.titles_only)?;
    out.flush()?;

    log::info!("Wrote {written} pages");
    Ok(())
}

/// Write pages as JSON lines (or bare titles); returns how many were written.
///
/// Stops early at `limit` or when shutdown is requested; either way the
/// archive is closed before returning.
fn write_pages<W: Write>(
    reader: &DumpReader,
    out: &mut W,
    limit: Option<usize>,
    titles_only: bool,
) -> Result<usize> {
    let mut written = 0;
    for page in reader.pages().take(limit.unwrap_or(usize::MAX)) {
        if is_shutdown_requested() {
            log::warn!("Shutdown requested, stopping after {written} pages");
            break;
        }
        let page = page.context("Failed to read page")?;
        if titles_only {
            writeln!(out, "{}", page.title)?;
        } else {
            serde_json::to_writer(&mut *out, &page)?;
            out.write_all(b"\n")?;
        }
        written += 1;
    }
    Ok(written)
}
