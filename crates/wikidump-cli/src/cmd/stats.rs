//! Stats subcommand - one full pass over a dump, summarised as a table

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use wikidump_core::{SharedProgress, fmt_num, is_shutdown_requested};
use wikidump_reader::DumpReader;

use super::NamespaceArgs;
use crate::config::Config;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Path to a bzip2-compressed XML dump
    pub dump: PathBuf,

    #[command(flatten)]
    pub namespaces: NamespaceArgs,
}

/// Totals over the pages yielded by one pass
#[derive(Debug, Default, PartialEq, Eq)]
struct DumpStats {
    pages: u64,
    empty_pages: u64,
    redirects: u64,
    text_bytes: u64,
    compressed_bytes: u64,
    /// Pass stopped before the end of the archive
    interrupted: bool,
}

pub fn run(args: StatsArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    let reader_config = args.namespaces.apply(&config.reader);
    let reader = super::open_reader(&args.dump, reader_config, progress)?;

    let start = Instant::now();
    let stats = collect_stats(&reader)?;
    let elapsed = start.elapsed();

    progress.println(render(&reader, &stats, elapsed).to_string());
    Ok(())
}

fn collect_stats(reader: &DumpReader) -> Result<DumpStats> {
    let mut stats = DumpStats::default();
    let mut pages = reader.pages();

    while let Some(page) = pages.next() {
        let page = page.context("Failed to read page")?;
        stats.pages += 1;
        stats.text_bytes += page.text.len() as u64;
        if page.text.is_empty() {
            stats.empty_pages += 1;
        }
        if is_redirect(&page.text) {
            stats.redirects += 1;
        }
        stats.compressed_bytes = pages.compressed_bytes_read();
        if is_shutdown_requested() {
            stats.interrupted = true;
            break;
        }
    }

    Ok(stats)
}

/// `#REDIRECT [[Target]]`, matched case-insensitively after leading spaces
fn is_redirect(text: &str) -> bool {
    text.trim_start()
        .get(..9)
        .is_some_and(|head| head.eq_ignore_ascii_case("#redirect"))
}

fn render(reader: &DumpReader, stats: &DumpStats, elapsed: Duration) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Metric").fg(Color::Cyan),
            Cell::new("Value").fg(Color::Cyan),
        ]);

    let rate = if elapsed.as_secs_f64() > 0.0 {
        stats.pages as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    table.add_row(vec!["Dump", &reader.path().display().to_string()]);
    table.add_row(vec!["Language", reader.language()]);
    table.add_row(vec!["Pages", &fmt_num(stats.pages as usize)]);
    table.add_row(vec!["Redirects", &fmt_num(stats.redirects as usize)]);
    table.add_row(vec!["Empty pages", &fmt_num(stats.empty_pages as usize)]);
    table.add_row(vec![
        "Wikitext",
        &format!("{} bytes", fmt_num(stats.text_bytes as usize)),
    ]);
    table.add_row(vec![
        "Compressed read",
        &format!("{} bytes", fmt_num(stats.compressed_bytes as usize)),
    ]);
    table.add_row(vec![
        "Elapsed",
        &format!("{:.1}s ({rate:.0} pages/s)", elapsed.as_secs_f64()),
    ]);
    if stats.interrupted {
        table.add_row(vec!["Status", "interrupted"]);
    }
    table
}
