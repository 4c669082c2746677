//! Subcommands

pub mod language;
pub mod pages;
pub mod stats;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use wikidump_core::SharedProgress;
use wikidump_reader::{DumpReader, ReaderConfig};

/// Namespace filter overrides shared by page-reading subcommands
#[derive(Args, Debug, Default)]
pub struct NamespaceArgs {
    /// Yield pages from every namespace (ignores the configured list)
    #[arg(long)]
    pub keep_all_namespaces: bool,

    /// Title prefix to skip, e.g. "talk:" (repeatable; replaces the configured list)
    #[arg(long = "ignore", value_name = "PREFIX")]
    pub ignore: Vec<String>,
}

impl NamespaceArgs {
    /// Reader configuration after applying command-line overrides.
    pub fn apply(&self, base: &ReaderConfig) -> ReaderConfig {
        let mut config = base.clone();
        if self.keep_all_namespaces {
            config.ignored_namespaces.clear();
        } else if !self.ignore.is_empty() {
            config.ignored_namespaces = self.ignore.clone();
        }
        config
    }
}

/// Open a dump with progress routed to a spinner (TTY) or log lines.
pub fn open_reader(
    dump: &Path,
    config: ReaderConfig,
    progress: &SharedProgress,
) -> Result<DumpReader> {
    let name = dump
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dump".to_string());
    let reader = DumpReader::with_config(dump, config)
        .with_context(|| format!("Failed to open {}", dump.display()))?
        .with_progress(progress.sink(&name));
    Ok(reader)
}
