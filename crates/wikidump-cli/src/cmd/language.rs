//! Language subcommand - print the dump's declared language

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use wikidump_reader::DumpReader;

#[derive(Args, Debug)]
pub struct LanguageArgs {
    /// Path to a bzip2-compressed XML dump
    pub dump: PathBuf,
}

pub fn run(args: LanguageArgs) -> Result<()> {
    let reader = DumpReader::open(&args.dump)
        .with_context(|| format!("Failed to open {}", args.dump.display()))?;
    println!("{}", reader.language());
    Ok(())
}
