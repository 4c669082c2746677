//! wikidump - Inspect and stream encyclopedia dumps
//!
//! Reads bzip2-compressed MediaWiki XML exports and prints their language,
//! their article pages, or summary statistics.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "wikidump")]
#[command(about = "Inspect and stream encyclopedia XML dumps")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./wikidump.toml or ~/.config/wikidump/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the language declared by a dump
    Language(cmd::language::LanguageArgs),
    /// Stream article pages as JSON lines
    Pages(cmd::pages::PagesArgs),
    /// Count pages and summarise a dump
    Stats(cmd::stats::StatsArgs),
    /// Show current configuration
    Config {
        /// Print as TOML instead of a table
        #[arg(long = "toml")]
        as_toml: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Progress context (TTY auto-detect)
    let progress = Arc::new(wikidump_core::ProgressContext::new());

    // Logging:
    //   TTY:     quiet (warn) unless --debug: spinners show activity
    //   non-TTY: info unless --debug: logs are the only progress indicator
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = if is_tty { !cli.debug } else { false };
    wikidump_core::init_logging(quiet, cli.debug, multi);

    if let Err(e) = wikidump_core::install_signal_handlers() {
        log::warn!("Failed to install signal handlers: {e}");
    }

    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    match cli.command {
        Command::Language(args) => cmd::language::run(args),
        Command::Pages(args) => cmd::pages::run(args, &config, &progress),
        Command::Stats(args) => cmd::stats::run(args, &config, &progress),
        Command::Config { as_toml } => {
            if as_toml {
                print!("{}", toml::to_string_pretty(&config)?);
                return Ok(());
            }

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec![
                    Cell::new("Setting").fg(Color::Cyan),
                    Cell::new("Value").fg(Color::Cyan),
                ]);

            let namespaces = if config.reader.ignored_namespaces.is_empty() {
                "(none)".to_string()
            } else {
                config.reader.ignored_namespaces.join(" ")
            };
            table.add_row(vec!["Ignored namespaces", &namespaces]);
            table.add_row(vec![
                "Progress interval",
                &format!("{} pages", config.reader.progress_interval),
            ]);

            eprintln!("\n{table}");
            Ok(())
        }
    }
}
