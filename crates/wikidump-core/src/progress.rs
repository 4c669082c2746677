//! Progress reporting for TTY and non-TTY environments.
//!
//! Readers report through a [`ProgressSink`] handed to them at construction,
//! so library code never writes to a global output on its own.
//!
//! TTY mode: indicatif spinner per dump (clear on completion).
//! Non-TTY mode: log-based output (no progress bars).

use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Observability hook called by a page iteration.
///
/// Only `pages_yielded` is required; the other hooks default to no-ops.
pub trait ProgressSink: Send + Sync {
    /// Iteration opened the archive at `path` (`compressed_len` bytes on disk).
    fn started(&self, _path: &Path, _compressed_len: u64) {}

    /// Called every time the cumulative yielded-page count hits the interval.
    fn pages_yielded(&self, count: u64);

    /// Iteration reached the end of the archive after yielding `count` pages.
    fn finished(&self, _count: u64) {}
}

/// Default sink: one info line per interval through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn started(&self, path: &Path, compressed_len: u64) {
        log::debug!(
            "Opened {} ({} compressed bytes)",
            path.display(),
            fmt_num(compressed_len as usize)
        );
    }

    fn pages_yielded(&self, count: u64) {
        log::info!("Processed: {}", fmt_num(count as usize));
    }

    fn finished(&self, count: u64) {
        log::debug!("Finished after {} pages", fmt_num(count as usize));
    }
}

/// Sink that discards every notice.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn pages_yielded(&self, _count: u64) {}
}

/// Spinner-backed sink for interactive use.
pub struct SpinnerProgress {
    pb: ProgressBar,
}

impl SpinnerProgress {
    pub fn new(pb: ProgressBar) -> Self {
        Self { pb }
    }
}

impl ProgressSink for SpinnerProgress {
    fn started(&self, path: &Path, _compressed_len: u64) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.pb.set_message(name);
    }

    fn pages_yielded(&self, count: u64) {
        self.pb
            .set_message(format!("{} pages", fmt_num(count as usize)));
    }

    fn finished(&self, count: u64) {
        self.pb
            .finish_with_message(format!("{} pages", fmt_num(count as usize)));
    }
}

/// Central progress context managing spinners.
pub struct ProgressContext {
    multi: MultiProgress,
    is_tty: bool,
}

impl ProgressContext {
    /// Create new context, detecting TTY automatically.
    pub fn new() -> Self {
        let is_tty = std::io::stderr().is_terminal();
        Self {
            multi: MultiProgress::new(),
            is_tty,
        }
    }

    /// Create a status line with a spinner for one pass over a dump.
    ///
    /// Non-TTY: hidden (no-op).
    pub fn stage_line(&self, name: &str) -> ProgressBar {
        if !self.is_tty {
            return ProgressBar::hidden();
        }
        let pb = self.multi.add(ProgressBar::new(0));
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} {prefix:<10.cyan.bold} {wide_msg}")
                .expect("invalid template"),
        );
        pb.set_prefix(name.to_string());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }

    /// Sink for a reader: spinner in TTY mode, log lines otherwise.
    pub fn sink(&self, name: &str) -> Arc<dyn ProgressSink> {
        if self.is_tty {
            Arc::new(SpinnerProgress::new(self.stage_line(name)))
        } else {
            Arc::new(LogProgress)
        }
    }

    /// Print a line above managed spinners (avoids interference).
    ///
    /// Use this instead of `eprintln!` when spinners are active.
    pub fn println(&self, msg: impl AsRef<str>) {
        if self.is_tty {
            let _ = self.multi.println(msg);
        } else {
            eprintln!("{}", msg.as_ref());
        }
    }

    /// Whether running in TTY mode.
    pub fn is_tty(&self) -> bool {
        self.is_tty
    }

    /// Get reference to `MultiProgress` for log bridge.
    pub fn multi(&self) -> &MultiProgress {
        &self.multi
    }
}

impl Default for ProgressContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe wrapper for `ProgressContext`.
pub type SharedProgress = Arc<ProgressContext>;

/// Format number with thousand separators.
pub fn fmt_num(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
