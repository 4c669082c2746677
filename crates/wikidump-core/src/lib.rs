//! Wikidump Core - Common infrastructure for encyclopedia dump readers
//!
//! This crate provides the error type, bzip2 archive streaming, progress
//! sinks and logging setup shared by the reader and the CLI.

pub mod error;
pub mod logging;
pub mod progress;
pub mod shutdown;
pub mod stream;

// Re-exports for convenience
pub use error::DumpError;
pub use logging::{IndicatifLogger, init_logging};
pub use progress::{
    LogProgress, NoProgress, ProgressContext, ProgressSink, SharedProgress, SpinnerProgress,
    fmt_num,
};
pub use shutdown::{
    install_signal_handlers, is_shutdown_requested, request_shutdown, shutdown_flag,
};
pub use stream::{ByteCounter, Bzip2Reader, CountingReader, open_bzip2_reader, read_first_line};
