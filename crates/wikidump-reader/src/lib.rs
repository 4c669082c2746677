//! Wikidump Reader - streaming page reader for encyclopedia dumps
//!
//! Reads bzip2-compressed MediaWiki XML exports and yields page records
//! (title, language, raw wikitext), skipping administrative namespaces.
//!
//! # Features
//!
//! - Language detected from the root `xml:lang` attribute at construction
//! - Streaming XML parsing with quick-xml, constant memory per page
//! - Restartable: every iteration re-opens the archive from the start
//!
//! # Example
//!
//! ```ignore
//! use wikidump_reader::DumpReader;
//!
//! let reader = DumpReader::open("enwiki-latest-pages-articles.xml.bz2")?;
//! println!("language: {}", reader.language());
//!
//! for page in &reader {
//!     let page = page?;
//!     println!("{}", page.title);
//! }
//! ```

pub mod config;
pub mod page;
pub mod parser;
pub mod reader;

// Re-exports
pub use config::{DEFAULT_IGNORED_NAMESPACES, DEFAULT_PROGRESS_INTERVAL, ReaderConfig};
pub use page::WikiPage;
pub use parser::{PageExtractor, RawPage};
pub use reader::{DumpReader, Pages, detect_language};
pub use wikidump_core::DumpError;
