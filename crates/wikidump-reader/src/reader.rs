//! Dump reader: language detection and filtered, restartable page iteration

use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use wikidump_core::{
    ByteCounter, Bzip2Reader, DumpError, LogProgress, ProgressSink, open_bzip2_reader,
    read_first_line,
};

use crate::config::ReaderConfig;
use crate::page::WikiPage;
use crate::parser::PageExtractor;

static XML_LANG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"xml:lang="([^"]*)""#).expect("invalid xml:lang pattern"));

/// Language code declared by `xml:lang="..."` in `line`, if any and non-empty.
pub fn detect_language(line: &str) -> Option<&str> {
    XML_LANG
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|lang| !lang.is_empty())
}

/// A bzip2-compressed encyclopedia dump bound to a file path.
///
/// The language is read once at construction. Every call to [`pages`]
/// (or `for page in &reader`) re-opens the archive and streams it from the
/// start; nothing is carried over between iterations.
///
/// [`pages`]: DumpReader::pages
pub struct DumpReader {
    path: PathBuf,
    ignored_namespaces: Vec<String>,
    language: String,
    progress_interval: u64,
    progress: Arc<dyn ProgressSink>,
}

impl DumpReader {
    /// Open a dump with the default ignored namespaces.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DumpError> {
        Self::with_config(path, ReaderConfig::default())
    }

    /// Open a dump with an explicit configuration.
    ///
    /// Decompresses only the first line to find `xml:lang`, then closes the
    /// archive. Fails if the file cannot be opened or decompressed, or the
    /// attribute is missing.
    pub fn with_config(path: impl AsRef<Path>, config: ReaderConfig) -> Result<Self, DumpError> {
        let path = path.as_ref().to_path_buf();
        let first_line = read_first_line(&path)?;
        let language = detect_language(&first_line)
            .ok_or_else(|| DumpError::LanguageNotFound { path: path.clone() })?
            .to_string();
        log::debug!("{}: language {language}", path.display());

        Ok(Self {
            ignored_namespaces: config.normalized_namespaces(),
            progress_interval: config.progress_interval,
            progress: Arc::new(LogProgress),
            language,
            path,
        })
    }

    /// Replace the progress sink (defaults to [`LogProgress`]).
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ignored_namespaces(&self) -> &[String] {
        &self.ignored_namespaces
    }

    /// Whether a page with this title is dropped by the namespace filter.
    pub fn is_ignored(&self, title: &str) -> bool {
        if self.ignored_namespaces.is_empty() {
            return false;
        }
        let lower = title.to_lowercase();
        self.ignored_namespaces
            .iter()
            .any(|ns| lower.starts_with(ns.as_str()))
    }

    /// Fresh lazy pass over the archive.
    ///
    /// The archive is opened on the first `next()`; an open failure is
    /// returned as the first item.
    pub fn pages(&self) -> Pages<'_> {
        Pages {
            reader: self,
            state: State::Pending,
            yielded: 0,
        }
    }
}

impl std::fmt::Debug for DumpReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DumpReader")
            .field("path", &self.path)
            .field("language", &self.language)
            .field("ignored_namespaces", &self.ignored_namespaces)
            .field("progress_interval", &self.progress_interval)
            .finish_non_exhaustive()
    }
}

impl<'a> IntoIterator for &'a DumpReader {
    type Item = Result<WikiPage, DumpError>;
    type IntoIter = Pages<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages()
    }
}

enum State {
    Pending,
    Streaming {
        extractor: PageExtractor<Bzip2Reader>,
        bytes: ByteCounter,
    },
    Done,
}

/// One pass over a dump, yielding pages outside the ignored namespaces.
///
/// Owns the open archive; it is closed on exhaustion, after the first
/// error, or when the iterator is dropped.
pub struct Pages<'a> {
    reader: &'a DumpReader,
    state: State,
    yielded: u64,
}

impl Pages<'_> {
    /// Pages yielded so far in this pass
    pub fn yielded(&self) -> u64 {
        self.yielded
    }

    /// Compressed bytes consumed so far (0 before the archive is opened)
    pub fn compressed_bytes_read(&self) -> u64 {
        match &self.state {
            State::Streaming { bytes, .. } => bytes.load(Ordering::Relaxed),
            _ => 0,
        }
    }

    /// Whether the archive is currently held open
    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Streaming { .. })
    }

    fn record_yield(&mut self) {
        self.yielded += 1;
        let interval = self.reader.progress_interval;
        if interval > 0 && self.yielded % interval == 0 {
            self.reader.progress.pages_yielded(self.yielded);
        }
    }
}

impl Iterator for Pages<'_> {
    type Item = Result<WikiPage, DumpError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.state {
                State::Done => return None,
                State::Pending => match open_bzip2_reader(&self.reader.path) {
                    Ok((stream, bytes, total)) => {
                        self.reader.progress.started(&self.reader.path, total);
                        self.state = State::Streaming {
                            extractor: PageExtractor::new(stream),
                            bytes,
                        };
                    }
                    Err(e) => {
                        self.state = State::Done;
                        return Some(Err(e));
                    }
                },
                State::Streaming { extractor, .. } => match extractor.next() {
                    Some(Ok(raw)) => {
                        if self.reader.is_ignored(&raw.title) {
                            continue;
                        }
                        let page = WikiPage::new(raw.title, self.reader.language.as_str(), raw.text);
                        self.record_yield();
                        return Some(Ok(page));
                    }
                    Some(Err(e)) => {
                        self.state = State::Done;
                        return Some(Err(e));
                    }
                    None => {
                        self.state = State::Done;
                        self.reader.progress.finished(self.yielded);
                        return None;
                    }
                },
            }
        }
    }
}

impl std::iter::FusedIterator for Pages<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_language_from_root_element() {
        let line = r#"<mediawiki xmlns="http://www.mediawiki.org/xml/export-0.10/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" version="0.10" xml:lang="en">"#;
        assert_eq!(detect_language(line), Some("en"));
    }

    #[test]
    fn detect_language_locale_code() {
        assert_eq!(
            detect_language(r#"<mediawiki xml:lang="zh-classical" version="0.10">"#),
            Some("zh-classical")
        );
    }

    #[test]
    fn detect_language_stops_at_closing_quote() {
        assert_eq!(
            detect_language(r#"<mediawiki xml:lang="ja" other="x">"#),
            Some("ja")
        );
    }

    #[test]
    fn detect_language_missing() {
        assert_eq!(detect_language("<mediawiki version=\"0.10\">"), None);
        assert_eq!(detect_language(""), None);
    }

    #[test]
    fn detect_language_empty_value() {
        assert_eq!(detect_language(r#"<mediawiki xml:lang="">"#), None);
    }
}
