//! Common error type for dump reading

use std::path::PathBuf;

/// Error from opening, decompressing or extracting pages from a dump archive.
///
/// Construction-time failures (`Io`, `Decompress`, `LanguageNotFound`) and
/// mid-stream failures (`Decompress`, `Xml`, `MalformedPage`) share this type
/// so callers handle a single error per page request.
#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    /// Archive file could not be opened
    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Compressed stream is not valid bzip2 or became unreadable
    #[error("decompression failed: {0}")]
    Decompress(#[source] std::io::Error),

    /// First line of the archive carries no `xml:lang` attribute
    #[error("no xml:lang attribute on the first line of {}", path.display())]
    LanguageNotFound { path: PathBuf },

    /// XML syntax error reported by the pull parser
    #[error("XML: {0}")]
    Xml(#[source] quick_xml::Error),

    /// A `<page>` element could not be turned into a complete record
    #[error("malformed page: {reason}")]
    MalformedPage { reason: String },
}

impl DumpError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPage {
            reason: reason.into(),
        }
    }

    /// True when the failure happened while reading the compressed stream.
    ///
    /// Re-iterating the reader may succeed for these if the file was being
    /// replaced; structural errors will repeat on every pass.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Decompress(_))
    }
}

impl From<quick_xml::Error> for DumpError {
    fn from(e: quick_xml::Error) -> Self {
        match e {
            // Read failures surface through the parser; report them as stream errors
            quick_xml::Error::Io(io) => {
                Self::Decompress(std::io::Error::new(io.kind(), io.to_string()))
            }
            other => Self::Xml(other),
        }
    }
}
