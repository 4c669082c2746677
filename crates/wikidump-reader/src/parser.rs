//! MediaWiki export parser using quick-xml
//!
//! Streaming pull parser: turns a decompressed export into one
//! (title, text, id) triple per `<page>` element, buffering only the page
//! currently being read.

use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::Reader;
use wikidump_core::DumpError;

/// Page as extracted from the export, before namespace filtering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPage {
    pub title: String,
    pub text: String,
    pub id: String,
}

/// Iterator of pages over any buffered XML source.
///
/// Stops for good after the first error or end of input.
pub struct PageExtractor<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> PageExtractor<R> {
    pub fn new(inner: R) -> Self {
        // trim_text stays off: titles and bodies are returned unmodified
        let reader = Reader::from_reader(inner);
        Self {
            reader,
            buf: Vec::with_capacity(8192),
            done: false,
        }
    }

    fn next_page(&mut self) -> Result<Option<RawPage>, DumpError> {
        loop {
            self.buf.clear();
            match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(e) if e.local_name().as_ref() == b"page" => {
                    return parse_page(&mut self.reader).map(Some);
                }
                Event::Eof => return Ok(None),
                _ => {}
            }
        }
    }
}

impl<R: BufRead> Iterator for PageExtractor<R> {
    type Item = Result<RawPage, DumpError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_page() {
            Ok(Some(page)) => Some(Ok(page)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: BufRead> std::iter::FusedIterator for PageExtractor<R> {}

/// Extract every page from an in-memory export.
pub fn parse_pages_str(xml: &str) -> Result<Vec<RawPage>, DumpError> {
    PageExtractor::new(xml.as_bytes()).collect()
}

/// Parse the body of a `<page>` element up to its closing tag.
///
/// `title` and `id` must be direct children of `<page>` (the revision has
/// its own `<id>`); `text` is taken from the first revision.
fn parse_page<R: BufRead>(reader: &mut Reader<R>) -> Result<RawPage, DumpError> {
    let mut buf = Vec::new();
    let mut title: Option<String> = None;
    let mut id: Option<String> = None;
    let mut text: Option<String> = None;
    // Nesting below <page> (0 = direct child level)
    let mut depth = 0usize;

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"title" if depth == 0 => title = Some(read_content(reader)?),
                b"id" if depth == 0 && id.is_none() => id = Some(read_content(reader)?),
                b"text" if text.is_none() => text = Some(read_content(reader)?),
                _ => depth += 1,
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"title" if depth == 0 => title = Some(String::new()),
                b"text" if text.is_none() => text = Some(String::new()),
                _ => {}
            },
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            Event::Eof => {
                return Err(DumpError::malformed(format!(
                    "unexpected end of input inside <page> (title: {})",
                    title.as_deref().unwrap_or("?")
                )));
            }
            _ => {}
        }
    }

    let title = title.ok_or_else(|| DumpError::malformed("page without <title>"))?;
    let id = id.ok_or_else(|| DumpError::malformed(format!("page {title:?} without <id>")))?;
    let text =
        text.ok_or_else(|| DumpError::malformed(format!("page {title:?} without <text>")))?;

    Ok(RawPage {
        title,
        text,
        id: id.trim().to_string(),
    })
}

/// Concatenated character data of the current element, up to its end tag.
fn read_content<R: BufRead>(reader: &mut Reader<R>) -> Result<String, DumpError> {
    let mut buf = Vec::new();
    let mut out = String::new();
    let mut depth = 0usize;

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf)? {
            Event::Text(t) => out.push_str(&t.unescape()?),
            Event::CData(c) => {
                let s = std::str::from_utf8(&c)
                    .map_err(|e| DumpError::malformed(format!("invalid UTF-8 in CDATA: {e}")))?;
                out.push_str(s);
            }
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => return Ok(out),
            Event::End(_) => depth -= 1,
            Event::Eof => {
                return Err(DumpError::malformed("unexpected end of input inside element"));
            }
            _ => {}
        }
    }
}
