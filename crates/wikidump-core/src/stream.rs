//! Local bzip2 archive streaming.
//!
//! Presents a buffered sync reader over a (possibly multi-stream) bzip2 file,
//! with a shared counter of compressed bytes consumed for progress display.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bzip2::read::MultiBzDecoder;

use crate::error::DumpError;

/// Buffer size for the decompressed stream reader (1MB)
const BZIP2_BUF_SIZE: usize = 1024 * 1024;

/// Upper bound on bytes scanned when reading the first decompressed line.
///
/// The root element declaration is short; a dump without newlines must not
/// be decompressed in full just to find it.
const FIRST_LINE_LIMIT: u64 = 64 * 1024;

/// Buffered reader over a bzip2 archive with byte counting
pub type Bzip2Reader = BufReader<MultiBzDecoder<CountingReader<File>>>;

/// Shared byte counter for progress tracking
pub type ByteCounter = Arc<AtomicU64>;

/// File open → bunzip2 → buffered reader with byte counter
///
/// Returns (reader, byte_counter, compressed_len)
pub fn open_bzip2_reader(path: &Path) -> Result<(Bzip2Reader, ByteCounter, u64), DumpError> {
    let file = File::open(path).map_err(|source| DumpError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let total_bytes = file.metadata().map(|m| m.len()).unwrap_or(0);

    let counter = Arc::new(AtomicU64::new(0));
    let counting_reader = CountingReader {
        inner: file,
        count: counter.clone(),
    };
    let bz = MultiBzDecoder::new(counting_reader);
    let buf = BufReader::with_capacity(BZIP2_BUF_SIZE, bz);

    Ok((buf, counter, total_bytes))
}

/// Read the first decompressed line of the archive, then close it.
///
/// Invalid UTF-8 is replaced rather than rejected; only the root element
/// attributes are of interest here.
pub fn read_first_line(path: &Path) -> Result<String, DumpError> {
    let (reader, _, _) = open_bzip2_reader(path)?;
    let mut line = Vec::new();
    reader
        .take(FIRST_LINE_LIMIT)
        .read_until(b'\n', &mut line)
        .map_err(DumpError::Decompress)?;
    Ok(String::from_utf8_lossy(&line).into_owned())
}

/// Reader wrapper that tracks bytes read
pub struct CountingReader<R> {
    inner: R,
    count: Arc<AtomicU64>,
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.count.fetch_add(n as u64, Ordering::Relaxed);
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use bzip2::write::BzEncoder;
    use bzip2::Compression;
    use tempfile::TempDir;

    fn write_bz2(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let file = File::create(&path).unwrap();
        let mut enc = BzEncoder::new(file, Compression::fast());
        enc.write_all(content).unwrap();
        enc.finish().unwrap();
        path
    }

    #[test]
    fn first_line_only() {
        let dir = TempDir::new().unwrap();
        let path = write_bz2(&dir, "a.xml.bz2", b"<root xml:lang=\"de\">\n<page/>\n</root>\n");
        let line = read_first_line(&path).unwrap();
        assert_eq!(line, "<root xml:lang=\"de\">\n");
    }

    #[test]
    fn first_line_without_newline() {
        let dir = TempDir::new().unwrap();
        let path = write_bz2(&dir, "a.xml.bz2", b"<root/>");
        assert_eq!(read_first_line(&path).unwrap(), "<root/>");
    }

    #[test]
    fn first_line_is_capped() {
        let dir = TempDir::new().unwrap();
        let long = vec![b'x'; (FIRST_LINE_LIMIT as usize) * 2];
        let path = write_bz2(&dir, "long.xml.bz2", &long);
        let line = read_first_line(&path).unwrap();
        assert_eq!(line.len() as u64, FIRST_LINE_LIMIT);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = open_bzip2_reader(&dir.path().join("absent.xml.bz2")).err().unwrap();
        assert!(matches!(err, DumpError::Io { .. }));
    }

    #[test]
    fn plain_text_is_decompress_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.xml.bz2");
        std::fs::write(&path, b"<mediawiki xml:lang=\"en\">\n").unwrap();
        let err = read_first_line(&path).unwrap_err();
        assert!(matches!(err, DumpError::Decompress(_)));
    }

    #[test]
    fn multi_stream_is_concatenated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("multi.xml.bz2");
        let mut bytes = Vec::new();
        for part in [&b"first\n"[..], &b"second\n"[..]] {
            let mut enc = BzEncoder::new(Vec::new(), Compression::fast());
            enc.write_all(part).unwrap();
            bytes.extend(enc.finish().unwrap());
        }
        std::fs::write(&path, &bytes).unwrap();

        let (mut reader, counter, total) = open_bzip2_reader(&path).unwrap();
        let mut out = String::new();
        reader.read_to_string(&mut out).unwrap();
        assert_eq!(out, "first\nsecond\n");
        assert_eq!(total, bytes.len() as u64);
        assert_eq!(counter.load(Ordering::Relaxed), bytes.len() as u64);
    }
}
