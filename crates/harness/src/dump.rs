//! Forward-only line iteration over a dump file.

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::Path;

/// Streaming reader over a dump file.
///
/// The dump is read strictly forward, one line at a time; there is no
/// seeking and no re-reading. Decompression is transparent: paths ending
/// in `.gz` are gunzipped on the fly.
pub struct DumpReader {
    inner: BufReader<Box<dyn Read>>,
}

impl DumpReader {
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = File::open(path)?;
        let reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
            Box::new(GzDecoder::new(BufReader::new(file)))
        } else {
            Box::new(file)
        };
        Ok(Self {
            inner: BufReader::new(reader),
        })
    }

    pub fn lines(self) -> Lines<BufReader<Box<dyn Read>>> {
        self.inner.lines()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_plain_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dump.txt");
        std::fs::write(&path, "one\ntwo\nthree\n").unwrap();

        let lines: Vec<String> = DumpReader::open(&path)
            .unwrap()
            .lines()
            .collect::<std::io::Result<_>>()
            .unwrap();
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_gzip_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dump.txt.gz");
        let file = File::create(&path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(b"one\ntwo\n").unwrap();
        encoder.finish().unwrap();

        let lines: Vec<String> = DumpReader::open(&path)
            .unwrap()
            .lines()
            .collect::<std::io::Result<_>>()
            .unwrap();
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(DumpReader::open(&dir.path().join("absent.txt")).is_err());
    }
}
