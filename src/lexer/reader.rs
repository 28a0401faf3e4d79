//! Byte-stream adapter feeding the scanner.
//!
//! The scanner consumes characters one at a time from any forward-only byte
//! source; this adapter does the byte-to-character step. Each byte becomes
//! one character, so bytes outside printable ASCII fall through to the
//! automaton's catch-all symbol class and are rejected there.

use std::fs::File;
use std::io::{self, BufReader, Bytes, Read};
use std::path::Path;

/// Adapts an [`io::Read`] byte stream into the character stream the scanner
/// pulls from. Single-pass: no seeking or rewinding. The underlying stream
/// is released when the reader is dropped, on success and error paths alike.
pub struct SourceReader<R: Read> {
    bytes: Bytes<BufReader<R>>,
}

impl<R: Read> SourceReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            bytes: BufReader::new(inner).bytes(),
        }
    }

    /// Pull the next character, or `None` at end of stream.
    pub(crate) fn next_char(&mut self) -> io::Result<Option<char>> {
        match self.bytes.next() {
            Some(Ok(byte)) => Ok(Some(char::from(byte))),
            Some(Err(err)) => Err(err),
            None => Ok(None),
        }
    }
}

impl SourceReader<File> {
    /// Open a source file for scanning.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yields_bytes_as_chars() {
        let mut reader = SourceReader::new("ab".as_bytes());
        assert_eq!(reader.next_char().unwrap(), Some('a'));
        assert_eq!(reader.next_char().unwrap(), Some('b'));
        assert_eq!(reader.next_char().unwrap(), None);
        assert_eq!(reader.next_char().unwrap(), None);
    }

    #[test]
    fn test_empty_stream() {
        let mut reader = SourceReader::new(&[][..]);
        assert_eq!(reader.next_char().unwrap(), None);
    }
}
