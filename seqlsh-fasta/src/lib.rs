//! # Streaming FASTA record source
//!
//! Reads line-oriented FASTA text and produces `(name, sequence)` records.
//! A record begins at a line starting with `>`; the remainder of that line
//! is the name. Subsequent lines up to the next `>` (or end of stream) are
//! concatenated as the sequence body.
//!
//! [`FastaReader`] exposes both shapes a caller may want: `take()` returns
//! the sequence integer-encoded over `{A,T,G,C} -> {0,1,2,3}` with any other
//! byte silently dropped, and `take_raw()` returns the same bytes verbatim as
//! text, with no filtering at all.
//!
//! The reader buffers exactly one record ahead of the caller — never more,
//! so memory use doesn't grow with the number of headers seen so far —
//! calling `advance()` twice without an intervening `take()`/`take_raw()` is
//! a logic error, checked with `debug_assert!` in debug builds and tolerated
//! as a no-op (the same record is returned again) in release builds.

use std::io::BufRead;

use seqlsh_core::Result;

/// A streaming reader over FASTA text.
pub struct FastaReader<R> {
    reader: R,
    /// Header text for the record currently buffered in `pending_bases`,
    /// waiting to be consumed by `take()`/`take_raw()`.
    pending_name: Option<String>,
    /// Raw sequence bytes (newlines stripped, lines concatenated) for the
    /// buffered record.
    pending_bases: Vec<u8>,
    /// A header line already read from the stream while scanning for the
    /// end of the previous record; it names the *next* record.
    lookahead_name: Option<String>,
    line_buf: Vec<u8>,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending_name: None,
            pending_bases: Vec::new(),
            lookahead_name: None,
            line_buf: Vec::with_capacity(256),
        }
    }

    /// Position at the next available record. Returns `false` iff the
    /// stream is exhausted and no further record is available.
    pub fn advance(&mut self) -> Result<bool> {
        if self.pending_name.is_some() {
            debug_assert!(
                false,
                "FastaReader::advance() called twice without an intervening take()"
            );
            return Ok(true);
        }

        let name = match self.lookahead_name.take() {
            Some(name) => name,
            None => match self.scan_to_next_header()? {
                Some(name) => name,
                None => return Ok(false),
            },
        };

        self.pending_bases.clear();
        loop {
            match self.read_line()? {
                None => break,
                Some(line) => {
                    if let Some(rest) = line.strip_prefix(b">") {
                        match std::str::from_utf8(rest) {
                            Ok(s) => self.lookahead_name = Some(s.to_string()),
                            Err(_) => {
                                eprintln!("seqlsh-fasta: dropping record with non-UTF-8 header");
                                self.lookahead_name = None;
                            }
                        }
                        break;
                    }
                    self.pending_bases.extend_from_slice(line);
                }
            }
        }

        self.pending_name = Some(name);
        Ok(true)
    }

    /// Consume the current record, returning its name and integer-encoded
    /// sequence (`A=0, T=1, G=2, C=3`; any other byte is silently dropped).
    ///
    /// Must not be called without a prior successful `advance()`.
    pub fn take(&mut self) -> (String, Vec<u8>) {
        let name = self
            .pending_name
            .take()
            .expect("FastaReader::take() called without a prior successful advance()");
        let encoded = self
            .pending_bases
            .iter()
            .filter_map(|&b| match b {
                b'A' => Some(0u8),
                b'T' => Some(1u8),
                b'G' => Some(2u8),
                b'C' => Some(3u8),
                _ => None,
            })
            .collect();
        (name, encoded)
    }

    /// Consume the current record, returning its name and raw sequence text,
    /// with bytes preserved verbatim (no ACGT filtering, no case mapping).
    ///
    /// Must not be called without a prior successful `advance()`.
    pub fn take_raw(&mut self) -> (String, String) {
        let name = self
            .pending_name
            .take()
            .expect("FastaReader::take_raw() called without a prior successful advance()");
        let raw = String::from_utf8_lossy(&self.pending_bases).into_owned();
        (name, raw)
    }

    /// Scan forward until a header line is found, discarding any sequence
    /// lines encountered before the first record — buffering only starts
    /// once a name is known.
    fn scan_to_next_header(&mut self) -> Result<Option<String>> {
        loop {
            match self.read_line()? {
                None => return Ok(None),
                Some(line) => {
                    if let Some(rest) = line.strip_prefix(b">") {
                        match std::str::from_utf8(rest) {
                            Ok(s) => return Ok(Some(s.to_string())),
                            Err(_) => {
                                eprintln!("seqlsh-fasta: dropping record with non-UTF-8 header");
                                continue;
                            }
                        }
                    }
                    // Sequence data with no preceding header: discarded.
                }
            }
        }
    }

    /// Read one line, with the trailing `\n`/`\r\n` stripped. Returns `None`
    /// at end of stream.
    fn read_line(&mut self) -> Result<Option<&[u8]>> {
        self.line_buf.clear();
        let n = self.reader.read_until(b'\n', &mut self.line_buf)?;
        if n == 0 {
            return Ok(None);
        }
        while matches!(self.line_buf.last(), Some(b'\n') | Some(b'\r')) {
            self.line_buf.pop();
        }
        Ok(Some(&self.line_buf))
    }
}
