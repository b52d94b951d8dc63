//! # Byte-stream carrier abstractions
//!
//! The pipeline stages only need sequential access to readers and writers —
//! never random access — plus a fixed-size bundle of `N` writers that are
//! opened and closed together (one per hash family). This crate provides
//! just that: small, typed wrappers around `byteorder` for the little-
//! endian `u32`/`f32` record streams described in the wire format, and
//! [`WriterBundle`] / [`ReaderBundle`] fan-out collections.

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use seqlsh_core::Result;

/// Write a single little-endian `u32` to `w`.
pub fn write_u32_le<W: Write>(w: &mut W, v: u32) -> Result<()> {
    w.write_u32::<LittleEndian>(v)?;
    Ok(())
}

/// Write a single little-endian `f32` to `w`.
pub fn write_f32_le<W: Write>(w: &mut W, v: f32) -> Result<()> {
    w.write_f32::<LittleEndian>(v)?;
    Ok(())
}

/// Write `name` followed by a newline, with no length prefix.
pub fn write_name_line<W: Write>(w: &mut W, name: &str) -> Result<()> {
    w.write_all(name.as_bytes())?;
    w.write_all(b"\n")?;
    Ok(())
}

/// Read one little-endian `u32`, returning `Ok(None)` at a clean end of
/// stream (i.e. zero bytes read before the value would start).
pub fn read_u32_le<R: Read>(r: &mut R) -> Result<Option<u32>> {
    match r.read_u32::<LittleEndian>() {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Read one little-endian `f32`, returning `Ok(None)` at a clean end of
/// stream.
pub fn read_f32_le<R: Read>(r: &mut R) -> Result<Option<f32>> {
    match r.read_f32::<LittleEndian>() {
        Ok(v) => Ok(Some(v)),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Read every remaining little-endian `u32` from `r` into a `Vec`.
pub fn read_all_u32_le<R: Read>(mut r: R) -> Result<Vec<u32>> {
    let mut out = Vec::new();
    while let Some(v) = read_u32_le(&mut r)? {
        out.push(v);
    }
    Ok(out)
}

/// A fixed-size collection of `N` writers, opened together and closed
/// together — the shape the stage-1 hash generator needs for its `N`
/// `hash_k` sinks.
pub struct WriterBundle<W> {
    writers: Vec<W>,
}

impl<W: Write> WriterBundle<W> {
    pub fn new(writers: Vec<W>) -> Self {
        Self { writers }
    }

    pub fn len(&self) -> usize {
        self.writers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }

    pub fn get_mut(&mut self, k: usize) -> &mut W {
        &mut self.writers[k]
    }

    /// Flush every writer in the bundle, in ascending index order.
    pub fn flush_all(&mut self) -> Result<()> {
        for w in self.writers.iter_mut() {
            w.flush()?;
        }
        Ok(())
    }

    /// Consume the bundle, returning the underlying writers in order.
    pub fn into_inner(self) -> Vec<W> {
        self.writers
    }
}

/// A fixed-size collection of `N` readers, the stage-2 counterpart to
/// [`WriterBundle`].
pub struct ReaderBundle<R> {
    readers: Vec<R>,
}

impl<R: Read> ReaderBundle<R> {
    pub fn new(readers: Vec<R>) -> Self {
        Self { readers }
    }

    pub fn len(&self) -> usize {
        self.readers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }

    pub fn into_inner(self) -> Vec<R> {
        self.readers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn round_trips_u32_stream() {
        let mut buf = Vec::new();
        for v in [0u32, 1, 4294967295, 42] {
            write_u32_le(&mut buf, v).unwrap();
        }
        let values = read_all_u32_le(Cursor::new(buf)).unwrap();
        assert_eq!(values, vec![0, 1, 4294967295, 42]);
    }

    #[test]
    fn round_trips_f32_stream() {
        let mut buf = Vec::new();
        for v in [0.0f32, -1.5, f32::INFINITY, 3.14159] {
            write_f32_le(&mut buf, v).unwrap();
        }
        let mut cursor = Cursor::new(buf);
        let mut values = Vec::new();
        while let Some(v) = read_f32_le(&mut cursor).unwrap() {
            values.push(v);
        }
        assert_eq!(values.len(), 4);
        assert_eq!(values[2], f32::INFINITY);
    }

    #[test]
    fn name_lines_are_newline_delimited() {
        let mut buf = Vec::new();
        write_name_line(&mut buf, "seq_one").unwrap();
        write_name_line(&mut buf, "seq_two").unwrap();
        assert_eq!(buf, b"seq_one\nseq_two\n");
    }

    #[test]
    fn writer_bundle_dispatches_to_the_right_slot() {
        let mut bundle = WriterBundle::new(vec![Vec::<u8>::new(), Vec::<u8>::new()]);
        write_u32_le(bundle.get_mut(0), 7).unwrap();
        write_u32_le(bundle.get_mut(1), 9).unwrap();
        let inner = bundle.into_inner();
        assert_eq!(inner[0], 7u32.to_le_bytes());
        assert_eq!(inner[1], 9u32.to_le_bytes());
    }

    #[test]
    fn empty_stream_reads_as_empty_vec() {
        let values = read_all_u32_le(Cursor::new(Vec::<u8>::new())).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn u32_stream_round_trips_through_a_real_file() {
        use std::fs::File;
        use std::io::{BufReader, BufWriter};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("positions");

        let mut writer = BufWriter::new(File::create(&path).unwrap());
        for v in [5u32, 1, 2, 4294967294] {
            write_u32_le(&mut writer, v).unwrap();
        }
        writer.flush().unwrap();
        drop(writer);

        let values = read_all_u32_le(BufReader::new(File::open(&path).unwrap())).unwrap();
        assert_eq!(values, vec![5, 1, 2, 4294967294]);
    }
}
