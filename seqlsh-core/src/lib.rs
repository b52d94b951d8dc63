//! # Shared error types and small IO helpers for seqlsh
//!
//! This crate has no clustering logic of its own. It exists so the other
//! `seqlsh-*` crates share one error taxonomy (`error`) and one place for the
//! handful of cross-cutting helpers (`io_utils`, `seeding`) that would
//! otherwise get duplicated.

pub mod error;
pub mod io_utils;
pub mod seeding;

pub use error::{Error, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn open_maybe_gzipped_reads_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.txt");
        std::fs::write(&path, b"hello").unwrap();

        let mut reader = io_utils::open_maybe_gzipped(&path).unwrap();
        let mut buf = Vec::new();
        std::io::Read::read_to_end(&mut reader, &mut buf).unwrap();
        assert_eq!(buf, b"hello");
    }

    #[test]
    fn open_maybe_gzipped_reads_gz_file() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.txt.gz");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"hello gz").unwrap();
        let compressed = encoder.finish().unwrap();
        std::fs::write(&path, compressed).unwrap();

        let mut reader = io_utils::open_maybe_gzipped(&path).unwrap();
        let mut buf = Vec::new();
        std::io::Read::read_to_end(&mut reader, &mut buf).unwrap();
        assert_eq!(buf, b"hello gz");
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        use rand::RngCore;
        let mut a = seeding::seeded_rng(42);
        let mut b = seeding::seeded_rng(42);
        assert_eq!(a.next_u64(), b.next_u64());
    }
}
