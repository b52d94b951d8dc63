use std::io;
use thiserror::Error;

/// Error type shared across the seqlsh pipeline crates.
///
/// Every variant is fatal: the pipeline is a batch process, and a corrupt
/// partial output is worse than a clean abort plus a rerun.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error reading or writing a pipeline stream.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A FASTA header contained bytes that are not valid UTF-8.
    #[error("FASTA header is not valid UTF-8")]
    InvalidUtf8Name,

    /// A stage-2 input stream disagreed with `positions` on record count.
    #[error("length mismatch in `{stream}`: expected {expected} records, found {got}")]
    LengthMismatch {
        stream: &'static str,
        expected: usize,
        got: usize,
    },

    /// A workspace buffer was the wrong length for the operation requested
    /// of it. This indicates a programmer error, not bad input data.
    #[error("argsort workspace length mismatch: expected {expected}, got {got}")]
    WorkspaceMismatch { expected: usize, got: usize },
}

/// Result type alias used throughout seqlsh.
pub type Result<T> = std::result::Result<T, Error>;
