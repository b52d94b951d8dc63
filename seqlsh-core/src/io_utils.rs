use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

/// Open `path` for reading, transparently decompressing if it ends in `.gz`.
///
/// Compression is a concern of callers and collaborators, not of the
/// pipeline core; this helper only exists so small examples and tests don't
/// need to special-case gzipped fixtures.
pub fn open_maybe_gzipped(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension().and_then(|e| e.to_str()) == Some("gz");
    let file = File::open(path).with_context(|| format!("failed to open file: {:?}", path))?;
    let reader: Box<dyn Read> = if is_gzipped {
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };
    Ok(BufReader::new(reader))
}
