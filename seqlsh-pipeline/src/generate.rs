//! Stage 1: parallel hash generation.
//!
//! A single producer thread streams FASTA records and dispatches each one to
//! a bounded worker pool; workers compute a record's full hash vector and
//! hand it to a single serializing writer over a rendezvous channel. The
//! writer commits each record atomically across the positions, names, and
//! per-family hash streams, so a crash mid-run never leaves those streams at
//! different record counts for a successfully-committed record.
//!
//! The producer bounds how many records are in flight with a counting
//! admission channel pre-loaded with `worker_pool_width` permits: dispatching
//! a record consumes a permit, and a worker returns its permit only once the
//! writer has taken the record off the rendezvous channel. Before closing the
//! pipeline, the producer re-acquires every permit, which cannot happen until
//! every dispatched worker has finished.

use std::io::{BufRead, Write};

use crossbeam_channel::bounded;
use indicatif::ProgressBar;
use rayon::ThreadPoolBuilder;

use seqlsh_core::{Error, Result};
use seqlsh_fasta::FastaReader;
use seqlsh_hash::HashFamily;
use seqlsh_io::{write_f32_le, write_name_line, write_u32_le, WriterBundle};

/// The three output streams stage 1 writes, kept together so the writer
/// thread commits a record across all of them without the caller needing to
/// juggle separate handles.
pub struct Stage1Sinks {
    pub hashes: WriterBundle<Box<dyn Write + Send>>,
    pub names: Box<dyn Write + Send>,
    pub positions: Box<dyn Write + Send>,
}

struct HashedRecord {
    ordinal: u32,
    name: String,
    hash_vals: Vec<f32>,
}

/// Stream `fasta` through `family`, writing positions/names/hashes to
/// `sinks`. Returns `M`, the number of records committed.
///
/// `worker_pool_width` bounds both the rayon thread pool used for hash
/// computation and the number of records allowed in flight at once.
pub fn generate<R: BufRead>(
    fasta: R,
    family: &HashFamily,
    mut sinks: Stage1Sinks,
    worker_pool_width: usize,
    progress: Option<&ProgressBar>,
) -> Result<u32> {
    debug_assert_eq!(
        sinks.hashes.len(),
        family.num_hashes(),
        "Stage1Sinks must carry one hash stream per HashFamily member"
    );
    if sinks.hashes.len() != family.num_hashes() {
        return Err(Error::WorkspaceMismatch {
            expected: family.num_hashes(),
            got: sinks.hashes.len(),
        });
    }
    let worker_pool_width = worker_pool_width.max(1);

    let (result_tx, result_rx) = bounded::<HashedRecord>(0);
    let (admit_tx, admit_rx) = bounded::<()>(worker_pool_width);
    for _ in 0..worker_pool_width {
        admit_tx
            .send(())
            .expect("admission channel was just created with matching capacity");
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(worker_pool_width)
        .build()
        .expect("failed to build stage-1 worker thread pool");

    let mut reader = FastaReader::new(fasta);

    let committed = std::thread::scope(|scope| -> Result<u32> {
        let writer = scope.spawn(move || -> Result<u32> {
            let mut committed: u32 = 0;
            for record in result_rx.iter() {
                write_u32_le(&mut sinks.positions, record.ordinal)?;
                write_name_line(&mut sinks.names, &record.name)?;
                for (k, v) in record.hash_vals.iter().enumerate() {
                    write_f32_le(sinks.hashes.get_mut(k), *v)?;
                }
                committed += 1;
                if let Some(pb) = progress {
                    pb.inc(1);
                }
            }
            sinks.positions.flush()?;
            sinks.names.flush()?;
            sinks.hashes.flush_all()?;
            Ok(committed)
        });

        pool.in_place_scope(|worker_scope| -> Result<()> {
            let mut ordinal: u32 = 0;
            while reader.advance()? {
                let (name, seq) = reader.take();

                admit_rx
                    .recv()
                    .expect("admission sender stays alive for the whole dispatch loop");

                let tx = result_tx.clone();
                let release = admit_tx.clone();
                let this_ordinal = ordinal;
                worker_scope.spawn(move |_| {
                    let hash_vals = family.hash_all(&seq);
                    let _ = tx.send(HashedRecord {
                        ordinal: this_ordinal,
                        name,
                        hash_vals,
                    });
                    release
                        .send(())
                        .expect("admission receiver outlives every worker");
                });

                ordinal += 1;
            }
            Ok(())
        })?;

        // Re-acquire every permit: this cannot complete until every
        // dispatched worker has released its own, i.e. until every
        // dispatched record has reached the writer.
        for _ in 0..worker_pool_width {
            admit_rx
                .recv()
                .expect("every dispatched worker eventually releases its permit");
        }
        drop(result_tx);

        writer.join().expect("stage-1 writer thread panicked")
    })?;

    Ok(committed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use seqlsh_io::read_all_u32_le;
    use std::io::Cursor;

    use std::sync::{Arc, Mutex};

    /// A `Write` sink that can still be inspected after being moved into
    /// `Stage1Sinks` (a plain `Vec<u8>` can't, once boxed into the trait
    /// object and handed off to the writer thread).
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn snapshot(&self) -> Vec<u8> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct Captured {
        sinks: Stage1Sinks,
        hashes: Vec<SharedBuf>,
        names: SharedBuf,
        positions: SharedBuf,
    }

    fn captured_sinks(n: usize) -> Captured {
        let hashes: Vec<SharedBuf> = (0..n).map(|_| SharedBuf::default()).collect();
        let names = SharedBuf::default();
        let positions = SharedBuf::default();
        let sinks = Stage1Sinks {
            hashes: WriterBundle::new(
                hashes
                    .iter()
                    .cloned()
                    .map(|b| Box::new(b) as Box<dyn Write + Send>)
                    .collect(),
            ),
            names: Box::new(names.clone()),
            positions: Box::new(positions.clone()),
        };
        Captured {
            sinks,
            hashes,
            names,
            positions,
        }
    }

    const FIXTURE: &[u8] = b">1\nATTAGCAG\n>2\nTGACCGAA\n>3\nGCGGTCAT\n>4\nAAAA\n";

    #[test]
    fn commits_one_record_per_sequence() {
        let family = HashFamily::new(5, 4, 11);
        let captured = captured_sinks(5);
        let m = generate(Cursor::new(FIXTURE), &family, captured.sinks, 3, None).unwrap();
        assert_eq!(m, 4);
    }

    #[test]
    fn every_stream_commits_in_lockstep() {
        let n = 3;
        let family = HashFamily::new(n, 4, 11);
        let captured = captured_sinks(n);
        let m = generate(Cursor::new(FIXTURE), &family, captured.sinks, 4, None).unwrap();

        let positions = read_all_u32_le(Cursor::new(captured.positions.snapshot())).unwrap();
        assert_eq!(positions.len(), m as usize);

        let name_count = captured
            .names
            .snapshot()
            .split(|&b| b == b'\n')
            .filter(|line| !line.is_empty())
            .count();
        assert_eq!(name_count, m as usize);

        for hash_buf in &captured.hashes {
            assert_eq!(hash_buf.snapshot().len(), m as usize * 4);
        }
    }

    #[test]
    fn single_width_pool_preserves_emission_order() {
        let n = 3;
        let family = HashFamily::new(n, 4, 11);
        let captured = captured_sinks(n);
        generate(Cursor::new(FIXTURE), &family, captured.sinks, 1, None).unwrap();

        let positions = read_all_u32_le(Cursor::new(captured.positions.snapshot())).unwrap();
        assert_eq!(positions, vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_sequence_record_does_not_stall_the_pipeline() {
        let fasta: &[u8] = b">only\n";
        let family = HashFamily::new(2, 4, 1);
        let captured = captured_sinks(2);
        let m = generate(Cursor::new(fasta), &family, captured.sinks, 2, None).unwrap();
        assert_eq!(m, 1);
    }
}
