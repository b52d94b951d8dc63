//! Stage 2: argsort-by-hash.
//!
//! Stage 1 commits records in whatever order workers happen to finish them,
//! recording the true emission order in the `positions` stream. Stage 2
//! inverts that permutation to recover each record's hash value by its
//! original ordinal, then produces — per hash family — the permutation of
//! ordinals that sorts the family's hash values ascending, ties broken by
//! ordinal. This is the one place a complete run touches `O(M)` memory for a
//! single family at a time rather than streaming.

use std::cmp::Ordering;
use std::io::{Read, Write};

use rayon::ThreadPoolBuilder;

use seqlsh_core::{Error, Result};
use seqlsh_io::{read_all_u32_le, read_f32_le, write_u32_le, WriterBundle};

/// Read one family's hash stream (in emission order) and `positions` (the
/// ordinal each emitted value belongs to) and return the permutation of
/// ordinals `0..M` sorted by ascending hash value, ties broken by ordinal.
pub fn argsort_family<R: Read>(mut hash_stream: R, positions: &[u32]) -> Result<Vec<u32>> {
    let m = positions.len();
    let mut hashvals = vec![0f32; m];
    let mut filled = 0usize;

    while let Some(v) = read_f32_le(&mut hash_stream)? {
        if filled >= m {
            return Err(Error::LengthMismatch {
                stream: "hash_k",
                expected: m,
                got: filled + 1,
            });
        }
        hashvals[positions[filled] as usize] = v;
        filled += 1;
    }
    if filled != m {
        return Err(Error::LengthMismatch {
            stream: "hash_k",
            expected: m,
            got: filled,
        });
    }

    let mut inds: Vec<u32> = (0..m as u32).collect();
    inds.sort_by(|&a, &b| {
        hashvals[a as usize]
            .partial_cmp(&hashvals[b as usize])
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });
    Ok(inds)
}

/// How stage 2 spreads its per-family work across threads.
pub enum Parallelism {
    /// Process families one at a time, in ascending index order.
    Sequential,
    /// Process families concurrently on a bounded pool of this width.
    Bounded(usize),
}

/// Run stage 2 over every hash family: invert `positions` once, then argsort
/// each family's hash stream and write the resulting permutation to the
/// matching sink in `sorted_sinks`.
///
/// `hash_streams` and `sorted_sinks` must have the same length, one entry per
/// hash family in the same index order written by stage 1.
pub fn argsort(
    hash_streams: Vec<Box<dyn Read + Send>>,
    positions: Box<dyn Read>,
    mut sorted_sinks: WriterBundle<Box<dyn Write + Send>>,
    parallelism: Parallelism,
) -> Result<usize> {
    assert_eq!(
        hash_streams.len(),
        sorted_sinks.len(),
        "one hash stream and one sorted-output sink per hash family"
    );

    let positions = read_all_u32_le(positions)?;
    let m = positions.len();

    let process_one = |stream: Box<dyn Read + Send>| -> Result<Vec<u32>> {
        argsort_family(stream, &positions)
    };

    let results: Vec<Result<Vec<u32>>> = match parallelism {
        Parallelism::Sequential => hash_streams.into_iter().map(process_one).collect(),
        Parallelism::Bounded(width) => {
            let pool = ThreadPoolBuilder::new()
                .num_threads(width.max(1))
                .build()
                .expect("failed to build stage-2 worker thread pool");
            pool.install(|| {
                use rayon::prelude::*;
                hash_streams
                    .into_par_iter()
                    .map(process_one)
                    .collect::<Vec<_>>()
            })
        }
    };

    for (k, result) in results.into_iter().enumerate() {
        let sorted = result?;
        let sink = sorted_sinks.get_mut(k);
        for &ordinal in &sorted {
            write_u32_le(sink, ordinal)?;
        }
        sink.flush()?;
    }

    Ok(m)
}
