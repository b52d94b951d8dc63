//! # Two-stage out-of-core hash/argsort pipeline
//!
//! Stage 1 ([`generate`]) streams FASTA records through a [`HashFamily`],
//! committing each record's positions/name/hash-vector atomically. Stage 2
//! ([`argsort`]) reads those streams back and, per hash family, produces the
//! permutation that sorts records by ascending hash value — the input a
//! downstream clustering pass consumes to find records that land near each
//! other under at least one hash function.
//!
//! Neither stage holds the whole dataset in memory: stage 1 is bounded by
//! the worker pool width, and stage 2 is bounded by `O(M)` per family,
//! processed one family (or `worker_pool_width` families) at a time.

mod argsort;
mod config;
mod generate;

pub use argsort::{argsort, argsort_family, Parallelism};
pub use config::PipelineConfig;
pub use generate::{generate, Stage1Sinks};
