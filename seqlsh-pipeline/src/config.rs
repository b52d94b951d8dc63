use serde::{Deserialize, Serialize};

use seqlsh_core::seeding::DEFAULT_SEED;

/// Process-level configuration for both pipeline stages.
///
/// `num_hashes` and `kmer_width` size the [`seqlsh_hash::HashFamily`];
/// `worker_pool_width` bounds the hash-computation and argsort worker
/// pools; `seed` determines the whole run's reproducibility.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub num_hashes: usize,
    pub kmer_width: usize,
    pub worker_pool_width: usize,
    pub seed: u64,
}

impl Default for PipelineConfig {
    /// 100 hash families, k-mer width 10, a worker pool of 10 — matching the
    /// upstream Go pipeline's defaults. The seed defaults to a fixed constant
    /// only so `Default` is well-defined for examples and tests — production
    /// runs should set their own seed explicitly.
    fn default() -> Self {
        Self {
            num_hashes: 100,
            kmer_width: 10,
            worker_pool_width: 10,
            seed: DEFAULT_SEED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.num_hashes, 100);
        assert_eq!(cfg.kmer_width, 10);
        assert_eq!(cfg.worker_pool_width, 10);
    }
}
