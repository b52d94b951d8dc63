use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::pkh::Pkh;

/// A vector of `n` independently seeded [`Pkh`] functions, all sharing one
/// k-mer width.
///
/// All `n` PKHs are constructed from a single seeded PRNG stream, consumed
/// in construction order — this is what makes a `HashFamily` reproducible
/// given a seed, rather than drawing from a process-global, unseeded PRNG.
pub struct HashFamily {
    kmer_width: usize,
    pkhs: Vec<Pkh>,
}

impl HashFamily {
    /// Build a family of `n` PKHs, each of k-mer width `km`, seeded from a
    /// single `StdRng` stream derived from `seed`.
    pub fn new(n: usize, km: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let pkhs = (0..n).map(|_| Pkh::new(km, &mut rng)).collect();
        Self {
            kmer_width: km,
            pkhs,
        }
    }

    pub fn num_hashes(&self) -> usize {
        self.pkhs.len()
    }

    pub fn kmer_width(&self) -> usize {
        self.kmer_width
    }

    /// Apply every hash function in the family to `seq`, in ascending index
    /// order, narrowing each result to `f32` to match the on-disk hash
    /// stream's width.
    pub fn hash_all(&self, seq: &[u8]) -> Vec<f32> {
        self.pkhs.iter().map(|pkh| pkh.min_hash(seq)).collect()
    }

    pub fn pkh(&self, k: usize) -> &Pkh {
        &self.pkhs[k]
    }
}
