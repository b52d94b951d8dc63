use rand::Rng;
use rand_distr::StandardNormal;

/// A single projection k-mer min-hash function.
///
/// K-mers are hashed with a random projection of their base indicators; the
/// sequence hash is the minimum over all constituent k-mer hashes. The
/// weight table is the full state of a `Pkh` and is immutable after
/// construction, so it can be shared read-only across worker threads.
#[derive(Clone, Debug)]
pub struct Pkh {
    km: usize,
    /// `weights[j][b]` is the weight for base `b` at position `j` of the
    /// k-mer window, `j in [0, km)`, `b in [0, 4)`.
    weights: Vec<[f64; 4]>,
}

impl Pkh {
    /// Build a new PKH with k-mer width `km`, drawing its weight table from
    /// `rng`. Construction consumes `4 * km` draws from `rng`, in
    /// position-major, base-minor order.
    pub fn new<R: Rng + ?Sized>(km: usize, rng: &mut R) -> Self {
        let weights = (0..km)
            .map(|_| {
                let mut row = [0f64; 4];
                for w in row.iter_mut() {
                    *w = rng.sample(StandardNormal);
                }
                row
            })
            .collect();
        Self { km, weights }
    }

    pub fn kmer_width(&self) -> usize {
        self.km
    }

    /// Hash a single k-mer window of base codes (each in `[0, 4)`).
    ///
    /// Panics if `window.len() != self.kmer_width()` — this is an internal
    /// helper only ever called with a window produced by `min_hash`.
    fn window_hash(&self, window: &[u8]) -> f64 {
        debug_assert_eq!(window.len(), self.km);
        window
            .iter()
            .zip(self.weights.iter())
            .map(|(&base, row)| row[base as usize])
            .sum()
    }

    /// The overall min-hash for a sequence of base codes.
    ///
    /// If `seq` is shorter than the k-mer width, no window exists; this
    /// returns `f32::INFINITY` so stage-2 sorts place such sequences last,
    /// deterministically, rather than leaving the behavior unspecified.
    pub fn min_hash(&self, seq: &[u8]) -> f32 {
        if seq.len() < self.km {
            return f32::INFINITY;
        }
        let windows = seq.len() - self.km + 1;
        let mut best = f64::INFINITY;
        for i in 0..windows {
            let h = self.window_hash(&seq[i..i + self.km]);
            if i == 0 || h < best {
                best = h;
            }
        }
        best as f32
    }
}
