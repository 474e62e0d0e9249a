use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// Seeded generator owned by a game. Cloning a game clones this too, so a
/// simulated copy draws exactly what the live game would.
#[derive(Debug, Clone)]
pub struct RngState {
    rng: StdRng,
}

impl RngState {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn gen_index(&mut self, len: usize) -> usize {
        if len <= 1 {
            0
        } else {
            self.rng.gen_range(0..len)
        }
    }

    pub fn gen_below(&mut self, bound: u64) -> u64 {
        if bound <= 1 {
            0
        } else {
            self.rng.gen_range(0..bound)
        }
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}
