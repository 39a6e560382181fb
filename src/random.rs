use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of randomness for spawn positions, speeds and drops.
///
/// Game code never touches a global RNG so a session can be replayed from a seed,
/// and tests can script every draw.
pub trait RandomSource {
    /// Uniform integer in `[low, high)`. Returns `low` when the range is empty.
    fn range(&mut self, low: i32, high: i32) -> i32;

    /// Uniform float in `[0, 1)`
    fn unit(&mut self) -> f64;
}

/// `rand`-backed source
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_os() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded when `seed` is given, OS entropy otherwise
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_os(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn range(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..high)
    }

    fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}
