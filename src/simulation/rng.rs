//! Seeded random streams.
//!
//! One seed yields three independent ChaCha streams, so drawing more numbers
//! for predator evolution never shifts what organism evolution sees.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The random generators owned by one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct RngStreams {
    /// Genesis, shuffles and food respawns.
    pub world: ChaCha8Rng,
    /// Organism evolution.
    pub organisms: ChaCha8Rng,
    /// Predator evolution.
    pub predators: ChaCha8Rng,
}

impl RngStreams {
    /// Derives all streams from `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            world: stream(seed, 0),
            organisms: stream(seed, 1),
            predators: stream(seed, 2),
        }
    }
}

fn stream(seed: u64, id: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(id);
    rng
}
