use hashbrown::HashSet;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Uniformly random placement that never mines the hit point or its neighbors.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator {
    rng: SmallRng,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(&mut self, config: &GameConfig, hit: Coord2) -> Vec<Coord2> {
        let size = config.size();
        let protected: HashSet<Coord2> = iter_neighborhood(hit, size).collect();
        let mut candidates: Vec<Coord2> = iter_coords(size)
            .filter(|coords| !protected.contains(coords))
            .collect();

        let wanted = usize::from(config.mines());
        if wanted > candidates.len() {
            log::warn!(
                "Cannot keep the first click safe, requested {} mines but only {} cells are eligible",
                wanted,
                candidates.len()
            );
        }

        let mut mines = Vec::with_capacity(wanted);
        while mines.len() < wanted && !candidates.is_empty() {
            let pick = self.rng.random_range(0..candidates.len());
            mines.push(candidates.swap_remove(pick));
        }
        mines
    }
}
