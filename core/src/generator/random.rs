use ndarray::Array2;
use rand::{SeedableRng, rngs::SmallRng};

use super::*;

/// Purely random placement that only keeps the first clicked cell clear.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    start: Coord2,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64, start: Coord2) -> Self {
        Self { seed, start }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: BoardConfig) -> MineLayout {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());

        let placed = scatter_mines(&mut rng, &mut mines, config.mines, |coords| {
            coords == self.start
        });
        if placed != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                placed,
                config.mines
            );
        }

        MineLayout::from_mine_mask(mines)
    }
}
