use ndarray::Array2;
use rand::Rng;

use crate::*;
pub use cluster::*;
pub use random::*;

mod cluster;
mod random;

pub trait MinefieldGenerator {
    fn generate(self, config: BoardConfig) -> MineLayout;
}

/// How mines get scattered once the first click is known.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlacementPolicy {
    /// Uniform rejection sampling, only the first click is kept clear.
    Regular,
    /// Eight mines around a hub away from the first click, then uniform fill.
    GuaranteedCluster,
}

impl PlacementPolicy {
    pub fn for_config(config: BoardConfig) -> Self {
        if config.size() != HARD_SIZE {
            return Self::Regular;
        }
        if ClusterMinefieldGenerator::fits(config) {
            Self::GuaranteedCluster
        } else {
            log::warn!(
                "Cannot fit a guaranteed cluster with {} mines, fallback to regular placement",
                config.mines
            );
            Self::Regular
        }
    }
}

/// Generates the layout for `config` with the policy its shape calls for.
pub fn generate_layout(config: BoardConfig, seed: u64, start: Coord2) -> MineLayout {
    let policy = PlacementPolicy::for_config(config);
    log::debug!("Placing {} mines with {:?}, seed {}", config.mines, policy, seed);
    match policy {
        PlacementPolicy::Regular => RandomMinefieldGenerator::new(seed, start).generate(config),
        PlacementPolicy::GuaranteedCluster => {
            ClusterMinefieldGenerator::new(seed, start).generate(config)
        }
    }
}

/// Rejection-samples `count` more mines into `mask`, skipping mined cells and any
/// cell `reject` refuses. Returns how many were placed.
pub(crate) fn scatter_mines<R: Rng>(
    rng: &mut R,
    mask: &mut Array2<bool>,
    count: CellCount,
    reject: impl Fn(Coord2) -> bool,
) -> CellCount {
    let (rows, cols) = mask.dim();
    let size = (rows as Coord, cols as Coord);

    // never spin on a board that cannot take the request
    let free = mask
        .indexed_iter()
        .filter(|&((row, col), &is_mine)| !is_mine && !reject((row as Coord, col as Coord)))
        .count() as CellCount;
    let target = if count > free {
        log::warn!("Requested {} mines but only {} cells are free", count, free);
        free
    } else {
        count
    };

    let mut placed = 0;
    while placed < target {
        let coords = (rng.random_range(0..size.0), rng.random_range(0..size.1));
        if reject(coords) || mask[coords.to_nd_index()] {
            continue;
        }
        mask[coords.to_nd_index()] = true;
        placed += 1;
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_hard_shape_gets_cluster() {
        assert_eq!(
            PlacementPolicy::for_config(Difficulty::Easy.config()),
            PlacementPolicy::Regular
        );
        assert_eq!(
            PlacementPolicy::for_config(Difficulty::Medium.config()),
            PlacementPolicy::Regular
        );
        assert_eq!(
            PlacementPolicy::for_config(Difficulty::Hard.config()),
            PlacementPolicy::GuaranteedCluster
        );
    }

    #[test]
    fn hard_shape_with_too_few_mines_falls_back() {
        let config = BoardConfig::new(16, 30, 5).unwrap();
        assert_eq!(PlacementPolicy::for_config(config), PlacementPolicy::Regular);
    }

    #[test]
    fn every_difficulty_gets_exact_mine_count() {
        for difficulty in Difficulty::ALL {
            let config = difficulty.config();
            for seed in 0..50 {
                let layout = generate_layout(config, seed, (4, 4));
                assert_eq!(layout.mine_count(), config.mines, "{difficulty} seed {seed}");
                assert_eq!(layout.size(), config.size());
            }
        }
    }

    #[test]
    fn scatter_stops_when_board_is_full() {
        use rand::{SeedableRng, rngs::SmallRng};

        let mut rng = SmallRng::seed_from_u64(3);
        let mut mask: Array2<bool> = Array2::default([2, 2]);
        let placed = scatter_mines(&mut rng, &mut mask, 10, |coords| coords == (0, 0));

        assert_eq!(placed, 3);
        assert!(!mask[[0, 0]]);
    }
}
