use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::*;

/// How often a hub is redrawn before a too-close candidate is accepted anyway.
pub const MAX_HUB_ATTEMPTS: u32 = 1000;

/// Hubs closer than this (Chebyshev) to the first click are redrawn.
const MIN_HUB_DISTANCE: Coord = 3;

/// Expert-board placement: every neighbour of a random "hub" cell is a mine, so
/// the hub shows an 8 somewhere near, but not overlapping, the opening.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterMinefieldGenerator {
    seed: u64,
    start: Coord2,
    max_attempts: u32,
}

impl ClusterMinefieldGenerator {
    pub fn new(seed: u64, start: Coord2) -> Self {
        Self {
            seed,
            start,
            max_attempts: MAX_HUB_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Whether `config` has room for an interior hub and for the remaining mines
    /// outside the hub block.
    pub fn fits(config: BoardConfig) -> bool {
        config.rows >= 3
            && config.cols >= 3
            && config.mines >= 8
            && config.mines.saturating_add(2) <= config.total_cells()
    }

    /// Draws interior hubs until one is far enough from the start. When the
    /// attempts run out the last candidate is kept without re-checking it.
    fn pick_hub<R: Rng>(&self, rng: &mut R, (rows, cols): Coord2) -> Coord2 {
        let mut attempts = 0;
        loop {
            let hub = (rng.random_range(1..rows - 1), rng.random_range(1..cols - 1));
            attempts += 1;

            if chebyshev(hub, self.start) >= MIN_HUB_DISTANCE {
                log::debug!("Hub at {:?} after {} attempts", hub, attempts);
                return hub;
            }
            if attempts >= self.max_attempts {
                log::warn!(
                    "No hub far enough from {:?} after {} attempts, using {:?}",
                    self.start,
                    attempts,
                    hub
                );
                return hub;
            }
        }
    }
}

impl MinefieldGenerator for ClusterMinefieldGenerator {
    fn generate(self, config: BoardConfig) -> MineLayout {
        if !Self::fits(config) {
            log::warn!(
                "Cannot fit a guaranteed cluster on {:?} with {} mines, fallback to random",
                config.size(),
                config.mines
            );
            return RandomMinefieldGenerator::new(self.seed, self.start).generate(config);
        }

        let size = config.size();
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines: Array2<bool> = Array2::default(size.to_nd_index());

        let hub = self.pick_hub(&mut rng, size);
        let mut placed: CellCount = 0;
        for coords in NeighborIter::new(hub, size) {
            if coords != self.start {
                mines[coords.to_nd_index()] = true;
                placed += 1;
            }
        }

        let start = self.start;
        placed += scatter_mines(
            &mut rng,
            &mut mines,
            config.mines.saturating_sub(placed),
            |coords| coords == start || chebyshev(coords, hub) <= 1,
        );
        if placed != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                placed,
                config.mines
            );
        }

        MineLayout::from_mine_mask(mines).with_hub(hub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hard() -> BoardConfig {
        Difficulty::Hard.config()
    }

    #[test]
    fn hub_is_safe_and_fully_surrounded() {
        for seed in 0..100 {
            let start = (8, 15);
            let layout = ClusterMinefieldGenerator::new(seed, start).generate(hard());
            let hub = layout.hub().unwrap();

            assert!(chebyshev(hub, start) > 2, "seed {seed}");
            assert!(!layout.contains_mine(hub));
            assert_eq!(layout.adjacent_mine_count(hub), 8);
            assert!(!layout.contains_mine(start));
            assert_eq!(layout.mine_count(), 99);
        }
    }

    #[test]
    fn hub_stays_interior() {
        for seed in 0..100 {
            let layout = ClusterMinefieldGenerator::new(seed, (0, 0)).generate(hard());
            let (row, col) = layout.hub().unwrap();
            assert!((1..15).contains(&row));
            assert!((1..29).contains(&col));
        }
    }

    #[test]
    fn exhausted_search_keeps_last_candidate() {
        // a 5x5 board has no interior cell 3 away from its centre
        let config = BoardConfig::new(5, 5, 10).unwrap();
        let start = (2, 2);
        let layout = ClusterMinefieldGenerator::new(1, start)
            .with_max_attempts(5)
            .generate(config);
        let hub = layout.hub().unwrap();

        assert!(chebyshev(hub, start) <= 1);
        assert!(!layout.contains_mine(start));
        assert!(!layout.contains_mine(hub));
        assert_eq!(layout.mine_count(), 10);
        // the start sits inside the hub block and is skipped unless it is the hub
        let expected = if hub == start { 8 } else { 7 };
        assert_eq!(layout.adjacent_mine_count(hub), expected);
    }

    #[test]
    fn narrow_board_falls_back_to_random() {
        let config = BoardConfig::new(2, 30, 10).unwrap();
        let layout = ClusterMinefieldGenerator::new(1, (0, 0)).generate(config);

        assert_eq!(layout.hub(), None);
        assert_eq!(layout.mine_count(), 10);
        assert!(!layout.contains_mine((0, 0)));
    }

    #[test]
    fn sparse_board_falls_back_to_random() {
        let config = BoardConfig::new(16, 30, 5).unwrap();
        let layout = ClusterMinefieldGenerator::new(1, (0, 0)).generate(config);

        assert_eq!(layout.hub(), None);
        assert_eq!(layout.mine_count(), 5);
        assert_eq!(
            layout,
            RandomMinefieldGenerator::new(1, (0, 0)).generate(config)
        );
    }

    #[test]
    fn fits_needs_room_outside_hub_block() {
        assert!(ClusterMinefieldGenerator::fits(hard()));
        assert!(!ClusterMinefieldGenerator::fits(BoardConfig::new(2, 30, 10).unwrap()));
        assert!(!ClusterMinefieldGenerator::fits(BoardConfig::new(3, 3, 8).unwrap()));
        assert!(ClusterMinefieldGenerator::fits(BoardConfig::new(4, 4, 14).unwrap()));
    }
}
