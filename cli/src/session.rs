use chrono::prelude::*;
use mineboard_core::*;

/// Where board seeds come from, a fixed seed counts up so every game is reproducible.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Seeds {
    Random,
    Fixed(u64),
}

impl Seeds {
    fn next(&mut self) -> u64 {
        match self {
            Self::Random => rand::random(),
            Self::Fixed(seed) => {
                let current = *seed;
                *seed = seed.wrapping_add(1);
                current
            }
        }
    }
}

impl From<Option<u64>> for Seeds {
    fn from(seed: Option<u64>) -> Self {
        seed.map_or(Self::Random, Self::Fixed)
    }
}

/// The board currently being played plus the clock around it.
#[derive(Clone, Debug)]
pub struct Session {
    difficulty: Difficulty,
    seeds: Seeds,
    board: Board,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(difficulty: Difficulty, mut seeds: Seeds) -> Self {
        let board = Board::new(difficulty.config(), seeds.next());
        log::debug!("New {} game, seed {}", difficulty, board.seed());
        Self {
            difficulty,
            seeds,
            board,
            started_at: None,
            ended_at: None,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Throws the board away, switching difficulty when one is given.
    pub fn new_game(&mut self, difficulty: Option<Difficulty>) {
        *self = Self::new(difficulty.unwrap_or(self.difficulty), self.seeds);
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.reveal_at(coords, Utc::now())
    }

    pub(crate) fn reveal_at(&mut self, coords: Coord2, now: DateTime<Utc>) -> Result<RevealOutcome> {
        let outcome = self.board.reveal(coords)?;
        if outcome.has_update() && self.started_at.is_none() {
            log::debug!("started at {}", now);
            self.started_at = Some(now);
        }
        if self.board.is_finished() && self.ended_at.is_none() {
            log::debug!("ended at {}", now);
            self.ended_at = Some(now);
        }
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.board.toggle_flag(coords)
    }

    /// How many seconds have passed since the first reveal, 0 if it hasn't happened
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs_at(Utc::now())
    }

    pub(crate) fn elapsed_secs_at(&self, now: DateTime<Utc>) -> u32 {
        match self.started_at {
            Some(started_at) => (self.ended_at.unwrap_or(now) - started_at)
                .num_seconds()
                .max(0) as u32,
            None => 0,
        }
    }
}
