use alloc::vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game of minesweeper. Mines are placed on the first reveal so that cell is
/// always safe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    config: BoardConfig,
    seed: u64,
    cells: Array2<Cell>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: GameState,
    mines_placed: bool,
    hub: Option<Coord2>,
    triggered_mine: Option<Coord2>,
}

/// Deserialized form of [`Board`], checked before it becomes one.
#[derive(Deserialize)]
struct RawBoard {
    config: BoardConfig,
    seed: u64,
    cells: Array2<Cell>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: GameState,
    mines_placed: bool,
    hub: Option<Coord2>,
    triggered_mine: Option<Coord2>,
}

impl TryFrom<RawBoard> for Board {
    type Error = GameError;

    fn try_from(raw: RawBoard) -> Result<Self> {
        let (rows, cols) = raw.cells.dim();
        if (rows, cols) != (raw.config.rows.into(), raw.config.cols.into()) {
            return Err(GameError::InvalidBoardShape);
        }

        let mut mines: CellCount = 0;
        let mut revealed_safe: CellCount = 0;
        let mut flagged: CellCount = 0;
        for cell in raw.cells.iter() {
            if cell.is_revealed && cell.is_flagged && !cell.is_mine {
                return Err(GameError::InvalidBoardState);
            }
            mines += CellCount::from(cell.is_mine);
            revealed_safe += CellCount::from(cell.is_revealed && !cell.is_mine);
            flagged += CellCount::from(cell.is_flagged);
        }

        let size = raw.config.size();
        let triggered_ok = match (raw.state, raw.triggered_mine) {
            (GameState::Lost, Some(coords)) => in_bounds(coords, size),
            (GameState::Lost, None) => false,
            (_, triggered) => triggered.is_none(),
        };
        let expected_revealed = revealed_safe + CellCount::from(raw.triggered_mine.is_some());
        let consistent = if raw.mines_placed {
            mines == raw.config.mines
        } else {
            mines == 0 && revealed_safe == 0 && raw.state == GameState::Playing
        };
        let won_ok = (raw.state == GameState::Won) == (revealed_safe == raw.config.safe_cells());

        if !consistent
            || !triggered_ok
            || (raw.mines_placed && !won_ok)
            || raw.revealed_count != expected_revealed
            || raw.flagged_count != flagged
            || raw.hub.is_some_and(|hub| !in_bounds(hub, size))
        {
            return Err(GameError::InvalidBoardState);
        }

        Ok(Self {
            config: raw.config,
            seed: raw.seed,
            cells: raw.cells,
            revealed_count: raw.revealed_count,
            flagged_count: raw.flagged_count,
            state: raw.state,
            mines_placed: raw.mines_placed,
            hub: raw.hub,
            triggered_mine: raw.triggered_mine,
        })
    }
}

impl Board {
    /// Empty board, every cell hidden and mine-free until the first reveal.
    pub fn new(config: BoardConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            cells: Array2::default(config.size().to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            state: GameState::default(),
            mines_placed: false,
            hub: None,
            triggered_mine: None,
        }
    }

    /// Board with a predetermined layout, the first reveal gets no protection.
    pub fn with_layout(layout: MineLayout) -> Self {
        let mut board = Self::new(layout.board_config(), 0);
        board.apply_layout(&layout);
        board
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mine counter shown to the player, negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flagged_count as isize)
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn hub(&self) -> Option<Coord2> {
        self.hub
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    /// Places mines keeping `first` clear and computes every neighbour count.
    /// Does nothing once mines exist.
    pub fn place_mines(&mut self, first: Coord2) -> Result<()> {
        if !in_bounds(first, self.size()) {
            return Err(GameError::InvalidCoords);
        }
        if self.mines_placed {
            log::warn!("Mines already placed, ignoring request at {:?}", first);
            return Ok(());
        }

        let layout = generate_layout(self.config, self.seed, first);
        self.apply_layout(&layout);
        Ok(())
    }

    fn apply_layout(&mut self, layout: &MineLayout) {
        for ((row, col), cell) in self.cells.indexed_iter_mut() {
            cell.is_mine = layout.contains_mine((row as Coord, col as Coord));
        }
        self.config.mines = layout.mine_count();
        self.hub = layout.hub();
        self.mines_placed = true;
        self.calculate_neighbor_mines();
    }

    pub fn calculate_neighbor_mines(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if self.cells[coords.to_nd_index()].is_mine {
                    continue;
                }
                let count = self
                    .cells
                    .iter_neighbors(coords)
                    .filter(|&pos| self.cells[pos.to_nd_index()].is_mine)
                    .count() as u8;
                self.cells[coords.to_nd_index()].neighbor_mines = count;
            }
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.check_playing()?;

        let Some(cell) = self.cells.get_mut(coords.to_nd_index()) else {
            return Ok(MarkOutcome::NoChange);
        };
        if cell.is_revealed {
            return Ok(MarkOutcome::NoChange);
        }

        cell.is_flagged = !cell.is_flagged;
        if cell.is_flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        Ok(MarkOutcome::Changed)
    }

    /// Reveals a cell, flood-filling through zero counts. Out-of-bounds, flagged
    /// and already revealed cells are left alone.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.check_playing()?;

        let Some(cell) = self.cell(coords) else {
            log::trace!("Ignoring reveal outside the board at {:?}", coords);
            return Ok(RevealOutcome::NoChange);
        };
        if cell.is_revealed || cell.is_flagged {
            return Ok(RevealOutcome::NoChange);
        }

        if !self.mines_placed {
            self.place_mines(coords)?;
        }

        Ok(self.reveal_from(coords))
    }

    fn reveal_from(&mut self, coords: Coord2) -> RevealOutcome {
        // revealed flags double as the visited set
        let mut to_visit = vec![coords];

        while let Some(visit_coords) = to_visit.pop() {
            let cell = &mut self.cells[visit_coords.to_nd_index()];
            if cell.is_revealed || cell.is_flagged {
                continue;
            }
            cell.is_revealed = true;
            let (is_mine, count) = (cell.is_mine, cell.neighbor_mines);
            self.revealed_count += 1;

            if is_mine {
                log::debug!("Mine hit at {:?}", visit_coords);
                self.triggered_mine = Some(visit_coords);
                self.end_game(false);
                return RevealOutcome::HitMine;
            }

            log::trace!("Revealed {:?}, mine count: {}", visit_coords, count);
            if count == 0 {
                let cells = &self.cells;
                to_visit.extend(cells.iter_neighbors(visit_coords).filter(|&pos| {
                    let neighbor = cells[pos.to_nd_index()];
                    !neighbor.is_revealed && !neighbor.is_flagged
                }));
            }
        }

        if self.check_win_condition() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Declares the win once every safe cell is revealed, flags do not matter.
    pub fn check_win_condition(&mut self) -> bool {
        if self.state == GameState::Playing
            && self.mines_placed
            && self.revealed_count == self.config.safe_cells()
        {
            self.end_game(true);
        }
        self.state == GameState::Won
    }

    /// Display state of a cell, taking the end-of-game reveal into account.
    pub fn cell_view(&self, coords: Coord2) -> Option<CellView> {
        let cell = self.cell(coords)?;
        Some(self.view_of(coords, cell))
    }

    /// Calls `f` for every cell in row-major order.
    pub fn for_each_view(&self, mut f: impl FnMut(Coord2, CellView)) {
        for ((row, col), &cell) in self.cells.indexed_iter() {
            let coords = (row as Coord, col as Coord);
            f(coords, self.view_of(coords, cell));
        }
    }

    fn view_of(&self, coords: Coord2, cell: Cell) -> CellView {
        use CellView::*;

        match (self.state, cell.is_mine, cell.is_flagged) {
            (GameState::Lost, true, _) if self.triggered_mine == Some(coords) => Exploded,
            (GameState::Playing, _, true) => Flagged,
            (_, true, true) => FlaggedMine,
            (_, true, false) if self.state.is_finished() => Mine,
            (GameState::Lost, false, true) => IncorrectFlag,
            (_, _, true) => Flagged,
            _ if cell.is_revealed => Revealed(cell.neighbor_mines),
            _ => Hidden,
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        log::debug!(
            "Game ended {:?}, {} of {} safe cells revealed",
            self.state,
            self.revealed_count,
            self.config.safe_cells()
        );
        if !won {
            self.reveal_mines();
        }
    }

    fn reveal_mines(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine) {
            cell.is_revealed = true;
        }
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
