use serde::{Deserialize, Serialize};

/// Stored state of one grid position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) is_mine: bool,
    pub(crate) is_revealed: bool,
    pub(crate) is_flagged: bool,
    pub(crate) neighbor_mines: u8,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.is_flagged
    }

    /// Mined neighbours, meaningless on a mine.
    pub const fn neighbor_mines(self) -> u8 {
        self.neighbor_mines
    }
}

/// What a renderer should show for a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
    /// The mine that ended the game.
    Exploded,
    /// Mine the player never flagged, shown once the game is over.
    Mine,
    FlaggedMine,
    IncorrectFlag,
}

impl CellView {
    /// Whether the cell still looks closed to the player.
    pub const fn is_closed(self) -> bool {
        use CellView::*;
        match self {
            Hidden => true,
            Flagged => true,
            Revealed(_) => false,
            Exploded => false,
            Mine => false,
            FlaggedMine => true,
            IncorrectFlag => true,
        }
    }
}
