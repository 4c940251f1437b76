use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines, at least one cell must stay safe")]
    TooManyMines,
    #[error("Board needs at least one row, one column and one mine")]
    EmptyBoard,
    #[error("Unknown difficulty, expected one of: easy, medium, hard")]
    UnknownDifficulty,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Inconsistent board state")]
    InvalidBoardState,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
