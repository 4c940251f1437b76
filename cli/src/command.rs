use mineboard_core::{Coord, Coord2, Difficulty, GameError};
use std::str::FromStr;
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    NewGame(Option<Difficulty>),
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command {0:?}, type h for help")]
    Unknown(String),
    #[error("Expected a row and a column, e.g. `r 3 4`")]
    MissingCoords,
    #[error("Invalid coordinate {0:?}")]
    InvalidCoord(String),
    #[error(transparent)]
    Difficulty(#[from] GameError),
}

fn parse_coord(word: Option<&str>) -> Result<Coord, CommandError> {
    let word = word.ok_or(CommandError::MissingCoords)?;
    word.parse()
        .map_err(|_| CommandError::InvalidCoord(word.to_string()))
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Coord2, CommandError> {
    Ok((parse_coord(words.next())?, parse_coord(words.next())?))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Unknown(String::new()));
        };

        Ok(match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Command::Reveal(parse_coords(&mut words)?),
            "f" | "flag" => Command::Flag(parse_coords(&mut words)?),
            "n" | "new" => {
                Command::NewGame(words.next().map(str::parse::<Difficulty>).transpose()?)
            }
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        })
    }
}

pub const HELP: &str = "\
commands:
  r <row> <col>   reveal a cell
  f <row> <col>   flag or unflag a cell
  n [difficulty]  new game (easy, medium, hard)
  h               this help
  q               quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves() {
        assert_eq!("r 3 4".parse::<Command>(), Ok(Command::Reveal((3, 4))));
        assert_eq!("  FLAG 0   15 ".parse::<Command>(), Ok(Command::Flag((0, 15))));
    }

    #[test]
    fn parses_new_game_with_optional_difficulty() {
        assert_eq!("n".parse::<Command>(), Ok(Command::NewGame(None)));
        assert_eq!("new hard".parse::<Command>(), Ok(Command::NewGame(Some(Difficulty::Hard))));
        assert_eq!(
            "n insane".parse::<Command>(),
            Err(CommandError::Difficulty(GameError::UnknownDifficulty))
        );
    }

    #[test]
    fn reports_bad_coordinates() {
        assert_eq!("r 3".parse::<Command>(), Err(CommandError::MissingCoords));
        assert_eq!(
            "f -1 2".parse::<Command>(),
            Err(CommandError::InvalidCoord("-1".to_string()))
        );
        assert_eq!(
            "dig 1 1".parse::<Command>(),
            Err(CommandError::Unknown("dig".to_string()))
        );
    }
}
