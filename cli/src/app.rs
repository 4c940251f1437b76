use anyhow::Context;
use mineboard_core::RevealOutcome;
use std::io::{BufRead, Write};

use crate::command::{Command, HELP};
use crate::render::{render_board, state_label};
use crate::scores::BestTimes;
use crate::session::Session;

/// Reads commands from `input` until it ends or the player quits, printing the
/// board after every move.
pub fn run(
    session: &mut Session,
    scores: &mut BestTimes,
    input: impl BufRead,
    mut out: impl Write,
) -> anyhow::Result<()> {
    writeln!(out, "{HELP}")?;
    print_game(&mut out, session, scores)?;

    for line in input.lines() {
        let line = line.context("reading command")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        log::debug!("command: {:?}", command);

        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::NewGame(difficulty) => session.new_game(difficulty),
            Command::Flag(coords) => {
                if let Err(err) = session.toggle_flag(coords) {
                    writeln!(out, "{err}")?;
                    continue;
                }
            }
            Command::Reveal(coords) => match session.reveal(coords) {
                Ok(RevealOutcome::Won) => {
                    let secs = session.elapsed_secs();
                    writeln!(out, "Cleared every mine in {secs}s!")?;
                    if scores.record(session.difficulty(), secs)? {
                        writeln!(out, "New best time!")?;
                    }
                }
                Ok(RevealOutcome::HitMine) => writeln!(out, "Boom! You hit a mine.")?,
                Ok(_) => {}
                Err(err) => {
                    writeln!(out, "{err}")?;
                    continue;
                }
            },
        }

        print_game(&mut out, session, scores)?;
    }

    Ok(())
}

fn print_game(out: &mut impl Write, session: &Session, scores: &BestTimes) -> anyhow::Result<()> {
    let board = session.board();
    let best = scores
        .get(session.difficulty())
        .map_or_else(|| "--".to_string(), |secs| format!("{secs}s"));

    write!(out, "{}", render_board(board))?;
    writeln!(
        out,
        "{} | mines: {} | time: {}s | best: {} | {}",
        session.difficulty(),
        board.mines_left(),
        session.elapsed_secs(),
        best,
        state_label(board.state())
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Seeds;
    use mineboard_core::*;
    use std::fmt::Write as _;

    fn scores(name: &str) -> BestTimes {
        let dir = std::env::temp_dir().join(format!("mineboard-app-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        BestTimes::load(dir.join("scores.json")).unwrap()
    }

    fn play(session: &mut Session, scores: &mut BestTimes, script: &str) -> String {
        let mut out = Vec::new();
        run(session, scores, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn flags_and_bad_commands() {
        let mut session = Session::new(Difficulty::Easy, Seeds::Fixed(1));
        let mut scores = scores("flags");

        let out = play(&mut session, &mut scores, "f 0 0\ndig\n\nr 40 40\nq\nf 1 1\n");

        assert!(out.contains("easy | mines: 9 | time: 0s | best: -- | playing"));
        assert!(out.contains("Unknown command \"dig\""));
        assert_eq!(session.board().flagged_count(), 1);
        assert!(!session.board().mines_placed());
    }

    #[test]
    fn clearing_the_board_records_a_best_time() {
        let seed = 3;
        let first = (4, 4);
        let config = Difficulty::Easy.config();
        let layout = generate_layout(config, seed, first);

        let mut script = format!("r {} {}\n", first.0, first.1);
        for row in 0..config.rows {
            for col in 0..config.cols {
                if !layout.contains_mine((row, col)) {
                    let _ = writeln!(script, "r {row} {col}");
                }
            }
        }
        script.push_str("r 4 4\nq\n");

        let mut session = Session::new(Difficulty::Easy, Seeds::Fixed(seed));
        let mut scores = scores("win");
        let out = play(&mut session, &mut scores, &script);

        assert_eq!(session.board().state(), GameState::Won);
        assert_eq!(out.matches("New best time!").count(), 1);
        assert!(scores.get(Difficulty::Easy).is_some());
        assert!(out.contains("Game already ended"));
    }

    #[test]
    fn new_game_switches_difficulty() {
        let mut session = Session::new(Difficulty::Easy, Seeds::Fixed(4));
        let mut scores = scores("switch");

        let out = play(&mut session, &mut scores, "n hard\n");

        assert_eq!(session.difficulty(), Difficulty::Hard);
        assert!(out.contains("hard | mines: 99"));
    }
}
