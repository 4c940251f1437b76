use mineboard_core::*;
use std::fmt::Write;

pub fn glyph(view: CellView) -> char {
    use CellView::*;
    match view {
        Hidden => '#',
        Flagged => 'F',
        Revealed(0) => '.',
        Revealed(count) => char::from(b'0' + count),
        Exploded => 'X',
        Mine => '*',
        FlaggedMine => 'F',
        IncorrectFlag => 'x',
    }
}

/// Text grid with row and column numbers, one line per row.
pub fn render_board(board: &Board) -> String {
    let (_, cols) = board.size();
    let mut text = String::from("   ");
    for col in 0..cols {
        let _ = write!(text, "{col:>3}");
    }

    board.for_each_view(|(row, col), view| {
        if col == 0 {
            let _ = write!(text, "\n{row:>3}");
        }
        let _ = write!(text, "{:>3}", glyph(view));
    });
    text.push('\n');
    text
}

pub fn state_label(state: GameState) -> &'static str {
    match state {
        GameState::Playing => "playing",
        GameState::Won => "won!",
        GameState::Lost => "lost",
    }
}
