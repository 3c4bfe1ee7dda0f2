use std::io::{self, Write};

use sweeper_common::models::{Cell, GameStatus, GameView};

const CELL_HIDDEN: char = ' ';
const CELL_FLAGGED: char = '!';
const CELL_QUESTIONED: char = '?';
const CELL_MINE: char = '╳';

const DIVIDER_VERTICAL: char = '│';
const DIVIDER_HORIZONTAL: char = '─';
const DIVIDER_JOINT: char = '┼';

fn glyph(cell: Cell) -> char {
    match cell {
        Cell::Hidden => CELL_HIDDEN,
        Cell::Flagged => CELL_FLAGGED,
        Cell::Questioned => CELL_QUESTIONED,
        Cell::Mine => CELL_MINE,
        Cell::Revealed { adjacent } => char::from_digit(adjacent.into(), 10).unwrap_or('¿'),
    }
}

fn describe(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Ongoing => "Ongoing.",
        GameStatus::Won => "You won!",
        GameStatus::Lost => "You lost.",
        GameStatus::Resigned => "You resigned.",
    }
}

fn write_line(w: &mut impl Write, line: &str) -> io::Result<()> {
    writeln!(w, "{}", line.trim_end())
}

/// Draws `game` as a grid with 1-based row and column numbers.
///
/// ```text
/// Game '…'
/// You lost.	1/2
///   │ 1 │ 2 │ 3
/// ──┼───┼───┼───
/// 1 │ 0 │   │ !
/// 2 │ 1 │ ? │
/// 3 │ ╳ │   │
/// ```
pub fn render_game(w: &mut impl Write, game: &GameView) -> io::Result<()> {
    let label_width = game.board.height.to_string().len();
    let column_width = game.board.width.to_string().len();

    writeln!(w, "Game '{}'", game.id)?;
    writeln!(
        w,
        "{}\t{}/{}",
        describe(game.status),
        game.flagged(),
        game.board.mines
    )?;

    let mut header = " ".repeat(label_width);
    for column in 1..=game.board.width {
        header.push_str(&format!(" {DIVIDER_VERTICAL} {column:>column_width$}"));
    }
    write_line(w, &header)?;

    let mut divider = DIVIDER_HORIZONTAL.to_string().repeat(label_width + 1);
    for _ in 0..game.board.width {
        divider.push(DIVIDER_JOINT);
        divider.push_str(&DIVIDER_HORIZONTAL.to_string().repeat(column_width + 2));
    }
    write_line(w, &divider)?;

    for (index, row) in game.field.iter().enumerate() {
        let mut line = format!("{:>label_width$}", index + 1);
        for &cell in row {
            line.push_str(&format!(
                " {DIVIDER_VERTICAL} {:>column_width$}",
                glyph(cell)
            ));
        }
        write_line(w, &line)?;
    }
    Ok(())
}
