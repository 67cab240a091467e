//! Terminal rendering of a [`BoardState`].

use crossterm::style::Stylize;

use crate::board::GOAL;
use crate::position::Position;
use crate::state::BoardState;

/// The board with figure cells and the goal highlighted, one line per row.
///
/// Cells keep the same width as the plain [`Display`](std::fmt::Display) output so both can be
/// compared side by side.
pub fn colored(state: &BoardState<'_>) -> String {
    let mut out = String::new();
    let [first, second] = *state.figures();

    for (row, steps) in state.board().rows().enumerate() {
        for (column, &val) in steps.iter().enumerate() {
            let here = Position::new(row as i32, column as i32);
            let cell = match (first.position == here, second.position == here) {
                (true, true) => format!("{:>3}", "AB").black().on_magenta(),
                (true, false) => format!("{:>3}", "A").black().on_cyan(),
                (false, true) => format!("{:>3}", "B").black().on_yellow(),
                (false, false) if here == GOAL => format!("{:>3}", "*").green().bold(),
                (false, false) if val == 0 => format!("{:>3}", val).dark_grey(),
                (false, false) => format!("{:>3}", val).reset(),
            };
            out.push_str(&cell.to_string());
        }
        out.push('\n');
    }

    out
}
