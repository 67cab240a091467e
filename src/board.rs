//! The rule table: how many cells a figure travels when it leaves a given cell.

use std::{fmt, fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::position::Position;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 8;

/// The cell both figures have to reach.
pub const GOAL: Position = Position::new(BOARD_SIZE as i32 - 1, BOARD_SIZE as i32 - 1);

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("Expected 8 rows but got {0}")]
    RowCount(usize),
    #[error("Expected 8 cells in row {row} but got {actual}")]
    ColumnCount { row: usize, actual: usize },
    #[error("Step count {value} at ({row},{column}) is not between 0 and 255")]
    StepCount { row: usize, column: usize, value: i64 },
    #[error("Could not read board file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not parse board file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Board file layout, e.g.
///
/// ```toml
/// steps = [
///     [3, 5, 0, 2, 1, 2, 3, 4],
///     # ... eight rows in total
/// ]
/// ```
#[derive(Debug, Deserialize)]
struct BoardFile {
    steps: Vec<Vec<i64>>,
}

/// An immutable 8x8 table of step counts.
///
/// A count of 0 is an ordinary value: a figure standing on such a cell cannot go anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    steps: [[u8; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// The table the game ships with.
    pub const STANDARD: Board = Board::new([
        [3, 5, 0, 2, 1, 2, 3, 4],
        [1, 2, 2, 1, 4, 5, 2, 0],
        [2, 0, 1, 3, 4, 3, 2, 1],
        [4, 4, 0, 2, 3, 0, 5, 2],
        [4, 1, 0, 3, 3, 2, 4, 3],
        [1, 0, 2, 2, 3, 0, 1, 0],
        [4, 0, 2, 2, 1, 4, 0, 1],
        [2, 2, 0, 4, 3, 5, 4, 0],
    ]);

    pub const fn new(steps: [[u8; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { steps }
    }

    /// Builds a board from loosely typed rows, checking the shape and the value range.
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self, BoardError> {
        if rows.len() != BOARD_SIZE {
            return Err(BoardError::RowCount(rows.len()));
        }

        let mut steps = [[0; BOARD_SIZE]; BOARD_SIZE];
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != BOARD_SIZE {
                return Err(BoardError::ColumnCount {
                    row,
                    actual: cells.len(),
                });
            }
            for (column, &value) in cells.iter().enumerate() {
                steps[row][column] = u8::try_from(value).map_err(|_| BoardError::StepCount {
                    row,
                    column,
                    value,
                })?;
            }
        }

        Ok(Self::new(steps))
    }

    pub fn from_toml_str(path: &str, content: &str) -> Result<Self, BoardError> {
        let file: BoardFile = toml::from_str(content).map_err(|source| BoardError::Parse {
            path: path.to_owned(),
            source,
        })?;
        Self::from_rows(&file.steps)
    }

    pub fn load(path: &Path) -> Result<Self, BoardError> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| BoardError::Io {
            path: display.clone(),
            source,
        })?;
        let board = Self::from_toml_str(&display, &content)?;
        log::info!("Loaded board from {display}");
        Ok(board)
    }

    /// True iff `position` lies on the board.
    #[inline]
    pub fn is_valid_position(position: Position) -> bool {
        let bound = 0..BOARD_SIZE as i32;
        bound.contains(&position.row) && bound.contains(&position.column)
    }

    /// Step count at `position`, or `None` off the board.
    #[inline]
    pub fn step_count(&self, position: Position) -> Option<u8> {
        if !Self::is_valid_position(position) {
            return None;
        }
        Some(self.steps[position.row as usize][position.column as usize])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8; BOARD_SIZE]> {
        self.steps.iter()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.steps {
            for &val in row {
                write!(f, "{:2} ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
