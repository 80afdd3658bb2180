//! Reading and writing boards as single lines of text, and the console report.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::board::Board;
use crate::search::BestMove;

/// Read a board from the first line of the file at `path`.
pub fn read_board(path: &Path) -> Result<Board> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read board from {}", path.display()))?;
    let line = text.lines().next().unwrap_or_default();
    line.parse()
        .with_context(|| format!("invalid board in {}", path.display()))
}

/// Write `board` to `path` as a single line without a trailing newline.
pub fn write_board(path: &Path, board: &Board) -> Result<()> {
    fs::write(path, board.to_string())
        .with_context(|| format!("failed to write board to {}", path.display()))
}

/// The three-line summary printed after a search.
#[derive(Debug)]
pub struct Report<'a>(pub &'a BestMove);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board Position: {}", self.0.board)?;
        writeln!(f, "Positions evaluated by static estimation: {}", self.0.evaluated)?;
        write!(f, "MINIMAX estimate: {}", self.0.score)
    }
}
