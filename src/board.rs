//! Board representation and the per-point mill predicates.
//!
//! A [`Board`] is a fixed array of [`POINTS`] cells, each empty or holding a
//! [`Color`]. Boards are `Copy`: every move builds a fresh value with
//! [`Board::with`], so a board handed out as a search child is never touched
//! again.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use thiserror::Error;

use crate::constants::{ADJACENCY, MARK_BLACK, MARK_EMPTY, MARK_WHITE, MILL_LINES, POINTS};

/// A point on the board, as an index in `0..POINTS`.
pub type Point = usize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// The byte used for this color in the text format.
    pub fn mark(self) -> u8 {
        match self {
            Color::White => MARK_WHITE,
            Color::Black => MARK_BLACK,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Error returned when a board string is not a valid position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board must have {expected} points, got {found}")]
    Length { expected: usize, found: usize },
    #[error("invalid mark {found:?} at point {index}, expected 'W', 'B' or 'x'")]
    InvalidMark { index: usize, found: char },
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Color>; POINTS],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [None; POINTS],
        }
    }

    /// Generate a board with `white` and `black` pieces on distinct random points.
    ///
    /// Panics if `white + black > POINTS`.
    pub fn random(rng: &mut fastrand::Rng, white: usize, black: usize) -> Self {
        assert!(white + black <= POINTS, "too many pieces for the board");
        let mut points: Vec<Point> = (0..POINTS).collect();
        rng.shuffle(&mut points);

        let mut board = Self::empty();
        for (i, &pt) in points.iter().take(white + black).enumerate() {
            let color = if i < white { Color::White } else { Color::Black };
            board.cells[pt] = Some(color);
        }
        board
    }

    #[inline]
    pub fn get(&self, pt: Point) -> Option<Color> {
        self.cells[pt]
    }

    /// Return a copy of this board with `pt` set to `cell`.
    #[inline]
    #[must_use]
    pub fn with(&self, pt: Point, cell: Option<Color>) -> Board {
        let mut next = *self;
        next.cells[pt] = cell;
        next
    }

    /// Number of pieces of the given color.
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == Some(color)).count()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Points currently held by `color`, ascending.
    pub fn points_of(&self, color: Color) -> impl Iterator<Item = Point> + '_ {
        (0..POINTS).filter(move |&pt| self.cells[pt] == Some(color))
    }

    /// Empty points, ascending.
    pub fn empty_points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..POINTS).filter(move |&pt| self.cells[pt].is_none())
    }

    /// Whether the piece on `pt` is part of a closed mill.
    ///
    /// Always false for an empty point.
    pub fn closes_mill(&self, pt: Point) -> bool {
        let Some(color) = self.cells[pt] else {
            return false;
        };
        mills_through(pt)
            .iter()
            .any(|&[a, b]| self.cells[a] == Some(color) && self.cells[b] == Some(color))
    }

    /// Whether no neighbour of `pt` is empty.
    pub fn is_blocked(&self, pt: Point) -> bool {
        ADJACENCY[pt].iter().all(|&n| self.cells[n].is_some())
    }

    /// Number of mill lines through `pt` that `color` can complete in one move:
    /// one of the other two points is held by `color` and the other is empty.
    pub fn potential_mills(&self, pt: Point, color: Color) -> usize {
        mills_through(pt)
            .iter()
            .filter(|&&[a, b]| match (self.cells[a], self.cells[b]) {
                (Some(c), None) | (None, Some(c)) => c == color,
                _ => false,
            })
            .count()
    }

    /// Swap the colors of all pieces, leaving empty points alone.
    ///
    /// This is an involution: `board.swapped().swapped() == board`.
    #[must_use]
    pub fn swapped(&self) -> Board {
        Board {
            cells: self.cells.map(|c| c.map(Color::opponent)),
        }
    }
}

/// The mill lines through `pt`, each given as the two other points on the line.
pub fn mills_through(pt: Point) -> &'static [[Point; 2]] {
    static TABLE: OnceLock<[Vec<[Point; 2]>; POINTS]> = OnceLock::new();
    &TABLE.get_or_init(make_mill_table)[pt]
}

/// Build the per-point mill table from [`MILL_LINES`].
fn make_mill_table() -> [Vec<[Point; 2]>; POINTS] {
    let mut table: [Vec<[Point; 2]>; POINTS] = std::array::from_fn(|_| Vec::new());
    for line in MILL_LINES {
        for (i, &pt) in line.iter().enumerate() {
            let others = [line[(i + 1) % 3], line[(i + 2) % 3]];
            table[pt].push(others);
        }
    }
    table
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let found = s.chars().count();
        if found != POINTS {
            return Err(BoardError::Length {
                expected: POINTS,
                found,
            });
        }

        let mut cells = [None; POINTS];
        for (index, ch) in s.chars().enumerate() {
            cells[index] = match ch {
                'W' => Some(Color::White),
                'B' => Some(Color::Black),
                'x' => None,
                found => return Err(BoardError::InvalidMark { index, found }),
            };
        }
        Ok(Board { cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            let mark = cell.map_or(MARK_EMPTY, Color::mark);
            write!(f, "{}", mark as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({self})")
    }
}
