//! Constants for board geometry, cell marks, evaluation weights, and scores.
//!
//! The board has 18 points numbered 0..18. Topology is given as two static
//! tables: the neighbours of every point, and the list of mill lines. The
//! per-point view of the mill lines is derived from [`MILL_LINES`] on first
//! use (see [`crate::board::mills_through`]).

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of points on the board.
pub const POINTS: usize = 18;

/// Number of pieces at which a side starts flying.
pub const FLYING_PIECES: usize = 3;

/// Directly connected points for each point, in ascending order.
pub const ADJACENCY: [&[usize]; POINTS] = [
    &[1, 2, 15],
    &[0, 3, 8],
    &[0, 3, 4, 12],
    &[1, 2, 5, 7],
    &[2, 5, 9],
    &[3, 4, 6],
    &[5, 7, 11],
    &[3, 6, 8, 14],
    &[1, 7, 17],
    &[4, 10, 12],
    &[9, 11, 13],
    &[6, 10, 14],
    &[2, 9, 13, 15],
    &[10, 12, 14, 16],
    &[7, 11, 13, 17],
    &[0, 12, 16],
    &[13, 15, 17],
    &[8, 14, 16],
];

/// Every line of three points that forms a mill when one side holds all of it.
pub const MILL_LINES: [[usize; 3]; 12] = [
    [0, 2, 4],
    [1, 3, 5],
    [1, 8, 17],
    [3, 7, 14],
    [5, 6, 11],
    [6, 7, 8],
    [9, 10, 11],
    [9, 12, 15],
    [10, 13, 16],
    [11, 14, 17],
    [12, 13, 14],
    [15, 16, 17],
];

// =============================================================================
// Cell Marks (as bytes, matching the text format)
// =============================================================================

/// White piece (the side the search maximises for).
pub const MARK_WHITE: u8 = b'W';

/// Black piece.
pub const MARK_BLACK: u8 = b'B';

/// Empty point.
pub const MARK_EMPTY: u8 = b'x';

// =============================================================================
// Evaluation Weights
// =============================================================================

/// Weight of each piece that currently sits in a closed mill.
pub const WEIGHT_MILL: i32 = 80;

/// Weight of each mill line that is one move from completion.
pub const WEIGHT_POTENTIAL_MILL: i32 = 10;

/// Weight of the raw piece difference.
pub const WEIGHT_PIECE: i32 = 5;

/// Weight of each blocked piece (counts against its owner).
pub const WEIGHT_BLOCKED: i32 = 3;

/// Weight of the piece difference in the terminal-aware evaluator.
pub const WEIGHT_TERMINAL_PIECE: i32 = 1000;

// =============================================================================
// Scores
// =============================================================================

/// Magnitude of a decided game (elimination, or no legal move for the mover).
pub const WIN_SCORE: i32 = 10_000;

/// A side with this many pieces or fewer has lost.
pub const LOSING_PIECES: usize = 2;
