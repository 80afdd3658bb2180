//! Move generation for the placement, sliding and flying rules.
//!
//! Generators return the successor boards directly rather than move
//! descriptions. Whenever the moved piece closes a mill, the single candidate
//! is replaced by one successor per removable opponent piece.

use log::trace;

use crate::board::{Board, Color, Point};
use crate::constants::{ADJACENCY, FLYING_PIECES};

/// Which part of the game a search is played in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Phase {
    /// Pieces are placed on empty points.
    Opening,
    /// Pieces slide to neighbouring points, or fly once a side is down to three.
    Game,
}

/// Generate every successor of `board` with `mover` to play.
///
/// In the game phase the rule is picked per call from the mover's piece
/// count, so the two sides can be under different rules in the same tree.
pub fn generate_moves(board: &Board, mover: Color, phase: Phase) -> Vec<Board> {
    match phase {
        Phase::Opening => generate_placements(board, mover),
        Phase::Game if board.count(mover) == FLYING_PIECES => generate_flying(board, mover),
        Phase::Game => generate_slides(board, mover),
    }
}

/// Place a new piece on every empty point.
pub fn generate_placements(board: &Board, mover: Color) -> Vec<Board> {
    let mut moves = Vec::new();
    for to in board.empty_points() {
        push_with_captures(&mut moves, board.with(to, Some(mover)), to, mover);
    }
    moves
}

/// Move a piece to an empty neighbouring point.
pub fn generate_slides(board: &Board, mover: Color) -> Vec<Board> {
    let mut moves = Vec::new();
    for from in board.points_of(mover) {
        for &to in ADJACENCY[from] {
            if board.get(to).is_none() {
                let moved = board.with(from, None).with(to, Some(mover));
                push_with_captures(&mut moves, moved, to, mover);
            }
        }
    }
    moves
}

/// Move a piece to any empty point.
pub fn generate_flying(board: &Board, mover: Color) -> Vec<Board> {
    let mut moves = Vec::new();
    for from in board.points_of(mover) {
        for to in board.empty_points() {
            let moved = board.with(from, None).with(to, Some(mover));
            push_with_captures(&mut moves, moved, to, mover);
        }
    }
    moves
}

/// Opponent pieces that may be removed after `victim`'s opponent closes a mill.
///
/// Pieces inside a closed mill are protected, unless every piece is.
pub fn removable_points(board: &Board, victim: Color) -> Vec<Point> {
    let free: Vec<Point> = board
        .points_of(victim)
        .filter(|&pt| !board.closes_mill(pt))
        .collect();
    if free.is_empty() {
        board.points_of(victim).collect()
    } else {
        free
    }
}

/// Add `moved` to `moves`, branching over captures if the piece now on `to` closes a mill.
fn push_with_captures(moves: &mut Vec<Board>, moved: Board, to: Point, mover: Color) {
    if !moved.closes_mill(to) {
        moves.push(moved);
        return;
    }

    let removable = removable_points(&moved, mover.opponent());
    if removable.is_empty() {
        // Nothing to take, the move still stands
        moves.push(moved);
        return;
    }

    trace!("{mover} closes a mill on {to}, removable: {removable:?}");
    moves.extend(removable.into_iter().map(|pt| moved.with(pt, None)));
}
