//! Static evaluation of boards at the search horizon.
//!
//! All evaluators score from White's point of view: positive is good for
//! White. To evaluate for Black, swap the board first (see
//! [`Board::swapped`]).

use crate::board::{Board, Color};
use crate::constants::{
    LOSING_PIECES, WEIGHT_BLOCKED, WEIGHT_MILL, WEIGHT_PIECE, WEIGHT_POTENTIAL_MILL,
    WEIGHT_TERMINAL_PIECE, WIN_SCORE,
};
use crate::movegen::{generate_moves, Phase};

/// Selectable static evaluator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Heuristic {
    /// Piece difference only.
    Opening,
    /// Mills, potential mills and pieces, without mobility.
    OpeningImproved,
    /// Mills, potential mills, pieces and blocked pieces.
    Game,
    /// Decided games score `±WIN_SCORE`, otherwise pieces and Black's mobility.
    Terminal,
}

impl Heuristic {
    /// The evaluator used for `phase` when none is chosen explicitly.
    pub fn default_for(phase: Phase) -> Heuristic {
        match phase {
            Phase::Opening => Heuristic::Opening,
            Phase::Game => Heuristic::Game,
        }
    }

    pub fn evaluate(self, board: &Board) -> i32 {
        match self {
            Heuristic::Opening => opening(board),
            Heuristic::OpeningImproved => opening_improved(board),
            Heuristic::Game => game(board),
            Heuristic::Terminal => terminal(board),
        }
    }
}

/// Per-side sums of the point predicates.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Tally {
    pieces: i32,
    mills: i32,
    potential: i32,
    blocked: i32,
}

fn tally(board: &Board, color: Color) -> Tally {
    board.points_of(color).fold(Tally::default(), |mut t, pt| {
        t.pieces += 1;
        t.mills += board.closes_mill(pt) as i32;
        t.potential += board.potential_mills(pt, color) as i32;
        t.blocked += board.is_blocked(pt) as i32;
        t
    })
}

fn opening(board: &Board) -> i32 {
    board.count(Color::White) as i32 - board.count(Color::Black) as i32
}

fn opening_improved(board: &Board) -> i32 {
    let w = tally(board, Color::White);
    let b = tally(board, Color::Black);
    WEIGHT_MILL * (w.mills - b.mills)
        + WEIGHT_PIECE * (w.pieces - b.pieces)
        + WEIGHT_POTENTIAL_MILL * (w.potential - b.potential)
}

fn game(board: &Board) -> i32 {
    let w = tally(board, Color::White);
    let b = tally(board, Color::Black);
    WEIGHT_MILL * (w.mills - b.mills)
        + WEIGHT_POTENTIAL_MILL * (w.potential - b.potential)
        + WEIGHT_PIECE * (w.pieces - b.pieces)
        + WEIGHT_BLOCKED * (b.blocked - w.blocked)
}

fn terminal(board: &Board) -> i32 {
    let white = board.count(Color::White);
    let black = board.count(Color::Black);
    if black <= LOSING_PIECES {
        return WIN_SCORE;
    }
    if white <= LOSING_PIECES {
        return -WIN_SCORE;
    }

    let black_moves = generate_moves(board, Color::Black, Phase::Game).len() as i32;
    if black_moves == 0 {
        return WIN_SCORE;
    }
    WEIGHT_TERMINAL_PIECE * (white as i32 - black as i32) - black_moves
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_opening_piece_difference() {
        assert_eq!(Heuristic::Opening.evaluate(&Board::empty()), 0);
        assert_eq!(Heuristic::Opening.evaluate(&board("WWWBxxxxxxxxxxxxxx")), 2);
        assert_eq!(Heuristic::Opening.evaluate(&board("WBBBxxxxxxxxxxxxxx")), -2);
    }

    #[test]
    fn test_game_potential_mills() {
        // 0 and 2 each see [0, 2, 4] one move from completion; Black is off every line
        let b = board("WxWxxxBxxxxxxBxxxx");
        assert_eq!(Heuristic::Game.evaluate(&b), 20);
        assert_eq!(Heuristic::OpeningImproved.evaluate(&b), 20);
        assert_eq!(Heuristic::Opening.evaluate(&b), 0);
    }

    #[test]
    fn test_game_closed_mill() {
        let b = board("WxWxWxxxxxxxxxxxxx");
        assert_eq!(Heuristic::Game.evaluate(&b), 80 * 3 + 5 * 3);
        assert_eq!(Heuristic::OpeningImproved.evaluate(&b), 80 * 3 + 5 * 3);
    }

    #[test]
    fn test_game_blocked_piece() {
        let b = board("BWWxxxxxxxxxxxxWxx");
        assert_eq!(Heuristic::Game.evaluate(&b), 5 * 2 + 3);
        // No mobility term in the opening evaluator
        assert_eq!(Heuristic::OpeningImproved.evaluate(&b), 5 * 2);
    }

    #[test]
    fn test_game_is_antisymmetric_under_swap() {
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..100 {
            let (white, black) = (rng.usize(0..=9), rng.usize(0..=9));
            let b = Board::random(&mut rng, white, black);
            for h in [Heuristic::Opening, Heuristic::OpeningImproved, Heuristic::Game] {
                assert_eq!(h.evaluate(&b), -h.evaluate(&b.swapped()), "{h:?} on {b}");
            }
        }
    }

    #[test]
    fn test_terminal_elimination() {
        assert_eq!(Heuristic::Terminal.evaluate(&board("WWWBBxxxxxxxxxxxxx")), WIN_SCORE);
        assert_eq!(Heuristic::Terminal.evaluate(&board("WWBBBxxxxxxxxxxxxx")), -WIN_SCORE);
    }

    #[test]
    fn test_terminal_blocked_black_loses() {
        // Black's four pieces on 0, 4, 8 and 16 are all boxed in
        let b = board("BWWxBWxWBWxxxWxWBW");
        assert!(generate_moves(&b, Color::Black, Phase::Game).is_empty());
        assert_eq!(Heuristic::Terminal.evaluate(&b), WIN_SCORE);
    }

    #[test]
    fn test_terminal_mobility() {
        let b = board("WWWWBBBBxxxxxxxxxx");
        let black_moves = generate_moves(&b, Color::Black, Phase::Game).len() as i32;
        assert_eq!(Heuristic::Terminal.evaluate(&b), -black_moves);
    }
}
