//! Minimax and alpha-beta search over successor boards.
//!
//! The tree is searched from White's point of view: White maximises the
//! static evaluation and Black minimises it. To search for Black, [`search`]
//! swaps the board before searching and swaps the chosen successor back.
//!
//! Every node returns a [`SearchResult`] holding the chosen child, the
//! backed-up score, and the number of nodes visited below and including it.
//! Among children with equal scores the first one generated wins.

use log::debug;
use thiserror::Error;

use crate::board::{Board, Color};
use crate::constants::WIN_SCORE;
use crate::eval::Heuristic;
use crate::movegen::{generate_moves, Phase};

/// Which tree walk to use.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Algorithm {
    /// Visit every node up to the depth limit.
    Minimax,
    /// Skip siblings that cannot change the result.
    AlphaBeta,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search depth must not be negative, got {0}")]
    NegativeDepth(i64),
    #[error("search depth {0} is out of range")]
    DepthOutOfRange(i64),
    #[error("{color} has no legal move")]
    NoLegalMove { color: Color },
}

/// Everything that selects the rules and strategy of a search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub phase: Phase,
    pub heuristic: Heuristic,
    pub algorithm: Algorithm,
    /// The side to find a move for.
    pub color: Color,
}

impl SearchConfig {
    /// Minimax for White with the default evaluator of `phase`.
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            heuristic: Heuristic::default_for(phase),
            algorithm: Algorithm::Minimax,
            color: Color::White,
        }
    }

    /// Placement search for White, scored by piece difference.
    pub fn opening() -> Self {
        Self::new(Phase::Opening)
    }

    /// Placement search for White, scored by mills and potential mills.
    pub fn opening_improved() -> Self {
        Self::new(Phase::Opening).with_heuristic(Heuristic::OpeningImproved)
    }

    /// Sliding/flying search for Black.
    ///
    /// Scored by [`Heuristic::Game`] for both algorithms, so this preset and
    /// [`SearchConfig::game_alpha_beta`] always pick the same move. The
    /// terminal-aware evaluator is [`Heuristic::Terminal`].
    pub fn game() -> Self {
        Self::new(Phase::Game).with_color(Color::Black)
    }

    /// Sliding/flying search for Black with alpha-beta pruning.
    pub fn game_alpha_beta() -> Self {
        Self::game().with_algorithm(Algorithm::AlphaBeta)
    }

    pub fn with_heuristic(self, heuristic: Heuristic) -> Self {
        Self { heuristic, ..self }
    }

    pub fn with_algorithm(self, algorithm: Algorithm) -> Self {
        Self { algorithm, ..self }
    }

    pub fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }
}

/// Result of searching one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// The chosen successor, or the board itself at the depth limit.
    /// `None` if the side to move had no legal move.
    pub board: Option<Board>,
    /// Backed-up score, from White's point of view.
    pub score: i32,
    /// Number of nodes visited, this one included.
    pub evaluated: u64,
}

/// The move chosen at the root of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BestMove {
    /// The board after the move, in the caller's orientation.
    pub board: Board,
    /// Backed-up score, from the searching side's point of view.
    pub score: i32,
    /// Number of nodes visited.
    pub evaluated: u64,
}

/// Tree walker for a fixed phase and evaluator.
#[derive(Copy, Clone, Debug)]
pub struct Searcher {
    phase: Phase,
    heuristic: Heuristic,
}

impl Searcher {
    pub fn new(phase: Phase, heuristic: Heuristic) -> Self {
        Self { phase, heuristic }
    }

    /// Plain minimax to `depth` plies.
    pub fn minimax(&self, board: &Board, depth: u32, maximizing: bool) -> SearchResult {
        if depth == 0 {
            return self.leaf(board);
        }

        let children = generate_moves(board, mover(maximizing), self.phase);
        if children.is_empty() {
            return no_moves(maximizing);
        }

        let mut best = Best::new(maximizing);
        let mut evaluated = 0;
        for child in children {
            let result = self.minimax(&child, depth - 1, !maximizing);
            evaluated += result.evaluated;
            best.offer(child, result.score);
        }
        best.finish(evaluated + 1)
    }

    /// Minimax with alpha-beta pruning.
    ///
    /// `alpha` is the score White is already guaranteed along the current
    /// path and `beta` the score Black is. Once `beta <= alpha` the remaining
    /// siblings are skipped and contribute nothing to the count.
    pub fn alpha_beta(
        &self,
        board: &Board,
        depth: u32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> SearchResult {
        if depth == 0 {
            return self.leaf(board);
        }

        let children = generate_moves(board, mover(maximizing), self.phase);
        if children.is_empty() {
            return no_moves(maximizing);
        }

        let mut best = Best::new(maximizing);
        let mut evaluated = 0;
        for child in children {
            let result = self.alpha_beta(&child, depth - 1, !maximizing, alpha, beta);
            evaluated += result.evaluated;
            let score = best.offer(child, result.score);

            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }
        best.finish(evaluated + 1)
    }

    /// Run the configured algorithm from the root with `maximizing = true`.
    pub fn run(&self, board: &Board, depth: u32, algorithm: Algorithm) -> SearchResult {
        match algorithm {
            Algorithm::Minimax => self.minimax(board, depth, true),
            Algorithm::AlphaBeta => self.alpha_beta(board, depth, true, i32::MIN, i32::MAX),
        }
    }

    fn leaf(&self, board: &Board) -> SearchResult {
        SearchResult {
            board: Some(*board),
            score: self.heuristic.evaluate(board),
            evaluated: 1,
        }
    }
}

/// Find the best move for `config.color` looking `depth` plies ahead.
pub fn search(board: &Board, depth: u32, config: &SearchConfig) -> Result<BestMove, SearchError> {
    let oriented = orient(board, config.color);
    let searcher = Searcher::new(config.phase, config.heuristic);
    let result = searcher.run(&oriented, depth, config.algorithm);

    debug!(
        "{:?} search for {} at depth {depth}: score {}, {} nodes",
        config.algorithm, config.color, result.score, result.evaluated
    );

    let Some(chosen) = result.board else {
        return Err(SearchError::NoLegalMove {
            color: config.color,
        });
    };
    Ok(BestMove {
        board: orient(&chosen, config.color),
        score: result.score,
        evaluated: result.evaluated,
    })
}

/// Like [`search`], taking the depth as given on the command line.
pub fn search_signed(
    board: &Board,
    depth: i64,
    config: &SearchConfig,
) -> Result<BestMove, SearchError> {
    if depth < 0 {
        return Err(SearchError::NegativeDepth(depth));
    }
    let depth = u32::try_from(depth).map_err(|_| SearchError::DepthOutOfRange(depth))?;
    search(board, depth, config)
}

/// Map a board to and from the frame in which `color` plays White.
fn orient(board: &Board, color: Color) -> Board {
    match color {
        Color::White => *board,
        Color::Black => board.swapped(),
    }
}

#[inline]
fn mover(maximizing: bool) -> Color {
    if maximizing { Color::White } else { Color::Black }
}

/// A node whose mover cannot move has lost.
fn no_moves(maximizing: bool) -> SearchResult {
    SearchResult {
        board: None,
        score: if maximizing { -WIN_SCORE } else { WIN_SCORE },
        evaluated: 1,
    }
}

/// Running best child of a node.
struct Best {
    maximizing: bool,
    best: Option<(Board, i32)>,
}

impl Best {
    fn new(maximizing: bool) -> Self {
        Self {
            maximizing,
            best: None,
        }
    }

    /// Fold in a child; only a strictly better score replaces the current best.
    /// Returns the best score so far.
    fn offer(&mut self, child: Board, score: i32) -> i32 {
        let better = match self.best {
            None => true,
            Some((_, best)) if self.maximizing => score > best,
            Some((_, best)) => score < best,
        };
        if better {
            self.best = Some((child, score));
        }
        self.best.map_or(score, |(_, s)| s)
    }

    fn finish(self, evaluated: u64) -> SearchResult {
        let (board, score) = match self.best {
            Some((board, score)) => (Some(board), score),
            None => (None, no_moves(self.maximizing).score),
        };
        SearchResult {
            board,
            score,
            evaluated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn game_searcher() -> Searcher {
        Searcher::new(Phase::Game, Heuristic::Game)
    }

    #[test]
    fn test_depth_zero_returns_input() {
        let b = board("WWWBBBxxxxxxxxxxxx");
        for algorithm in [Algorithm::Minimax, Algorithm::AlphaBeta] {
            let result = game_searcher().run(&b, 0, algorithm);
            assert_eq!(result.board, Some(b));
            assert_eq!(result.evaluated, 1);
            assert_eq!(result.score, Heuristic::Game.evaluate(&b));
        }
    }

    #[test]
    fn test_depth_one_picks_best_child() {
        let b = board("WWWWBBBxxxxxxxxxxx");
        let children = generate_moves(&b, Color::White, Phase::Game);
        let result = game_searcher().minimax(&b, 1, true);

        let best = children
            .iter()
            .map(|c| Heuristic::Game.evaluate(c))
            .max()
            .unwrap();
        assert_eq!(result.score, best);
        assert_eq!(result.evaluated, children.len() as u64 + 1);

        let chosen = result.board.unwrap();
        let first = children
            .iter()
            .find(|c| Heuristic::Game.evaluate(c) == best)
            .unwrap();
        assert_eq!(&chosen, first);
    }

    #[test]
    fn test_tie_goes_to_first_child() {
        // Every placement scores 1 under the piece difference
        let searcher = Searcher::new(Phase::Opening, Heuristic::Opening);
        let result = searcher.minimax(&Board::empty(), 1, true);
        assert_eq!(result.score, 1);
        assert_eq!(result.board, Some(Board::empty().with(0, Some(Color::White))));
    }

    #[test]
    fn test_minimizing_node_picks_lowest() {
        let b = board("WWWWBBBBxxxxxxxxxx");
        let children = generate_moves(&b, Color::Black, Phase::Game);
        let result = game_searcher().minimax(&b, 1, false);
        let lowest = children
            .iter()
            .map(|c| Heuristic::Game.evaluate(c))
            .min()
            .unwrap();
        assert_eq!(result.score, lowest);
    }

    #[test]
    fn test_childless_node_is_a_loss_for_the_mover() {
        // Black's four pieces on 0, 4, 8 and 16 are all boxed in
        let b = board("BWWxBWxWBWxxxWxWBW");
        for algorithm in [Algorithm::Minimax, Algorithm::AlphaBeta] {
            let result = match algorithm {
                Algorithm::Minimax => game_searcher().minimax(&b, 2, false),
                Algorithm::AlphaBeta => game_searcher().alpha_beta(&b, 2, false, i32::MIN, i32::MAX),
            };
            assert_eq!(result.board, None);
            assert_eq!(result.score, WIN_SCORE);
            assert_eq!(result.evaluated, 1);
        }
    }

    #[test]
    fn test_search_reports_no_legal_move() {
        let b = board("BWWxBWxWBWxxxWxWBW");
        let err = search(&b, 1, &SearchConfig::game()).unwrap_err();
        assert!(matches!(err, SearchError::NoLegalMove { color: Color::Black }));
    }

    #[test]
    fn test_negative_depth_is_rejected() {
        let b = board("WWWBBBxxxxxxxxxxxx");
        let err = search_signed(&b, -1, &SearchConfig::opening()).unwrap_err();
        assert!(matches!(err, SearchError::NegativeDepth(-1)));
    }

    #[test]
    fn test_oversized_depth_is_rejected() {
        let b = board("WWWBBBxxxxxxxxxxxx");
        let err = search_signed(&b, 5_000_000_000, &SearchConfig::opening()).unwrap_err();
        assert!(matches!(err, SearchError::DepthOutOfRange(5_000_000_000)));
        assert_eq!(err.to_string(), "search depth 5000000000 is out of range");
    }

    #[test]
    fn test_game_presets_share_evaluator() {
        assert_eq!(SearchConfig::game().heuristic, Heuristic::Game);
        assert_eq!(SearchConfig::game_alpha_beta().heuristic, Heuristic::Game);
        assert_eq!(SearchConfig::game().color, Color::Black);
        assert_eq!(SearchConfig::game_alpha_beta().algorithm, Algorithm::AlphaBeta);
    }

    #[test]
    fn test_alpha_beta_matches_minimax() {
        let mut rng = fastrand::Rng::with_seed(11);
        let mut pruned_somewhere = false;
        for _ in 0..30 {
            let (white, black) = (rng.usize(3..=7), rng.usize(3..=7));
            let b = Board::random(&mut rng, white, black);
            for depth in 1..=3 {
                let full = game_searcher().run(&b, depth, Algorithm::Minimax);
                let pruned = game_searcher().run(&b, depth, Algorithm::AlphaBeta);
                assert_eq!(pruned.score, full.score, "{b} at depth {depth}");
                assert_eq!(pruned.board, full.board, "{b} at depth {depth}");
                assert!(pruned.evaluated <= full.evaluated);
                pruned_somewhere |= pruned.evaluated < full.evaluated;
            }
        }
        assert!(pruned_somewhere);
    }

    #[test]
    fn test_black_search_returns_original_orientation() {
        let b = board("WWWWBBBBxxxxxxxxxx");
        let best = search(&b, 2, &SearchConfig::game()).unwrap();

        // White pieces can only have been removed, never moved
        for pt in best.board.points_of(Color::White) {
            assert_eq!(b.get(pt), Some(Color::White));
        }
        assert_eq!(best.board.count(Color::Black), 4);
        assert_ne!(best.board, b);
    }

    #[test]
    fn test_black_search_matches_swapped_white_search() {
        let b = board("WWxWBxBxxBxxWxxBxx");
        let as_black = search(&b, 2, &SearchConfig::game()).unwrap();
        let as_white = search(
            &b.swapped(),
            2,
            &SearchConfig::new(Phase::Game).with_color(Color::White),
        )
        .unwrap();
        assert_eq!(as_black.board, as_white.board.swapped());
        assert_eq!(as_black.score, as_white.score);
        assert_eq!(as_black.evaluated, as_white.evaluated);
    }
}
