//! Morris-Engine: best-move search for a mill game on an 18-point board.
//!
//! Given a board and a depth, the engine searches the game tree with plain
//! minimax or alpha-beta pruning and returns the chosen successor board, its
//! backed-up score and the number of positions visited. Three rule sets are
//! supported: placement in the opening, sliding along lines afterwards, and
//! flying once a side is down to three pieces.
//!
//! ## Modules
//!
//! - [`constants`] - Board topology, marks, evaluation weights
//! - [`board`] - Board representation and mill predicates
//! - [`movegen`] - Successor generation with mill captures
//! - [`eval`] - Static evaluators
//! - [`search`] - Minimax, alpha-beta and the side-to-move adapter
//! - [`io`] - Board files and the console report
//!
//! ## Example
//!
//! ```
//! use morris_engine::board::Board;
//! use morris_engine::search::{search, SearchConfig};
//!
//! let board: Board = "WWWBBBxxxxxxxxxxxx".parse().unwrap();
//!
//! // Best sliding or flying move for Black, two plies deep
//! let best = search(&board, 2, &SearchConfig::game_alpha_beta()).unwrap();
//! println!("{} ({} positions)", best.board, best.evaluated);
//! ```

pub mod board;
pub mod constants;
pub mod eval;
pub mod io;
pub mod movegen;
pub mod search;
