//! Fixed-depth chess move picker.
//!
//! [`SearchEngine`] runs alpha-beta minimax over any [`GameState`], with a
//! bounded transposition table, check/capture/attack move ordering and a
//! material plus mobility evaluation. [`Position`] implements the game
//! contract for standard chess.
//!
//! ```no_run
//! use chess_bot::{Position, SearchEngine, TurnClock};
//!
//! let mut position = Position::new();
//! let mut engine = SearchEngine::new();
//! let best = engine.think(&mut position, &TurnClock::start()).unwrap();
//! println!("{}", chess_bot::position::to_uci(&best));
//! ```

pub mod config;
pub mod error;
pub mod evaluation;
pub mod game;
pub mod guard;
pub mod moveorder;
pub mod perft;
pub mod position;
pub mod search;
pub mod timer;
pub mod transposition;

#[cfg(test)]
mod tree_game;

pub use config::{ScoreConvention, SearchConfig};
pub use error::{ConfigError, PositionError, SearchError};
pub use evaluation::{EvalWeights, Evaluate, Evaluator};
pub use game::{BoardPiece, ChessMove, Color, GameState, PieceType};
pub use moveorder::{MoveClass, MoveOrderer};
pub use position::Position;
pub use search::{SearchEngine, SearchResult, StopReason};
pub use timer::{Clock, TimeGovernor, TurnClock};
pub use transposition::{NodeType, TranspositionTable};
