//! The contract between the search and whatever owns the chess rules.
//!
//! The search never inspects a board directly. Everything it needs (legal
//! moves, make/undo, terminal detection, hashing, the piece list) comes
//! through [`GameState`], and everything it needs to know about a single move
//! comes through [`ChessMove`].

use std::fmt::Debug;

/// Index of a square, `0 = a1` through `63 = h8`.
pub type SquareIndex = u8;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Color {
    White,
    Black,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// A piece standing on the board.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct BoardPiece {
    pub piece_type: PieceType,
    pub color: Color,
    pub square: SquareIndex,
}

/// The per-move facts the search and the move orderer look at.
pub trait ChessMove: Clone + PartialEq + Debug {
    fn is_capture(&self) -> bool;

    fn is_castle(&self) -> bool;

    /// Square the moving piece leaves.
    fn from_square(&self) -> SquareIndex;

    /// Square the moving piece lands on, `None` for castling.
    fn to_square(&self) -> Option<SquareIndex>;

    /// Type of the moving piece (before any promotion).
    fn piece(&self) -> PieceType;
}

/// A mutable chess position the search walks with make/undo.
///
/// Implementations are assumed correct. In particular `make_move(m)` followed
/// by `undo_move(m)` must restore piece placement, side to move and
/// [`position_hash`](GameState::position_hash) exactly, and calls must nest
/// under recursion.
pub trait GameState {
    type Move: ChessMove;

    fn legal_moves(&self) -> Vec<Self::Move>;

    fn make_move(&mut self, mv: &Self::Move);

    fn undo_move(&mut self, mv: &Self::Move);

    /// Whether the side to move is in check.
    fn is_check(&self) -> bool;

    fn is_checkmate(&self) -> bool;

    fn is_draw(&self) -> bool;

    /// Stable 64-bit hash of the current position. Collisions are possible
    /// and are not disambiguated by callers.
    fn position_hash(&self) -> u64;

    fn pieces(&self) -> Vec<BoardPiece>;

    fn white_to_move(&self) -> bool;

    /// Types of the side-to-move's pieces attacked by whatever stands on
    /// `square`. Empty when the square is empty.
    fn threatened_by(&self, square: SquareIndex) -> Vec<PieceType>;

    fn is_terminal(&self) -> bool {
        self.is_checkmate() || self.is_draw()
    }

    fn side_to_move(&self) -> Color {
        if self.white_to_move() {
            Color::White
        } else {
            Color::Black
        }
    }
}
