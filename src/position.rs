//! Reference chess position backed by `shakmaty`.
//!
//! `shakmaty` positions are updated in place by `play_unchecked` but have no
//! undo of their own, so [`Position`] keeps a stack of the positions it came
//! from together with their hashes. The same stack doubles as the game
//! history for threefold repetition.

use log::warn;
use shakmaty::fen::Fen;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{attacks, CastlingMode, Chess, EnPassantMode, Move, Position as _, Role, Square};

use crate::error::PositionError;
use crate::game::{BoardPiece, ChessMove, Color, GameState, PieceType, SquareIndex};

/// Halfmove clock value at which the fifty-move rule applies.
const FIFTY_MOVE_PLIES: u32 = 100;

#[derive(Debug, Clone)]
pub struct Position {
    current: Chess,
    hash: u64,
    undo_stack: Vec<(Chess, u64)>,
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

impl Position {
    /// The standard starting position.
    pub fn new() -> Position {
        Position::from_chess(Chess::default())
    }

    /// Reads a position from Forsyth-Edwards Notation.
    pub fn from_fen(fen: &str) -> Result<Position, PositionError> {
        let parsed: Fen = fen
            .trim()
            .parse()
            .map_err(|e| PositionError::InvalidFen(format!("{fen}: {e}")))?;
        let chess: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| PositionError::InvalidPosition(format!("{fen}: {e}")))?;
        Ok(Position::from_chess(chess))
    }

    fn from_chess(current: Chess) -> Position {
        let hash = zobrist(&current);
        Position {
            current,
            hash,
            undo_stack: Vec::new(),
        }
    }

    pub fn to_fen(&self) -> String {
        Fen::from_position(self.current.clone(), EnPassantMode::Legal).to_string()
    }

    /// Finds the legal move written in UCI notation (`e2e4`, `e7e8q`, `e1g1`).
    pub fn find_move(&self, uci: &str) -> Option<Move> {
        self.current
            .legal_moves()
            .into_iter()
            .find(|mv| to_uci(mv) == uci)
    }

    /// Plays a move given in UCI notation as part of the game history.
    pub fn play(&mut self, uci: &str) -> Result<(), PositionError> {
        let mv = self
            .find_move(uci)
            .ok_or_else(|| PositionError::IllegalMove(format!("{uci} in {}", self.to_fen())))?;
        self.make_move(&mv);
        Ok(())
    }

    /// Number of positions behind the current one.
    pub fn ply(&self) -> usize {
        self.undo_stack.len()
    }

    fn repetitions(&self) -> usize {
        self.undo_stack
            .iter()
            .filter(|(_, hash)| *hash == self.hash)
            .count()
    }
}

fn zobrist(chess: &Chess) -> u64 {
    let Zobrist64(hash) = chess.zobrist_hash::<Zobrist64>(EnPassantMode::Legal);
    hash
}

/// UCI text of a move, castling written as the king's two-square step.
pub fn to_uci(mv: &Move) -> String {
    mv.to_uci(CastlingMode::Standard).to_string()
}

fn piece_type(role: Role) -> PieceType {
    match role {
        Role::Pawn => PieceType::Pawn,
        Role::Knight => PieceType::Knight,
        Role::Bishop => PieceType::Bishop,
        Role::Rook => PieceType::Rook,
        Role::Queen => PieceType::Queen,
        Role::King => PieceType::King,
    }
}

fn color(color: shakmaty::Color) -> Color {
    match color {
        shakmaty::Color::White => Color::White,
        shakmaty::Color::Black => Color::Black,
    }
}

impl ChessMove for Move {
    fn is_capture(&self) -> bool {
        Move::is_capture(self)
    }

    fn is_castle(&self) -> bool {
        Move::is_castle(self)
    }

    fn from_square(&self) -> SquareIndex {
        // only drops have no origin, and standard chess has none
        self.from().map_or(0, |sq| sq as u8)
    }

    fn to_square(&self) -> Option<SquareIndex> {
        if Move::is_castle(self) {
            None
        } else {
            Some(self.to() as u8)
        }
    }

    fn piece(&self) -> PieceType {
        piece_type(self.role())
    }
}

impl GameState for Position {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        self.current.legal_moves().into_iter().collect()
    }

    fn make_move(&mut self, mv: &Move) {
        self.undo_stack.push((self.current.clone(), self.hash));
        self.current.play_unchecked(mv);
        self.hash = zobrist(&self.current);
    }

    fn undo_move(&mut self, _mv: &Move) {
        match self.undo_stack.pop() {
            Some((previous, hash)) => {
                self.current = previous;
                self.hash = hash;
            }
            None => warn!("undo_move called with an empty undo stack"),
        }
    }

    fn is_check(&self) -> bool {
        self.current.is_check()
    }

    fn is_checkmate(&self) -> bool {
        self.current.is_checkmate()
    }

    fn is_draw(&self) -> bool {
        self.current.is_stalemate()
            || self.current.is_insufficient_material()
            || self.current.halfmoves() >= FIFTY_MOVE_PLIES
            || self.repetitions() >= 2
    }

    fn position_hash(&self) -> u64 {
        self.hash
    }

    fn pieces(&self) -> Vec<BoardPiece> {
        let board = self.current.board();
        board
            .occupied()
            .into_iter()
            .filter_map(|sq| {
                board.piece_at(sq).map(|piece| BoardPiece {
                    piece_type: piece_type(piece.role),
                    color: color(piece.color),
                    square: sq as u8,
                })
            })
            .collect()
    }

    fn white_to_move(&self) -> bool {
        self.current.turn().is_white()
    }

    fn threatened_by(&self, square: SquareIndex) -> Vec<PieceType> {
        if square >= 64 {
            return Vec::new();
        }
        let board = self.current.board();
        let sq = Square::new(u32::from(square));
        let Some(attacker) = board.piece_at(sq) else {
            return Vec::new();
        };
        let targets =
            attacks::attacks(sq, attacker, board.occupied()) & board.by_color(self.current.turn());
        targets
            .into_iter()
            .filter_map(|target| board.role_at(target))
            .map(piece_type)
            .collect()
    }
}
