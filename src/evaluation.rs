use serde::{Deserialize, Serialize};

use crate::game::{ChessMove, Color, GameState, PieceType};

/// One value per piece type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceTable {
    pub pawn: i32,
    pub knight: i32,
    pub bishop: i32,
    pub rook: i32,
    pub queen: i32,
    pub king: i32,
}

impl PieceTable {
    pub fn get(&self, piece_type: PieceType) -> i32 {
        match piece_type {
            PieceType::Pawn => self.pawn,
            PieceType::Knight => self.knight,
            PieceType::Bishop => self.bishop,
            PieceType::Rook => self.rook,
            PieceType::Queen => self.queen,
            PieceType::King => self.king,
        }
    }
}

// Material values; the king is large enough to outweigh everything else
pub const MATERIAL_VALUES: PieceTable = PieceTable {
    pawn: 150,
    knight: 250,
    bishop: 250,
    rook: 500,
    queen: 900,
    king: 100_000,
};

// Bonus per legal move the piece can make
pub const MOBILITY_WEIGHTS: PieceTable = PieceTable {
    pawn: 0,
    knight: 15,
    bishop: 13,
    rook: 10,
    queen: 6,
    king: 0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub material: PieceTable,
    pub mobility: PieceTable,
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights {
            material: MATERIAL_VALUES,
            mobility: MOBILITY_WEIGHTS,
        }
    }
}

/// Scores a position for the side to move.
pub trait Evaluate<G: GameState> {
    fn evaluate(&self, state: &G) -> i32;
}

/// Material plus mobility.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    weights: EvalWeights,
}

impl Evaluator {
    pub fn new(weights: EvalWeights) -> Self {
        Evaluator { weights }
    }

    /// Evaluates a position from white's side: positive favours white.
    ///
    /// Mobility counts the current legal moves leaving each piece's square,
    /// so only the side to move ever earns a mobility term.
    pub fn evaluate_for_white<G: GameState>(&self, state: &G) -> i32 {
        let moves = state.legal_moves();
        let mut score = 0;

        for piece in state.pieces() {
            let mobility = moves
                .iter()
                .filter(|mv| mv.from_square() == piece.square)
                .count() as i32;
            let value = self.weights.material.get(piece.piece_type)
                + mobility * self.weights.mobility.get(piece.piece_type);

            match piece.color {
                Color::White => score += value,
                Color::Black => score -= value,
            }
        }

        score
    }
}

impl<G: GameState> Evaluate<G> for Evaluator {
    fn evaluate(&self, state: &G) -> i32 {
        let score = self.evaluate_for_white(state);
        if state.white_to_move() {
            score
        } else {
            -score
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn test_initial_position_evaluation() {
        let position = Position::new();
        let evaluator = Evaluator::default();

        // material cancels; white's 4 knight moves are the only mobility
        assert_eq!(evaluator.evaluate(&position), 4 * 15);
        assert_eq!(evaluator.evaluate_for_white(&position), 60);
    }

    #[test]
    fn test_perspective_flips_with_side_to_move() {
        let mut position = Position::new();
        position.play("e2e4").unwrap();
        let evaluator = Evaluator::default();

        // black to move: knights have 4 moves, the f8 bishop none yet,
        // the queen none
        assert_eq!(evaluator.evaluate_for_white(&position), -60);
        assert_eq!(evaluator.evaluate(&position), 60);
    }

    #[test]
    fn test_material_advantage_white() {
        // black is missing the g8 knight, white to move
        let position =
            Position::from_fen("rnbqkb1r/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        let evaluator = Evaluator::default();

        assert_eq!(evaluator.evaluate(&position), MATERIAL_VALUES.knight + 60);
    }

    #[test]
    fn test_mobility_weights() {
        // lone white rook on a1 with kings tucked away; the rook has 14 moves
        let position = Position::from_fen("7k/8/8/8/8/8/6K1/R7 w - - 0 1").unwrap();
        let evaluator = Evaluator::default();

        let expected = MATERIAL_VALUES.rook + 14 * MOBILITY_WEIGHTS.rook;
        assert_eq!(evaluator.evaluate(&position), expected);

        let mut weights = EvalWeights::default();
        weights.mobility.rook = 0;
        let flat = Evaluator::new(weights);
        assert_eq!(flat.evaluate(&position), MATERIAL_VALUES.rook);
    }

    #[test]
    fn test_evaluate_is_pure() {
        let position = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        let evaluator = Evaluator::default();
        let hash = position.position_hash();

        let first = evaluator.evaluate(&position);
        assert_eq!(evaluator.evaluate(&position), first);
        assert_eq!(position.position_hash(), hash);
    }
}
