use crate::error::SearchError;
use crate::evaluation::{PieceTable, MATERIAL_VALUES};
use crate::game::{ChessMove, GameState};
use crate::guard::MadeMove;

/// Bucket a move falls into, in the order buckets are searched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum MoveClass {
    Check,
    Capture,
    Attack,
    Quiet,
}

#[derive(Clone, Debug)]
pub struct MoveOrderer {
    piece_values: PieceTable,
}

impl Default for MoveOrderer {
    fn default() -> Self {
        MoveOrderer::new(MATERIAL_VALUES)
    }
}

impl MoveOrderer {
    /// `piece_values` decides which targets count as worth more than the
    /// attacker in the attack bucket.
    pub fn new(piece_values: PieceTable) -> Self {
        MoveOrderer { piece_values }
    }

    /// Checks first, then captures, then attacks on bigger pieces, then the
    /// rest. Moves keep their relative order inside a bucket.
    pub fn order_moves<G: GameState>(
        &self,
        state: &mut G,
        moves: &[G::Move],
    ) -> Result<Vec<G::Move>, SearchError> {
        let mut buckets: [Vec<G::Move>; 4] = Default::default();

        for mov in moves {
            let class = self.classify(state, mov)?;
            buckets[class as usize].push(mov.clone());
        }

        Ok(buckets.into_iter().flatten().collect())
    }

    /// Tries the move on `state` and puts it in exactly one bucket.
    pub fn classify<G: GameState>(
        &self,
        state: &mut G,
        mov: &G::Move,
    ) -> Result<MoveClass, SearchError> {
        let after = MadeMove::new(state, mov, "move ordering");

        let class = if after.is_check() {
            MoveClass::Check
        } else if mov.is_capture() {
            MoveClass::Capture
        } else if self.attacks_bigger_piece(&*after, mov) {
            MoveClass::Attack
        } else {
            MoveClass::Quiet
        };

        after.undo()?;
        Ok(class)
    }

    // after the move, does the moved piece hit something worth more than itself
    fn attacks_bigger_piece<G: GameState>(&self, after: &G, mov: &G::Move) -> bool {
        let Some(landing) = mov.to_square() else {
            return false;
        };
        let own_value = self.piece_values.get(mov.piece());
        after
            .threatened_by(landing)
            .into_iter()
            .any(|target| self.piece_values.get(target) > own_value)
    }
}
