use crate::error::SearchError;
use crate::game::{ChessMove, GameState};
use crate::guard::MadeMove;

/// Leaf counts of a move-generation walk, split by the move that reached
/// the leaf.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Perft {
    pub nodes: u64,
    pub captures: u64,
    pub castles: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl Perft {
    pub fn new() -> Self {
        Perft::default()
    }

    /// Walks every legal line `depth` plies deep and counts the leaves.
    ///
    /// Every make goes through a [`MadeMove`], so a mismatching undo in the
    /// position implementation surfaces as an error instead of wrong counts.
    pub fn run<G: GameState>(&mut self, state: &mut G, depth: u32) -> Result<u64, SearchError> {
        *self = Perft::default();
        self.walk(state, depth)?;
        Ok(self.nodes)
    }

    fn walk<G: GameState>(&mut self, state: &mut G, depth: u32) -> Result<(), SearchError> {
        if depth == 0 {
            self.nodes += 1;
            return Ok(());
        }
        for mv in state.legal_moves() {
            let mut child = MadeMove::new(state, &mv, "perft");
            if depth == 1 {
                if mv.is_capture() {
                    self.captures += 1;
                }
                if mv.is_castle() {
                    self.castles += 1;
                }
                if child.is_check() {
                    self.checks += 1;
                }
                if child.is_checkmate() {
                    self.checkmates += 1;
                }
            }
            self.walk(&mut *child, depth - 1)?;
            child.undo()?;
        }
        Ok(())
    }
}
