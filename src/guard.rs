//! Scoped make/undo.
//!
//! A [`MadeMove`] makes a move when created and undoes it exactly once:
//! either through [`MadeMove::undo`], which also checks that the position
//! hash came back, or in `Drop` when the owner leaves early.

use std::ops::{Deref, DerefMut};

use log::warn;

use crate::error::SearchError;
use crate::game::GameState;

pub struct MadeMove<'a, G: GameState> {
    state: &'a mut G,
    mv: Option<G::Move>,
    hash_before: u64,
    context: &'static str,
}

impl<'a, G: GameState> MadeMove<'a, G> {
    /// Makes `mv` on `state`. `context` names the caller in invariant errors.
    pub fn new(state: &'a mut G, mv: &G::Move, context: &'static str) -> Self {
        let hash_before = state.position_hash();
        state.make_move(mv);
        MadeMove {
            state,
            mv: Some(mv.clone()),
            hash_before,
            context,
        }
    }

    /// Undoes the move and verifies the hash matches the one seen before it
    /// was made.
    pub fn undo(mut self) -> Result<(), SearchError> {
        if let Some(mv) = self.mv.take() {
            self.state.undo_move(&mv);
        }
        let after = self.state.position_hash();
        if after != self.hash_before {
            warn!(
                "{}: hash {:#018x} not restored (now {:#018x})",
                self.context, self.hash_before, after
            );
            return Err(SearchError::OracleInvariantViolation {
                context: self.context,
                before: self.hash_before,
                after,
            });
        }
        Ok(())
    }
}

impl<G: GameState> Deref for MadeMove<'_, G> {
    type Target = G;

    fn deref(&self) -> &G {
        self.state
    }
}

impl<G: GameState> DerefMut for MadeMove<'_, G> {
    fn deref_mut(&mut self) -> &mut G {
        self.state
    }
}

impl<G: GameState> Drop for MadeMove<'_, G> {
    fn drop(&mut self) {
        if let Some(mv) = self.mv.take() {
            self.state.undo_move(&mv);
        }
    }
}
