use log::{debug, info, trace};

use crate::config::{ScoreConvention, SearchConfig};
use crate::error::SearchError;
use crate::evaluation::{Evaluate, Evaluator};
use crate::game::{Color, GameState};
use crate::guard::MadeMove;
use crate::moveorder::MoveOrderer;
use crate::timer::{Clock, TimeGovernor};
use crate::transposition::{NodeType, TranspositionTable};

/// Bound used for "plus infinity"; its negation is "minus infinity".
pub const SCORE_INFINITY: i32 = i32::MAX;
/// Value reported for a root move that mates on the spot.
pub const MATE_SCORE: i32 = SCORE_INFINITY - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every root move was searched.
    Completed,
    /// A root move mates immediately.
    Checkmate,
    /// The turn ran past its time budget between root moves.
    TimeBudget,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<M> {
    pub best_move: M,
    pub best_value: i32,
    pub nodes: u64,
    pub root_moves_searched: usize,
    pub stop: StopReason,
}

/// Fixed-depth alpha-beta searcher.
///
/// One engine plays one game: its transposition table lives across turns
/// and must not be shared with another search.
pub struct SearchEngine<E = Evaluator> {
    config: SearchConfig,
    evaluator: E,
    move_orderer: MoveOrderer,
    transposition_table: TranspositionTable,
    governor: TimeGovernor,
    nodes_searched: u64,
    root_side: Option<Color>,
}

impl SearchEngine<Evaluator> {
    pub fn new() -> Self {
        Self::with_config(SearchConfig::default())
    }

    pub fn with_config(config: SearchConfig) -> Self {
        let evaluator = Evaluator::new(config.eval);
        Self::with_evaluator(config, evaluator)
    }
}

impl Default for SearchEngine<Evaluator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> SearchEngine<E> {
    pub fn with_evaluator(config: SearchConfig, evaluator: E) -> Self {
        SearchEngine {
            move_orderer: MoveOrderer::new(config.eval.material),
            transposition_table: TranspositionTable::new(config.table_size_mb),
            governor: TimeGovernor::new(config.time_budget_ms),
            nodes_searched: 0,
            root_side: None,
            evaluator,
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Nodes visited by the last search.
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    pub fn transposition_table(&self) -> &TranspositionTable {
        &self.transposition_table
    }

    pub fn transposition_table_mut(&mut self) -> &mut TranspositionTable {
        &mut self.transposition_table
    }

    /// Forgets everything learned in earlier turns.
    pub fn clear(&mut self) {
        self.transposition_table.clear();
        self.root_side = None;
    }
}

impl<E> SearchEngine<E> {
    /// Picks a move for the side to move in `state`.
    ///
    /// `state` is handed back exactly as it came in.
    pub fn think<G, C>(&mut self, state: &mut G, clock: &C) -> Result<G::Move, SearchError>
    where
        G: GameState,
        E: Evaluate<G>,
        C: Clock + ?Sized,
    {
        Ok(self.think_with_result(state, clock)?.best_move)
    }

    pub fn think_with_result<G, C>(
        &mut self,
        state: &mut G,
        clock: &C,
    ) -> Result<SearchResult<G::Move>, SearchError>
    where
        G: GameState,
        E: Evaluate<G>,
        C: Clock + ?Sized,
    {
        let moves = state.legal_moves();
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        let side = state.side_to_move();
        if self.root_side.is_some_and(|previous| previous != side) {
            // stored values are relative to the side that was searching
            info!(
                "searching for {:?} now; clearing transposition table",
                side
            );
            self.clear();
        }
        self.root_side = Some(side);
        self.transposition_table.new_search();
        self.nodes_searched = 0;

        let ordered = if self.config.order_moves {
            self.move_orderer.order_moves(state, &moves)?
        } else {
            moves
        };

        let depth = self.config.depth;
        let mut best_move = ordered[0].clone();
        let mut best_value = -SCORE_INFINITY;
        let mut root_moves_searched = 0;
        let mut stop = StopReason::Completed;

        for mov in &ordered {
            let mut child = MadeMove::new(state, mov, "root move");
            if child.is_checkmate() {
                child.undo()?;
                debug!("{:?} mates immediately", mov);
                best_move = mov.clone();
                best_value = MATE_SCORE;
                stop = StopReason::Checkmate;
                break;
            }

            let value =
                self.minimax_alpha_beta(&mut *child, depth, -SCORE_INFINITY, SCORE_INFINITY, false)?;
            child.undo()?;
            root_moves_searched += 1;
            trace!("root move {:?} scored {}", mov, value);

            if value > best_value {
                best_value = value;
                best_move = mov.clone();
            }

            if self.governor.out_of_time(clock) {
                info!(
                    "terminated early after {}/{} root moves ({} ms budget)",
                    root_moves_searched,
                    ordered.len(),
                    self.governor.budget_ms()
                );
                stop = StopReason::TimeBudget;
                break;
            }
        }

        let stats = self.transposition_table.stats();
        debug!(
            "best {:?} value {} after {} nodes, {} root moves, {:?}; table {}/{} hits",
            best_move,
            best_value,
            self.nodes_searched,
            root_moves_searched,
            stop,
            stats.hits,
            stats.probes
        );

        Ok(SearchResult {
            best_move,
            best_value,
            nodes: self.nodes_searched,
            root_moves_searched,
            stop,
        })
    }

    /// Alpha-beta minimax `depth` plies below `state`.
    ///
    /// `maximizing` says whether the side to move in `state` is the side the
    /// search is being run for. The returned value is fail-soft: outside the
    /// `(alpha, beta)` window it is only a bound.
    pub fn minimax_alpha_beta<G>(
        &mut self,
        state: &mut G,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> Result<i32, SearchError>
    where
        G: GameState,
        E: Evaluate<G>,
    {
        self.nodes_searched += 1;
        let hash = state.position_hash();
        let (alpha_orig, beta_orig) = (alpha, beta);

        if self.config.use_transposition_table {
            if let Some(entry) = self.transposition_table.probe(hash) {
                if entry.depth >= depth {
                    match entry.node_type {
                        NodeType::Exact => return Ok(entry.value),
                        NodeType::LowerBound => alpha = alpha.max(entry.value),
                        NodeType::UpperBound => beta = beta.min(entry.value),
                    }
                    if alpha >= beta {
                        return Ok(entry.value);
                    }
                }
            }
        }

        if depth == 0 || state.is_terminal() {
            let value = self.leaf_value(state, maximizing);
            self.store(hash, depth, NodeType::Exact, value);
            return Ok(value);
        }

        let mut best = if maximizing {
            -SCORE_INFINITY
        } else {
            SCORE_INFINITY
        };

        for mov in state.legal_moves() {
            let mut child = MadeMove::new(state, &mov, "search");
            let value = self.minimax_alpha_beta(&mut *child, depth - 1, alpha, beta, !maximizing)?;
            child.undo()?;

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(value);
            } else {
                best = best.min(value);
                beta = beta.min(value);
            }
            if beta <= alpha {
                break;
            }
        }

        let node_type = if best <= alpha_orig {
            NodeType::UpperBound
        } else if best >= beta_orig {
            NodeType::LowerBound
        } else {
            NodeType::Exact
        };
        self.store(hash, depth, node_type, best);

        Ok(best)
    }

    fn leaf_value<G>(&self, state: &G, maximizing: bool) -> i32
    where
        G: GameState,
        E: Evaluate<G>,
    {
        let score = self.evaluator.evaluate(state);
        match self.config.score_convention {
            // the maximizer is to move exactly at maximizing nodes
            ScoreConvention::RootRelative if !maximizing => -score,
            _ => score,
        }
    }

    fn store(&mut self, hash: u64, depth: u32, node_type: NodeType, value: i32) {
        if self.config.use_transposition_table {
            self.transposition_table.store(hash, depth, node_type, value);
        }
    }
}
