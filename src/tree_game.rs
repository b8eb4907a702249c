//! Explicit game trees for exercising the search without chess rules.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::evaluation::Evaluate;
use crate::game::{BoardPiece, ChessMove, GameState, PieceType, SquareIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Branch(pub usize);

impl ChessMove for Branch {
    fn is_capture(&self) -> bool {
        false
    }

    fn is_castle(&self) -> bool {
        false
    }

    fn from_square(&self) -> SquareIndex {
        0
    }

    fn to_square(&self) -> Option<SquareIndex> {
        None
    }

    fn piece(&self) -> PieceType {
        PieceType::Pawn
    }
}

#[derive(Debug, Clone, Default)]
struct Node {
    children: Vec<usize>,
    // score for the side to move at this node
    score: i32,
    mate: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct TreeGame {
    nodes: Vec<Node>,
    path: Vec<usize>,
    /// Undo of this child leaves the game where it is.
    pub broken_undo: Option<usize>,
}

impl TreeGame {
    pub fn new() -> Self {
        TreeGame {
            nodes: vec![Node::default()],
            path: vec![0],
            broken_undo: None,
        }
    }

    pub fn root(&self) -> usize {
        0
    }

    pub fn add(&mut self, parent: usize, score: i32) -> usize {
        let id = self.add_detached(score);
        self.link(parent, id);
        id
    }

    fn add_detached(&mut self, score: i32) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node {
            score,
            ..Node::default()
        });
        id
    }

    /// Makes `child` reachable from `parent` as well.
    pub fn link(&mut self, parent: usize, child: usize) {
        self.nodes[parent].children.push(child);
    }

    pub fn add_mate(&mut self, parent: usize) -> usize {
        let id = self.add(parent, 0);
        self.nodes[id].mate = true;
        id
    }

    /// Uniform random tree `depth` plies deep below the root.
    pub fn random(seed: u64, depth: u32, max_branching: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = TreeGame::new();
        let mut frontier = vec![game.root()];
        for _ in 0..depth {
            let mut next = Vec::new();
            for parent in frontier {
                for _ in 0..rng.gen_range(1..=max_branching) {
                    next.push(game.add(parent, rng.gen_range(-100..=100)));
                }
            }
            frontier = next;
        }
        game
    }

    /// Layered random game where a node can be reached through several
    /// parents. Shared nodes always sit on the same layer, so they are met
    /// with the same remaining depth and side to move.
    pub fn random_shared(seed: u64, depth: u32, max_branching: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = TreeGame::new();
        let mut layer = vec![game.root()];
        for _ in 0..depth {
            let width = layer.len() * max_branching / 2 + 1;
            let next: Vec<usize> = (0..width)
                .map(|_| game.add_detached(rng.gen_range(-100..=100)))
                .collect();
            for &parent in &layer {
                for _ in 0..rng.gen_range(1..=max_branching) {
                    game.link(parent, next[rng.gen_range(0..next.len())]);
                }
            }
            layer = next;
        }
        game
    }

    fn current(&self) -> &Node {
        &self.nodes[*self.path.last().unwrap_or(&0)]
    }
}

impl GameState for TreeGame {
    type Move = Branch;

    fn legal_moves(&self) -> Vec<Branch> {
        self.current().children.iter().map(|&c| Branch(c)).collect()
    }

    fn make_move(&mut self, mv: &Branch) {
        self.path.push(mv.0);
    }

    fn undo_move(&mut self, mv: &Branch) {
        if self.broken_undo != Some(mv.0) {
            self.path.pop();
        }
    }

    fn is_check(&self) -> bool {
        self.current().mate
    }

    fn is_checkmate(&self) -> bool {
        self.current().mate
    }

    fn is_draw(&self) -> bool {
        let node = self.current();
        node.children.is_empty() && !node.mate
    }

    fn position_hash(&self) -> u64 {
        let id = *self.path.last().unwrap_or(&0) as u64;
        (id + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }

    fn pieces(&self) -> Vec<BoardPiece> {
        Vec::new()
    }

    fn white_to_move(&self) -> bool {
        self.path.len() % 2 == 1
    }

    fn threatened_by(&self, _square: SquareIndex) -> Vec<PieceType> {
        Vec::new()
    }
}

/// Reads the node's stored score.
#[derive(Debug, Clone, Default)]
pub(crate) struct NodeScore;

impl Evaluate<TreeGame> for NodeScore {
    fn evaluate(&self, state: &TreeGame) -> i32 {
        state.current().score
    }
}

/// Unpruned minimax with the same leaf convention as the engine's default.
pub(crate) fn plain_minimax<G, E>(state: &mut G, evaluator: &E, depth: u32, maximizing: bool) -> i32
where
    G: GameState,
    E: Evaluate<G>,
{
    if depth == 0 || state.is_terminal() {
        let raw = evaluator.evaluate(state);
        return if maximizing { raw } else { -raw };
    }
    let mut values = Vec::new();
    for mv in state.legal_moves() {
        state.make_move(&mv);
        values.push(plain_minimax(state, evaluator, depth - 1, !maximizing));
        state.undo_move(&mv);
    }
    if maximizing {
        values.into_iter().max().unwrap_or(i32::MIN)
    } else {
        values.into_iter().min().unwrap_or(i32::MAX)
    }
}
