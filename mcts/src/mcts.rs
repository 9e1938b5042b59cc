use std::time::{Duration, Instant};

use generational_arena::{Arena, Index};
use itertools::Itertools;
use log::{debug, warn};
use thiserror::Error;

use common::RandomSource;
use engine::{Game, GameError};

use crate::node::MctsNode;
use crate::node_details::{ChildDetails, NodeDetails};
use crate::options::{MctsOptions, SearchBudget};
use crate::outcome::Outcome;

/// Failures of the search core. Everything here is fatal: each variant marks
/// either an operation invoked out of its required order or a game
/// implementation whose legality checks disagree with themselves. Nothing is
/// retried or recovered.
#[derive(Debug, Error)]
pub enum MctsError {
    #[error(transparent)]
    Game(#[from] GameError),

    /// Expansion was requested on a node with nothing left to expand.
    #[error("no actions available to expand")]
    NoExpandableActions,

    /// Child selection or decision extraction on a childless node.
    #[error("node has no children to select from")]
    NoChildren,

    /// UCB1 is undefined for a child that has never been simulated.
    #[error("ucb score requested for an unvisited child")]
    UnvisitedChild,

    /// Outcome derivation on a game that has not finished.
    #[error("a game that has not ended has no outcome")]
    GameNotOver,
}

/// Monte Carlo tree search over one root position.
///
/// The tree lives for a single decision: construct, run searches until the
/// budget is spent, read off [`Mcts::best_action`], then drop the whole
/// thing. Subtrees are not carried over to the next move.
pub struct Mcts<G: Game> {
    options: MctsOptions,
    arena: Arena<MctsNode<G>>,
    root: Index,
    rng: RandomSource,
}

impl<G: Game> Mcts<G> {
    pub fn new(game: G, options: MctsOptions) -> Self {
        Self::with_random_source(game, options, RandomSource::from_entropy())
    }

    /// Injecting the random source pins every stochastic choice the search
    /// makes, so a seeded run can be replayed exactly.
    pub fn with_random_source(game: G, options: MctsOptions, rng: RandomSource) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(MctsNode::new(None, game, None, 0));

        Mcts {
            options,
            arena,
            root,
            rng,
        }
    }

    /// The position this tree is searching.
    pub fn root_game(&self) -> &G {
        &self.arena[self.root].game
    }

    /// One full selection, expansion, simulation, backpropagation cycle.
    pub fn search(&mut self) -> Result<(), MctsError> {
        let mut current = self.root;
        while !self.arena[current].is_expandable_or_terminal() {
            current = self.select_best_child(current)?;
        }

        if self.arena[current].game.is_game_over() {
            let outcome = self.node_outcome(current)?;
            self.backpropagate(current, outcome);
            return Ok(());
        }

        let child = self.expand(current)?;
        let outcome = self.simulate(child)?;
        self.backpropagate(child, outcome);

        Ok(())
    }

    /// Runs [`Mcts::search`] until the budget is exhausted and returns the
    /// number of completed iterations. The budget is checked only between
    /// iterations; an in-progress iteration always finishes.
    pub fn run_searches(&mut self, budget: SearchBudget) -> Result<usize, MctsError> {
        let completed = match budget {
            SearchBudget::Iterations(iterations) => {
                for _ in 0..iterations {
                    self.search()?;
                }
                iterations
            }
            SearchBudget::Time(limit) => {
                let started = Instant::now();
                let mut completed = 0;
                while started.elapsed() < limit {
                    self.search()?;
                    completed += 1;
                }
                completed
            }
        };

        if completed == 0 {
            warn!("budget {:?} expired before any search iteration completed", budget);
        } else {
            debug!("completed {} search iterations", completed);
        }

        Ok(completed)
    }

    pub fn search_iterations(&mut self, iterations: usize) -> Result<usize, MctsError> {
        self.run_searches(SearchBudget::Iterations(iterations))
    }

    pub fn search_time(&mut self, limit: Duration) -> Result<usize, MctsError> {
        self.run_searches(SearchBudget::Time(limit))
    }

    /// The action of the most-visited root child. Visit count, not value, is
    /// the decision criterion; it is the less noisy of the two at small
    /// sample counts. Ties keep the first child in expansion order.
    ///
    /// Fails with [`MctsError::NoChildren`] when the root never grew a child:
    /// either no search iteration completed, or the root position was already
    /// terminal and should not have been searched at all.
    pub fn best_action(&self) -> Result<G::Action, MctsError> {
        let root = &self.arena[self.root];
        if root.children.is_empty() {
            return Err(MctsError::NoChildren);
        }

        let mut best_index = root.children[0];
        let mut best_visits = 0;
        for &child_index in &root.children {
            let visits = self.arena[child_index].visits;
            if visits > best_visits {
                best_visits = visits;
                best_index = child_index;
            }
        }

        Ok(self.arena[best_index]
            .action_taken
            .clone()
            .expect("non-root nodes record the action that created them"))
    }

    /// Diagnostic snapshot of the root's children, most visited first.
    pub fn root_details(&self) -> NodeDetails<G::Action> {
        let root = &self.arena[self.root];

        let children = root
            .children
            .iter()
            .map(|&child_index| {
                let child = &self.arena[child_index];
                let action = child
                    .action_taken
                    .clone()
                    .expect("non-root nodes record the action that created them");

                (
                    action,
                    ChildDetails {
                        visits: child.visits,
                        mean_value: child.mean_value(),
                        depth: child.depth,
                    },
                )
            })
            .sorted_by(|(_, a), (_, b)| b.cmp(a))
            .collect();

        NodeDetails {
            visits: root.visits,
            children,
        }
    }

    fn select_best_child(&self, node: Index) -> Result<Index, MctsError> {
        let parent = &self.arena[node];
        if parent.children.is_empty() {
            return Err(MctsError::NoChildren);
        }

        let parent_visits = parent.visits;
        let mut best_index = parent.children[0];
        let mut best_score = f32::MIN;

        for &child_index in &parent.children {
            let child = &self.arena[child_index];
            if child.visits == 0 {
                return Err(MctsError::UnvisitedChild);
            }

            // Strict comparison keeps the first maximum in expansion order.
            let score = child.ucb_score(parent_visits, self.options.explore_factor);
            if score > best_score {
                best_score = score;
                best_index = child_index;
            }
        }

        Ok(best_index)
    }

    fn expand(&mut self, node: Index) -> Result<Index, MctsError> {
        let action = self.arena[node]
            .pop_expandable_action(&mut self.rng)
            .ok_or(MctsError::NoExpandableActions)?;

        let mut game = self.arena[node].game.clone();
        game.play_action(&action, false)?;

        let depth = self.arena[node].depth + 1;
        let child = self
            .arena
            .insert(MctsNode::new(Some(node), game, Some(action), depth));
        self.arena[node].children.push(child);

        Ok(child)
    }

    /// Plays uniformly random actions from this node's position until the
    /// game ends, then scores the result. A playout that runs out of actions
    /// before the game reports termination, or that reaches the configured
    /// depth cutoff, is abandoned and scored as a draw.
    fn simulate(&mut self, node: Index) -> Result<Outcome, MctsError> {
        let perspective = self.outcome_perspective(node);
        let mut game = self.arena[node].game.clone();

        let mut plies = 0;
        loop {
            if game.is_game_over() {
                return Self::game_outcome(&game, perspective);
            }

            if let Some(max_depth) = self.options.max_playout_depth {
                if plies >= max_depth {
                    return Ok(Outcome::Draw);
                }
            }

            let actions = game.valid_actions();
            let action = match self.rng.choose(&actions) {
                Some(action) => action,
                None => return Ok(Outcome::Draw),
            };

            game.play_action(action, true)?;
            plies += 1;
        }
    }

    /// Outcomes are derived in the parent's frame of reference, because
    /// backpropagation applies them to this node first and this node's value
    /// is read by the parent when it picks among its children. The parentless
    /// root falls back to its own perspective.
    fn outcome_perspective(&self, node: Index) -> usize {
        match self.arena[node].parent {
            Some(parent) => self.arena[parent].perspective_player,
            None => self.arena[node].perspective_player,
        }
    }

    fn node_outcome(&self, node: Index) -> Result<Outcome, MctsError> {
        Self::game_outcome(&self.arena[node].game, self.outcome_perspective(node))
    }

    fn game_outcome(game: &G, perspective: usize) -> Result<Outcome, MctsError> {
        if !game.is_game_over() {
            return Err(MctsError::GameNotOver);
        }

        Ok(match game.winner() {
            None => Outcome::Draw,
            Some(winner) if winner == perspective => Outcome::Win,
            Some(_) => Outcome::Lose,
        })
    }

    /// Walks the parent chain to the root, recording the outcome at every
    /// node and flipping it whenever the perspective changes across an edge.
    fn backpropagate(&mut self, node: Index, outcome: Outcome) {
        let mut current = node;
        let mut outcome = outcome;

        loop {
            self.arena[current].record_outcome(outcome);

            let perspective = self.arena[current].perspective_player;
            match self.arena[current].parent {
                Some(parent) => {
                    if self.arena[parent].perspective_player != perspective {
                        outcome = outcome.opposite();
                    }
                    current = parent;
                }
                None => break,
            }
        }
    }
}
