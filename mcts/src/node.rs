use common::{div_or_zero, RandomSource};
use engine::Game;
use generational_arena::Index;

use crate::outcome::Outcome;

/// One node of the search tree.
///
/// The arena owns every node. `children` holds the owning parent-to-child
/// edges in expansion order; `parent` is a non-owning back-reference used
/// only for walking upward during scoring and backpropagation.
pub struct MctsNode<G: Game> {
    pub(crate) parent: Option<Index>,
    pub(crate) children: Vec<Index>,
    pub(crate) game: G,
    pub(crate) action_taken: Option<G::Action>,
    pub(crate) perspective_player: usize,
    pub(crate) visits: usize,
    pub(crate) value: f32,
    pub(crate) expandable_actions: Vec<G::Action>,
    pub(crate) depth: usize,
}

impl<G: Game> MctsNode<G> {
    pub(crate) fn new(
        parent: Option<Index>,
        game: G,
        action_taken: Option<G::Action>,
        depth: usize,
    ) -> Self {
        let perspective_player = game.current_player();
        let expandable_actions = game.valid_actions();

        MctsNode {
            parent,
            children: Vec::new(),
            game,
            action_taken,
            perspective_player,
            visits: 0,
            value: 0.0,
            expandable_actions,
            depth,
        }
    }

    /// Selection stops at a node that still has unexpanded actions or has
    /// never grown a child; only fully expanded nodes are descended through.
    pub(crate) fn is_expandable_or_terminal(&self) -> bool {
        !self.expandable_actions.is_empty() || self.children.is_empty()
    }

    pub fn visits(&self) -> usize {
        self.visits
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn mean_value(&self) -> f32 {
        div_or_zero(self.value, self.visits as f32)
    }

    /// UCB1 from the owning parent's standpoint. Requires at least one
    /// recorded visit; unvisited children are reached through expansion and
    /// are never scored.
    pub(crate) fn ucb_score(&self, parent_visits: usize, explore_factor: f32) -> f32 {
        let exploit = self.value / self.visits as f32;
        let explore = ((parent_visits as f32).ln() / self.visits as f32).sqrt();

        exploit + explore_factor * explore
    }

    /// Removes and returns one not-yet-expanded action, chosen uniformly at
    /// random. The only operation that shrinks the expandable pool.
    pub(crate) fn pop_expandable_action(&mut self, rng: &mut RandomSource) -> Option<G::Action> {
        if self.expandable_actions.is_empty() {
            return None;
        }

        let index = rng.index(self.expandable_actions.len());
        Some(self.expandable_actions.swap_remove(index))
    }

    pub(crate) fn record_outcome(&mut self, outcome: Outcome) {
        self.visits += 1;
        self.value += outcome.value();
    }
}
