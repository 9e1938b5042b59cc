use std::fmt::Debug;

use crate::error::GameError;

/// Capability contract every playable game exposes to the search engine.
///
/// A `Game` value is a self-contained snapshot of one game instant: board
/// contents, per-player reserves, whose turn it is, and termination status.
/// The search engine never mutates a state it did not create; it clones a
/// snapshot and applies actions to the clone, so `Clone` must produce a deep,
/// independent copy.
pub trait Game: Clone {
    type Action: Clone + Eq + Debug;

    /// All legal actions in the current state. An empty set means there is
    /// nothing to play; it does not by itself imply the game is over.
    fn valid_actions(&self) -> Vec<Self::Action>;

    /// Applies `action` to this state in place.
    ///
    /// `auto_play` is set during random playouts; games with expensive or
    /// optional stalemate detection may skip that detection in this mode.
    fn play_action(&mut self, action: &Self::Action, auto_play: bool) -> Result<(), GameError>;

    fn is_game_over(&self) -> bool;

    /// The winning player, or `None` for a draw. Meaningful only once
    /// `is_game_over` reports true.
    fn winner(&self) -> Option<usize>;

    /// The player to move, as a 1-based index.
    fn current_player(&self) -> usize;
}
