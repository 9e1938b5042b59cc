use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The action is not part of the current state's legal action set. A
    /// game returning this for an action it previously listed as valid is
    /// defective; callers surface the error rather than mask it.
    #[error("invalid action for the current game state: {0}")]
    InvalidAction(String),
}
