pub mod error;
pub mod game;

pub use crate::error::*;
pub use crate::game::*;
