pub mod math;
pub mod rng;

pub use math::*;
pub use rng::*;
