use core::fmt::Debug;

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Decides where mines go once the first cell of a field has been hit.
///
/// Implementations should return exactly `config.mines()` distinct, in-bounds coordinates and keep the hit point
/// and its neighbors free of mines; the field logs and skips anything that breaks the first two rules.
pub trait MinefieldGenerator: Debug {
    fn generate(&mut self, config: &GameConfig, hit: Coord2) -> Vec<Coord2>;
}
