use super::*;

/// Replays a known layout, ignoring the hit point. Useful for replays and deterministic tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedMinefieldGenerator {
    mines: Vec<Coord2>,
}

impl FixedMinefieldGenerator {
    pub fn new(mines: impl Into<Vec<Coord2>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl MinefieldGenerator for FixedMinefieldGenerator {
    fn generate(&mut self, _config: &GameConfig, _hit: Coord2) -> Vec<Coord2> {
        self.mines.clone()
    }
}
