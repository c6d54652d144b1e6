use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a front end needs to draw a field, without any hidden values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub status: GameStatus,
    pub mines_left: isize,
    pub elapsed_ms: u64,
    pub tiles: Array2<Tile>,
}

impl Snapshot {
    pub fn from_field(field: &Field) -> Self {
        Self {
            size: field.size(),
            status: field.status(),
            mines_left: field.mines_left(),
            elapsed_ms: field.elapsed().as_millis().try_into().unwrap_or(u64::MAX),
            tiles: field.tiles(),
        }
    }

    pub fn tile_at(&self, coords: Coord2) -> Option<Tile> {
        self.tiles.get(coords.to_nd_index()).copied()
    }
}

impl From<&Field> for Snapshot {
    fn from(field: &Field) -> Self {
        Self::from_field(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Field {
        let config = GameConfig::new_unchecked((3, 3), 2);
        let generator = FixedMinefieldGenerator::new([(0, 1), (2, 1)]);
        Field::with_generator(config, Options::default(), generator)
    }

    #[test]
    fn from_field_hides_unopened_values() {
        let mut field = field();
        field.open((1, 1)).unwrap();
        field.toggle_flag((0, 1)).unwrap();

        let snapshot = Snapshot::from_field(&field);

        assert_eq!(snapshot.size, (3, 3));
        assert_eq!(snapshot.mines_left, 1);
        assert_eq!(snapshot.status, GameStatus::Running);
        assert_eq!(snapshot.tile_at((1, 1)), Some(Tile::Opened(CellValue::Hint(2))));
        assert_eq!(snapshot.tile_at((0, 1)), Some(Tile::Flagged));
        assert_eq!(snapshot.tile_at((2, 1)), Some(Tile::Covered));
        assert_eq!(snapshot.tile_at((3, 0)), None);
    }

    #[test]
    fn serializes_without_mine_positions() {
        let mut field = field();
        field.open((1, 1)).unwrap();

        let json = serde_json::to_string(&Snapshot::from(&field)).unwrap();
        let parsed: Snapshot = serde_json::from_str(&json).unwrap();

        assert!(!json.contains("Mine"));
        assert_eq!(parsed.tiles, field.tiles());
    }
}
