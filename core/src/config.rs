use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::*;

/// Field dimensions and mine count, valid by construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig", into = "RawGameConfig")]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

impl GameConfig {
    pub const MIN_SIZE: Coord = 9;
    pub const MAX_SIZE: Coord = 30;
    pub const MIN_MINES: CellCount = 10;

    pub const BEGINNER: Self = Self::new_unchecked((9, 9), 10);
    pub const INTERMEDIATE: Self = Self::new_unchecked((16, 16), 40);
    pub const EXPERT: Self = Self::new_unchecked((30, 16), 99);

    pub(crate) const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let axis = Self::MIN_SIZE..=Self::MAX_SIZE;
        if axis.contains(&size.0)
            && axis.contains(&size.1)
            && (Self::MIN_MINES..=Self::max_mines(size)).contains(&mines)
        {
            Ok(Self::new_unchecked(size, mines))
        } else {
            Err(GameError::InvalidConfiguration { size, mines })
        }
    }

    /// Most mines a field of `size` may hold, enough room is reserved for the mine-free first click.
    pub const fn max_mines((size_x, size_y): Coord2) -> CellCount {
        let reserved = (size_x as CellCount + size_y as CellCount).saturating_sub(1);
        mult(size_x, size_y).saturating_sub(reserved)
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    /// Same field with width and height swapped.
    pub const fn transposed(&self) -> Self {
        Self::new_unchecked((self.size.1, self.size.0), self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::BEGINNER
    }
}

impl fmt::Display for GameConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} with {} mines", self.size.0, self.size.1, self.mines)
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
struct RawGameConfig {
    width: Coord,
    height: Coord,
    mines: CellCount,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawGameConfig) -> Result<Self> {
        Self::new((raw.width, raw.height), raw.mines)
    }
}

impl From<GameConfig> for RawGameConfig {
    fn from(config: GameConfig) -> Self {
        Self {
            width: config.width(),
            height: config.height(),
            mines: config.mines(),
        }
    }
}

/// Standard fields.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl Preset {
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::BEGINNER,
            Self::Intermediate => GameConfig::INTERMEDIATE,
            Self::Expert => GameConfig::EXPERT,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Expert => "Expert",
        }
    }
}

impl From<Preset> for GameConfig {
    fn from(preset: Preset) -> Self {
        preset.config()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown preset {0:?}, expected one of beginner, intermediate, expert")]
pub struct ParsePresetError(String);

impl FromStr for Preset {
    type Err = ParsePresetError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParsePresetError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for preset in Preset::ALL {
            let config = preset.config();
            assert_eq!(GameConfig::new(config.size(), config.mines()), Ok(config));
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let min = GameConfig::MIN_SIZE;
        let max = GameConfig::MAX_SIZE;

        assert!(GameConfig::new((min, min), GameConfig::MIN_MINES).is_ok());
        assert!(GameConfig::new((max, max), GameConfig::max_mines((max, max))).is_ok());
        assert_eq!(GameConfig::max_mines((9, 9)), 64);
        assert_eq!(GameConfig::max_mines((30, 16)), 435);
    }

    #[test]
    fn rejects_out_of_bounds() {
        let invalid = [
            ((8, 9), 10),
            ((9, 31), 10),
            ((0, 10), 35),
            ((20, 10), 9),
            ((20, 10), GameConfig::max_mines((20, 10)) + 1),
        ];

        for (size, mines) in invalid {
            assert_eq!(
                GameConfig::new(size, mines),
                Err(GameError::InvalidConfiguration { size, mines })
            );
        }
    }

    #[test]
    fn transposed_swaps_axes() {
        let config = GameConfig::new((20, 10), 35).unwrap();
        let transposed = config.transposed();

        assert_eq!(transposed.size(), (10, 20));
        assert_eq!(transposed.mines(), 35);
        assert_eq!(GameConfig::new(transposed.size(), 35), Ok(transposed));
    }

    #[test]
    fn preset_parses_case_insensitive() {
        assert_eq!("expert".parse::<Preset>(), Ok(Preset::Expert));
        assert_eq!("Beginner".parse::<Preset>(), Ok(Preset::Beginner));
        assert!("nightmare".parse::<Preset>().is_err());
    }

    #[test]
    fn deserialize_validates() {
        let config: GameConfig =
            serde_json::from_str(r#"{"width":16,"height":16,"mines":40}"#).unwrap();
        assert_eq!(config, GameConfig::INTERMEDIATE);

        let invalid = serde_json::from_str::<GameConfig>(r#"{"width":4,"height":16,"mines":40}"#);
        assert!(invalid.is_err());
    }
}
