use serde::{Deserialize, Serialize};

/// What a cell holds: a mine, or the number of mines among its neighbors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Mine,
    Hint(u8),
}

impl CellValue {
    pub const EMPTY: Self = Self::Hint(0);

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    /// No adjacent mines, opening such a cell floods into its neighbors.
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Hint(0))
    }

    pub const fn hint(self) -> Option<u8> {
        match self {
            Self::Mine => None,
            Self::Hint(count) => Some(count),
        }
    }

    /// Account for one more mine next to this cell. Mines are never renumbered.
    pub(crate) fn add_adjacent_mine(&mut self) {
        if let Self::Hint(count) = self {
            *count += 1;
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Player-facing state of a cell.
///
/// Valid transitions:
/// - Covered <-> Flagged
/// - Covered -> Opened
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStatus {
    Covered,
    Flagged,
    Opened,
}

impl Default for CellStatus {
    fn default() -> Self {
        Self::Covered
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    value: CellValue,
    status: CellStatus,
}

impl Cell {
    pub const fn value(self) -> CellValue {
        self.value
    }

    pub const fn status(self) -> CellStatus {
        self.status
    }

    pub const fn is_covered(self) -> bool {
        matches!(self.status, CellStatus::Covered)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.status, CellStatus::Flagged)
    }

    pub const fn is_opened(self) -> bool {
        matches!(self.status, CellStatus::Opened)
    }

    pub(crate) fn set_mine(&mut self) {
        self.value = CellValue::Mine;
    }

    pub(crate) fn add_adjacent_mine(&mut self) {
        self.value.add_adjacent_mine();
    }

    pub(crate) fn set_status(&mut self, status: CellStatus) {
        self.status = status;
    }

    /// What a front end is allowed to see, the value stays hidden until the cell is opened.
    pub const fn tile(self) -> Tile {
        match self.status {
            CellStatus::Covered => Tile::Covered,
            CellStatus::Flagged => Tile::Flagged,
            CellStatus::Opened => Tile::Opened(self.value),
        }
    }
}

/// Presentation view of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Covered,
    Flagged,
    Opened(CellValue),
}

impl Tile {
    pub const fn is_unopened(self) -> bool {
        matches!(self, Self::Covered | Self::Flagged)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::Covered
    }
}
