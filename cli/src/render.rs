use std::fmt;
use sweeper_core::{CellValue, Coord2, Field, GameStatus, Tile, ToNdIndex};

/// Text rendering of a field, one character per cell.
///
/// While the game runs only what the player has uncovered is drawn. Once it is over the mines are shown too: as
/// flags after a win; after a loss as `*`, with `X` for the one that went off and `x` for wrong flags.
pub struct Board<'a>(pub &'a Field);

impl Board<'_> {
    fn glyph(&self, coords: Coord2, tile: Tile) -> char {
        let field = self.0;
        let finished = field.cells().filter(|_| field.status().is_finished());
        let is_mine = finished.is_some_and(|cells| cells[coords.to_nd_index()].value().is_mine());

        match (field.status(), tile) {
            (GameStatus::Lost, _) if field.triggered_mine() == Some(coords) => 'X',
            (GameStatus::Won, Tile::Covered) if is_mine => 'F',
            (GameStatus::Lost, Tile::Covered) if is_mine => '*',
            (GameStatus::Lost, Tile::Flagged) if !is_mine => 'x',
            (_, Tile::Covered) => '#',
            (_, Tile::Flagged) => 'F',
            (_, Tile::Opened(CellValue::Mine)) => '*',
            (_, Tile::Opened(CellValue::Hint(0))) => '.',
            (_, Tile::Opened(CellValue::Hint(count))) => char::from(b'0' + count),
        }
    }
}

impl fmt::Display for Board<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.0;
        let (width, height) = field.size();
        let tiles = field.tiles();

        let status = match field.status() {
            GameStatus::Running => "Running",
            GameStatus::Won => "You won!",
            GameStatus::Lost => "Game over, 'u' to undo",
        };
        writeln!(
            f,
            "{} | mines left: {} | time: {}s",
            status,
            field.mines_left(),
            field.elapsed_secs()
        )?;

        write!(f, "   ")?;
        for x in 0..width {
            write!(f, "{:>2}", x)?;
        }
        writeln!(f)?;

        for y in 0..height {
            write!(f, "{:>2} ", y)?;
            for x in 0..width {
                let coords = (x, y);
                write!(f, " {}", self.glyph(coords, tiles[coords.to_nd_index()]))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::{FixedMinefieldGenerator, GameConfig, Options};

    /// Beginner field with the whole bottom row and (8, 7) mined.
    fn field() -> Field {
        let mut mines: Vec<Coord2> = (0..9).map(|x| (x, 8)).collect();
        mines.push((8, 7));
        Field::with_generator(
            GameConfig::BEGINNER,
            Options::default(),
            FixedMinefieldGenerator::new(mines),
        )
    }

    fn rows(field: &Field) -> Vec<String> {
        Board(field).to_string().lines().map(str::to_owned).collect()
    }

    #[test]
    fn fresh_field_is_covered() {
        let rows = rows(&field());

        assert_eq!(rows.len(), 11);
        assert_eq!(rows[0], "Running | mines left: 10 | time: 0s");
        assert_eq!(rows[1], "    0 1 2 3 4 5 6 7 8");
        assert_eq!(rows[2], " 0  # # # # # # # # #");
    }

    #[test]
    fn win_flags_remaining_mines() {
        let mut field = field();
        field.open((0, 0)).unwrap();

        let rows = rows(&field);

        assert!(rows[0].starts_with("You won!"));
        assert_eq!(rows[2], " 0  . . . . . . . . .");
        assert_eq!(rows[8], " 6  . . . . . . . 1 1");
        assert_eq!(rows[9], " 7  2 3 3 3 3 3 3 4 F");
        assert_eq!(rows[10], " 8  F F F F F F F F F");
    }

    #[test]
    fn loss_shows_mines_and_wrong_flags() {
        let mut field = field();
        field.toggle_flag((0, 0)).unwrap();
        field.toggle_flag((1, 8)).unwrap();
        field.open((0, 8)).unwrap();

        let rows = rows(&field);

        assert!(rows[0].starts_with("Game over"));
        assert_eq!(rows[2], " 0  x # # # # # # # #");
        assert_eq!(rows[9], " 7  # # # # # # # # *");
        assert_eq!(rows[10], " 8  X F * * * * * * *");
    }
}
