use core::time::Duration;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Running -> Won
/// - Running -> Lost
/// - Lost -> Running (undo)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Initial state, moves are accepted
    Running,
    /// Every safe cell was opened, terminal
    Won,
    /// A mine was opened, only undo is accepted
    Lost,
}

impl GameStatus {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Running
    }
}

/// What a move does to the target cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Open a covered cell, flooding through cells without adjacent mines
    Open,
    /// Toggle a flag on an unopened cell
    Flag,
    /// Open a covered cell, or chord-reveal around an opened one
    OpenNearby,
}

/// A single game from the first move to win or loss.
///
/// Mines are placed lazily by the first move so that the hit point and its neighbors are always safe. Every move
/// reports the coordinates whose visible state changed, in the order they changed.
#[derive(Debug)]
pub struct Field {
    config: GameConfig,
    options: Options,
    cells: Array2<Cell>,
    generator: Option<Box<dyn MinefieldGenerator>>,
    mines_total: CellCount,
    mines_left: isize,
    non_mines_opened: CellCount,
    status: GameStatus,
    last_opened: Option<Coord2>,
    stopwatch: Stopwatch,
}

impl Field {
    pub fn new(config: GameConfig, options: Options) -> Self {
        Self::with_generator(config, options, RandomMinefieldGenerator::from_entropy())
    }

    pub fn with_generator(
        config: GameConfig,
        options: Options,
        generator: impl MinefieldGenerator + 'static,
    ) -> Self {
        Self {
            config,
            options,
            cells: Array2::default(config.size().to_nd_index()),
            generator: Some(Box::new(generator)),
            mines_total: config.mines(),
            mines_left: config.mines() as isize,
            non_mines_opened: 0,
            status: Default::default(),
            last_opened: None,
            stopwatch: Stopwatch::new(),
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn options(&self) -> Options {
        self.options
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn mines_total(&self) -> CellCount {
        self.mines_total
    }

    /// Mines minus flags, negative when more flags than mines were placed
    pub fn mines_left(&self) -> isize {
        self.mines_left
    }

    pub fn non_mines_opened(&self) -> CellCount {
        self.non_mines_opened
    }

    /// Whether the first move has placed the mines yet
    pub fn is_initialized(&self) -> bool {
        self.generator.is_none()
    }

    /// Time spent playing, zero before the first move and frozen while the game is over
    pub fn elapsed(&self) -> Duration {
        self.stopwatch.elapsed()
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed().as_secs().try_into().unwrap_or(u32::MAX)
    }

    /// The mine that ended the game, while it is lost
    pub fn triggered_mine(&self) -> Option<Coord2> {
        match self.status {
            GameStatus::Lost => self.last_opened,
            _ => None,
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords))
        }
    }

    /// Player-visible state of a cell, values of unopened cells are withheld
    pub fn tile_at(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()].tile())
    }

    pub fn tiles(&self) -> Array2<Tile> {
        self.cells.map(|cell| cell.tile())
    }

    /// Read-only view of every cell including hidden values, `None` until the mines are placed
    pub fn cells(&self) -> Option<ArrayView2<'_, Cell>> {
        self.is_initialized().then(|| self.cells.view())
    }

    pub fn open(&mut self, coords: Coord2) -> Result<Vec<Coord2>> {
        self.do_operation(coords, Mode::Open)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<Vec<Coord2>> {
        self.do_operation(coords, Mode::Flag)
    }

    pub fn open_nearby(&mut self, coords: Coord2) -> Result<Vec<Coord2>> {
        self.do_operation(coords, Mode::OpenNearby)
    }

    /// Applies a move, returning every coordinate whose visible state changed.
    ///
    /// Moves on a finished game, or on cells in the wrong state, are no-ops that return an empty list.
    pub fn do_operation(&mut self, coords: Coord2, mode: Mode) -> Result<Vec<Coord2>> {
        let coords = self.validate_coords(coords)?;

        if !self.status.is_running() {
            return Ok(Vec::new());
        }
        self.ensure_mines(coords);

        let mut changed = Vec::new();
        match mode {
            Mode::Open => self.open_cell(coords, &mut changed),
            Mode::Flag => {
                if self.flag_cell(coords) {
                    changed.push(coords);
                }
            }
            Mode::OpenNearby => self.open_nearby_or_self(coords, &mut changed),
        }
        Ok(changed)
    }

    /// Takes back the mine that lost the game and resumes play, returning the re-covered cell.
    pub fn undo(&mut self) -> Option<Coord2> {
        if !matches!(self.status, GameStatus::Lost) {
            return None;
        }
        let coords = self.last_opened?;

        self.cells[coords.to_nd_index()].set_status(CellStatus::Covered);
        self.status = GameStatus::Running;
        self.stopwatch.start();
        log::debug!("Undo at {:?}, game resumed", coords);
        Some(coords)
    }

    fn ensure_mines(&mut self, hit: Coord2) {
        let Some(mut generator) = self.generator.take() else {
            return;
        };
        let mines = generator.generate(&self.config, hit);
        self.lay_mines(&mines);
        self.stopwatch.start();
        log::debug!("Placed {} mines, first hit at {:?}", self.mines_total, hit);
    }

    fn lay_mines(&mut self, mines: &[Coord2]) {
        let size = self.size();
        let mut placed = Vec::with_capacity(mines.len());
        for &coords in mines {
            if !in_bounds(coords, size) {
                log::warn!("Skipping mine outside the field at {:?}", coords);
                continue;
            }
            let cell = &mut self.cells[coords.to_nd_index()];
            if cell.value().is_mine() {
                log::warn!("Skipping duplicate mine at {:?}", coords);
                continue;
            }
            cell.set_mine();
            placed.push(coords);
        }

        for &coords in &placed {
            for neighbor in self.cells.iter_neighbors(coords) {
                self.cells[neighbor.to_nd_index()].add_adjacent_mine();
            }
        }

        let count = CellCount::try_from(placed.len()).unwrap_or(CellCount::MAX);
        if count != self.mines_total {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                count,
                self.mines_total
            );
            self.mines_left += count as isize - self.mines_total as isize;
            self.mines_total = count;
        }
    }

    /// Opens `start` and, for cells without adjacent mines, everything reachable through them.
    ///
    /// Uses an explicit stack with neighbors pushed in reverse compass order, which visits cells in the same
    /// depth-first order as a recursive flood fill.
    fn open_cell(&mut self, start: Coord2, changed: &mut Vec<Coord2>) {
        let mut pending = vec![start];

        while let Some(coords) = pending.pop() {
            if !self.status.is_running() {
                break;
            }

            let cell = &mut self.cells[coords.to_nd_index()];
            // only covered cells can be opened, flags have to be removed first
            if !cell.is_covered() {
                continue;
            }
            cell.set_status(CellStatus::Opened);
            let value = cell.value();

            self.last_opened = Some(coords);
            changed.push(coords);
            log::trace!("Opened {:?}: {:?}", coords, value);

            if value.is_mine() {
                self.finish(GameStatus::Lost);
                continue;
            }

            self.non_mines_opened += 1;
            if self.non_mines_opened + self.mines_total == self.config.total_cells() {
                self.finish(GameStatus::Won);
            } else if value.is_empty() {
                pending.extend(self.cells.iter_neighbors(coords).rev());
            }
        }
    }

    fn flag_cell(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        match cell.status() {
            CellStatus::Covered => {
                cell.set_status(CellStatus::Flagged);
                self.mines_left -= 1;
                true
            }
            CellStatus::Flagged => {
                cell.set_status(CellStatus::Covered);
                self.mines_left += 1;
                true
            }
            CellStatus::Opened => false,
        }
    }

    fn open_nearby_or_self(&mut self, coords: Coord2, changed: &mut Vec<Coord2>) {
        match self.cells[coords.to_nd_index()].status() {
            CellStatus::Covered => self.open_cell(coords, changed),
            CellStatus::Opened => self.chord(coords, changed),
            CellStatus::Flagged => {}
        }
    }

    /// Chord-reveals around `start`, then, if enabled, around every cell that opened as a result.
    fn chord(&mut self, start: Coord2, changed: &mut Vec<Coord2>) {
        let first = changed.len();
        self.chord_once(start, changed);

        if !self.options.recursive_chord {
            return;
        }

        let mut pending: Vec<Coord2> = changed[first..].iter().rev().copied().collect();
        while let Some(coords) = pending.pop() {
            if !self.status.is_running() {
                break;
            }
            let before = changed.len();
            self.chord_once(coords, changed);
            pending.extend(changed[before..].iter().rev());
        }
    }

    /// Opens every neighbor when the flags around an opened cell match its hint.
    fn chord_once(&mut self, coords: Coord2, changed: &mut Vec<Coord2>) {
        let Some(hint) = self.cells[coords.to_nd_index()].value().hint() else {
            return;
        };
        if self.count_flagged_neighbors(coords) != hint {
            return;
        }

        log::trace!("Chord at {:?}", coords);
        for neighbor in self.cells.iter_neighbors(coords) {
            self.open_cell(neighbor, changed);
        }
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        let count = self
            .cells
            .iter_neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].is_flagged())
            .count();
        // at most 8 neighbors
        count as u8
    }

    fn finish(&mut self, status: GameStatus) {
        self.stopwatch.stop();
        self.status = status;
        log::debug!("Game {:?} after {:?}", status, self.stopwatch.elapsed());
    }
}
