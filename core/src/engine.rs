use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A single game from start to finish.
///
/// Cells are stored row-major in one flat array, so `(row, col)` lives at
/// `row * width + col`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot")]
pub struct Board {
    size: Coord2,
    mine_count: CellCount,
    cells: Array2<Cell>,
    revealed_count: CellCount,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl Board {
    pub fn new(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        let cells = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            Cell::new(
                mine_layout.contains_mine(coords),
                mine_layout.adjacent_mine_count(coords),
            )
        });

        log::debug!(
            "New board {}x{} with {} mines",
            size.1,
            size.0,
            mine_layout.mine_count()
        );
        Self {
            size,
            mine_count: mine_layout.mine_count(),
            cells,
            revealed_count: 0,
            status: GameStatus::InProgress,
            triggered_mine: None,
        }
    }

    /// Random board, mines placed by rejection sampling from `rng`.
    pub fn initialize<R: Rng + ?Sized>(
        width: Coord,
        height: Coord,
        mine_count: CellCount,
        rng: &mut R,
    ) -> Result<Self> {
        let config = GameConfig::from_dimensions(width, height, mine_count)?;
        Self::generate(config, RandomLayoutGenerator::new(rng))
    }

    /// Board with mines exactly at `mines`, which must be in bounds and distinct.
    pub fn with_mines(width: Coord, height: Coord, mines: &[Coord2]) -> Result<Self> {
        let layout = MineLayout::from_mine_coords((height, width), mines)?;
        Ok(Self::new(layout))
    }

    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self> {
        Self::generate(config, SeededLayoutGenerator::new(seed))
    }

    pub fn generate<G: LayoutGenerator>(config: GameConfig, generator: G) -> Result<Self> {
        Ok(Self::new(generator.generate(config)?))
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// `(height, width)`
    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn width(&self) -> Coord {
        self.size.1
    }

    pub fn height(&self) -> Coord {
        self.size.0
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size, self.mine_count)
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    /// Number of revealed safe cells. A mine opened on loss is not counted.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn remaining_safe_cells(&self) -> CellCount {
        self.safe_cell_count() - self.revealed_count
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds(coords))
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cell(coords))
    }

    pub fn is_mine(&self, coords: Coord2) -> Result<bool> {
        Ok(self.cell_at(coords)?.is_mine())
    }

    pub fn is_revealed(&self, coords: Coord2) -> Result<bool> {
        Ok(self.cell_at(coords)?.is_revealed())
    }

    /// Mines among the in-bounds neighbors, whether or not the cell is revealed.
    pub fn neighbor_count(&self, coords: Coord2) -> Result<u8> {
        Ok(self.cell_at(coords)?.adjacent_mines())
    }

    pub fn tile_at(&self, coords: Coord2) -> Result<Tile> {
        Ok(self.cell_at(coords)?.into())
    }

    pub fn neighbors(&self, coords: Coord2) -> Result<NeighborIter> {
        let coords = self.validate_coords(coords)?;
        Ok(NeighborIter::new(coords, self.size))
    }

    /// Every mine on the board, for display once the game is lost. Does not
    /// change what counts as revealed.
    pub fn all_mines(&self) -> BTreeSet<Coord2> {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| cell.is_mine())
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect()
    }

    /// All coordinates in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size;
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords).inspect_err(|_| {
            log::warn!("Reveal at {:?} outside {:?} board", coords, self.size);
        })?;

        let cell = self.cell(coords);
        if self.status.is_terminal() || cell.is_revealed() {
            return Ok(RevealOutcome::Ignored);
        }

        if cell.is_mine() {
            self.cells[coords.to_nd_index()].mark_revealed();
            self.triggered_mine = Some(coords);
            self.finish(GameStatus::Lost);
            return Ok(RevealOutcome::Lost);
        }

        let newly_revealed = self.flood_reveal(coords);
        log::trace!(
            "Reveal at {:?} opened {} cells",
            coords,
            newly_revealed.len()
        );

        if self.revealed_count == self.safe_cell_count() {
            self.finish(GameStatus::Won);
            Ok(RevealOutcome::Won { newly_revealed })
        } else {
            Ok(RevealOutcome::Revealed { newly_revealed })
        }
    }

    /// Opens `start` and spreads through zero-count cells using an explicit
    /// stack. Mines never enter the worklist and every cell is opened once.
    fn flood_reveal(&mut self, start: Coord2) -> BTreeSet<Coord2> {
        let mut newly_revealed = BTreeSet::new();
        let mut pending = Vec::from([start]);

        while let Some(coords) = pending.pop() {
            let cell = &mut self.cells[coords.to_nd_index()];
            if !cell.is_open_candidate() {
                continue;
            }
            cell.mark_revealed();
            let adjacent_mines = cell.adjacent_mines();

            self.revealed_count += 1;
            newly_revealed.insert(coords);

            if adjacent_mines == 0 {
                pending.extend(
                    NeighborIter::new(coords, self.size)
                        .filter(|&pos| self.cells[pos.to_nd_index()].is_open_candidate()),
                );
            }
        }

        newly_revealed
    }

    fn finish(&mut self, status: GameStatus) {
        if self.status.is_terminal() {
            return;
        }

        log::debug!(
            "Game over: {:?}, {}/{} safe cells revealed",
            status,
            self.revealed_count,
            self.safe_cell_count()
        );
        self.status = status;
    }

    fn cell(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }
}

/// Serialized form of a [`Board`], checked against the grid before use.
#[derive(Deserialize)]
struct BoardSnapshot {
    size: Coord2,
    mine_count: CellCount,
    cells: Array2<Cell>,
    revealed_count: CellCount,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = GameError;

    fn try_from(snapshot: BoardSnapshot) -> Result<Self> {
        let BoardSnapshot {
            size,
            mine_count,
            cells,
            revealed_count,
            status,
            triggered_mine,
        } = snapshot;
        let config = GameConfig::new(size, mine_count)?;
        check_shape(size, cells.dim())?;

        let mut mines: CellCount = 0;
        let mut revealed_safe: CellCount = 0;
        let mut exploded = None;
        for ((row, col), cell) in cells.indexed_iter() {
            let coords = (row as Coord, col as Coord);
            let adjacent = NeighborIter::new(coords, size)
                .filter(|pos| cells[pos.to_nd_index()].is_mine())
                .count();
            if usize::from(cell.adjacent_mines()) != adjacent {
                return Err(ConfigError::AdjacencyMismatch(coords).into());
            }

            match (cell.is_mine(), cell.is_revealed()) {
                (true, true) if exploded.is_some() => {
                    return Err(ConfigError::InconsistentStatus.into());
                }
                (true, true) => {
                    exploded = Some(coords);
                    mines += 1;
                }
                (true, false) => mines += 1,
                (false, true) => revealed_safe += 1,
                (false, false) => {}
            }
        }

        if mines != mine_count {
            return Err(ConfigError::MineCountMismatch {
                expected: mine_count,
                actual: mines,
            }
            .into());
        }
        if revealed_safe != revealed_count {
            return Err(ConfigError::RevealedCountMismatch {
                expected: revealed_count,
                actual: revealed_safe,
            }
            .into());
        }

        let all_safe_open = revealed_safe == config.total_cells() - mine_count;
        let consistent = exploded == triggered_mine
            && match status {
                GameStatus::InProgress => exploded.is_none() && !all_safe_open,
                GameStatus::Won => exploded.is_none() && all_safe_open,
                GameStatus::Lost => exploded.is_some() && !all_safe_open,
            };
        if !consistent {
            return Err(ConfigError::InconsistentStatus.into());
        }

        Ok(Self {
            size,
            mine_count,
            cells,
            revealed_count,
            status,
            triggered_mine,
        })
    }
}
