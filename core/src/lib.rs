//! Board engine for a single-player mine-detection puzzle.
//!
//! The engine owns the grid, places mines, counts neighbors, opens cells with
//! an iterative flood fill and tracks the win/loss state. Rendering, input and
//! clocks belong to whatever front-end drives it.

#![no_std]

extern crate alloc;

use alloc::collections::BTreeSet;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod types;

/// Board dimensions and mine count, validated against each other.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(height, width)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    /// The classic 9×9 board with 10 mines.
    pub const CLASSIC: Self = Self::new_unchecked((9, 9), 10);

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn from_dimensions(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        Self::new((height, width), mines)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(ConfigError::EmptyBoard.into());
        }

        let cells = self.total_cells();
        if self.mines >= cells {
            return Err(ConfigError::TooManyMines {
                mines: self.mines,
                cells,
            }
            .into());
        }

        Ok(())
    }

    pub const fn width(&self) -> Coord {
        self.size.1
    }

    pub const fn height(&self) -> Coord {
        self.size.0
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Fails unless an `ndarray` grid has exactly the `(height, width)` of `size`.
pub(crate) fn check_shape(size: Coord2, dim: (usize, usize)) -> Result<()> {
    if dim == (usize::from(size.0), usize::from(size.1)) {
        Ok(())
    } else {
        Err(ConfigError::ShapeMismatch { size }.into())
    }
}

/// Where the mines are. Built once by a [`LayoutGenerator`] and consumed by
/// [`Board::new`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MineLayoutSnapshot")]
pub struct MineLayout {
    size: Coord2,
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub(crate) fn empty(size: Coord2) -> Self {
        Self {
            size,
            mine_mask: Array2::default(size.to_nd_index()),
            mine_count: 0,
        }
    }

    /// Places mines exactly at `mine_coords`.
    ///
    /// Every coordinate must be inside `size` and listed once, and at least one
    /// cell has to stay safe.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(ConfigError::EmptyBoard.into());
        }

        let mut layout = Self::empty(size);
        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(ConfigError::MineOutOfBounds(coords).into());
            }
            if !layout.place_mine(coords) {
                return Err(ConfigError::DuplicateMine(coords).into());
            }
        }

        layout.game_config().validate()?;
        Ok(layout)
    }

    /// Marks `coords` as a mine, returns `false` if it already was one.
    pub(crate) fn place_mine(&mut self, coords: Coord2) -> bool {
        let slot = &mut self.mine_mask[coords.to_nd_index()];
        if *slot {
            return false;
        }
        *slot = true;
        self.mine_count += 1;
        true
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size, self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors, always fits
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size)
    }
}

#[derive(Deserialize)]
struct MineLayoutSnapshot {
    size: Coord2,
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl TryFrom<MineLayoutSnapshot> for MineLayout {
    type Error = GameError;

    fn try_from(snapshot: MineLayoutSnapshot) -> Result<Self> {
        let MineLayoutSnapshot {
            size,
            mine_mask,
            mine_count,
        } = snapshot;
        GameConfig::new_unchecked(size, mine_count).validate()?;
        check_shape(size, mine_mask.dim())?;

        // the board fits in u8 x u8, so the count fits in CellCount
        let actual = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        if actual != mine_count {
            return Err(ConfigError::MineCountMismatch {
                expected: mine_count,
                actual,
            }
            .into());
        }

        Ok(Self {
            size,
            mine_mask,
            mine_count,
        })
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// Result of a reveal request. Hitting a mine and winning are ordinary
/// outcomes, not errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The game is over or the cell was already open, nothing changed.
    Ignored,
    /// The cell was a mine.
    Lost,
    /// Safe cells were opened and the game goes on.
    Revealed { newly_revealed: BTreeSet<Coord2> },
    /// The last safe cells were opened.
    Won { newly_revealed: BTreeSet<Coord2> },
}

impl RevealOutcome {
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::Ignored)
    }

    pub fn newly_revealed(&self) -> Option<&BTreeSet<Coord2>> {
        match self {
            Self::Revealed { newly_revealed } | Self::Won { newly_revealed } => Some(newly_revealed),
            Self::Ignored | Self::Lost => None,
        }
    }
}
