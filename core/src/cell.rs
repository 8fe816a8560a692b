use serde::{Deserialize, Serialize};

/// Per-cell record stored by the engine, one per grid position.
///
/// `is_mine` and `adjacent_mines` are fixed when the board is built,
/// `is_revealed` only ever goes from `false` to `true`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    is_mine: bool,
    is_revealed: bool,
    adjacent_mines: u8,
}

impl Cell {
    pub(crate) const fn new(is_mine: bool, adjacent_mines: u8) -> Self {
        Self {
            is_mine,
            is_revealed: false,
            adjacent_mines,
        }
    }

    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(self) -> bool {
        self.is_revealed
    }

    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    pub(crate) fn mark_revealed(&mut self) {
        self.is_revealed = true;
    }

    /// Whether flood fill may open this cell.
    pub(crate) const fn is_open_candidate(self) -> bool {
        !self.is_mine && !self.is_revealed
    }
}

/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Hidden,
    Open(u8),
    /// The mine the player revealed, which ended the game.
    Exploded,
}

impl Tile {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::Hidden
    }
}

impl From<Cell> for Tile {
    fn from(cell: Cell) -> Self {
        match (cell.is_revealed, cell.is_mine) {
            (false, _) => Tile::Hidden,
            (true, true) => Tile::Exploded,
            (true, false) => Tile::Open(cell.adjacent_mines),
        }
    }
}
