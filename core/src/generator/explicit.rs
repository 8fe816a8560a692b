use super::*;

/// Puts mines exactly where the caller says, for reproducible boards.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ExplicitLayoutGenerator<'a> {
    mines: &'a [Coord2],
}

impl<'a> ExplicitLayoutGenerator<'a> {
    pub fn new(mines: &'a [Coord2]) -> Self {
        Self { mines }
    }
}

impl LayoutGenerator for ExplicitLayoutGenerator<'_> {
    /// `config.mines` must match the number of coordinates given.
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        let layout = MineLayout::from_mine_coords(config.size, self.mines)?;
        if layout.mine_count() != config.mines {
            return Err(ConfigError::MineCountMismatch {
                expected: config.mines,
                actual: layout.mine_count(),
            }
            .into());
        }
        Ok(layout)
    }
}
