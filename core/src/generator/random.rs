use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Places mines by rejection sampling: draw a uniform cell, keep it if it is
/// not a mine yet, repeat until the requested count is reached.
///
/// Termination is almost sure since at least one cell always stays free.
#[derive(Debug)]
pub struct RandomLayoutGenerator<'a, R: Rng + ?Sized> {
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> RandomLayoutGenerator<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + ?Sized> LayoutGenerator for RandomLayoutGenerator<'_, R> {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        config.validate()?;

        let rng = self.rng;
        let (rows, cols) = config.size;
        let mut layout = MineLayout::empty(config.size);
        let mut draws: u32 = 0;
        while layout.mine_count() < config.mines {
            let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
            layout.place_mine(coords);
            draws = draws.saturating_add(1);
        }

        log::trace!(
            "Placed {} mines on {}x{} in {} draws",
            config.mines,
            rows,
            cols,
            draws
        );
        Ok(layout)
    }
}

/// Random generation from a fixed seed, reproducible across runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SeededLayoutGenerator {
    seed: u64,
}

impl SeededLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LayoutGenerator for SeededLayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        RandomLayoutGenerator::new(&mut rng).generate(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_mine_count() {
        let mut rng = SmallRng::seed_from_u64(7);
        let layout = RandomLayoutGenerator::new(&mut rng)
            .generate(GameConfig::CLASSIC)
            .unwrap();

        assert_eq!(layout.mine_count(), 10);
        assert_eq!(layout.iter_mines().count(), 10);
        assert_eq!(layout.size(), (9, 9));
    }

    #[test]
    fn nearly_full_board_leaves_one_safe_cell() {
        let config = GameConfig::new((4, 3), 11).unwrap();
        let layout = SeededLayoutGenerator::new(42).generate(config).unwrap();

        assert_eq!(layout.iter_mines().count(), 11);
        assert_eq!(layout.safe_cell_count(), 1);
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::new((16, 30), 99).unwrap();

        assert_eq!(
            SeededLayoutGenerator::new(1234).generate(config),
            SeededLayoutGenerator::new(1234).generate(config)
        );
    }

    #[test]
    fn rejects_invalid_config() {
        let config = GameConfig::new_unchecked((2, 2), 4);

        assert_eq!(
            SeededLayoutGenerator::new(0).generate(config),
            Err(GameError::InvalidConfiguration(ConfigError::TooManyMines {
                mines: 4,
                cells: 4
            }))
        );
    }

    #[test]
    fn zero_mines_is_allowed() {
        let config = GameConfig::new((5, 5), 0).unwrap();
        let layout = SeededLayoutGenerator::new(3).generate(config).unwrap();

        assert_eq!(layout.mine_count(), 0);
        assert_eq!(layout.iter_mines().next(), None);
    }
}
