use crate::*;
pub use explicit::*;
pub use random::*;

mod explicit;
mod random;

pub trait LayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}
