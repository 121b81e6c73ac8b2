use crate::*;
pub use cycle::*;
pub use random::*;

mod cycle;
mod random;

/// Source of fresh kinds for refilling empty cells.
///
/// Implementations must never yield [`CellKind::Empty`], a refill is expected to leave no empty cell behind.
pub trait KindGenerator {
    fn next_kind(&mut self) -> CellKind;
}

impl<G: KindGenerator + ?Sized> KindGenerator for &mut G {
    fn next_kind(&mut self) -> CellKind {
        (**self).next_kind()
    }
}
