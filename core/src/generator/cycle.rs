use alloc::vec::Vec;

use super::*;

/// Deterministic generator repeating a fixed sequence of kinds, handy for seeded boards and replays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleKindGenerator {
    kinds: Vec<CellKind>,
    next: usize,
}

impl CycleKindGenerator {
    /// Empty kinds are dropped, an empty sequence falls back to the ordinary symbols.
    pub fn new(kinds: impl IntoIterator<Item = CellKind>) -> Self {
        let mut kinds: Vec<_> = kinds.into_iter().filter(|kind| !kind.is_empty()).collect();
        if kinds.is_empty() {
            log::warn!("Cycle generator needs at least one non-empty kind, using the symbols");
            kinds.extend(CellKind::SYMBOLS);
        }
        Self { kinds, next: 0 }
    }
}

impl KindGenerator for CycleKindGenerator {
    fn next_kind(&mut self) -> CellKind {
        let kind = self.kinds[self.next];
        self.next = (self.next + 1) % self.kinds.len();
        kind
    }
}
