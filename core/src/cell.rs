use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Symbolic kind held by a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    A,
    B,
    C,
    D,
    E,
    Bonus,
}

impl CellKind {
    /// Ordinary symbols drawn by refills.
    pub const SYMBOLS: [CellKind; 5] = [Self::A, Self::B, Self::C, Self::D, Self::E];

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn is_bonus(self) -> bool {
        matches!(self, Self::Bonus)
    }

    pub const fn label(self) -> &'static str {
        use CellKind::*;
        match self {
            Empty => ".",
            A => "A",
            B => "B",
            C => "C",
            D => "D",
            E => "E",
            Bonus => "*",
        }
    }

    pub const fn from_label(label: char) -> Option<Self> {
        use CellKind::*;
        Some(match label {
            '.' => Empty,
            'A' | 'a' => A,
            'B' | 'b' => B,
            'C' | 'c' => C,
            'D' | 'd' => D,
            'E' | 'e' => E,
            '*' => Bonus,
            _ => return None,
        })
    }
}

impl Default for CellKind {
    fn default() -> Self {
        Self::Empty
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// What happens when a bonus cell is activated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusEffect {
    /// The bonus cell is consumed and refilled.
    ClearCell,
}

/// Smallest unit of board state, a value object: changing a kind means replacing the cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    kind: CellKind,
}

impl Cell {
    pub const EMPTY: Cell = Cell::new(CellKind::Empty);

    pub const fn new(kind: CellKind) -> Self {
        Self { kind }
    }

    pub const fn status(self) -> CellKind {
        self.kind
    }

    pub const fn is_empty(self) -> bool {
        self.kind.is_empty()
    }

    pub const fn is_bonus(self) -> bool {
        self.kind.is_bonus()
    }

    pub fn activate_bonus(self) -> Result<BonusEffect> {
        if self.kind.is_bonus() {
            log::debug!("Bonus activated");
            Ok(BonusEffect::ClearCell)
        } else {
            log::warn!("Tried to activate a bonus on a '{}' cell", self.kind);
            Err(GameError::NotBonusCell)
        }
    }
}

impl From<CellKind> for Cell {
    fn from(kind: CellKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}
