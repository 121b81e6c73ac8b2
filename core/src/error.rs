use thiserror::Error;

use crate::{Action, Coord2, Phase};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates {0:?} are out of range")]
    CoordinateOutOfRange(Coord2),
    #[error("Cell is not a bonus cell")]
    NotBonusCell,
    #[error("Cells {0:?} and {1:?} are not adjacent")]
    NotAdjacent(Coord2, Coord2),
    #[error("Transition from '{from}' to '{to}' is forbidden")]
    IllegalStateTransition { from: Phase, to: Phase },
    #[error("Action '{action}' is not valid in phase '{phase}'")]
    InvalidAction { phase: Phase, action: Action },
    #[error("Unknown action")]
    UnknownAction,
    #[error("Unknown phase")]
    UnknownPhase,
    #[error("Board operations are not allowed in phase '{0}'")]
    ActionNotAllowed(Phase),
    #[error("Score delta {0} is negative")]
    InvalidScoreDelta(i64),
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Unknown cell label {0:?}")]
    InvalidCellLabel(char),
    #[error("Board dimensions must be between 1 and 256")]
    InvalidDimensions,
    #[error("Bonus chance must be between 0 and 1")]
    InvalidBonusChance,
}

pub type Result<T> = core::result::Result<T, GameError>;
