#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use dashboard::*;
pub use engine::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use grid::*;
pub use session::*;
pub use stats::*;
pub use types::*;

mod cell;
mod dashboard;
mod engine;
mod error;
mod game;
mod generator;
mod grid;
mod session;
mod stats;
mod types;

/// Which pairs of cells a player may swap.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapRule {
    /// Any two cells on the board.
    Any,
    /// Only orthogonal neighbours.
    Adjacent,
}

impl Default for SwapRule {
    fn default() -> Self {
        Self::Any
    }
}

/// How many find/remove/refill passes one resolution may run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveMode {
    /// Exactly one pass, matches created by the refill stay on the board.
    SinglePass,
    /// Repeat until no match remains or `max_passes` is reached.
    Cascade { max_passes: u8 },
}

impl ResolveMode {
    pub const fn max_passes(self) -> u8 {
        match self {
            Self::SinglePass => 1,
            Self::Cascade { max_passes } if max_passes == 0 => 1,
            Self::Cascade { max_passes } => max_passes,
        }
    }
}

impl Default for ResolveMode {
    fn default() -> Self {
        Self::SinglePass
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: Dim,
    pub height: Dim,
    /// Probability that a refilled cell becomes a bonus cell.
    pub bonus_chance: f64,
    /// Seed for the refill generator, a fixed default is used when unset.
    pub seed: Option<u64>,
    pub swap_rule: SwapRule,
    pub resolve_mode: ResolveMode,
    /// Points per match found by a resolution pass.
    pub match_points: u64,
    /// Flat points for activating a bonus cell.
    pub bonus_points: u64,
}

impl GameConfig {
    pub const DEFAULT_SIZE: Dim = 8;
    pub const MAX_SIZE: Dim = 256;
    pub const DEFAULT_BONUS_CHANCE: f64 = 0.1;

    pub fn new(width: Dim, height: Dim) -> Self {
        Self {
            width: width.clamp(1, Self::MAX_SIZE),
            height: height.clamp(1, Self::MAX_SIZE),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if self.width > Self::MAX_SIZE || self.height > Self::MAX_SIZE {
            return Err(GameError::InvalidDimensions);
        }
        if !(0.0..=1.0).contains(&self.bonus_chance) {
            return Err(GameError::InvalidBonusChance);
        }
        Ok(())
    }

    pub const fn size(&self) -> Size2 {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> usize {
        area(self.width, self.height)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_SIZE,
            height: Self::DEFAULT_SIZE,
            bonus_chance: Self::DEFAULT_BONUS_CHANCE,
            seed: None,
            swap_rule: SwapRule::default(),
            resolve_mode: ResolveMode::default(),
            match_points: 10,
            bonus_points: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_dimensions() {
        let config = GameConfig::new(0, 1000);

        assert_eq!(config.size(), (1, GameConfig::MAX_SIZE));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_zero_width_and_bad_bonus_chance() {
        let zero = GameConfig {
            width: 0,
            ..Default::default()
        };
        assert_eq!(zero.validate(), Err(GameError::InvalidDimensions));

        let chance = GameConfig {
            bonus_chance: 1.5,
            ..Default::default()
        };
        assert_eq!(chance.validate(), Err(GameError::InvalidBonusChance));
    }

    #[test]
    fn cascade_with_zero_passes_still_runs_once() {
        assert_eq!(ResolveMode::SinglePass.max_passes(), 1);
        assert_eq!(ResolveMode::Cascade { max_passes: 0 }.max_passes(), 1);
        assert_eq!(ResolveMode::Cascade { max_passes: 4 }.max_passes(), 4);
    }
}
