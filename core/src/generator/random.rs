use rand::prelude::*;

use super::*;

/// Seeded generator: a bonus with probability `bonus_chance`, otherwise a uniformly chosen symbol.
#[derive(Clone, Debug)]
pub struct RandomKindGenerator {
    rng: SmallRng,
    bonus_chance: f64,
}

impl RandomKindGenerator {
    /// Seed used when the configuration leaves it unset.
    pub const DEFAULT_SEED: u64 = 0x6765_6d6c_696e_6533;

    pub fn new(seed: u64, bonus_chance: f64) -> Self {
        let bonus_chance = if bonus_chance.is_nan() {
            log::warn!("Bonus chance is NaN, fallback to the default");
            GameConfig::DEFAULT_BONUS_CHANCE
        } else {
            bonus_chance.clamp(0.0, 1.0)
        };
        Self {
            rng: SmallRng::seed_from_u64(seed),
            bonus_chance,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| {
            log::debug!("No seed configured, using the default seed");
            Self::DEFAULT_SEED
        });
        Self::new(seed, config.bonus_chance)
    }

    pub fn bonus_chance(&self) -> f64 {
        self.bonus_chance
    }
}

impl KindGenerator for RandomKindGenerator {
    fn next_kind(&mut self) -> CellKind {
        if self.rng.random_bool(self.bonus_chance) {
            CellKind::Bonus
        } else {
            CellKind::SYMBOLS[self.rng.random_range(0..CellKind::SYMBOLS.len())]
        }
    }
}
