use alloc::vec::Vec;
use core::num::Saturating;

use crate::*;

/// Result of one resolution: the matches removed and the points they earned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolveOutcome {
    pub matches: Vec<Match>,
    pub points: u64,
    /// Find/remove/refill passes that found at least one match.
    pub passes: u8,
}

impl ResolveOutcome {
    pub fn has_update(&self) -> bool {
        !self.matches.is_empty()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BonusOutcome {
    pub effect: BonusEffect,
    pub points: u64,
}

/// Turn orchestrator: swaps, resolves matches, keeps the score.
///
/// The board is borrowed per call, the engine never owns it.
#[derive(Clone, Debug)]
pub struct Engine<G = RandomKindGenerator> {
    generator: G,
    score: Saturating<u64>,
    swap_rule: SwapRule,
    resolve_mode: ResolveMode,
    match_points: u64,
    bonus_points: u64,
}

impl Engine {
    pub fn from_config(config: &GameConfig) -> Self {
        Self::with_generator(config, RandomKindGenerator::from_config(config))
    }
}

impl<G: KindGenerator> Engine<G> {
    pub fn with_generator(config: &GameConfig, generator: G) -> Self {
        Self {
            generator,
            score: Saturating(0),
            swap_rule: config.swap_rule,
            resolve_mode: config.resolve_mode,
            match_points: config.match_points,
            bonus_points: config.bonus_points,
        }
    }

    pub fn score(&self) -> u64 {
        self.score.0
    }

    pub fn reset_score(&mut self) {
        self.score = Saturating(0);
    }

    pub fn generator_mut(&mut self) -> &mut G {
        &mut self.generator
    }

    /// Swaps two cells and resolves the board in the same step.
    pub fn apply_swap(&mut self, grid: &mut Grid, a: Coord2, b: Coord2) -> Result<ResolveOutcome> {
        if let Err(err) = grid.validate_coords(a).and(grid.validate_coords(b)) {
            log::warn!("Rejected swap {:?} <-> {:?}: {}", a, b, err);
            return Err(err);
        }
        if matches!(self.swap_rule, SwapRule::Adjacent) && !is_adjacent(a, b) {
            log::warn!("Rejected swap {:?} <-> {:?}: cells are not adjacent", a, b);
            return Err(GameError::NotAdjacent(a, b));
        }

        grid.swap_cells(a, b)?;
        Ok(self.resolve_matches(grid))
    }

    pub fn resolve_matches(&mut self, grid: &mut Grid) -> ResolveOutcome {
        let max_passes = self.resolve_mode.max_passes();
        let mut outcome = ResolveOutcome::default();

        while outcome.passes < max_passes {
            let matches = grid.find_matches();
            if matches.is_empty() {
                break;
            }
            log::debug!("Found {} matches: {:?}", matches.len(), matches);

            grid.remove_matches(matches.iter().flat_map(Match::coords));
            let points = (matches.len() as u64).saturating_mul(self.match_points);
            self.score += Saturating(points);
            outcome.points = outcome.points.saturating_add(points);
            grid.fill_full_cells(&mut self.generator);

            outcome.matches.extend(matches);
            outcome.passes += 1;
        }

        if outcome.has_update() {
            log::debug!("+{} points, score {}", outcome.points, self.score);
        }
        outcome
    }

    pub fn activate_bonus(&mut self, grid: &mut Grid, coords: Coord2) -> Result<BonusOutcome> {
        let Some(cell) = grid.cell(coords.0, coords.1) else {
            log::warn!("Cell {:?} does not exist", coords);
            return Err(GameError::CoordinateOutOfRange(coords));
        };
        let effect = cell.activate_bonus()?;

        match effect {
            BonusEffect::ClearCell => {
                grid.remove_matches([coords]);
                grid.fill_full_cells(&mut self.generator);
            }
        }
        self.score += Saturating(self.bonus_points);
        log::debug!("Bonus activated at {:?}, score {}", coords, self.score);

        Ok(BonusOutcome {
            effect,
            points: self.bonus_points,
        })
    }

    /// Advisory only: true when the board holds no match, legal swaps that could create one are not searched.
    pub fn check_game_over(&self, grid: &Grid) -> bool {
        if grid.find_matches().is_empty() {
            log::info!("No more matches found, game might be over");
            true
        } else {
            log::debug!("There are still matches on the board");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    fn engine(config: &GameConfig, kinds: &[CellKind]) -> Engine<CycleKindGenerator> {
        Engine::with_generator(config, CycleKindGenerator::new(kinds.iter().copied()))
    }

    #[test]
    fn resolve_scores_one_row_and_refills_it() {
        let mut board = grid(&["AAA", "BCB", "DED"]);
        let mut engine = engine(&GameConfig::default(), &[CellKind::C, CellKind::D]);

        let outcome = engine.resolve_matches(&mut board);

        assert_eq!(
            outcome.matches,
            [Match {
                row: 0,
                start: 0,
                len: 3,
                kind: CellKind::A
            }]
        );
        assert_eq!(outcome.points, 10);
        assert_eq!(engine.score(), 10);
        assert_eq!(board, grid(&["CDC", "BCB", "DED"]));
        assert_eq!(board.empty_count(), 0);
    }

    #[test]
    fn resolve_awards_ten_per_match() {
        let mut board = grid(&["AAB", "CDD", "EE*"]);
        let mut engine = engine(&GameConfig::default(), &[CellKind::B, CellKind::C]);

        let outcome = engine.resolve_matches(&mut board);

        assert_eq!(outcome.matches.len(), 3);
        assert_eq!(engine.score(), 30);
        assert_eq!(board.empty_count(), 0);
    }

    #[test]
    fn single_pass_leaves_refill_matches_alone() {
        let mut board = grid(&["AAB", "CDE"]);
        let mut engine = engine(&GameConfig::default(), &[CellKind::B]);

        let outcome = engine.resolve_matches(&mut board);

        assert_eq!(outcome.passes, 1);
        assert_eq!(board, grid(&["BBB", "CDE"]));
        assert_eq!(board.find_matches().len(), 1);
    }

    #[test]
    fn cascade_runs_until_stable() {
        let config = GameConfig {
            resolve_mode: ResolveMode::Cascade { max_passes: 8 },
            ..Default::default()
        };
        let mut board = grid(&["AAB", "CDE"]);
        let mut engine = engine(&config, &[CellKind::B, CellKind::C, CellKind::D]);

        let outcome = engine.resolve_matches(&mut board);

        // pass 1 clears AA -> BCB, nothing left to match
        assert_eq!(outcome.passes, 1);
        assert_eq!(board, grid(&["BCB", "CDE"]));

        let mut board = grid(&["AAB", "CDE"]);
        let mut engine = engine_with_b_then_symbols(&config);
        let outcome = engine.resolve_matches(&mut board);

        // pass 1 refills BB next to B, pass 2 clears the whole row
        assert_eq!(outcome.passes, 2);
        assert_eq!(outcome.points, 20);
        assert!(board.find_matches().is_empty());
    }

    fn engine_with_b_then_symbols(config: &GameConfig) -> Engine<CycleKindGenerator> {
        engine(
            config,
            &[CellKind::B, CellKind::B, CellKind::C, CellKind::D, CellKind::E],
        )
    }

    #[test]
    fn no_matches_means_no_points() {
        let mut board = grid(&["ABA", "BAB"]);
        let before = board.clone();
        let mut engine = engine(&GameConfig::default(), &[CellKind::C]);

        let outcome = engine.resolve_matches(&mut board);

        assert!(!outcome.has_update());
        assert_eq!(engine.score(), 0);
        assert_eq!(board, before);
        assert!(engine.check_game_over(&board));
    }

    #[test]
    fn board_with_a_run_is_not_over() {
        let board = grid(&["AAB", "CDE"]);
        let engine = engine(&GameConfig::default(), &[CellKind::C]);

        assert!(!engine.check_game_over(&board));
        assert!(engine.check_game_over(&grid(&["ABA", "CDE"])));
    }

    #[test]
    fn apply_swap_resolves_immediately() {
        let mut board = grid(&["ABA", "CDE"]);
        let mut engine = engine(&GameConfig::default(), &[CellKind::E]);

        let outcome = engine.apply_swap(&mut board, (1, 0), (0, 1)).unwrap();

        // swap puts C in the middle of the top row, nothing matches yet
        assert!(!outcome.has_update());
        assert_eq!(board, grid(&["ACA", "BDE"]));

        let mut board = grid(&["ABA", "CAE"]);
        let outcome = engine.apply_swap(&mut board, (1, 0), (1, 1)).unwrap();
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(board, grid(&["EEE", "CBE"]));
        assert_eq!(engine.score(), 10);
    }

    #[test]
    fn apply_swap_rejects_out_of_range_and_keeps_board() {
        let mut board = grid(&["AB", "BA"]);
        let before = board.clone();
        let mut engine = engine(&GameConfig::default(), &[CellKind::C]);

        assert_eq!(
            engine.apply_swap(&mut board, (0, 0), (5, 0)),
            Err(GameError::CoordinateOutOfRange((5, 0)))
        );
        assert_eq!(board, before);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn adjacent_rule_rejects_distant_swaps() {
        let config = GameConfig {
            swap_rule: SwapRule::Adjacent,
            ..Default::default()
        };
        let mut board = grid(&["ABC", "DEA"]);
        let before = board.clone();
        let mut engine = engine(&config, &[CellKind::C]);

        assert_eq!(
            engine.apply_swap(&mut board, (0, 0), (2, 1)),
            Err(GameError::NotAdjacent((0, 0), (2, 1)))
        );
        assert_eq!(board, before);

        engine.apply_swap(&mut board, (0, 0), (1, 0)).unwrap();
        assert_eq!(board, grid(&["BAC", "DEA"]));
    }

    #[test]
    fn activate_bonus_adds_five_and_consumes_cell() {
        let mut board = grid(&["A*", "BC"]);
        let mut engine = engine(&GameConfig::default(), &[CellKind::D]);

        let outcome = engine.activate_bonus(&mut board, (1, 0)).unwrap();

        assert_eq!(outcome.effect, BonusEffect::ClearCell);
        assert_eq!(outcome.points, 5);
        assert_eq!(engine.score(), 5);
        assert_eq!(board, grid(&["AD", "BC"]));
    }

    #[test]
    fn activate_bonus_rejects_missing_or_plain_cells() {
        let mut board = grid(&["A*", "BC"]);
        let before = board.clone();
        let mut engine = engine(&GameConfig::default(), &[CellKind::D]);

        assert_eq!(
            engine.activate_bonus(&mut board, (0, 0)),
            Err(GameError::NotBonusCell)
        );
        assert_eq!(
            engine.activate_bonus(&mut board, (-1, 0)),
            Err(GameError::CoordinateOutOfRange((-1, 0)))
        );
        assert_eq!(board, before);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn reset_is_the_only_way_down() {
        let mut board = grid(&["AA"]);
        let mut engine = engine(&GameConfig::default(), &[CellKind::B, CellKind::C]);

        engine.resolve_matches(&mut board);
        let score = engine.score();
        engine.resolve_matches(&mut board);
        assert!(engine.score() >= score);

        engine.reset_score();
        assert_eq!(engine.score(), 0);
    }
}
