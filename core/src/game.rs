use alloc::format;

use crate::*;

/// One play session: the board, the engine driving it, the phase machine and the statistics.
///
/// Board operations are only accepted while [`Phase::Playing`], every accepted turn is recorded.
#[derive(Clone, Debug)]
pub struct Game<G = RandomKindGenerator> {
    dashboard: Dashboard,
    engine: Engine<G>,
    session: SessionState,
    stats: Statistics,
}

impl Game {
    pub fn new(config: &GameConfig) -> Result<Self> {
        config.validate()?;
        let mut engine = Engine::from_config(config);
        let dashboard = Dashboard::new(config.width, config.height, engine.generator_mut())?;
        Ok(Self::from_parts(dashboard, engine))
    }
}

impl<G: KindGenerator> Game<G> {
    /// Starts a session on a prepared board, refills come from `generator`.
    pub fn with_grid(config: &GameConfig, grid: Grid, generator: G) -> Self {
        Self::from_parts(
            Dashboard::from_grid(grid),
            Engine::with_generator(config, generator),
        )
    }

    fn from_parts(dashboard: Dashboard, engine: Engine<G>) -> Self {
        Self {
            dashboard,
            engine,
            session: SessionState::new(),
            stats: Statistics::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.session.current_phase()
    }

    pub fn is_finished(&self) -> bool {
        self.session.is_finished()
    }

    pub fn score(&self) -> u64 {
        self.engine.score()
    }

    pub fn grid(&self) -> &Grid {
        self.dashboard.grid()
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    pub fn handle_action(&mut self, action: &str) -> Result<Phase> {
        self.session.handle_user_action(action)
    }

    pub fn apply_action(&mut self, action: Action) -> Result<Phase> {
        self.session.apply_action(action)
    }

    pub fn swap(&mut self, a: Coord2, b: Coord2) -> Result<ResolveOutcome> {
        self.check_playing()?;
        let outcome = self.engine.apply_swap(self.dashboard.grid_mut(), a, b)?;
        self.record(
            &format!(
                "swap {:?} <-> {:?}, {} matches",
                a,
                b,
                outcome.matches.len()
            ),
            outcome.points,
        )?;
        Ok(outcome)
    }

    pub fn activate_bonus(&mut self, coords: Coord2) -> Result<BonusOutcome> {
        self.check_playing()?;
        let outcome = self.engine.activate_bonus(self.dashboard.grid_mut(), coords)?;
        self.record(&format!("bonus {:?}", coords), outcome.points)?;
        Ok(outcome)
    }

    /// Runs a resolution without swapping first.
    pub fn resolve_matches(&mut self) -> Result<ResolveOutcome> {
        self.check_playing()?;
        let outcome = self.engine.resolve_matches(self.dashboard.grid_mut());
        self.record(
            &format!("resolve, {} matches", outcome.matches.len()),
            outcome.points,
        )?;
        Ok(outcome)
    }

    /// Replaces the whole board, no points awarded.
    pub fn reshuffle(&mut self) -> Result<()> {
        self.check_playing()?;
        self.dashboard
            .update_grid_after_action(self.engine.generator_mut());
        self.record("shuffle", 0)
    }

    pub fn check_game_over(&self) -> bool {
        self.engine.check_game_over(self.dashboard.grid())
    }

    fn check_playing(&self) -> Result<()> {
        match self.phase() {
            Phase::Playing => Ok(()),
            phase => {
                log::warn!("Board operations are not allowed in phase '{}'", phase);
                Err(GameError::ActionNotAllowed(phase))
            }
        }
    }

    fn record(&mut self, description: &str, points: u64) -> Result<()> {
        self.stats.add_step(description);
        self.stats
            .update_score(i64::try_from(points).unwrap_or(i64::MAX))
    }
}
