// engine.rs - Request-driven Game of Life engine

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::patterns::Pattern;
use crate::{Cell, Coord, EngineConfig, Grid, Result, Seed};

const HISTORY_LEN: usize = 10;

/// Whether a generation has been requested but not yet run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepState {
    #[default]
    Idle,
    StepPending,
}

/// Outcome of one generation advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Generation number reached by this advance.
    pub generation: u64,
    pub births: usize,
    pub deaths: usize,
    /// The new configuration matches one of the last few generations.
    pub cycle: bool,
}

/// Ring of recent grid hashes.
#[derive(Debug, Clone, Default)]
struct History {
    hashes: [u64; HISTORY_LEN],
    count: usize,
}

impl History {
    fn contains(&self, hash: u64) -> bool {
        self.hashes[..self.count.min(HISTORY_LEN)].contains(&hash)
    }

    fn push(&mut self, hash: u64) {
        self.hashes[self.count % HISTORY_LEN] = hash;
        self.count += 1;
    }

    fn reset(&mut self, hash: u64) {
        *self = Self::default();
        self.push(hash);
    }
}

/// Owns the grid and runs generations when the host asks for them.
///
/// Stepping is not free-running: the host calls [`request_step`] and the
/// next [`advance_if_pending`] performs exactly one generation. Toggles are
/// independent of the pending flag.
///
/// [`request_step`]: Engine::request_step
/// [`advance_if_pending`]: Engine::advance_if_pending
#[derive(Debug, Clone)]
pub struct Engine {
    grid: Grid,
    seed: Seed,
    live_chance: u8,
    state: StepState,
    generation: u64,
    history: History,
}

impl Engine {
    /// Builds and seeds a grid from `config`, drawing a clock seed if none is set.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(Seed::from_clock);
        let mut rng = StdRng::seed_from_u64(seed.value());
        Self::build(config, seed, &mut rng)
    }

    /// Builds and seeds a grid from a caller-supplied random stream.
    ///
    /// `config.seed` is only recorded; the draws come from `rng`. Without one
    /// the recorded seed is `Seed(0)`, since no seed describes the stream.
    pub fn with_rng<R: Rng>(config: EngineConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or(Seed(0));
        Self::build(config, seed, rng)
    }

    /// An all-dead grid, for placing patterns or cells by hand.
    pub fn blank(size: usize) -> Result<Self> {
        let config = EngineConfig::new(size, 0);
        config.validate()?;
        let grid = Grid::new(size);
        let mut history = History::default();
        history.push(grid.state_hash());
        Ok(Self {
            grid,
            seed: Seed(0),
            live_chance: 0,
            state: StepState::Idle,
            generation: 0,
            history,
        })
    }

    fn build<R: Rng>(config: EngineConfig, seed: Seed, rng: &mut R) -> Result<Self> {
        let mut grid = Grid::new(config.size);
        grid.seed(rng, config.live_chance);
        info!(
            %seed,
            size = config.size,
            live_chance = config.live_chance,
            population = grid.population(),
            "seeded life grid"
        );
        let mut history = History::default();
        history.push(grid.state_hash());
        Ok(Self {
            grid,
            seed,
            live_chance: config.live_chance,
            state: StepState::Idle,
            generation: 0,
            history,
        })
    }

    pub fn grid_size(&self) -> usize {
        self.grid.size()
    }

    /// Seed the grid was populated from.
    pub fn seed(&self) -> Seed {
        self.seed
    }

    pub fn live_chance(&self) -> u8 {
        self.live_chance
    }

    pub fn state(&self) -> StepState {
        self.state
    }

    pub fn is_step_pending(&self) -> bool {
        self.state == StepState::StepPending
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Row-major view of every cell, for renderers.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, &Cell)> {
        self.grid.cells()
    }

    /// Queues one generation for the next [`advance_if_pending`](Self::advance_if_pending).
    pub fn request_step(&mut self) {
        self.state = StepState::StepPending;
    }

    /// Runs the queued generation, if any. Called once per host tick.
    pub fn advance_if_pending(&mut self) -> Option<StepReport> {
        if self.state != StepState::StepPending {
            return None;
        }
        let transitions = self.grid.advance();
        self.generation += 1;
        self.state = StepState::Idle;

        let hash = self.grid.state_hash();
        let cycle = self.history.contains(hash);
        self.history.push(hash);

        debug_assert!(self.grid.check_invariant());
        debug!(
            generation = self.generation,
            births = transitions.births,
            deaths = transitions.deaths,
            cycle,
            "advanced generation"
        );
        Some(StepReport {
            generation: self.generation,
            births: transitions.births,
            deaths: transitions.deaths,
            cycle,
        })
    }

    /// Flips the cell at `(x, y)`. Off-grid coordinates are rejected untouched.
    ///
    /// A hand edit starts a new cycle history, so only generations after the
    /// edit count as repeats.
    pub fn toggle(&mut self, x: i32, y: i32) -> Result<()> {
        let coord = self.grid.locate(x, y)?;
        self.grid.toggle(coord);
        self.history.reset(self.grid.state_hash());
        Ok(())
    }

    /// Sets the cell at `(x, y)`; a no-op when it already has that state.
    pub fn set_alive(&mut self, x: i32, y: i32, alive: bool) -> Result<()> {
        let coord = self.grid.locate(x, y)?;
        if self.grid.set_alive(coord, alive) {
            self.history.reset(self.grid.state_hash());
        }
        Ok(())
    }

    pub fn is_alive(&self, x: i32, y: i32) -> Result<bool> {
        let coord = self.grid.locate(x, y)?;
        Ok(self.grid.cell(coord).is_alive())
    }

    pub fn live_neighbor_count(&self, x: i32, y: i32) -> Result<u8> {
        let coord = self.grid.locate(x, y)?;
        Ok(self.grid.cell(coord).live_neighbors())
    }

    /// Kills every cell and forgets the generation count and any queued step.
    pub fn clear(&mut self) {
        self.grid.clear();
        self.reset_run();
        debug!("cleared grid");
    }

    /// Re-populates the existing grid from a new seed.
    pub fn reseed(&mut self, seed: Seed) {
        self.seed = seed;
        let mut rng = StdRng::seed_from_u64(self.seed.value());
        self.grid.seed(&mut rng, self.live_chance);
        self.reset_run();
        info!(seed = %self.seed, population = self.population(), "reseeded life grid");
    }

    /// Clears the grid and stamps `pattern` with its top-left corner at
    /// `origin`. Cells landing off the grid are dropped. Returns how many
    /// cells were placed.
    pub fn apply_pattern(&mut self, pattern: &Pattern, origin: Coord) -> usize {
        self.grid.clear();
        let mut placed = 0;
        for &(dx, dy) in pattern.cells {
            let coord = Coord::new(origin.x.saturating_add(dx), origin.y.saturating_add(dy));
            if self.grid.contains(coord) && self.grid.set_alive(coord, true) {
                placed += 1;
            }
        }
        self.reset_run();
        debug!(pattern = pattern.name, %origin, placed, "applied pattern");
        placed
    }

    /// Like [`apply_pattern`](Self::apply_pattern) with the pattern centred.
    pub fn apply_pattern_centered(&mut self, pattern: &Pattern) -> usize {
        let size = self.grid_size();
        let origin = Coord::new(
            size.saturating_sub(pattern.width()) / 2,
            size.saturating_sub(pattern.height()) / 2,
        );
        self.apply_pattern(pattern, origin)
    }

    /// Full rescan of every neighbour count.
    pub fn check_invariant(&self) -> bool {
        self.grid.check_invariant()
    }

    fn reset_run(&mut self) {
        self.generation = 0;
        self.state = StepState::Idle;
        self.history.reset(self.grid.state_hash());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{BLINKER, BLOCK, GLIDER};
    use crate::{ConfigError, LifeError};

    fn alive(engine: &Engine) -> Vec<Coord> {
        engine.cells().filter(|(_, c)| c.is_alive()).map(|(p, _)| p).collect()
    }

    #[test]
    fn starts_idle() {
        let engine = Engine::new(EngineConfig::new(10, 30).with_seed(Seed(5))).unwrap();
        assert_eq!(engine.state(), StepState::Idle);
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.seed(), Seed(5));
        assert!(engine.check_invariant());
    }

    #[test]
    fn advance_without_request_is_noop() {
        let mut engine = Engine::new(EngineConfig::new(10, 40).with_seed(Seed(11))).unwrap();
        let before = engine.grid().clone();
        assert_eq!(engine.advance_if_pending(), None);
        assert_eq!(engine.grid(), &before);
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn request_then_advance_runs_once() {
        let mut engine = Engine::blank(5).unwrap();
        engine.apply_pattern(&BLINKER, Coord::new(1, 2));
        engine.request_step();
        assert!(engine.is_step_pending());

        let report = engine.advance_if_pending().unwrap();
        assert_eq!(report.generation, 1);
        assert_eq!((report.births, report.deaths), (2, 2));
        assert!(!report.cycle);
        assert_eq!(engine.state(), StepState::Idle);
        assert_eq!(engine.advance_if_pending(), None);
    }

    #[test]
    fn toggle_leaves_step_state_alone() {
        let mut engine = Engine::blank(5).unwrap();
        engine.toggle(0, 0).unwrap();
        assert_eq!(engine.state(), StepState::Idle);
        engine.request_step();
        engine.toggle(0, 0).unwrap();
        assert_eq!(engine.state(), StepState::StepPending);
    }

    #[test]
    fn out_of_bounds_toggle_is_rejected() {
        let mut engine = Engine::new(EngineConfig::new(6, 50).with_seed(Seed(3))).unwrap();
        let before = engine.grid().clone();
        assert_eq!(
            engine.toggle(6, 0),
            Err(LifeError::OutOfBounds { x: 6, y: 0, size: 6 })
        );
        assert!(engine.toggle(-1, -1).is_err());
        assert_eq!(engine.grid(), &before);
        assert_eq!(engine.state(), StepState::Idle);
    }

    #[test]
    fn queries_check_bounds() {
        let engine = Engine::blank(3).unwrap();
        assert_eq!(engine.is_alive(2, 2), Ok(false));
        assert_eq!(engine.live_neighbor_count(1, 1), Ok(0));
        assert!(engine.is_alive(3, 0).is_err());
        assert!(engine.live_neighbor_count(0, -1).is_err());
    }

    #[test]
    fn refuses_invalid_configuration() {
        assert_eq!(
            Engine::new(EngineConfig::new(0, 10)).unwrap_err(),
            LifeError::InvalidConfiguration(ConfigError::ZeroSize)
        );
        assert_eq!(
            Engine::new(EngineConfig::new(5, 150)).unwrap_err(),
            LifeError::InvalidConfiguration(ConfigError::LiveChanceOutOfRange(150))
        );
        assert!(Engine::blank(0).is_err());
    }

    #[test]
    fn single_cell_grid() {
        let mut engine = Engine::new(EngineConfig::new(1, 100).with_seed(Seed(1))).unwrap();
        assert_eq!(engine.is_alive(0, 0), Ok(true));
        assert_eq!(engine.live_neighbor_count(0, 0), Ok(0));
        engine.request_step();
        let report = engine.advance_if_pending().unwrap();
        assert_eq!(report.deaths, 1);
        assert_eq!(engine.population(), 0);
    }

    #[test]
    fn block_reports_cycle() {
        let mut engine = Engine::blank(6).unwrap();
        engine.apply_pattern_centered(&BLOCK);
        engine.request_step();
        let report = engine.advance_if_pending().unwrap();
        assert!(report.cycle);
        assert_eq!((report.births, report.deaths), (0, 0));
    }

    #[test]
    fn blinker_cycle_after_two_generations() {
        let mut engine = Engine::blank(5).unwrap();
        engine.apply_pattern(&BLINKER, Coord::new(1, 2));
        engine.request_step();
        assert!(!engine.advance_if_pending().unwrap().cycle);
        engine.request_step();
        assert!(engine.advance_if_pending().unwrap().cycle);
    }

    #[test]
    fn hand_edit_forgets_earlier_generations() {
        let mut engine = Engine::blank(5).unwrap();
        engine.apply_pattern(&BLINKER, Coord::new(1, 2));
        engine.request_step();
        engine.advance_if_pending();

        // Rebuild the horizontal phase by hand.
        engine.toggle(2, 1).unwrap();
        engine.toggle(2, 3).unwrap();
        engine.set_alive(1, 2, true).unwrap();
        engine.set_alive(3, 2, true).unwrap();

        engine.request_step();
        let report = engine.advance_if_pending().unwrap();
        assert!(!report.cycle);
        engine.request_step();
        assert!(engine.advance_if_pending().unwrap().cycle);
    }

    #[test]
    fn with_rng_without_seed_records_zero() {
        let mut rng = StdRng::seed_from_u64(4);
        let engine = Engine::with_rng(EngineConfig::new(6, 30), &mut rng).unwrap();
        assert_eq!(engine.seed(), Seed(0));
    }

    #[test]
    fn with_rng_records_configured_seed() {
        let mut rng = StdRng::seed_from_u64(4);
        let config = EngineConfig::new(6, 30).with_seed(Seed(4));
        let engine = Engine::with_rng(config, &mut rng).unwrap();
        assert_eq!(engine.seed(), Seed(4));
        assert_eq!(engine.grid(), Engine::new(config).unwrap().grid());
    }

    #[test]
    fn apply_pattern_clips_and_resets() {
        let mut engine = Engine::new(EngineConfig::new(4, 60).with_seed(Seed(8))).unwrap();
        engine.request_step();
        engine.advance_if_pending();
        engine.request_step();

        let placed = engine.apply_pattern(&GLIDER, Coord::new(2, 2));
        assert_eq!(placed, 1);
        assert_eq!(alive(&engine), vec![Coord::new(3, 2)]);
        assert_eq!(engine.generation(), 0);
        assert!(!engine.is_step_pending());
        assert!(engine.check_invariant());
    }

    #[test]
    fn centered_pattern_origin() {
        let mut engine = Engine::blank(7).unwrap();
        assert_eq!(engine.apply_pattern_centered(&BLINKER), 3);
        assert_eq!(
            alive(&engine),
            vec![Coord::new(2, 3), Coord::new(3, 3), Coord::new(4, 3)]
        );
    }

    #[test]
    fn clear_resets_everything() {
        let mut engine = Engine::new(EngineConfig::new(8, 50).with_seed(Seed(21))).unwrap();
        engine.request_step();
        engine.advance_if_pending();
        engine.request_step();
        engine.clear();
        assert_eq!(engine.population(), 0);
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.state(), StepState::Idle);
        assert!(engine.check_invariant());
    }

    #[test]
    fn reseed_matches_fresh_engine() {
        let fresh = Engine::new(EngineConfig::new(12, 25).with_seed(Seed(77))).unwrap();
        let mut engine = Engine::new(EngineConfig::new(12, 25).with_seed(Seed(1))).unwrap();
        engine.reseed(Seed(77));
        assert_eq!(engine.seed(), Seed(77));
        assert_eq!(engine.grid(), fresh.grid());
    }

    #[test]
    fn set_alive_through_engine() {
        let mut engine = Engine::blank(4).unwrap();
        engine.set_alive(1, 1, true).unwrap();
        engine.set_alive(1, 1, true).unwrap();
        assert_eq!(engine.live_neighbor_count(0, 0), Ok(1));
        assert!(engine.set_alive(4, 4, true).is_err());
    }
}
