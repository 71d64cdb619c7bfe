//! Game facade - the operations a front-end drives
//!
//! [`QuizGame`] owns the datasets, the session, the round engine and the
//! random source. Every operation either completes or leaves the game as it
//! was; the returned values and [`QuizGame::snapshot`] are all a renderer
//! needs.

use tracing::{info, warn};

use crate::catalog::ModeCatalog;
use crate::error::{QuizError, Result};
use crate::pool::{Datasets, TargetPool};
use crate::rng::RandomSource;
use crate::round::RoundEngine;
use crate::session::{KeyValueStore, SessionState, SessionTracker};
use crate::snapshot::{result_text, GameSnapshot, TargetDetails};
use crate::types::{
    ModeDefinition, ModeKey, Point, PoolRule, PoolSize, RoundOutcome, RoundPhase, Target,
};

pub struct QuizGame<S, R> {
    datasets: Datasets,
    session: SessionTracker<S>,
    engine: RoundEngine,
    pool: Option<TargetPool>,
    rng: R,
}

impl<S: KeyValueStore, R: RandomSource> QuizGame<S, R> {
    /// Build a game over loaded datasets, restoring the session from `store`.
    pub fn new(datasets: Datasets, store: S, rng: R) -> Self {
        Self {
            datasets,
            session: SessionTracker::load(store),
            engine: RoundEngine::new(),
            pool: None,
            rng,
        }
    }

    /// Start `mode` at round 1.
    ///
    /// Fails with [`QuizError::EmptyPool`] when the mode has no targets; the
    /// current game, if any, keeps going untouched.
    pub fn start_mode(&mut self, mode: ModeKey) -> Result<&Target> {
        let def = ModeCatalog::definition(mode);
        let pool = self.build_pool(def)?;

        let mut engine = RoundEngine::new();
        engine.new_round(&pool, &mut self.rng)?;

        info!(mode = mode.as_str(), pool = pool.len(), "mode started");
        self.engine = engine;
        self.pool = Some(pool);
        self.session.set_last_mode(mode);
        self.current_target()
    }

    /// [`Self::start_mode`] by string key.
    pub fn start_mode_key(&mut self, key: &str) -> Result<&Target> {
        let def = ModeCatalog::get(key)?;
        self.start_mode(def.key)
    }

    /// Score a guess. Only the first guess of a round moves the streak.
    pub fn submit_guess(&mut self, point: Point) -> Result<RoundOutcome> {
        let first = self.engine.phase() == RoundPhase::AwaitingGuess;
        let outcome = self.engine.evaluate(point)?;
        if first {
            self.session.record_outcome(&outcome);
        }
        Ok(outcome)
    }

    /// Replay the current target after a guess.
    pub fn retry(&mut self) -> Result<&Target> {
        self.engine.retry()
    }

    /// Draw the next target from the current pool.
    pub fn next_round(&mut self) -> Result<&Target> {
        let pool = self.pool.as_ref().ok_or(QuizError::NoActiveRound)?;
        self.engine.new_round(pool, &mut self.rng)
    }

    /// Leave the current mode and return to mode selection.
    pub fn change_mode(&mut self) {
        self.engine.reset();
        self.pool = None;
    }

    /// Store a new pool-size preference.
    ///
    /// When the active mode is sized by it, the pool is rebuilt and a fresh
    /// round starts.
    pub fn set_pool_size(&mut self, raw: i64) -> Result<PoolSize> {
        let size = self.session.set_pool_size(raw)?;

        let active = self.pool.as_ref().map(|p| ModeCatalog::definition(p.mode()));
        if let Some(def) = active.filter(|d| d.has_pool_size_control) {
            match self.start_mode(def.key) {
                Ok(_) => {}
                Err(e) => warn!(mode = def.key.as_str(), error = %e, "could not restart after pool size change"),
            }
        }
        Ok(size)
    }

    pub fn set_counties_visible(&mut self, visible: bool) {
        self.session.set_counties_visible(visible);
    }

    /// The persisted mode from the previous session, if any.
    pub fn resume_mode(&self) -> Option<ModeKey> {
        self.session.state().last_mode
    }

    pub fn session(&self) -> &SessionState {
        self.session.state()
    }

    pub fn phase(&self) -> RoundPhase {
        self.engine.phase()
    }

    pub fn datasets(&self) -> &Datasets {
        &self.datasets
    }

    pub fn active_mode(&self) -> Option<ModeKey> {
        self.pool.as_ref().map(|p| p.mode())
    }

    /// Number of targets each mode would offer right now.
    pub fn pool_len(&self, mode: ModeKey) -> usize {
        self.build_pool(ModeCatalog::definition(mode))
            .map(|p| p.len())
            .unwrap_or(0)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let session = self.session.state();
        let def = self.active_mode().map(ModeCatalog::definition);
        let mut snap = GameSnapshot {
            phase: self.engine.phase(),
            mode: def.map(|d| d.key),
            mode_label: def.map(|d| d.label),
            next_action_label: def.map(|d| d.next_action_label),
            round_number: self.engine.round_number(),
            streak: session.streak,
            high_score: session.high_score,
            pool_size: session.cities_pool_size,
            pool_len: self.pool.as_ref().map_or(0, |p| p.len()),
            has_pool_size_control: def.is_some_and(|d| d.has_pool_size_control),
            counties_visible: session.counties_layer_visible,
            ..GameSnapshot::default()
        };

        let (Some(def), Some(round)) = (def, self.engine.round()) else {
            return snap;
        };
        snap.target_name = Some(round.target.name.clone());

        if let Some(outcome) = round.outcome {
            snap.outcome = Some(outcome);
            snap.result_message = Some(outcome.tier.message());
            snap.result_text = Some(result_text(def, &round.target, &outcome));
            snap.guess = round.guess;
            snap.answer = Some(round.target.location);
            snap.highlight = round
                .target
                .geometry
                .clone()
                .filter(|_| def.scoring.is_containment());
            snap.details = Some(TargetDetails::for_mode(def, &round.target));
        }
        snap
    }

    fn current_target(&self) -> Result<&Target> {
        self.engine.target().ok_or(QuizError::NoActiveRound)
    }

    fn build_pool(&self, def: &ModeDefinition) -> Result<TargetPool> {
        let size = match def.pool_rule {
            PoolRule::TopByPopulation => self.session.state().cities_pool_size,
            _ => PoolSize::All,
        };
        TargetPool::build(def, self.datasets.records(def.data_source), size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;
    use crate::session::{MemoryStore, KEY_HIGH_SCORE, KEY_LAST_MODE};
    use crate::types::{Category, Geometry};

    fn datasets() -> Datasets {
        let mut cities = Vec::new();
        for (i, (name, lat, lng, pop, seat)) in [
            ("Detroit", 42.3314, -83.0458, 639_111, true),
            ("Grand Rapids", 42.9634, -85.6681, 198_917, true),
            ("Warren", 42.5145, -83.0147, 139_387, false),
        ]
        .into_iter()
        .enumerate()
        {
            let mut t = Target::point(name, Category::City, Point::new(lat, lng));
            t.population = Some(pop);
            t.is_county_seat = Some(seat);
            t.date_founded = Some(format!("18{i}0"));
            cities.push(t);
        }

        let geometry = Geometry::Polygon(vec![vec![
            [-85.0, 43.0],
            [-85.0, 44.0],
            [-84.0, 44.0],
            [-84.0, 43.0],
        ]]);
        let county = Target {
            geometry: Some(geometry),
            ..Target::point("Square", Category::County, Point::new(43.5, -84.5))
        };

        Datasets {
            cities,
            counties: vec![county],
            ..Datasets::default()
        }
    }

    fn game(picks: Vec<usize>) -> QuizGame<MemoryStore, ScriptedRng> {
        QuizGame::new(datasets(), MemoryStore::new(), ScriptedRng::new(picks))
    }

    #[test]
    fn start_mode_draws_a_target() {
        let mut g = game(vec![1]);
        assert_eq!(g.start_mode(ModeKey::Cities).unwrap().name, "Grand Rapids");
        assert_eq!(g.phase(), RoundPhase::AwaitingGuess);
        assert_eq!(g.snapshot().round_number, 1);
        assert_eq!(g.resume_mode(), Some(ModeKey::Cities));
    }

    #[test]
    fn unknown_and_empty_modes_leave_state_alone() {
        let mut g = game(vec![0]);
        g.start_mode(ModeKey::Cities).unwrap();

        assert_eq!(
            g.start_mode_key("rivers").err(),
            Some(QuizError::UnknownMode("rivers".to_string()))
        );
        assert_eq!(
            g.start_mode(ModeKey::Parks).err(),
            Some(QuizError::EmptyPool(ModeKey::Parks))
        );
        assert_eq!(g.active_mode(), Some(ModeKey::Cities));
        assert_eq!(g.snapshot().target_name.as_deref(), Some("Detroit"));
        assert_eq!(g.resume_mode(), Some(ModeKey::Cities));
    }

    #[test]
    fn repeated_guess_is_recorded_once() {
        let mut g = game(vec![0]);
        g.start_mode(ModeKey::Cities).unwrap();
        let first = g.submit_guess(Point::new(42.3314, -83.0458)).unwrap();
        let again = g.submit_guess(Point::new(42.3314, -83.0458)).unwrap();
        assert_eq!(first, again);
        assert_eq!(g.session().streak, 1);
    }

    #[test]
    fn retry_does_not_touch_streak() {
        let mut g = game(vec![0]);
        g.start_mode(ModeKey::Cities).unwrap();
        g.submit_guess(Point::new(42.3314, -83.0458)).unwrap();
        g.retry().unwrap();
        assert_eq!(g.session().streak, 1);
        assert_eq!(g.snapshot().round_number, 1);
        assert_eq!(g.snapshot().outcome, None);

        g.submit_guess(Point::new(46.5, -87.4)).unwrap();
        assert_eq!(g.session().streak, 0);
        assert_eq!(g.session().high_score, 1);
    }

    #[test]
    fn next_round_and_change_mode() {
        let mut g = game(vec![0, 2]);
        assert_eq!(g.next_round().err(), Some(QuizError::NoActiveRound));

        g.start_mode(ModeKey::Cities).unwrap();
        assert_eq!(g.next_round().unwrap().name, "Warren");
        assert_eq!(g.snapshot().round_number, 2);

        g.change_mode();
        assert_eq!(g.phase(), RoundPhase::Idle);
        assert_eq!(g.active_mode(), None);
        assert_eq!(g.submit_guess(Point::new(0.0, 0.0)), Err(QuizError::NoActiveRound));
    }

    #[test]
    fn pool_size_change_rebuilds_active_cities_pool() {
        let mut g = game(vec![0]);
        g.start_mode(ModeKey::Cities).unwrap();
        assert_eq!(g.snapshot().pool_len, 3);
        g.next_round().unwrap();

        assert_eq!(g.set_pool_size(2).unwrap().as_raw(), 2);
        let snap = g.snapshot();
        assert_eq!(snap.pool_len, 2);
        assert_eq!(snap.round_number, 1);

        assert_eq!(g.set_pool_size(0), Err(QuizError::InvalidPoolSize(0)));
        assert_eq!(g.snapshot().pool_len, 2);
    }

    #[test]
    fn pool_size_change_leaves_other_modes_running() {
        let mut g = game(vec![0]);
        g.start_mode(ModeKey::CountySeats).unwrap();
        g.next_round().unwrap();
        g.set_pool_size(1).unwrap();
        assert_eq!(g.snapshot().round_number, 2);
        assert_eq!(g.snapshot().pool_len, 2);
        assert_eq!(g.pool_len(ModeKey::Cities), 1);
    }

    #[test]
    fn snapshot_reveals_answer_after_guess() {
        let mut g = game(vec![0]);
        g.start_mode(ModeKey::Counties).unwrap();

        let before = g.snapshot();
        assert_eq!(before.target_name.as_deref(), Some("Square"));
        assert!(before.answer.is_none());
        assert!(before.highlight.is_none());

        let outcome = g.submit_guess(Point::new(43.2, -84.8)).unwrap();
        assert!(outcome.success);

        let after = g.snapshot();
        assert_eq!(after.phase, RoundPhase::Resolved);
        assert_eq!(after.answer, Some(Point::new(43.5, -84.5)));
        assert!(after.highlight.is_some());
        assert_eq!(after.result_text.as_deref(), Some("You clicked inside Square!"));
        assert_eq!(after.streak, 1);
    }

    #[test]
    fn session_survives_a_new_game() {
        let mut g = game(vec![0]);
        g.start_mode(ModeKey::CountySeats).unwrap();
        g.submit_guess(Point::new(42.3314, -83.0458)).unwrap();
        g.set_counties_visible(true);

        let store = g.session.into_store();
        assert_eq!(store.get(KEY_HIGH_SCORE).as_deref(), Some("1"));
        assert_eq!(store.get(KEY_LAST_MODE).as_deref(), Some("county-seats"));

        let g2 = QuizGame::new(datasets(), store, ScriptedRng::new(vec![0]));
        assert_eq!(g2.session().high_score, 1);
        assert_eq!(g2.session().streak, 0);
        assert!(g2.session().counties_layer_visible);
        assert_eq!(g2.resume_mode(), Some(ModeKey::CountySeats));
    }
}
