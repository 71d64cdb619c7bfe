//! Session tracking - streak, high score and persisted preferences
//!
//! The tracker keeps [`SessionState`] in memory and writes each persisted
//! field through to a [`KeyValueStore`] as it changes. Only the high score
//! and preferences survive a restart; the streak starts at zero.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::error::{QuizError, Result};
use crate::types::{ModeKey, PoolSize, RoundOutcome};

pub const KEY_COUNTIES_VISIBLE: &str = "countiesVisible";
pub const KEY_CITIES_POOL_SIZE: &str = "citiesPoolSize";
pub const KEY_HIGH_SCORE: &str = "highScore";
pub const KEY_LAST_MODE: &str = "lastMode";

/// Durable string key/value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, for tests and for running without a state file.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionState {
    pub streak: u32,
    pub high_score: u32,
    pub cities_pool_size: PoolSize,
    pub counties_layer_visible: bool,
    pub last_mode: Option<ModeKey>,
}

pub struct SessionTracker<S> {
    state: SessionState,
    store: S,
}

impl<S: KeyValueStore> SessionTracker<S> {
    /// Load persisted fields from `store`.
    ///
    /// Each field is read on its own: a missing or malformed value keeps its
    /// default without affecting the others.
    pub fn load(store: S) -> Self {
        let mut state = SessionState::default();

        if let Some(v) = read_field(&store, KEY_COUNTIES_VISIBLE, parse_bool) {
            state.counties_layer_visible = v;
        }
        if let Some(v) = read_field(&store, KEY_CITIES_POOL_SIZE, |s| {
            s.parse::<i64>().ok().and_then(PoolSize::from_raw)
        }) {
            state.cities_pool_size = v;
        }
        if let Some(v) = read_field(&store, KEY_HIGH_SCORE, |s| s.parse::<u32>().ok()) {
            state.high_score = v;
        }
        if let Some(v) = read_field(&store, KEY_LAST_MODE, ModeKey::from_str) {
            state.last_mode = Some(v);
        }

        info!(
            high_score = state.high_score,
            pool_size = state.cities_pool_size.as_raw(),
            counties_visible = state.counties_layer_visible,
            last_mode = ?state.last_mode,
            "session loaded"
        );
        Self { state, store }
    }

    /// Write every persisted field.
    pub fn save(&mut self) {
        let s = self.state;
        self.persist(KEY_COUNTIES_VISIBLE, &s.counties_layer_visible.to_string());
        self.persist(KEY_CITIES_POOL_SIZE, &s.cities_pool_size.as_raw().to_string());
        self.persist(KEY_HIGH_SCORE, &s.high_score.to_string());
        if let Some(mode) = s.last_mode {
            self.persist(KEY_LAST_MODE, mode.as_str());
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Advance or break the streak, raising the high score if beaten.
    pub fn record_outcome(&mut self, outcome: &RoundOutcome) {
        if outcome.success {
            self.state.streak += 1;
        } else {
            self.state.streak = 0;
        }

        if self.state.streak > self.state.high_score {
            self.state.high_score = self.state.streak;
            let value = self.state.high_score.to_string();
            self.persist(KEY_HIGH_SCORE, &value);
        }
    }

    /// Accepts `-1` (all) or a positive count.
    pub fn set_pool_size(&mut self, raw: i64) -> Result<PoolSize> {
        let size = PoolSize::from_raw(raw).ok_or(QuizError::InvalidPoolSize(raw))?;
        self.state.cities_pool_size = size;
        self.persist(KEY_CITIES_POOL_SIZE, &raw.to_string());
        Ok(size)
    }

    pub fn set_counties_visible(&mut self, visible: bool) {
        self.state.counties_layer_visible = visible;
        self.persist(KEY_COUNTIES_VISIBLE, &visible.to_string());
    }

    pub fn set_last_mode(&mut self, mode: ModeKey) {
        self.state.last_mode = Some(mode);
        self.persist(KEY_LAST_MODE, mode.as_str());
    }

    // In-memory state stays authoritative when a write fails.
    fn persist(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            warn!(key, error = %e, "failed to persist session field");
        }
    }
}

fn read_field<S: KeyValueStore, T>(
    store: &S,
    key: &str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Option<T> {
    let raw = store.get(key)?;
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        warn!(key, value = %raw, "ignoring malformed stored value");
    }
    parsed
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
