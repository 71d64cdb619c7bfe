use std::env;
use std::path::PathBuf;

/// Runtime configuration, read from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizConfig {
    /// Directory holding `cities.json` and the `*.geojson` area files.
    pub data_dir: PathBuf,
    /// JSON file backing the persisted session.
    pub state_path: PathBuf,
    /// Fixed seed for target selection; `None` seeds from the clock.
    pub seed: Option<u32>,
    /// Log file; `None` disables logging.
    pub log_path: Option<PathBuf>,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            state_path: PathBuf::from("geo-quiz-state.json"),
            seed: None,
            log_path: Some(PathBuf::from("geo-quiz.log")),
            log_filter: "geo_quiz=info".to_string(),
        }
    }
}

impl QuizConfig {
    /// Load configuration from the process environment.
    ///
    /// - `GEO_QUIZ_DATA_DIR`: data directory (default "data")
    /// - `GEO_QUIZ_STATE_PATH`: session file (default "geo-quiz-state.json")
    /// - `GEO_QUIZ_SEED`: fixed u32 seed
    /// - `GEO_QUIZ_LOG_PATH`: log file (default "geo-quiz.log", empty disables)
    /// - `GEO_QUIZ_LOG`: tracing filter (default "geo_quiz=info")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let data_dir = non_empty("GEO_QUIZ_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let state_path = non_empty("GEO_QUIZ_STATE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.state_path);
        let seed = non_empty("GEO_QUIZ_SEED").and_then(|s| s.parse().ok());
        let log_path = match lookup("GEO_QUIZ_LOG_PATH") {
            Some(s) if s.trim().is_empty() => None,
            Some(s) => Some(PathBuf::from(s.trim())),
            None => defaults.log_path,
        };
        let log_filter = non_empty("GEO_QUIZ_LOG").unwrap_or(defaults.log_filter);

        Self {
            data_dir,
            state_path,
            seed,
            log_path,
            log_filter,
        }
    }
}
