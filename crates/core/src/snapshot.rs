//! Read-only view of the game for renderers.
//!
//! A snapshot carries everything a front-end needs to draw one frame, so
//! renderers never reach into engine internals. Answer details (location,
//! boundary, facts) are only filled in once the round is resolved.

use crate::types::{
    Geometry, ModeDefinition, ModeKey, Point, PoolSize, RoundOutcome, RoundPhase, Scoring, Target,
};

/// Facts revealed about the target after a guess.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetDetails {
    pub population: Option<u64>,
    pub date_founded: Option<String>,
    pub fun_fact: Option<String>,
    pub district_label: Option<String>,
    pub wiki_url: String,
}

impl TargetDetails {
    /// Details filtered by what the mode chooses to show.
    pub fn for_mode(def: &ModeDefinition, target: &Target) -> Self {
        Self {
            population: target.population.filter(|_| def.shows_population),
            date_founded: target
                .date_founded
                .clone()
                .filter(|_| def.shows_date_founded),
            fun_fact: target.fun_fact.clone(),
            district_label: target.district_label.clone(),
            wiki_url: target.wiki_url(def.wiki_suffix),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameSnapshot {
    pub phase: RoundPhase,
    pub mode: Option<ModeKey>,
    pub mode_label: Option<&'static str>,
    pub next_action_label: Option<&'static str>,
    pub round_number: u32,
    pub target_name: Option<String>,
    pub outcome: Option<RoundOutcome>,
    /// Headline for the outcome, e.g. the tier message.
    pub result_message: Option<&'static str>,
    /// Distance or containment sentence for the outcome.
    pub result_text: Option<String>,
    pub guess: Option<Point>,
    pub answer: Option<Point>,
    /// Target boundary to highlight (polygon modes, after a guess).
    pub highlight: Option<Geometry>,
    pub details: Option<TargetDetails>,
    pub streak: u32,
    pub high_score: u32,
    pub pool_size: PoolSize,
    pub pool_len: usize,
    pub has_pool_size_control: bool,
    pub counties_visible: bool,
}

/// Player-facing sentence describing where the guess landed.
pub fn result_text(def: &ModeDefinition, target: &Target, outcome: &RoundOutcome) -> String {
    match def.scoring {
        Scoring::Containment if outcome.success => {
            format!("You clicked inside {}!", target.name)
        }
        Scoring::Containment => format!(
            "Outside {}. Its centre is {:.2} miles away.",
            target.name, outcome.distance_miles
        ),
        Scoring::DistanceThreshold { .. } => {
            format!("You were {:.2} miles away!", outcome.distance_miles)
        }
    }
}
