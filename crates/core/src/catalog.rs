//! Mode catalog - static registry of quiz modes
//!
//! Every mode names its data source as a typed [`DataSource`], so a pool is
//! resolved through [`crate::Datasets::records`] without any lookup by name.

use crate::error::{QuizError, Result};
use crate::types::{DataSource, ModeDefinition, ModeKey, PoolRule, Scoring};

/// Miles within which a city guess counts as a hit.
pub const CITY_THRESHOLD_MILES: f64 = 10.0;

static MODES: [ModeDefinition; 5] = [
    ModeDefinition {
        key: ModeKey::Cities,
        data_source: DataSource::Cities,
        label: "Major Cities",
        result_label: "City",
        next_action_label: "Next City",
        shows_population: true,
        shows_date_founded: true,
        wiki_suffix: ", Michigan",
        has_pool_size_control: true,
        pool_rule: PoolRule::TopByPopulation,
        scoring: Scoring::DistanceThreshold {
            threshold_miles: CITY_THRESHOLD_MILES,
        },
    },
    ModeDefinition {
        key: ModeKey::CountySeats,
        data_source: DataSource::Cities,
        label: "County Seats",
        result_label: "County Seat",
        next_action_label: "Next County Seat",
        shows_population: true,
        shows_date_founded: true,
        wiki_suffix: ", Michigan",
        has_pool_size_control: false,
        pool_rule: PoolRule::CountySeatsOnly,
        scoring: Scoring::DistanceThreshold {
            threshold_miles: CITY_THRESHOLD_MILES,
        },
    },
    ModeDefinition {
        key: ModeKey::Counties,
        data_source: DataSource::Counties,
        label: "Counties",
        result_label: "County",
        next_action_label: "Next County",
        shows_population: true,
        shows_date_founded: true,
        wiki_suffix: " County, Michigan",
        has_pool_size_control: false,
        pool_rule: PoolRule::All,
        scoring: Scoring::Containment,
    },
    ModeDefinition {
        key: ModeKey::Parks,
        data_source: DataSource::Parks,
        label: "State Parks",
        result_label: "Park",
        next_action_label: "Next Park",
        shows_population: false,
        shows_date_founded: true,
        wiki_suffix: "",
        has_pool_size_control: false,
        pool_rule: PoolRule::All,
        scoring: Scoring::Containment,
    },
    ModeDefinition {
        key: ModeKey::Districts,
        data_source: DataSource::Districts,
        label: "Congressional Districts",
        result_label: "District",
        next_action_label: "Next District",
        shows_population: true,
        shows_date_founded: false,
        wiki_suffix: "",
        has_pool_size_control: false,
        pool_rule: PoolRule::All,
        scoring: Scoring::Containment,
    },
];

/// Read-only access to the mode table.
pub struct ModeCatalog;

impl ModeCatalog {
    /// Look up a mode by its string key (case-insensitive).
    pub fn get(key: &str) -> Result<&'static ModeDefinition> {
        ModeKey::from_str(key)
            .map(Self::definition)
            .ok_or_else(|| QuizError::UnknownMode(key.to_string()))
    }

    pub fn definition(key: ModeKey) -> &'static ModeDefinition {
        match key {
            ModeKey::Cities => &MODES[0],
            ModeKey::CountySeats => &MODES[1],
            ModeKey::Counties => &MODES[2],
            ModeKey::Parks => &MODES[3],
            ModeKey::Districts => &MODES[4],
        }
    }

    /// All modes in menu order.
    pub fn all() -> &'static [ModeDefinition] {
        &MODES
    }
}
