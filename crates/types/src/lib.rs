//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the quiz.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (scoring engine, data loading, terminal rendering).
//!
//! # Map Constants
//!
//! The quiz is played on a map of Michigan:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MAP_CENTER` | 44.3148, -85.6024 | Initial view centre |
//! | `MAP_BOUNDS` | 41.5..48.5 N, -90.5..-82.0 E | Playable area |
//! | `EARTH_RADIUS_METERS` | 6 371 000 | Sphere used for distances |
//! | `METERS_TO_MILES` | 0.000621371 | Display unit conversion |
//!
//! # Message Tiers
//!
//! Distance bands (miles, strict upper bounds):
//!
//! | Tier | Distance |
//! |------|----------|
//! | Excellent | < 5 |
//! | Great | < 15 |
//! | Warm | < 30 |
//! | KeepPracticing | < 50 |
//! | TryAgain | otherwise |
//!
//! # Examples
//!
//! ```
//! use geo_quiz_types::{MessageTier, ModeKey, PoolSize};
//!
//! // Parse a mode key (case-insensitive)
//! let mode = ModeKey::from_str("County-Seats").unwrap();
//! assert_eq!(mode, ModeKey::CountySeats);
//! assert_eq!(mode.as_str(), "county-seats");
//!
//! // Distance bands
//! assert_eq!(MessageTier::from_distance(4.99), MessageTier::Excellent);
//! assert_eq!(MessageTier::from_distance(50.0), MessageTier::TryAgain);
//!
//! // Pool size round-trips through its persisted form
//! assert_eq!(PoolSize::from_raw(-1), Some(PoolSize::All));
//! assert_eq!(PoolSize::from_raw(0), None);
//! ```

use std::num::NonZeroUsize;

/// Conversion factor from meters to statute miles.
pub const METERS_TO_MILES: f64 = 0.000621371;

/// Mean Earth radius in meters (same sphere the browser map library uses).
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Initial map view centre.
pub const MAP_CENTER: Point = Point {
    lat: 44.3148,
    lng: -85.6024,
};

/// Playable map area; panning is clamped to it.
pub const MAP_BOUNDS: Bounds = Bounds {
    south: 41.5,
    west: -90.5,
    north: 48.5,
    east: -82.0,
};

/// Default number of cities in the `cities` pool (top N by population).
pub const DEFAULT_POOL_SIZE: usize = 20;

/// Pool sizes offered by the pool-size control, in cycling order.
/// `-1` means "all cities".
pub const POOL_SIZE_CHOICES: [i64; 5] = [10, 20, 50, 100, -1];

/// Upper bounds (exclusive) of the distance-based message tiers, in miles.
pub const TIER_EXCELLENT_MILES: f64 = 5.0;
pub const TIER_GREAT_MILES: f64 = 15.0;
pub const TIER_WARM_MILES: f64 = 30.0;
pub const TIER_KEEP_PRACTICING_MILES: f64 = 50.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A polygon ring as `[lng, lat]` pairs (GeoJSON coordinate order).
pub type Ring = Vec<[f64; 2]>;

/// Area geometry of a target.
///
/// Each polygon is a list of rings; the first ring is the outer boundary and
/// any further rings are holes.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

impl Geometry {
    /// Iterate over the outer ring of every constituent polygon.
    pub fn outer_rings(&self) -> impl Iterator<Item = &Ring> + '_ {
        let polygons: Box<dyn Iterator<Item = &Vec<Ring>> + '_> = match self {
            Geometry::Polygon(rings) => Box::new(std::iter::once(rings)),
            Geometry::MultiPolygon(polygons) => Box::new(polygons.iter()),
        };
        polygons.filter_map(|rings| rings.first())
    }

    /// Iterate over every coordinate of every ring, holes included.
    pub fn coordinates(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        let polygons: Box<dyn Iterator<Item = &Vec<Ring>> + '_> = match self {
            Geometry::Polygon(rings) => Box::new(std::iter::once(rings)),
            Geometry::MultiPolygon(polygons) => Box::new(polygons.iter()),
        };
        polygons.flatten().flatten().copied()
    }
}

/// Axis-aligned lat/lng box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn center(&self) -> Point {
        Point {
            lat: (self.south + self.north) / 2.0,
            lng: (self.west + self.east) / 2.0,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.lat >= self.south
            && point.lat <= self.north
            && point.lng >= self.west
            && point.lng <= self.east
    }

    /// Clamp a point into the box.
    pub fn clamp(&self, point: Point) -> Point {
        Point {
            lat: point.lat.clamp(self.south, self.north),
            lng: point.lng.clamp(self.west, self.east),
        }
    }
}

/// What kind of place a target is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    City,
    CountySeat,
    County,
    Park,
    District,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::City => "city",
            Category::CountySeat => "countySeat",
            Category::County => "county",
            Category::Park => "park",
            Category::District => "district",
        }
    }
}

/// A guessable place.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub name: String,
    pub category: Category,
    /// Raw coordinate for point features, bounding-box centre for areas.
    pub location: Point,
    pub geometry: Option<Geometry>,
    pub population: Option<u64>,
    pub date_founded: Option<String>,
    pub fun_fact: Option<String>,
    pub is_county_seat: Option<bool>,
    pub district_label: Option<String>,
}

impl Target {
    /// A point target with no optional details.
    pub fn point(name: impl Into<String>, category: Category, location: Point) -> Self {
        Self {
            name: name.into(),
            category,
            location,
            geometry: None,
            population: None,
            date_founded: None,
            fun_fact: None,
            is_county_seat: None,
            district_label: None,
        }
    }

    /// Wikipedia article URL for this target, given a mode's title suffix.
    ///
    /// # Examples
    ///
    /// ```
    /// use geo_quiz_types::{Category, Point, Target};
    ///
    /// let t = Target::point("Grand Rapids", Category::City, Point::new(42.96, -85.66));
    /// assert_eq!(
    ///     t.wiki_url(", Michigan"),
    ///     "https://en.wikipedia.org/wiki/Grand_Rapids,_Michigan"
    /// );
    /// ```
    pub fn wiki_url(&self, suffix: &str) -> String {
        let title = format!("{}{}", self.name, suffix).replace(' ', "_");
        format!("https://en.wikipedia.org/wiki/{title}")
    }
}

/// The five quiz modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeKey {
    Cities,
    CountySeats,
    Counties,
    Parks,
    Districts,
}

impl ModeKey {
    /// Every mode, in menu order.
    pub const ALL: [ModeKey; 5] = [
        ModeKey::Cities,
        ModeKey::CountySeats,
        ModeKey::Counties,
        ModeKey::Parks,
        ModeKey::Districts,
    ];

    /// Parse a mode key (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use geo_quiz_types::ModeKey;
    ///
    /// assert_eq!(ModeKey::from_str("cities"), Some(ModeKey::Cities));
    /// assert_eq!(ModeKey::from_str("PARKS"), Some(ModeKey::Parks));
    /// assert_eq!(ModeKey::from_str("rivers"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cities" => Some(ModeKey::Cities),
            "county-seats" => Some(ModeKey::CountySeats),
            "counties" => Some(ModeKey::Counties),
            "parks" => Some(ModeKey::Parks),
            "districts" => Some(ModeKey::Districts),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModeKey::Cities => "cities",
            ModeKey::CountySeats => "county-seats",
            ModeKey::Counties => "counties",
            ModeKey::Parks => "parks",
            ModeKey::Districts => "districts",
        }
    }
}

/// Dataset a mode draws its targets from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSource {
    Cities,
    Counties,
    Parks,
    Districts,
}

impl DataSource {
    pub const ALL: [DataSource; 4] = [
        DataSource::Cities,
        DataSource::Counties,
        DataSource::Parks,
        DataSource::Districts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Cities => "cities",
            DataSource::Counties => "counties",
            DataSource::Parks => "parks",
            DataSource::Districts => "districts",
        }
    }

    /// Whether records from this source carry polygon geometry.
    pub fn is_area(&self) -> bool {
        !matches!(self, DataSource::Cities)
    }
}

/// How a mode narrows its data source into a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolRule {
    /// Most populous first, truncated to the session pool size.
    TopByPopulation,
    /// Only records flagged as county seats.
    CountySeatsOnly,
    /// The whole data source, unfiltered.
    All,
}

/// Success rule of a mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scoring {
    /// Success when the guess is strictly closer than `threshold_miles`.
    DistanceThreshold { threshold_miles: f64 },
    /// Success when the guess lies inside the target polygon.
    Containment,
}

impl Scoring {
    pub fn is_containment(&self) -> bool {
        matches!(self, Scoring::Containment)
    }
}

/// Static description of a quiz mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeDefinition {
    pub key: ModeKey,
    pub data_source: DataSource,
    pub label: &'static str,
    pub result_label: &'static str,
    pub next_action_label: &'static str,
    pub shows_population: bool,
    pub shows_date_founded: bool,
    pub wiki_suffix: &'static str,
    pub has_pool_size_control: bool,
    pub pool_rule: PoolRule,
    pub scoring: Scoring,
}

/// Size preference for population-ranked pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolSize {
    All,
    Top(NonZeroUsize),
}

impl Default for PoolSize {
    fn default() -> Self {
        match NonZeroUsize::new(DEFAULT_POOL_SIZE) {
            Some(n) => PoolSize::Top(n),
            None => PoolSize::All,
        }
    }
}

impl PoolSize {
    /// Build from the persisted integer form: `-1` is "all", positive is top N.
    pub fn from_raw(raw: i64) -> Option<Self> {
        if raw == -1 {
            return Some(PoolSize::All);
        }
        let n = usize::try_from(raw).ok()?;
        NonZeroUsize::new(n).map(PoolSize::Top)
    }

    pub fn as_raw(&self) -> i64 {
        match self {
            PoolSize::All => -1,
            PoolSize::Top(n) => n.get() as i64,
        }
    }

    /// The next choice in [`POOL_SIZE_CHOICES`], wrapping around.
    ///
    /// Sizes not in the list restart the cycle from the first choice.
    pub fn cycle(&self) -> Self {
        let raw = self.as_raw();
        let next = POOL_SIZE_CHOICES
            .iter()
            .position(|&c| c == raw)
            .map(|i| POOL_SIZE_CHOICES[(i + 1) % POOL_SIZE_CHOICES.len()])
            .unwrap_or(POOL_SIZE_CHOICES[0]);
        PoolSize::from_raw(next).unwrap_or_default()
    }

    pub fn label(&self) -> String {
        match self {
            PoolSize::All => "all".to_string(),
            PoolSize::Top(n) => format!("top {n}"),
        }
    }
}

/// Player-facing result band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTier {
    PerfectInside,
    Excellent,
    Great,
    Warm,
    KeepPracticing,
    TryAgain,
}

impl MessageTier {
    /// Distance-based tier (never returns `PerfectInside`).
    pub fn from_distance(miles: f64) -> Self {
        if miles < TIER_EXCELLENT_MILES {
            MessageTier::Excellent
        } else if miles < TIER_GREAT_MILES {
            MessageTier::Great
        } else if miles < TIER_WARM_MILES {
            MessageTier::Warm
        } else if miles < TIER_KEEP_PRACTICING_MILES {
            MessageTier::KeepPracticing
        } else {
            MessageTier::TryAgain
        }
    }

    /// Result line for the side panel. Printable ASCII only, one cell per char.
    pub fn message(&self) -> &'static str {
        match self {
            MessageTier::PerfectInside => "Perfect! Right inside the boundary!",
            MessageTier::Excellent => "Excellent! Very close!",
            MessageTier::Great => "Great job! Pretty close!",
            MessageTier::Warm => "Not bad! Getting warmer!",
            MessageTier::KeepPracticing => "Keep practicing!",
            MessageTier::TryAgain => "Try again next time!",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageTier::PerfectInside => "perfectInside",
            MessageTier::Excellent => "excellent",
            MessageTier::Great => "great",
            MessageTier::Warm => "warm",
            MessageTier::KeepPracticing => "keepPracticing",
            MessageTier::TryAgain => "tryAgain",
        }
    }
}

/// Result of evaluating one guess.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundOutcome {
    pub success: bool,
    /// Distance to the target's location, rounded to 2 decimal places.
    pub distance_miles: f64,
    pub tier: MessageTier,
}

/// Round lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundPhase {
    #[default]
    Idle,
    AwaitingGuess,
    Resolved,
}

/// Cursor movement direction on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

/// Player intents, independent of the input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizAction {
    /// Move the map cursor one step
    Move(Direction),
    /// Move the map cursor several steps
    MoveFast(Direction),
    /// Submit the cursor position as the guess
    Guess,
    /// Replay the current target
    Retry,
    /// Draw a new target
    Next,
    /// Back to mode selection
    ChangeMode,
    /// Start a mode from the selection screen
    SelectMode(ModeKey),
    /// Show or hide county outlines
    ToggleCounties,
    /// Step through pool-size choices
    CyclePoolSize,
}
