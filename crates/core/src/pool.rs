//! Target pools - per-mode candidate sets and random selection

use tracing::debug;

use crate::error::{QuizError, Result};
use crate::rng::RandomSource;
use crate::types::{DataSource, ModeDefinition, ModeKey, PoolRule, PoolSize, Target};

/// Loaded records for every data source.
///
/// A source that failed to load is simply empty; modes built on it fail with
/// [`QuizError::EmptyPool`] while the others stay playable.
#[derive(Debug, Clone, Default)]
pub struct Datasets {
    pub cities: Vec<Target>,
    pub counties: Vec<Target>,
    pub parks: Vec<Target>,
    pub districts: Vec<Target>,
}

impl Datasets {
    pub fn records(&self, source: DataSource) -> &[Target] {
        match source {
            DataSource::Cities => &self.cities,
            DataSource::Counties => &self.counties,
            DataSource::Parks => &self.parks,
            DataSource::Districts => &self.districts,
        }
    }

    pub fn records_mut(&mut self, source: DataSource) -> &mut Vec<Target> {
        match source {
            DataSource::Cities => &mut self.cities,
            DataSource::Counties => &mut self.counties,
            DataSource::Parks => &mut self.parks,
            DataSource::Districts => &mut self.districts,
        }
    }
}

/// Ordered candidate set for one mode.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetPool {
    mode: ModeKey,
    targets: Vec<Target>,
}

impl TargetPool {
    /// Narrow `records` by the mode's pool rule.
    ///
    /// Population ranking is a stable sort, so equal populations keep their
    /// source order. Missing populations rank as zero.
    pub fn build(def: &ModeDefinition, records: &[Target], size: PoolSize) -> Result<Self> {
        let targets: Vec<Target> = match def.pool_rule {
            PoolRule::TopByPopulation => {
                let mut ranked = records.to_vec();
                ranked.sort_by(|a, b| b.population.unwrap_or(0).cmp(&a.population.unwrap_or(0)));
                if let PoolSize::Top(n) = size {
                    ranked.truncate(n.get());
                }
                ranked
            }
            PoolRule::CountySeatsOnly => records
                .iter()
                .filter(|t| t.is_county_seat == Some(true))
                .cloned()
                .collect(),
            PoolRule::All => records.to_vec(),
        };

        if targets.is_empty() {
            return Err(QuizError::EmptyPool(def.key));
        }

        debug!(mode = def.key.as_str(), size = targets.len(), "built target pool");
        Ok(Self {
            mode: def.key,
            targets,
        })
    }

    /// Uniform pick, with replacement across rounds.
    pub fn pick_random<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<&Target> {
        if self.targets.is_empty() {
            return Err(QuizError::EmptyPool(self.mode));
        }
        let idx = rng.next_index(self.targets.len());
        self.targets
            .get(idx)
            .ok_or(QuizError::EmptyPool(self.mode))
    }

    pub fn mode(&self) -> ModeKey {
        self.mode
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
