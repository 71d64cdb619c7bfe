//! Async dataset loading.
//!
//! All four sources are read concurrently. A source that fails is left empty
//! and reported in [`LoadReport::failures`]; the other sources still load.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use geo_quiz_core::Datasets;
use geo_quiz_types::{DataSource, Target};

use crate::error::DataLoadError;
use crate::records::{parse_areas, parse_cities};

/// File name of each data source inside the data directory.
pub fn file_name(source: DataSource) -> &'static str {
    match source {
        DataSource::Cities => "cities.json",
        DataSource::Counties => "counties.geojson",
        DataSource::Parks => "parks.geojson",
        DataSource::Districts => "districts.geojson",
    }
}

/// Result of loading every source.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub datasets: Datasets,
    pub failures: Vec<(DataSource, DataLoadError)>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, source: DataSource) -> bool {
        self.failures.iter().any(|(s, _)| *s == source)
    }
}

/// Read and normalize one source file.
pub async fn load_dataset(source: DataSource, path: &Path) -> Result<Vec<Target>, DataLoadError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|error| DataLoadError::Io {
            dataset: source.as_str(),
            path: path.to_path_buf(),
            error,
        })?;

    match source {
        DataSource::Cities => parse_cities(&text),
        _ => parse_areas(source, &text),
    }
}

/// Load every source from `dir`.
pub async fn load_all(dir: &Path) -> LoadReport {
    let [cities_path, counties_path, parks_path, districts_path]: [PathBuf; 4] =
        DataSource::ALL.map(|source| dir.join(file_name(source)));

    let (cities, counties, parks, districts) = tokio::join!(
        load_dataset(DataSource::Cities, &cities_path),
        load_dataset(DataSource::Counties, &counties_path),
        load_dataset(DataSource::Parks, &parks_path),
        load_dataset(DataSource::Districts, &districts_path),
    );

    let mut report = LoadReport::default();
    for (source, result) in [
        (DataSource::Cities, cities),
        (DataSource::Counties, counties),
        (DataSource::Parks, parks),
        (DataSource::Districts, districts),
    ] {
        match result {
            Ok(targets) => {
                info!(dataset = source.as_str(), count = targets.len(), "dataset loaded");
                *report.datasets.records_mut(source) = targets;
            }
            Err(e) => {
                warn!(dataset = source.as_str(), error = %e, "dataset unavailable");
                report.failures.push((source, e));
            }
        }
    }
    report
}
