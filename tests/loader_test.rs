//! Dataset loading from a data directory.

use std::fs;
use std::path::Path;

use geo_quiz::core::{MemoryStore, QuizGame, ScriptedRng};
use geo_quiz::data::{file_name, load_all, load_dataset, DataLoadError};
use geo_quiz::types::{Category, DataSource, ModeKey, Point};
use serde_json::json;
use tempfile::{tempdir, TempDir};

fn data_dir() -> TempDir {
    tempdir().unwrap()
}

fn write(dir: &Path, source: DataSource, value: serde_json::Value) {
    fs::write(dir.join(file_name(source)), value.to_string()).unwrap();
}

fn square(lng0: f64, lat0: f64, lng1: f64, lat1: f64) -> serde_json::Value {
    json!({
        "type": "Polygon",
        "coordinates": [[[lng0, lat0], [lng1, lat0], [lng1, lat1], [lng0, lat1], [lng0, lat0]]]
    })
}

fn write_fixture(dir: &Path) {
    write(
        dir,
        DataSource::Cities,
        json!([
            {"name": "Detroit", "lat": 42.3314, "lng": -83.0458, "population": 639111, "isCountySeat": true},
            {"Name": "Warren", "latitude": "42.5145", "longitude": -83.0147, "population": "139,387"},
            {"name": "Nowhere"}
        ]),
    );
    write(
        dir,
        DataSource::Counties,
        json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"NAME": "Ingham County", "funFact": "Home of the capital."},
                 "geometry": square(-84.60, 42.42, -84.14, 42.78)},
                {"type": "Feature", "properties": {"name": "Broken"}, "geometry": null}
            ]
        }),
    );
    write(
        dir,
        DataSource::Districts,
        json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"DISTRICT": "3"},
                 "geometry": {"type": "MultiPolygon", "coordinates": [
                     [[[-86.0, 42.8], [-85.4, 42.8], [-85.4, 43.2], [-86.0, 43.2], [-86.0, 42.8]]]
                 ]}}
            ]
        }),
    );
}

#[tokio::test]
async fn loads_what_exists_and_reports_the_rest() {
    let tmp = data_dir();
    let dir = tmp.path();
    write_fixture(dir);

    let report = load_all(dir).await;
    assert!(!report.is_complete());
    assert!(report.failed(DataSource::Parks));
    assert!(!report.failed(DataSource::Cities));

    let data = &report.datasets;
    assert_eq!(data.cities.len(), 2);
    assert_eq!(data.cities[0].category, Category::CountySeat);
    assert_eq!(data.cities[1].name, "Warren");
    assert_eq!(data.cities[1].population, Some(139_387));
    assert_eq!(data.cities[1].category, Category::City);

    assert_eq!(data.counties.len(), 1);
    let ingham = &data.counties[0];
    assert_eq!(ingham.name, "Ingham");
    assert_eq!(ingham.fun_fact.as_deref(), Some("Home of the capital."));
    assert!((ingham.location.lat - 42.60).abs() < 1e-9);
    assert!((ingham.location.lng - -84.37).abs() < 1e-9);

    assert_eq!(data.districts[0].name, "District 3");
    assert_eq!(data.districts[0].district_label.as_deref(), Some("3"));
    assert!(data.parks.is_empty());
}

#[tokio::test]
async fn missing_source_does_not_block_other_modes() {
    let tmp = data_dir();
    let dir = tmp.path();
    write_fixture(dir);
    let report = load_all(dir).await;

    let mut game = QuizGame::new(report.datasets, MemoryStore::new(), ScriptedRng::new(vec![0]));
    assert!(game.start_mode(ModeKey::Parks).is_err());
    assert_eq!(game.start_mode(ModeKey::Counties).unwrap().name, "Ingham");
    assert!(game.submit_guess(Point::new(42.6, -84.4)).unwrap().success);
}

#[tokio::test]
async fn unreadable_and_corrupt_files_are_typed_errors() {
    let tmp = data_dir();
    let dir = tmp.path();
    let missing = load_dataset(DataSource::Parks, &dir.join("parks.geojson")).await;
    assert!(matches!(missing, Err(DataLoadError::Io { dataset: "parks", .. })));

    fs::write(dir.join("cities.json"), "{ not json").unwrap();
    let corrupt = load_dataset(DataSource::Cities, &dir.join("cities.json")).await;
    assert!(matches!(corrupt, Err(DataLoadError::Parse { dataset: "cities", .. })));
}
