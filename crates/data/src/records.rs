//! Record normalization - raw JSON into [`Target`]s
//!
//! Source files come from different exporters and disagree on property
//! names (`Name` vs `name`, `funFact` vs `fun_fact` vs `description`, ...).
//! Every lookup here goes through an alias list so the core only ever sees
//! the normalized shape.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use geo_quiz_core::geometry::bbox_center;
use geo_quiz_types::{Category, DataSource, Geometry, Point, Ring, Target};

use crate::error::DataLoadError;

const NAME_KEYS: &[&str] = &["name", "Name", "NAME", "NAMELSAD"];
const LAT_KEYS: &[&str] = &["lat", "latitude", "Latitude", "LAT"];
const LNG_KEYS: &[&str] = &["lng", "lon", "long", "longitude", "Longitude", "LNG", "LON"];
const POPULATION_KEYS: &[&str] = &["population", "Population", "POPULATION", "pop"];
const SEAT_KEYS: &[&str] = &["isCountySeat", "is_county_seat", "countySeat", "county_seat"];
const FOUNDED_KEYS: &[&str] = &[
    "dateFounded",
    "date_founded",
    "founded",
    "established",
    "Established",
];
const FUN_FACT_KEYS: &[&str] = &["funFact", "fun_fact", "description", "Description"];
const DISTRICT_KEYS: &[&str] = &["districtLabel", "district", "District", "DISTRICT", "label", "CD"];

/// Property bag with alias-aware accessors.
struct Props<'a>(&'a Map<String, Value>);

impl<'a> Props<'a> {
    fn first(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .filter_map(|k| self.0.get(*k))
            .find(|v| !v.is_null())
    }

    fn string(&self, keys: &[&str]) -> Option<String> {
        match self.first(keys)? {
            Value::String(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn number(&self, keys: &[&str]) -> Option<f64> {
        match self.first(keys)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().replace(',', "").parse().ok(),
            _ => None,
        }
    }

    fn count(&self, keys: &[&str]) -> Option<u64> {
        self.number(keys)
            .filter(|n| n.is_finite() && *n >= 0.0)
            .map(|n| n.round() as u64)
    }

    fn flag(&self, keys: &[&str]) -> Option<bool> {
        match self.first(keys)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_lowercase().as_str() {
                "true" | "yes" | "1" => Some(true),
                "false" | "no" | "0" => Some(false),
                _ => None,
            },
            Value::Number(n) => n.as_u64().map(|n| n != 0),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    geometry: Option<RawGeometry>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

/// Parse the cities file.
///
/// Accepts either a plain array of city objects or a GeoJSON
/// FeatureCollection of points.
pub fn parse_cities(text: &str) -> Result<Vec<Target>, DataLoadError> {
    let dataset = DataSource::Cities.as_str();
    let value: Value =
        serde_json::from_str(text).map_err(|error| DataLoadError::Parse { dataset, error })?;

    let rows: Vec<(Map<String, Value>, Option<RawGeometry>)> = match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some((map, None)),
                _ => None,
            })
            .collect(),
        Value::Object(_) => {
            let fc: FeatureCollection = serde_json::from_value(value)
                .map_err(|error| DataLoadError::Parse { dataset, error })?;
            fc.features
                .into_iter()
                .map(|f| (f.properties.unwrap_or_default(), f.geometry))
                .collect()
        }
        _ => {
            return Err(DataLoadError::Layout {
                dataset,
                reason: "expected an array or a FeatureCollection".to_string(),
            })
        }
    };

    let mut cities = Vec::with_capacity(rows.len());
    for (props, geometry) in &rows {
        match city_from(&Props(props), geometry.as_ref()) {
            Some(city) => cities.push(city),
            None => warn!(dataset, record = ?props.get("name"), "skipping city without name or coordinates"),
        }
    }
    Ok(cities)
}

fn city_from(props: &Props<'_>, geometry: Option<&RawGeometry>) -> Option<Target> {
    let name = props.string(NAME_KEYS)?;
    let location = match (props.number(LAT_KEYS), props.number(LNG_KEYS)) {
        (Some(lat), Some(lng)) => Point::new(lat, lng),
        _ => point_coordinates(geometry?)?,
    };
    let is_county_seat = props.flag(SEAT_KEYS);
    let category = if is_county_seat == Some(true) {
        Category::CountySeat
    } else {
        Category::City
    };

    Some(Target {
        name,
        category,
        location,
        geometry: None,
        population: props.count(POPULATION_KEYS),
        date_founded: props.string(FOUNDED_KEYS),
        fun_fact: props.string(FUN_FACT_KEYS),
        is_county_seat,
        district_label: None,
    })
}

fn point_coordinates(geometry: &RawGeometry) -> Option<Point> {
    if geometry.kind != "Point" {
        return None;
    }
    let pos: Vec<f64> = serde_json::from_value(geometry.coordinates.clone()).ok()?;
    match pos.as_slice() {
        [lng, lat, ..] => Some(Point::new(*lat, *lng)),
        _ => None,
    }
}

/// Parse a GeoJSON FeatureCollection of areas (counties, parks, districts).
///
/// Features without a name or a usable polygon are dropped.
pub fn parse_areas(source: DataSource, text: &str) -> Result<Vec<Target>, DataLoadError> {
    let dataset = source.as_str();
    let fc: FeatureCollection =
        serde_json::from_str(text).map_err(|error| DataLoadError::Parse { dataset, error })?;

    let category = match source {
        DataSource::Counties => Category::County,
        DataSource::Parks => Category::Park,
        DataSource::Districts => Category::District,
        DataSource::Cities => {
            return Err(DataLoadError::Layout {
                dataset,
                reason: "cities are point records".to_string(),
            })
        }
    };

    let mut targets = Vec::with_capacity(fc.features.len());
    for feature in fc.features {
        let properties = feature.properties.unwrap_or_default();
        match area_from(category, &Props(&properties), feature.geometry.as_ref()) {
            Some(t) => targets.push(t),
            None => warn!(dataset, ?properties, "skipping area without name or polygon"),
        }
    }
    Ok(targets)
}

fn area_from(category: Category, props: &Props<'_>, geometry: Option<&RawGeometry>) -> Option<Target> {
    let district_label = props.string(DISTRICT_KEYS);
    let name = match (props.string(NAME_KEYS), &district_label) {
        (Some(name), _) => name,
        (None, Some(label)) if category == Category::District => format!("District {label}"),
        _ => return None,
    };
    let name = match category {
        Category::County => match name.strip_suffix(" County") {
            Some(short) => short.to_string(),
            None => name,
        },
        _ => name,
    };

    let geometry = polygon_geometry(geometry?)?;
    let location = bbox_center(&geometry)?;

    Some(Target {
        name,
        category,
        location,
        geometry: Some(geometry),
        population: props.count(POPULATION_KEYS),
        date_founded: props.string(FOUNDED_KEYS),
        fun_fact: props.string(FUN_FACT_KEYS),
        is_county_seat: None,
        district_label,
    })
}

fn polygon_geometry(raw: &RawGeometry) -> Option<Geometry> {
    match raw.kind.as_str() {
        "Polygon" => {
            let rings: Vec<Vec<Vec<f64>>> = serde_json::from_value(raw.coordinates.clone()).ok()?;
            let polygon = to_polygon(rings);
            (!polygon.is_empty()).then_some(Geometry::Polygon(polygon))
        }
        "MultiPolygon" => {
            let polygons: Vec<Vec<Vec<Vec<f64>>>> =
                serde_json::from_value(raw.coordinates.clone()).ok()?;
            let polygons: Vec<Vec<Ring>> = polygons
                .into_iter()
                .map(to_polygon)
                .filter(|p| !p.is_empty())
                .collect();
            (!polygons.is_empty()).then_some(Geometry::MultiPolygon(polygons))
        }
        _ => None,
    }
}

// Drops altitude and malformed positions; a polygon whose outer ring
// has fewer than 3 positions is dropped entirely.
fn to_polygon(rings: Vec<Vec<Vec<f64>>>) -> Vec<Ring> {
    let rings: Vec<Ring> = rings
        .into_iter()
        .map(|ring| {
            ring.into_iter()
                .filter_map(|pos| match pos.as_slice() {
                    [lng, lat, ..] => Some([*lng, *lat]),
                    _ => None,
                })
                .collect()
        })
        .collect();
    match rings.first() {
        Some(outer) if outer.len() >= 3 => rings,
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cities_normalize_property_names() {
        let text = json!([
            {"name": "Detroit", "lat": 42.3314, "lng": -83.0458, "population": 639111,
             "isCountySeat": true, "dateFounded": "1701", "funFact": "Motor City"},
            {"Name": "Warren", "latitude": 42.5145, "longitude": -83.0147,
             "population": "139,387", "is_county_seat": false, "description": "Tank plant"},
            {"name": "Nowhere"}
        ])
        .to_string();

        let cities = parse_cities(&text).unwrap();
        assert_eq!(cities.len(), 2);

        let detroit = &cities[0];
        assert_eq!(detroit.category, Category::CountySeat);
        assert_eq!(detroit.population, Some(639_111));
        assert_eq!(detroit.is_county_seat, Some(true));
        assert_eq!(detroit.date_founded.as_deref(), Some("1701"));
        assert_eq!(detroit.fun_fact.as_deref(), Some("Motor City"));
        assert!(detroit.geometry.is_none());

        let warren = &cities[1];
        assert_eq!(warren.name, "Warren");
        assert_eq!(warren.category, Category::City);
        assert_eq!(warren.location, Point::new(42.5145, -83.0147));
        assert_eq!(warren.population, Some(139_387));
        assert_eq!(warren.fun_fact.as_deref(), Some("Tank plant"));
    }

    #[test]
    fn cities_from_point_features() {
        let text = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"NAME": "Marquette", "POPULATION": 20629, "county_seat": "yes"},
                "geometry": {"type": "Point", "coordinates": [-87.3954, 46.5436, 190.0]}
            }]
        })
        .to_string();

        let cities = parse_cities(&text).unwrap();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].location, Point::new(46.5436, -87.3954));
        assert_eq!(cities[0].is_county_seat, Some(true));
    }

    #[test]
    fn cities_reject_scalar_documents() {
        assert!(matches!(parse_cities("42"), Err(DataLoadError::Layout { .. })));
        assert!(matches!(parse_cities("[{"), Err(DataLoadError::Parse { .. })));
    }

    #[test]
    fn areas_use_bbox_center_and_strip_county_suffix() {
        let text = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature",
                 "properties": {"NAMELSAD": "Ingham County", "fun_fact": "Home of the capital"},
                 "geometry": {"type": "Polygon",
                              "coordinates": [[[-84.6, 42.4], [-84.6, 42.8], [-84.1, 42.8], [-84.1, 42.4], [-84.6, 42.4]]]}},
                {"type": "Feature", "properties": {"name": "Broken"},
                 "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 1.0]]]}},
                {"type": "Feature", "properties": {}, "geometry": null}
            ]
        })
        .to_string();

        let counties = parse_areas(DataSource::Counties, &text).unwrap();
        assert_eq!(counties.len(), 1);
        let ingham = &counties[0];
        assert_eq!(ingham.name, "Ingham");
        assert_eq!(ingham.category, Category::County);
        assert_eq!(ingham.fun_fact.as_deref(), Some("Home of the capital"));
        assert!((ingham.location.lat - 42.6).abs() < 1e-9);
        assert!((ingham.location.lng + 84.35).abs() < 1e-9);
    }

    #[test]
    fn null_properties_feature_is_skipped_not_fatal() {
        let text = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"NAME": "Ingham County"},
                 "geometry": {"type": "Polygon",
                              "coordinates": [[[-84.6, 42.4], [-84.6, 42.8], [-84.1, 42.8], [-84.1, 42.4], [-84.6, 42.4]]]}},
                {"type": "Feature", "properties": null, "geometry": null}
            ]
        })
        .to_string();

        let counties = parse_areas(DataSource::Counties, &text).unwrap();
        assert_eq!(counties.len(), 1);
        assert_eq!(counties[0].name, "Ingham");
    }

    #[test]
    fn null_properties_point_feature_has_no_name() {
        let text = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": null,
                 "geometry": {"type": "Point", "coordinates": [-87.3954, 46.5436]}},
                {"type": "Feature", "properties": {"name": "Lansing"},
                 "geometry": {"type": "Point", "coordinates": [-84.5555, 42.7325]}}
            ]
        })
        .to_string();

        let cities = parse_cities(&text).unwrap();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].name, "Lansing");
    }

    #[test]
    fn districts_fall_back_to_label_for_name() {
        let text = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"DISTRICT": 13, "population": 775000},
                "geometry": {"type": "MultiPolygon", "coordinates": [
                    [[[-83.3, 42.2], [-83.3, 42.5], [-83.0, 42.5], [-83.0, 42.2]]],
                    [[[-82.9, 42.3], [-82.9, 42.4], [-82.8, 42.4]]]
                ]}
            }]
        })
        .to_string();

        let districts = parse_areas(DataSource::Districts, &text).unwrap();
        assert_eq!(districts.len(), 1);
        assert_eq!(districts[0].name, "District 13");
        assert_eq!(districts[0].district_label.as_deref(), Some("13"));
        assert!(matches!(districts[0].geometry, Some(Geometry::MultiPolygon(ref p)) if p.len() == 2));
    }

    #[test]
    fn areas_refuse_city_source() {
        let text = json!({"type": "FeatureCollection", "features": []}).to_string();
        assert!(matches!(
            parse_areas(DataSource::Cities, &text),
            Err(DataLoadError::Layout { .. })
        ));
    }
}
