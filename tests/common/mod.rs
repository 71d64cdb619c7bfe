//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use geo_quiz::core::Datasets;
use geo_quiz::types::{Category, Geometry, Point, Target};

pub const DETROIT: Point = Point::new(42.3314, -83.0458);
pub const GRAND_RAPIDS: Point = Point::new(42.9634, -85.6681);

pub fn city(name: &str, location: Point, population: u64, seat: bool) -> Target {
    Target {
        population: Some(population),
        is_county_seat: Some(seat),
        ..Target::point(
            name,
            if seat { Category::CountySeat } else { Category::City },
            location,
        )
    }
}

/// Axis-aligned square area, `[west, east] x [south, north]`.
pub fn square(name: &str, category: Category, south: f64, west: f64, north: f64, east: f64) -> Target {
    let ring = vec![
        [west, south],
        [west, north],
        [east, north],
        [east, south],
        [west, south],
    ];
    Target {
        geometry: Some(Geometry::Polygon(vec![ring])),
        ..Target::point(
            name,
            category,
            Point::new((south + north) / 2.0, (west + east) / 2.0),
        )
    }
}

pub fn michigan() -> Datasets {
    Datasets {
        cities: vec![
            city("Detroit", DETROIT, 639_111, true),
            city("Grand Rapids", GRAND_RAPIDS, 198_917, true),
            city("Warren", Point::new(42.5145, -83.0147), 139_387, false),
            city("Lansing", Point::new(42.7325, -84.5555), 112_644, true),
        ],
        counties: vec![
            square("Ingham", Category::County, 42.42, -84.60, 42.78, -84.14),
            square("Kent", Category::County, 42.77, -85.79, 43.33, -85.30),
        ],
        parks: vec![square("Ludington", Category::Park, 44.02, -86.52, 44.12, -86.44)],
        districts: Vec::new(),
    }
}
