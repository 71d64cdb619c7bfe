//! Geometry kernel - distances and polygon containment
//!
//! Distances use the haversine formula on a sphere of radius
//! [`EARTH_RADIUS_METERS`], matching the browser map library the quiz was
//! designed around. Containment is even-odd ray casting over outer rings;
//! holes are ignored.

use crate::types::{Bounds, Geometry, Point, EARTH_RADIUS_METERS, METERS_TO_MILES};

/// Great-circle distance between two points, in meters.
pub fn distance_meters(a: Point, b: Point) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_METERS * c
}

/// Great-circle distance in miles, rounded to 2 decimal places.
///
/// The rounded value is what the player sees and what thresholds and
/// message tiers are compared against.
pub fn distance_miles(a: Point, b: Point) -> f64 {
    round_2dp(distance_meters(a, b) * METERS_TO_MILES)
}

fn round_2dp(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Even-odd ray cast against a single ring of `[x, y]` pairs.
///
/// Rings with fewer than 3 points contain nothing.
pub fn point_in_ring(x: f64, y: f64, ring: &[[f64; 2]]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let [xi, yi] = ring[i];
        let [xj, yj] = ring[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Whether `point` lies inside the outer ring of any polygon in `geometry`.
pub fn point_in_polygon(point: Point, geometry: &Geometry) -> bool {
    geometry
        .outer_rings()
        .any(|ring| point_in_ring(point.lng, point.lat, ring))
}

/// Bounding box over every coordinate of the geometry.
///
/// `None` when the geometry has no coordinates at all.
pub fn bounds(geometry: &Geometry) -> Option<Bounds> {
    let mut coords = geometry.coordinates();
    let [lng, lat] = coords.next()?;
    let init = Bounds {
        south: lat,
        west: lng,
        north: lat,
        east: lng,
    };
    Some(coords.fold(init, |b, [lng, lat]| Bounds {
        south: b.south.min(lat),
        west: b.west.min(lng),
        north: b.north.max(lat),
        east: b.east.max(lng),
    }))
}

/// Representative point of an area target: its bounding-box centre.
///
/// This may fall outside a concave polygon.
pub fn bbox_center(geometry: &Geometry) -> Option<Point> {
    bounds(geometry).map(|b| b.center())
}
