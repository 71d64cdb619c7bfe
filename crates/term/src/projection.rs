//! Equirectangular projection of the play area onto a character grid.

use crate::types::{Bounds, Geometry, Point};

/// Maps geographic coordinates to cells of a `width` x `height` grid whose
/// top-left cell sits at `(origin_x, origin_y)` in the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapProjection {
    pub bounds: Bounds,
    pub origin_x: u16,
    pub origin_y: u16,
    pub width: u16,
    pub height: u16,
}

impl MapProjection {
    pub fn new(bounds: Bounds, origin_x: u16, origin_y: u16, width: u16, height: u16) -> Self {
        Self {
            bounds,
            origin_x,
            origin_y,
            width,
            height,
        }
    }

    /// Degrees covered by one cell, as `(lat, lng)`.
    pub fn cell_size(&self) -> (f64, f64) {
        let rows = f64::from(self.height.max(2) - 1);
        let cols = f64::from(self.width.max(2) - 1);
        (
            (self.bounds.north - self.bounds.south) / rows,
            (self.bounds.east - self.bounds.west) / cols,
        )
    }

    /// Fractional grid position of `point`, relative to the grid origin.
    /// Points outside the bounds map outside `0..width` / `0..height`.
    pub fn to_grid(&self, point: Point) -> (f64, f64) {
        let (dlat, dlng) = self.cell_size();
        (
            (point.lng - self.bounds.west) / dlng,
            (self.bounds.north - point.lat) / dlat,
        )
    }

    /// Framebuffer cell holding `point`, if it is on the map.
    pub fn project(&self, point: Point) -> Option<(u16, u16)> {
        let (gx, gy) = self.to_grid(point);
        self.grid_cell(gx, gy)
    }

    /// Geographic centre of framebuffer cell `(x, y)`.
    pub fn unproject(&self, x: u16, y: u16) -> Point {
        let (dlat, dlng) = self.cell_size();
        let gx = f64::from(x.saturating_sub(self.origin_x));
        let gy = f64::from(y.saturating_sub(self.origin_y));
        Point::new(self.bounds.north - gy * dlat, self.bounds.west + gx * dlng)
    }

    fn grid_cell(&self, gx: f64, gy: f64) -> Option<(u16, u16)> {
        let (cx, cy) = (gx.round(), gy.round());
        if cx < 0.0 || cy < 0.0 || cx >= f64::from(self.width) || cy >= f64::from(self.height) {
            return None;
        }
        Some((self.origin_x + cx as u16, self.origin_y + cy as u16))
    }

    /// Every on-map cell crossed by the edges of each outer ring.
    pub fn outline_cells(&self, geometry: &Geometry) -> Vec<(u16, u16)> {
        let mut cells = Vec::new();
        for ring in geometry.outer_rings() {
            for edge in ring.windows(2) {
                let a = self.to_grid(Point::new(edge[0][1], edge[0][0]));
                let b = self.to_grid(Point::new(edge[1][1], edge[1][0]));
                self.trace(a, b, &mut cells);
            }
        }
        cells.sort_unstable();
        cells.dedup();
        cells
    }

    fn trace(&self, a: (f64, f64), b: (f64, f64), out: &mut Vec<(u16, u16)>) {
        let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil().max(1.0);
        // Skip edges far larger than the map; they come from bad data.
        if steps > 8.0 * f64::from(self.width.max(self.height)) {
            return;
        }
        let n = steps as u32;
        for i in 0..=n {
            let t = f64::from(i) / steps;
            let gx = a.0 + (b.0 - a.0) * t;
            let gy = a.1 + (b.1 - a.1) * t;
            if let Some(cell) = self.grid_cell(gx, gy) {
                out.push(cell);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> MapProjection {
        // 1 degree per cell on an 11 x 11 grid.
        let bounds = Bounds {
            south: 40.0,
            west: -90.0,
            north: 50.0,
            east: -80.0,
        };
        MapProjection::new(bounds, 2, 1, 11, 11)
    }

    #[test]
    fn corners_project_to_grid_corners() {
        let p = unit();
        assert_eq!(p.project(Point::new(50.0, -90.0)), Some((2, 1)));
        assert_eq!(p.project(Point::new(40.0, -80.0)), Some((12, 11)));
        assert_eq!(p.project(Point::new(39.0, -85.0)), None);
        assert_eq!(p.project(Point::new(45.0, -79.0)), None);
    }

    #[test]
    fn unproject_inverts_project() {
        let p = unit();
        let point = p.unproject(7, 4);
        assert_eq!(point, Point::new(47.0, -85.0));
        assert_eq!(p.project(point), Some((7, 4)));
    }

    #[test]
    fn outline_is_connected() {
        let p = unit();
        let square = Geometry::Polygon(vec![vec![
            [-88.0, 48.0],
            [-84.0, 48.0],
            [-84.0, 44.0],
            [-88.0, 44.0],
            [-88.0, 48.0],
        ]]);
        let cells = p.outline_cells(&square);
        // 4 x 4 square perimeter = 16 cells.
        assert_eq!(cells.len(), 16);
        assert!(cells.contains(&(4, 3)));
        assert!(cells.contains(&(8, 7)));
        assert!(!cells.contains(&(6, 5)));
    }

    #[test]
    fn off_map_edges_are_clipped() {
        let p = unit();
        let strip = Geometry::Polygon(vec![vec![[-95.0, 45.0], [-75.0, 45.0], [-95.0, 45.0]]]);
        let cells = p.outline_cells(&strip);
        assert_eq!(cells.len(), 11);
        assert!(cells.iter().all(|&(_, y)| y == 6));
    }
}
