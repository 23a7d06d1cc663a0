//! Ocean/water-body exclusion via point-in-polygon tests.
//!
//! Polygons are stored in (longitude, latitude) axis order. Containment uses
//! the `geo` crate's `Contains` predicate, which excludes the boundary: a
//! point lying exactly on a coastline edge or vertex is not in the ocean.

use geo::{BoundingRect, Contains, Coord, Point, Polygon, Rect};

use crate::models::Coordinate;

#[derive(Debug, Clone)]
struct IndexedPolygon {
    bbox: Rect<f64>,
    polygon: Polygon<f64>,
}

impl IndexedPolygon {
    fn bbox_covers(&self, coord: Coord<f64>) -> bool {
        let min = self.bbox.min();
        let max = self.bbox.max();
        coord.x >= min.x && coord.x <= max.x && coord.y >= min.y && coord.y <= max.y
    }
}

/// Read-only set of ocean/water-body polygons.
#[derive(Debug, Clone, Default)]
pub struct LandmassPolygonSet {
    polygons: Vec<IndexedPolygon>,
}

impl LandmassPolygonSet {
    /// Build the set. Polygons with no coordinates are dropped.
    pub fn new(polygons: impl IntoIterator<Item = Polygon<f64>>) -> Self {
        let polygons = polygons
            .into_iter()
            .filter_map(|polygon| {
                let bbox = polygon.bounding_rect()?;
                Some(IndexedPolygon { bbox, polygon })
            })
            .collect();
        Self { polygons }
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// True if any polygon strictly contains the coordinate.
    pub fn is_ocean(&self, coord: Coordinate) -> bool {
        let point = Point::new(coord.longitude, coord.latitude);
        self.polygons
            .iter()
            .filter(|indexed| indexed.bbox_covers(point.0))
            .any(|indexed| indexed.polygon.contains(&point))
    }
}
