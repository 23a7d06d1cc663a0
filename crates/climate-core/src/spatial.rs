//! Great-circle distance on a spherical Earth.

use crate::models::Coordinate;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate distance between two points in kilometers using the haversine formula.
///
/// Inputs are decimal degrees and are not range-checked.
///
/// # Arguments
/// * `lat1`, `lon1` - First point coordinates in decimal degrees
/// * `lat2`, `lon2` - Second point coordinates in decimal degrees
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();
    let a = (dphi / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlambda / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for near-antipodal points.
    2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
}

/// Distance in kilometers between two coordinates.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    haversine_km(a.latitude, a.longitude, b.latitude, b.longitude)
}
