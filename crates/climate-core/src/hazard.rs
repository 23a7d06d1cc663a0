//! Synthetic hazard scores and the composite risk index.
//!
//! The per-hazard scores are a deterministic function of coordinate
//! magnitude. They stand in for a real hazard model and must stay
//! bit-compatible with existing clients, so the constants, the modulo-1 wrap
//! and the two-decimal rounding are fixed.

use crate::models::{Coordinate, HazardScores, WeightTriple};

/// (latitude, longitude) coefficients per hazard.
const FLOOD_COEFFS: (f64, f64) = (0.73, 0.21);
const HEAT_COEFFS: (f64, f64) = (0.31, 0.47);
const DROUGHT_COEFFS: (f64, f64) = (0.13, 0.59);

/// Derive flood/heat/drought scores for a coordinate.
pub fn hazard_scores(coord: Coordinate) -> HazardScores {
    let lat = coord.latitude.abs();
    let lon = coord.longitude.abs();

    HazardScores {
        flood: synthesize(lat, lon, FLOOD_COEFFS),
        heat: synthesize(lat, lon, HEAT_COEFFS),
        drought: synthesize(lat, lon, DROUGHT_COEFFS),
    }
}

/// Weighted sum of hazard scores. Weights are used as given.
pub fn composite_risk_index(scores: &HazardScores, weights: &WeightTriple) -> f64 {
    weights.flood_weight * scores.flood
        + weights.heat_weight * scores.heat
        + weights.drought_weight * scores.drought
}

fn synthesize(lat: f64, lon: f64, (lat_coeff, lon_coeff): (f64, f64)) -> f64 {
    round2((lat * lat_coeff + lon * lon_coeff) % 1.0)
}

/// Round to 2 decimals from the exact stored value, ties to even.
/// 0.155 is stored as 0.15499... and rounds down.
fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
